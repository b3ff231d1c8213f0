//! Per-field quantization metadata.
//!
//! Fields opt into compression by attaching params to their [`FieldMeta`].
//! A field with no params replicates at full width with the library-wide
//! default precisions.

/// Default tolerance used when comparing two values of a field that carries
/// no explicit [`ComparePrecision`] and no quantization params.
pub const DEFAULT_COMPARE_PRECISION: f32 = 1e-5;

/// Default tolerance used by delta encoding when a field carries no
/// quantization params.
pub const DEFAULT_DELTA_PRECISION: f32 = 1e-6;

/// Quantization parameters for float-valued fields (including vector and
/// matrix components).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatQuantizeParam {
    /// Largest absolute value a full encoding must represent.
    pub full_range: f32,
    /// Largest absolute difference a delta encoding must represent.
    pub delta_range: f32,
    /// Worst acceptable quantization error.
    pub precision: f32,
}

impl FloatQuantizeParam {
    /// Creates a param whose delta range equals its full range.
    #[must_use]
    pub const fn new(full_range: f32, precision: f32) -> Self {
        Self {
            full_range,
            delta_range: full_range,
            precision,
        }
    }

    /// Creates a param with a tighter delta range.
    #[must_use]
    pub const fn with_delta_range(full_range: f32, delta_range: f32, precision: f32) -> Self {
        Self {
            full_range,
            delta_range,
            precision,
        }
    }
}

/// Quantization parameters for quaternion-valued fields.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuaternionQuantizeParam {
    /// Worst acceptable per-component quantization error.
    pub precision: f32,
}

impl QuaternionQuantizeParam {
    #[must_use]
    pub const fn new(precision: f32) -> Self {
        Self { precision }
    }
}

/// Range parameters for integer fields up to 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntCompressParam {
    /// Largest absolute value a full encoding must represent.
    pub full_range: u32,
    /// Largest absolute difference a delta encoding must represent.
    pub delta_range: u32,
}

impl IntCompressParam {
    #[must_use]
    pub const fn new(full_range: u32, delta_range: u32) -> Self {
        Self {
            full_range,
            delta_range,
        }
    }
}

/// Range parameters for 64-bit integer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Int64CompressParam {
    /// Largest absolute value a full encoding must represent.
    pub full_range: u64,
    /// Largest absolute difference a delta encoding must represent.
    pub delta_range: u64,
}

impl Int64CompressParam {
    #[must_use]
    pub const fn new(full_range: u64, delta_range: u64) -> Self {
        Self {
            full_range,
            delta_range,
        }
    }
}

/// Explicit override for the tolerance used when comparing field values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparePrecision {
    pub precision: f32,
}

impl ComparePrecision {
    #[must_use]
    pub const fn new(precision: f32) -> Self {
        Self { precision }
    }
}

/// Aggregated per-field metadata.
///
/// At most one of [`FloatQuantizeParam`] and [`QuaternionQuantizeParam`] may
/// be present on the same field; attaching both violates the configuration
/// contract and is debug-asserted by the codec when the scheme is built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldMeta {
    pub float_quantize: Option<FloatQuantizeParam>,
    pub quaternion_quantize: Option<QuaternionQuantizeParam>,
    pub int_compress: Option<IntCompressParam>,
    pub int64_compress: Option<Int64CompressParam>,
    pub compare_precision: Option<ComparePrecision>,
}

impl FieldMeta {
    /// Creates empty metadata: full-width replication, default precisions.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            float_quantize: None,
            quaternion_quantize: None,
            int_compress: None,
            int64_compress: None,
            compare_precision: None,
        }
    }

    #[must_use]
    pub const fn with_float_quantize(mut self, param: FloatQuantizeParam) -> Self {
        self.float_quantize = Some(param);
        self
    }

    #[must_use]
    pub const fn with_quaternion_quantize(mut self, param: QuaternionQuantizeParam) -> Self {
        self.quaternion_quantize = Some(param);
        self
    }

    #[must_use]
    pub const fn with_int_compress(mut self, param: IntCompressParam) -> Self {
        self.int_compress = Some(param);
        self
    }

    #[must_use]
    pub const fn with_int64_compress(mut self, param: Int64CompressParam) -> Self {
        self.int64_compress = Some(param);
        self
    }

    #[must_use]
    pub const fn with_compare_precision(mut self, param: ComparePrecision) -> Self {
        self.compare_precision = Some(param);
        self
    }
}
