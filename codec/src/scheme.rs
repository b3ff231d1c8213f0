//! Compression schemes and the static quantization tables behind them.
//!
//! A [`CompressionScheme`] is a packed `u32` selecting one record from each
//! of the static tables below. Scheme `0` ([`CompressionScheme::NONE`]) means
//! "no quantization, full-width representation". The table contents are part
//! of the wire contract: two peers must run identical tables to agree on
//! field widths, which [`table_fingerprint`] lets them verify at handshake.

use schema::{FieldMeta, FloatQuantizeParam, Int64CompressParam, IntCompressParam,
    QuaternionQuantizeParam};

/// A packed table-index triple selecting per-field bit widths.
///
/// Layout: `full_range_index | delta_range_index << 8 | frac_index << 16`.
/// Index 0 of every table is a sentinel and is never dereferenced; a scheme
/// whose relevant sub-index is 0 is invalid to dereference through the
/// record accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionScheme(u32);

impl CompressionScheme {
    /// No quantization; values are replicated at full width.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn full_range_index(self) -> usize {
        (self.0 & 0xFF) as usize
    }

    #[must_use]
    pub const fn delta_range_index(self) -> usize {
        ((self.0 >> 8) & 0xFF) as usize
    }

    #[must_use]
    pub const fn frac_index(self) -> usize {
        ((self.0 >> 16) & 0xFF) as usize
    }
}

impl Default for CompressionScheme {
    fn default() -> Self {
        Self::NONE
    }
}

/// One entry of the 32-bit integer range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRecord {
    /// Field width for a value shifted into `[0, 2 * range]`.
    pub bits: u32,
    /// Symmetric representable range `[-range, range]`.
    pub range: u32,
}

/// One entry of the 64-bit integer range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int64Record {
    pub bits: u32,
    pub range: u64,
}

/// One entry of a fractional-precision table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FracRecord {
    pub bits: u32,
    /// Worst-case quantization error achieved with `bits` fractional bits.
    pub precision: f32,
}

const fn build_int_records() -> [IntRecord; 29] {
    let mut records = [IntRecord { bits: 0, range: 0 }; 29];
    let mut i = 1;
    while i < 29 {
        records[i] = IntRecord {
            bits: i as u32 + 1,
            range: (1u32 << i) - 1,
        };
        i += 1;
    }
    records
}

const fn build_int64_records() -> [Int64Record; 61] {
    let mut records = [Int64Record { bits: 0, range: 0 }; 61];
    let mut i = 1;
    while i < 61 {
        records[i] = Int64Record {
            bits: i as u32 + 1,
            range: (1u64 << i) - 1,
        };
        i += 1;
    }
    records
}

/// Integer range table for values up to 32 bits: entry `i` covers
/// `[-(2^i - 1), 2^i - 1]` in `i + 1` bits.
pub static INT_RECORDS: [IntRecord; 29] = build_int_records();

/// Integer range table for 64-bit values.
pub static INT64_RECORDS: [Int64Record; 61] = build_int64_records();

/// Fractional-precision table: entry `i` stores a fraction in `i + 3` bits.
/// The precisions are the canonical rounded constants; they are wire
/// contract, not derived values.
pub static FRAC_RECORDS: [FracRecord; 18] = [
    FracRecord { bits: 0, precision: 0.0 },
    FracRecord { bits: 4, precision: 0.066_667 },
    FracRecord { bits: 5, precision: 0.032_258 },
    FracRecord { bits: 6, precision: 0.015_873 },
    FracRecord { bits: 7, precision: 0.007_874 },
    FracRecord { bits: 8, precision: 0.003_922 },
    FracRecord { bits: 9, precision: 0.001_957 },
    FracRecord { bits: 10, precision: 0.000_978 },
    FracRecord { bits: 11, precision: 0.000_489 },
    FracRecord { bits: 12, precision: 0.000_244 },
    FracRecord { bits: 13, precision: 0.000_122 },
    FracRecord { bits: 14, precision: 0.000_061 },
    FracRecord { bits: 15, precision: 0.000_031 },
    FracRecord { bits: 16, precision: 0.000_015 },
    FracRecord { bits: 17, precision: 0.000_008 },
    FracRecord { bits: 18, precision: 0.000_004 },
    FracRecord { bits: 19, precision: 0.000_002 },
    FracRecord { bits: 20, precision: 0.000_001 },
];

/// Precision table tuned for the `[-1/sqrt(2), 1/sqrt(2)]` component range
/// used by quaternion packing.
pub static QUATERNION_RECORDS: [FracRecord; 12] = [
    FracRecord { bits: 0, precision: 0.0 },
    FracRecord { bits: 9, precision: 0.002_767_54 },
    FracRecord { bits: 10, precision: 0.001_382_42 },
    FracRecord { bits: 11, precision: 0.000_690_87 },
    FracRecord { bits: 12, precision: 0.000_345_35 },
    FracRecord { bits: 13, precision: 0.000_172_65 },
    FracRecord { bits: 14, precision: 0.000_086_32 },
    FracRecord { bits: 15, precision: 0.000_043_16 },
    FracRecord { bits: 16, precision: 0.000_021_58 },
    FracRecord { bits: 17, precision: 0.000_010_79 },
    FracRecord { bits: 18, precision: 0.000_005_39 },
    FracRecord { bits: 19, precision: 0.000_002_70 },
];

/// First index whose precision satisfies `precision`, or 0 when no entry is
/// tight enough. Index 0 is a configuration error for callers to assert on.
#[must_use]
pub fn find_frac_index(precision: f32, records: &[FracRecord]) -> usize {
    for (i, record) in records.iter().enumerate().skip(1) {
        if precision >= record.precision {
            return i;
        }
    }
    0
}

/// First index whose range covers `range`, or 0 when none does.
#[must_use]
pub fn find_int_index(range: u32) -> usize {
    for (i, record) in INT_RECORDS.iter().enumerate().skip(1) {
        if range <= record.range {
            return i;
        }
    }
    0
}

/// First index whose range covers `range`, or 0 when none does.
#[must_use]
pub fn find_int64_index(range: u64) -> usize {
    for (i, record) in INT64_RECORDS.iter().enumerate().skip(1) {
        if range <= record.range {
            return i;
        }
    }
    0
}

/// Packs three table indices into a scheme word.
#[must_use]
pub fn compose_scheme(full_range: usize, delta_range: usize, frac: usize) -> CompressionScheme {
    debug_assert!(full_range <= 0xFF && delta_range <= 0xFF && frac <= 0xFF);
    CompressionScheme::from_raw(
        (full_range as u32) | ((delta_range as u32) << 8) | ((frac as u32) << 16),
    )
}

/// Validates a sub-index before dereferencing: debug-asserts the
/// configuration contract and clamps in release so a bad scheme degrades to
/// wrong widths instead of a panic.
fn checked_index(index: usize, len: usize) -> usize {
    debug_assert!(
        index > 0 && index < len,
        "scheme index {index} outside (0, {len})"
    );
    index.clamp(1, len - 1)
}

#[must_use]
pub fn full_range_record(scheme: CompressionScheme) -> &'static IntRecord {
    &INT_RECORDS[checked_index(scheme.full_range_index(), INT_RECORDS.len())]
}

#[must_use]
pub fn delta_range_record(scheme: CompressionScheme) -> &'static IntRecord {
    &INT_RECORDS[checked_index(scheme.delta_range_index(), INT_RECORDS.len())]
}

#[must_use]
pub fn full_range64_record(scheme: CompressionScheme) -> &'static Int64Record {
    &INT64_RECORDS[checked_index(scheme.full_range_index(), INT64_RECORDS.len())]
}

#[must_use]
pub fn delta_range64_record(scheme: CompressionScheme) -> &'static Int64Record {
    &INT64_RECORDS[checked_index(scheme.delta_range_index(), INT64_RECORDS.len())]
}

#[must_use]
pub fn frac_record(scheme: CompressionScheme) -> &'static FracRecord {
    &FRAC_RECORDS[checked_index(scheme.frac_index(), FRAC_RECORDS.len())]
}

#[must_use]
pub fn quaternion_record(scheme: CompressionScheme) -> &'static FracRecord {
    &QUATERNION_RECORDS[checked_index(scheme.frac_index(), QUATERNION_RECORDS.len())]
}

/// Builds the scheme for a float field from its quantization params.
#[must_use]
pub fn scheme_for_float(param: &FloatQuantizeParam) -> CompressionScheme {
    debug_assert!(0.0 < param.delta_range && param.delta_range <= param.full_range);
    debug_assert!(0.0 < param.precision && param.precision < 1.0);

    let full_range = find_int_index(param.full_range as u32);
    let delta_range = find_int_index(param.delta_range as u32);
    let frac = find_frac_index(param.precision, &FRAC_RECORDS);
    debug_assert!(
        full_range > 0 && delta_range > 0 && frac > 0,
        "float quantize params outside table coverage"
    );
    debug_assert!(INT_RECORDS[full_range.max(1)].bits <= 24);
    debug_assert!(INT_RECORDS[full_range.max(1)].bits + FRAC_RECORDS[frac.max(1)].bits < 30);

    compose_scheme(full_range, delta_range, frac)
}

/// Builds the scheme for a quaternion field from its quantization params.
#[must_use]
pub fn scheme_for_quaternion(param: &QuaternionQuantizeParam) -> CompressionScheme {
    let frac = find_frac_index(param.precision, &QUATERNION_RECORDS);
    debug_assert!(frac > 0, "quaternion precision outside table coverage");
    compose_scheme(0, 0, frac)
}

/// Builds the scheme for an integer field up to 32 bits.
#[must_use]
pub fn scheme_for_int(param: &IntCompressParam) -> CompressionScheme {
    debug_assert!(0 < param.delta_range && param.delta_range <= param.full_range);

    let full_range = find_int_index(param.full_range);
    let delta_range = find_int_index(param.delta_range);
    debug_assert!(
        full_range > 0 && delta_range > 0,
        "int ranges outside table coverage"
    );
    compose_scheme(full_range, delta_range, 0)
}

/// Builds the scheme for a 64-bit integer field.
#[must_use]
pub fn scheme_for_int64(param: &Int64CompressParam) -> CompressionScheme {
    debug_assert!(0 < param.delta_range && param.delta_range <= param.full_range);

    let full_range = find_int64_index(param.full_range);
    let delta_range = find_int64_index(param.delta_range);
    debug_assert!(
        full_range > 0 && delta_range > 0,
        "int64 ranges outside table coverage"
    );
    compose_scheme(full_range, delta_range, 0)
}

/// Scheme for a float field, or [`CompressionScheme::NONE`] when the field
/// carries no float params. Float and quaternion params are mutually
/// exclusive on one field.
#[must_use]
pub fn float_scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
    meta.float_quantize.as_ref().map_or(CompressionScheme::NONE, |param| {
        debug_assert!(
            meta.quaternion_quantize.is_none(),
            "float and quaternion quantize params must not be specified together"
        );
        scheme_for_float(param)
    })
}

/// Scheme for a quaternion field, or `NONE` when the field carries no
/// quaternion params.
#[must_use]
pub fn quaternion_scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
    meta.quaternion_quantize
        .as_ref()
        .map_or(CompressionScheme::NONE, |param| {
            debug_assert!(
                meta.float_quantize.is_none(),
                "float and quaternion quantize params must not be specified together"
            );
            scheme_for_quaternion(param)
        })
}

/// Scheme for an integer field, or `NONE` without params.
#[must_use]
pub fn int_scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
    meta.int_compress
        .as_ref()
        .map_or(CompressionScheme::NONE, scheme_for_int)
}

/// Scheme for a 64-bit integer field, or `NONE` without params.
#[must_use]
pub fn int64_scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
    meta.int64_compress
        .as_ref()
        .map_or(CompressionScheme::NONE, scheme_for_int64)
}

/// Tolerance for comparing two values of a field: the explicit override if
/// present, else the precision its quantization actually achieves, else
/// `default`.
#[must_use]
pub fn compare_precision_from_meta(meta: &FieldMeta, default: f32) -> f32 {
    let precision = if let Some(c) = meta.compare_precision {
        c.precision
    } else if let Some(param) = meta.float_quantize {
        let index = find_frac_index(param.precision, &FRAC_RECORDS);
        FRAC_RECORDS[checked_index(index, FRAC_RECORDS.len())].precision
    } else if let Some(param) = meta.quaternion_quantize {
        let index = find_frac_index(param.precision, &QUATERNION_RECORDS);
        QUATERNION_RECORDS[checked_index(index, QUATERNION_RECORDS.len())].precision
    } else {
        default
    };
    debug_assert!((0.0..1.0).contains(&precision));
    precision
}

/// The delta tolerance a quantized float field actually uses: its frac
/// record's precision under a scheme, the caller's fallback otherwise.
#[must_use]
pub fn float_delta_precision(scheme: CompressionScheme, fallback: f32) -> f32 {
    if scheme.is_none() {
        fallback
    } else {
        frac_record(scheme).precision
    }
}

/// The delta tolerance a quantized quaternion field actually uses.
#[must_use]
pub fn quaternion_delta_precision(scheme: CompressionScheme, fallback: f32) -> f32 {
    if scheme.is_none() {
        fallback
    } else {
        quaternion_record(scheme).precision
    }
}

/// Deterministic fingerprint of every quantization table.
///
/// Peers exchange this at handshake: equal fingerprints guarantee both sides
/// derive identical field widths from any scheme word.
#[must_use]
pub fn table_fingerprint() -> u64 {
    let mut hasher = blake3::Hasher::new();
    for record in &INT_RECORDS {
        hasher.update(&record.bits.to_le_bytes());
        hasher.update(&record.range.to_le_bytes());
    }
    for record in &INT64_RECORDS {
        hasher.update(&record.bits.to_le_bytes());
        hasher.update(&record.range.to_le_bytes());
    }
    for table in [&FRAC_RECORDS[..], &QUATERNION_RECORDS[..]] {
        for record in table {
            hasher.update(&record.bits.to_le_bytes());
            hasher.update(&record.precision.to_bits().to_le_bytes());
        }
    }
    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}
