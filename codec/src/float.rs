//! Float, vector, and matrix compressors.
//!
//! The float family shares one delta rule: a value counts as changed when
//! any component's absolute difference exceeds the effective delta
//! precision, and a changed value is re-sent whole through the quantized
//! float primitive. Partial (per-component) deltas are not worth their
//! addressing overhead at these widths.

use bitstream::{BitReader, BitWriter};
use schema::{FieldMeta, Matrix4, Vector2, Vector3, DEFAULT_COMPARE_PRECISION,
    DEFAULT_DELTA_PRECISION};

use crate::array::{compress_delta_slice, compress_full_slice};
use crate::compressor::ValueCompressor;
use crate::quantize::{compress_float, decompress_float};
use crate::scheme::{
    compare_precision_from_meta, float_delta_precision, float_scheme_from_meta, frac_record,
    full_range_record, CompressionScheme, FracRecord, IntRecord,
};

fn float_records(
    scheme: CompressionScheme,
) -> Option<(&'static IntRecord, &'static FracRecord)> {
    if scheme.is_none() {
        None
    } else {
        Some((full_range_record(scheme), frac_record(scheme)))
    }
}

impl ValueCompressor for f32 {
    fn is_equal(a: &Self, b: &Self, compare_precision: f32) -> bool {
        (a - b).abs() <= compare_precision
    }

    fn compress_delta(
        base: &Self,
        target: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        let delta_precision = float_delta_precision(scheme, delta_precision);
        if Self::is_equal(base, target, delta_precision) {
            return false;
        }
        Self::compress_full(target, scheme, delta_precision, writer);
        true
    }

    fn compress_full(
        value: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        let delta_precision = float_delta_precision(scheme, delta_precision);
        compress_float(*value, delta_precision, float_records(scheme), writer);
    }

    fn decompress_delta(
        _base: &Self,
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        *target = decompress_float(float_records(scheme), reader);
    }

    fn decompress_full(
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        *target = decompress_float(float_records(scheme), reader);
    }

    fn scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
        float_scheme_from_meta(meta)
    }

    fn effective_delta_precision(scheme: CompressionScheme, delta_precision: f32) -> f32 {
        float_delta_precision(scheme, delta_precision)
    }

    fn delta_precision_from_meta(meta: &FieldMeta) -> f32 {
        float_delta_precision(float_scheme_from_meta(meta), DEFAULT_DELTA_PRECISION)
    }

    fn compare_precision_from_meta(meta: &FieldMeta) -> f32 {
        compare_precision_from_meta(meta, DEFAULT_COMPARE_PRECISION)
    }
}

macro_rules! impl_vector {
    ($($t:ty),*) => {$(
        impl ValueCompressor for $t {
            fn is_equal(a: &Self, b: &Self, compare_precision: f32) -> bool {
                a.to_array()
                    .iter()
                    .zip(b.to_array().iter())
                    .all(|(x, y)| (x - y).abs() <= compare_precision)
            }

            fn compress_delta(
                base: &Self,
                target: &Self,
                scheme: CompressionScheme,
                delta_precision: f32,
                writer: &mut BitWriter<'_>,
            ) -> bool {
                let delta_precision = float_delta_precision(scheme, delta_precision);
                if Self::is_equal(base, target, delta_precision) {
                    return false;
                }
                Self::compress_full(target, scheme, delta_precision, writer);
                true
            }

            fn compress_full(
                value: &Self,
                scheme: CompressionScheme,
                delta_precision: f32,
                writer: &mut BitWriter<'_>,
            ) {
                let delta_precision = float_delta_precision(scheme, delta_precision);
                let records = float_records(scheme);
                for component in value.to_array() {
                    compress_float(component, delta_precision, records, writer);
                }
            }

            fn decompress_delta(
                _base: &Self,
                target: &mut Self,
                scheme: CompressionScheme,
                reader: &mut BitReader<'_>,
            ) {
                Self::decompress_full(target, scheme, reader);
            }

            fn decompress_full(
                target: &mut Self,
                scheme: CompressionScheme,
                reader: &mut BitReader<'_>,
            ) {
                let records = float_records(scheme);
                let mut components = target.to_array();
                for component in &mut components {
                    *component = decompress_float(records, reader);
                }
                *target = Self::from_array(components);
            }

            fn scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
                float_scheme_from_meta(meta)
            }

            fn effective_delta_precision(
                scheme: CompressionScheme,
                delta_precision: f32,
            ) -> f32 {
                float_delta_precision(scheme, delta_precision)
            }

            fn delta_precision_from_meta(meta: &FieldMeta) -> f32 {
                float_delta_precision(float_scheme_from_meta(meta), DEFAULT_DELTA_PRECISION)
            }

            fn compare_precision_from_meta(meta: &FieldMeta) -> f32 {
                compare_precision_from_meta(meta, DEFAULT_COMPARE_PRECISION)
            }
        }
    )*};
}

impl_vector!(Vector2, Vector3);

/// Matrix deltas treat the 16 floats as a fixed-size sequence: the array
/// engine addresses the handful of changed cells instead of re-sending the
/// whole matrix.
impl ValueCompressor for Matrix4 {
    fn is_equal(a: &Self, b: &Self, compare_precision: f32) -> bool {
        a.data
            .iter()
            .zip(b.data.iter())
            .all(|(x, y)| (x - y).abs() <= compare_precision)
    }

    fn compress_delta(
        base: &Self,
        target: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        compress_delta_slice(&base.data, &target.data, scheme, delta_precision, writer)
    }

    fn compress_full(
        value: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        compress_full_slice(&value.data, scheme, delta_precision, writer);
    }

    fn decompress_delta(
        base: &Self,
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        <[f32; 16]>::decompress_delta(&base.data, &mut target.data, scheme, reader);
    }

    fn decompress_full(
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        <[f32; 16]>::decompress_full(&mut target.data, scheme, reader);
    }

    fn scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
        float_scheme_from_meta(meta)
    }

    fn effective_delta_precision(scheme: CompressionScheme, delta_precision: f32) -> f32 {
        float_delta_precision(scheme, delta_precision)
    }

    fn delta_precision_from_meta(meta: &FieldMeta) -> f32 {
        float_delta_precision(float_scheme_from_meta(meta), DEFAULT_DELTA_PRECISION)
    }

    fn compare_precision_from_meta(meta: &FieldMeta) -> f32 {
        compare_precision_from_meta(meta, DEFAULT_COMPARE_PRECISION)
    }
}
