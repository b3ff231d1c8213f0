//! Quaternion compressor.
//!
//! Full encoding always uses the largest-component-omitted packing, whether
//! or not a scheme is configured: without one the three retained components
//! are raw 32-bit patterns, with one they quantize into the quaternion
//! precision table's bit width.

use bitstream::{BitReader, BitWriter};
use schema::{FieldMeta, Quaternion, DEFAULT_COMPARE_PRECISION, DEFAULT_DELTA_PRECISION};

use crate::compressor::ValueCompressor;
use crate::quantize::{compress_quaternion, decompress_quaternion};
use crate::scheme::{
    compare_precision_from_meta, quaternion_delta_precision, quaternion_record,
    quaternion_scheme_from_meta, CompressionScheme, FracRecord,
};

fn record_for(scheme: CompressionScheme) -> Option<&'static FracRecord> {
    if scheme.is_none() {
        None
    } else {
        Some(quaternion_record(scheme))
    }
}

impl ValueCompressor for Quaternion {
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
        let delta_precision = quaternion_delta_precision(scheme, delta_precision);
        if Self::is_equal(base, target, delta_precision) {
            return false;
        }
        Self::compress_full(target, scheme, delta_precision, writer);
        true
    }

    fn compress_full(
        value: &Self,
        scheme: CompressionScheme,
        _delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        compress_quaternion(value, record_for(scheme), writer);
    }

    fn decompress_delta(
        _base: &Self,
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        *target = decompress_quaternion(record_for(scheme), reader);
    }

    fn decompress_full(
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        *target = decompress_quaternion(record_for(scheme), reader);
    }

    fn scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
        quaternion_scheme_from_meta(meta)
    }

    fn effective_delta_precision(scheme: CompressionScheme, delta_precision: f32) -> f32 {
        quaternion_delta_precision(scheme, delta_precision)
    }

    fn delta_precision_from_meta(meta: &FieldMeta) -> f32 {
        quaternion_delta_precision(quaternion_scheme_from_meta(meta), DEFAULT_DELTA_PRECISION)
    }

    fn compare_precision_from_meta(meta: &FieldMeta) -> f32 {
        compare_precision_from_meta(meta, DEFAULT_COMPARE_PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::QuaternionQuantizeParam;

    const CASES: &[(Quaternion, Quaternion)] = &[
        (
            Quaternion::new(0.0, 0.0, 0.0, 1.0),
            Quaternion::new(0.0, 0.0, 0.996_195, -0.087_156),
        ),
        (
            Quaternion::new(0.0, 0.0, 0.798_635, 0.601_815),
            Quaternion::new(0.0, 0.0, 0.814_115, 0.580_703),
        ),
        (
            Quaternion::new(0.0, 0.0, -0.358_369, -0.933_580),
            Quaternion::new(0.0, 0.0, -0.382_684, -0.923_879),
        ),
        (
            Quaternion::new(0.000_001, 0.0, -0.694_659, -0.719_339),
            Quaternion::new(0.000_001, 0.0, -0.707_107, -0.707_106),
        ),
    ];

    fn roundtrip_all(precision: f32) {
        let scheme =
            quaternion_scheme_from_meta(&FieldMeta::new().with_quaternion_quantize(
                QuaternionQuantizeParam::new(precision),
            ));

        for (base, target) in CASES {
            let mut buf = [0u8; 64];
            let mut writer = BitWriter::new(&mut buf);
            let written =
                Quaternion::compress_delta(base, target, scheme, precision, &mut writer);
            assert!(written);
            assert!(!writer.is_overflowed());

            let bits_written = writer.bits_written();
            let mut reader = BitReader::new(&buf);
            let mut decoded = Quaternion::IDENTITY;
            Quaternion::decompress_delta(base, &mut decoded, scheme, &mut reader);
            assert!(
                Quaternion::is_equal(&decoded, target, precision),
                "precision {precision}: {decoded:?} vs {target:?}"
            );
            assert_eq!(reader.bits_read(), bits_written);
        }
    }

    #[test]
    fn quantized_roundtrip_at_all_precisions() {
        roundtrip_all(0.01);
        roundtrip_all(0.001);
        roundtrip_all(0.0001);
        roundtrip_all(0.000_01);
    }

    #[test]
    fn unquantized_roundtrip() {
        for (base, target) in CASES {
            let mut buf = [0u8; 64];
            let mut writer = BitWriter::new(&mut buf);
            assert!(Quaternion::compress_delta(
                base,
                target,
                CompressionScheme::NONE,
                1e-5,
                &mut writer
            ));
            // 2-bit index + sign + three raw components.
            assert_eq!(writer.bits_written(), 3 + 3 * 32);

            let mut reader = BitReader::new(&buf);
            let mut decoded = Quaternion::IDENTITY;
            Quaternion::decompress_delta(base, &mut decoded, CompressionScheme::NONE, &mut reader);
            assert!(Quaternion::is_equal(&decoded, target, 1e-5));
        }
    }

    #[test]
    fn unchanged_quaternion_writes_nothing() {
        let q = Quaternion::new(0.0, 0.0, 0.798_635, 0.601_815);
        let mut buf = [0u8; 16];
        let mut writer = BitWriter::new(&mut buf);
        assert!(!Quaternion::compress_delta(
            &q,
            &q,
            CompressionScheme::NONE,
            1e-5,
            &mut writer
        ));
        assert_eq!(writer.bits_written(), 0);
    }

    #[test]
    fn full_encoding_is_packed_even_without_scheme() {
        let q = Quaternion::IDENTITY;
        let mut buf = [0u8; 32];
        let mut writer = BitWriter::new(&mut buf);
        Quaternion::compress_full(&q, CompressionScheme::NONE, 1e-5, &mut writer);
        assert_eq!(writer.bits_written(), 3 + 3 * 32);

        let mut reader = BitReader::new(&buf);
        let mut decoded = Quaternion::new(9.0, 9.0, 9.0, 9.0);
        Quaternion::decompress_full(&mut decoded, CompressionScheme::NONE, &mut reader);
        assert!(Quaternion::is_equal(&decoded, &q, 1e-6));
    }
}
