//! Integer and boolean compressors.
//!
//! Delta encoding writes the raw difference, range-shifted into the scheme's
//! delta field when a scheme is configured and full native width otherwise.
//! Values or deltas outside the configured range are a configuration error:
//! debug-asserted, silently wrapped in release. Booleans are always a single
//! bit and their delta is the new value itself.

use bitstream::{BitReader, BitWriter};
use schema::FieldMeta;

use crate::compressor::ValueCompressor;
use crate::scheme::{
    delta_range64_record, delta_range_record, full_range64_record, full_range_record,
    int64_scheme_from_meta, int_scheme_from_meta, CompressionScheme,
};

impl ValueCompressor for bool {
    fn is_equal(a: &Self, b: &Self, _compare_precision: f32) -> bool {
        a == b
    }

    fn compress_delta(
        base: &Self,
        target: &Self,
        _scheme: CompressionScheme,
        _delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        if base == target {
            return false;
        }
        writer.write_bits(u32::from(*target), 1);
        true
    }

    fn compress_full(
        value: &Self,
        _scheme: CompressionScheme,
        _delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        writer.write_bits(u32::from(*value), 1);
    }

    fn decompress_delta(
        _base: &Self,
        target: &mut Self,
        _scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        *target = reader.read_bits(1) != 0;
    }

    fn decompress_full(
        target: &mut Self,
        _scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        *target = reader.read_bits(1) != 0;
    }
}

macro_rules! impl_integral {
    ($($t:ty => $unsigned:ty, $signed:ty, $width:expr;)*) => {$(
        impl ValueCompressor for $t {
            fn is_equal(a: &Self, b: &Self, _compare_precision: f32) -> bool {
                a == b
            }

            fn compress_delta(
                base: &Self,
                target: &Self,
                scheme: CompressionScheme,
                _delta_precision: f32,
                writer: &mut BitWriter<'_>,
            ) -> bool {
                if target == base {
                    return false;
                }
                let delta = target.wrapping_sub(*base);
                if scheme.is_none() {
                    write_value(delta as $unsigned as u64, $width, writer);
                } else {
                    let record = delta_record_for_width(scheme, $width);
                    debug_assert!(
                        u64::from((delta as $signed).unsigned_abs()) <= record.range,
                        "delta {delta} exceeds range [-{0}, {0}]",
                        record.range
                    );
                    let adjusted =
                        (delta as $unsigned as u64).wrapping_add(record.range) & width_mask($width);
                    write_value(adjusted, record.bits, writer);
                }
                true
            }

            fn compress_full(
                value: &Self,
                scheme: CompressionScheme,
                _delta_precision: f32,
                writer: &mut BitWriter<'_>,
            ) {
                if scheme.is_none() {
                    write_value(*value as $unsigned as u64, $width, writer);
                } else {
                    let record = full_record_for_width(scheme, $width);
                    debug_assert!(
                        u64::from((*value as $signed).unsigned_abs()) <= record.range,
                        "value {value} exceeds range [-{0}, {0}]",
                        record.range
                    );
                    let adjusted =
                        (*value as $unsigned as u64).wrapping_add(record.range) & width_mask($width);
                    write_value(adjusted, record.bits, writer);
                }
            }

            fn decompress_delta(
                base: &Self,
                target: &mut Self,
                scheme: CompressionScheme,
                reader: &mut BitReader<'_>,
            ) {
                let delta = if scheme.is_none() {
                    read_value($width, reader) as $unsigned as $t
                } else {
                    let record = delta_record_for_width(scheme, $width);
                    let raw = read_value(record.bits, reader);
                    raw.wrapping_sub(record.range) as $unsigned as $t
                };
                *target = base.wrapping_add(delta);
            }

            fn decompress_full(
                target: &mut Self,
                scheme: CompressionScheme,
                reader: &mut BitReader<'_>,
            ) {
                *target = if scheme.is_none() {
                    read_value($width, reader) as $unsigned as $t
                } else {
                    let record = full_record_for_width(scheme, $width);
                    let raw = read_value(record.bits, reader);
                    raw.wrapping_sub(record.range) as $unsigned as $t
                };
            }

            fn scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
                if $width == 64 {
                    int64_scheme_from_meta(meta)
                } else {
                    int_scheme_from_meta(meta)
                }
            }
        }
    )*};
}

impl_integral! {
    i8 => u8, i8, 8;
    u8 => u8, i8, 8;
    i16 => u16, i16, 16;
    u16 => u16, i16, 16;
    i32 => u32, i32, 32;
    u32 => u32, i32, 32;
    i64 => u64, i64, 64;
    u64 => u64, i64, 64;
}

/// Delta record for a value of `width` bits, widened to the 64-bit table for
/// 64-bit types.
fn delta_record_for_width(scheme: CompressionScheme, width: u32) -> RecordView {
    if width == 64 {
        let record = delta_range64_record(scheme);
        RecordView {
            bits: record.bits,
            range: record.range,
        }
    } else {
        let record = delta_range_record(scheme);
        debug_assert!(record.bits <= width, "scheme wider than the value type");
        RecordView {
            bits: record.bits,
            range: u64::from(record.range),
        }
    }
}

fn full_record_for_width(scheme: CompressionScheme, width: u32) -> RecordView {
    if width == 64 {
        let record = full_range64_record(scheme);
        RecordView {
            bits: record.bits,
            range: record.range,
        }
    } else {
        let record = full_range_record(scheme);
        debug_assert!(record.bits <= width, "scheme wider than the value type");
        RecordView {
            bits: record.bits,
            range: u64::from(record.range),
        }
    }
}

/// A table record widened to the u64 domain the shared helpers work in.
struct RecordView {
    bits: u32,
    range: u64,
}

const fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Writes `bits` bits of `value`, splitting writes wider than the stream's
/// 32-bit granularity into a low word and a high remainder.
fn write_value(value: u64, bits: u32, writer: &mut BitWriter<'_>) {
    if bits <= 32 {
        writer.write_bits(value as u32, bits);
    } else {
        writer.write_bits(value as u32, 32);
        writer.write_bits((value >> 32) as u32, bits - 32);
    }
}

fn read_value(bits: u32, reader: &mut BitReader<'_>) -> u64 {
    if bits <= 32 {
        u64::from(reader.read_bits(bits))
    } else {
        let low = u64::from(reader.read_bits(32));
        let high = u64::from(reader.read_bits(bits - 32));
        low | (high << 32)
    }
}
