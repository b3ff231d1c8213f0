//! Quantized float and quaternion primitives.
//!
//! These are the shared building blocks of the float-family and quaternion
//! compressors. Both are bit-exact wire layouts; see each function for the
//! field order.

use bitstream::{BitReader, BitWriter};
use schema::Quaternion;

use crate::scheme::{FracRecord, IntRecord};

/// Lower bound of a non-largest unit quaternion component.
pub const QUATERNION_COMPONENT_MIN: f32 = -0.707_106_781_186_547_6;
/// Upper bound of a non-largest unit quaternion component.
pub const QUATERNION_COMPONENT_MAX: f32 = 0.707_106_781_186_547_6;

/// Writes one float: a presence bit (`|value| > delta_precision`), then
/// under quantization a sign bit + integer part + rounded fraction, else the
/// raw 32-bit pattern.
///
/// The integer part must fit the record's range; violations debug-assert
/// and wrap silently in release.
pub fn compress_float(
    value: f32,
    delta_precision: f32,
    records: Option<(&IntRecord, &FracRecord)>,
    writer: &mut BitWriter<'_>,
) {
    if value.abs() > delta_precision {
        writer.write_bits(1, 1);
        match records {
            Some((int_record, frac_record)) => {
                let absolute = value.abs();
                let truncated = absolute.trunc();
                let fractional = absolute - truncated;
                debug_assert!(
                    truncated <= int_record.range as f32,
                    "value {value} exceeds range [-{0}, {0}]",
                    int_record.range
                );

                // Sign bit covers values such as -0.3445 whose integer part
                // carries no sign of its own.
                writer.write_bits(u32::from(value.is_sign_negative()), 1);
                let int_part = truncated as u32;
                let frac_part = (fractional / frac_record.precision).round() as u32;
                writer.write_bits(int_part, int_record.bits);
                writer.write_bits(frac_part, frac_record.bits);
            }
            None => writer.write_bits(value.to_bits(), 32),
        }
    } else {
        writer.write_bits(0, 1);
    }
}

/// Reads one float written by [`compress_float`]. An unset presence bit
/// decodes to `0.0`.
#[must_use]
pub fn decompress_float(
    records: Option<(&IntRecord, &FracRecord)>,
    reader: &mut BitReader<'_>,
) -> f32 {
    if reader.read_bits(1) == 0 {
        return 0.0;
    }
    match records {
        Some((int_record, frac_record)) => {
            let sign = reader.read_bits(1);
            let int_part = reader.read_bits(int_record.bits);
            let frac_part = reader.read_bits(frac_record.bits);

            let mut result = int_part as f32 + frac_part as f32 * frac_record.precision;
            if sign != 0 {
                result = -result;
            }
            result
        }
        None => f32::from_bits(reader.read_bits(32)),
    }
}

/// Writes a unit quaternion: 2-bit index of the largest-magnitude component
/// (ties to the first), 1 sign bit, then the three remaining components,
/// each quantized over `[-1/sqrt(2), 1/sqrt(2)]` (or as raw 32-bit patterns
/// without a record).
pub fn compress_quaternion(
    q: &Quaternion,
    record: Option<&FracRecord>,
    writer: &mut BitWriter<'_>,
) {
    let components = q.to_array();
    let mut max_index = 0usize;
    for (i, component) in components.iter().enumerate().skip(1) {
        if component.abs() > components[max_index].abs() {
            max_index = i;
        }
    }
    let max_sign = components[max_index].is_sign_negative();

    writer.write_bits(max_index as u32, 2);
    writer.write_bits(u32::from(max_sign), 1);
    match record {
        Some(record) => {
            let scale = 1.0 / record.precision;
            for (i, &component) in components.iter().enumerate() {
                if i != max_index {
                    let mut v = (component - QUATERNION_COMPONENT_MIN)
                        / (QUATERNION_COMPONENT_MAX - QUATERNION_COMPONENT_MIN);
                    v *= scale;
                    v += 0.5;
                    writer.write_bits(v as u32, record.bits);
                }
            }
        }
        None => {
            for (i, &component) in components.iter().enumerate() {
                if i != max_index {
                    writer.write_bits(component.to_bits(), 32);
                }
            }
        }
    }
}

/// Reads a quaternion written by [`compress_quaternion`], reconstructing the
/// omitted component from unit length.
///
/// Valid only because a unit quaternion's largest component magnitude is at
/// least 1/2, which keeps the other three inside `[-1/sqrt(2), 1/sqrt(2)]`.
/// The squared remainder is clamped at zero before the square root;
/// quantization noise can push the sum of squares past one.
#[must_use]
pub fn decompress_quaternion(
    record: Option<&FracRecord>,
    reader: &mut BitReader<'_>,
) -> Quaternion {
    let max_index = reader.read_bits(2) as usize;
    let max_sign = reader.read_bits(1);

    let mut components = [0.0f32; 4];
    let mut squared_sum = 0.0f32;
    match record {
        Some(record) => {
            for i in 0..3 {
                let mut v = reader.read_bits(record.bits) as f32;
                v *= record.precision;
                v *= QUATERNION_COMPONENT_MAX - QUATERNION_COMPONENT_MIN;
                v += QUATERNION_COMPONENT_MIN;

                components[i + usize::from(i >= max_index)] = v;
                squared_sum += v * v;
            }
        }
        None => {
            for i in 0..3 {
                let v = f32::from_bits(reader.read_bits(32));
                components[i + usize::from(i >= max_index)] = v;
                squared_sum += v * v;
            }
        }
    }

    let mut omitted = (1.0 - squared_sum).max(0.0).sqrt();
    if max_sign != 0 {
        omitted = -omitted;
    }
    components[max_index] = omitted;
    Quaternion::from_array(components)
}
