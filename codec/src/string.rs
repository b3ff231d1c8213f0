//! String and interned-name compressors.
//!
//! Equality is exact and the delta is binary: an unchanged value writes
//! nothing, a changed value is re-encoded whole. The full encoding is an
//! 8-bit length prefix followed by one byte per byte.

use bitstream::{BitReader, BitWriter};
use schema::Name;

use crate::compressor::ValueCompressor;
use crate::scheme::CompressionScheme;

/// Replicated strings must be shorter than this, leaving the top length
/// values reserved.
pub const MAX_STRING_LENGTH: usize = 250;

fn compress_bytes(bytes: &[u8], writer: &mut BitWriter<'_>) {
    debug_assert!(
        bytes.len() < MAX_STRING_LENGTH,
        "string length {} exceeds the wire bound",
        bytes.len()
    );
    let length = bytes.len().min(MAX_STRING_LENGTH - 1);
    writer.write_bits(length as u32, 8);
    for &byte in &bytes[..length] {
        writer.write_bits(u32::from(byte), 8);
    }
}

fn decompress_bytes(reader: &mut BitReader<'_>) -> Vec<u8> {
    let length = reader.read_bits(8) as usize;
    let mut bytes = Vec::with_capacity(length.min(MAX_STRING_LENGTH));
    for _ in 0..length {
        bytes.push(reader.read_bits(8) as u8);
    }
    bytes
}

impl ValueCompressor for String {
    fn is_equal(a: &Self, b: &Self, _compare_precision: f32) -> bool {
        a == b
    }

    fn compress_delta(
        base: &Self,
        target: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        if base == target {
            return false;
        }
        Self::compress_full(target, scheme, delta_precision, writer);
        true
    }

    fn compress_full(
        value: &Self,
        _scheme: CompressionScheme,
        _delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        compress_bytes(value.as_bytes(), writer);
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
        _scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let bytes = decompress_bytes(reader);
        *target = Self::from_utf8_lossy(&bytes).into_owned();
    }
}

impl ValueCompressor for Name {
    fn is_equal(a: &Self, b: &Self, _compare_precision: f32) -> bool {
        a == b
    }

    fn compress_delta(
        base: &Self,
        target: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        if base == target {
            return false;
        }
        Self::compress_full(target, scheme, delta_precision, writer);
        true
    }

    fn compress_full(
        value: &Self,
        _scheme: CompressionScheme,
        _delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        compress_bytes(value.as_str().as_bytes(), writer);
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
        _scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let bytes = decompress_bytes(reader);
        *target = Self::new(&String::from_utf8_lossy(&bytes));
    }
}
