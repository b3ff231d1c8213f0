//! Bitset and component-mask compressors.
//!
//! Full encoding picks per call between a packed list of set-bit indices
//! and the raw one-bit-per-position form, whichever is cheaper for the
//! current population count. A leading flag bit records the choice. Delta
//! encoding full-encodes the XOR of baseline and target, which is sparse
//! whenever few bits flipped, and decode XORs the mask back onto the
//! baseline.

use bitstream::{BitReader, BitWriter};
use schema::BitSet;

use crate::array::bits_for_value;
use crate::compressor::ValueCompressor;
use crate::scheme::CompressionScheme;

fn write_raw_words<const WORDS: usize>(value: &BitSet<WORDS>, writer: &mut BitWriter<'_>) {
    for &word in value.words() {
        writer.write_bits(word as u32, 32);
        writer.write_bits((word >> 32) as u32, 32);
    }
}

fn read_raw_words<const WORDS: usize>(reader: &mut BitReader<'_>) -> BitSet<WORDS> {
    let mut value = BitSet::new();
    for word in value.words_mut() {
        let low = u64::from(reader.read_bits(32));
        let high = u64::from(reader.read_bits(32));
        *word = low | (high << 32);
    }
    value
}

impl<const WORDS: usize> ValueCompressor for BitSet<WORDS> {
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
        let mask = *base ^ *target;
        Self::compress_full(&mask, scheme, delta_precision, writer);
        true
    }

    fn compress_full(
        value: &Self,
        _scheme: CompressionScheme,
        _delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        let total_bits = Self::BITS;
        let index_bits = bits_for_value(total_bits as u64 - 1);
        let popcount = value.count_ones();
        let packed_cost = (popcount + 1) * index_bits as usize + 1;

        if packed_cost <= total_bits {
            writer.write_bits(1, 1);
            writer.write_bits(popcount as u32, index_bits);
            for index in 0..total_bits {
                if value.test(index) {
                    writer.write_bits(index as u32, index_bits);
                }
            }
        } else {
            writer.write_bits(0, 1);
            write_raw_words(value, writer);
        }
    }

    fn decompress_delta(
        base: &Self,
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let mut mask = Self::new();
        Self::decompress_full(&mut mask, scheme, reader);
        *target = *base ^ mask;
    }

    fn decompress_full(
        target: &mut Self,
        _scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let total_bits = Self::BITS;
        let index_bits = bits_for_value(total_bits as u64 - 1);

        if reader.read_bits(1) != 0 {
            let popcount = (reader.read_bits(index_bits) as usize).min(total_bits);
            let mut value = Self::new();
            for _ in 0..popcount {
                let index = reader.read_bits(index_bits) as usize;
                if index < total_bits {
                    value.set(index);
                }
            }
            *target = value;
        } else {
            *target = read_raw_words(reader);
        }
    }
}
