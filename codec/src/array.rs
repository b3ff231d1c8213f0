//! Delta compression for bounded sequences.
//!
//! The engine works over any element type implementing [`ValueCompressor`].
//! Each delta encode analyzes which elements changed, then picks the cheaper
//! of two layouts:
//!
//! - **ByIndex**: explicit changed-element indices (absolute first index,
//!   then running gaps), cheap when changes are sparse.
//! - **ByFlag**: one bit per overlapping position, cheap when changes are
//!   dense.
//!
//! One leading bit records the chosen layout. Elements present only in a
//! grown sequence are appended full-encoded after the diff payload. Counts
//! and indices are stored width-prefixed: 3 bits holding `width - 1`, then
//! `width` bits of value, so widths span 1..=8 and cover the 254-element
//! bound.

use bitstream::{BitReader, BitWriter};
use schema::{BitSet, FieldMeta, FixedVector};

use crate::compressor::ValueCompressor;
use crate::scheme::CompressionScheme;

/// Upper bound on the length of any replicated sequence.
pub const MAX_ARRAY_SIZE: usize = 254;

/// Per-call analysis of how two sequences differ over their overlapping
/// prefix. Constructed, consumed, and discarded within one compress call.
#[derive(Debug, Clone)]
pub struct ArrayAnalyzeResult {
    /// Compared length: the overlapping prefix of both sequences.
    pub size: usize,
    /// Length of the target sequence.
    pub new_size: usize,
    pub size_changed: bool,
    /// Number of changed elements within the overlap.
    pub nchanged: usize,
    pub index_first: usize,
    pub index_last: usize,
    /// Largest gap between consecutive changed indices.
    pub max_index_delta: usize,
    /// Changed-element positions within the overlap.
    pub changed: BitSet<4>,
    pub bits_per_new_size: u32,
    pub bits_per_nchanged: u32,
    pub bits_per_index_first: u32,
    pub bits_per_index_delta: u32,
}

/// The two delta layouts the engine chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressStrategy {
    ByIndex,
    ByFlag,
}

/// Minimum bits needed to represent `value`, at least 1.
#[must_use]
pub fn bits_for_value(value: u64) -> u32 {
    if value == 0 {
        1
    } else {
        64 - value.leading_zeros()
    }
}

/// Scans the overlapping prefix once and records every changed index.
#[must_use]
pub fn analyze<T: ValueCompressor>(
    base: &[T],
    target: &[T],
    delta_precision: f32,
) -> ArrayAnalyzeResult {
    let size = base.len().min(target.len());
    let mut changed = BitSet::<4>::new();
    let mut nchanged = 0usize;
    let mut index_first = 0usize;
    let mut index_last = 0usize;
    let mut max_index_delta = 0usize;
    let mut previous: Option<usize> = None;

    for i in 0..size {
        if !T::is_equal(&base[i], &target[i], delta_precision) {
            if nchanged == 0 {
                index_first = i;
            }
            if let Some(previous) = previous {
                max_index_delta = max_index_delta.max(i - previous);
            }
            index_last = i;
            changed.set(i);
            nchanged += 1;
            previous = Some(i);
        }
    }

    ArrayAnalyzeResult {
        size,
        new_size: target.len(),
        size_changed: base.len() != target.len(),
        nchanged,
        index_first,
        index_last,
        max_index_delta,
        changed,
        bits_per_new_size: bits_for_value(target.len() as u64),
        bits_per_nchanged: bits_for_value(nchanged as u64),
        bits_per_index_first: bits_for_value(index_first as u64),
        bits_per_index_delta: bits_for_value(max_index_delta as u64),
    }
}

fn by_index_overhead(result: &ArrayAnalyzeResult) -> usize {
    let mut bits = 1;
    if result.size_changed {
        bits += 3 + result.bits_per_new_size as usize;
    }
    bits += 3 + result.bits_per_nchanged as usize;
    if result.nchanged > 0 {
        bits += 3 + result.bits_per_index_first as usize;
    }
    if result.nchanged > 1 {
        bits += 3 + (result.nchanged - 1) * result.bits_per_index_delta as usize;
    }
    bits
}

fn by_flag_overhead(result: &ArrayAnalyzeResult) -> usize {
    let mut bits = 1;
    if result.size_changed {
        bits += 3 + result.bits_per_new_size as usize;
    }
    bits += 1;
    if result.nchanged > 0 {
        bits += result.size;
    }
    bits
}

/// Picks the cheaper layout for this analysis; ties favor ByIndex. The
/// element payloads are identical in both layouts, so only the addressing
/// overhead is compared.
#[must_use]
pub fn select_strategy(result: &ArrayAnalyzeResult) -> CompressStrategy {
    if by_index_overhead(result) <= by_flag_overhead(result) {
        CompressStrategy::ByIndex
    } else {
        CompressStrategy::ByFlag
    }
}

fn write_width_prefixed(value: usize, width: u32, writer: &mut BitWriter<'_>) {
    debug_assert!((1..=8).contains(&width));
    writer.write_bits(width - 1, 3);
    writer.write_bits(value as u32, width);
}

fn read_width_prefixed(reader: &mut BitReader<'_>) -> usize {
    let width = reader.read_bits(3) + 1;
    reader.read_bits(width) as usize
}

/// Delta-encodes `target` against `base`. Writes nothing and returns
/// `false` when the sequences are equivalent. Both lengths must be within
/// [`MAX_ARRAY_SIZE`].
pub fn compress_delta_slice<T: ValueCompressor>(
    base: &[T],
    target: &[T],
    scheme: CompressionScheme,
    delta_precision: f32,
    writer: &mut BitWriter<'_>,
) -> bool {
    debug_assert!(base.len() <= MAX_ARRAY_SIZE && target.len() <= MAX_ARRAY_SIZE);

    let delta_precision = T::effective_delta_precision(scheme, delta_precision);
    let result = analyze(base, target, delta_precision);
    if !result.size_changed && result.nchanged == 0 {
        return false;
    }

    match select_strategy(&result) {
        CompressStrategy::ByIndex => {
            writer.write_bits(0, 1);
            encode_by_index(&result, base, target, scheme, delta_precision, writer);
        }
        CompressStrategy::ByFlag => {
            writer.write_bits(1, 1);
            encode_by_flag(&result, base, target, scheme, delta_precision, writer);
        }
    }

    // Elements beyond the overlap exist only when the sequence grew.
    for element in &target[result.size..] {
        T::compress_full(element, scheme, delta_precision, writer);
    }
    true
}

fn encode_by_index<T: ValueCompressor>(
    result: &ArrayAnalyzeResult,
    base: &[T],
    target: &[T],
    scheme: CompressionScheme,
    delta_precision: f32,
    writer: &mut BitWriter<'_>,
) {
    writer.write_bits(u32::from(result.size_changed), 1);
    if result.size_changed {
        write_width_prefixed(result.new_size, result.bits_per_new_size, writer);
    }
    write_width_prefixed(result.nchanged, result.bits_per_nchanged, writer);
    if result.nchanged > 0 {
        write_width_prefixed(result.index_first, result.bits_per_index_first, writer);
    }
    if result.nchanged > 1 {
        writer.write_bits(result.bits_per_index_delta - 1, 3);
    }

    let mut previous: Option<usize> = None;
    for i in 0..result.size {
        if !result.changed.test(i) {
            continue;
        }
        if let Some(previous) = previous {
            writer.write_bits((i - previous) as u32, result.bits_per_index_delta);
        }
        let written = T::compress_delta(&base[i], &target[i], scheme, delta_precision, writer);
        debug_assert!(written, "analyzed-changed element wrote no delta");
        previous = Some(i);
    }
}

fn encode_by_flag<T: ValueCompressor>(
    result: &ArrayAnalyzeResult,
    base: &[T],
    target: &[T],
    scheme: CompressionScheme,
    delta_precision: f32,
    writer: &mut BitWriter<'_>,
) {
    writer.write_bits(u32::from(result.size_changed), 1);
    if result.size_changed {
        write_width_prefixed(result.new_size, result.bits_per_new_size, writer);
    }
    writer.write_bits(u32::from(result.nchanged > 0), 1);
    if result.nchanged == 0 {
        return;
    }
    for i in 0..result.size {
        if result.changed.test(i) {
            writer.write_bits(1, 1);
            let written = T::compress_delta(&base[i], &target[i], scheme, delta_precision, writer);
            debug_assert!(written, "analyzed-changed element wrote no delta");
        } else {
            writer.write_bits(0, 1);
        }
    }
}

/// Decodes a delta written by [`compress_delta_slice`] into `out`, which is
/// first rebuilt from the baseline. `capacity` bounds the decoded length
/// against malformed input.
fn decompress_delta_elements<T: ValueCompressor + Default + Clone>(
    base: &[T],
    out: &mut Vec<T>,
    capacity: usize,
    scheme: CompressionScheme,
    reader: &mut BitReader<'_>,
) {
    let strategy = if reader.read_bits(1) == 0 {
        CompressStrategy::ByIndex
    } else {
        CompressStrategy::ByFlag
    };

    let size_changed = reader.read_bits(1) != 0;
    let new_size = if size_changed {
        read_width_prefixed(reader).min(capacity).min(MAX_ARRAY_SIZE)
    } else {
        base.len()
    };
    let overlap = base.len().min(new_size);

    out.clear();
    out.extend(base[..overlap].iter().cloned());

    match strategy {
        CompressStrategy::ByIndex => {
            let nchanged = read_width_prefixed(reader);
            if nchanged > 0 {
                let mut index = read_width_prefixed(reader);
                let delta_width = if nchanged > 1 {
                    reader.read_bits(3) + 1
                } else {
                    0
                };
                for k in 0..nchanged {
                    if k > 0 {
                        index += reader.read_bits(delta_width.max(1)) as usize;
                    }
                    decode_element_delta(base, out, index, scheme, reader);
                }
            }
        }
        CompressStrategy::ByFlag => {
            let any_changed = reader.read_bits(1) != 0;
            if any_changed {
                for index in 0..overlap {
                    if reader.read_bits(1) != 0 {
                        decode_element_delta(base, out, index, scheme, reader);
                    }
                }
            }
        }
    }

    for _ in overlap..new_size {
        let mut element = T::default();
        T::decompress_full(&mut element, scheme, reader);
        out.push(element);
    }
}

/// Applies one element delta at `index`, consuming the element's bits even
/// when a malformed stream addresses past the overlap.
fn decode_element_delta<T: ValueCompressor + Default>(
    base: &[T],
    out: &mut [T],
    index: usize,
    scheme: CompressionScheme,
    reader: &mut BitReader<'_>,
) {
    if index < out.len() && index < base.len() {
        let mut decoded = T::default();
        T::decompress_delta(&base[index], &mut decoded, scheme, reader);
        out[index] = decoded;
    } else {
        // Malformed input; keep consuming bits so the overflow flag, not a
        // panic, reports the damage.
        let scratch_base = T::default();
        let mut scratch = T::default();
        T::decompress_delta(&scratch_base, &mut scratch, scheme, reader);
    }
}

/// Full-encodes a whole sequence: an 8-bit size prefix, then every element.
pub fn compress_full_slice<T: ValueCompressor>(
    values: &[T],
    scheme: CompressionScheme,
    delta_precision: f32,
    writer: &mut BitWriter<'_>,
) {
    debug_assert!(values.len() <= MAX_ARRAY_SIZE);
    writer.write_bits(values.len() as u32, 8);
    for value in values {
        T::compress_full(value, scheme, delta_precision, writer);
    }
}

fn decompress_full_elements<T: ValueCompressor + Default>(
    out: &mut Vec<T>,
    capacity: usize,
    scheme: CompressionScheme,
    reader: &mut BitReader<'_>,
) {
    let size = (reader.read_bits(8) as usize).min(capacity).min(MAX_ARRAY_SIZE);
    out.clear();
    for _ in 0..size {
        let mut element = T::default();
        T::decompress_full(&mut element, scheme, reader);
        out.push(element);
    }
}

impl<T: ValueCompressor + Default + Clone> ValueCompressor for FixedVector<T> {
    fn is_equal(a: &Self, b: &Self, compare_precision: f32) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b.iter())
                .all(|(x, y)| T::is_equal(x, y, compare_precision))
    }

    fn compress_delta(
        base: &Self,
        target: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        compress_delta_slice(base.as_slice(), target.as_slice(), scheme, delta_precision, writer)
    }

    fn compress_full(
        value: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        compress_full_slice(value.as_slice(), scheme, delta_precision, writer);
    }

    fn decompress_delta(
        base: &Self,
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let capacity = target.capacity();
        let mut items = Vec::new();
        decompress_delta_elements(base.as_slice(), &mut items, capacity, scheme, reader);
        target.clear();
        for item in items {
            target.push(item);
        }
    }

    fn decompress_full(
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let capacity = target.capacity();
        let mut items = Vec::new();
        decompress_full_elements(&mut items, capacity, scheme, reader);
        target.clear();
        for item in items {
            target.push(item);
        }
    }

    fn scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
        T::scheme_from_meta(meta)
    }

    fn effective_delta_precision(scheme: CompressionScheme, delta_precision: f32) -> f32 {
        T::effective_delta_precision(scheme, delta_precision)
    }

    fn delta_precision_from_meta(meta: &FieldMeta) -> f32 {
        T::delta_precision_from_meta(meta)
    }

    fn compare_precision_from_meta(meta: &FieldMeta) -> f32 {
        T::compare_precision_from_meta(meta)
    }
}

impl<T: ValueCompressor + Default + Clone, const N: usize> ValueCompressor for [T; N] {
    fn is_equal(a: &Self, b: &Self, compare_precision: f32) -> bool {
        a.iter()
            .zip(b.iter())
            .all(|(x, y)| T::is_equal(x, y, compare_precision))
    }

    fn compress_delta(
        base: &Self,
        target: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        compress_delta_slice(base.as_slice(), target.as_slice(), scheme, delta_precision, writer)
    }

    fn compress_full(
        value: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        compress_full_slice(value.as_slice(), scheme, delta_precision, writer);
    }

    fn decompress_delta(
        base: &Self,
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let mut items = Vec::new();
        decompress_delta_elements(base.as_slice(), &mut items, N, scheme, reader);
        for (slot, item) in target.iter_mut().zip(items) {
            *slot = item;
        }
    }

    fn decompress_full(
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let mut items = Vec::new();
        decompress_full_elements(&mut items, N, scheme, reader);
        for (slot, item) in target.iter_mut().zip(items) {
            *slot = item;
        }
    }

    fn scheme_from_meta(meta: &FieldMeta) -> CompressionScheme {
        T::scheme_from_meta(meta)
    }

    fn effective_delta_precision(scheme: CompressionScheme, delta_precision: f32) -> f32 {
        T::effective_delta_precision(scheme, delta_precision)
    }

    fn delta_precision_from_meta(meta: &FieldMeta) -> f32 {
        T::delta_precision_from_meta(meta)
    }

    fn compare_precision_from_meta(meta: &FieldMeta) -> f32 {
        T::compare_precision_from_meta(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(capacity: usize, items: &[i32]) -> FixedVector<i32> {
        FixedVector::with_items(capacity, items.to_vec()).unwrap()
    }

    #[test]
    fn bits_for_value_is_at_least_one() {
        assert_eq!(bits_for_value(0), 1);
        assert_eq!(bits_for_value(1), 1);
        assert_eq!(bits_for_value(2), 2);
        assert_eq!(bits_for_value(3), 2);
        assert_eq!(bits_for_value(254), 8);
    }

    #[test]
    fn analyze_finds_changed_runs() {
        let base = [1, 2, 3, 4, 5, 6, 7, 8];
        let target = [1, 20, 3, 4, 50, 6, 7, 80];
        let result = analyze(&base, &target, 0.0);
        assert_eq!(result.size, 8);
        assert_eq!(result.nchanged, 3);
        assert_eq!(result.index_first, 1);
        assert_eq!(result.index_last, 7);
        assert_eq!(result.max_index_delta, 3);
        assert!(!result.size_changed);
        assert!(result.changed.test(1));
        assert!(result.changed.test(4));
        assert!(result.changed.test(7));
        assert!(!result.changed.test(0));
    }

    #[test]
    fn analyze_equal_sequences() {
        let base = [1, 2, 3];
        let result = analyze(&base, &base, 0.0);
        assert_eq!(result.nchanged, 0);
        assert!(!result.size_changed);
        assert_eq!(result.bits_per_nchanged, 1);
    }

    #[test]
    fn strategy_prefers_index_for_sparse_changes() {
        let base = [0i32; 100];
        let mut target = [0i32; 100];
        target[50] = 1;
        let result = analyze(&base, &target, 0.0);
        assert_eq!(select_strategy(&result), CompressStrategy::ByIndex);
    }

    #[test]
    fn strategy_prefers_flag_for_dense_changes() {
        let base = [0i32; 32];
        let mut target = [0i32; 32];
        for (i, slot) in target.iter_mut().enumerate() {
            if i % 2 == 0 {
                *slot = 1;
            }
        }
        let result = analyze(&base, &target, 0.0);
        assert_eq!(select_strategy(&result), CompressStrategy::ByFlag);
    }

    #[test]
    fn strategy_never_picks_the_costlier_layout() {
        // Synthetic sweeps: every (size, spread) combination must obey the
        // cost comparison.
        for size in [1usize, 8, 32, 100, 254] {
            for stride in [1usize, 2, 5, 16, 254] {
                let base = vec![0i32; size];
                let mut target = base.clone();
                for i in (0..size).step_by(stride) {
                    target[i] = 1;
                }
                let result = analyze(&base, &target, 0.0);
                let chosen = select_strategy(&result);
                let index_cost = by_index_overhead(&result);
                let flag_cost = by_flag_overhead(&result);
                match chosen {
                    CompressStrategy::ByIndex => assert!(index_cost <= flag_cost),
                    CompressStrategy::ByFlag => assert!(flag_cost < index_cost),
                }
            }
        }
    }

    fn delta_roundtrip(base: &FixedVector<i32>, target: &FixedVector<i32>) -> usize {
        let mut buf = [0u8; 4096];
        let mut writer = BitWriter::new(&mut buf);
        let written = FixedVector::compress_delta(
            base,
            target,
            CompressionScheme::NONE,
            0.0,
            &mut writer,
        );
        assert!(written);
        assert!(!writer.is_overflowed());
        let bits = writer.bits_written();

        let mut reader = BitReader::new(&buf);
        let mut decoded = FixedVector::new(base.capacity().max(target.capacity()));
        FixedVector::decompress_delta(base, &mut decoded, CompressionScheme::NONE, &mut reader);
        assert_eq!(&decoded, target);
        assert_eq!(reader.bits_read(), bits);
        bits
    }

    #[test]
    fn sparse_change_roundtrip() {
        let base = fv(10, &[1, 2, 3, 4, 5]);
        let target = fv(10, &[1, 2, 30, 4, 5]);
        delta_roundtrip(&base, &target);
    }

    #[test]
    fn shrinking_array_roundtrip() {
        // Shrink diffs only the overlapping prefix and appends nothing.
        let base = fv(10, &[1, 2, 3, 4, 5]);
        let target = fv(10, &[10, 20, 30]);
        delta_roundtrip(&base, &target);
    }

    #[test]
    fn growing_array_appends_full_elements() {
        let base = fv(10, &[1, 2, 3]);
        let target = fv(10, &[1, 2, 3, 40, 50]);
        delta_roundtrip(&base, &target);

        let base = fv(10, &[1, 2, 3]);
        let target = fv(10, &[9, 2, 3, 40]);
        delta_roundtrip(&base, &target);
    }

    #[test]
    fn equal_arrays_write_nothing() {
        let base = fv(10, &[1, 2, 3]);
        let target = fv(10, &[1, 2, 3]);
        let mut buf = [0u8; 64];
        let mut writer = BitWriter::new(&mut buf);
        let written = FixedVector::compress_delta(
            &base,
            &target,
            CompressionScheme::NONE,
            0.0,
            &mut writer,
        );
        assert!(!written);
        assert_eq!(writer.bits_written(), 0);
    }

    #[test]
    fn empty_to_empty_is_unchanged() {
        let base = fv(4, &[]);
        let target = fv(4, &[]);
        let mut buf = [0u8; 16];
        let mut writer = BitWriter::new(&mut buf);
        assert!(!FixedVector::compress_delta(
            &base,
            &target,
            CompressionScheme::NONE,
            0.0,
            &mut writer
        ));
    }

    #[test]
    fn pure_growth_from_empty() {
        let base = fv(8, &[]);
        let target = fv(8, &[7, 8, 9]);
        delta_roundtrip(&base, &target);
    }

    #[test]
    fn pure_shrink_to_empty() {
        let base = fv(8, &[7, 8, 9]);
        let target = fv(8, &[]);
        delta_roundtrip(&base, &target);
    }

    #[test]
    fn full_roundtrip() {
        let value = fv(10, &[5, -3, 1000, 0, 42]);
        let mut buf = [0u8; 256];
        let mut writer = BitWriter::new(&mut buf);
        FixedVector::compress_full(&value, CompressionScheme::NONE, 0.0, &mut writer);
        // 8-bit size prefix, then full-width elements.
        assert_eq!(writer.bits_written(), 8 + 5 * 32);

        let mut reader = BitReader::new(&buf);
        let mut decoded = FixedVector::new(10);
        FixedVector::decompress_full(&mut decoded, CompressionScheme::NONE, &mut reader);
        assert_eq!(decoded, value);
    }

    #[test]
    fn fixed_size_array_roundtrip() {
        let base = [1i32, 2, 3, 4, 5];
        let target = [1i32, 12, 31, -4, 5];
        let mut buf = [0u8; 256];
        let mut writer = BitWriter::new(&mut buf);
        let written =
            <[i32; 5]>::compress_delta(&base, &target, CompressionScheme::NONE, 0.0, &mut writer);
        assert!(written);

        let bits_written = writer.bits_written();
        let mut reader = BitReader::new(&buf);
        let mut decoded = [0i32; 5];
        <[i32; 5]>::decompress_delta(&base, &mut decoded, CompressionScheme::NONE, &mut reader);
        assert_eq!(decoded, target);
        assert_eq!(reader.bits_read(), bits_written);

        let mut buf = [0u8; 256];
        let mut writer = BitWriter::new(&mut buf);
        <[i32; 5]>::compress_full(&target, CompressionScheme::NONE, 0.0, &mut writer);
        let mut reader = BitReader::new(&buf);
        let mut decoded = [0i32; 5];
        <[i32; 5]>::decompress_full(&mut decoded, CompressionScheme::NONE, &mut reader);
        assert_eq!(decoded, target);
    }

    #[test]
    fn by_index_exact_cost_for_single_change() {
        // nchanged == 1 writes no index-delta width field.
        let mut items = vec![0i32; 32];
        let base = fv(32, &items);
        items[20] = 5;
        let target = fv(32, &items);
        let bits = delta_roundtrip(&base, &target);
        // strategy 1 + size-flag 1 + nchanged (3 + 1) + first index (3 + 5)
        // + one full-width element
        assert_eq!(bits, 1 + 1 + 4 + 8 + 32);
    }

    #[test]
    fn arrays_of_bools_roundtrip() {
        let base = FixedVector::with_items(8, vec![true, false, true]).unwrap();
        let target = FixedVector::with_items(8, vec![false, false, true, true]).unwrap();
        let mut buf = [0u8; 64];
        let mut writer = BitWriter::new(&mut buf);
        assert!(FixedVector::compress_delta(
            &base,
            &target,
            CompressionScheme::NONE,
            0.0,
            &mut writer
        ));

        let mut reader = BitReader::new(&buf);
        let mut decoded = FixedVector::new(8);
        FixedVector::decompress_delta(&base, &mut decoded, CompressionScheme::NONE, &mut reader);
        assert_eq!(decoded, target);
    }
}
