//! The five-operation compression contract.

use bitstream::{BitReader, BitWriter};
use schema::FieldMeta;

use crate::scheme::CompressionScheme;

/// The compression contract every replicable value type implements.
///
/// All five operations are infallible on the hot path: configuration
/// violations are debug-asserted and degrade to wrong bits in release, and
/// stream exhaustion is reported by the stream's overflow flag, checked once
/// per message by the caller.
///
/// `compress_delta` writes nothing and returns `false` when the values are
/// equivalent within the delta tolerance. `decompress_delta` must only be
/// invoked when the encoder reported a write; whoever transmits the stream
/// signals presence out of band (the array engine and erased callers do).
pub trait ValueCompressor: Sized {
    /// Returns whether `a` and `b` are equal within `compare_precision`.
    /// Exact types ignore the precision.
    fn is_equal(a: &Self, b: &Self, compare_precision: f32) -> bool;

    /// Encodes `target` relative to `base`. Returns whether anything was
    /// written.
    #[must_use]
    fn compress_delta(
        base: &Self,
        target: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool;

    /// Encodes `value` with no baseline assumption.
    fn compress_full(
        value: &Self,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    );

    /// Mirrors [`compress_delta`](Self::compress_delta)'s bit layout.
    fn decompress_delta(
        base: &Self,
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    );

    /// Mirrors [`compress_full`](Self::compress_full)'s bit layout.
    fn decompress_full(
        target: &mut Self,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    );

    /// Builds this type's scheme from field metadata. Types with no
    /// quantization support stay at [`CompressionScheme::NONE`].
    #[must_use]
    fn scheme_from_meta(_meta: &FieldMeta) -> CompressionScheme {
        CompressionScheme::NONE
    }

    /// The delta tolerance this type actually applies for `scheme`. Exact
    /// types ignore the fallback and compare exactly.
    #[must_use]
    fn effective_delta_precision(_scheme: CompressionScheme, delta_precision: f32) -> f32 {
        delta_precision
    }

    /// The delta tolerance derived from field metadata alone.
    #[must_use]
    fn delta_precision_from_meta(_meta: &FieldMeta) -> f32 {
        0.0
    }

    /// The compare tolerance derived from field metadata alone.
    #[must_use]
    fn compare_precision_from_meta(_meta: &FieldMeta) -> f32 {
        0.0
    }
}
