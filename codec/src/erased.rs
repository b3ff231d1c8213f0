//! Type-erased compressor interface.
//!
//! [`AnyCompressor`] exposes the five-operation contract over `&dyn Any`
//! values so callers holding only a runtime-typed value can invoke the
//! right codec. Passing a value of the wrong concrete type is a programmer
//! error: debug-asserted, and a no-op in release (compress writes nothing
//! and reports no write; decompress leaves the target untouched).

use std::any::Any;
use std::marker::PhantomData;

use bitstream::{BitReader, BitWriter};
use schema::{FieldMeta, FixedVector};

use crate::compressor::ValueCompressor;
use crate::scheme::CompressionScheme;

/// Object-safe compression interface over runtime-typed values.
pub trait AnyCompressor: Send + Sync {
    fn is_equal(&self, a: &dyn Any, b: &dyn Any, compare_precision: f32) -> bool;

    fn compress_delta(
        &self,
        base: &dyn Any,
        target: &dyn Any,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool;

    fn compress_full(
        &self,
        value: &dyn Any,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    );

    fn decompress_delta(
        &self,
        base: &dyn Any,
        target: &mut dyn Any,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    );

    fn decompress_full(
        &self,
        target: &mut dyn Any,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    );

    /// Builds the value type's scheme from per-field metadata.
    fn scheme_from_meta(&self, meta: &FieldMeta) -> CompressionScheme;

    /// Delta tolerance derived from per-field metadata.
    fn delta_precision_from_meta(&self, meta: &FieldMeta) -> f32;

    /// Compare tolerance derived from per-field metadata.
    fn compare_precision_from_meta(&self, meta: &FieldMeta) -> f32;
}

/// Adapts a [`ValueCompressor`] implementation to [`AnyCompressor`].
///
/// Sequences need no separate adapter: `FixedVector<T>` and `[T; N]`
/// implement the same contract, so the corresponding monomorphization
/// forwards to the array engine.
pub struct ScalarAdapter<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Adapter binding a bounded sequence of `T` to the array engine.
pub type SequenceAdapter<T> = ScalarAdapter<FixedVector<T>>;

/// Adapter binding a fixed-size array of `T` to the array engine.
pub type FixedArrayAdapter<T, const N: usize> = ScalarAdapter<[T; N]>;

impl<T> ScalarAdapter<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ScalarAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ValueCompressor + Any> AnyCompressor for ScalarAdapter<T> {
    fn is_equal(&self, a: &dyn Any, b: &dyn Any, compare_precision: f32) -> bool {
        let (Some(a), Some(b)) = (a.downcast_ref::<T>(), b.downcast_ref::<T>()) else {
            debug_assert!(false, "value type mismatch in is_equal");
            return false;
        };
        T::is_equal(a, b, compare_precision)
    }

    fn compress_delta(
        &self,
        base: &dyn Any,
        target: &dyn Any,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        let (Some(base), Some(target)) = (base.downcast_ref::<T>(), target.downcast_ref::<T>())
        else {
            debug_assert!(false, "value type mismatch in compress_delta");
            return false;
        };
        T::compress_delta(base, target, scheme, delta_precision, writer)
    }

    fn compress_full(
        &self,
        value: &dyn Any,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        let Some(value) = value.downcast_ref::<T>() else {
            debug_assert!(false, "value type mismatch in compress_full");
            return;
        };
        T::compress_full(value, scheme, delta_precision, writer);
    }

    fn decompress_delta(
        &self,
        base: &dyn Any,
        target: &mut dyn Any,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let Some(base) = base.downcast_ref::<T>() else {
            debug_assert!(false, "value type mismatch in decompress_delta");
            return;
        };
        let Some(target) = target.downcast_mut::<T>() else {
            debug_assert!(false, "value type mismatch in decompress_delta");
            return;
        };
        T::decompress_delta(base, target, scheme, reader);
    }

    fn decompress_full(
        &self,
        target: &mut dyn Any,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let Some(target) = target.downcast_mut::<T>() else {
            debug_assert!(false, "value type mismatch in decompress_full");
            return;
        };
        T::decompress_full(target, scheme, reader);
    }

    fn scheme_from_meta(&self, meta: &FieldMeta) -> CompressionScheme {
        T::scheme_from_meta(meta)
    }

    fn delta_precision_from_meta(&self, meta: &FieldMeta) -> f32 {
        T::delta_precision_from_meta(meta)
    }

    fn compare_precision_from_meta(&self, meta: &FieldMeta) -> f32 {
        T::compare_precision_from_meta(meta)
    }
}

/// Enum types replicated through their `i32` representation.
///
/// Enums never get standalone codecs; implement this and call
/// [`crate::register_enum_compressor`] to bind the enum's type identity to
/// the shared `i32` codec. `from_raw` must map unknown raw values to some
/// in-range variant rather than panic, since a delta against a stale
/// baseline can produce any value.
pub trait ReplicatedEnum: Copy + Any {
    fn to_raw(self) -> i32;
    #[must_use]
    fn from_raw(raw: i32) -> Self;
}

/// Adapter converting an enum to `i32` around the integral codec.
pub struct EnumAdapter<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> EnumAdapter<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> Default for EnumAdapter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ReplicatedEnum> AnyCompressor for EnumAdapter<E> {
    fn is_equal(&self, a: &dyn Any, b: &dyn Any, compare_precision: f32) -> bool {
        let (Some(a), Some(b)) = (a.downcast_ref::<E>(), b.downcast_ref::<E>()) else {
            debug_assert!(false, "value type mismatch in is_equal");
            return false;
        };
        i32::is_equal(&a.to_raw(), &b.to_raw(), compare_precision)
    }

    fn compress_delta(
        &self,
        base: &dyn Any,
        target: &dyn Any,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) -> bool {
        let (Some(base), Some(target)) = (base.downcast_ref::<E>(), target.downcast_ref::<E>())
        else {
            debug_assert!(false, "value type mismatch in compress_delta");
            return false;
        };
        i32::compress_delta(
            &base.to_raw(),
            &target.to_raw(),
            scheme,
            delta_precision,
            writer,
        )
    }

    fn compress_full(
        &self,
        value: &dyn Any,
        scheme: CompressionScheme,
        delta_precision: f32,
        writer: &mut BitWriter<'_>,
    ) {
        let Some(value) = value.downcast_ref::<E>() else {
            debug_assert!(false, "value type mismatch in compress_full");
            return;
        };
        i32::compress_full(&value.to_raw(), scheme, delta_precision, writer);
    }

    fn decompress_delta(
        &self,
        base: &dyn Any,
        target: &mut dyn Any,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let Some(base) = base.downcast_ref::<E>() else {
            debug_assert!(false, "value type mismatch in decompress_delta");
            return;
        };
        let Some(target) = target.downcast_mut::<E>() else {
            debug_assert!(false, "value type mismatch in decompress_delta");
            return;
        };
        let mut raw = 0i32;
        i32::decompress_delta(&base.to_raw(), &mut raw, scheme, reader);
        *target = E::from_raw(raw);
    }

    fn decompress_full(
        &self,
        target: &mut dyn Any,
        scheme: CompressionScheme,
        reader: &mut BitReader<'_>,
    ) {
        let Some(target) = target.downcast_mut::<E>() else {
            debug_assert!(false, "value type mismatch in decompress_full");
            return;
        };
        let mut raw = 0i32;
        i32::decompress_full(&mut raw, scheme, reader);
        *target = E::from_raw(raw);
    }

    fn scheme_from_meta(&self, meta: &FieldMeta) -> CompressionScheme {
        i32::scheme_from_meta(meta)
    }

    fn delta_precision_from_meta(&self, meta: &FieldMeta) -> f32 {
        i32::delta_precision_from_meta(meta)
    }

    fn compare_precision_from_meta(&self, meta: &FieldMeta) -> f32 {
        i32::compare_precision_from_meta(meta)
    }
}
