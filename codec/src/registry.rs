//! Process-wide type-to-compressor registry.
//!
//! The registry is written during initialization and read-only afterwards:
//! call [`register_standard_compressors`] once at startup (it is idempotent
//! and cheap to call again), before any concurrent lookups. Adapter
//! instances are leaked once and live for the process; the registry owns
//! only the mapping.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Once, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use schema::{BitSet, ComponentMask, FixedVector, Matrix4, Name, Quaternion, Vector2, Vector3};

use crate::compressor::ValueCompressor;
use crate::erased::{AnyCompressor, EnumAdapter, ReplicatedEnum, ScalarAdapter};

type Registry = HashMap<TypeId, &'static dyn AnyCompressor>;

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

fn read_registry() -> RwLockReadGuard<'static, Registry> {
    match registry().read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_registry() -> RwLockWriteGuard<'static, Registry> {
    match registry().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Binds `type_id` to a compressor built by `make`. Registering an
/// already-bound type is a no-op; the first binding wins for the process
/// lifetime.
fn insert_compressor(type_id: TypeId, make: impl FnOnce() -> &'static dyn AnyCompressor) {
    let mut map = write_registry();
    map.entry(type_id).or_insert_with(make);
}

fn register_scalar<T: ValueCompressor + Any>() {
    insert_compressor(TypeId::of::<T>(), || Box::leak(Box::new(ScalarAdapter::<T>::new())));
}

fn register_scalar_and_sequence<T: ValueCompressor + Default + Clone + Any>() {
    register_scalar::<T>();
    register_scalar::<FixedVector<T>>();
}

/// Registers every standard value type plus a bounded sequence of each.
///
/// Idempotent; the first call does the work and later calls return
/// immediately. Must complete before any thread looks compressors up.
pub fn register_standard_compressors() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        register_scalar_and_sequence::<bool>();
        register_scalar_and_sequence::<i8>();
        register_scalar_and_sequence::<u8>();
        register_scalar_and_sequence::<i16>();
        register_scalar_and_sequence::<u16>();
        register_scalar_and_sequence::<i32>();
        register_scalar_and_sequence::<u32>();
        register_scalar_and_sequence::<i64>();
        register_scalar_and_sequence::<u64>();
        register_scalar_and_sequence::<f32>();
        register_scalar_and_sequence::<String>();
        register_scalar_and_sequence::<Name>();
        register_scalar_and_sequence::<Vector2>();
        register_scalar_and_sequence::<Vector3>();
        register_scalar_and_sequence::<Quaternion>();
        register_scalar_and_sequence::<Matrix4>();
        register_scalar::<BitSet<1>>();
        register_scalar::<ComponentMask>();
        register_scalar::<BitSet<4>>();
    });
}

/// Binds an enum type to the shared `i32` codec.
///
/// Enums are never registered as standalone codecs; this is the only way a
/// lookup for an enum type succeeds.
pub fn register_enum_compressor<E: ReplicatedEnum>() {
    insert_compressor(TypeId::of::<E>(), || Box::leak(Box::new(EnumAdapter::<E>::new())));
}

/// Binds `[T; N]` to the array engine.
///
/// Every fixed length is a distinct runtime type, so applications register
/// the lengths they replicate.
pub fn register_fixed_array_compressor<T, const N: usize>()
where
    T: ValueCompressor + Default + Clone + Any,
{
    register_scalar::<[T; N]>();
}

/// Looks up the compressor for a runtime type identity.
///
/// `None` means the type cannot be replicated; the caller fails its
/// surrounding operation.
#[must_use]
pub fn get_compressor(type_id: TypeId) -> Option<&'static dyn AnyCompressor> {
    read_registry().get(&type_id).copied()
}

/// Looks up the compressor for a runtime-typed value.
#[must_use]
pub fn get_value_compressor(value: &dyn Any) -> Option<&'static dyn AnyCompressor> {
    get_compressor(value.type_id())
}
