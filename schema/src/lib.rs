//! Replicated value model and per-field metadata for the deltapack codec.
//!
//! This crate defines what the codec compresses:
//! - Math value types ([`Vector2`], [`Vector3`], [`Quaternion`], [`Matrix4`])
//! - Interned names ([`Name`]) with O(1) equality
//! - Bounded sequences ([`FixedVector`]) and fixed-width bitsets ([`BitSet`],
//!   [`ComponentMask`])
//! - Per-field quantization metadata ([`FieldMeta`] and the `*Param` types)
//!
//! # Design Principles
//!
//! - **Plain data** - Value types are POD-like; all encoding knowledge lives
//!   in the codec crate.
//! - **Metadata is configuration** - Quantization params describe intent
//!   (ranges, precisions); the codec turns them into bit widths.
//! - **Optional serde** - The `serde` feature derives `Serialize`/
//!   `Deserialize` on the param types so field tuning can live in config
//!   files.

mod bitset;
mod error;
mod fixed_vector;
mod math;
mod meta;
mod name;

pub use bitset::{BitSet, ComponentMask};
pub use error::CapacityError;
pub use fixed_vector::FixedVector;
pub use math::{Matrix4, Quaternion, Vector2, Vector3};
pub use meta::{
    ComparePrecision, FieldMeta, FloatQuantizeParam, Int64CompressParam, IntCompressParam,
    QuaternionQuantizeParam, DEFAULT_COMPARE_PRECISION, DEFAULT_DELTA_PRECISION,
};
pub use name::Name;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Vector2::new(0.0, 0.0);
        let _ = Vector3::new(0.0, 0.0, 0.0);
        let _ = Quaternion::IDENTITY;
        let _ = Matrix4::IDENTITY;
        let _ = Name::new("spawn_point");
        let _ = FixedVector::<u8>::new(4);
        let _ = ComponentMask::new();
        let _ = FieldMeta::new();
        assert!(DEFAULT_DELTA_PRECISION < DEFAULT_COMPARE_PRECISION);
    }
}
