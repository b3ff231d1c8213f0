//! Bit-level delta and full value compression for replicated game state.
//!
//! This is the main codec crate. For every replicable value type it can
//! detect whether two values differ enough to transmit, encode the minimal
//! bits needed to rebuild the new value from an acknowledged baseline
//! (delta), or encode a value from scratch (full). Per-field
//! [`CompressionScheme`]s trade bandwidth against fidelity.
//!
//! # Layers
//!
//! - Scheme tables turn configured ranges/precisions into bit widths.
//! - Scalar codecs implement [`ValueCompressor`] for every primitive value
//!   category.
//! - The array engine diffs bounded sequences over any scalar codec.
//! - [`AnyCompressor`] and the registry dispatch on runtime type identity.
//!
//! # Design Principles
//!
//! - **Infallible hot path** - The five codec operations never return
//!   errors; stream exhaustion is a per-message overflow flag and
//!   configuration violations are debug-asserted.
//! - **Bit-exact wire contract** - Every layout here must match any other
//!   implementation of the same format bit for bit; [`table_fingerprint`]
//!   lets peers verify the quantization tables at handshake.
//! - **Write-once registry** - Register at startup, look up forever.

mod array;
mod bits;
mod compressor;
mod erased;
mod float;
mod integral;
mod quantize;
mod quaternion;
mod registry;
mod scheme;
mod string;
mod varint;

pub use array::{
    analyze, bits_for_value, compress_delta_slice, compress_full_slice, select_strategy,
    ArrayAnalyzeResult, CompressStrategy, MAX_ARRAY_SIZE,
};
pub use compressor::ValueCompressor;
pub use erased::{
    AnyCompressor, EnumAdapter, FixedArrayAdapter, ReplicatedEnum, ScalarAdapter, SequenceAdapter,
};
pub use quantize::{
    compress_float, compress_quaternion, decompress_float, decompress_quaternion,
    QUATERNION_COMPONENT_MAX, QUATERNION_COMPONENT_MIN,
};
pub use registry::{
    get_compressor, get_value_compressor, register_enum_compressor,
    register_fixed_array_compressor, register_standard_compressors,
};
pub use scheme::{
    compare_precision_from_meta, compose_scheme, find_frac_index, find_int64_index,
    find_int_index, float_delta_precision, float_scheme_from_meta, frac_record,
    full_range64_record, full_range_record, delta_range64_record, delta_range_record,
    int64_scheme_from_meta, int_scheme_from_meta, quaternion_delta_precision, quaternion_record,
    quaternion_scheme_from_meta, scheme_for_float, scheme_for_int, scheme_for_int64,
    scheme_for_quaternion, table_fingerprint, CompressionScheme, FracRecord, Int64Record,
    IntRecord, FRAC_RECORDS, INT64_RECORDS, INT_RECORDS, QUATERNION_RECORDS,
};
pub use string::MAX_STRING_LENGTH;
pub use varint::{compress_varint, decompress_varint, VarInt};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = CompressionScheme::NONE;
        let _ = table_fingerprint();
        let _ = MAX_ARRAY_SIZE;
        let _ = MAX_STRING_LENGTH;
        register_standard_compressors();
        assert!(get_compressor(std::any::TypeId::of::<f32>()).is_some());
    }

    #[test]
    fn max_array_size_fits_the_size_prefix() {
        assert!(MAX_ARRAY_SIZE <= 254);
        assert_eq!(bits_for_value(MAX_ARRAY_SIZE as u64), 8);
    }
}
