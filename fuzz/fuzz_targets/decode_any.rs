#![no_main]

use bitstream::BitReader;
use codec::{get_value_compressor, register_standard_compressors, CompressionScheme};
use libfuzzer_sys::fuzz_target;
use schema::{ComponentMask, FixedVector, Matrix4, Name, Quaternion, Vector2, Vector3};

// Arbitrary bytes decoded as every registered type. The contract under fuzz:
// never panic, never loop unboundedly; garbage input only sets the overflow
// flag or produces garbage values.
fuzz_target!(|data: &[u8]| {
    register_standard_compressors();

    macro_rules! decode_as {
        ($base:expr, $blank:expr) => {{
            let base = $base;
            let mut full = $blank;
            let mut delta = $blank;
            if let Some(compressor) = get_value_compressor(&base) {
                let mut reader = BitReader::new(data);
                compressor.decompress_full(&mut full, CompressionScheme::NONE, &mut reader);
                compressor.decompress_delta(
                    &base,
                    &mut delta,
                    CompressionScheme::NONE,
                    &mut reader,
                );
                let _ = reader.is_overflowed();
            }
        }};
    }

    decode_as!(false, false);
    decode_as!(0i8, 0i8);
    decode_as!(0u16, 0u16);
    decode_as!(0i32, 0i32);
    decode_as!(0u64, 0u64);
    decode_as!(0.0f32, 0.0f32);
    decode_as!(String::new(), String::new());
    decode_as!(Name::default(), Name::default());
    decode_as!(Vector2::default(), Vector2::default());
    decode_as!(Vector3::default(), Vector3::default());
    decode_as!(Quaternion::IDENTITY, Quaternion::IDENTITY);
    decode_as!(Matrix4::IDENTITY, Matrix4::IDENTITY);
    decode_as!(ComponentMask::new(), ComponentMask::new());
    decode_as!(FixedVector::<i32>::new(16), FixedVector::<i32>::new(16));
    decode_as!(
        FixedVector::<Vector3>::new(16),
        FixedVector::<Vector3>::new(16)
    );
});
