#![no_main]

use bitstream::BitReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = BitReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations. The reader
    // must never panic; exhaustion only sets the overflow flag.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 4;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_bits(1);
            }
            1 => {
                let bits = u32::from(data[idx.saturating_sub(1)] % 32) + 1;
                let _ = reader.read_bits(bits);
            }
            2 => {
                reader.read_alignment_bits();
            }
            _ => {
                let _ = codec::decompress_varint::<u32>(&mut reader);
            }
        }
    }

    let _ = reader.is_overflowed();
    let _ = reader.bits_read();
});
