use bitstream::{BitReader, BitWriter};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bits { bits: u32, value: u32 },
    Align,
}

fn mask_value(bits: u32, value: u32) -> u32 {
    if bits >= 32 {
        value
    } else {
        value & ((1u32 << bits) - 1)
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..=32, any::<u32>()).prop_map(|(bits, value)| Op::Bits {
            bits,
            value: mask_value(bits, value),
        }),
        Just(Op::Align),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut buf = [0u8; 512];
        let mut writer = BitWriter::new(&mut buf);

        for op in &ops {
            match op {
                Op::Bits { bits, value } => writer.write_bits(*value, *bits),
                Op::Align => writer.write_alignment_bits(),
            }
        }
        writer.write_alignment_bits();
        prop_assert!(!writer.is_overflowed());
        let used = writer.bytes_written();

        let mut reader = BitReader::new(&buf[..used]);
        for op in &ops {
            match op {
                Op::Bits { bits, value } => {
                    prop_assert_eq!(reader.read_bits(*bits), *value);
                }
                Op::Align => reader.read_alignment_bits(),
            }
        }
        reader.read_alignment_bits();
        prop_assert!(!reader.is_overflowed());
        prop_assert_eq!(reader.bits_read(), used * 8);
    }

    #[test]
    fn prop_reader_never_panics_on_arbitrary_input(
        data in prop::collection::vec(any::<u8>(), 0..64),
        reads in prop::collection::vec(1u32..=32, 1..32),
    ) {
        let mut reader = BitReader::new(&data);
        for bits in reads {
            let _ = reader.read_bits(bits);
        }
        // Either everything fit or the flag is set; no other outcome.
        let total: usize = data.len() * 8;
        prop_assert!(reader.bits_read() <= total);
    }
}
