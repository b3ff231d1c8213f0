use bitstream::{BitReader, BitWriter};

#[test]
fn various_widths_roundtrip() {
    let cases: &[(u32, u32)] = &[
        (0, 1),
        (1, 1),
        (0b1010, 4),
        (0xFF, 8),
        (0xABCD, 16),
        (0x0012_3456, 24),
        (0x1234_5678, 32),
        (u32::MAX, 32),
    ];

    for &(value, bits) in cases {
        let mut buf = [0u8; 8];
        let mut writer = BitWriter::new(&mut buf);
        writer.write_bits(value, bits);
        writer.write_alignment_bits();
        assert!(!writer.is_overflowed());
        let used = writer.bytes_written();

        let mut reader = BitReader::new(&buf[..used]);
        assert_eq!(
            reader.read_bits(bits),
            value,
            "roundtrip failed for {bits}-bit value {value}"
        );
        reader.read_alignment_bits();
        assert!(!reader.is_overflowed());
    }
}

#[test]
fn interleaved_widths_roundtrip() {
    let mut buf = [0u8; 128];
    let mut writer = BitWriter::new(&mut buf);
    let values: Vec<(u32, u32)> = (1..=32).map(|bits| (0xA5A5_A5A5 >> (32 - bits), bits)).collect();
    for &(value, bits) in &values {
        writer.write_bits(value, bits);
    }
    writer.write_alignment_bits();
    assert!(!writer.is_overflowed());
    let used = writer.bytes_written();

    let mut reader = BitReader::new(&buf[..used]);
    for &(value, bits) in &values {
        assert_eq!(reader.read_bits(bits), value, "width {bits}");
    }
    reader.read_alignment_bits();
    assert!(!reader.is_overflowed());
    assert_eq!(reader.bits_read(), used * 8);
}

#[test]
fn alignment_mid_stream_roundtrip() {
    let mut buf = [0u8; 16];
    let mut writer = BitWriter::new(&mut buf);
    writer.write_bits(0b101, 3);
    writer.write_alignment_bits();
    writer.write_bits(0xBEEF, 16);
    writer.write_bits(1, 1);
    writer.write_alignment_bits();
    let used = writer.bytes_written();

    let mut reader = BitReader::new(&buf[..used]);
    assert_eq!(reader.read_bits(3), 0b101);
    reader.read_alignment_bits();
    assert_eq!(reader.read_bits(16), 0xBEEF);
    assert_eq!(reader.read_bits(1), 1);
    reader.read_alignment_bits();
    assert!(!reader.is_overflowed());
}

#[test]
fn truncated_message_sets_reader_flag_only_at_end() {
    let mut buf = [0u8; 4];
    let mut writer = BitWriter::new(&mut buf);
    writer.write_bits(0xCAFE, 16);
    writer.write_bits(0xBABE, 16);
    assert!(!writer.is_overflowed());

    // Deliver only the first three bytes.
    let mut reader = BitReader::new(&buf[..3]);
    assert_eq!(reader.read_bits(16), 0xCAFE);
    assert!(!reader.is_overflowed());
    let _ = reader.read_bits(16);
    assert!(reader.is_overflowed());
}
