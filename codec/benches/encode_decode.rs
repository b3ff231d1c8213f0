use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bitstream::{BitReader, BitWriter};
use codec::{CompressionScheme, ValueCompressor};
use schema::{FixedVector, FloatQuantizeParam, Quaternion, QuaternionQuantizeParam, Vector3};

fn bench_quantized_float(c: &mut Criterion) {
    let scheme = codec::scheme_for_float(&FloatQuantizeParam::new(100.0, 0.001));
    let precision = codec::frac_record(scheme).precision;
    let values: Vec<f32> = (0..256).map(|i| (i as f32).mul_add(0.37, -47.3)).collect();

    c.bench_function("float/compress_full_quantized", |b| {
        let mut buf = [0u8; 4096];
        b.iter(|| {
            let mut writer = BitWriter::new(&mut buf);
            for v in &values {
                f32::compress_full(black_box(v), scheme, precision, &mut writer);
            }
            writer.bits_written()
        });
    });

    let mut buf = [0u8; 4096];
    let mut writer = BitWriter::new(&mut buf);
    for v in &values {
        f32::compress_full(v, scheme, precision, &mut writer);
    }
    let used = writer.bytes_written();

    c.bench_function("float/decompress_full_quantized", |b| {
        b.iter(|| {
            let mut reader = BitReader::new(black_box(&buf[..used]));
            let mut decoded = 0.0f32;
            for _ in 0..values.len() {
                f32::decompress_full(&mut decoded, scheme, &mut reader);
            }
            decoded
        });
    });
}

fn bench_quaternion(c: &mut Criterion) {
    let scheme = codec::scheme_for_quaternion(&QuaternionQuantizeParam::new(0.001));
    let q = Quaternion::new(0.0, 0.0, 0.798_635, 0.601_815);

    c.bench_function("quaternion/compress_full_packed", |b| {
        let mut buf = [0u8; 256];
        b.iter(|| {
            let mut writer = BitWriter::new(&mut buf);
            for _ in 0..64 {
                Quaternion::compress_full(black_box(&q), scheme, 0.001, &mut writer);
            }
            writer.bits_written()
        });
    });
}

fn bench_array_delta(c: &mut Criterion) {
    let base: FixedVector<Vector3> = FixedVector::with_items(
        128,
        (0..128)
            .map(|i| Vector3::new(i as f32, (i * 2) as f32, 0.5))
            .collect::<Vec<_>>(),
    )
    .unwrap();
    let mut target = base.clone();
    // Sparse movement: a handful of elements changed.
    for i in [3usize, 40, 41, 97] {
        target[i].x += 1.5;
    }

    c.bench_function("array/compress_delta_sparse", |b| {
        let mut buf = [0u8; 16384];
        b.iter(|| {
            let mut writer = BitWriter::new(&mut buf);
            FixedVector::compress_delta(
                black_box(&base),
                black_box(&target),
                CompressionScheme::NONE,
                1e-5,
                &mut writer,
            )
        });
    });

    let mut buf = [0u8; 16384];
    let mut writer = BitWriter::new(&mut buf);
    FixedVector::compress_delta(&base, &target, CompressionScheme::NONE, 1e-5, &mut writer);
    let used = writer.bytes_written();

    c.bench_function("array/decompress_delta_sparse", |b| {
        b.iter(|| {
            let mut reader = BitReader::new(black_box(&buf[..used]));
            let mut decoded = FixedVector::new(128);
            FixedVector::decompress_delta(&base, &mut decoded, CompressionScheme::NONE, &mut reader);
            decoded.len()
        });
    });
}

criterion_group!(benches, bench_quantized_float, bench_quaternion, bench_array_delta);
criterion_main!(benches);
