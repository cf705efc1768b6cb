use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zsio::checksum::ChecksumProvider;
use zsio::{varint, BuildInfo, ContainerWriter, Crc64Iso, DigestProvider, Sha256Digest};

fn bench_primitives(c: &mut Criterion) {
    let data = vec![0x5au8; 1024 * 1024];

    c.bench_function("sha256_1mb", |b| b.iter(|| Sha256Digest.digest(black_box(&data))));
    c.bench_function("crc64_iso_1mb", |b| {
        b.iter(|| Crc64Iso.checksum(&mut black_box(&data[..])).unwrap())
    });
    c.bench_function("uleb128_encode", |b| b.iter(|| varint::encode(black_box(u64::MAX))));
}

fn bench_write_container(c: &mut Criterion) {
    let data = vec![42u8; 1024 * 1024];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.zs");
    let build = BuildInfo::new("bench", "bench", Utc::now());
    let writer = ContainerWriter::new();

    c.bench_function("write_container_1mb", |b| {
        b.iter(|| writer.write_container(&path, black_box(&data), &build).unwrap())
    });
}

criterion_group!(benches, bench_primitives, bench_write_container);
criterion_main!(benches);
