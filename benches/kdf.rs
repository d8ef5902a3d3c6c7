// benches/kdf.rs
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use wamedia_rs::{derive_media_keys, MediaType};

fn bench_hkdf(c: &mut Criterion) {
    let media_key = [0x77u8; 32];
    let mut group = c.benchmark_group("hkdf");

    for media_type in MediaType::ALL {
        group.bench_function(media_type.name(), |b| {
            b.iter(|| black_box(derive_media_keys(black_box(&media_key), media_type).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hkdf);
criterion_main!(benches);
