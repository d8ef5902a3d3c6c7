// benches/batch.rs
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;
use std::io::Cursor;
use wamedia_rs::MediaType;

const MEDIA_KEY: [u8; 32] = [0x42; 32];

fn bench_batch(c: &mut Criterion) {
    let data = black_box(vec![0u8; 10_000_000]); // 10 MB

    let mut group = c.benchmark_group("batch-ops");

    for n_files in [1, 2, 4, 8, 16] {
        group.bench_with_input(BenchmarkId::new("parallel", n_files), &n_files, |b, &n| {
            b.iter_batched(
                || {
                    (0..n)
                        .map(|_| (Cursor::new(data.clone()), Vec::new()))
                        .collect::<Vec<_>>()
                },
                |mut batch| {
                    wamedia_rs::encrypt_batch(&mut batch, &MEDIA_KEY, MediaType::Video).unwrap();
                    batch
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(
            BenchmarkId::new("sequential", n_files),
            &n_files,
            |b, &n| {
                b.iter(|| {
                    for _ in 0..n {
                        let mut out = Vec::new();
                        wamedia_rs::encrypt(Cursor::new(&data), &mut out, &MEDIA_KEY, MediaType::Video)
                            .unwrap();
                        black_box(out);
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_batch);
criterion_main!(benches);
