use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use lea_core::{expand_key, BatchConfig, Lea};

fn bench_key_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_schedule");
    for len in [16usize, 24, 32] {
        let key = vec![0x5au8; len];
        group.bench_with_input(BenchmarkId::from_parameter(len * 8), &key, |b, key| {
            b.iter(|| expand_key(key).unwrap());
        });
    }
    group.finish();
}

fn bench_blocks(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);
    let cipher = Lea::new(&key).unwrap();

    let mut block = [0u8; 16];
    rng.fill_bytes(&mut block);
    c.bench_function("encrypt_block", |b| b.iter(|| cipher.encrypt_block(&block)));

    let mut data = vec![0u8; 4096];
    rng.fill_bytes(&mut data);
    let mut out = vec![0u8; data.len()];

    let mut group = c.benchmark_group("batch_4k");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("sequential", |b| {
        let config = BatchConfig::encrypt();
        b.iter(|| cipher.process_blocks(&config, &data, None, &mut out).unwrap());
    });
    group.bench_function("lanes", |b| {
        let config = BatchConfig::encrypt().parallel(true);
        b.iter(|| cipher.process_blocks(&config, &data, None, &mut out).unwrap());
    });
    group.bench_function("counter_lanes", |b| {
        let config = BatchConfig::encrypt().counter(true).parallel(true);
        b.iter(|| cipher.process_blocks(&config, &block, None, &mut out).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_key_schedule, bench_blocks);
criterion_main!(benches);
