use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sda_pipeline::merkle::{verify_path, Blake2sHasher, MerkleTree, Sha256Hasher};

fn make_leaves(count: usize, width: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| {
            let mut bytes = Vec::with_capacity(width);
            for j in 0..width {
                bytes.push(((i * width + j) % 251) as u8);
            }
            bytes
        })
        .collect()
}

fn bench_commit(c: &mut Criterion) {
    let sizes = [1024usize, 16_384, 65_536];
    for &size in &sizes {
        let leaves = make_leaves(size, 32);
        let mut group = c.benchmark_group("commit_sha256");
        group.throughput(Throughput::Bytes((size * 32) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
            b.iter(|| MerkleTree::<Sha256Hasher>::from_leaves(leaves).root());
        });
        group.finish();

        let mut group = c.benchmark_group("commit_blake2s");
        group.throughput(Throughput::Bytes((size * 32) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
            b.iter(|| MerkleTree::<Blake2sHasher>::from_leaves(leaves).root());
        });
        group.finish();
    }
}

fn bench_verify(c: &mut Criterion) {
    let leaves = make_leaves(1 << 12, 32);
    let tree = MerkleTree::<Sha256Hasher>::from_leaves(&leaves);
    let root = tree.root();
    for &index in &[0usize, 1 << 11, (1 << 12) - 1] {
        let path = tree.open(index).unwrap();
        c.bench_with_input(BenchmarkId::new("verify_path", index), &index, |b, &index| {
            b.iter(|| {
                verify_path::<Sha256Hasher>(&leaves[index], index, leaves.len(), &path, &root)
                    .unwrap();
            });
        });
    }
}

fn merkle_benches(c: &mut Criterion) {
    bench_commit(c);
    bench_verify(c);
}

criterion_group!(benches, merkle_benches);
criterion_main!(benches);
