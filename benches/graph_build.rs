use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use qaif::model::AcceptedTransaction;
use qaif::model::Address;
use qaif::model::EthAmount;
use qaif::model::GraphData;
use qaif::model::NodeKeying;

fn synthetic_trace(
    transactions: usize,
    addresses: u64,
) -> Vec<AcceptedTransaction> {
    let pool: Vec<Address> = (0..addresses)
        .map(|n| Address::parse(&format!("0x{:040x}", n + 1)).unwrap())
        .collect();

    (0..transactions)
        .map(|i| {
            let from = pool[i % pool.len()].clone();
            let to = pool[(i * 7 + 3) % pool.len()].clone();
            let wei = 1_000_000_000_000_000u128 * (i as u128 % 97 + 1);
            AcceptedTransaction {
                from,
                to,
                wei,
                value: EthAmount::from_wei(wei),
                hash: format!("0x{:064x}", i),
                timestamp: 1_700_000_000 + i as i64,
                time: String::new(),
            }
        })
        .collect()
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for &size in &[100usize, 1_000, 10_000] {
        let trace = synthetic_trace(size, (size as u64 / 10).max(2));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("exact", size), &trace, |b, trace| {
            b.iter(|| GraphData::build(black_box(trace), NodeKeying::Exact))
        });
        group.bench_with_input(BenchmarkId::new("canonical", size), &trace, |b, trace| {
            b.iter(|| GraphData::build(black_box(trace), NodeKeying::Canonical))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_graph_build);
criterion_main!(benches);
