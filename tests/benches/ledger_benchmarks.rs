//! # Token Ledger Benchmarks
//!
//! Hot paths of the ledger and the bank-side hook.
//!
//! ## Usage
//!
//! ```bash
//! cargo bench --package ledger-tests --bench ledger_benchmarks
//! cargo bench --package ledger-tests --bench ledger_benchmarks -- ledger/transfer
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ledger_tests::fixtures::*;
use token_ledger::adapters::encode_set_metadata;
use token_ledger::prelude::*;

fn holder(i: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&i.to_be_bytes());
    Address::new(bytes)
}

fn bench_mint(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger/mint");
    group.throughput(Throughput::Elements(1));

    let ledger = deploy_ledger(NoopSettlementClient);
    let mut n = 0u64;
    group.bench_function("distinct_holders", |b| {
        b.iter(|| {
            n += 1;
            ledger
                .mint(DEPLOYER, black_box(holder(n)), units(1))
                .unwrap();
        })
    });
    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger/transfer");
    group.throughput(Throughput::Elements(1));

    for holders in [10u64, 1_000, 100_000] {
        let ledger = deploy_ledger(NoopSettlementClient);
        for i in 0..holders {
            ledger.mint(DEPLOYER, holder(i), units(1_000)).unwrap();
        }

        let mut n = 0u64;
        group.bench_with_input(BenchmarkId::from_parameter(holders), &holders, |b, &holders| {
            b.iter(|| {
                n += 1;
                let from = holder(n % holders);
                let to = holder((n + 1) % holders);
                black_box(ledger.transfer(from, to, Amount::one()).unwrap());
            })
        });
    }
    group.finish();
}

fn bench_rejections(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger/rejected");

    let ledger = funded_ledger(10);
    ledger.blacklist(DEPLOYER, CAROL).unwrap();
    group.bench_function("insufficient_balance", |b| {
        b.iter(|| black_box(ledger.transfer(ALICE, BOB, units(11)).is_err()))
    });
    group.bench_function("blacklisted_recipient", |b| {
        b.iter(|| black_box(ledger.transfer(ALICE, CAROL, units(1)).is_err()))
    });
    group.finish();
}

fn bench_restriction_hook(c: &mut Criterion) {
    let mut group = c.benchmark_group("hook/check_denom_restrictions");

    let ledger = funded_ledger(10);
    let denom = ledger.erc20_denom().to_string();
    group.bench_function("direct", |b| {
        b.iter(|| check_denom_restrictions(black_box(&denom), Some(ALICE), Some(BOB), &ledger))
    });

    let reader = EvmStatusReader::new(&ledger);
    group.bench_function("view_calls", |b| {
        b.iter(|| check_denom_restrictions(black_box(&denom), Some(ALICE), Some(BOB), &reader))
    });

    group.bench_function("native_denom", |b| {
        b.iter(|| check_denom_restrictions(black_box("inj"), Some(ALICE), Some(BOB), &ledger))
    });
    group.finish();
}

fn bench_metadata_encoding(c: &mut Criterion) {
    let metadata = TokenMetadata::new("MyUSDC", "mUSDC");
    c.bench_function("abi/encode_set_metadata", |b| {
        b.iter(|| encode_set_metadata(black_box(&metadata)))
    });
}

criterion_group!(
    name = ledger_benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(5));
    targets =
        bench_mint,
        bench_transfer,
        bench_rejections,
        bench_restriction_hook,
        bench_metadata_encoding,
);

criterion_main!(ledger_benches);
