//! # FinTrust Subsystem Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | ft-01 Ledger | submit (store + schedule) | < 10µs |
//! | ft-01 Ledger | status lookup | < 1µs |
//! | ft-02 Settlement | transfer | < 10µs |
//! | ft-03 Risk | fraud assessment | < 1µs |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ft_01_ledger::{LedgerApi, LedgerConfig, LedgerService};
use ft_02_settlement::{SettlementApi, SettlementConfig, SettlementService, TransferRequest};
use ft_03_risk::{FixedFraudScorer, FraudCheckRequest, RiskConfig, RiskService};
use rust_decimal_macros::dec;
use serde_json::json;

// ============================================================================
// FT-01: Ledger
// ============================================================================

fn bench_ledger(c: &mut Criterion) {
    // Confirmation timers are tokio tasks; submit needs a runtime context.
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();

    let mut group = c.benchmark_group("ft-01-ledger");
    group.measurement_time(Duration::from_secs(5));

    let ledger = LedgerService::new(LedgerConfig {
        confirmation_delay: Duration::from_secs(3600),
        ..LedgerConfig::default()
    });
    let payload = json!({"amount": 500, "from": "BankA", "to": "BankB"});

    group.bench_function("submit", |b| {
        b.iter(|| black_box(ledger.submit(payload.clone()).unwrap()))
    });

    for size in [100usize, 10_000] {
        let ledger = LedgerService::new(LedgerConfig {
            confirmation_delay: Duration::from_secs(3600),
            ..LedgerConfig::default()
        });
        let hashes: Vec<String> = (0..size)
            .map(|i| ledger.submit(json!({"n": i})).unwrap().tx_hash.as_str().to_string())
            .collect();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("status", size), &hashes, |b, hashes| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % hashes.len();
                black_box(ledger.status(Some(&hashes[i])).unwrap())
            })
        });
        ledger.shutdown();
    }

    ledger.shutdown();
    group.finish();
}

// ============================================================================
// FT-02: Settlement
// ============================================================================

fn bench_settlement(c: &mut Criterion) {
    let mut group = c.benchmark_group("ft-02-settlement");
    let settlement = SettlementService::new(SettlementConfig::default()).unwrap();

    group.bench_function("transfer", |b| {
        b.iter(|| {
            black_box(
                settlement
                    .transfer(TransferRequest {
                        sender: "BankA".into(),
                        receiver: "BankB".into(),
                        amount: dec!(0.01),
                    })
                    .unwrap(),
            )
        })
    });

    group.finish();
}

// ============================================================================
// FT-03: Risk
// ============================================================================

fn bench_risk(c: &mut Criterion) {
    let mut group = c.benchmark_group("ft-03-risk");
    let risk = RiskService::new(RiskConfig::default(), Arc::new(FixedFraudScorer(0.4))).unwrap();
    let request = FraudCheckRequest::for_tx("bench-tx");

    group.bench_function("assess", |b| b.iter(|| black_box(risk.assess(&request))));
    group.finish();
}

criterion_group!(benches, bench_ledger, bench_settlement, bench_risk);
criterion_main!(benches);
