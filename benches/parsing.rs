//! Benchmarks for wallet numerics.
//!
//! ## Performance Targets
//!
//! | Metric                     | Target    |
//! |----------------------------|-----------|
//! | Parse of a typed amount    | < 1μs     |
//! | Parse of 1,000-char input  | < 100ms   |
//! | Full send-form validation  | < 10μs    |
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- adversarial
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wallet_numerics::decimal::parse;
use wallet_numerics::fee::{FeeEngine, RateBounds, SizeProfile};
use wallet_numerics::units::{from_satoshis, to_satoshis};

// ============================================================================
// HELPER FUNCTIONS - Deterministic input generation
// ============================================================================

/// Generate BTC amounts with eight decimals.
fn generate_amounts(count: usize, seed: u64) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let whole: u64 = rng.gen_range(0..21_000_000);
            let fraction: u64 = rng.gen_range(0..100_000_000);
            format!("{whole}.{fraction:08}")
        })
        .collect()
}

// ============================================================================
// BENCHMARK: Typical Input
// ============================================================================

fn bench_typical_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("typical_parse");

    let amounts = generate_amounts(1_000, 42);
    group.throughput(Throughput::Elements(amounts.len() as u64));

    group.bench_function("parse_1k_amounts", |b| {
        b.iter(|| {
            for amount in &amounts {
                black_box(parse(amount.as_str()));
            }
        })
    });

    group.bench_function("to_satoshis_1k_amounts", |b| {
        b.iter(|| {
            for amount in &amounts {
                black_box(to_satoshis(amount.as_str()));
            }
        })
    });

    group.bench_function("from_satoshis", |b| {
        b.iter(|| black_box(from_satoshis(black_box(2_099_999_999_999_999u64))))
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Adversarial Input
// ============================================================================
// Target: linear in input length

fn bench_adversarial_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("adversarial");
    group.measurement_time(Duration::from_secs(5));

    for len in [100usize, 1_000, 10_000] {
        let digits = "9".repeat(len);
        let pattern = "+1".repeat(len / 2);
        let fraction = format!("0.{}", "1".repeat(len));

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("digits", len), &digits, |b, input| {
            b.iter(|| black_box(parse(input.as_str())))
        });
        group.bench_with_input(BenchmarkId::new("repeated_sign", len), &pattern, |b, input| {
            b.iter(|| black_box(parse(input.as_str())))
        });
        group.bench_with_input(BenchmarkId::new("long_fraction", len), &fraction, |b, input| {
            b.iter(|| black_box(parse(input.as_str())))
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Fee Engine
// ============================================================================

fn bench_fee_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("fee_engine");
    let engine = FeeEngine::default();
    let bounds = RateBounds::default();
    let sizes = SizeProfile::default();

    group.bench_function("validate_fee_rate", |b| {
        b.iter(|| black_box(engine.validate_fee_rate(black_box("12.5"), &bounds)))
    });

    group.bench_function("calculate_transaction_fee", |b| {
        b.iter(|| {
            black_box(engine.calculate_transaction_fee(
                black_box(3u64),
                black_box(2u64),
                black_box("25"),
                &sizes,
            ))
        })
    });

    // Rate check, fee preview, then balance check: one send-form submit
    group.bench_function("send_form_validation", |b| {
        b.iter(|| {
            let rate = engine.validate_fee_rate(black_box("25"), &bounds).ok()?;
            let preview = engine
                .calculate_transaction_fee(2u64, 2u64, rate.value, &sizes)
                .ok()?;
            let amount = to_satoshis(black_box("0.015"));
            engine
                .validate_fee_with_balance(amount.as_u64(), preview.value.fee, black_box("2000000"))
                .ok()
        })
    });

    group.bench_function("validate_cpfp_fee", |b| {
        b.iter(|| black_box(engine.validate_cpfp_fee("20", "5", 200u64, 200u64)))
    });

    group.finish();
}

// ============================================================================
// BENCHMARK GROUPS
// ============================================================================

criterion_group!(
    benches,
    bench_typical_parse,
    bench_adversarial_parse,
    bench_fee_engine,
);

criterion_main!(benches);
