//! # Secret-Token Benchmarks
//!
//! | Area | Operation | Why it matters |
//! |------|-----------|----------------|
//! | Authenticator | `create_viewing_key` | HMAC + seed rotation per call |
//! | Authenticator | `balance` query | constant-time check on every read |
//! | Ledger | `transfer` | staged overlay + history append |
//! | History | `transfer_history` page | index walk over a long log |
//! | Envelope | `space_pad` | runs on every execute answer |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use secret_token::algorithms::space_pad;
use secret_token::prelude::*;
use std::time::Duration;
use token_tests::harness::{addr, key, TestChain};

// ============================================================================
// AUTHENTICATOR
// ============================================================================

fn bench_viewing_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("authenticator");
    group.measurement_time(Duration::from_secs(5));

    let mut chain = TestChain::new();
    chain.onboard("alice");
    let mut rng = rand::thread_rng();

    group.bench_function("create_viewing_key", |b| {
        b.iter(|| {
            let entropy: u64 = rng.gen();
            chain
                .exec(
                    "bench",
                    HandleMsg::CreateViewingKey {
                        entropy: entropy.to_string(),
                    },
                )
                .map(|response| black_box(response.data.len()))
        })
    });

    group.bench_function("balance_query_right_key", |b| {
        b.iter(|| {
            black_box(chain.host.query(QueryMsg::Balance {
                address: addr("alice"),
                key: key("alice"),
            }))
        })
    });

    group.bench_function("balance_query_unset_key", |b| {
        b.iter(|| {
            black_box(chain.host.query(QueryMsg::Balance {
                address: addr("nobody"),
                key: key("alice"),
            }))
        })
    });

    group.finish();
}

// ============================================================================
// LEDGER
// ============================================================================

fn bench_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger");

    let mut chain = TestChain::new();
    chain.onboard("alice");
    chain.onboard("bob");
    chain
        .deposit("alice", 50_000_000)
        .expect("deposit should succeed");

    group.throughput(Throughput::Elements(1));
    group.bench_function("transfer", |b| {
        b.iter(|| black_box(chain.transfer("alice", "bob", 1).is_ok()))
    });

    group.finish();
}

// ============================================================================
// HISTORY
// ============================================================================

fn bench_history_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    for log_len in [100u32, 1_000, 5_000] {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.onboard("bob");
        chain
            .deposit("alice", u128::from(log_len))
            .expect("deposit should succeed");
        for _ in 0..log_len {
            chain
                .transfer("alice", "bob", 1)
                .expect("transfer should succeed");
        }

        group.bench_with_input(
            BenchmarkId::new("last_page_of_100", log_len),
            &log_len,
            |b, &len| {
                let last_page = (len - 1) / 100;
                b.iter(|| black_box(chain.history("bob", Some(last_page), Some(100)).len()))
            },
        );
    }

    group.finish();
}

// ============================================================================
// ENVELOPE
// ============================================================================

fn bench_padding(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope");

    for len in [32usize, 255, 257, 4_096] {
        let body = vec![b'x'; len];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("space_pad", len), &body, |b, body| {
            b.iter(|| {
                let mut padded = body.clone();
                space_pad(&mut padded, 256);
                black_box(padded.len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_viewing_keys,
    bench_transfers,
    bench_history_pages,
    bench_padding
);
criterion_main!(benches);
