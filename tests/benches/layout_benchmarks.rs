//! # Negotiation Header Layout Benchmarks
//!
//! | Stage | Input | Target |
//! |-------|-------|--------|
//! | Position derivation | 1 suite, 16 levels | < 10us |
//! | Reservation index | 1000 disjoint inserts | < 1ms |
//! | Full `init` | 64 suites | < 1ms |

use criterion::{criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn layout_benches(c: &mut Criterion) {
    nego_tests::benchmarks::layout::register_benchmarks(c);
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets = layout_benches
}

criterion_main!(benches);
