//! Normalization throughput

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rf_ingest::{AdapterConfig, AdapterRegistry};
use rf_outcome::RoundContext;
use serde_json::{Value, json};

fn cascade_payload(steps: usize) -> Value {
    let records: Vec<Value> = (0..steps)
        .map(|i| {
            json!({
                "betAmount": 1.0,
                "totalWon": (i * 5) as f64,
                "spinResult": {
                    "grid": [[1,2,3,4],[5,6,7,8],[1,2,3,4],[5,6,7,8],[1,2,3,4]],
                    "lines": [
                        { "s": 1, "mc": 3, "w": 5.0, "p": [0, 0, 0, 1, 2] },
                        { "s": 2, "mc": 5, "w": 9.0, "p": [1, 1, 1, 1, 1] }
                    ],
                    "stickyWilds": { "1,2": 1 }
                }
            })
        })
        .collect();
    json!({ "success": true, "results": { "req": { "data": records } } })
}

fn bench_normalize(c: &mut Criterion) {
    let mut registry = AdapterRegistry::new();
    registry
        .register_config(AdapterConfig::new("sticky-cascade", &["g1"]))
        .unwrap();
    let ctx = RoundContext::new("g1");

    let single = cascade_payload(1);
    let cascade = cascade_payload(8);

    c.bench_function("normalize_single_step", |b| {
        b.iter(|| registry.normalize(black_box(&single), &ctx).unwrap())
    });
    c.bench_function("normalize_eight_steps", |b| {
        b.iter(|| registry.normalize(black_box(&cascade), &ctx).unwrap())
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
