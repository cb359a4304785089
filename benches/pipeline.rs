//! Benchmarks for run-log parsing and windowing.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};

use ea_runlog::{
    analysis::{Metric, condense_metric, parse_log, stepify},
    schema::{LogLayout, OptimizationDirection},
};

/// Synthetic log with `runs` sections of `generations` lines each.
fn synthetic_log(runs: usize, generations: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut log = String::from("[Config Log]\n{}\n\n[Results Log]\n");

    for run in 0..runs {
        log.push_str(&format!("\n[Run {}]\n", run));
        let mut evals = 0u64;
        let mut best = 0i64;
        for _ in 0..generations {
            evals += rng.gen_range(40..60);
            best += rng.gen_range(0..3);
            let avg = best as f64 - rng.gen_range(0.0..5.0);
            log.push_str(&format!("{}\t{}\t{}\n", evals, avg, best));
        }
    }

    log
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_log");

    for runs in [1, 10, 30] {
        let log = synthetic_log(runs, 1_000);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_runs", runs)),
            &log,
            |b, log| {
                b.iter(|| parse_log(black_box(log), LogLayout::SingleObjective).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_condense(c: &mut Criterion) {
    let mut group = c.benchmark_group("condense_and_stepify");
    let set = parse_log(&synthetic_log(30, 1_000), LogLayout::SingleObjective).unwrap();

    for window in [100u64, 250, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &window| {
            b.iter(|| {
                let best = condense_metric(black_box(&set), window, Metric::BestFitness).unwrap();
                stepify(&best, OptimizationDirection::Maximize).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_condense);
criterion_main!(benches);
