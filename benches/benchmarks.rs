//! Benchmarks for commit-check.

#![allow(missing_docs)]

use commit_check::{CheckStep, Stage};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_command_rendering(c: &mut Criterion) {
    c.bench_function("command_rendering", |b| {
        b.iter(|| {
            for step in black_box(CheckStep::ALL) {
                black_box(step.command().to_string());
            }
        });
    });
}

fn benchmark_stage_plan(c: &mut Criterion) {
    c.bench_function("stage_plan", |b| {
        b.iter(|| {
            let plan: Vec<_> = black_box(Stage::ORDER)
                .iter()
                .map(|stage| (stage.check().command(), stage.output_mode()))
                .collect();
            black_box(plan)
        });
    });
}

criterion_group!(benches, benchmark_command_rendering, benchmark_stage_plan);
criterion_main!(benches);
