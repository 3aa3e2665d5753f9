//! Performance measurement for combination expansion at varying axis sizes

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dropforge::collection::combination::{self, BuildPlan, OptionalAxis, VariableAxis};
use dropforge::collection::design::Design;
use dropforge::collection::rarity::{RarityTable, RarityVariation};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;
use std::path::PathBuf;

fn build_plan(variants_per_axis: usize) -> BuildPlan {
    let axis = |name: &str| VariableAxis {
        name: name.to_string(),
        variants: (0..variants_per_axis)
            .map(|index| {
                (
                    format!("variant-{index}"),
                    PathBuf::from(format!("{name}-{index}.png")),
                )
            })
            .collect(),
    };

    BuildPlan {
        variable: vec![axis("background"), axis("body"), axis("eyes")],
        statics: vec![("frame".to_string(), PathBuf::from("frame.png"))],
        optional: vec![OptionalAxis {
            name: "hat".to_string(),
            table: RarityTable::new(vec![
                RarityVariation {
                    threshold: 0.1,
                    suffix: "-rare".to_string(),
                    layer: PathBuf::from("rare.png"),
                },
                RarityVariation {
                    threshold: 0.8,
                    suffix: "-common".to_string(),
                    layer: PathBuf::from("common.png"),
                },
            ]),
            bundled: vec![],
        }],
    }
}

/// Measures expansion cost as the per-axis variant count grows
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for variants in &[2usize, 4, 8] {
        let plan = build_plan(*variants);
        group.bench_with_input(BenchmarkId::from_parameter(variants), variants, |b, _| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(12345);
                black_box(combination::generate(black_box(&plan), &mut rng))
            });
        });
    }

    group.finish();
}

/// Measures design mapping over a generated collection
fn bench_design_mapping(c: &mut Criterion) {
    let plan = build_plan(6);
    let mut rng = StdRng::seed_from_u64(12345);
    let combinations = combination::generate(&plan, &mut rng);

    let design = Design::new(
        ["static.frame", "variable.background", "variable.body", "variable.eyes", "optional.hat"]
            .iter()
            .filter_map(|id| dropforge::collection::combination::CategoryId::parse(id))
            .collect(),
    );

    c.bench_function("design_mapping", |b| {
        b.iter(|| {
            for item in &combinations {
                black_box(design.apply(black_box(item)));
            }
        });
    });
}

criterion_group!(benches, bench_generate, bench_design_mapping);
criterion_main!(benches);
