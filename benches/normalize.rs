// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use noema::model::GraphModel;
use noema::normalize::normalize;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name in this file: `normalize.payload`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `small`, `medium_dense_dirty`).
// - If implementations move/deduplicate, update the wiring but do not rename
//   group or case IDs.
fn checksum_model(model: &GraphModel) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(model.rev());
    for (id, node) in model.nodes() {
        acc = acc.wrapping_mul(131).wrapping_add(id.as_str().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.label().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(u64::from(node.style().size));
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node.style().fill.len() as u64);
    }
    for edge in model.edges() {
        acc = acc.wrapping_mul(131).wrapping_add(edge.id().as_str().len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(edge.style().stroke.len() as u64);
    }
    acc
}

fn benches_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize.payload");

    for case in [
        fixtures::payload::Case::Small,
        fixtures::payload::Case::MediumDense,
        fixtures::payload::Case::LargeLongLabels,
    ] {
        let payload = fixtures::payload::fixture(case);
        group.throughput(Throughput::Elements(fixtures::payload::entity_count(
            &payload,
        )));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let (model, diagnostics) = normalize(black_box(&payload));
                black_box(checksum_model(&model).wrapping_add(diagnostics.len() as u64))
            })
        });
    }

    // Damaged variant exercises the diagnostic and repair paths.
    let payload = fixtures::payload::dirty(fixtures::payload::Case::MediumDense.params());
    group.throughput(Throughput::Elements(fixtures::payload::entity_count(
        &payload,
    )));
    group.bench_function("medium_dense_dirty", |b| {
        b.iter(|| {
            let (model, diagnostics) = normalize(black_box(&payload));
            black_box(checksum_model(&model).wrapping_add(diagnostics.len() as u64))
        })
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_normalize
}
criterion_main!(benches);
