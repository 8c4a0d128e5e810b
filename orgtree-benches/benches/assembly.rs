//! Hierarchy assembly benchmarks.
//!
//! Measures department and chain assembly over a prebuilt manager structure,
//! then a full session generation including structure building, statistics
//! and metrics.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
#![expect(
    clippy::excessive_nesting,
    reason = "Criterion bench_with_input + b.iter pattern requires deep nesting"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use orgtree_benches::{
    error::BenchSetupError,
    params::RosterBenchParams,
    source::{DEPARTMENT, SyntheticRosterConfig, generate_roster},
};
use orgtree_core::{
    ManagerStructure, OrgSession, Selection, assemble_chain_with, assemble_department,
};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Roster sizes to benchmark.
const EMPLOYEE_COUNTS: &[usize] = &[100, 1_000, 5_000];

/// Spans to benchmark; narrow spans give deep trees.
const SPANS: &[usize] = &[3, 10];

#[expect(
    clippy::panic_in_result_fn,
    reason = "Criterion measurement closures cannot propagate errors via Result"
)]
fn assemble_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("assemble");
    group.sample_size(20);

    for &employees in EMPLOYEE_COUNTS {
        for &span in SPANS {
            let params = RosterBenchParams { employees, span };
            let roster = generate_roster(
                &SyntheticRosterConfig::new(employees, span, SEED).with_noise(0.1, 0.05, 0.02),
            )?;
            let structure = ManagerStructure::build(&roster);
            // The first record with reports of its own sits high in the tree.
            let manager = structure
                .iter()
                .find(|entry| entry.manager().has_reporting_manager())
                .map(|entry| entry.manager().clone())
                .ok_or(BenchSetupError::Missing {
                    context: "mid-level manager",
                })?;

            group.bench_with_input(
                BenchmarkId::new("department", &params),
                &(&structure, &roster),
                |b, &(structure, roster)| {
                    b.iter(|| assemble_department(DEPARTMENT, structure, roster));
                },
            );
            group.bench_with_input(
                BenchmarkId::new("chain", &params),
                &(&manager, &structure, &roster),
                |b, &(manager, structure, roster)| {
                    b.iter(|| assemble_chain_with(manager, structure, roster));
                },
            );

            let session = OrgSession::new(roster);
            let selection = Selection::new(DEPARTMENT);
            group.bench_with_input(
                BenchmarkId::new("session", &params),
                &selection,
                |b, selection| {
                    b.iter(|| {
                        let mut fresh = session.clone();
                        if let Err(err) = fresh.generate(selection.clone()) {
                            panic!("session generation failed during benchmark: {err}");
                        }
                        fresh
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn assemble(c: &mut Criterion) {
    if let Err(err) = assemble_impl(c) {
        panic!("assemble benchmark setup failed: {err}");
    }
}

criterion_group!(benches, assemble);
criterion_main!(benches);
