//! Benchmarks for the section and shell solvers

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use consec_solver::prelude::*;

fn create_column_model(n: usize) -> FrameSectionModel {
    let mut model = FrameSectionModel::new(Arc::new(MaterialTable::standard()));
    model
        .set_section(RectangularSection::new("B30", 500.0, 400.0, n, n).unwrap())
        .unwrap();
    for (i, (x, y)) in [(210.0, -160.0), (210.0, 160.0), (-210.0, -160.0), (-210.0, 160.0)]
        .into_iter()
        .enumerate()
    {
        model
            .add_rebar(Rebar::new(&format!("B{}", i + 1), "A500", 28.0, x, y).unwrap())
            .unwrap();
    }
    model.add_load(SectionLoad::new(-1500.0, 320.0, 140.0, "D"));
    model.add_load_combo(LoadCombination::single("D", "D")).unwrap();
    model
}

fn create_slab_model(layers: usize) -> ShellElementModel {
    let mut model = ShellElementModel::new(Arc::new(MaterialTable::standard()));
    model.set_shell(LayeredShell::new("B60", 500.0, layers).unwrap()).unwrap();
    for (name, z, angle) in [("1", 178.0, 0.0), ("2", 153.0, 90.0), ("3", -153.0, 90.0), ("4", -178.0, 0.0)] {
        model.add_ply(Ply::new(name, "A500", 25.0, 5.0, z, angle).unwrap()).unwrap();
    }
    model.add_load(ShellLoad::new(-100.0, 100.0, 0.0, 300.0, 300.0, 50.0, "D"));
    model.add_load_combo(LoadCombination::single("D", "D")).unwrap();
    model
}

fn bench_section(c: &mut Criterion) {
    let options = AnalysisOptions::default();
    let coarse = create_column_model(10);
    let fine = create_column_model(50);

    c.bench_function("section 10x10 fibers", |b| {
        b.iter(|| black_box(coarse.analyze("D", &options)))
    });
    c.bench_function("section 50x50 fibers", |b| {
        b.iter(|| black_box(fine.analyze("D", &options)))
    });
}

fn bench_shell(c: &mut Criterion) {
    let options = AnalysisOptions::default().with_poisson(0.2);
    let model = create_slab_model(25);

    c.bench_function("shell 25 layers", |b| {
        b.iter(|| black_box(model.analyze("D", &options)))
    });
}

criterion_group!(benches, bench_section, bench_shell);
criterion_main!(benches);
