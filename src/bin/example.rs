//! Consec Solver Example - column section and slab shell element

use std::sync::Arc;

use consec_solver::prelude::*;

fn section_example(materials: Arc<MaterialTable>, options: &AnalysisOptions) -> anyhow::Result<()> {
    println!("=== Section: 500 x 400 mm, B30 ===\n");

    let mut model = FrameSectionModel::new(materials);
    model.set_section(RectangularSection::new("B30", 500.0, 400.0, 10, 8)?)?;

    //   x
    //   ^   1 ---- 2 ---- 3
    //   |   |             |
    //   |   4             5
    //   |   |             |
    //   |   6 ---- 7 ---- 8
    //   +-----------------> y
    #[rustfmt::skip]
    let bars = [
        ("1", "A500", 28.0,  210.0, -160.0),
        ("2", "A400", 14.0,  210.0,    0.0),
        ("3", "A500", 28.0,  210.0,  160.0),
        ("4", "A400", 14.0,    0.0, -160.0),
        ("5", "A400", 14.0,    0.0,  160.0),
        ("6", "A500", 28.0, -210.0, -160.0),
        ("7", "A400", 14.0, -210.0,    0.0),
        ("8", "A500", 28.0, -210.0,  160.0),
    ];
    for (name, grade, d, x, y) in bars {
        model.add_rebar(Rebar::new(name, grade, d, x, y)?)?;
    }

    // N (kN), Mx, My (kN·m)
    model.add_load(SectionLoad::new(-1000.0, 160.0, 70.0, "D"));
    model.add_load(SectionLoad::new(-500.0, 160.0, 70.0, "L"));
    model.add_load_combo(LoadCombination::from_factors("1.0D+1.0L", [("D", 1.0), ("L", 1.0)]))?;
    model.add_load_combo(LoadCombination::from_factors("1.1D+1.2L", [("D", 1.1), ("L", 1.2)]))?;

    for (combo, result) in model.analyze_all(options) {
        println!("--- {} ---", combo);
        let result = match result {
            Ok(r) => r,
            Err(e) => {
                println!("  failed: {}\n", e);
                continue;
            }
        };
        println!("  Iterations: {}", result.iterations);
        println!(
            "  e0 = {:.6e}, kx = {:.6e} 1/m, ky = {:.6e} 1/m",
            result.axial_strain(),
            result.curvature_x(),
            result.curvature_y()
        );

        println!("  Bars:");
        for bar in &result.rebars {
            println!(
                "    {} ({}): eps = {:.6}, sigma = {:.2} MPa",
                bar.name, bar.grade, bar.strain, bar.stress
            );
        }

        let s = result.summary;
        println!(
            "  Concrete min: eps = {}, sigma = {} MPa",
            optional(s.min_concrete_strain, 6),
            optional(s.min_concrete_stress, 2)
        );
        println!(
            "  Steel max:    eps = {}, sigma = {} MPa",
            optional(s.max_steel_strain, 6),
            optional(s.max_steel_stress, 2)
        );
        for curve in result.concrete_curve.iter().chain(&result.steel_curves) {
            print_curve(curve);
        }

        println!("  Equilibrium:");
        for check in &result.equilibrium {
            println!(
                "    {:>3}: applied {:>10.3}, recovered {:>10.3}",
                check.component, check.applied, check.recovered
            );
        }
        println!();
    }
    Ok(())
}

fn shell_example(materials: Arc<MaterialTable>, options: &AnalysisOptions) -> anyhow::Result<()> {
    println!("=== Shell: 500 mm, B60, 25 layers ===\n");

    let mut model = ShellElementModel::new(materials);
    model.set_shell(LayeredShell::new("B60", 500.0, 25)?)?;

    #[rustfmt::skip]
    let plies = [
        ("1", 178.0,  0.0),
        ("2", 153.0, 90.0),
        ("3", -153.0, 90.0),
        ("4", -178.0,  0.0),
    ];
    for (name, z, angle) in plies {
        model.add_ply(Ply::new(name, "A500", 25.0, 5.0, z, angle)?)?;
    }

    // Nxx, Nyy, Nxy (kN/m), Mxx, Myy, Mxy (kN·m/m)
    model.add_load(ShellLoad::new(-50.0, 50.0, 0.0, 150.0, 150.0, 25.0, "D"));
    model.add_load(ShellLoad::new(-50.0, 50.0, 0.0, 150.0, 150.0, 25.0, "L"));
    model.add_load_combo(LoadCombination::from_factors("1.0D+1.0L", [("D", 1.0), ("L", 1.0)]))?;

    let options = options.clone().with_poisson(0.2);
    let result = match model.analyze("1.0D+1.0L", &options) {
        Ok(r) => r,
        Err(e) => {
            println!("  failed ({:?}): {}", e.kind(), e);
            return Ok(());
        }
    };

    println!("  Iterations: {}", result.iterations);
    let u: Vec<String> = result.deformation.iter().map(|v| format!("{:.6e}", v)).collect();
    println!("  u = [{}]", u.join(", "));
    println!("  Layers:");
    for layer in &result.layers {
        println!(
            "    z = {:>7.4} m: eps1 = {:>10.6}, eps2 = {:>10.6}, theta = {:>7.2} deg, sx = {:>7.2}, sy = {:>7.2}, txy = {:>7.2}",
            layer.z, layer.eps1, layer.eps2, layer.angle, layer.stress[0], layer.stress[1], layer.stress[2]
        );
    }
    println!("  Plies:");
    for ply in &result.plies {
        println!(
            "    {} at z = {:.3} m, {:.0} deg: eps = {:.6}, sigma = {:.2} MPa",
            ply.name, ply.z, ply.angle, ply.strain, ply.stress
        );
    }
    println!("  Strain range: {:.6} .. {:.6}", result.strain_range.0, result.strain_range.1);
    for curve in std::iter::once(&result.concrete_curve).chain(&result.steel_curves) {
        print_curve(curve);
    }
    println!("  Equilibrium:");
    for check in &result.equilibrium {
        println!(
            "    {:>3}: applied {:>9.3}, recovered {:>9.3}",
            check.component, check.applied, check.recovered
        );
    }
    Ok(())
}

fn print_curve(curve: &DiagramCurve) {
    let points: Vec<String> = curve
        .points
        .iter()
        .map(|(eps, sigma)| format!("({eps:.5}, {sigma:.1})"))
        .collect();
    println!("  Diagram {}: {}", curve.grade, points.join(" "));
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // CONSEC_MATERIALS points at a JSON material table replacing the standard grades
    let materials = match std::env::var_os("CONSEC_MATERIALS") {
        Some(path) => MaterialTable::from_json_file(path)?,
        None => MaterialTable::standard(),
    };
    let materials = Arc::new(materials);
    let options = AnalysisOptions::default();

    section_example(materials.clone(), &options)?;
    shell_example(materials, &options)?;

    println!("\n=== Analysis Complete ===");
    Ok(())
}
