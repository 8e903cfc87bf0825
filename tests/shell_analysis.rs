use std::sync::Arc;

use approx::assert_relative_eq;
use consec_solver::analysis::{
    cracking_factor, secant_iterate, PlyPoint, SecantSystem, ShellSystem, CRACKING_STRAIN,
};
use consec_solver::math::{solve_linear_system, Vec6};
use consec_solver::prelude::*;

const PLY_AREA: f64 = std::f64::consts::PI * 0.025 * 0.025 / 4.0 * 5.0;

fn plate(h: f64, layers: usize) -> ShellElementModel {
    let mut model = ShellElementModel::new(Arc::new(MaterialTable::standard()));
    model.set_shell(LayeredShell::new("B60", h, layers).unwrap()).unwrap();
    model
}

fn slab() -> ShellElementModel {
    let mut model = plate(500.0, 25);
    for (name, z, angle) in [("1", 178.0, 0.0), ("2", 153.0, 90.0), ("3", -153.0, 90.0), ("4", -178.0, 0.0)] {
        model.add_ply(Ply::new(name, "A500", 25.0, 5.0, z, angle).unwrap()).unwrap();
    }
    model
}

fn with_load(mut model: ShellElementModel, load: [f64; 6]) -> ShellElementModel {
    let [nxx, nyy, nxy, mxx, myy, mxy] = load;
    model.add_load(ShellLoad::new(nxx, nyy, nxy, mxx, myy, mxy, "D"));
    model.add_load_combo(LoadCombination::single("D", "D")).unwrap();
    model
}

#[test]
fn test_zero_load_gives_zero_state() {
    let model = with_load(slab(), [0.0; 6]);
    let result = model.analyze("D", &AnalysisOptions::default()).unwrap();
    assert_eq!(result.iterations, 1);
    assert_eq!(result.deformation, [0.0; 6]);
    assert!(result.layers.iter().all(|l| l.stress == [0.0; 3]));
    assert!(result.plies.iter().all(|p| p.stress == 0.0));
    assert_eq!(result.strain_range, (0.0, 0.0));
}

#[test]
fn test_elastic_membrane_with_poisson() {
    let model = with_load(plate(200.0, 10), [-100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let options = AnalysisOptions::default()
        .with_tension_factor(1.0)
        .with_poisson(0.2);
    let result = model.analyze("D", &options).unwrap();
    assert_eq!(result.iterations, 1);

    let eh = 39500.0 * 0.2;
    assert_relative_eq!(result.deformation[0], -0.1 / eh, max_relative = 1e-9);
    assert_relative_eq!(result.deformation[1], 0.2 * 0.1 / eh, max_relative = 1e-9);
    assert!(result.deformation[3].abs() < 1e-15);

    for layer in result.layers.iter().filter(|l| l.thickness > 0.0) {
        assert_relative_eq!(layer.stress[0], -0.1 / 0.2, max_relative = 1e-9);
        assert!(layer.stress[1].abs() < 1e-9);
    }
    assert!(result.max_imbalance() < 1e-6);
}

#[test]
fn test_pure_bending_about_mid_surface() {
    let model = with_load(slab(), [0.0, 0.0, 0.0, 10.0, 0.0, 0.0]);
    let result = model
        .analyze("D", &AnalysisOptions::default().with_tension_factor(1.0))
        .unwrap();
    assert_eq!(result.iterations, 1);

    let kx = result.deformation[3];
    assert!(kx > 0.0);
    assert!(result.deformation[0].abs() < 1e-12);

    let mid = result.layer_at(0.0).unwrap();
    assert!(mid.z.abs() < 1e-12);
    assert!(mid.strain[0].abs() < 1e-12);

    let top = result.layers.iter().find(|l| l.thickness > 0.0).unwrap();
    let bottom = result.layers.iter().rev().find(|l| l.thickness > 0.0).unwrap();
    assert!(top.stress[0] > 0.0);
    assert!(bottom.stress[0] < 0.0);
    assert_relative_eq!(top.stress[0], -bottom.stress[0], max_relative = 1e-9);
}

#[test]
fn test_cracked_slab_equilibrium() {
    let model = with_load(slab(), [-50.0, 50.0, 0.0, 100.0, 100.0, 20.0]);
    let options = AnalysisOptions::default().with_tolerance(1e-10);
    let result = model.analyze("D", &options).unwrap();
    assert!(result.iterations > 1);
    assert!(result.max_imbalance() < 0.1, "{:?}", result.equilibrium);

    // positive moments put the top plies in tension
    let top = result.plies.iter().find(|p| p.name == "1").unwrap();
    assert!(top.stress > 0.0);
    assert!(result.strain_range.1 >= top.strain);
    assert_eq!(result.layers.len(), 27);
}

#[test]
fn test_faces_follow_plane_strain() {
    let model = with_load(slab(), [-50.0, 50.0, 0.0, 100.0, 100.0, 20.0]);
    let result = model.analyze("D", &AnalysisOptions::default()).unwrap();
    let u = result.deformation;
    let top = result.layers[0];
    assert_eq!(top.thickness, 0.0);
    assert_relative_eq!(top.z, 0.25);
    assert_relative_eq!(top.strain[0], u[0] + 0.25 * u[3], epsilon = 1e-15);
    assert_relative_eq!(top.strain[2], u[2] + 0.25 * u[5], epsilon = 1e-15);
}

#[test]
fn test_iteration_cap() {
    let model = with_load(slab(), [-50.0, 50.0, 0.0, 100.0, 100.0, 20.0]);
    let err = model
        .analyze("D", &AnalysisOptions::default().with_max_iter(1))
        .unwrap_err();
    assert!(matches!(err, ConsecError::ConvergenceFailed { iterations: 1, .. }));
}

#[test]
fn test_unreinforced_slab_in_tension_is_singular() {
    let model = with_load(plate(200.0, 10), [100.0, 100.0, 0.0, 0.0, 0.0, 0.0]);
    let err = model.analyze("D", &AnalysisOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SingularSystem);
}

#[test]
fn test_ply_angles_reported_in_degrees() {
    let model = with_load(slab(), [0.0, 0.0, 0.0, 10.0, 10.0, 0.0]);
    let result = model
        .analyze("D", &AnalysisOptions::default().with_tension_factor(1.0))
        .unwrap();
    let angles: Vec<f64> = result.plies.iter().map(|p| p.angle).collect();
    assert_relative_eq!(angles[1], 90.0, epsilon = 1e-12);
    assert_eq!(angles[0], 0.0);
    // 90 degree ply stresses act along y
    let p = &result.plies[1];
    assert_relative_eq!(p.stress_xy[1], p.stress, max_relative = 1e-12);
}

#[test]
fn test_unknown_grade() {
    let mut model = ShellElementModel::new(Arc::new(MaterialTable::standard()));
    let err = model
        .set_shell(LayeredShell::new("B999", 200.0, 10).unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputRange);
}

#[test]
fn test_inclined_plies_hold_equilibrium() {
    let mut model = plate(500.0, 25);
    for (name, z, angle) in [("1", 178.0, 45.0), ("2", 153.0, -30.0), ("3", -153.0, 45.0), ("4", -178.0, -30.0)] {
        model.add_ply(Ply::new(name, "A500", 25.0, 5.0, z, angle).unwrap()).unwrap();
    }
    let model = with_load(model, [-50.0, 50.0, 30.0, 150.0, 150.0, 25.0]);
    let options = AnalysisOptions::default()
        .with_tension_factor(1.0)
        .with_tolerance(1e-10);
    let result = model.analyze("D", &options).unwrap();
    assert!(result.iterations > 1);
    assert!(result.max_imbalance() < 0.1, "{:?}", result.equilibrium);

    // bar strain is the engineering-strain projection on the bar direction
    let u = result.deformation;
    for ply in &result.plies {
        let (s, c) = ply.angle.to_radians().sin_cos();
        let exx = u[0] + ply.z * u[3];
        let eyy = u[1] + ply.z * u[4];
        let gxy = u[2] + ply.z * u[5];
        assert_relative_eq!(ply.strain, c * c * exx + s * s * eyy + s * c * gxy, epsilon = 1e-15);
        assert_relative_eq!(ply.stress_xy[2], s * c * ply.stress, epsilon = 1e-9);
    }
    let top = result.plies.iter().find(|p| p.name == "1").unwrap();
    assert!(top.stress > 0.0);
}

#[test]
fn test_converged_shell_is_a_fixed_point() {
    let table = MaterialTable::standard();
    let concrete = ConcreteDiagram::new("B60", table.concrete("B60").unwrap(), 0.0, 1.0).unwrap();
    let steel = SteelDiagram::new("A500", table.steel("A500").unwrap()).unwrap();
    let stations = LayeredShell::new("B60", 500.0, 25).unwrap().discretize().stations();
    let plies = [(0.178, 0.0), (0.153, 90.0), (-0.153, 90.0), (-0.178, 0.0)]
        .iter()
        .map(|&(z, angle): &(f64, f64)| PlyPoint {
            z,
            area: PLY_AREA,
            angle: angle.to_radians(),
            diagram: steel,
        })
        .collect();
    let mut system = ShellSystem::new(&stations, concrete, 0.0, plies);

    let load = Vec6::from_column_slice(&[-0.05, 0.05, 0.0, 0.1, 0.1, 0.02]);
    let tol = 1e-10;
    let options = AnalysisOptions::default().with_tolerance(tol);
    let converged = secant_iterate(&mut system, &load, &options, "D").unwrap();
    assert!(converged.iterations > 1);

    let resolved = solve_linear_system(&system.assemble(), &load).unwrap();
    assert!((resolved - converged.deformation).amax() <= 10.0 * tol);
}

#[test]
fn test_cracked_concrete_is_softened() {
    // x is carried by the bars alone, stretched past the cracking strain;
    // y is pushed past the elastic limit of the concrete
    let model = with_load(slab(), [2050.0, -12000.0, 0.0, 0.0, 0.0, 0.0]);
    let options = AnalysisOptions::default().with_tolerance(1e-10);
    let result = model.analyze("D", &options).unwrap();
    assert!(result.max_imbalance() < 0.1, "{:?}", result.equilibrium);

    let table = MaterialTable::standard();
    let diagram = ConcreteDiagram::new("B60", table.concrete("B60").unwrap(), 0.0, 1.0).unwrap();
    let cracked: Vec<&LayerResult> = result
        .layers
        .iter()
        .filter(|l| l.thickness > 0.0 && l.eps1 > CRACKING_STRAIN)
        .collect();
    assert_eq!(cracked.len(), 25);
    for layer in cracked {
        let k_rc = cracking_factor(layer.eps1);
        assert!(k_rc < 1.0);
        assert!(layer.eps2 < diagram.eb1);
        assert_relative_eq!(layer.sigma2, diagram.stress(layer.eps2, k_rc), epsilon = 1e-12);
        assert!(layer.sigma2 > diagram.stress(layer.eps2, 1.0));
    }
}

#[test]
fn test_diagram_curves_follow_analysis_knobs() {
    let model = with_load(slab(), [0.0, 0.0, 0.0, 10.0, 0.0, 0.0]);
    let result = model
        .analyze("D", &AnalysisOptions::default().with_tension_factor(1.0))
        .unwrap();
    assert_eq!(result.concrete_curve.grade, "B60");
    let tension = result.concrete_curve.points[5];
    assert_eq!(tension, (0.00015, 1.8));
    assert_eq!(result.steel_curves.len(), 1);
    assert_eq!(result.steel_curves[0].grade, "A500");
    assert_eq!(result.steel_curves[0].points[2].1, 435.0);
}

#[test]
fn test_non_finite_load_is_rejected() {
    let model = with_load(slab(), [0.0, 0.0, f64::NAN, 10.0, 0.0, 0.0]);
    let err = model.analyze("D", &AnalysisOptions::default()).unwrap_err();
    assert!(matches!(err, ConsecError::InvalidInput(_)));
}
