//! Layered shell element model (6 DOF)

use std::sync::Arc;

use log::info;
use rayon::prelude::*;

use super::{check_finite, find_combo, insert_combo, report_failures, selected_combos, steel_curves};
use crate::analysis::{secant_iterate, AnalysisOptions, PlyPoint, ShellSystem};
use crate::elements::{ConcreteDiagram, LayeredShell, MaterialTable, Ply, SteelDiagram};
use crate::error::{ConsecError, ConsecResult};
use crate::loads::{LoadCombination, ShellLoad};
use crate::math::Vec6;
use crate::results::{DiagramCurve, LayerResult, PlyResult, ResultantCheck, ShellResult};
use crate::units::{kn, MN_TO_KN};

const COMPONENTS: [&str; 6] = ["Nxx", "Nyy", "Nxy", "Mxx", "Myy", "Mxy"];

/// A layered concrete shell with reinforcement plies and its loads
#[derive(Debug, Clone)]
pub struct ShellElementModel {
    materials: Arc<MaterialTable>,
    pub shell: Option<LayeredShell>,
    /// Plies in insertion order
    pub plies: Vec<Ply>,
    pub loads: Vec<ShellLoad>,
    pub load_combos: Vec<LoadCombination>,
}

impl ShellElementModel {
    pub fn new(materials: Arc<MaterialTable>) -> Self {
        Self {
            materials,
            shell: None,
            plies: Vec::new(),
            loads: Vec::new(),
            load_combos: Vec::new(),
        }
    }

    /// Set the concrete shell; every existing ply must lie within it
    pub fn set_shell(&mut self, shell: LayeredShell) -> ConsecResult<()> {
        self.materials.concrete(&shell.grade)?;
        if let Some(ply) = self.plies.iter().find(|p| !shell.contains(p.z)) {
            return Err(outside_shell(ply, &shell));
        }
        self.shell = Some(shell);
        Ok(())
    }

    /// Add a reinforcement ply
    pub fn add_ply(&mut self, ply: Ply) -> ConsecResult<()> {
        if self.plies.iter().any(|p| p.name == ply.name) {
            return Err(ConsecError::DuplicateName(ply.name));
        }
        self.materials.steel(&ply.grade)?;
        if let Some(shell) = &self.shell {
            if !shell.contains(ply.z) {
                return Err(outside_shell(&ply, shell));
            }
        }
        self.plies.push(ply);
        Ok(())
    }

    pub fn add_load(&mut self, load: ShellLoad) {
        self.loads.push(load);
    }

    pub fn add_load_combo(&mut self, combo: LoadCombination) -> ConsecResult<()> {
        insert_combo(&mut self.load_combos, combo)
    }

    /// Factored [Nxx, Nyy, Nxy, Mxx, Myy, Mxy] in kN/m and kN·m/m
    pub fn factored_load(&self, combo_name: &str) -> ConsecResult<[f64; 6]> {
        let combo = find_combo(&self.load_combos, combo_name)?;
        Ok(combo.combine(self.loads.iter().map(|l| (l.case.as_str(), l.as_array()))))
    }

    /// Factored load vector in MN/m and MN·m/m
    ///
    /// # Errors
    /// `InvalidInput` when a factored component is NaN or infinite.
    pub fn load_vector(&self, combo_name: &str) -> ConsecResult<Vec6> {
        let applied = self.factored_load(combo_name)?;
        check_finite(combo_name, &COMPONENTS, &applied)?;
        Ok(Vec6::from_iterator(applied.iter().map(|&v| kn(v))))
    }

    fn build_system(&self, options: &AnalysisOptions) -> ConsecResult<(ShellSystem, &LayeredShell)> {
        let shell = self.shell.as_ref().ok_or(ConsecError::MissingConcrete)?;
        let concrete = ConcreteDiagram::new(
            &shell.grade,
            self.materials.concrete(&shell.grade)?,
            options.tension_factor,
            options.resistance_factor,
        )?;
        let plies = self
            .plies
            .iter()
            .map(|ply| {
                Ok(PlyPoint {
                    z: ply.z,
                    area: ply.area(),
                    angle: ply.angle,
                    diagram: SteelDiagram::new(&ply.grade, self.materials.steel(&ply.grade)?)?,
                })
            })
            .collect::<ConsecResult<Vec<_>>>()?;
        let stations = shell.discretize().stations();
        Ok((ShellSystem::new(&stations, concrete, options.poisson, plies), shell))
    }

    /// Analyze one load combination
    pub fn analyze(&self, combo_name: &str, options: &AnalysisOptions) -> ConsecResult<ShellResult> {
        let applied = self.factored_load(combo_name)?;
        let load = self.load_vector(combo_name)?;
        let (mut system, shell) = self.build_system(options)?;

        let converged = secant_iterate(&mut system, &load, options, combo_name)?;
        info!(
            "Shell combination '{}' converged in {} iterations (concrete {}, kt = {}, gb3 = {}, nu = {})",
            combo_name,
            converged.iterations,
            shell.grade,
            options.tension_factor,
            options.resistance_factor,
            options.poisson
        );

        let layers: Vec<LayerResult> = system
            .stations
            .iter()
            .map(|s| LayerResult {
                z: s.z,
                thickness: s.thickness,
                angle: s.angle.to_degrees(),
                eps1: s.eps1,
                eps2: s.eps2,
                sigma1: s.sigma1,
                sigma2: s.sigma2,
                strain: s.strain,
                stress: s.stress,
            })
            .collect();
        let plies: Vec<PlyResult> = self
            .plies
            .iter()
            .zip(&system.ply_state)
            .zip(system.ply_stresses())
            .map(|((ply, state), stress_xy)| PlyResult {
                name: ply.name.clone(),
                grade: ply.grade.clone(),
                z: ply.z,
                angle: ply.angle.to_degrees(),
                area: ply.area(),
                strain: state.strain,
                stress: state.stress,
                stress_xy,
            })
            .collect();

        let recovered = system.resultants();
        let equilibrium = COMPONENTS
            .iter()
            .enumerate()
            .map(|(i, name)| ResultantCheck::new(name, applied[i], recovered[i] * MN_TO_KN))
            .collect();

        let strains = layers
            .iter()
            .flat_map(|l| [l.eps1, l.eps2])
            .chain(plies.iter().map(|p| p.strain));
        let strain_range = strains.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
            (lo.min(e), hi.max(e))
        });

        let concrete_curve = DiagramCurve {
            grade: shell.grade.clone(),
            points: system.concrete().curve(),
        };
        let grades = self.plies.iter().map(|p| p.grade.as_str());
        let steel_curves = steel_curves(&self.materials, grades)?;

        let u = converged.deformation;
        Ok(ShellResult {
            combo: combo_name.to_string(),
            deformation: [u[0], u[1], u[2], u[3], u[4], u[5]],
            iterations: converged.iterations,
            layers,
            plies,
            equilibrium,
            strain_range,
            concrete_curve,
            steel_curves,
        })
    }

    /// Analyze every (tag-filtered) combination independently and in parallel
    pub fn analyze_all(&self, options: &AnalysisOptions) -> Vec<(String, ConsecResult<ShellResult>)> {
        let results: Vec<_> = selected_combos(&self.load_combos, options)
            .par_iter()
            .map(|combo| (combo.name.clone(), self.analyze(&combo.name, options)))
            .collect();
        report_failures(&results);
        results
    }
}

fn outside_shell(ply: &Ply, shell: &LayeredShell) -> ConsecError {
    ConsecError::InvalidGeometry(format!(
        "ply '{}' at z = {} m lies outside the {} m shell",
        ply.name, ply.z, shell.h
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ShellElementModel {
        let mut model = ShellElementModel::new(Arc::new(MaterialTable::standard()));
        model.set_shell(LayeredShell::new("B60", 500.0, 25).unwrap()).unwrap();
        model
    }

    #[test]
    fn test_ply_outside_shell() {
        let mut m = model();
        let err = m
            .add_ply(Ply::new("1", "A500", 25.0, 5.0, 260.0, 0.0).unwrap())
            .unwrap_err();
        assert!(matches!(err, ConsecError::InvalidGeometry(_)));
        m.add_ply(Ply::new("1", "A500", 25.0, 5.0, 178.0, 0.0).unwrap()).unwrap();
        // a thinner shell would leave the ply outside
        assert!(m.set_shell(LayeredShell::new("B60", 200.0, 10).unwrap()).is_err());
    }

    #[test]
    fn test_missing_shell() {
        let mut m = ShellElementModel::new(Arc::new(MaterialTable::standard()));
        m.add_load(ShellLoad::membrane(-50.0, 0.0, 0.0, "D"));
        m.add_load_combo(LoadCombination::single("D", "D")).unwrap();
        let err = m.analyze("D", &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, ConsecError::MissingConcrete));
    }

    #[test]
    fn test_load_vector() {
        let mut m = model();
        m.add_load(ShellLoad::new(-50.0, 50.0, 0.0, 150.0, 150.0, 25.0, "D"));
        m.add_load_combo(LoadCombination::single("D", "D").with_case("L", 1.2)).unwrap();
        let f = m.load_vector("D").unwrap();
        assert!((f[3] - 0.15).abs() < 1e-12);
        assert!((f[5] - 0.025).abs() < 1e-12);
    }
}
