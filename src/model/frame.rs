//! Frame section model (beam/column cross-section, 3 DOF)

use std::sync::Arc;

use log::info;
use rayon::prelude::*;

use super::{check_finite, find_combo, insert_combo, report_failures, selected_combos, steel_curves};
use crate::analysis::{secant_iterate, AnalysisOptions, BarPoint, FrameSystem, MaterialPoint};
use crate::elements::{ConcreteDiagram, MaterialTable, Rebar, RectangularSection, SteelDiagram};
use crate::error::{ConsecError, ConsecResult};
use crate::loads::{LoadCombination, SectionLoad};
use crate::math::Vec3;
use crate::results::{
    DiagramCurve, FiberResult, RebarResult, ResultantCheck, SectionResult, SectionSummary,
};
use crate::units::{kn, MN_TO_KN};

const COMPONENTS: [&str; 3] = ["N", "Mx", "My"];

/// A reinforced-concrete section with its loads
///
/// Geometry is given in mm and loads in kN / kN·m; both are converted once
/// when they enter the solver.
#[derive(Debug, Clone)]
pub struct FrameSectionModel {
    materials: Arc<MaterialTable>,
    /// Concrete section (None = bars only)
    pub section: Option<RectangularSection>,
    /// Bars in insertion order
    pub rebars: Vec<Rebar>,
    pub loads: Vec<SectionLoad>,
    pub load_combos: Vec<LoadCombination>,
}

impl FrameSectionModel {
    /// Create an empty model over a shared material table
    pub fn new(materials: Arc<MaterialTable>) -> Self {
        Self {
            materials,
            section: None,
            rebars: Vec::new(),
            loads: Vec::new(),
            load_combos: Vec::new(),
        }
    }

    /// Set the concrete section, replacing any previous one
    pub fn set_section(&mut self, section: RectangularSection) -> ConsecResult<()> {
        self.materials.concrete(&section.grade)?;
        self.section = Some(section);
        Ok(())
    }

    /// Add a reinforcing bar
    pub fn add_rebar(&mut self, bar: Rebar) -> ConsecResult<()> {
        if self.rebars.iter().any(|b| b.name == bar.name) {
            return Err(ConsecError::DuplicateName(bar.name));
        }
        self.materials.steel(&bar.grade)?;
        self.rebars.push(bar);
        Ok(())
    }

    /// Add a load to its load case
    pub fn add_load(&mut self, load: SectionLoad) {
        self.loads.push(load);
    }

    /// Add a load combination
    pub fn add_load_combo(&mut self, combo: LoadCombination) -> ConsecResult<()> {
        insert_combo(&mut self.load_combos, combo)
    }

    /// Load case names in order of first appearance
    pub fn load_cases(&self) -> Vec<String> {
        let mut cases: Vec<String> = Vec::new();
        for load in &self.loads {
            if !cases.contains(&load.case) {
                cases.push(load.case.clone());
            }
        }
        cases
    }

    /// Factored [N, Mx, My] of a combination in kN / kN·m
    pub fn factored_load(&self, combo_name: &str) -> ConsecResult<[f64; 3]> {
        let combo = find_combo(&self.load_combos, combo_name)?;
        Ok(combo.combine(self.loads.iter().map(|l| (l.case.as_str(), l.as_array()))))
    }

    /// Factored load vector in MN / MN·m
    ///
    /// # Errors
    /// `InvalidInput` when a factored component is NaN or infinite.
    pub fn load_vector(&self, combo_name: &str) -> ConsecResult<Vec3> {
        let applied = self.factored_load(combo_name)?;
        check_finite(combo_name, &COMPONENTS, &applied)?;
        let [n, mx, my] = applied;
        Ok(Vec3::new(kn(n), kn(mx), kn(my)))
    }

    fn build_system(&self, options: &AnalysisOptions) -> ConsecResult<FrameSystem> {
        let (fibers, concrete) = match &self.section {
            Some(section) => {
                let grade = self.materials.concrete(&section.grade)?;
                let diagram = ConcreteDiagram::new(
                    &section.grade,
                    grade,
                    options.tension_factor,
                    options.resistance_factor,
                )?;
                (section.discretize().fibers, Some(diagram))
            }
            None => (Vec::new(), None),
        };

        let bars = self
            .rebars
            .iter()
            .map(|bar| {
                let diagram = SteelDiagram::new(&bar.grade, self.materials.steel(&bar.grade)?)?;
                Ok(BarPoint {
                    x: bar.x,
                    y: bar.y,
                    area: bar.area(),
                    diagram,
                })
            })
            .collect::<ConsecResult<Vec<_>>>()?;

        Ok(FrameSystem::new(fibers, concrete, bars))
    }

    /// Analyze one load combination
    ///
    /// # Errors
    /// `SingularMatrix` when the section has no usable stiffness (for example
    /// no concrete and no bars), `ConvergenceFailed` or `TimeBudgetExceeded`
    /// when the iteration runs out of budget.
    pub fn analyze(&self, combo_name: &str, options: &AnalysisOptions) -> ConsecResult<SectionResult> {
        let applied = self.factored_load(combo_name)?;
        let load = self.load_vector(combo_name)?;
        let mut system = self.build_system(options)?;

        let converged = secant_iterate(&mut system, &load, options, combo_name)?;
        info!(
            "Section combination '{}' converged in {} iterations (concrete {}, kt = {}, gb3 = {})",
            combo_name,
            converged.iterations,
            self.section.as_ref().map_or("none", |s| s.grade.as_str()),
            options.tension_factor,
            options.resistance_factor
        );

        let u = converged.deformation;
        let fibers: Vec<FiberResult> = system
            .fibers()
            .iter()
            .zip(&system.concrete_state)
            .map(|(f, s)| fiber_result(f.x, f.y, f.area, s))
            .collect();
        let outline: Vec<FiberResult> = self
            .section
            .iter()
            .flat_map(|section| section.outline())
            .map(|[x, y]| fiber_result(x, y, 0.0, &system.concrete_point(&u, x, y)))
            .collect();
        let rebars: Vec<RebarResult> = self
            .rebars
            .iter()
            .zip(system.bars().iter().zip(&system.bar_state))
            .map(|(bar, (point, state))| RebarResult {
                name: bar.name.clone(),
                grade: bar.grade.clone(),
                x: point.x,
                y: point.y,
                area: point.area,
                strain: state.strain,
                stress: state.stress,
            })
            .collect();

        let recovered = system.resultants();
        let equilibrium = COMPONENTS
            .iter()
            .enumerate()
            .map(|(i, name)| ResultantCheck::new(name, applied[i], recovered[i] * MN_TO_KN))
            .collect();

        let summary = summarize(&fibers, &outline, &rebars);
        let concrete_curve = self
            .section
            .as_ref()
            .zip(system.concrete())
            .map(|(section, diagram)| DiagramCurve {
                grade: section.grade.clone(),
                points: diagram.curve(),
            });
        let grades = self.rebars.iter().map(|b| b.grade.as_str());
        let steel_curves = steel_curves(&self.materials, grades)?;
        Ok(SectionResult {
            combo: combo_name.to_string(),
            deformation: [u[0], u[1], u[2]],
            iterations: converged.iterations,
            fibers,
            outline,
            rebars,
            equilibrium,
            summary,
            concrete_curve,
            steel_curves,
        })
    }

    /// Analyze every (tag-filtered) combination independently and in parallel
    ///
    /// A failed combination is logged and returned as an `Err` next to its
    /// name; the others are unaffected.
    pub fn analyze_all(&self, options: &AnalysisOptions) -> Vec<(String, ConsecResult<SectionResult>)> {
        let results: Vec<_> = selected_combos(&self.load_combos, options)
            .par_iter()
            .map(|combo| (combo.name.clone(), self.analyze(&combo.name, options)))
            .collect();
        report_failures(&results);
        results
    }
}

fn fiber_result(x: f64, y: f64, area: f64, state: &MaterialPoint) -> FiberResult {
    FiberResult {
        x,
        y,
        area,
        strain: state.strain,
        stress: state.stress,
    }
}

fn summarize(fibers: &[FiberResult], outline: &[FiberResult], rebars: &[RebarResult]) -> SectionSummary {
    let concrete = || fibers.iter().chain(outline);
    SectionSummary {
        min_concrete_strain: extreme(concrete().map(|f| f.strain), f64::min),
        min_concrete_stress: extreme(concrete().map(|f| f.stress), f64::min),
        max_steel_strain: extreme(rebars.iter().map(|r| r.strain), f64::max),
        max_steel_stress: extreme(rebars.iter().map(|r| r.stress), f64::max),
    }
}

/// None for an empty set
fn extreme(values: impl Iterator<Item = f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    values.reduce(pick)
}
