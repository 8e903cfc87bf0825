//! Section and shell models: geometry, reinforcement, loads and combinations

mod frame;
mod shell;

pub use frame::FrameSectionModel;
pub use shell::ShellElementModel;

use log::warn;

use crate::analysis::AnalysisOptions;
use crate::elements::{MaterialTable, SteelDiagram};
use crate::error::{ConsecError, ConsecResult};
use crate::loads::LoadCombination;
use crate::results::DiagramCurve;

/// Combinations selected by the tag filter of `options`, in insertion order
fn selected_combos<'a>(
    combos: &'a [LoadCombination],
    options: &AnalysisOptions,
) -> Vec<&'a LoadCombination> {
    combos
        .iter()
        .filter(|c| match &options.combo_tags {
            Some(tags) => c.has_any_tag(tags),
            None => true,
        })
        .collect()
}

fn find_combo<'a>(combos: &'a [LoadCombination], name: &str) -> ConsecResult<&'a LoadCombination> {
    combos
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| ConsecError::LoadCombinationNotFound(name.to_string()))
}

fn insert_combo(combos: &mut Vec<LoadCombination>, combo: LoadCombination) -> ConsecResult<()> {
    if combos.iter().any(|c| c.name == combo.name) {
        return Err(ConsecError::DuplicateName(combo.name));
    }
    combos.push(combo);
    Ok(())
}

/// Log every failed combination of a batch run
fn report_failures<T>(results: &[(String, ConsecResult<T>)]) {
    for (combo, result) in results {
        if let Err(e) = result {
            warn!("Skipping combination '{combo}': {e}");
        }
    }
}

/// Steel diagram curves, one per distinct grade in order of first use
fn steel_curves<'a>(
    materials: &MaterialTable,
    grades: impl IntoIterator<Item = &'a str>,
) -> ConsecResult<Vec<DiagramCurve>> {
    let mut curves: Vec<DiagramCurve> = Vec::new();
    for grade in grades {
        if curves.iter().any(|c| c.grade == grade) {
            continue;
        }
        let diagram = SteelDiagram::new(grade, materials.steel(grade)?)?;
        curves.push(DiagramCurve {
            grade: grade.to_string(),
            points: diagram.curve(),
        });
    }
    Ok(curves)
}

/// Reject NaN and infinite load components before they reach the solver
fn check_finite(combo: &str, components: &[&str], values: &[f64]) -> ConsecResult<()> {
    match components.iter().zip(values).find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(ConsecError::InvalidInput(format!(
            "combination '{combo}' has a non-finite {name} = {v}"
        ))),
        None => Ok(()),
    }
}
