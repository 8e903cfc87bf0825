//! Result types for section and shell analysis
//!
//! Positions are in m, areas in m² (m²/m for plies), stresses in MPa.
//! Equilibrium tables are in kN and kN·m (per metre for shells).

use serde::{Deserialize, Serialize};

/// Applied against recovered value of one resultant component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultantCheck {
    /// Component label, e.g. "N" or "Mxx"
    pub component: String,
    /// Factored applied value
    pub applied: f64,
    /// Integrated from element stresses
    pub recovered: f64,
}

impl ResultantCheck {
    pub fn new(component: &str, applied: f64, recovered: f64) -> Self {
        Self {
            component: component.to_string(),
            applied,
            recovered,
        }
    }

    /// recovered - applied
    pub fn difference(&self) -> f64 {
        self.recovered - self.applied
    }
}

/// Breakpoint (strain, stress) polyline of the diagram a grade was analyzed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramCurve {
    pub grade: String,
    pub points: Vec<(f64, f64)>,
}

/// Strain and stress at a concrete fiber or outline station
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FiberResult {
    pub x: f64,
    pub y: f64,
    /// Zero for outline stations
    pub area: f64,
    pub strain: f64,
    pub stress: f64,
}

/// Strain and stress in a reinforcing bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebarResult {
    pub name: String,
    pub grade: String,
    pub x: f64,
    pub y: f64,
    pub area: f64,
    pub strain: f64,
    pub stress: f64,
}

/// Extreme values over a section; None when the section has no concrete or no bars
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Most compressive concrete strain (fibers and outline)
    pub min_concrete_strain: Option<f64>,
    /// Most compressive concrete stress
    pub min_concrete_stress: Option<f64>,
    /// Largest bar strain
    pub max_steel_strain: Option<f64>,
    /// Largest bar stress
    pub max_steel_stress: Option<f64>,
}

/// Converged state of a frame section under one combination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    pub combo: String,
    /// [ε0, κx, κy]
    pub deformation: [f64; 3],
    pub iterations: usize,
    pub fibers: Vec<FiberResult>,
    pub outline: Vec<FiberResult>,
    pub rebars: Vec<RebarResult>,
    /// N, Mx, My in kN / kN·m
    pub equilibrium: Vec<ResultantCheck>,
    pub summary: SectionSummary,
    /// Concrete diagram at the analysis kt/gb3 (None without a section)
    pub concrete_curve: Option<DiagramCurve>,
    /// One per distinct bar grade, in order of first use
    pub steel_curves: Vec<DiagramCurve>,
}

impl SectionResult {
    pub fn axial_strain(&self) -> f64 {
        self.deformation[0]
    }

    pub fn curvature_x(&self) -> f64 {
        self.deformation[1]
    }

    pub fn curvature_y(&self) -> f64 {
        self.deformation[2]
    }

    /// Largest |recovered - applied| in the equilibrium table
    pub fn max_imbalance(&self) -> f64 {
        max_imbalance(&self.equilibrium)
    }
}

/// Concrete layer or face of a shell
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayerResult {
    pub z: f64,
    /// Zero for the top and bottom faces
    pub thickness: f64,
    /// Principal direction 1 from x, degrees
    pub angle: f64,
    pub eps1: f64,
    pub eps2: f64,
    pub sigma1: f64,
    pub sigma2: f64,
    /// (εx, εy, γxy)
    pub strain: [f64; 3],
    /// (σx, σy, τxy)
    pub stress: [f64; 3],
}

/// Reinforcement ply of a shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlyResult {
    pub name: String,
    pub grade: String,
    pub z: f64,
    /// Bar direction from x, degrees
    pub angle: f64,
    /// Area per metre, m²/m
    pub area: f64,
    /// Strain along the bars
    pub strain: f64,
    /// Stress along the bars
    pub stress: f64,
    /// (σx, σy, τxy)
    pub stress_xy: [f64; 3],
}

/// Converged state of a shell element under one combination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellResult {
    pub combo: String,
    /// [εx, εy, γxy, κx, κy, κxy]
    pub deformation: [f64; 6],
    pub iterations: usize,
    /// Top face, layers from the top down, bottom face
    pub layers: Vec<LayerResult>,
    pub plies: Vec<PlyResult>,
    /// Nxx, Nyy, Nxy (kN/m) and Mxx, Myy, Mxy (kN·m/m)
    pub equilibrium: Vec<ResultantCheck>,
    /// Smallest and largest principal strain over concrete and plies
    pub strain_range: (f64, f64),
    /// Concrete diagram at the analysis kt/gb3
    pub concrete_curve: DiagramCurve,
    /// One per distinct ply grade, in order of first use
    pub steel_curves: Vec<DiagramCurve>,
}

impl ShellResult {
    /// Concrete layer nearest to depth `z`
    pub fn layer_at(&self, z: f64) -> Option<&LayerResult> {
        self.layers
            .iter()
            .filter(|l| l.thickness > 0.0)
            .min_by(|a, b| (a.z - z).abs().total_cmp(&(b.z - z).abs()))
    }

    /// Largest |recovered - applied| in the equilibrium table
    pub fn max_imbalance(&self) -> f64 {
        max_imbalance(&self.equilibrium)
    }
}

fn max_imbalance(checks: &[ResultantCheck]) -> f64 {
    checks
        .iter()
        .map(|c| c.difference().abs())
        .fold(0.0, f64::max)
}
