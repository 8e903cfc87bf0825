//! Stress-strain diagrams for concrete and reinforcing steel
//!
//! Both laws are pure functions of strain. Compression is negative.

use serde::{Deserialize, Serialize};

use super::material::{ConcreteGrade, SteelGrade};
use crate::error::{ConsecError, ConsecResult};

/// Concrete stress for a given strain (three-line design diagram)
///
/// Breakpoints, from most compressive to most tensile:
/// `eb0` plateau start, `eb1` elastic limit, `ebt1` elastic limit in tension,
/// `ebt0` tensile plateau start. `rb`/`sb1` are scaled by `k_rc` before use,
/// the elastic-limit strains are not.
///
/// Tension is enabled only when `sbt1`/`rbt` are nonzero; otherwise any
/// positive strain gives zero stress.
#[allow(clippy::too_many_arguments)]
pub fn concrete_stress(
    eps: f64,
    eb0: f64,
    eb1: f64,
    ebt1: f64,
    ebt0: f64,
    rb: f64,
    sb1: f64,
    sbt1: f64,
    rbt: f64,
    e: f64,
    k_rc: f64,
) -> f64 {
    let rb = rb * k_rc;
    let sb1 = sb1 * k_rc;

    if eps <= eb0 {
        rb
    } else if eb0 < eps && eps < eb1 {
        ((1.0 - sb1 / rb) * (eps - eb1) / (eb0 - eb1) + sb1 / rb) * rb
    } else if eb1 <= eps && eps < 0.0 {
        e * eps
    } else if eps > 0.0 && eps <= ebt1 && sbt1 != 0.0 {
        e * eps
    } else if ebt1 < eps && eps < ebt0 && rbt != 0.0 {
        ((1.0 - sbt1 / rbt) * (eps - ebt1) / (ebt0 - ebt1) + sbt1 / rbt) * rbt
    } else if eps >= ebt0 {
        rbt
    } else {
        0.0
    }
}

/// Reinforcing steel stress for a given strain (bilinear diagram)
///
/// Plateau at `rsc` at or below `esc0`, elastic between `esc0` and `es0`,
/// plateau at `rs` at or above `es0`. The ultimate strains `esc2`/`es2` only
/// bound the plotted curve.
#[allow(clippy::too_many_arguments)]
pub fn steel_stress(
    eps: f64,
    _esc2: f64,
    esc0: f64,
    es0: f64,
    _es2: f64,
    rsc: f64,
    rs: f64,
    e: f64,
) -> f64 {
    if eps <= esc0 {
        rsc
    } else if esc0 < eps && eps < es0 {
        e * eps
    } else if eps >= es0 {
        rs
    } else {
        0.0
    }
}

/// Concrete diagram for one analysis: a grade with the caller's knobs applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteDiagram {
    /// Initial modulus, MPa
    pub e: f64,
    pub eb2: f64,
    pub eb0: f64,
    pub eb1: f64,
    pub ebt1: f64,
    pub ebt0: f64,
    pub ebt2: f64,
    pub rb: f64,
    pub sb1: f64,
    pub sbt1: f64,
    pub rbt: f64,
}

impl ConcreteDiagram {
    /// Build the diagram for a grade
    ///
    /// # Arguments
    /// * `tension_factor` - kt, scales the tensile branch; 0 ignores tension
    /// * `resistance_factor` - gb3, scales the compressive branch
    pub fn new(
        grade_name: &str,
        grade: &ConcreteGrade,
        tension_factor: f64,
        resistance_factor: f64,
    ) -> ConsecResult<Self> {
        grade.validate(grade_name)?;
        if !(resistance_factor > 0.0) {
            return Err(ConsecError::InvalidInput(format!(
                "resistance factor must be positive, got {resistance_factor}"
            )));
        }
        if tension_factor < 0.0 {
            return Err(ConsecError::InvalidInput(format!(
                "tension factor must not be negative, got {tension_factor}"
            )));
        }

        let rb = grade.rb * resistance_factor;
        let sb1 = grade.rb * 0.6 * resistance_factor;
        let sbt1 = grade.rbt * 0.6 * tension_factor;
        let rbt = grade.rbt * tension_factor;
        let eb1 = sb1 / grade.e;
        let ebt1 = sbt1 / grade.e;

        if eb1 <= grade.eb0 {
            return Err(ConsecError::InvalidMaterial {
                grade: grade_name.to_string(),
                reason: format!("elastic limit {eb1:e} is beyond the plateau strain {:e}", grade.eb0),
            });
        }
        if ebt1 >= grade.ebt0 {
            return Err(ConsecError::InvalidMaterial {
                grade: grade_name.to_string(),
                reason: format!(
                    "tensile elastic limit {ebt1:e} is beyond the plateau strain {:e}",
                    grade.ebt0
                ),
            });
        }

        Ok(Self {
            e: grade.e,
            eb2: grade.eb2,
            eb0: grade.eb0,
            eb1,
            ebt1,
            ebt0: grade.ebt0,
            ebt2: grade.ebt2,
            rb,
            sb1,
            sbt1,
            rbt,
        })
    }

    /// Stress at `eps` with the transverse-cracking factor `k_rc`
    pub fn stress(&self, eps: f64, k_rc: f64) -> f64 {
        concrete_stress(
            eps, self.eb0, self.eb1, self.ebt1, self.ebt0, self.rb, self.sb1, self.sbt1, self.rbt,
            self.e, k_rc,
        )
    }

    /// Breakpoint strains from ultimate compression to ultimate tension
    pub fn breakpoints(&self) -> [f64; 6] {
        [self.eb2, self.eb0, self.eb1, self.ebt1, self.ebt0, self.ebt2]
    }

    /// (strain, stress) polyline through the breakpoints, for charting
    pub fn curve(&self) -> Vec<(f64, f64)> {
        self.breakpoints()
            .iter()
            .map(|&eps| (eps, self.stress(eps, 1.0)))
            .collect()
    }
}

/// Steel diagram for one bar or ply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelDiagram {
    pub e: f64,
    pub esc2: f64,
    pub esc0: f64,
    pub es0: f64,
    pub es2: f64,
    pub rsc: f64,
    pub rs: f64,
}

impl SteelDiagram {
    pub fn new(grade_name: &str, grade: &SteelGrade) -> ConsecResult<Self> {
        grade.validate(grade_name)?;
        Ok(Self {
            e: grade.e,
            esc2: grade.esc2,
            esc0: grade.esc0,
            es0: grade.es0,
            es2: grade.es2,
            rsc: grade.rsc,
            rs: grade.rs,
        })
    }

    pub fn stress(&self, eps: f64) -> f64 {
        steel_stress(
            eps, self.esc2, self.esc0, self.es0, self.es2, self.rsc, self.rs, self.e,
        )
    }

    pub fn breakpoints(&self) -> [f64; 4] {
        [self.esc2, self.esc0, self.es0, self.es2]
    }

    /// (strain, stress) polyline through the breakpoints, for charting
    pub fn curve(&self) -> Vec<(f64, f64)> {
        self.breakpoints()
            .iter()
            .map(|&eps| (eps, self.stress(eps)))
            .collect()
    }
}
