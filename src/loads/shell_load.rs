//! Loads acting on a shell element

use serde::{Deserialize, Serialize};

/// Membrane forces and moments per unit width, tagged with its load case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellLoad {
    /// Membrane force along x, kN/m (positive = tension)
    pub nxx: f64,
    /// Membrane force along y, kN/m
    pub nyy: f64,
    /// In-plane shear force, kN/m
    pub nxy: f64,
    /// Bending moment Mxx, kN·m/m
    pub mxx: f64,
    /// Bending moment Myy, kN·m/m
    pub myy: f64,
    /// Twisting moment Mxy, kN·m/m
    pub mxy: f64,
    /// Load case this load belongs to
    pub case: String,
}

impl ShellLoad {
    pub fn new(nxx: f64, nyy: f64, nxy: f64, mxx: f64, myy: f64, mxy: f64, case: &str) -> Self {
        Self {
            nxx,
            nyy,
            nxy,
            mxx,
            myy,
            mxy,
            case: case.to_string(),
        }
    }

    /// Membrane-only load
    pub fn membrane(nxx: f64, nyy: f64, nxy: f64, case: &str) -> Self {
        Self::new(nxx, nyy, nxy, 0.0, 0.0, 0.0, case)
    }

    /// Get the load as an array [Nxx, Nyy, Nxy, Mxx, Myy, Mxy]
    pub fn as_array(&self) -> [f64; 6] {
        [self.nxx, self.nyy, self.nxy, self.mxx, self.myy, self.mxy]
    }
}
