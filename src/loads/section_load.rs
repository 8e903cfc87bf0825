//! Loads acting on a frame section

use serde::{Deserialize, Serialize};

/// Axial force and biaxial bending on a section, tagged with its load case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionLoad {
    /// Axial force N, kN (positive = tension)
    pub n: f64,
    /// Moment about the x axis, kN·m
    pub mx: f64,
    /// Moment about the y axis, kN·m
    pub my: f64,
    /// Load case this load belongs to
    pub case: String,
}

impl SectionLoad {
    pub fn new(n: f64, mx: f64, my: f64, case: &str) -> Self {
        Self {
            n,
            mx,
            my,
            case: case.to_string(),
        }
    }

    /// Pure axial load
    pub fn axial(n: f64, case: &str) -> Self {
        Self::new(n, 0.0, 0.0, case)
    }

    /// Get the load as an array [N, Mx, My]
    pub fn as_array(&self) -> [f64; 3] {
        [self.n, self.mx, self.my]
    }
}
