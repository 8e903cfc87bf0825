//! Reinforcement plies of a shell element

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{ConsecError, ConsecResult};
use crate::units::mm;

/// A layer of parallel bars at one depth and orientation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ply {
    /// Ply name, unique within a shell
    pub name: String,
    /// Steel grade name
    pub grade: String,
    /// Bar diameter in m
    pub diameter: f64,
    /// Bars per metre of width
    pub bars_per_m: f64,
    /// Depth from the mid-surface in m (positive towards the top face)
    pub z: f64,
    /// Bar direction measured from the x axis, radians
    pub angle: f64,
}

impl Ply {
    /// Create a ply from millimetre / degree input
    ///
    /// # Arguments
    /// * `diameter` - Bar diameter in mm
    /// * `bars_per_m` - Number of bars per metre
    /// * `z` - Depth from the mid-surface in mm
    /// * `angle` - Bar direction from the x axis in degrees
    pub fn new(
        name: &str,
        grade: &str,
        diameter: f64,
        bars_per_m: f64,
        z: f64,
        angle: f64,
    ) -> ConsecResult<Self> {
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(ConsecError::InvalidGeometry(format!(
                "ply '{name}' must have a positive bar diameter, got {diameter} mm"
            )));
        }
        if !(bars_per_m.is_finite() && bars_per_m > 0.0) {
            return Err(ConsecError::InvalidGeometry(format!(
                "ply '{name}' must have a positive bar count, got {bars_per_m}"
            )));
        }
        if !(z.is_finite() && angle.is_finite()) {
            return Err(ConsecError::InvalidGeometry(format!(
                "ply '{name}' has a non-finite depth or angle"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            grade: grade.to_string(),
            diameter: mm(diameter),
            bars_per_m,
            z: mm(z),
            angle: angle.to_radians(),
        })
    }

    /// Steel area per metre width, m²/m
    pub fn area(&self) -> f64 {
        PI * self.diameter.powi(2) / 4.0 * self.bars_per_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ply_area_and_units() {
        let ply = Ply::new("0", "A500", 25.0, 5.0, 178.0, 90.0).unwrap();
        assert_relative_eq!(ply.area(), PI * 0.025_f64.powi(2) / 4.0 * 5.0, epsilon = 1e-15);
        assert_relative_eq!(ply.z, 0.178, epsilon = 1e-15);
        assert_relative_eq!(ply.angle, PI / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_ply() {
        assert!(Ply::new("0", "A500", 25.0, 0.0, 0.0, 0.0).is_err());
        assert!(Ply::new("0", "A500", -25.0, 5.0, 0.0, 0.0).is_err());
    }
}
