//! Reinforcing bars of a frame section

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{ConsecError, ConsecResult};
use crate::units::mm;

/// A single reinforcing bar, treated as a point with area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rebar {
    /// Bar name, unique within a section
    pub name: String,
    /// Steel grade name
    pub grade: String,
    /// Diameter in m
    pub diameter: f64,
    /// x coordinate in m (along the section height)
    pub x: f64,
    /// y coordinate in m (along the section width)
    pub y: f64,
}

impl Rebar {
    /// Create a bar from millimetre input
    pub fn new(name: &str, grade: &str, diameter: f64, x: f64, y: f64) -> ConsecResult<Self> {
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(ConsecError::InvalidGeometry(format!(
                "bar '{name}' must have a positive diameter, got {diameter} mm"
            )));
        }
        if !(x.is_finite() && y.is_finite()) {
            return Err(ConsecError::InvalidGeometry(format!(
                "bar '{name}' has a non-finite position"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            grade: grade.to_string(),
            diameter: mm(diameter),
            x: mm(x),
            y: mm(y),
        })
    }

    /// Cross-sectional area πd²/4 in m²
    pub fn area(&self) -> f64 {
        PI * self.diameter.powi(2) / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bar_area() {
        let bar = Rebar::new("0", "A500", 28.0, 210.0, -160.0).unwrap();
        assert_relative_eq!(bar.area(), PI * 0.028_f64.powi(2) / 4.0, epsilon = 1e-15);
        assert_relative_eq!(bar.x, 0.21, epsilon = 1e-15);
        assert_relative_eq!(bar.y, -0.16, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_diameter_rejected() {
        assert!(Rebar::new("0", "A500", 0.0, 0.0, 0.0).is_err());
    }
}
