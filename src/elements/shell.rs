//! Layered concrete shell element

use serde::{Deserialize, Serialize};

use crate::error::{ConsecError, ConsecResult};
use crate::units::mm;

/// One concrete layer: mid-depth and thickness per unit width, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub z: f64,
    pub thickness: f64,
}

/// Concrete shell of thickness `h` split into `nh` equal layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayeredShell {
    /// Concrete grade name
    pub grade: String,
    /// Thickness in m
    pub h: f64,
    /// Number of layers
    pub nh: usize,
}

/// Discretized shell
///
/// `layers` run from the top face downwards. `faces` are the zero-thickness
/// stations at +h/2 and -h/2 used to report surface strains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellGeometry {
    pub layers: Vec<Layer>,
    pub faces: [Layer; 2],
}

impl ShellGeometry {
    /// Top face, layers, bottom face
    pub fn stations(&self) -> Vec<Layer> {
        let mut stations = Vec::with_capacity(self.layers.len() + 2);
        stations.push(self.faces[0]);
        stations.extend_from_slice(&self.layers);
        stations.push(self.faces[1]);
        stations
    }
}

impl LayeredShell {
    /// Create a shell from a thickness in millimetres
    pub fn new(grade: &str, h: f64, nh: usize) -> ConsecResult<Self> {
        if !(h.is_finite() && h > 0.0) {
            return Err(ConsecError::InvalidGeometry(format!(
                "shell thickness must be positive, got {h} mm"
            )));
        }
        if nh == 0 {
            return Err(ConsecError::InvalidGeometry(
                "shell must have at least one layer".to_string(),
            ));
        }
        Ok(Self {
            grade: grade.to_string(),
            h: mm(h),
            nh,
        })
    }

    pub fn discretize(&self) -> ShellGeometry {
        let dh = self.h / self.nh as f64;
        let layers = (0..self.nh)
            .map(|i| Layer {
                z: self.h / 2.0 - dh / 2.0 - dh * i as f64,
                thickness: dh,
            })
            .collect();
        ShellGeometry {
            layers,
            faces: [
                Layer {
                    z: self.h / 2.0,
                    thickness: 0.0,
                },
                Layer {
                    z: -self.h / 2.0,
                    thickness: 0.0,
                },
            ],
        }
    }

    /// Whether a depth lies within the concrete
    pub fn contains(&self, z: f64) -> bool {
        z.abs() <= self.h / 2.0 + 1e-12
    }
}
