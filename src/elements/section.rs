//! Rectangular concrete section and its fiber discretization

use serde::{Deserialize, Serialize};

use crate::error::{ConsecError, ConsecResult};
use crate::units::mm;

/// A concrete fiber: centroid and area, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fiber {
    pub x: f64,
    pub y: f64,
    pub area: f64,
}

/// Rectangular concrete section subdivided into `nh` x `nb` fibers
///
/// The x axis runs along the height `h`, the y axis along the width `b`,
/// both through the centroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectangularSection {
    /// Concrete grade name
    pub grade: String,
    /// Height in m
    pub h: f64,
    /// Width in m
    pub b: f64,
    /// Fibers along the height
    pub nh: usize,
    /// Fibers along the width
    pub nb: usize,
}

/// Discretized section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionGeometry {
    pub fibers: Vec<Fiber>,
    /// Perimeter stations [x, y] walked around the section, zero area
    pub outline: Vec<[f64; 2]>,
    /// Σ fiber area, m²
    pub area: f64,
    /// Σ a·y², m⁴
    pub ix: f64,
    /// Σ a·x², m⁴
    pub iy: f64,
}

impl RectangularSection {
    /// Create a section from dimensions in millimetres
    ///
    /// # Arguments
    /// * `grade` - Concrete grade name, resolved against the material table later
    /// * `h` - Height in mm
    /// * `b` - Width in mm
    /// * `nh` - Number of fibers along the height
    /// * `nb` - Number of fibers along the width
    pub fn new(grade: &str, h: f64, b: f64, nh: usize, nb: usize) -> ConsecResult<Self> {
        if !(h.is_finite() && h > 0.0 && b.is_finite() && b > 0.0) {
            return Err(ConsecError::InvalidGeometry(format!(
                "section dimensions must be positive, got h={h} mm, b={b} mm"
            )));
        }
        if nh == 0 || nb == 0 {
            return Err(ConsecError::InvalidGeometry(format!(
                "section subdivisions must be at least 1, got nh={nh}, nb={nb}"
            )));
        }
        Ok(Self {
            grade: grade.to_string(),
            h: mm(h),
            b: mm(b),
            nh,
            nb,
        })
    }

    /// Subdivide into fibers; fiber `j + i*nh` is row `j` along h, column `i` along b
    pub fn discretize(&self) -> SectionGeometry {
        let dh = self.h / self.nh as f64;
        let db = self.b / self.nb as f64;
        let a = dh * db;

        let mut fibers = Vec::with_capacity(self.nh * self.nb);
        for i in 0..self.nb {
            for j in 0..self.nh {
                fibers.push(Fiber {
                    x: -self.h / 2.0 + dh * j as f64 + dh / 2.0,
                    y: -self.b / 2.0 + db * i as f64 + db / 2.0,
                    area: a,
                });
            }
        }

        let area = fibers.iter().map(|f| f.area).sum();
        let ix = fibers.iter().map(|f| f.area * f.y.powi(2)).sum();
        let iy = fibers.iter().map(|f| f.area * f.x.powi(2)).sum();

        SectionGeometry {
            fibers,
            outline: self.outline(),
            area,
            ix,
            iy,
        }
    }

    /// Perimeter stations on the fiber grid, counter-clockwise from (-h/2, -b/2)
    pub fn outline(&self) -> Vec<[f64; 2]> {
        let (hh, hb) = (self.h / 2.0, self.b / 2.0);
        let dh = self.h / self.nh as f64;
        let db = self.b / self.nb as f64;

        let mut points = Vec::with_capacity(2 * (self.nh + self.nb));
        for j in 0..=self.nh {
            points.push([-hh + dh * j as f64, -hb]);
        }
        for i in 1..self.nb {
            points.push([hh, -hb + db * i as f64]);
        }
        for j in 0..=self.nh {
            points.push([hh - dh * j as f64, hb]);
        }
        for i in 1..self.nb {
            points.push([-hh, hb - db * i as f64]);
        }
        points
    }
}
