//! Secant system of a reinforced-concrete frame section (3 DOF)

use serde::{Deserialize, Serialize};

use super::{secant_factor, SecantSystem};
use crate::elements::{ConcreteDiagram, Fiber, SteelDiagram};
use crate::math::{point_stiffness, Mat3, Vec3};

/// Strain, stress and secant factor of one material point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPoint {
    pub strain: f64,
    pub stress: f64,
    pub secant: f64,
}

impl Default for MaterialPoint {
    fn default() -> Self {
        Self {
            strain: 0.0,
            stress: 0.0,
            secant: 1.0,
        }
    }
}

/// A reinforcing bar as a zero-size point
#[derive(Debug, Clone, Copy)]
pub struct BarPoint {
    pub x: f64,
    pub y: f64,
    pub area: f64,
    pub diagram: SteelDiagram,
}

/// Concrete fibers and bars of one section under one combination
#[derive(Debug, Clone)]
pub struct FrameSystem {
    fibers: Vec<Fiber>,
    concrete: Option<ConcreteDiagram>,
    bars: Vec<BarPoint>,
    pub concrete_state: Vec<MaterialPoint>,
    pub bar_state: Vec<MaterialPoint>,
}

/// Plane-section strain at (x, y)
#[inline]
pub fn section_strain(u: &Vec3, x: f64, y: f64) -> f64 {
    u[0] + u[1] * x + u[2] * y
}

impl FrameSystem {
    /// Build a system with every secant factor at 1.0
    ///
    /// `concrete` is `None` for a section made of bars only.
    pub fn new(fibers: Vec<Fiber>, concrete: Option<ConcreteDiagram>, bars: Vec<BarPoint>) -> Self {
        let fibers = if concrete.is_some() { fibers } else { Vec::new() };
        Self {
            concrete_state: vec![MaterialPoint::default(); fibers.len()],
            bar_state: vec![MaterialPoint::default(); bars.len()],
            fibers,
            concrete,
            bars,
        }
    }

    pub fn fibers(&self) -> &[Fiber] {
        &self.fibers
    }

    pub fn bars(&self) -> &[BarPoint] {
        &self.bars
    }

    pub fn concrete(&self) -> Option<&ConcreteDiagram> {
        self.concrete.as_ref()
    }

    /// Strain and stress at an arbitrary point of the concrete, e.g. an outline station
    pub fn concrete_point(&self, u: &Vec3, x: f64, y: f64) -> MaterialPoint {
        let strain = section_strain(u, x, y);
        match &self.concrete {
            Some(diagram) => {
                let stress = diagram.stress(strain, 1.0);
                MaterialPoint {
                    strain,
                    stress,
                    secant: secant_factor(stress, diagram.e, strain),
                }
            }
            None => MaterialPoint {
                strain,
                ..MaterialPoint::default()
            },
        }
    }

    /// Σσa, Σσa·x, Σσa·y over fibers and bars, in MN / MN·m
    pub fn resultants(&self) -> [f64; 3] {
        let mut r = [0.0; 3];
        let fibers = self.fibers.iter().map(|f| (f.x, f.y, f.area));
        let bars = self.bars.iter().map(|b| (b.x, b.y, b.area));
        let states = self.concrete_state.iter().chain(&self.bar_state);
        for ((x, y, a), state) in fibers.chain(bars).zip(states) {
            let force = state.stress * a;
            r[0] += force;
            r[1] += force * x;
            r[2] += force * y;
        }
        r
    }
}

impl SecantSystem<3> for FrameSystem {
    fn assemble(&mut self) -> Mat3 {
        let mut d = Mat3::zeros();
        if let Some(concrete) = &self.concrete {
            for (fiber, state) in self.fibers.iter().zip(&self.concrete_state) {
                d += point_stiffness(fiber.area, fiber.x, fiber.y, concrete.e, state.secant);
            }
        }
        for (bar, state) in self.bars.iter().zip(&self.bar_state) {
            d += point_stiffness(bar.area, bar.x, bar.y, bar.diagram.e, state.secant);
        }
        d
    }

    fn update(&mut self, u: &Vec3) {
        if let Some(concrete) = &self.concrete {
            for (fiber, state) in self.fibers.iter().zip(self.concrete_state.iter_mut()) {
                let strain = section_strain(u, fiber.x, fiber.y);
                let stress = concrete.stress(strain, 1.0);
                *state = MaterialPoint {
                    strain,
                    stress,
                    secant: secant_factor(stress, concrete.e, strain),
                };
            }
        }
        for (bar, state) in self.bars.iter().zip(self.bar_state.iter_mut()) {
            let strain = section_strain(u, bar.x, bar.y);
            let stress = bar.diagram.stress(strain);
            *state = MaterialPoint {
                strain,
                stress,
                secant: secant_factor(stress, bar.diagram.e, strain),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{MaterialTable, RectangularSection};
    use approx::assert_relative_eq;

    fn system() -> FrameSystem {
        let table = MaterialTable::standard();
        let concrete =
            ConcreteDiagram::new("B30", table.concrete("B30").unwrap(), 0.0, 1.0).unwrap();
        let steel = SteelDiagram::new("A400", table.steel("A400").unwrap()).unwrap();
        let geometry = RectangularSection::new("B30", 400.0, 400.0, 8, 8)
            .unwrap()
            .discretize();
        let bars = [(-0.15, -0.15), (0.15, -0.15), (0.15, 0.15), (-0.15, 0.15)]
            .iter()
            .map(|&(x, y)| BarPoint {
                x,
                y,
                area: 3e-4,
                diagram: steel,
            })
            .collect();
        FrameSystem::new(geometry.fibers, Some(concrete), bars)
    }

    #[test]
    fn test_elastic_stiffness_is_symmetric() {
        let mut s = system();
        let d = s.assemble();
        assert_relative_eq!(d, d.transpose(), epsilon = 1e-9);
        // doubly symmetric section: no coupling between axial and bending
        assert!(d[(0, 1)].abs() < 1e-9 && d[(0, 2)].abs() < 1e-9);
    }

    #[test]
    fn test_update_recovers_plane_strain() {
        let mut s = system();
        let u = Vec3::new(-0.0005, 0.001, 0.0);
        s.update(&u);
        for (fiber, state) in s.fibers().iter().zip(&s.concrete_state) {
            assert_relative_eq!(state.strain, -0.0005 + 0.001 * fiber.x, epsilon = 1e-15);
            if state.strain > 0.0 {
                // tension ignored
                assert_eq!(state.secant, 0.0);
            }
        }
    }

    #[test]
    fn test_softened_fibers_reduce_stiffness() {
        let mut s = system();
        let elastic = s.assemble()[(0, 0)];
        s.update(&Vec3::new(-0.0015, 0.0, 0.0));
        let softened = s.assemble()[(0, 0)];
        assert!(softened < elastic);
    }
}
