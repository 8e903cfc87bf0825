//! Secant system of a layered reinforced-concrete shell (6 DOF)
//!
//! Concrete stations are evaluated along their principal strain directions
//! with Poisson-decoupled strains, plies along their bar direction only.

use serde::{Deserialize, Serialize};

use super::frame::MaterialPoint;
use super::{secant_factor, SecantSystem};
use crate::elements::{ConcreteDiagram, Layer, SteelDiagram};
use crate::math::laminate::accumulate_abd;
use crate::math::{
    concrete_layer_stiffness, directional_strain, global_layer_stiffness, ply_stiffness,
    principal_strains, principal_to_global, Mat6, Vec6,
};

/// Principal strain above which transverse cracking softens concrete
pub const CRACKING_STRAIN: f64 = 0.002;

/// Transverse-cracking reduction k_rc for a major principal strain
pub fn cracking_factor(eps1: f64) -> f64 {
    if eps1 > CRACKING_STRAIN {
        1.0 / (0.8 + 100.0 * eps1)
    } else {
        1.0
    }
}

/// In-plane strains (εx, εy, γxy) at depth `z`
#[inline]
pub fn layer_strains(u: &Vec6, z: f64) -> [f64; 3] {
    [u[0] + z * u[3], u[1] + z * u[4], u[2] + z * u[5]]
}

/// State of one concrete station (a layer or a zero-thickness face)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteStation {
    pub z: f64,
    pub thickness: f64,
    /// Poisson ratio along direction 1
    pub nu01: f64,
    /// Poisson ratio along direction 2
    pub nu10: f64,
    /// Angle of principal direction 1 from x, radians
    pub angle: f64,
    /// (εx, εy, γxy)
    pub strain: [f64; 3],
    pub eps1: f64,
    pub eps2: f64,
    pub sigma1: f64,
    pub sigma2: f64,
    /// Secant factors along directions 1 and 2
    pub secant: [f64; 2],
    /// (σx, σy, τxy)
    pub stress: [f64; 3],
}

impl ConcreteStation {
    fn new(layer: &Layer, poisson: f64) -> Self {
        Self {
            z: layer.z,
            thickness: layer.thickness,
            nu01: poisson,
            nu10: poisson,
            angle: 0.0,
            strain: [0.0; 3],
            eps1: 0.0,
            eps2: 0.0,
            sigma1: 0.0,
            sigma2: 0.0,
            secant: [1.0, 1.0],
            stress: [0.0; 3],
        }
    }

    fn update(&mut self, u: &Vec6, diagram: &ConcreteDiagram) {
        let [exx, eyy, gxy] = layer_strains(u, self.z);
        let principal = principal_strains(exx, eyy, gxy);
        let vv = 1.0 - self.nu01 * self.nu10;

        self.strain = [exx, eyy, gxy];
        self.angle = principal.angle;
        self.eps1 = (principal.e1 + self.nu01 * principal.e2) / vv;
        self.eps2 = (self.nu10 * principal.e1 + principal.e2) / vv;

        let k_rc = cracking_factor(self.eps1);
        self.sigma1 = diagram.stress(self.eps1, k_rc);
        self.sigma2 = diagram.stress(self.eps2, k_rc);
        self.secant = [
            secant_factor(self.sigma1, diagram.e, self.eps1),
            secant_factor(self.sigma2, diagram.e, self.eps2),
        ];
        self.stress = principal_to_global(self.angle, self.sigma1, self.sigma2);
    }
}

/// A reinforcement ply: area per metre at depth `z`, bars along `angle`
#[derive(Debug, Clone, Copy)]
pub struct PlyPoint {
    pub z: f64,
    pub area: f64,
    pub angle: f64,
    pub diagram: SteelDiagram,
}

/// Concrete stations and plies of one shell under one combination
#[derive(Debug, Clone)]
pub struct ShellSystem {
    concrete: ConcreteDiagram,
    plies: Vec<PlyPoint>,
    pub stations: Vec<ConcreteStation>,
    pub ply_state: Vec<MaterialPoint>,
}

impl ShellSystem {
    /// Build a system with elastic secant factors and the initial Poisson ratio
    ///
    /// Zero-thickness stations are iterated like layers but add no stiffness.
    pub fn new(
        stations: &[Layer],
        concrete: ConcreteDiagram,
        poisson: f64,
        plies: Vec<PlyPoint>,
    ) -> Self {
        Self {
            concrete,
            stations: stations
                .iter()
                .map(|l| ConcreteStation::new(l, poisson))
                .collect(),
            ply_state: vec![MaterialPoint::default(); plies.len()],
            plies,
        }
    }

    pub fn concrete(&self) -> &ConcreteDiagram {
        &self.concrete
    }

    /// (σx, σy, τxy) of each ply
    pub fn ply_stresses(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.plies
            .iter()
            .zip(&self.ply_state)
            .map(|(ply, state)| principal_to_global(ply.angle, state.stress, 0.0))
    }

    /// Σσ·a and Σσ·a·z per component, in MN/m and MN·m/m
    pub fn resultants(&self) -> [f64; 6] {
        let mut r = [0.0; 6];
        let concrete = self.stations.iter().map(|s| (s.stress, s.thickness, s.z));
        let plies = self
            .ply_stresses()
            .zip(&self.plies)
            .map(|(stress, ply)| (stress, ply.area, ply.z));
        for (stress, a, z) in concrete.chain(plies) {
            for k in 0..3 {
                r[k] += stress[k] * a;
                r[k + 3] += stress[k] * a * z;
            }
        }
        r
    }
}

impl SecantSystem<6> for ShellSystem {
    /// ABD matrix; also advances each station's Poisson ratios
    fn assemble(&mut self) -> Mat6 {
        let e0 = self.concrete.e;
        let mut abd = Mat6::zeros();

        for station in &mut self.stations {
            let layer = concrete_layer_stiffness(
                e0 * station.secant[0],
                e0 * station.secant[1],
                station.nu01,
                e0,
            );
            station.nu01 = layer.nu01;
            station.nu10 = layer.nu10;
            if station.thickness > 0.0 {
                let q_bar = global_layer_stiffness(&layer.q, station.angle);
                accumulate_abd(&mut abd, &q_bar, station.thickness, station.z);
            }
        }

        for (ply, state) in self.plies.iter().zip(&self.ply_state) {
            let q_bar = global_layer_stiffness(&ply_stiffness(ply.diagram.e, state.secant), ply.angle);
            accumulate_abd(&mut abd, &q_bar, ply.area, ply.z);
        }
        abd
    }

    fn update(&mut self, u: &Vec6) {
        for station in &mut self.stations {
            station.update(u, &self.concrete);
        }
        for (ply, state) in self.plies.iter().zip(self.ply_state.iter_mut()) {
            let [exx, eyy, gxy] = layer_strains(u, ply.z);
            let strain = directional_strain(ply.angle, exx, eyy, gxy);
            let stress = ply.diagram.stress(strain);
            *state = MaterialPoint {
                strain,
                stress,
                secant: secant_factor(stress, ply.diagram.e, strain),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{LayeredShell, MaterialTable};
    use approx::assert_relative_eq;

    fn system(poisson: f64) -> ShellSystem {
        let table = MaterialTable::standard();
        let concrete =
            ConcreteDiagram::new("B60", table.concrete("B60").unwrap(), 1.0, 1.0).unwrap();
        let geometry = LayeredShell::new("B60", 200.0, 10).unwrap().discretize();
        ShellSystem::new(&geometry.stations(), concrete, poisson, Vec::new())
    }

    #[test]
    fn test_cracking_factor() {
        assert_eq!(cracking_factor(0.001), 1.0);
        assert_eq!(cracking_factor(CRACKING_STRAIN), 1.0);
        assert_relative_eq!(cracking_factor(0.004), 1.0 / 1.2);
    }

    #[test]
    fn test_elastic_abd_of_plain_plate() {
        let mut s = system(0.0);
        let abd = s.assemble();
        let e = 39500.0;
        let h: f64 = 0.2;
        assert_relative_eq!(abd[(0, 0)], e * h, epsilon = 1e-6);
        assert_relative_eq!(abd[(2, 2)], e / 2.0 * h, epsilon = 1e-6);
        assert!(abd[(0, 3)].abs() < 1e-9);
        // midpoint rule over 10 layers: h³/12 · (1 - 1/100)
        assert_relative_eq!(abd[(3, 3)], e * h.powi(3) / 12.0 * 0.99, epsilon = 1e-6);
        assert_relative_eq!(abd, abd.transpose(), epsilon = 1e-9);
    }

    #[test]
    fn test_poisson_coupling_is_kept_when_elastic() {
        let mut s = system(0.2);
        let abd = s.assemble();
        assert_relative_eq!(abd[(0, 1)] / abd[(0, 0)], 0.2, epsilon = 1e-12);
        assert!(s.stations.iter().all(|st| st.nu01 == 0.2 && st.nu10 == 0.2));
    }

    #[test]
    fn test_station_principal_state() {
        let mut s = system(0.0);
        // pure shear strain: principal directions at 45 degrees
        let u = Vec6::new(0.0, 0.0, 2e-5, 0.0, 0.0, 0.0);
        s.update(&u);
        let station = s.stations[3];
        assert_relative_eq!(station.angle, std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(station.eps1, 1e-5, epsilon = 1e-15);
        assert_relative_eq!(station.eps2, -1e-5, epsilon = 1e-15);
        assert!(station.stress[0].abs() < 1e-9 && station.stress[1].abs() < 1e-9);
        assert_relative_eq!(station.stress[2], 39500.0 * 1e-5, epsilon = 1e-9);
    }
}
