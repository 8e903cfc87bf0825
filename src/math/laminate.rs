//! Lamination-rule stiffness of layered shells
//!
//! Every concrete layer or reinforcement ply has a 3x3 stiffness Q in its own
//! principal axes. It is rotated into the element axes with
//!
//! ```text
//! Q̄ = T⁻¹ · Q · R · T · R⁻¹,    R = diag(1, 1, 2)
//! ```
//!
//! and integrated through the thickness into the 6x6 ABD matrix:
//! A = Σ Q̄·t, B = Σ Q̄·t·z, D = Σ Q̄·t·z².

use super::{double_angle_transform, Mat3, Mat6, Vec3};

/// Concrete layer stiffness together with the updated Poisson ratios
#[derive(Debug, Clone, Copy)]
pub struct LayerStiffness {
    pub q: Mat3,
    pub nu01: f64,
    pub nu10: f64,
}

/// Orthotropic, Poisson-coupled stiffness of a concrete layer in its principal axes
///
/// # Arguments
/// * `e1`, `e2` - Secant moduli along principal directions 1 and 2
/// * `nu01` - Current Poisson ratio of the layer
/// * `e0` - Initial modulus, used for the shear term
///
/// ν10 = E2·ν01/E1 (zero when E1 vanishes); the returned `nu01` equals `nu10`.
pub fn concrete_layer_stiffness(e1: f64, e2: f64, nu01: f64, e0: f64) -> LayerStiffness {
    let nu10 = if e1 != 0.0 { e2 * nu01 / e1 } else { 0.0 };
    let g01 = e0 / (2.0 * (1.0 + nu10));
    let nu01 = nu10;
    let vv = 1.0 - nu01 * nu10;

    let mut q = Mat3::zeros();
    q[(0, 0)] = e1 / vv;
    q[(0, 1)] = nu01 * e2 / vv;
    q[(1, 1)] = e2 / vv;
    q[(1, 0)] = nu10 * e2 / vv;
    q[(2, 2)] = g01;

    LayerStiffness { q, nu01, nu10 }
}

/// Uniaxial stiffness of a ply along its bars
pub fn ply_stiffness(modulus: f64, secant: f64) -> Mat3 {
    let mut q = Mat3::zeros();
    q[(0, 0)] = modulus * secant;
    q
}

/// Rotate a principal-axes stiffness by `theta` into the element axes
pub fn global_layer_stiffness(q: &Mat3, theta: f64) -> Mat3 {
    let t = double_angle_transform(theta);
    let t_inv = double_angle_transform(-theta);
    let r = Mat3::from_diagonal(&Vec3::new(1.0, 1.0, 2.0));
    let r_inv = Mat3::from_diagonal(&Vec3::new(1.0, 1.0, 0.5));
    t_inv * q * r * t * r_inv
}

/// Add one layer of area `a` (thickness per unit width) at depth `z` into `abd`
pub fn accumulate_abd(abd: &mut Mat6, q_bar: &Mat3, a: f64, z: f64) {
    for row in 0..3 {
        for col in 0..3 {
            let q = q_bar[(row, col)];
            abd[(row, col)] += q * a;
            abd[(row, col + 3)] += q * a * z;
            abd[(row + 3, col)] += q * a * z;
            abd[(row + 3, col + 3)] += q * a * z * z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_isotropic_layer_is_rotation_invariant() {
        let layer = concrete_layer_stiffness(30000.0, 30000.0, 0.2, 30000.0);
        assert_relative_eq!(layer.nu10, 0.2);
        let q0 = global_layer_stiffness(&layer.q, 0.0);
        let q1 = global_layer_stiffness(&layer.q, 0.7);
        // shear term uses G = E/(2(1+ν)), so the isotropic layer stays isotropic
        assert_relative_eq!(q0, q1, epsilon = 1e-8);
    }

    #[test]
    fn test_rotated_stiffness_is_symmetric() {
        let layer = concrete_layer_stiffness(30000.0, 12000.0, 0.2, 30000.0);
        for theta in [0.1, 0.5, 1.2, -0.8] {
            let q = global_layer_stiffness(&layer.q, theta);
            assert_relative_eq!(q, q.transpose(), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_ply_at_right_angle_stiffens_y() {
        let q = global_layer_stiffness(&ply_stiffness(200000.0, 1.0), FRAC_PI_2);
        assert_relative_eq!(q[(1, 1)], 200000.0, epsilon = 1e-6);
        assert!(q[(0, 0)].abs() < 1e-6);
        assert!(q[(2, 2)].abs() < 1e-6);
    }

    #[test]
    fn test_symmetric_pair_has_no_coupling() {
        let q = global_layer_stiffness(&ply_stiffness(200000.0, 1.0), 0.0);
        let mut abd = Mat6::zeros();
        accumulate_abd(&mut abd, &q, 1e-3, 0.2);
        accumulate_abd(&mut abd, &q, 1e-3, -0.2);
        assert_relative_eq!(abd[(0, 0)], 400.0, epsilon = 1e-9);
        assert_relative_eq!(abd[(0, 3)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(abd[(3, 3)], 400.0 * 0.04, epsilon = 1e-9);
    }
}
