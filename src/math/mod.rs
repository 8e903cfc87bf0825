//! Mathematical utilities for section and shell calculations

pub mod laminate;
pub mod section;

use nalgebra::{DMatrix, DVector, Matrix3, Matrix6, SMatrix, SVector, Vector3, Vector6};

pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;

pub use laminate::{
    concrete_layer_stiffness, global_layer_stiffness, ply_stiffness, LayerStiffness,
};
pub use section::point_stiffness;

/// Pivots smaller than this fraction of the largest pivot mark the matrix as singular
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Solve a small dense system `a * x = b` by LU decomposition
///
/// Returns `None` when the matrix is singular (a pivot vanishes relative to
/// the largest one) or the solution is not finite. Callers turn `None`
/// into a typed error; there is no fallback system.
pub fn solve_linear_system<const N: usize>(
    a: &SMatrix<f64, N, N>,
    b: &SVector<f64, N>,
) -> Option<SVector<f64, N>> {
    let lu = DMatrix::from_column_slice(N, N, a.as_slice()).lu();
    let pivots = lu.u().diagonal();
    let scale = pivots.amax();
    if !(scale > 0.0) || pivots.iter().any(|p| p.abs() <= scale * SINGULARITY_TOLERANCE) {
        return None;
    }
    let x = lu.solve(&DVector::from_column_slice(b.as_slice()))?;
    if x.iter().all(|v| v.is_finite()) {
        Some(SVector::from_column_slice(x.as_slice()))
    } else {
        None
    }
}

/// Largest component-wise difference between two vectors
pub fn max_abs_diff<const N: usize>(a: &SVector<f64, N>, b: &SVector<f64, N>) -> f64 {
    (a - b).amax()
}

/// Principal strains of an in-plane strain state (engineering shear strain)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalStrains {
    /// Major principal strain
    pub e1: f64,
    /// Minor principal strain
    pub e2: f64,
    /// Angle of the major direction from the x axis, radians
    pub angle: f64,
}

/// Mohr transform of (εx, εy, γxy)
pub fn principal_strains(exx: f64, eyy: f64, gxy: f64) -> PrincipalStrains {
    let mean = (exx + eyy) / 2.0;
    let radius = (((exx - eyy) / 2.0).powi(2) + (gxy / 2.0).powi(2)).sqrt();
    PrincipalStrains {
        e1: mean + radius,
        e2: mean - radius,
        angle: 0.5 * gxy.atan2(exx - eyy),
    }
}

/// Double-angle stress transformation matrix for a rotation `theta`
///
/// ```text
/// |  c²   s²    2cs   |
/// |  s²   c²   -2cs   |
/// | -cs   cs   c²-s²  |
/// ```
pub fn double_angle_transform(theta: f64) -> Mat3 {
    let (s, c) = theta.sin_cos();
    #[rustfmt::skip]
    let t = Mat3::new(
        c * c,   s * s,  2.0 * c * s,
        s * s,   c * c, -2.0 * c * s,
        -c * s,  c * s,  c * c - s * s,
    );
    t
}

/// Rotate principal stresses (σ1 along `theta`, σ2 normal to it) to [σx, σy, τxy]
pub fn principal_to_global(theta: f64, s1: f64, s2: f64) -> [f64; 3] {
    let (s, c) = theta.sin_cos();
    [
        c * c * s1 + s * s * s2,
        s * s * s1 + c * c * s2,
        s * c * s1 - s * c * s2,
    ]
}

/// Normal strain along direction `theta` for engineering strains (εx, εy, γxy)
pub fn directional_strain(theta: f64, exx: f64, eyy: f64, gxy: f64) -> f64 {
    let (s, c) = theta.sin_cos();
    c * c * exx + s * s * eyy + s * c * gxy
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_solve_small_system() {
        let a = Mat3::new(4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0);
        let x_true = Vec3::new(1.0, -2.0, 0.5);
        let b = a * x_true;
        let x = solve_linear_system(&a, &b).unwrap();
        assert_relative_eq!(x, x_true, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_matrix_is_singular() {
        let a = Mat3::zeros();
        let b = Vec3::new(1.0, 0.0, 0.0);
        assert!(solve_linear_system(&a, &b).is_none());
    }

    #[test]
    fn test_rank_deficient_is_singular() {
        // single point at (0.1, 0.2): rank one
        let a = point_stiffness(1e-3, 0.1, 0.2, 2e5, 1.0);
        let b = Vec3::new(-1.0, 0.0, 0.0);
        assert!(solve_linear_system(&a, &b).is_none());
    }

    #[test]
    fn test_principal_strains_pure_shear() {
        let p = principal_strains(0.0, 0.0, 0.002);
        assert_relative_eq!(p.e1, 0.001, epsilon = 1e-15);
        assert_relative_eq!(p.e2, -0.001, epsilon = 1e-15);
        assert_relative_eq!(p.angle, FRAC_PI_4, epsilon = 1e-15);
    }

    #[test]
    fn test_principal_round_trip() {
        let (exx, eyy, gxy) = (0.0012, -0.0004, 0.0009);
        let p = principal_strains(exx, eyy, gxy);
        // strains transform like stresses with half the shear
        let back = principal_to_global(p.angle, p.e1, p.e2);
        assert_relative_eq!(back[0], exx, epsilon = 1e-15);
        assert_relative_eq!(back[1], eyy, epsilon = 1e-15);
        assert_relative_eq!(back[2] * 2.0, gxy, epsilon = 1e-15);
        assert_relative_eq!(directional_strain(p.angle, exx, eyy, gxy), p.e1, epsilon = 1e-15);
    }

    #[test]
    fn test_transform_inverse_is_negative_angle() {
        let t = double_angle_transform(0.3);
        let t_inv = double_angle_transform(-0.3);
        assert_relative_eq!(t * t_inv, Mat3::identity(), epsilon = 1e-14);
    }
}
