//! Generalized stiffness of a frame section
//!
//! With ε = ε0 + κx·x + κy·y every fiber or bar adds
//!
//! ```text
//!           | 1   x    y   |
//! a·E·v  *  | x   x²   x·y |
//!           | y   x·y  y²  |
//! ```

use super::Mat3;

/// Stiffness contribution of one point with area `a` at (`x`, `y`)
///
/// # Arguments
/// * `a` - Area, m²
/// * `modulus` - Initial modulus, MPa
/// * `secant` - Secant factor v (1.0 = initial elastic)
pub fn point_stiffness(a: f64, x: f64, y: f64, modulus: f64, secant: f64) -> Mat3 {
    let k = a * modulus * secant;
    #[rustfmt::skip]
    let d = Mat3::new(
        k,      k * x,      k * y,
        k * x,  k * x * x,  k * x * y,
        k * y,  k * x * y,  k * y * y,
    );
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_stiffness_terms() {
        let d = point_stiffness(2.0, 0.5, -0.25, 10.0, 0.5);
        assert_relative_eq!(d[(0, 0)], 10.0);
        assert_relative_eq!(d[(1, 1)], 2.5);
        assert_relative_eq!(d[(2, 2)], 0.625);
        assert_relative_eq!(d[(0, 1)], 5.0);
        assert_relative_eq!(d[(0, 2)], -2.5);
        assert_relative_eq!(d[(1, 2)], -1.25);
        assert_eq!(d, d.transpose());
    }
}
