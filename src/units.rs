//! Unit conversions applied once at the model boundary
//!
//! Geometry enters in millimetres and loads in kN / kN·m. The solver core
//! works in metres, MN and MPa, so MPa·m² = MN and MPa·m³ = MN·m.

/// Millimetres to metres
pub const MM_TO_M: f64 = 1.0e-3;

/// kN (or kN·m) to MN (or MN·m)
pub const KN_TO_MN: f64 = 1.0e-3;

/// MN (or MN·m) back to kN (or kN·m)
pub const MN_TO_KN: f64 = 1.0e3;

#[inline]
pub fn mm(value: f64) -> f64 {
    value * MM_TO_M
}

#[inline]
pub fn kn(value: f64) -> f64 {
    value * KN_TO_MN
}
