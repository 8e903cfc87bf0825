//! Analysis options and the secant-stiffness iteration engine

mod frame;
mod shell;

pub use frame::{section_strain, BarPoint, FrameSystem, MaterialPoint};
pub use shell::{cracking_factor, ConcreteStation, PlyPoint, ShellSystem, CRACKING_STRAIN};

use std::time::{Duration, Instant};

use log::debug;
use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};

use crate::error::{ConsecError, ConsecResult};
use crate::math::{max_abs_diff, solve_linear_system};

/// Options for section and shell analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Convergence tolerance on max |Δu|
    pub tolerance: f64,
    /// Maximum secant iterations before giving up
    pub max_iterations: usize,
    /// kt: scales the concrete tensile branch, 0 ignores tension
    pub tension_factor: f64,
    /// gb3: scales the concrete compressive resistance
    pub resistance_factor: f64,
    /// Poisson ratio of concrete (shell only)
    pub poisson: f64,
    /// Wall-clock budget per combination in milliseconds (None = unlimited)
    pub time_budget_ms: Option<u64>,
    /// Load combination tags to analyze (None = all)
    pub combo_tags: Option<Vec<String>>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-7,
            max_iterations: 500,
            tension_factor: 0.0,
            resistance_factor: 1.0,
            poisson: 0.0,
            time_budget_ms: None,
            combo_tags: None,
        }
    }
}

impl AnalysisOptions {
    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set the concrete tension factor kt
    pub fn with_tension_factor(mut self, kt: f64) -> Self {
        self.tension_factor = kt;
        self
    }

    /// Set the concrete resistance factor gb3
    pub fn with_resistance_factor(mut self, gb3: f64) -> Self {
        self.resistance_factor = gb3;
        self
    }

    /// Set the concrete Poisson ratio
    pub fn with_poisson(mut self, nu: f64) -> Self {
        self.poisson = nu;
        self
    }

    /// Limit wall-clock time per combination
    pub fn with_time_budget(mut self, millis: u64) -> Self {
        self.time_budget_ms = Some(millis);
        self
    }

    /// Filter by combo tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.combo_tags = Some(tags);
        self
    }

    /// Reject knobs the iteration cannot work with
    pub fn validate(&self) -> ConsecResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConsecError::InvalidInput(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(ConsecError::InvalidInput(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !(0.0..0.5).contains(&self.poisson) {
            return Err(ConsecError::InvalidInput(format!(
                "Poisson ratio must lie in [0, 0.5), got {}",
                self.poisson
            )));
        }
        Ok(())
    }
}

/// Secant factor v = σ / (E·ε); 1.0 at zero strain
pub fn secant_factor(stress: f64, modulus: f64, strain: f64) -> f64 {
    if strain != 0.0 {
        stress / modulus / strain
    } else {
        1.0
    }
}

/// A discretized section or shell whose stiffness depends on its deformation
pub trait SecantSystem<const N: usize> {
    /// Build the generalized stiffness from the current secant state
    fn assemble(&mut self) -> SMatrix<f64, N, N>;

    /// Recover strains and stresses at `u` and refresh the secant factors
    fn update(&mut self, u: &SVector<f64, N>);
}

/// Converged state of one combination
#[derive(Debug, Clone)]
pub struct Convergence<const N: usize> {
    pub deformation: SVector<f64, N>,
    pub iterations: usize,
    /// max |Δu| of the last iteration
    pub residual: f64,
}

fn solve<const N: usize>(
    d: &SMatrix<f64, N, N>,
    load: &SVector<f64, N>,
    combo: &str,
) -> ConsecResult<SVector<f64, N>> {
    solve_linear_system(d, load).ok_or_else(|| ConsecError::SingularMatrix {
        combo: combo.to_string(),
    })
}

/// Run the secant-stiffness iteration to convergence
///
/// Starting from the elastic stiffness, every iteration recovers the
/// material state at the current deformation, reassembles and resolves.
/// On convergence the system is left holding the state at the returned
/// deformation.
///
/// # Arguments
/// * `system` - Section or shell, with all secant factors at 1.0
/// * `load` - Factored load vector in MN / MN·m
/// * `options` - Tolerance, iteration cap and time budget
/// * `combo` - Combination name, attached to any error
pub fn secant_iterate<const N: usize, S: SecantSystem<N>>(
    system: &mut S,
    load: &SVector<f64, N>,
    options: &AnalysisOptions,
    combo: &str,
) -> ConsecResult<Convergence<N>> {
    options.validate()?;
    let started = Instant::now();
    let budget = options.time_budget_ms.map(Duration::from_millis);

    let mut u = solve(&system.assemble(), load, combo)?;
    let mut iterations = 0;

    loop {
        iterations += 1;
        system.update(&u);
        let u_next = solve(&system.assemble(), load, combo)?;
        let du = max_abs_diff(&u, &u_next);
        u = u_next;
        debug!("{combo}: iteration {iterations}, max |du| = {du:e}");

        if du <= options.tolerance {
            system.update(&u);
            return Ok(Convergence {
                deformation: u,
                iterations,
                residual: du,
            });
        }
        if iterations >= options.max_iterations {
            return Err(ConsecError::ConvergenceFailed {
                combo: combo.to_string(),
                iterations,
                residual: du,
            });
        }
        if let Some(budget) = budget {
            let elapsed = started.elapsed();
            if elapsed > budget {
                return Err(ConsecError::TimeBudgetExceeded {
                    combo: combo.to_string(),
                    iterations,
                    elapsed_ms: elapsed.as_millis(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::math::{Mat3, Vec3};
    use approx::assert_relative_eq;

    /// Single spring whose stiffness halves once its strain passes a limit
    struct Softening {
        k: f64,
        limit: f64,
        secant: f64,
    }

    impl SecantSystem<3> for Softening {
        fn assemble(&mut self) -> Mat3 {
            Mat3::from_diagonal(&Vec3::new(self.k * self.secant, self.k, self.k))
        }

        fn update(&mut self, u: &Vec3) {
            let eps = u[0];
            let stress = if eps.abs() <= self.limit {
                self.k * eps
            } else {
                self.k * self.limit.copysign(eps)
            };
            self.secant = secant_factor(stress, self.k, eps);
        }
    }

    struct Empty;

    impl SecantSystem<3> for Empty {
        fn assemble(&mut self) -> Mat3 {
            Mat3::zeros()
        }
        fn update(&mut self, _u: &Vec3) {}
    }

    #[test]
    fn test_secant_factor_at_zero_strain() {
        assert_eq!(secant_factor(0.0, 30000.0, 0.0), 1.0);
        assert_relative_eq!(secant_factor(-15.0, 30000.0, -0.001), 0.5);
    }

    #[test]
    fn test_linear_system_converges_in_one_iteration() {
        let mut system = Softening {
            k: 10.0,
            limit: 1.0,
            secant: 1.0,
        };
        let load = Vec3::new(5.0, 1.0, 2.0);
        let result = secant_iterate(&mut system, &load, &AnalysisOptions::default(), "c").unwrap();
        assert_eq!(result.iterations, 1);
        assert_relative_eq!(result.deformation[0], 0.5);
    }

    #[test]
    fn test_plateau_is_rejected_by_iteration_cap() {
        // load above the plateau has no fixed point
        let mut system = Softening {
            k: 10.0,
            limit: 1.0,
            secant: 1.0,
        };
        let load = Vec3::new(20.0, 0.0, 0.0);
        let options = AnalysisOptions::default().with_max_iter(25);
        let err = secant_iterate(&mut system, &load, &options, "overload").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Convergence);
        match err {
            ConsecError::ConvergenceFailed { iterations, .. } => assert_eq!(iterations, 25),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_zero_stiffness_is_singular() {
        let err = secant_iterate(
            &mut Empty,
            &Vec3::new(-1.0, 0.0, 0.0),
            &AnalysisOptions::default(),
            "c",
        )
        .unwrap_err();
        assert!(matches!(err, ConsecError::SingularMatrix { ref combo } if combo == "c"));
    }

    #[test]
    fn test_invalid_options() {
        assert!(AnalysisOptions::default().with_tolerance(0.0).validate().is_err());
        assert!(AnalysisOptions::default().with_max_iter(0).validate().is_err());
        assert!(AnalysisOptions::default().with_poisson(0.5).validate().is_err());
        assert!(AnalysisOptions::default().with_poisson(0.2).validate().is_ok());
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: AnalysisOptions =
            serde_json::from_str(r#"{ "tension_factor": 1.0, "max_iterations": 50 }"#).unwrap();
        assert_eq!(options.max_iterations, 50);
        assert_eq!(options.tension_factor, 1.0);
        assert_eq!(options.tolerance, 1e-7);
    }
}
