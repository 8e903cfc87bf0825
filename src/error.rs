//! Error types for the section and shell solvers

use serde::Serialize;
use thiserror::Error;

/// Coarse classification of every [`ConsecError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Invalid or degenerate input: geometry, subdivisions, names, signs
    Configuration,
    /// The stiffness matrix could not be inverted
    SingularSystem,
    /// The iteration did not meet the tolerance within its budget
    Convergence,
    /// A grade or name outside the supplied tables
    InputRange,
    /// Reading or decoding external data
    Io,
}

/// Main error type for section and shell analysis
#[derive(Error, Debug)]
pub enum ConsecError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid material '{grade}': {reason}")]
    InvalidMaterial { grade: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No concrete section or shell has been defined")]
    MissingConcrete,

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Load combination '{0}' not found")]
    LoadCombinationNotFound(String),

    #[error("{kind} grade '{grade}' not found in material table")]
    GradeNotFound { kind: &'static str, grade: String },

    #[error("Singular stiffness matrix for combination '{combo}' - section has no usable stiffness")]
    SingularMatrix { combo: String },

    #[error("Combination '{combo}' did not converge after {iterations} iterations (last |du| = {residual:e})")]
    ConvergenceFailed {
        combo: String,
        iterations: usize,
        residual: f64,
    },

    #[error("Combination '{combo}' exceeded its time budget after {iterations} iterations ({elapsed_ms} ms)")]
    TimeBudgetExceeded {
        combo: String,
        iterations: usize,
        elapsed_ms: u128,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ConsecError {
    /// Which of the error families this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGeometry(_)
            | Self::InvalidMaterial { .. }
            | Self::InvalidInput(_)
            | Self::MissingConcrete
            | Self::DuplicateName(_)
            | Self::LoadCombinationNotFound(_) => ErrorKind::Configuration,
            Self::GradeNotFound { .. } => ErrorKind::InputRange,
            Self::SingularMatrix { .. } => ErrorKind::SingularSystem,
            Self::ConvergenceFailed { .. } | Self::TimeBudgetExceeded { .. } => {
                ErrorKind::Convergence
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorKind::Io,
        }
    }

    /// The load combination this error is attached to, if any
    pub fn combo(&self) -> Option<&str> {
        match self {
            Self::SingularMatrix { combo }
            | Self::ConvergenceFailed { combo, .. }
            | Self::TimeBudgetExceeded { combo, .. } => Some(combo),
            Self::LoadCombinationNotFound(name) => Some(name),
            _ => None,
        }
    }
}

/// Result type for section and shell operations
pub type ConsecResult<T> = Result<T, ConsecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err = ConsecError::SingularMatrix {
            combo: "1.0D+1.0L".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::SingularSystem);
        assert_eq!(err.combo(), Some("1.0D+1.0L"));

        let err = ConsecError::GradeNotFound {
            kind: "Concrete",
            grade: "B999".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InputRange);
        assert!(err.to_string().contains("B999"));
    }
}
