//! Material grades and the material table
//!
//! Sign convention: compression is negative. Compressive resistances and
//! compressive strain breakpoints are stored as negative numbers, tensile ones
//! as positive numbers. Stresses and moduli are in MPa.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConsecError, ConsecResult};

/// Concrete grade properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteGrade {
    /// Initial modulus of elasticity, MPa
    pub e: f64,
    /// Design compressive resistance Rb, MPa (negative)
    pub rb: f64,
    /// Design tensile resistance Rbt, MPa (positive)
    pub rbt: f64,
    /// Strain at the start of the compressive plateau (negative)
    pub eb0: f64,
    /// Ultimate compressive strain (negative)
    pub eb2: f64,
    /// Strain at the start of the tensile plateau (positive)
    pub ebt0: f64,
    /// Ultimate tensile strain (positive)
    pub ebt2: f64,
}

impl ConcreteGrade {
    /// Create a grade from unsigned design values, applying the sign convention
    ///
    /// Uses the usual two-line diagram strains: 0.002 / 0.0035 in compression
    /// and 0.0001 / 0.00015 in tension.
    pub fn from_design_values(e: f64, rb: f64, rbt: f64) -> Self {
        Self {
            e,
            rb: -rb.abs(),
            rbt: rbt.abs(),
            eb0: -0.002,
            eb2: -0.0035,
            ebt0: 0.0001,
            ebt2: 0.00015,
        }
    }

    /// Check signs and ordering of the breakpoints
    pub fn validate(&self, grade: &str) -> ConsecResult<()> {
        let fail = |reason: &str| {
            Err(ConsecError::InvalidMaterial {
                grade: grade.to_string(),
                reason: reason.to_string(),
            })
        };
        if !(self.e > 0.0) {
            return fail("modulus must be positive");
        }
        if !(self.rb < 0.0) {
            return fail("compressive resistance must be negative");
        }
        if self.rbt < 0.0 {
            return fail("tensile resistance must not be negative");
        }
        if !(self.eb2 <= self.eb0 && self.eb0 < 0.0) {
            return fail("compressive strains must satisfy eb2 <= eb0 < 0");
        }
        if !(0.0 < self.ebt0 && self.ebt0 <= self.ebt2) {
            return fail("tensile strains must satisfy 0 < ebt0 <= ebt2");
        }
        Ok(())
    }
}

/// Reinforcing steel grade properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelGrade {
    /// Modulus of elasticity, MPa
    pub e: f64,
    /// Design tensile resistance Rs, MPa (positive)
    pub rs: f64,
    /// Design compressive resistance Rsc, MPa (negative)
    pub rsc: f64,
    /// Elastic limit in compression (negative)
    pub esc0: f64,
    /// Ultimate compressive strain (negative)
    pub esc2: f64,
    /// Elastic limit in tension (positive)
    pub es0: f64,
    /// Ultimate tensile strain (positive)
    pub es2: f64,
}

impl SteelGrade {
    /// Create a grade from unsigned design values; elastic limits follow from E
    pub fn from_design_values(e: f64, rs: f64, rsc: f64) -> Self {
        let rs = rs.abs();
        let rsc = -rsc.abs();
        Self {
            e,
            rs,
            rsc,
            esc0: rsc / e,
            esc2: -0.025,
            es0: rs / e,
            es2: 0.025,
        }
    }

    /// Check signs and ordering of the breakpoints
    pub fn validate(&self, grade: &str) -> ConsecResult<()> {
        let fail = |reason: &str| {
            Err(ConsecError::InvalidMaterial {
                grade: grade.to_string(),
                reason: reason.to_string(),
            })
        };
        if !(self.e > 0.0) {
            return fail("modulus must be positive");
        }
        if !(self.rs > 0.0 && self.rsc < 0.0) {
            return fail("resistances must be signed (Rs > 0, Rsc < 0)");
        }
        if !(self.esc2 <= self.esc0 && self.esc0 < 0.0) {
            return fail("compressive strains must satisfy esc2 <= esc0 < 0");
        }
        if !(0.0 < self.es0 && self.es0 <= self.es2) {
            return fail("tensile strains must satisfy 0 < es0 <= es2");
        }
        Ok(())
    }
}

/// Read-only lookup of concrete and steel grades by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialTable {
    #[serde(default)]
    pub concrete: HashMap<String, ConcreteGrade>,
    #[serde(default)]
    pub steel: HashMap<String, SteelGrade>,
}

impl MaterialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Common concrete classes B15..B60 and rebar classes A240, A400, A500
    pub fn standard() -> Self {
        let mut table = Self::new();

        #[rustfmt::skip]
        let concrete = [
            // grade, E, Rb, Rbt
            ("B15", 24000.0,  8.5, 0.75),
            ("B20", 27500.0, 11.5, 0.90),
            ("B25", 30000.0, 14.5, 1.05),
            ("B30", 32500.0, 17.0, 1.15),
            ("B35", 34500.0, 19.5, 1.30),
            ("B40", 36000.0, 22.0, 1.40),
            ("B45", 37000.0, 25.0, 1.50),
            ("B50", 38000.0, 27.5, 1.60),
            ("B55", 39000.0, 30.0, 1.70),
            ("B60", 39500.0, 33.0, 1.80),
        ];
        for (name, e, rb, rbt) in concrete {
            table
                .concrete
                .insert(name.to_string(), ConcreteGrade::from_design_values(e, rb, rbt));
        }

        #[rustfmt::skip]
        let steel = [
            // grade, E, Rs, Rsc
            ("A240", 200000.0, 210.0, 210.0),
            ("A400", 200000.0, 350.0, 350.0),
            ("A500", 200000.0, 435.0, 400.0),
        ];
        for (name, e, rs, rsc) in steel {
            table
                .steel
                .insert(name.to_string(), SteelGrade::from_design_values(e, rs, rsc));
        }

        table
    }

    /// Parse a table from JSON and validate every grade
    pub fn from_json_str(json: &str) -> ConsecResult<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Read a table from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> ConsecResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up a concrete grade
    pub fn concrete(&self, name: &str) -> ConsecResult<&ConcreteGrade> {
        self.concrete.get(name).ok_or_else(|| ConsecError::GradeNotFound {
            kind: "Concrete",
            grade: name.to_string(),
        })
    }

    /// Look up a steel grade
    pub fn steel(&self, name: &str) -> ConsecResult<&SteelGrade> {
        self.steel.get(name).ok_or_else(|| ConsecError::GradeNotFound {
            kind: "Steel",
            grade: name.to_string(),
        })
    }

    /// Validate every grade in the table
    pub fn validate(&self) -> ConsecResult<()> {
        for (name, grade) in &self.concrete {
            grade.validate(name)?;
        }
        for (name, grade) in &self.steel {
            grade.validate(name)?;
        }
        Ok(())
    }
}
