//! Consec Solver - nonlinear analysis of reinforced-concrete sections and shells
//!
//! Two formulations share one secant-stiffness iteration engine:
//! - Frame sections (beams, columns): rectangular concrete split into fibers
//!   plus point bars, deformation [ε0, κx, κy]
//! - Layered shells: concrete layers evaluated along principal directions plus
//!   reinforcement plies, deformation [εx, εy, γxy, κx, κy, κxy]
//!
//! Concrete follows the three-line design diagram with a tension factor kt
//! and a resistance factor gb3; steel follows the bilinear diagram.
//! Compression is negative throughout.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use consec_solver::prelude::*;
//!
//! let mut model = FrameSectionModel::new(Arc::new(MaterialTable::standard()));
//!
//! // 500 x 400 mm section, 10 x 8 fibers
//! model.set_section(RectangularSection::new("B30", 500.0, 400.0, 10, 8).unwrap()).unwrap();
//!
//! // Corner bars (mm)
//! model.add_rebar(Rebar::new("1", "A500", 28.0, 210.0, -160.0).unwrap()).unwrap();
//! model.add_rebar(Rebar::new("2", "A500", 28.0, 210.0, 160.0).unwrap()).unwrap();
//! model.add_rebar(Rebar::new("3", "A500", 28.0, -210.0, -160.0).unwrap()).unwrap();
//! model.add_rebar(Rebar::new("4", "A500", 28.0, -210.0, 160.0).unwrap()).unwrap();
//!
//! // Loads in kN and kN·m
//! model.add_load(SectionLoad::new(-1000.0, 60.0, 20.0, "D"));
//! model.add_load_combo(LoadCombination::single("1.0D", "D")).unwrap();
//!
//! let result = model.analyze("1.0D", &AnalysisOptions::default()).unwrap();
//! assert!(result.axial_strain() < 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;
pub mod units;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::AnalysisOptions;
    pub use crate::elements::{
        ConcreteDiagram, ConcreteGrade, LayeredShell, MaterialTable, Ply, Rebar,
        RectangularSection, SteelDiagram, SteelGrade,
    };
    pub use crate::error::{ConsecError, ConsecResult, ErrorKind};
    pub use crate::loads::{LoadCombination, SectionLoad, ShellLoad};
    pub use crate::model::{FrameSectionModel, ShellElementModel};
    pub use crate::results::{
        DiagramCurve, FiberResult, LayerResult, PlyResult, RebarResult, ResultantCheck,
        SectionResult, ShellResult,
    };
}
