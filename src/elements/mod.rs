//! Materials and geometry of sections and shells

mod diagram;
mod material;
mod ply;
mod rebar;
mod section;
mod shell;

pub use diagram::{concrete_stress, steel_stress, ConcreteDiagram, SteelDiagram};
pub use material::{ConcreteGrade, MaterialTable, SteelGrade};
pub use ply::Ply;
pub use rebar::Rebar;
pub use section::{Fiber, RectangularSection, SectionGeometry};
pub use shell::{Layer, LayeredShell, ShellGeometry};
