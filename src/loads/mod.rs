//! Section and shell loads, and load combinations

mod load_combo;
mod section_load;
mod shell_load;

pub use load_combo::LoadCombination;
pub use section_load::SectionLoad;
pub use shell_load::ShellLoad;
