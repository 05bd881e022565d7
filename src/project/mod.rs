//! Project file structures

mod repr;
mod target;


pub use repr::Project;
pub use target::Target;
