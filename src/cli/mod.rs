//! CLI commands

mod common;
mod externs;
mod generate;
mod main;


pub use externs::externs;
pub use generate::generate;
pub use main::main;
