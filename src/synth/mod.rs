//! Instruction synthesis - Turning table rows into instruction
//! implementations.
//!
//! A synthesized `Unit` is a list of `Step`s rather than text; the
//! `dialect` module decides what each step looks like in the emulator's
//! language.

mod identity;
mod synthesize;
mod unit;

#[cfg(test)]
mod tests;

pub use identity::Identity;
pub use synthesize::{synthesize, Reason, Unresolved};
pub use unit::{Argument, Delegate, Routine, Step, Unit};
