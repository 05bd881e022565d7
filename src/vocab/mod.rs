//! The S1C88 vocabulary: conditions, operands, and operations.
//!
//! Every token the instruction table may contain is described by one of the
//! closed enumerations in this module. A token that doesn't parse into one of
//! them is outside of the modeled vocabulary, and rows using it have to be
//! implemented by hand (see `synth::Unresolved`).

mod condition;
mod operand;
mod operation;


pub use condition::Condition;
pub use operand::{AddressingMode, Immediate, Operand, Register};
pub use operation::{Direction, Operation};

use std::fmt;

/// The width of a value moved around by generated code.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    pub fn bits(self) -> u32 {
        match self {
            Width::Byte => 8,
            Width::Word => 16,
        }
    }

    /// The widest of a set of optional widths.
    ///
    /// `None` entries contribute nothing; if every entry is `None` then so is
    /// the result.
    pub fn widest<I>(widths: I) -> Option<Width>
    where
        I: IntoIterator<Item = Option<Width>>,
    {
        widths.into_iter().flatten().max()
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}
