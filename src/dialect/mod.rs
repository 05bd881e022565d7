//! Output dialects - The languages generated code can be printed in.

mod cpp;
mod rust;
mod traits;

#[cfg(test)]
mod tests;

pub use cpp::Cpp;
pub use rust::Rust;
pub use traits::Dialect;

use serde::Serialize;
use std::str;

/// The dispatch routine every dialect generates.
///
/// Interrupt-blocking returns call it again to run the next instruction.
pub const ENTRY_POINT: &str = "inst_advance";

/// Enumeration of all dialects that ship with opgen.
#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DialectName {
    Cpp,
    Rust,
}

impl str::FromStr for DialectName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "cpp" => Ok(DialectName::Cpp),
            "c++" => Ok(DialectName::Cpp),
            "cxx" => Ok(DialectName::Cpp),
            "rust" => Ok(DialectName::Rust),
            "rs" => Ok(DialectName::Rust),
            _ => Err(()),
        }
    }
}

impl Default for DialectName {
    fn default() -> Self {
        DialectName::Cpp
    }
}

impl DialectName {
    pub fn iter() -> impl IntoIterator<Item = Self> {
        vec![Self::Cpp, Self::Rust]
    }

    pub fn friendly_name(self) -> &'static str {
        match self {
            Self::Cpp => "C++",
            Self::Rust => "Rust",
        }
    }

    /// Construct the dialect this name refers to.
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Cpp => Box::new(Cpp),
            Self::Rust => Box::new(Rust),
        }
    }
}

derive_deserialize_from_str!(DialectName, "valid output dialect");
