//! Dispatch assembly - Collecting units and laying out the decoder that
//! selects between them.

mod assembler;
mod report;


pub use assembler::Assembler;
pub use report::{Delegation, GenerationReport};

use crate::error::{Error, Result};
use crate::synth::{Delegate, Identity, Unit};
use crate::table::Page;
use std::collections::BTreeMap;

/// Something the assembler will print before the entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Emission {
    Unit(Unit),
    Delegate(Delegate),
}

impl Emission {
    pub fn identity(&self) -> &Identity {
        match self {
            Emission::Unit(unit) => unit.identity(),
            Emission::Delegate(delegate) => delegate.identity(),
        }
    }

    /// The name dispatch cases call.
    pub fn target(&self) -> String {
        match self {
            Emission::Unit(unit) => unit.name(),
            Emission::Delegate(delegate) => delegate.name(),
        }
    }
}

/// The primary page bytes that select each extended page.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Prefixes {
    extended_a: u8,
    extended_b: u8,
}

impl Default for Prefixes {
    fn default() -> Self {
        Prefixes {
            extended_a: 0xCE,
            extended_b: 0xCF,
        }
    }
}

impl Prefixes {
    /// Construct a prefix assignment. Both pages sharing one byte would make
    /// the second unreachable, so that is rejected.
    pub fn new(extended_a: u8, extended_b: u8) -> Result<Self> {
        if extended_a == extended_b {
            return Err(Error::SharedPrefix(extended_a));
        }

        Ok(Prefixes {
            extended_a,
            extended_b,
        })
    }

    /// Construct a prefix assignment from the project file's page map.
    ///
    /// Pages missing from the map keep their default prefix. The primary page
    /// has no prefix, so an entry for it is ignored.
    pub fn from_map(map: &BTreeMap<Page, u8>) -> Result<Self> {
        if let Some(byte) = map.get(&Page::Primary) {
            log::warn!("Ignoring prefix {:02X} given for the primary page", byte);
        }

        let defaults = Prefixes::default();

        Prefixes::new(
            map.get(&Page::ExtendedA)
                .copied()
                .unwrap_or(defaults.extended_a),
            map.get(&Page::ExtendedB)
                .copied()
                .unwrap_or(defaults.extended_b),
        )
    }

    pub fn prefix(&self, page: Page) -> Option<u8> {
        match page {
            Page::Primary => None,
            Page::ExtendedA => Some(self.extended_a),
            Page::ExtendedB => Some(self.extended_b),
        }
    }

    /// The extended page a primary byte selects, if any.
    pub fn page_at(&self, byte: u8) -> Option<Page> {
        Page::iter().find(|p| self.prefix(*p) == Some(byte))
    }
}
