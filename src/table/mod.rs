//! Instruction table - The tabular description of every opcode the CPU
//! decodes, one row per opcode byte across all three opcode pages.

mod loader;


use serde::Serialize;
use std::fmt;
use std::str;

/// Enumeration of the S1C88's opcode pages.
///
/// The extended pages are reached through a one-byte prefix on the primary
/// page. Each page has its own independent 256-entry opcode space.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Primary,
    ExtendedA,
    ExtendedB,
}

impl Page {
    /// Enumerate all pages in table column order.
    pub fn iter() -> impl Iterator<Item = Self> {
        vec![Page::Primary, Page::ExtendedA, Page::ExtendedB].into_iter()
    }

    pub fn index(self) -> usize {
        match self {
            Page::Primary => 0,
            Page::ExtendedA => 1,
            Page::ExtendedB => 2,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Primary => write!(f, "primary"),
            Page::ExtendedA => write!(f, "extended_a"),
            Page::ExtendedB => write!(f, "extended_b"),
        }
    }
}

impl str::FromStr for Page {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "primary" => Ok(Page::Primary),
            "extended_a" => Ok(Page::ExtendedA),
            "extended_b" => Ok(Page::ExtendedB),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(Page, "valid opcode page name");

/// The cost of executing an instruction.
///
/// Conditional instructions take `taken` cycles when their condition holds
/// and `not_taken` when they are skipped. Everything else costs the same
/// either way.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct CycleCost {
    pub taken: u32,
    pub not_taken: u32,
}

impl CycleCost {
    pub fn fixed(cycles: u32) -> Self {
        CycleCost {
            taken: cycles,
            not_taken: cycles,
        }
    }
}

impl str::FromStr for CycleCost {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut split = s.split(',');

        let taken = split
            .next()
            .and_then(|c| c.trim().parse().ok())
            .ok_or(())?;
        let cost = match split.next() {
            Some(c) => CycleCost {
                taken,
                not_taken: c.trim().parse().map_err(|_| ())?,
            },
            None => CycleCost::fixed(taken),
        };

        if split.next().is_some() {
            return Err(());
        }

        Ok(cost)
    }
}

impl fmt::Display for CycleCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.taken == self.not_taken {
            write!(f, "{}", self.taken)
        } else {
            write!(f, "{},{}", self.taken, self.not_taken)
        }
    }
}

/// One defined slot of the instruction table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionRow {
    opcode: u8,
    page: Page,
    cycles: CycleCost,
    mnemonic: String,

    /// Non-empty operand tokens, in table order. The first one may be a
    /// condition rather than a true operand.
    operands: Vec<String>,
}

impl InstructionRow {
    pub fn new(opcode: u8, page: Page, cycles: CycleCost, mnemonic: &str, operands: &[&str]) -> Self {
        InstructionRow {
            opcode,
            page,
            cycles,
            mnemonic: mnemonic.to_string(),
            operands: operands
                .iter()
                .filter(|o| !o.is_empty())
                .map(|o| o.to_string())
                .collect(),
        }
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn cycles(&self) -> CycleCost {
        self.cycles
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn iter_operands(&self) -> impl Iterator<Item = &str> {
        self.operands.iter().map(|s| s.as_ref())
    }

    /// A human-readable name for where this row lives, for diagnostics.
    pub fn location(&self) -> String {
        format!("{} {:02X}", self.page, self.opcode)
    }
}

impl fmt::Display for InstructionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;

        for (i, operand) in self.operands.iter().enumerate() {
            if i == 0 {
                write!(f, " {}", operand)?;
            } else {
                write!(f, ", {}", operand)?;
            }
        }

        Ok(())
    }
}

/// The whole instruction table, as loaded from disk.
#[derive(Clone, Debug, Default)]
pub struct Table {
    rows: Vec<InstructionRow>,
}

impl Table {
    /// Iterate every defined slot.
    ///
    /// Rows come out in table order: by line, and then by page within each
    /// line.
    pub fn iter_rows(&self) -> impl Iterator<Item = &InstructionRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
