//! Machine-readable summary of a generation run

use crate::dialect::{Dialect, DialectName};
use crate::dispatch::Assembler;
use crate::synth::Unresolved;
use crate::table::Page;
use serde::Serialize;
use std::io::{self, Write};

/// A row that was turned into a delegate rather than synthesized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Delegation {
    page: Page,
    opcode: u8,
    instruction: String,

    /// The generated wrapper dispatch calls.
    wrapper: String,

    /// The hand-written routine the wrapper calls.
    routine: String,
    reason: String,
}

impl Delegation {
    pub fn new(unresolved: &Unresolved<'_>) -> Self {
        let row = unresolved.row();
        let delegate = unresolved.delegate();

        Delegation {
            page: row.page(),
            opcode: row.opcode(),
            instruction: row.to_string(),
            wrapper: delegate.name(),
            routine: delegate.routine(),
            reason: unresolved.reason().to_string(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn routine(&self) -> &str {
        &self.routine
    }
}

/// Everything the rest of the emulator needs to know about a generated
/// file: how much was generated, what was left for hand-written code, and
/// which external routines the output expects to exist.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationReport {
    dialect: DialectName,
    units: usize,
    delegates: usize,
    delegated: Vec<Delegation>,
    collaborators: Vec<String>,
}

impl GenerationReport {
    pub fn new(asm: &Assembler, name: DialectName, dialect: &dyn Dialect) -> Self {
        let mut collaborators = asm.collaborators(dialect);
        collaborators.extend(asm.delegation_targets());

        GenerationReport {
            dialect: name,
            units: asm.unit_count(),
            delegates: asm.delegate_count(),
            delegated: asm.iter_delegated().cloned().collect(),
            collaborators: collaborators.into_iter().collect(),
        }
    }

    pub fn units(&self) -> usize {
        self.units
    }

    pub fn delegates(&self) -> usize {
        self.delegates
    }

    pub fn write(&self, stream: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *stream, self)?;
        writeln!(stream)
    }
}
