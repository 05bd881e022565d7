//! Dialect trait

use crate::synth::{Delegate, Routine, Step, Unit};
use std::io::{Result, Write};

/// Trait which represents a particular output language.
///
/// The dispatch assembler decides what gets generated and in which order;
/// a `Dialect` only decides what each piece looks like. Implementations
/// must be deterministic: the same calls must always produce the same
/// bytes.
pub trait Dialect {
    /// The name generated code uses for an external routine.
    fn routine(&self, routine: Routine) -> String;

    /// Emit anything that has to precede the generated units, such as
    /// forward declarations.
    fn emit_preamble(&self, stream: &mut dyn Write) -> Result<()>;

    /// Emit the opening of a unit's definition.
    fn emit_unit_start(&self, stream: &mut dyn Write, name: &str) -> Result<()>;

    /// Emit one statement of a unit's body.
    fn emit_step(&self, stream: &mut dyn Write, step: &Step) -> Result<()>;

    /// Emit the close of a unit's definition.
    fn emit_unit_end(&self, stream: &mut dyn Write) -> Result<()>;

    /// Emit a complete unit.
    ///
    /// The default implementation emits the unit's start, each of its steps
    /// in order, and its end.
    fn emit_unit(&self, stream: &mut dyn Write, unit: &Unit) -> Result<()> {
        self.emit_unit_start(stream, &unit.name())?;

        for step in unit.iter_steps() {
            self.emit_step(stream, step)?;
        }

        self.emit_unit_end(stream)
    }

    /// Emit a wrapper that runs a hand-written instruction and returns its
    /// fixed cost.
    fn emit_delegate(&self, stream: &mut dyn Write, delegate: &Delegate) -> Result<()>;

    /// Emit the opening of the dispatch entry point, up to and including
    /// the start of the primary page's switch.
    fn emit_dispatch_start(&self, stream: &mut dyn Write) -> Result<()>;

    /// Emit one dispatch case at the given nesting depth.
    fn emit_case(&self, stream: &mut dyn Write, depth: usize, opcode: u8, target: &str)
        -> Result<()>;

    /// Emit a case that selects an extended page, up to and including the
    /// start of that page's switch.
    ///
    /// The page's own cases follow at `depth + 1`.
    fn emit_page_case_start(&self, stream: &mut dyn Write, depth: usize, opcode: u8) -> Result<()>;

    /// Emit the close of an extended page's switch.
    fn emit_page_case_end(&self, stream: &mut dyn Write, depth: usize) -> Result<()>;

    /// Emit the case taken by opcodes with no instruction.
    fn emit_default_case(&self, stream: &mut dyn Write, depth: usize) -> Result<()>;

    /// Emit the close of the primary switch and of the entry point.
    fn emit_dispatch_end(&self, stream: &mut dyn Write) -> Result<()>;
}
