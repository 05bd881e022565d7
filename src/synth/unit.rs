//! Synthesized code, independent of the language it is printed in

use crate::synth::Identity;
use crate::vocab::{AddressingMode, Condition, Direction, Operation, Register, Width};

/// One value passed to an operation routine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    /// A value in operand slot `slot`, loaded from memory or the
    /// instruction stream by an earlier step.
    Data { slot: usize, direction: Direction },

    /// The status register's value, loaded by `Step::ReadStatus` or reserved
    /// by `Step::ReserveStatus`.
    Status { direction: Direction },

    /// A register in the register file, named directly.
    Register {
        slot: usize,
        register: Register,
        direction: Direction,
    },
}

impl Argument {
    pub fn direction(&self) -> Direction {
        match self {
            Argument::Data { direction, .. } => *direction,
            Argument::Status { direction } => *direction,
            Argument::Register { direction, .. } => *direction,
        }
    }
}

/// One statement of a synthesized unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Compute the effective address of a memory operand into `addr<slot>`.
    ComputeAddress { slot: usize, mode: AddressingMode },

    /// Read `data<slot>` from `addr<slot>`.
    ReadMemory {
        slot: usize,
        width: Width,
        mutable: bool,
    },

    /// Declare `data<slot>` for an operand that is only written.
    ReserveMemory { slot: usize, width: Width },

    /// Fetch `data<slot>` from the instruction stream.
    ///
    /// `fetch` is how many bytes the operand occupies in the stream; `width`
    /// is the width the operation consumes it at.
    FetchImmediate {
        slot: usize,
        width: Width,
        fetch: Width,
    },

    /// Skip the rest of the instruction unless `condition` holds.
    SkipUnless { condition: Condition, cycles: u32 },

    /// Load the status register.
    ReadStatus { mutable: bool },

    /// Declare the status register's value for an operation that only
    /// writes it.
    ReserveStatus,

    /// Run the operation itself.
    Execute {
        operation: Operation,
        width: Width,
        arguments: Vec<Argument>,
    },

    /// Store the status register.
    WriteStatus,

    /// Store `data<slot>` back to `addr<slot>`.
    WriteMemory { slot: usize, width: Width },

    /// Return the instruction's cost. With `block_interrupts`, one more
    /// instruction is executed first and its cost added on.
    Return { cycles: u32, block_interrupts: bool },
}

impl Step {
    /// The external routine this step calls, if any.
    pub fn routine(&self) -> Option<Routine> {
        match self {
            Step::ComputeAddress { mode, .. } => Some(Routine::Calc(*mode)),
            Step::ReadMemory { width, .. } => Some(Routine::Read(*width)),
            Step::FetchImmediate { fetch, .. } => Some(Routine::Immediate(*fetch)),
            Step::ReadStatus { .. } => Some(Routine::ReadStatus),
            Step::Execute {
                operation, width, ..
            } => Some(Routine::Operation(*operation, *width)),
            Step::WriteStatus => Some(Routine::WriteStatus),
            Step::WriteMemory { width, .. } => Some(Routine::Write(*width)),
            Step::ReserveMemory { .. }
            | Step::SkipUnless { .. }
            | Step::ReserveStatus
            | Step::Return { .. } => None,
        }
    }
}

/// Routines that generated code calls but doesn't define.
///
/// These make up the interface between generated code and the rest of the
/// emulator. Each dialect decides what they're called.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Routine {
    Calc(AddressingMode),
    Read(Width),
    Write(Width),
    Immediate(Width),
    ReadStatus,
    WriteStatus,
    Operation(Operation, Width),

    /// Called for opcodes with no instruction.
    Undefined,
}

/// A fully synthesized instruction implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    identity: Identity,
    steps: Vec<Step>,
}

impl Unit {
    pub fn new(identity: Identity, steps: Vec<Step>) -> Self {
        Unit { identity, steps }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn name(&self) -> String {
        self.identity.name()
    }

    pub fn iter_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    pub fn iter_routines(&self) -> impl Iterator<Item = Routine> + '_ {
        self.steps.iter().filter_map(Step::routine)
    }
}

/// A wrapper around an instruction implemented by hand in the emulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delegate {
    identity: Identity,
    cycles: u32,
}

impl Delegate {
    pub fn new(identity: Identity, cycles: u32) -> Self {
        Delegate { identity, cycles }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The name of the generated wrapper.
    pub fn name(&self) -> String {
        format!("clock_{}", self.identity.name())
    }

    /// The name of the hand-written routine the wrapper calls.
    pub fn routine(&self) -> String {
        self.identity.name()
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}
