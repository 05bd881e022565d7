//! Row to unit synthesis

use crate::synth::{Argument, Delegate, Identity, Step, Unit};
use crate::table::InstructionRow;
use crate::vocab::{Direction, Operand, Operation, Register, Width};
use thiserror::Error;

/// Why a row could not be synthesized.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Reason {
    #[error("{0} is not a modeled operation")]
    UnknownOperation(String),

    #[error("{0} is not a modeled operand")]
    UnknownOperand(String),

    #[error("{operation} takes at most {accepted} operands, {given} given")]
    TooManyOperands {
        operation: Operation,
        accepted: usize,
        given: usize,
    },

    #[error("{0} has no width of its own and none of its operands have one")]
    Unsized(Operation),

    #[error("immediate operand {0} cannot be written to")]
    WrittenImmediate(String),
}

/// A row the synthesizer can't generate code for.
///
/// The row's behavior has to be supplied by a hand-written routine in the
/// emulator instead; `delegate` builds the wrapper that calls it.
#[derive(Clone, Debug)]
pub struct Unresolved<'a> {
    row: &'a InstructionRow,
    identity: Identity,
    reason: Reason,
}

impl<'a> Unresolved<'a> {
    pub fn row(&self) -> &'a InstructionRow {
        self.row
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    pub fn delegate(&self) -> Delegate {
        Delegate::new(self.identity.clone(), self.row.cycles().taken)
    }
}

/// An operand once it has been lined up with how its operation uses it.
struct Position {
    slot: usize,
    operand: Operand,
    direction: Direction,
}

impl Position {
    fn register(&self) -> Option<Register> {
        match self.operand {
            Operand::Register(reg) => Some(reg),
            _ => None,
        }
    }

    fn is_status(&self) -> bool {
        self.register().map_or(false, Register::is_status)
    }

    fn argument(&self) -> Argument {
        match self.operand {
            Operand::Register(reg) if reg.is_status() => Argument::Status {
                direction: self.direction,
            },
            Operand::Register(register) => Argument::Register {
                slot: self.slot,
                register,
                direction: self.direction,
            },
            _ => Argument::Data {
                slot: self.slot,
                direction: self.direction,
            },
        }
    }
}

/// Synthesize the code for one row of the instruction table.
///
/// The generated unit fetches its operands, tests its condition, runs the
/// operation and writes back whatever the operation modified, in that
/// order. Rows that fall outside the modeled vocabulary are returned as
/// `Unresolved`.
pub fn synthesize(row: &InstructionRow) -> Result<Unit, Unresolved<'_>> {
    let tokens: Vec<&str> = row.iter_operands().collect();
    let (identity, operand_tokens) = Identity::of(row.mnemonic(), &tokens);

    let unresolved = |reason| Unresolved {
        row,
        identity: identity.clone(),
        reason,
    };

    let operation = Operation::from_mnemonic(identity.mnemonic())
        .ok_or_else(|| unresolved(Reason::UnknownOperation(identity.mnemonic().to_string())))?;
    let directions = operation.directions();

    if operand_tokens.len() > directions.len() {
        return Err(unresolved(Reason::TooManyOperands {
            operation,
            accepted: directions.len(),
            given: operand_tokens.len(),
        }));
    }

    let mut positions = Vec::new();

    for (slot, (token, direction)) in operand_tokens.iter().zip(directions).enumerate() {
        let operand = Operand::from_token(token)
            .ok_or_else(|| unresolved(Reason::UnknownOperand(token.to_string())))?;

        if operand.is_immediate() && !operand.is_indirect() && direction.writes() {
            return Err(unresolved(Reason::WrittenImmediate(token.to_string())));
        }

        positions.push(Position {
            slot,
            operand,
            direction: *direction,
        });
    }

    let width = Width::widest(
        std::iter::once(operation.default_width()).chain(positions.iter().map(|p| p.operand.width())),
    )
    .ok_or_else(|| unresolved(Reason::Unsized(operation)))?;

    let mut steps = Vec::new();

    for pos in positions.iter() {
        match pos.operand {
            Operand::Memory(mode) => {
                steps.push(Step::ComputeAddress {
                    slot: pos.slot,
                    mode,
                });

                if pos.direction.reads() {
                    steps.push(Step::ReadMemory {
                        slot: pos.slot,
                        width,
                        mutable: pos.direction.writes(),
                    });
                } else {
                    steps.push(Step::ReserveMemory {
                        slot: pos.slot,
                        width,
                    });
                }
            }
            Operand::Immediate(imm) => steps.push(Step::FetchImmediate {
                slot: pos.slot,
                width,
                fetch: imm.width(),
            }),
            Operand::Register(_) => {}
        }
    }

    if let Some(condition) = identity.condition() {
        steps.push(Step::SkipUnless {
            condition,
            cycles: row.cycles().not_taken,
        });
    }

    let mut write_status = false;

    for pos in positions.iter().filter(|p| p.is_status()) {
        match (pos.direction.reads(), pos.direction.writes()) {
            (true, writes) => {
                steps.push(Step::ReadStatus { mutable: writes });
                write_status |= writes;
            }
            (false, _) => {
                steps.push(Step::ReserveStatus);
                write_status = true;
            }
        }
    }

    steps.push(Step::Execute {
        operation,
        width,
        arguments: positions.iter().map(Position::argument).collect(),
    });

    if write_status {
        steps.push(Step::WriteStatus);
    }

    for pos in positions.iter() {
        if pos.operand.is_indirect() && pos.direction.writes() {
            steps.push(Step::WriteMemory {
                slot: pos.slot,
                width,
            });
        }
    }

    let block_interrupts = operation.restores_interrupts()
        || positions.iter().any(|p| {
            p.direction.writes() && p.register().map_or(false, Register::masks_interrupts)
        });

    steps.push(Step::Return {
        cycles: row.cycles().taken,
        block_interrupts,
    });

    Ok(Unit::new(identity, steps))
}
