//! Operation vocabulary

use crate::vocab::Width;
use std::{fmt, str};

/// How an operation uses one of its operands.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
    ReadWrite,
}

impl Direction {
    pub fn reads(self) -> bool {
        matches!(self, Direction::Read | Direction::ReadWrite)
    }

    pub fn writes(self) -> bool {
        matches!(self, Direction::Write | Direction::ReadWrite)
    }
}

/// Enumeration of every S1C88 operation the synthesizer knows how to wire
/// up.
///
/// Anything not listed here (`NOP`, `HALT`, block moves, and friends) is
/// implemented by hand in the emulator.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    Inc,
    Dec,
    Sla,
    Sll,
    Sra,
    Srl,
    Rl,
    Rlc,
    Rr,
    Rrc,
    Cpl,
    Neg,
    Ld,
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Or,
    Xor,
    Cp,
    Bit,
    Call,
    Cars,
    Carl,
    Jrs,
    Jrl,
    Jp,
    Int,
    Rete,
    Push,
    Pop,
    Ex,
    Swap,
}

impl Operation {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        use Operation::*;

        Some(match mnemonic {
            "INC" => Inc,
            "DEC" => Dec,
            "SLA" => Sla,
            "SLL" => Sll,
            "SRA" => Sra,
            "SRL" => Srl,
            "RL" => Rl,
            "RLC" => Rlc,
            "RR" => Rr,
            "RRC" => Rrc,
            "CPL" => Cpl,
            "NEG" => Neg,
            "LD" => Ld,
            "ADD" => Add,
            "ADC" => Adc,
            "SUB" => Sub,
            "SBC" => Sbc,
            "AND" => And,
            "OR" => Or,
            "XOR" => Xor,
            "CP" => Cp,
            "BIT" => Bit,
            "CALL" => Call,
            "CARS" => Cars,
            "CARL" => Carl,
            "JRS" => Jrs,
            "JRL" => Jrl,
            "JP" => Jp,
            "INT" => Int,
            "RETE" => Rete,
            "PUSH" => Push,
            "POP" => Pop,
            "EX" => Ex,
            "SWAP" => Swap,
            _ => return None,
        })
    }

    /// The lowercase mnemonic, which also names the `op_` routine.
    pub fn name(self) -> &'static str {
        use Operation::*;

        match self {
            Inc => "inc",
            Dec => "dec",
            Sla => "sla",
            Sll => "sll",
            Sra => "sra",
            Srl => "srl",
            Rl => "rl",
            Rlc => "rlc",
            Rr => "rr",
            Rrc => "rrc",
            Cpl => "cpl",
            Neg => "neg",
            Ld => "ld",
            Add => "add",
            Adc => "adc",
            Sub => "sub",
            Sbc => "sbc",
            And => "and",
            Or => "or",
            Xor => "xor",
            Cp => "cp",
            Bit => "bit",
            Call => "call",
            Cars => "cars",
            Carl => "carl",
            Jrs => "jrs",
            Jrl => "jrl",
            Jp => "jp",
            Int => "int",
            Rete => "rete",
            Push => "push",
            Pop => "pop",
            Ex => "ex",
            Swap => "swap",
        }
    }

    /// The width the operation works at when no operand is wider.
    ///
    /// Stack and exchange operations have no width of their own; they move
    /// whatever their operands are.
    pub fn default_width(self) -> Option<Width> {
        use Operation::*;

        match self {
            Call | Carl | Jrl => Some(Width::Word),
            Push | Pop | Ex => None,
            _ => Some(Width::Byte),
        }
    }

    /// How the operation uses each operand position. The length of the
    /// slice is the most operands the operation accepts.
    pub fn directions(self) -> &'static [Direction] {
        use Direction::*;
        use Operation::*;

        match self {
            Inc | Dec | Sla | Sll | Sra | Srl | Rl | Rlc | Rr | Rrc | Cpl | Neg | Swap => {
                &[ReadWrite]
            }
            Ld => &[Write, Read],
            Add | Adc | Sub | Sbc | And | Or | Xor => &[ReadWrite, Read],
            Cp | Bit => &[Read, Read],
            Call | Cars | Carl | Jrs | Jrl | Jp | Int => &[Read],
            Rete => &[],
            Push => &[Read],
            Pop => &[Write],
            Ex => &[ReadWrite, ReadWrite],
        }
    }

    /// Returning from an interrupt restores the interrupt mask, so the next
    /// instruction must run before any interrupt is taken.
    pub fn restores_interrupts(self) -> bool {
        self == Operation::Rete
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name().to_ascii_uppercase())
    }
}

impl str::FromStr for Operation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::from_mnemonic(s).ok_or(())
    }
}
