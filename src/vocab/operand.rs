//! Operand vocabulary

use crate::vocab::Width;
use std::{fmt, str};

/// Enumeration of all architectural S1C88 registers that instructions can
/// name directly.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Register {
    A,
    B,
    L,
    H,
    BR,
    SC,
    EP,
    XP,
    YP,
    NB,
    BA,
    HL,
    IX,
    IY,
    SP,
    PC,
}

impl Register {
    pub fn width(self) -> Width {
        use Register::*;

        match self {
            A | B | L | H | BR | SC | EP | XP | YP | NB => Width::Byte,
            BA | HL | IX | IY | SP | PC => Width::Word,
        }
    }

    /// The name of the register's field in the emulator's register file.
    pub fn field(self) -> &'static str {
        use Register::*;

        match self {
            A => "a",
            B => "b",
            L => "l",
            H => "h",
            BR => "br",
            SC => "sc",
            EP => "ep",
            XP => "xp",
            YP => "yp",
            NB => "nb",
            BA => "ba",
            HL => "hl",
            IX => "ix",
            IY => "iy",
            SP => "sp",
            PC => "pc",
        }
    }

    /// SC holds the flags and the interrupt mask, and is not a plain field:
    /// it has to go through `cpu_readSC` and `cpu_writeSC`.
    pub fn is_status(self) -> bool {
        self == Register::SC
    }

    /// Writing this register may change which interrupts are deliverable.
    pub fn masks_interrupts(self) -> bool {
        matches!(self, Register::SC | Register::NB)
    }
}

/// Operands fetched inline from the instruction stream.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Immediate {
    Imm8,
    Imm16,
}

impl Immediate {
    pub fn width(self) -> Width {
        match self {
            Immediate::Imm8 => Width::Byte,
            Immediate::Imm16 => Width::Word,
        }
    }

    pub fn canonical_name(self) -> &'static str {
        match self {
            Immediate::Imm8 => "imm8",
            Immediate::Imm16 => "imm16",
        }
    }
}

/// Memory addressing modes.
///
/// Each of these names a `calc_` routine in the emulator that consumes any
/// displacement bytes and yields the effective address.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum AddressingMode {
    /// `[kk]`, the vector table used by `INT`.
    Vector,
    /// `[hhll]`
    Absolute,
    /// `[HL]`
    RegisterHL,
    /// `[IX]`
    RegisterIX,
    /// `[IY]`
    RegisterIY,
    /// `[BR:ll]`
    BasePage,
    /// `[SP+dd]`
    DisplacedSP,
    /// `[IX+dd]`
    DisplacedIX,
    /// `[IY+dd]`
    DisplacedIY,
    /// `[IX+L]`
    IndexedIX,
    /// `[IY+L]`
    IndexedIY,
}

impl AddressingMode {
    /// Only the vector table has a width of its own; everything else moves
    /// whatever the operation moves.
    pub fn width(self) -> Option<Width> {
        match self {
            AddressingMode::Vector => Some(Width::Word),
            _ => None,
        }
    }

    pub fn canonical_name(self) -> &'static str {
        use AddressingMode::*;

        match self {
            Vector => "vect",
            Absolute => "ind16",
            RegisterHL => "absHL",
            RegisterIX => "absIX",
            RegisterIY => "absIY",
            BasePage => "absBR",
            DisplacedSP => "indDSP",
            DisplacedIX => "indDIX",
            DisplacedIY => "indDIY",
            IndexedIX => "indIIX",
            IndexedIY => "indIIY",
        }
    }

    /// `canonical_name` in snake_case, for hosts with that convention.
    pub fn snake_name(self) -> &'static str {
        use AddressingMode::*;

        match self {
            Vector => "vect",
            Absolute => "ind16",
            RegisterHL => "abs_hl",
            RegisterIX => "abs_ix",
            RegisterIY => "abs_iy",
            BasePage => "abs_br",
            DisplacedSP => "ind_dsp",
            DisplacedIX => "ind_dix",
            DisplacedIY => "ind_diy",
            IndexedIX => "ind_iix",
            IndexedIY => "ind_iiy",
        }
    }
}

/// One operand occurrence in the instruction table.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operand {
    Register(Register),
    Immediate(Immediate),
    Memory(AddressingMode),
}

impl Operand {
    /// Parse an operand out of a table token.
    pub fn from_token(token: &str) -> Option<Self> {
        use AddressingMode::*;
        use Immediate::*;
        use Register::*;

        Some(match token {
            "A" => Operand::Register(A),
            "B" => Operand::Register(B),
            "L" => Operand::Register(L),
            "H" => Operand::Register(H),
            "BR" => Operand::Register(BR),
            "SC" => Operand::Register(SC),
            "EP" => Operand::Register(EP),
            "XP" => Operand::Register(XP),
            "YP" => Operand::Register(YP),
            "NB" => Operand::Register(NB),
            "BA" => Operand::Register(BA),
            "HL" => Operand::Register(HL),
            "IX" => Operand::Register(IX),
            "IY" => Operand::Register(IY),
            "SP" => Operand::Register(SP),
            "PC" => Operand::Register(PC),
            "#nn" | "rr" => Operand::Immediate(Imm8),
            "#mmnn" | "qqrr" => Operand::Immediate(Imm16),
            "[kk]" => Operand::Memory(Vector),
            "[hhll]" => Operand::Memory(Absolute),
            "[HL]" => Operand::Memory(RegisterHL),
            "[IX]" => Operand::Memory(RegisterIX),
            "[IY]" => Operand::Memory(RegisterIY),
            "[BR:ll]" => Operand::Memory(BasePage),
            "[SP+dd]" => Operand::Memory(DisplacedSP),
            "[IX+dd]" => Operand::Memory(DisplacedIX),
            "[IY+dd]" => Operand::Memory(DisplacedIY),
            "[IX+L]" => Operand::Memory(IndexedIX),
            "[IY+L]" => Operand::Memory(IndexedIY),
            _ => return None,
        })
    }

    /// The operand's declared width, or `None` if it takes the width of the
    /// operation it's used with.
    pub fn width(self) -> Option<Width> {
        match self {
            Operand::Register(reg) => Some(reg.width()),
            Operand::Immediate(imm) => Some(imm.width()),
            Operand::Memory(mode) => mode.width(),
        }
    }

    /// Whether executing the operand consumes bytes from the instruction
    /// stream. Memory operands do, since their address bytes follow the
    /// opcode.
    pub fn is_immediate(self) -> bool {
        !matches!(self, Operand::Register(_))
    }

    pub fn is_indirect(self) -> bool {
        matches!(self, Operand::Memory(_))
    }

    pub fn canonical_name(self) -> &'static str {
        match self {
            Operand::Register(reg) => reg.field(),
            Operand::Immediate(imm) => imm.canonical_name(),
            Operand::Memory(mode) => mode.canonical_name(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

impl str::FromStr for Operand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operand::from_token(s).ok_or(())
    }
}
