//! Branch conditions

use std::{fmt, str};

/// Enumeration of all S1C88 execution conditions.
///
/// Conditional instructions test one of these before doing anything that
/// has architectural side effects. The `F` conditions test the four general
/// purpose flag bits; the signed comparisons are derived from `N ^ V`.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Condition {
    C,
    NC,
    Z,
    NZ,
    V,
    NV,
    M,
    P,
    LT,
    LE,
    GT,
    GE,
    F0,
    F1,
    F2,
    F3,
    NF0,
    NF1,
    NF2,
    NF3,
}

impl Condition {
    /// Parse a condition out of a table token.
    pub fn from_token(token: &str) -> Option<Self> {
        use Condition::*;

        match token {
            "C" => Some(C),
            "NC" => Some(NC),
            "Z" => Some(Z),
            "NZ" => Some(NZ),
            "V" => Some(V),
            "NV" => Some(NV),
            "M" => Some(M),
            "P" => Some(P),
            "LT" => Some(LT),
            "LE" => Some(LE),
            "GT" => Some(GT),
            "GE" => Some(GE),
            "F0" => Some(F0),
            "F1" => Some(F1),
            "F2" => Some(F2),
            "F3" => Some(F3),
            "NF0" => Some(NF0),
            "NF1" => Some(NF1),
            "NF2" => Some(NF2),
            "NF3" => Some(NF3),
            _ => None,
        }
    }

    /// The token this condition is written as in the instruction table.
    pub fn token(self) -> &'static str {
        use Condition::*;

        match self {
            C => "C",
            NC => "NC",
            Z => "Z",
            NZ => "NZ",
            V => "V",
            NV => "NV",
            M => "M",
            P => "P",
            LT => "LT",
            LE => "LE",
            GT => "GT",
            GE => "GE",
            F0 => "F0",
            F1 => "F1",
            F2 => "F2",
            F3 => "F3",
            NF0 => "NF0",
            NF1 => "NF1",
            NF2 => "NF2",
            NF3 => "NF3",
        }
    }

    /// The boolean expression over the flag register that holds when the
    /// condition is met.
    ///
    /// The expression is valid in both C++ and Rust, so dialects can splice
    /// it in as-is.
    pub fn expression(self) -> &'static str {
        use Condition::*;

        match self {
            C => "cpu.reg.flag.c",
            NC => "!cpu.reg.flag.c",
            Z => "cpu.reg.flag.z",
            NZ => "!cpu.reg.flag.z",
            V => "cpu.reg.flag.v",
            NV => "!cpu.reg.flag.v",
            M => "cpu.reg.flag.n",
            P => "!cpu.reg.flag.n",
            LT => "cpu.reg.flag.n != cpu.reg.flag.v",
            LE => "(cpu.reg.flag.n != cpu.reg.flag.v) || cpu.reg.flag.z",
            GT => "(cpu.reg.flag.n == cpu.reg.flag.v) && !cpu.reg.flag.z",
            GE => "cpu.reg.flag.n == cpu.reg.flag.v",
            F0 => "cpu.reg.flag.f0",
            F1 => "cpu.reg.flag.f1",
            F2 => "cpu.reg.flag.f2",
            F3 => "cpu.reg.flag.f3",
            NF0 => "!cpu.reg.flag.f0",
            NF1 => "!cpu.reg.flag.f1",
            NF2 => "!cpu.reg.flag.f2",
            NF3 => "!cpu.reg.flag.f3",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl str::FromStr for Condition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::from_token(s).ok_or(())
    }
}
