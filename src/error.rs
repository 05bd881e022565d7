//! Error type for table compilation

use crate::table::Page;
use std::{io, result};
use thiserror::Error;

/// Ways in which a single table line can be malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadErrorKind {
    #[error("expected 13 fields, found {0}")]
    FieldCount(usize),

    #[error("{0:?} is not a hexadecimal opcode between 00 and FF")]
    Opcode(String),

    #[error("{0:?} is not a valid cycle count")]
    Cycles(String),

    #[error("opcode {0:02X} is listed more than once")]
    DuplicateOpcode(u8),

    #[error("defined instruction on page {0} has no mnemonic")]
    EmptyMnemonic(Page),

    #[error("unterminated quoted field")]
    UnterminatedQuote,
}

/// Error type for table compilation.
///
/// Every variant here is fatal: once one is raised, nothing that was
/// generated so far can be trusted. Rows the synthesizer can't handle are
/// not errors; see `synth::Unresolved`.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Underlying cause of error is JSON related
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The instruction table is malformed.
    #[error("instruction table line {line}: {kind}")]
    Load { line: usize, kind: LoadErrorKind },

    /// Two rows share a generated name, but would generate different code.
    #[error("{name} is generated for both {first} and {second}, but their bodies differ")]
    ConflictingUnit {
        name: String,
        first: String,
        second: String,
    },

    /// Two rows with different identities fold to the same generated name.
    #[error("{name} would be generated for both {first} and {second}, which are different instructions")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    /// The same page and opcode were given to the dispatch assembler twice.
    #[error("{0} is defined more than once")]
    DuplicateCase(String),

    /// A primary page opcode is defined on a byte used to select an
    /// extended page.
    #[error("primary opcode {0:02X} is reserved as an extended page prefix")]
    PrefixCollision(u8),

    /// Both extended pages were given the same prefix byte.
    #[error("extended pages cannot share prefix byte {0:02X}")]
    SharedPrefix(u8),

    /// No table was given on the command line or in the project file.
    #[error("no instruction table was specified")]
    MissingTable,
}

impl Error {
    pub fn load(line: usize, kind: LoadErrorKind) -> Self {
        Error::Load { line, kind }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(e) => e,
            Error::Load { .. } => io::Error::new(io::ErrorKind::InvalidData, format!("{}", err)),
            Error::MissingTable => io::Error::new(io::ErrorKind::InvalidInput, format!("{}", err)),
            _ => io::Error::new(io::ErrorKind::Other, format!("{}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
