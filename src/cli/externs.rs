//! Externs command: Lists the routines generated code calls but doesn't
//! define

use crate::cli::common::{assemble, externs as list_externs};
use crate::project::Target;
use std::io::{self, Write};

pub fn externs(target: &Target) -> io::Result<()> {
    let asm = assemble(target)?;
    let dialect = target.dialect().dialect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (name, hand_written) in list_externs(&asm, dialect.as_ref()) {
        if hand_written {
            writeln!(out, "{}\t(delegated)", name)?;
        } else {
            writeln!(out, "{}", name)?;
        }
    }

    Ok(())
}
