//! Common utilities for command implementations

use crate::dialect::Dialect;
use crate::dispatch::Assembler;
use crate::error::Error;
use crate::project::{Project, Target};
use crate::table::Table;
use clap::{App, ArgMatches, SubCommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The project file read when `--project` isn't given.
pub const DEFAULT_PROJECT: &str = "opgen.json";

/// Enumeration of all CLI commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Generate,
    Externs,
}

impl Command {
    /// Enumerate all commands that opgen recognizes.
    pub fn enumerate() -> Vec<Self> {
        use Command::*;

        vec![Generate, Externs]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        match self {
            Command::Generate => SubCommand::with_name("gen")
                .about("Generate instruction implementations and dispatch code (the default)"),
            Command::Externs => SubCommand::with_name("externs")
                .about("List the routines generated code expects the emulator to provide"),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "gen" => Ok(Command::Generate),
            "generate" => Ok(Command::Generate),
            "externs" => Ok(Command::Externs),
            _ => Err(()),
        }
    }
}

/// Work out the settings for this run.
///
/// The project file named by `--project` must exist. The default project
/// file is optional, so a run can be configured entirely from the command
/// line.
pub fn resolve_target(argv: &ArgMatches) -> io::Result<Target> {
    let cli_target = Target::from_arg_matches(argv);

    let project = match argv.value_of("project") {
        Some(filename) => Project::read(Path::new(filename))?,
        None => match Project::read(Path::new(DEFAULT_PROJECT)) {
            Ok(project) => project,
            Err(Error::Io(ref e)) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No {} found, using command line settings only", DEFAULT_PROJECT);
                Project::default()
            }
            Err(e) => return Err(e.into()),
        },
    };

    Ok(project.target().apply_override(&cli_target))
}

/// Load the target's table and assemble it.
pub fn assemble(target: &Target) -> io::Result<Assembler> {
    let path = target.table()?;
    let table = Table::read(path)?;

    if table.is_empty() {
        log::warn!("{} defines no instructions", path.display());
    } else {
        log::info!("Loaded {} instructions from {}", table.len(), path.display());
    }

    Ok(Assembler::from_table(&table, target.prefixes()?)?)
}

/// Where a file is written before it replaces `path`.
fn staging_path(path: &Path) -> io::Result<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a file name", path.display()),
            )
        })?
        .to_os_string();

    name.push(".partial");

    Ok(path.with_file_name(name))
}

/// Write every buffer to its file, or to standard output if it has none.
///
/// Files are staged next to their destination and only moved into place
/// once all of them have been written, so a failure leaves no output behind.
pub fn write_outputs(outputs: &[(Option<&Path>, &[u8])]) -> io::Result<()> {
    let mut staged = Vec::new();

    for (path, data) in outputs.iter() {
        if let Some(path) = path {
            let written = staging_path(path).and_then(|partial| {
                fs::write(&partial, data)?;
                Ok(partial)
            });

            match written {
                Ok(partial) => staged.push((partial, *path)),
                Err(e) => {
                    for (partial, _) in staged.iter() {
                        let _ = fs::remove_file(partial);
                    }

                    return Err(e);
                }
            }
        }
    }

    for (partial, path) in staged.iter() {
        fs::rename(partial, path)?;
    }

    for (path, data) in outputs.iter() {
        if path.is_none() {
            io::stdout().lock().write_all(data)?;
        }
    }

    Ok(())
}

/// The names of every routine `asm`'s output calls but doesn't define,
/// paired with whether it is a hand-written delegation target.
pub fn externs(asm: &Assembler, dialect: &dyn Dialect) -> Vec<(String, bool)> {
    let delegated = asm.delegation_targets();
    let mut all = asm.collaborators(dialect);

    all.extend(delegated.iter().cloned());

    all.into_iter()
        .map(|name| {
            let hand_written = delegated.contains(&name);

            (name, hand_written)
        })
        .collect()
}
