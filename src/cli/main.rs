//! CLI support for non-command bits

use crate::cli::common::{resolve_target, Command, DEFAULT_PROJECT};
use crate::{cli, project};
use clap::{Arg, ArgSettings};
use std::io;
use std::str::FromStr;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();
    app = app.arg(
        Arg::with_name("project")
            .long("project")
            .value_name(DEFAULT_PROJECT)
            .takes_value(true)
            .help("The project file to load")
            .set(ArgSettings::Global),
    );
    app = project::Target::configure_app(app);

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();
    let (command, submatches) = matches.subcommand();
    let target = resolve_target(submatches.unwrap_or(&matches))?;

    match Command::from_str(command).unwrap_or(Command::Generate) {
        Command::Generate => cli::generate(&target)?,
        Command::Externs => cli::externs(&target)?,
    };

    Ok(())
}
