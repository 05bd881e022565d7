//! Generation target settings

use crate::dialect::DialectName;
use crate::dispatch::Prefixes;
use crate::error::{Error, Result};
use crate::table::Page;
use clap::{App, Arg, ArgMatches, ArgSettings};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Everything needed to run the generator: where the table comes from,
/// where output goes, and how it should look.
///
/// A `Target` can come from the command line or from a project file; the
/// two are merged with `apply_override`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    table: Option<PathBuf>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    dialect: Option<DialectName>,
    prefixes: BTreeMap<Page, u8>,
}

fn validate_dialect(name: String) -> std::result::Result<(), String> {
    DialectName::from_str(&name).map(|_| ()).map_err(|_| {
        let valid: Vec<_> = DialectName::iter()
            .into_iter()
            .map(|d| d.friendly_name())
            .collect();

        format!("{} is not a valid output dialect ({})", name, valid.join(", "))
    })
}

impl Target {
    pub fn new(
        table: Option<PathBuf>,
        output: Option<PathBuf>,
        report: Option<PathBuf>,
        dialect: Option<DialectName>,
        prefixes: BTreeMap<Page, u8>,
    ) -> Self {
        Target {
            table,
            output,
            report,
            dialect,
            prefixes,
        }
    }

    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("table")
                .long("table")
                .value_name("opcodes.csv")
                .help("The instruction table to generate code from.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("dialect")
                .long("dialect")
                .value_name("DIALECT")
                .help("What language to generate.")
                .takes_value(true)
                .validator(validate_dialect)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .value_name("opcodes.inc")
                .help("Where to write generated code. Defaults to standard output.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("report")
                .long("report")
                .value_name("report.json")
                .help("Where to write a JSON summary of the generated code.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
    }

    /// Construct a Target from clap ArgMatches
    pub fn from_arg_matches(args: &ArgMatches) -> Target {
        Target {
            table: args.value_of("table").map(PathBuf::from),
            output: args.value_of("output").map(PathBuf::from),
            report: args.value_of("report").map(PathBuf::from),
            dialect: args
                .value_of("dialect")
                .and_then(|s| DialectName::from_str(s).ok()),
            prefixes: BTreeMap::new(),
        }
    }

    pub fn table(&self) -> Result<&Path> {
        self.table.as_deref().ok_or(Error::MissingTable)
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn report(&self) -> Option<&Path> {
        self.report.as_deref()
    }

    pub fn dialect(&self) -> DialectName {
        self.dialect.unwrap_or_default()
    }

    /// The extended page prefixes, with any the target doesn't set left at
    /// their defaults.
    pub fn prefixes(&self) -> Result<Prefixes> {
        Prefixes::from_map(&self.prefixes)
    }

    /// Merge another target's settings over this one. Anything `other`
    /// specifies wins.
    pub fn apply_override(&self, other: &Target) -> Target {
        let mut prefixes = self.prefixes.clone();
        prefixes.extend(other.prefixes.iter().map(|(p, b)| (*p, *b)));

        Target {
            table: other.table.clone().or_else(|| self.table.clone()),
            output: other.output.clone().or_else(|| self.output.clone()),
            report: other.report.clone().or_else(|| self.report.clone()),
            dialect: other.dialect.or(self.dialect),
            prefixes,
        }
    }
}
