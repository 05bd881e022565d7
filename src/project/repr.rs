//! Project configuration file representation

use crate::dialect::DialectName;
use crate::error::Result;
use crate::project::Target;
use crate::table::Page;
use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory representation of the current project configuration.
///
/// This file is typically read from a file named `opgen.json`. Paths in it
/// are relative to the directory the file is in, so a project can be run
/// from anywhere.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Project {
    table: Option<RelativePathBuf>,
    output: Option<RelativePathBuf>,
    report: Option<RelativePathBuf>,
    dialect: Option<DialectName>,

    #[serde(default)]
    prefixes: BTreeMap<Page, u8>,

    #[serde(skip)]
    root: PathBuf,
}

impl Project {
    pub fn read(filename: &Path) -> Result<Self> {
        let project_file = fs::File::open(filename)?;
        let mut project: Self = serde_json::from_reader(project_file)?;

        project.root = filename
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(project)
    }

    /// Parse a project from a string, with paths relative to `root`.
    pub fn parse(text: &str, root: &Path) -> Result<Self> {
        let mut project: Self = serde_json::from_str(text)?;

        project.root = root.to_path_buf();

        Ok(project)
    }

    /// The settings this project specifies, with paths resolved.
    pub fn target(&self) -> Target {
        let resolve = |path: &Option<RelativePathBuf>| path.as_ref().map(|p| p.to_path(&self.root));

        Target::new(
            resolve(&self.table),
            resolve(&self.output),
            resolve(&self.report),
            self.dialect,
            self.prefixes.clone(),
        )
    }
}
