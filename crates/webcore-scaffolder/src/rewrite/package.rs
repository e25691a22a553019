//! Retargeting Go sources from the placeholder package to the user's module

use super::file::read_to_string;
use super::staging::EditSet;
use crate::error::{Result, ScaffoldError};
use regex::{Captures, Regex};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extension of the files that are rewritten
pub const SOURCE_EXTENSION: &str = "go";

/// File declaring the module's `ModuleName` constant
pub const SENTINEL_FILE: &str = "module.go";

/// One package rename plus one import path rewrite
#[derive(Debug, Clone, Copy)]
pub struct Retarget<'a> {
    pub old_package: &'a str,
    pub new_package: &'a str,
    pub old_import: &'a str,
    pub new_import: &'a str,
}

/// Compiled form of a [`Retarget`], reused across every file of a walk
pub struct Retargeter<'a> {
    retarget: Retarget<'a>,
    package_line: Regex,
    module_name_const: Regex,
}

impl<'a> Retargeter<'a> {
    pub fn new(retarget: Retarget<'a>) -> Result<Self> {
        let old = regex::escape(retarget.old_package);
        Ok(Self {
            retarget,
            package_line: Regex::new(&format!(r"(?m)^package {}(\r?)$", old))?,
            module_name_const: Regex::new(&format!(
                r#"(?m)^[ \t]+ModuleName[ \t]*=[ \t]*"{}"(\r?)$"#,
                old
            ))?,
        })
    }

    /// Rewrite one source file's contents.
    ///
    /// The package declaration must fill its whole line, so an import path
    /// that merely contains the old package name is left to the import rule,
    /// which runs last.
    pub fn rewrite(&self, file_name: &str, contents: &str) -> String {
        let new_package = self.retarget.new_package;

        let mut out = self
            .package_line
            .replace_all(contents, |caps: &Captures| {
                format!("package {}{}", new_package, &caps[1])
            })
            .into_owned();

        if file_name == SENTINEL_FILE {
            out = self
                .module_name_const
                .replace_all(&out, |caps: &Captures| {
                    format!("\tModuleName    = \"{}\"{}", new_package, &caps[1])
                })
                .into_owned();
        }

        if !self.retarget.old_import.is_empty() {
            out = out.replace(self.retarget.old_import, self.retarget.new_import);
        }

        out
    }

    /// Stage the rewrite of every source file under `root`
    pub fn stage_tree(&self, root: &Path) -> Result<EditSet> {
        let mut edits = EditSet::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| ScaffoldError::Walk {
                path: root.to_path_buf(),
                source: e,
            })?;
            if !entry.file_type().is_file() || !is_source_file(entry.path()) {
                continue;
            }

            let contents = read_to_string(entry.path())?;
            let file_name = entry.file_name().to_string_lossy();
            let updated = self.rewrite(&file_name, &contents);
            edits.stage(entry.path(), contents, updated);
        }

        Ok(edits)
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Rewrite package declarations and import paths of every source file under `root`.
///
/// All files are read and transformed before any is written. Returns the
/// number of files changed.
pub fn retarget_tree(root: &Path, retarget: Retarget<'_>) -> Result<usize> {
    info!(
        root = %root.display(),
        from = retarget.old_package,
        to = retarget.new_package,
        "retargeting package"
    );

    let edits = Retargeter::new(retarget)?.stage_tree(root)?;
    for path in edits.paths() {
        debug!(path = %path.display(), "retargeted");
    }
    edits.commit()
}
