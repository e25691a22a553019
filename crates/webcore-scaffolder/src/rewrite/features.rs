//! Removing the module folders of features that were not selected

use crate::catalog::FEATURES;
use crate::error::{Result, ScaffoldError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Folders under `module_root` that belong to features missing from `enabled`
pub fn plan_pruning<S: AsRef<str>>(module_root: &Path, enabled: &[S]) -> Vec<PathBuf> {
    FEATURES
        .iter()
        .filter(|feature| !enabled.iter().any(|name| name.as_ref() == feature.name))
        .flat_map(|feature| feature.folders.iter())
        .map(|folder| module_root.join(folder))
        .filter(|path| path.is_dir())
        .collect()
}

/// Delete the folders of every feature not in `enabled`.
///
/// Folders that do not exist are skipped. Returns the removed paths.
pub fn prune_features<S: AsRef<str>>(module_root: &Path, enabled: &[S]) -> Result<Vec<PathBuf>> {
    let planned = plan_pruning(module_root, enabled);

    for path in &planned {
        fs::remove_dir_all(path).map_err(|e| ScaffoldError::remove(path, e))?;
        info!(path = %path.display(), "removed feature folder");
    }

    Ok(planned)
}
