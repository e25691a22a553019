//! Materializing the placeholder module as a mono-repo module or as the app package
//!
//! The template ships one example module, `modules/dummy`, whose Go package
//! is `dummy` and whose module path is [`TEMPLATE_MOD_PATH`]. Both layouts
//! start from it:
//!
//! - mono-repo: the folder is renamed to `modules/<folder>` and keeps its own
//!   `go.mod`, listed in the root `go.work`
//! - simple: its contents (minus `go.mod`/`go.sum`) move to `webcore/app`
//!   and become package `app` of the main module

use super::features::prune_features;
use super::file::{read_to_string, replace_in_file, write_atomic};
use super::package::{retarget_tree, Retarget};
use crate::catalog::ProjectLayout;
use crate::error::{Result, ScaffoldError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PLACEHOLDER_MODULE: &str = "dummy";
pub const TEMPLATE_MOD_PATH: &str = "github.com/semanggilab/webcorego-template-mod";
pub const MODULES_DIR: &str = "modules";
pub const APP_DIR: &str = "webcore/app";

/// Files that stay behind when the placeholder module is folded into the app
pub const LOCK_FILES: &[&str] = &["go.mod", "go.sum"];

const REGISTER_CALL_MARKER: &str = "dummy.NewModule()";
const IMPORT_SLOT: &str = "// webcore:module-import";
const REGISTER_SLOT: &str = "// webcore:module-register";

pub fn placeholder_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(MODULES_DIR).join(PLACEHOLDER_MODULE)
}

/// Apply `layout` to the template tree and prune unselected feature folders.
///
/// Returns the directory holding the user's module code.
pub fn apply_layout<S: AsRef<str>>(
    project_dir: &Path,
    layout: &ProjectLayout,
    module_name: &str,
    features: &[S],
) -> Result<PathBuf> {
    let module_root = match layout {
        ProjectLayout::MonoRepo {
            folder,
            module_path,
        } => apply_mono_repo(project_dir, folder, module_path)?,
        ProjectLayout::Simple => apply_simple(project_dir, module_name)?,
    };

    prune_features(&module_root, features)?;
    Ok(module_root)
}

fn apply_mono_repo(project_dir: &Path, folder: &str, module_path: &str) -> Result<PathBuf> {
    crate::settings::validate_folder_name(folder)?;

    let from = placeholder_dir(project_dir);
    let to = project_dir.join(MODULES_DIR).join(folder);

    fs::rename(&from, &to).map_err(|e| ScaffoldError::Move {
        from: from.clone(),
        to: to.clone(),
        source: e,
    })?;
    info!(from = %from.display(), to = %to.display(), "renamed placeholder module");

    replace_in_file(&to.join("go.mod"), TEMPLATE_MOD_PATH, module_path)?;

    let package = crate::settings::package_ident(folder);
    retarget_tree(
        &to,
        Retarget {
            old_package: PLACEHOLDER_MODULE,
            new_package: &package,
            old_import: TEMPLATE_MOD_PATH,
            new_import: module_path,
        },
    )?;

    Ok(to)
}

fn apply_simple(project_dir: &Path, module_name: &str) -> Result<PathBuf> {
    let from = placeholder_dir(project_dir);
    let app = project_dir.join(APP_DIR);

    fs::create_dir_all(&app).map_err(|e| ScaffoldError::CreateDir {
        path: app.clone(),
        source: e,
    })?;

    let entries = fs::read_dir(&from).map_err(|e| ScaffoldError::read(&from, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScaffoldError::read(&from, e))?;
        names.push(entry.file_name());
    }
    names.sort();

    for name in names {
        if LOCK_FILES.iter().any(|lock| name == *lock) {
            continue;
        }
        let src = from.join(&name);
        let dst = app.join(&name);
        fs::rename(&src, &dst).map_err(|e| ScaffoldError::Move {
            from: src.clone(),
            to: dst.clone(),
            source: e,
        })?;
        debug!(from = %src.display(), to = %dst.display(), "moved");
    }
    info!(to = %app.display(), "moved placeholder module into app");

    let app_import = format!("{}/app", module_name);
    retarget_tree(
        &app,
        Retarget {
            old_package: PLACEHOLDER_MODULE,
            new_package: "app",
            old_import: TEMPLATE_MOD_PATH,
            new_import: &app_import,
        },
    )?;

    Ok(app)
}

/// How the registration file was rewired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Lines inserted at the template's extension slots
    Slots,
    /// Placeholder import and constructor call replaced in place
    Markers,
    /// Neither slots nor both placeholder markers were found
    Missing,
}

/// Import line and constructor call that register the user's module
pub fn registration_lines(layout: &ProjectLayout, module_name: &str) -> (String, String) {
    match layout {
        ProjectLayout::MonoRepo { module_path, .. } => {
            let ident = layout.package_ident();
            (
                format!("\t{} \"{}\"", ident, module_path),
                format!("\t{}.NewModule(),", ident),
            )
        }
        ProjectLayout::Simple => (
            format!("\tapp \"{}/app\"", module_name),
            "\tapp.NewModule(),".to_string(),
        ),
    }
}

/// Rewire a registration file's contents from the placeholder module to the user's module
pub fn rewire_registration(content: &str, import_line: &str, call_line: &str) -> (String, Registration) {
    let lines: Vec<&str> = content.split('\n').collect();

    let is_slot = |line: &str, slot: &str| line.trim() == slot;
    let has_slots = lines.iter().any(|&l| is_slot(l, IMPORT_SLOT))
        && lines.iter().any(|&l| is_slot(l, REGISTER_SLOT));

    if has_slots {
        let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 2);
        for &line in &lines {
            if line.contains(TEMPLATE_MOD_PATH) || line.contains(REGISTER_CALL_MARKER) {
                continue;
            }
            if is_slot(line, IMPORT_SLOT) {
                out.push(import_line);
            } else if is_slot(line, REGISTER_SLOT) {
                out.push(call_line);
            }
            out.push(line);
        }
        return (out.join("\n"), Registration::Slots);
    }

    let mut out: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    let import_idx = out.iter().position(|l| l.contains(TEMPLATE_MOD_PATH));
    let call_idx = out.iter().position(|l| l.contains(REGISTER_CALL_MARKER));

    if let Some(idx) = import_idx {
        out[idx] = import_line.to_string();
    }
    if let Some(idx) = call_idx {
        out[idx] = call_line.to_string();
    }

    let outcome = if import_idx.is_some() && call_idx.is_some() {
        Registration::Markers
    } else {
        Registration::Missing
    };
    (out.join("\n"), outcome)
}

/// Rewire the registration file at `path` for `layout`
pub fn update_registration(
    path: &Path,
    layout: &ProjectLayout,
    module_name: &str,
) -> Result<Registration> {
    let content = read_to_string(path)?;
    let (import_line, call_line) = registration_lines(layout, module_name);
    let (updated, outcome) = rewire_registration(&content, &import_line, &call_line);

    if updated != content {
        write_atomic(path, updated.as_bytes())?;
    }
    debug!(path = %path.display(), ?outcome, "rewired module registration");
    Ok(outcome)
}

/// Point the `./modules/dummy` entry of a `go.work` at `./modules/<folder>`.
///
/// Returns false when the workspace does not list the placeholder module.
pub fn update_workspace(go_work: &Path, folder: &str) -> Result<bool> {
    let content = read_to_string(go_work)?;
    let placeholder = format!("./{}/{}", MODULES_DIR, PLACEHOLDER_MODULE);

    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let Some(idx) = lines.iter().position(|l| l.trim() == placeholder) else {
        return Ok(false);
    };

    lines[idx] = format!("\t./{}/{}", MODULES_DIR, folder);
    write_atomic(go_work, lines.join("\n").as_bytes())?;
    Ok(true)
}

/// Remove whatever is left of the placeholder module. Returns false if it was already gone.
pub fn remove_placeholder(project_dir: &Path) -> Result<bool> {
    let dir = placeholder_dir(project_dir);
    if !dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(&dir).map_err(|e| ScaffoldError::remove(&dir, e))?;
    info!(path = %dir.display(), "removed placeholder module");
    Ok(true)
}
