//! Whole-file rewrites with crash-safe replacement

use crate::error::{Result, ScaffoldError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ScaffoldError::read(path, e))
}

/// Replace `path` with `contents` via a temp file in the same directory.
///
/// Permission bits of an existing target are carried over; new files get 0644
/// on unix. A crash leaves either the old or the new file, never a mix.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ScaffoldError::write(path, e))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| ScaffoldError::write(path, e))?;

    match fs::metadata(path) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| ScaffoldError::write(path, e))?,
        Err(_) => set_default_permissions(tmp.as_file()).map_err(|e| ScaffoldError::write(path, e))?,
    }

    tmp.persist(path)
        .map_err(|e| ScaffoldError::write(path, e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

/// Replace every occurrence of `old` with `new` in a file.
///
/// Returns the number of replacements; the file is left untouched when there
/// are none.
pub fn replace_in_file(path: &Path, old: &str, new: &str) -> Result<usize> {
    let content = read_to_string(path)?;
    if old.is_empty() {
        return Ok(0);
    }

    let count = content.matches(old).count();
    if count > 0 {
        write_atomic(path, content.replace(old, new).as_bytes())?;
    }

    debug!(path = %path.display(), count, "replaced literal");
    Ok(count)
}

/// Copy a file through `write_atomic`, so the destination is never half-written
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let content = fs::read(src).map_err(|e| ScaffoldError::read(src, e))?;
    write_atomic(dst, &content)
}

/// Point the first `module ` directive of a `go.mod` at `module_name`.
///
/// Returns false when the file has no module directive.
pub fn set_module_directive(path: &Path, module_name: &str) -> Result<bool> {
    let content = read_to_string(path)?;
    let mut found = false;

    let lines: Vec<String> = content
        .split('\n')
        .map(|line| {
            if !found && line.starts_with("module ") {
                found = true;
                let eol = if line.ends_with('\r') { "\r" } else { "" };
                format!("module {}{}", module_name, eol)
            } else {
                line.to_string()
            }
        })
        .collect();

    if found {
        write_atomic(path, lines.join("\n").as_bytes())?;
    }
    Ok(found)
}
