//! Detection of the external tools the installer shells out to

use anyhow::Result;
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(name: &'static str, program: &str, args: &[&str]) -> ToolInfo {
    match Command::new(program).args(args).output() {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if git is available
pub fn check_git() -> ToolInfo {
    probe("git", "git", &["--version"])
}

/// Check if the Go toolchain is available
pub fn check_go() -> ToolInfo {
    probe("Go", "go", &["version"])
}

/// Check the toolchain. Git is required when the template is cloned; Go is
/// only advisory because every Go step is non-fatal.
pub fn check_tools(needs_git: bool) -> Result<Vec<ToolInfo>> {
    let mut results = Vec::new();

    let git = check_git();
    if needs_git && !git.available {
        anyhow::bail!("Missing required tools:\n  - git (install from https://git-scm.com)");
    }
    results.push(git);
    results.push(check_go());

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_program() {
        let info = probe("nope", "webcore-definitely-not-installed", &["--version"]);
        assert!(!info.available);
        assert!(info.version.is_none());
    }

    #[test]
    fn test_check_tools_without_git_requirement_always_reports() {
        let tools = check_tools(false).unwrap();
        let names: Vec<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["git", "Go"]);
    }
}
