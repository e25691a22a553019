//! Running external tools (git, go) as child processes
//!
//! Every invocation inherits stdout/stderr so the user sees the tool's own
//! output. Whether a failure is fatal is decided by the caller.

use crate::error::{Result, ScaffoldError};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Runs a program to completion
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `program args...` in `cwd`; a non-zero exit is an error
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// Runner backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let command = display_command(program, args);
        println!("{} {}", "Running:".dimmed(), command.yellow());
        debug!(%command, cwd = %cwd.display(), "spawning");

        let status = TokioCommand::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ScaffoldError::Spawn {
                command: command.clone(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::CommandFailed { command, status })
        }
    }
}

pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `git clone --depth 1 <url> <dest>`
pub async fn git_clone<R: CommandRunner>(
    runner: &R,
    url: &str,
    dest: &Path,
    cwd: &Path,
) -> Result<()> {
    let dest = dest.to_string_lossy().into_owned();
    runner
        .run("git", &["clone", "--depth", "1", url, dest.as_str()], cwd)
        .await
}

pub async fn git_init<R: CommandRunner>(runner: &R, dir: &Path) -> Result<()> {
    runner.run("git", &["init"], dir).await
}

/// `go get <import path>` inside the module at `module_dir`
pub async fn go_get<R: CommandRunner>(runner: &R, import_path: &str, module_dir: &Path) -> Result<()> {
    runner.run("go", &["get", import_path], module_dir).await
}

pub async fn go_work_sync<R: CommandRunner>(runner: &R, workspace_dir: &Path) -> Result<()> {
    runner.run("go", &["work", "sync"], workspace_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        assert_eq!(
            display_command("git", &["clone", "--depth", "1", "url", "dir"]),
            "git clone --depth 1 url dir"
        );
        assert_eq!(display_command("go", &[]), "go");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = SystemRunner
            .run("webcore-definitely-not-installed", &[], Path::new("."))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Spawn { .. }));
    }
}
