//! Template retrieval from the remote git repository or a local directory

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::runtime::tool::{git_clone, CommandRunner};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;
use walkdir::WalkDir;

/// Marker file whose presence means the template was already materialized
pub const INITIALIZED_MARKER: &str = "webcore/go.mod";

/// Template source - either remote git URL or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config, honoring its
    /// URL override environment variable
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.template_url_env())
            .unwrap_or_else(|_| config.default_template_url().to_string());
        Self::remote(&url_str)
    }

    pub fn remote(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| ScaffoldError::InvalidTemplateUrl {
            url: url.to_string(),
            source: e,
        })?;
        Ok(Self::Remote(parsed))
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// What `fetch_template` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The project directory already holds a materialized template
    AlreadyInitialized,
    Cloned,
    /// Copied from a local template directory (number of files)
    Copied(usize),
}

pub fn is_initialized(project_dir: &Path) -> bool {
    project_dir.join(INITIALIZED_MARKER).exists()
}

/// Materialize the template into `project_dir`.
///
/// Skips the download when the directory was already initialized by an
/// earlier run. The cloned repository's `.git` is removed so the project
/// starts without the template's history.
pub async fn fetch_template<R: CommandRunner>(
    source: &TemplateSource,
    project_dir: &Path,
    runner: &R,
) -> Result<FetchOutcome> {
    if is_initialized(project_dir) {
        info!(dir = %project_dir.display(), "template already present, skipping download");
        return Ok(FetchOutcome::AlreadyInitialized);
    }

    match source {
        TemplateSource::Remote(url) => {
            git_clone(runner, url.as_str(), project_dir, Path::new(".")).await?;

            let git_dir = project_dir.join(".git");
            if git_dir.exists() {
                fs::remove_dir_all(&git_dir).map_err(|e| ScaffoldError::remove(&git_dir, e))?;
            }
            Ok(FetchOutcome::Cloned)
        }
        TemplateSource::Local(path) => {
            let copied = copy_local_template(path, project_dir)?;
            Ok(FetchOutcome::Copied(copied))
        }
    }
}

/// Recursively copy a template directory, leaving out any `.git`
fn copy_local_template(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    let walker = WalkDir::new(src)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|e| ScaffoldError::Walk {
            path: src.to_path_buf(),
            source: e,
        })?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| ScaffoldError::CreateDir {
                path: target.clone(),
                source: e,
            })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| ScaffoldError::write(&target, e))?;
            debug!(file = %relative.display(), "copied template file");
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRunner {
        calls: RefCell<Vec<String>>,
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(crate::runtime::tool::display_command(program, args));
            Ok(())
        }
    }

    #[test]
    fn test_remote_rejects_invalid_url() {
        let err = TemplateSource::remote("not a url").unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidTemplateUrl { .. }));
    }

    #[tokio::test]
    async fn test_skips_initialized_project() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("webcore")).unwrap();
        fs::write(dir.path().join("webcore/go.mod"), "module x\n").unwrap();

        let runner = RecordingRunner::default();
        let source = TemplateSource::remote("https://example.com/template.git").unwrap();
        let outcome = fetch_template(&source, dir.path(), &runner).await.unwrap();

        assert_eq!(outcome, FetchOutcome::AlreadyInitialized);
        assert!(runner.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_remote_clones_shallow() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("proj");

        let runner = RecordingRunner::default();
        let source = TemplateSource::remote("https://example.com/template.git").unwrap();
        let outcome = fetch_template(&source, &project, &runner).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Cloned);
        assert_eq!(
            runner.calls.borrow().as_slice(),
            [format!(
                "git clone --depth 1 https://example.com/template.git {}",
                project.display()
            )]
        );
    }

    #[tokio::test]
    async fn test_local_copy_skips_git_dir() {
        let template = TempDir::new().unwrap();
        fs::create_dir_all(template.path().join(".git/objects")).unwrap();
        fs::write(template.path().join(".git/HEAD"), "ref").unwrap();
        fs::create_dir_all(template.path().join("modules/dummy")).unwrap();
        fs::write(template.path().join("modules/dummy/module.go"), "package dummy\n").unwrap();
        fs::write(template.path().join("go.work"), "go 1.22\n").unwrap();

        let out = TempDir::new().unwrap();
        let project = out.path().join("proj");
        let runner = RecordingRunner::default();
        let outcome = fetch_template(
            &TemplateSource::local(template.path().to_path_buf()),
            &project,
            &runner,
        )
        .await
        .unwrap();

        assert_eq!(outcome, FetchOutcome::Copied(2));
        assert!(project.join("modules/dummy/module.go").exists());
        assert!(!project.join(".git").exists());
        assert!(runner.calls.borrow().is_empty());
    }
}
