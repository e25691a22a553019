//! Install workflow: applying a fully answered plan to a fetched template
//!
//! The steps run strictly in order and every filesystem or git failure
//! aborts the run. `go get` and `go work sync` failures are reported as
//! warnings and the run continues.

use crate::catalog::{FeatureOption, LibraryOption, ProjectLayout};
use crate::rewrite::{self, layout, Registration};
use crate::runtime::tool::{self, CommandRunner};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Import path of the main package's placeholder app module
pub const TEMPLATE_APP_PATH: &str = "github.com/semanggilab/webcorego-template-app";

const MAIN_GO: &str = "webcore/main.go";
const MAIN_GO_MOD: &str = "webcore/go.mod";
const LIBRARIES_GO: &str = "webcore/deps/libraries.go";
const PACKAGES_GO: &str = "webcore/deps/packages.go";
const GO_WORK: &str = "go.work";
const MAIN_MODULE_DIR: &str = "webcore";

/// Everything the installer needs to know, validated
#[derive(Debug, Clone)]
pub struct InstallPlan {
    pub project_dir: PathBuf,
    pub module_name: String,
    pub libraries: Vec<&'static LibraryOption>,
    pub layout: ProjectLayout,
    pub features: Vec<&'static FeatureOption>,
    pub git_init: bool,
}

impl InstallPlan {
    pub fn feature_names(&self) -> Vec<&'static str> {
        self.features.iter().map(|f| f.name).collect()
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.project_dir.join(relative)
    }
}

/// Receives progress of the install steps
pub trait Progress {
    fn step(&mut self, message: &str);
    fn done(&mut self, message: &str);
    fn warn(&mut self, message: &str);
}

/// Progress sink that only emits tracing events
#[derive(Debug, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn step(&mut self, message: &str) {
        info!("{}", message);
    }

    fn done(&mut self, message: &str) {
        info!("{}", message);
    }

    fn warn(&mut self, message: &str) {
        warn!("{}", message);
    }
}

/// Apply `plan` to the template tree at `plan.project_dir`
pub async fn apply_configuration<R: CommandRunner, P: Progress>(
    plan: &InstallPlan,
    runner: &R,
    progress: &mut P,
) -> Result<()> {
    progress.step("Updating webcore/main.go...");
    rewrite::replace_in_file(&plan.path(MAIN_GO), TEMPLATE_APP_PATH, &plan.module_name)
        .context("failed to update webcore/main.go")?;

    progress.step("Updating webcore/go.mod...");
    if rewrite::set_module_directive(&plan.path(MAIN_GO_MOD), &plan.module_name)
        .context("failed to update webcore/go.mod")?
    {
        progress.done(&format!("Updated module name to: {}", plan.module_name));
    } else {
        progress.warn("No module directive found in webcore/go.mod");
    }

    progress.step("Updating webcore/deps/libraries.go...");
    rewrite::write_manifest(&plan.path(LIBRARIES_GO), &plan.libraries)
        .context("failed to update libraries.go")?;
    progress.done("Updated webcore/deps/libraries.go with selected libraries");

    install_libraries(plan, runner, progress).await;

    progress.step("Copying example config files...");
    rewrite::prepare_config_files(&plan.project_dir, &plan.libraries)
        .context("failed to copy config files")?;
    progress.done("Example config files copied");

    progress.step(&format!("Applying {} layout...", plan.layout.kind()));
    let module_root = rewrite::apply_layout(
        &plan.project_dir,
        &plan.layout,
        &plan.module_name,
        plan.feature_names().as_slice(),
    )
    .with_context(|| format!("failed to apply {} layout", plan.layout.kind()))?;
    progress.done(&format!(
        "Module code is in {}",
        module_root
            .strip_prefix(&plan.project_dir)
            .unwrap_or(&module_root)
            .display()
    ));

    progress.step("Updating webcore/deps/packages.go...");
    match rewrite::update_registration(&plan.path(PACKAGES_GO), &plan.layout, &plan.module_name)
        .context("failed to update packages.go")?
    {
        Registration::Slots | Registration::Markers => {
            progress.done("Updated webcore/deps/packages.go")
        }
        Registration::Missing => progress.warn(
            "Could not find the module registration markers in webcore/deps/packages.go; register your module manually",
        ),
    }

    if module_root != layout::placeholder_dir(&plan.project_dir)
        && layout::remove_placeholder(&plan.project_dir).context("failed to cleanup dummy folder")?
    {
        progress.done("Removed modules/dummy folder");
    }

    if let ProjectLayout::MonoRepo { folder, .. } = &plan.layout {
        update_workspace(plan, folder, runner, progress).await?;
    }

    if plan.git_init {
        progress.step("Initializing git repository...");
        tool::git_init(runner, &plan.project_dir)
            .await
            .context("failed to initialize git")?;
        progress.done("Git repository initialized");
    }

    Ok(())
}

/// `go get` once per selected library; failures are warnings
async fn install_libraries<R: CommandRunner, P: Progress>(
    plan: &InstallPlan,
    runner: &R,
    progress: &mut P,
) {
    let module_dir = plan.path(MAIN_MODULE_DIR);
    for lib in &plan.libraries {
        progress.step(&format!("Installing: {}", lib.import_path));
        if let Err(e) = tool::go_get(runner, lib.import_path, &module_dir).await {
            progress.warn(&format!("Failed to install {}: {}", lib.import_path, e));
        }
    }
    progress.done("Libraries installed");
}

async fn update_workspace<R: CommandRunner, P: Progress>(
    plan: &InstallPlan,
    folder: &str,
    runner: &R,
    progress: &mut P,
) -> Result<()> {
    progress.step("Updating go.work file...");
    let updated = rewrite::update_workspace(&plan.path(GO_WORK), folder)
        .context("failed to update go.work")?;
    if !updated {
        progress.warn("No ./modules/dummy line found in go.work, skipping update");
        return Ok(());
    }
    progress.done(&format!("Replaced ./modules/dummy with ./modules/{}", folder));

    progress.step("Running go work sync...");
    match tool::go_work_sync(runner, &plan.project_dir).await {
        Ok(()) => progress.done("go.work updated and synced"),
        Err(e) => progress.warn(&format!("go work sync completed with warnings: {}", e)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_library;
    use crate::error::Result as ScaffoldResult;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<String>>,
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> ScaffoldResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(tool::display_command(program, args));
            Ok(())
        }
    }

    fn plan(project_dir: &Path, keys: &[&str]) -> InstallPlan {
        InstallPlan {
            project_dir: project_dir.to_path_buf(),
            module_name: "github.com/x/y".to_string(),
            libraries: keys.iter().map(|k| find_library(k).unwrap()).collect(),
            layout: ProjectLayout::Simple,
            features: Vec::new(),
            git_init: false,
        }
    }

    #[tokio::test]
    async fn test_go_get_runs_for_every_selected_library() {
        let dir = TempDir::new().unwrap();
        let plan = plan(dir.path(), &["kafka:producer", "kafka:consumer", "redis"]);
        let runner = RecordingRunner::default();

        install_libraries(&plan, &runner, &mut LogProgress).await;

        assert_eq!(
            *runner.calls.lock().unwrap(),
            vec![
                "go get github.com/webcore-go/lib-kafka",
                "go get github.com/webcore-go/lib-kafka",
                "go get github.com/webcore-go/lib-redis",
            ]
        );
    }

    #[tokio::test]
    async fn test_log_progress_run_stops_at_missing_main_go() {
        let dir = TempDir::new().unwrap();
        let plan = plan(dir.path(), &["redis"]);
        let runner = RecordingRunner::default();

        let err = apply_configuration(&plan, &runner, &mut LogProgress)
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("webcore/main.go"));
        assert!(runner.calls.lock().unwrap().is_empty());
    }
}
