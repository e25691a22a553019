//! Charm-style CLI prompts using cliclack

use crate::catalog::{self, FeatureOption, LayoutKind, LibraryOption, ProjectLayout};
use crate::installer::{apply_configuration, InstallPlan, Progress};
use crate::product::ProductConfig;
use crate::runtime::{check, SystemRunner};
use crate::settings::{self, Answers};
use crate::templates::{fetch_template, FetchOutcome, TemplateSource};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the install command
#[derive(Debug, Clone, Default)]
pub struct InstallArgs {
    /// Local directory to use as the template instead of cloning it
    pub template_dir: Option<PathBuf>,

    /// Answers supplied up front (flags merged over an answers file)
    pub answers: Answers,

    /// Accept defaults for every unanswered prompt (non-interactive mode)
    pub yes: bool,
}

/// Run the installer with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: InstallArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve where the template comes from
    let source = setup_source(config, &args.template_dir)?;

    // Step 2: Check git and Go
    check_tools(source.is_remote())?;

    // Step 3: Project directory, then the template itself
    let project_dir = select_directory(config, &args)?;
    fetch(&source, &project_dir).await?;

    // Step 4: Collect the remaining answers
    let module_name = select_module_name(config, &args)?;
    let libraries = select_libraries(&args)?;
    let layout = select_layout(config, &args, &module_name)?;
    let features = select_features(&args)?;
    let git_init = select_git_init(&args)?;

    // Step 5: Apply
    let plan = InstallPlan {
        project_dir,
        module_name,
        libraries,
        layout,
        features,
        git_init,
    };
    apply_configuration(&plan, &SystemRunner, &mut CliclackProgress).await?;

    // Step 6: Show next steps
    print_next_steps(config, &plan.project_dir)?;

    Ok(())
}

/// Renders install steps as cliclack log lines
struct CliclackProgress;

impl Progress for CliclackProgress {
    fn step(&mut self, message: &str) {
        let _ = cliclack::log::step(message);
    }

    fn done(&mut self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warn(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }
}

fn setup_source<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateSource> {
    let source = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local template from {}", path.display()))?;
            TemplateSource::local(path.clone())
        }
        None => {
            let source = TemplateSource::from_config(config)?;
            if let TemplateSource::Remote(url) = &source {
                cliclack::log::info(format!("Using template repository {}", url))?;
            }
            source
        }
    };

    Ok(source)
}

fn check_tools(needs_git: bool) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match check::check_tools(needs_git) {
        Ok(tools) => {
            let tool_info: Vec<String> = tools
                .iter()
                .map(|t| {
                    if t.available {
                        format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown"))
                    } else {
                        format!("{} (not installed)", t.name)
                    }
                })
                .collect();
            spinner.stop(format!("Detected tools: {}", tool_info.join(", ")));

            if tools.iter().any(|t| t.name == "Go" && !t.available) {
                cliclack::log::warning(
                    "Go is not installed; dependency installation and go work sync will fail",
                )?;
            }
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing tools");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing tools and try again.");
        }
    }
}

fn select_directory<C: ProductConfig>(config: &C, args: &InstallArgs) -> Result<PathBuf> {
    let path = if let Some(dir) = &args.answers.directory {
        let p = settings::normalize_project_dir(&dir.to_string_lossy());
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        PathBuf::from(config.default_project_dir())
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(config.default_project_dir())
            .default_input(config.default_project_dir())
            .interact()?;
        settings::normalize_project_dir(&input)
    };

    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    Ok(path)
}

async fn fetch(source: &TemplateSource, project_dir: &Path) -> Result<()> {
    if source.is_remote() && !crate::templates::is_initialized(project_dir) {
        cliclack::log::step("Cloning template repository...")?;
    }

    let outcome = fetch_template(source, project_dir, &SystemRunner)
        .await
        .context("failed to fetch the template")?;

    match outcome {
        FetchOutcome::AlreadyInitialized => cliclack::log::warning(format!(
            "{} already contains the template, skipping download",
            project_dir.display()
        ))?,
        FetchOutcome::Cloned => cliclack::log::success("Template cloned")?,
        FetchOutcome::Copied(count) => cliclack::log::success(format!(
            "Copied {} template files into {}",
            count,
            project_dir.display()
        ))?,
    }

    Ok(())
}

fn select_module_name<C: ProductConfig>(config: &C, args: &InstallArgs) -> Result<String> {
    let name = if let Some(module) = &args.answers.module {
        module.trim().to_string()
    } else if args.yes {
        config.default_module_name().to_string()
    } else {
        let input: String = cliclack::input("Go module name")
            .placeholder(config.default_module_name())
            .default_input(config.default_module_name())
            .interact()?;
        input.trim().to_string()
    };

    if !settings::is_valid_module_name(&name) {
        cliclack::log::warning(format!(
            "'{}' does not look like a Go module path (e.g. github.com/user/project)",
            name
        ))?;
    }

    Ok(name)
}

fn select_libraries(args: &InstallArgs) -> Result<Vec<&'static LibraryOption>> {
    let libraries = if let Some(keys) = &args.answers.libraries {
        catalog::resolve_libraries(keys.as_slice())?
    } else if args.yes {
        catalog::default_libraries()
    } else {
        let mut multi = cliclack::multiselect("Select libraries");
        for lib in catalog::LIBRARIES {
            multi = multi.item(lib.key, lib.description, lib.import_path);
        }

        let defaults: Vec<&'static str> = catalog::default_libraries()
            .iter()
            .map(|lib| lib.key)
            .collect();
        let selected: Vec<&'static str> = multi
            .initial_values(defaults)
            .required(false)
            .interact()?;
        catalog::resolve_libraries(selected.as_slice())?
    };

    if libraries.is_empty() {
        cliclack::log::info("No libraries selected")?;
    } else {
        let keys: Vec<&str> = libraries.iter().map(|lib| lib.key).collect();
        cliclack::log::success(format!("Libraries: {}", keys.join(", ")))?;
    }

    Ok(libraries)
}

fn select_layout<C: ProductConfig>(
    config: &C,
    args: &InstallArgs,
    module_name: &str,
) -> Result<ProjectLayout> {
    let kind = if let Some(kind) = args.answers.layout {
        kind
    } else if args.yes {
        LayoutKind::MonoRepo
    } else {
        cliclack::select("Select project layout")
            .item(
                LayoutKind::MonoRepo,
                "Mono-repo",
                "modules live under modules/ as separate Go modules",
            )
            .item(
                LayoutKind::Simple,
                "Simple",
                "application code lives in webcore/app",
            )
            .initial_value(LayoutKind::MonoRepo)
            .interact()?
    };

    match kind {
        LayoutKind::Simple => Ok(ProjectLayout::Simple),
        LayoutKind::MonoRepo => {
            let folder = select_folder(config, args)?;
            let default_path = settings::default_module_path(module_name, &folder);
            let module_path = if let Some(path) = &args.answers.module_path {
                path.trim().to_string()
            } else if args.yes {
                default_path
            } else {
                let input: String = cliclack::input("Module path")
                    .placeholder(&default_path)
                    .default_input(&default_path)
                    .interact()?;
                input.trim().to_string()
            };

            Ok(ProjectLayout::MonoRepo {
                folder,
                module_path,
            })
        }
    }
}

fn select_folder<C: ProductConfig>(config: &C, args: &InstallArgs) -> Result<String> {
    if let Some(folder) = &args.answers.folder {
        settings::validate_folder_name(folder)?;
        return Ok(folder.clone());
    }
    if args.yes {
        return Ok(config.default_module_folder().to_string());
    }

    let folder: String = cliclack::input("Module folder name")
        .placeholder(config.default_module_folder())
        .default_input(config.default_module_folder())
        .validate(|input: &String| {
            if !settings::is_valid_folder_name(input) {
                Err("Use only lowercase letters, numbers, and hyphens")
            } else if settings::is_reserved_folder_name(input) {
                Err("This name is reserved for the template's placeholder module")
            } else {
                Ok(())
            }
        })
        .interact()?;

    Ok(folder)
}

fn select_features(args: &InstallArgs) -> Result<Vec<&'static FeatureOption>> {
    if let Some(names) = &args.answers.features {
        return Ok(catalog::resolve_features(names.as_slice())?);
    }
    if args.yes {
        return Ok(catalog::default_features());
    }

    let mut multi = cliclack::multiselect("Select module features");
    for feature in catalog::FEATURES {
        multi = multi.item(feature.name, feature.description, feature.folders.join(", "));
    }

    let defaults: Vec<&'static str> = catalog::default_features()
        .iter()
        .map(|f| f.name)
        .collect();
    let selected: Vec<&'static str> = multi
        .initial_values(defaults)
        .required(false)
        .interact()?;

    Ok(catalog::resolve_features(selected.as_slice())?)
}

fn select_git_init(args: &InstallArgs) -> Result<bool> {
    if let Some(git_init) = args.answers.git_init {
        return Ok(git_init);
    }
    if args.yes {
        return Ok(false);
    }

    let confirm: bool = cliclack::confirm("Initialize a git repository?")
        .initial_value(false)
        .interact()?;
    Ok(confirm)
}

fn print_next_steps<C: ProductConfig>(config: &C, project_dir: &Path) -> Result<()> {
    let steps = config.next_steps(project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Installation completed successfully!")?;

    Ok(())
}
