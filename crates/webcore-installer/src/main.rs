//! WebCore installer - scaffolds a WebCore Go project from the template

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webcore_scaffolder::tui::InstallArgs;
use webcore_scaffolder::{Answers, LayoutKind, ProductConfig};

/// WebCore product configuration
#[derive(Clone)]
pub struct WebcoreConfig;

impl ProductConfig for WebcoreConfig {
    fn display_name(&self) -> &'static str {
        "WebCore Go Template Installer"
    }

    fn default_template_url(&self) -> &'static str {
        "https://github.com/semanggilab/webcore-go-template.git"
    }

    fn template_url_env(&self) -> &'static str {
        "WEBCORE_TEMPLATE_URL"
    }

    fn default_module_name(&self) -> &'static str {
        "github.com/semanggilab/project1"
    }

    fn default_project_dir(&self) -> &'static str {
        "./webcore"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        vec![
            format!("cd {} && make run", dir.display()),
            "Edit webcore/config.yaml to point at your services".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "webcore-install")]
#[command(about = "Interactive installer for WebCore Go projects")]
#[command(version)]
pub struct Args {
    /// Local template checkout to copy instead of cloning (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project directory
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Go module name (e.g. github.com/user/project)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Libraries to include (comma-separated catalog keys, e.g. database:postgres,redis)
    #[arg(long, value_delimiter = ',')]
    pub libraries: Option<Vec<String>>,

    /// Project layout
    #[arg(long, value_enum)]
    pub layout: Option<LayoutKind>,

    /// Module folder name under modules/ (mono-repo only)
    #[arg(long)]
    pub folder: Option<String>,

    /// Go module path of the module folder (mono-repo only)
    #[arg(long = "module-path")]
    pub module_path: Option<String>,

    /// Module features to keep (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub features: Option<Vec<String>>,

    /// Initialize a git repository in the project
    #[arg(long = "git-init")]
    pub git_init: Option<bool>,

    /// YAML file with answers to the prompts; flags take precedence
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    fn flag_answers(&self) -> Answers {
        Answers {
            directory: self.directory.clone(),
            module: self.module.clone(),
            libraries: self.libraries.clone(),
            layout: self.layout,
            folder: self.folder.clone(),
            module_path: self.module_path.clone(),
            features: self.features.clone(),
            git_init: self.git_init,
        }
    }

    fn install_args(&self) -> Result<InstallArgs> {
        let file_answers = match &self.answers {
            Some(path) => Answers::load(path)?,
            None => Answers::default(),
        };

        Ok(InstallArgs {
            template_dir: self.template_dir.clone(),
            answers: file_answers.merge(self.flag_answers()),
            yes: self.yes,
        })
    }
}

/// Initialize tracing with output to stderr so prompts keep stdout
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "warn,webcore_scaffolder=info",
        _ => "warn,webcore_scaffolder=debug",
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    let result = match args.install_args() {
        Ok(install_args) => webcore_scaffolder::run(&WebcoreConfig, install_args).await,
        Err(e) => Err(e),
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        let _ = cliclack::outro_cancel(format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
