//! WebCore Scaffolder - turns the WebCore Go template into a user's project
//!
//! The template repository is cloned (or copied from a local checkout) and
//! then rewritten in place: module names, the library loader registry,
//! config sections, package names, feature folders and the project layout.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template fetching, the `rewrite` engine, tool invocation
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `installer::apply_configuration`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use webcore_scaffolder::installer::{apply_configuration, InstallPlan, LogProgress};
//! use webcore_scaffolder::{catalog, ProjectLayout, SystemRunner};
//!
//! let plan = InstallPlan {
//!     project_dir: "./webcore".into(),
//!     module_name: "github.com/acme/shop".to_string(),
//!     libraries: catalog::default_libraries(),
//!     layout: ProjectLayout::Simple,
//!     features: catalog::default_features(),
//!     git_init: false,
//! };
//! apply_configuration(&plan, &SystemRunner, &mut LogProgress).await?;
//! ```

pub mod catalog;
pub mod error;
pub mod installer;
pub mod product;
pub mod rewrite;
pub mod runtime;
pub mod settings;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use catalog::{FeatureOption, LayoutKind, LibraryOption, ProjectLayout};
pub use error::ScaffoldError;
pub use installer::{apply_configuration, InstallPlan, Progress};
pub use product::ProductConfig;
pub use runtime::{check_tools, CommandRunner, SystemRunner, ToolInfo};
pub use settings::Answers;
pub use templates::{fetch_template, FetchOutcome, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
