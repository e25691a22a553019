//! Product configuration trait for installer binaries
//!
//! The binary implements this trait to define the installer's identity,
//! where the template comes from, and the answers offered by default.

use std::path::Path;

/// Configuration trait for an installer product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Git URL of the template repository
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding the template URL
    fn template_url_env(&self) -> &'static str;

    /// Go module name offered in the prompt
    fn default_module_name(&self) -> &'static str;

    /// Project directory offered in the prompt
    fn default_project_dir(&self) -> &'static str;

    /// Folder name offered for a mono-repo module
    fn default_module_folder(&self) -> &'static str {
        "mymodule"
    }

    /// Generate the "next steps" instructions after installation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
