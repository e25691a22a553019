//! Installer answers and their validation
//!
//! Answers come from three places, highest precedence first: command-line
//! flags, a YAML answers file, and interactive prompts. Anything still
//! unanswered after the first two is prompted for (or defaulted with `--yes`).

use crate::catalog::LayoutKind;
use crate::error::{Result, ScaffoldError};
use crate::rewrite::layout::PLACEHOLDER_MODULE;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Pre-supplied answers for the installer prompts
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Answers {
    pub directory: Option<PathBuf>,
    pub module: Option<String>,
    pub libraries: Option<Vec<String>>,
    pub layout: Option<LayoutKind>,
    pub folder: Option<String>,
    pub module_path: Option<String>,
    pub features: Option<Vec<String>>,
    pub git_init: Option<bool>,
}

impl Answers {
    /// Load answers from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse answers file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overlay `other` on top of `self`; values present in `other` win
    pub fn merge(self, other: Answers) -> Answers {
        Answers {
            directory: other.directory.or(self.directory),
            module: other.module.or(self.module),
            libraries: other.libraries.or(self.libraries),
            layout: other.layout.or(self.layout),
            folder: other.folder.or(self.folder),
            module_path: other.module_path.or(self.module_path),
            features: other.features.or(self.features),
            git_init: other.git_init.or(self.git_init),
        }
    }
}

/// Strip trailing path separators from a user-entered project directory
pub fn normalize_project_dir(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let stripped = trimmed.trim_end_matches(['/', '\\']);
    if stripped.is_empty() {
        PathBuf::from(trimmed)
    } else {
        PathBuf::from(stripped)
    }
}

/// Loose Go module path check: at least one slash and no spaces
pub fn is_valid_module_name(name: &str) -> bool {
    name.contains('/') && !name.contains(' ')
}

/// Folder names must match `^[a-z0-9-]+$`
pub fn is_valid_folder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// The placeholder module's folder is deleted at the end of every install
pub fn is_reserved_folder_name(name: &str) -> bool {
    name == PLACEHOLDER_MODULE
}

pub fn validate_folder_name(name: &str) -> Result<()> {
    if !is_valid_folder_name(name) {
        return Err(ScaffoldError::InvalidFolderName(name.to_string()));
    }
    if is_reserved_folder_name(name) {
        return Err(ScaffoldError::ReservedFolderName(name.to_string()));
    }
    Ok(())
}

/// Default module path for a mono-repo module folder
pub fn default_module_path(module_name: &str, folder: &str) -> String {
    format!("{}-mod-{}", module_name, folder)
}

/// Go package identifier for a module folder (hyphens are not valid in identifiers)
pub fn package_ident(folder: &str) -> String {
    folder.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_project_dir() {
        assert_eq!(normalize_project_dir("./webcore/"), PathBuf::from("./webcore"));
        assert_eq!(normalize_project_dir("proj\\"), PathBuf::from("proj"));
        assert_eq!(normalize_project_dir("/"), PathBuf::from("/"));
    }

    #[test]
    fn test_module_name_validation() {
        assert!(is_valid_module_name("github.com/x/y"));
        assert!(!is_valid_module_name("project"));
        assert!(!is_valid_module_name("github.com/x/my project"));
    }

    #[test]
    fn test_folder_name_validation() {
        assert!(is_valid_folder_name("billing-api2"));
        assert!(!is_valid_folder_name("Billing"));
        assert!(!is_valid_folder_name("my_module"));
        assert!(!is_valid_folder_name(""));
        assert!(validate_folder_name("bad name").is_err());
    }

    #[test]
    fn test_placeholder_folder_name_is_reserved() {
        assert!(is_valid_folder_name("dummy"));
        assert!(is_reserved_folder_name("dummy"));
        assert!(matches!(
            validate_folder_name("dummy"),
            Err(ScaffoldError::ReservedFolderName(_))
        ));
        assert!(validate_folder_name("dummy-two").is_ok());
    }

    #[test]
    fn test_default_module_path() {
        assert_eq!(
            default_module_path("github.com/x/y", "billing"),
            "github.com/x/y-mod-billing"
        );
    }

    #[test]
    fn test_parse_answers_file() {
        let answers = Answers::parse(
            "directory: ./shop\n\
             module: github.com/acme/shop\n\
             libraries: [redis, pubsub]\n\
             layout: mono-repo\n\
             folder: orders\n\
             git-init: true\n",
        )
        .unwrap();

        assert_eq!(answers.directory, Some(PathBuf::from("./shop")));
        assert_eq!(answers.layout, Some(LayoutKind::MonoRepo));
        assert_eq!(
            answers.libraries,
            Some(vec!["redis".to_string(), "pubsub".to_string()])
        );
        assert_eq!(answers.git_init, Some(true));
        assert_eq!(answers.features, None);
    }

    #[test]
    fn test_unknown_answer_keys_rejected() {
        assert!(Answers::parse("modul: github.com/typo/here\n").is_err());
    }

    #[test]
    fn test_empty_answers_file() {
        assert_eq!(Answers::parse("  \n").unwrap(), Answers::default());
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let file = Answers {
            module: Some("github.com/from/file".to_string()),
            git_init: Some(true),
            ..Default::default()
        };
        let flags = Answers {
            module: Some("github.com/from/flags".to_string()),
            ..Default::default()
        };

        let merged = file.merge(flags);
        assert_eq!(merged.module.as_deref(), Some("github.com/from/flags"));
        assert_eq!(merged.git_init, Some(true));
    }
}
