//! Static catalogs of optional libraries and module features

use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::fmt;

/// An optional library integration the generated project can register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryOption {
    /// Namespaced key, e.g. `database:postgres`
    pub key: &'static str,
    /// Label shown in the selection prompt
    pub description: &'static str,
    /// Go import path of the package providing the loader
    pub import_path: &'static str,
    /// Loader type name when it cannot be derived from the key
    pub loader: Option<&'static str>,
    /// Pre-selected in the prompt
    pub default_selected: bool,
}

impl LibraryOption {
    /// Loader type name: the explicit one, or the key's last `:` segment
    /// capitalized with a `Loader` suffix (`database:postgres` -> `PostgresLoader`).
    pub fn loader_name(&self) -> String {
        if let Some(loader) = self.loader {
            return loader.to_string();
        }

        let suffix = self.key.rsplit(':').next().unwrap_or(self.key);
        let mut chars = suffix.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{}Loader", capitalized)
    }
}

// lib-mysql backs both mysql and sqlite; the manifest dedupes imports by path.
pub const LIBRARIES: &[LibraryOption] = &[
    LibraryOption {
        key: "database:postgres",
        description: "PostgreSQL",
        import_path: "github.com/webcore-go/lib-postgres",
        loader: None,
        default_selected: true,
    },
    LibraryOption {
        key: "database:mysql",
        description: "MySQL",
        import_path: "github.com/webcore-go/lib-mysql",
        loader: None,
        default_selected: false,
    },
    LibraryOption {
        key: "database:sqlite",
        description: "SQLite",
        import_path: "github.com/webcore-go/lib-mysql",
        loader: None,
        default_selected: false,
    },
    LibraryOption {
        key: "database:mongodb",
        description: "MongoDB",
        import_path: "github.com/webcore-go/lib-mongo",
        loader: None,
        default_selected: false,
    },
    LibraryOption {
        key: "redis",
        description: "Redis",
        import_path: "github.com/webcore-go/lib-redis",
        loader: None,
        default_selected: false,
    },
    LibraryOption {
        key: "kafka:producer",
        description: "Kafka Producer",
        import_path: "github.com/webcore-go/lib-kafka",
        loader: Some("KafkaProducerLoader"),
        default_selected: false,
    },
    LibraryOption {
        key: "kafka:consumer",
        description: "Kafka Consumer",
        import_path: "github.com/webcore-go/lib-kafka",
        loader: Some("KafkaConsumerLoader"),
        default_selected: false,
    },
    LibraryOption {
        key: "pubsub",
        description: "Google Pub/Sub",
        import_path: "github.com/webcore-go/lib-pubsub",
        loader: Some("PubSubLoader"),
        default_selected: false,
    },
    LibraryOption {
        key: "authstorage:yaml",
        description: "Authentication Storage: YAML",
        import_path: "github.com/webcore-go/webcore/lib/authstore/yaml",
        loader: None,
        default_selected: true,
    },
    LibraryOption {
        key: "authentication:basic",
        description: "Authentication: Basic",
        import_path: "github.com/webcore-go/webcore/lib/auth/basic",
        loader: Some("BasicAuthLoader"),
        default_selected: false,
    },
];

/// A module feature backed by one or more template folders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOption {
    pub name: &'static str,
    pub description: &'static str,
    /// Folders (relative to the module root) removed when the feature is not selected
    pub folders: &'static [&'static str],
    pub default_selected: bool,
}

pub const FEATURES: &[FeatureOption] = &[
    FeatureOption {
        name: "specific config",
        description: "Additional Config",
        folders: &["config"],
        default_selected: true,
    },
    FeatureOption {
        name: "database repository",
        description: "Service and Repository",
        folders: &["service", "repository"],
        default_selected: true,
    },
    FeatureOption {
        name: "http request handler",
        description: "HTTP Request Handler",
        folders: &["handler"],
        default_selected: true,
    },
];

/// Which project shape the template is materialized into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Workspace of independent Go modules under `modules/`
    MonoRepo,
    /// Single module, application code under `webcore/app`
    Simple,
}

impl LayoutKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutKind::MonoRepo => "mono-repo",
            LayoutKind::Simple => "simple",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A fully answered layout choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectLayout {
    MonoRepo {
        /// Folder under `modules/` replacing the placeholder module
        folder: String,
        /// Go module path of that folder's own `go.mod`
        module_path: String,
    },
    Simple,
}

impl ProjectLayout {
    pub fn kind(&self) -> LayoutKind {
        match self {
            ProjectLayout::MonoRepo { .. } => LayoutKind::MonoRepo,
            ProjectLayout::Simple => LayoutKind::Simple,
        }
    }

    /// Go package identifier the placeholder package is renamed to
    pub fn package_ident(&self) -> String {
        match self {
            ProjectLayout::MonoRepo { folder, .. } => crate::settings::package_ident(folder),
            ProjectLayout::Simple => "app".to_string(),
        }
    }
}

pub fn find_library(key: &str) -> Option<&'static LibraryOption> {
    LIBRARIES.iter().find(|lib| lib.key == key)
}

pub fn find_feature(name: &str) -> Option<&'static FeatureOption> {
    FEATURES.iter().find(|feature| feature.name == name)
}

/// Resolve library keys against the catalog, keeping catalog order
pub fn resolve_libraries<S: AsRef<str>>(keys: &[S]) -> Result<Vec<&'static LibraryOption>> {
    if let Some(unknown) = keys.iter().find(|k| find_library(k.as_ref()).is_none()) {
        return Err(ScaffoldError::UnknownLibrary(unknown.as_ref().to_string()));
    }

    Ok(LIBRARIES
        .iter()
        .filter(|lib| keys.iter().any(|k| k.as_ref() == lib.key))
        .collect())
}

/// Resolve feature names against the catalog, keeping catalog order
pub fn resolve_features<S: AsRef<str>>(names: &[S]) -> Result<Vec<&'static FeatureOption>> {
    if let Some(unknown) = names.iter().find(|n| find_feature(n.as_ref()).is_none()) {
        return Err(ScaffoldError::UnknownFeature(unknown.as_ref().to_string()));
    }

    Ok(FEATURES
        .iter()
        .filter(|feature| names.iter().any(|n| n.as_ref() == feature.name))
        .collect())
}

pub fn default_libraries() -> Vec<&'static LibraryOption> {
    LIBRARIES.iter().filter(|lib| lib.default_selected).collect()
}

pub fn default_features() -> Vec<&'static FeatureOption> {
    FEATURES.iter().filter(|f| f.default_selected).collect()
}
