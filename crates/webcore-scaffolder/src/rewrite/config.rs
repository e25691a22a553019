//! Working config documents derived from the template's examples

use super::file::{copy_file, read_to_string, write_atomic};
use super::section::{comment_region, find_region, has_regions};
use crate::catalog::LibraryOption;
use crate::error::Result;
use std::path::Path;
use tracing::{debug, warn};

/// A config.yaml block that only makes sense when some library is selected
pub struct ConfigSection {
    /// Region name used by `# webcore:begin <name>` markers
    pub name: &'static str,
    /// 1-indexed inclusive lines in templates without markers
    pub fallback_lines: (usize, usize),
    pub is_needed: fn(&[&LibraryOption]) -> bool,
}

pub const CONFIG_SECTIONS: &[ConfigSection] = &[
    ConfigSection {
        name: "database",
        fallback_lines: (71, 92),
        is_needed: |libs| libs.iter().any(|lib| lib.key.starts_with("database:")),
    },
    ConfigSection {
        name: "redis",
        fallback_lines: (94, 104),
        is_needed: |libs| libs.iter().any(|lib| lib.key == "redis"),
    },
    ConfigSection {
        name: "pubsub",
        fallback_lines: (107, 114),
        is_needed: |libs| libs.iter().any(|lib| lib.key == "pubsub"),
    },
];

/// Example documents copied to their working names: (source, destination)
pub const CONFIG_EXAMPLES: &[(&str, &str)] = &[
    ("config.yaml.example", "config.yaml"),
    ("access.yaml.example", "access.yaml"),
];

/// Comment out the sections of a config document whose libraries were not selected
pub fn prune_config_sections(content: &str, libraries: &[&LibraryOption]) -> String {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let marked = has_regions(&lines);
    for section in CONFIG_SECTIONS {
        let needed = (section.is_needed)(libraries);
        debug!(section = section.name, needed, "config section");
        if marked && !needed && find_region(&lines, section.name).is_none() {
            warn!(section = section.name, "no region markers for config section, left as is");
        }
        lines = comment_region(lines, section.name, section.fallback_lines, !needed);
    }
    lines.join("\n")
}

/// Copy the example config documents and prune `config.yaml` for the selection
pub fn prepare_config_files(project_dir: &Path, libraries: &[&LibraryOption]) -> Result<()> {
    for (src, dst) in CONFIG_EXAMPLES {
        copy_file(&project_dir.join(src), &project_dir.join(dst))?;
    }

    let config_path = project_dir.join("config.yaml");
    let content = read_to_string(&config_path)?;
    write_atomic(
        &config_path,
        prune_config_sections(&content, libraries).as_bytes(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_library;
    use std::fs;
    use tempfile::TempDir;

    fn marked_config() -> String {
        [
            "app:",
            "  port: 8080",
            "# webcore:begin database",
            "database:",
            "  host: localhost",
            "# webcore:end database",
            "# webcore:begin redis",
            "redis:",
            "  host: localhost",
            "# webcore:end redis",
            "# webcore:begin pubsub",
            "pubsub:",
            "  project: demo",
            "# webcore:end pubsub",
            "",
        ]
        .join("\n")
    }

    #[test]
    fn test_prune_keeps_selected_sections() {
        let libs = vec![find_library("database:mysql").unwrap()];
        let pruned = prune_config_sections(&marked_config(), &libs);

        assert!(pruned.contains("\ndatabase:\n  host: localhost\n"));
        assert!(pruned.contains("\n# redis:\n#   host: localhost\n"));
        assert!(pruned.contains("\n# pubsub:\n#   project: demo\n"));
        assert!(pruned.starts_with("app:\n  port: 8080\n"));
        assert!(pruned.ends_with("# webcore:end pubsub\n"));
    }

    #[test]
    fn test_prune_with_everything_selected_is_identity() {
        let libs = vec![
            find_library("database:postgres").unwrap(),
            find_library("redis").unwrap(),
            find_library("pubsub").unwrap(),
        ];
        assert_eq!(prune_config_sections(&marked_config(), &libs), marked_config());
    }

    #[test]
    fn test_prune_falls_back_to_line_ranges() {
        let mut lines: Vec<String> = (1..=120).map(|n| format!("key{}: v", n)).collect();
        lines.push(String::new());
        let content = lines.join("\n");

        let pruned = prune_config_sections(&content, &[]);
        let out: Vec<&str> = pruned.split('\n').collect();

        assert_eq!(out[69], "key70: v");
        assert_eq!(out[70], "# key71: v");
        assert_eq!(out[91], "# key92: v");
        assert_eq!(out[92], "key93: v");
        assert_eq!(out[93], "# key94: v");
        assert_eq!(out[105], "key106: v");
        assert_eq!(out[113], "# key114: v");
        assert_eq!(out[114], "key115: v");
    }

    #[test]
    fn test_partially_marked_document_keeps_unmarked_lines() {
        let mut lines: Vec<String> = (1..=120).map(|n| format!("keep{}: v", n)).collect();
        lines[1] = "# webcore:begin database".to_string();
        lines[2] = "database:".to_string();
        lines[3] = "# webcore:end database".to_string();
        lines.push(String::new());
        let content = lines.join("\n");

        let libs = vec![
            find_library("database:postgres").unwrap(),
            find_library("redis").unwrap(),
        ];
        let pruned = prune_config_sections(&content, &libs);

        // pubsub has no markers here, so lines 107-114 are not its section
        assert_eq!(pruned, content);

        let pruned = prune_config_sections(&content, &[]);
        let out: Vec<&str> = pruned.split('\n').collect();
        assert_eq!(out[2], "# database:");
        assert!(out.iter().skip(4).all(|line| !line.starts_with('#')));
    }

    #[test]
    fn test_prepare_config_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml.example"), marked_config()).unwrap();
        fs::write(dir.path().join("access.yaml.example"), "users: []\n").unwrap();

        prepare_config_files(dir.path(), &[]).unwrap();

        let config = fs::read_to_string(dir.path().join("config.yaml")).unwrap();
        assert!(config.contains("# database:"));
        assert_eq!(
            fs::read_to_string(dir.path().join("access.yaml")).unwrap(),
            "users: []\n"
        );
        // examples stay in place
        assert!(dir.path().join("config.yaml.example").exists());
    }

    #[test]
    fn test_prepare_config_files_missing_example() {
        let dir = TempDir::new().unwrap();
        assert!(prepare_config_files(dir.path(), &[]).is_err());
    }
}
