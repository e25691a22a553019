//! Generation of `deps/libraries.go`, the library loader registry

use super::file::write_atomic;
use crate::catalog::LibraryOption;
use crate::error::Result;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

pub const MANIFEST_PACKAGE: &str = "deps";
pub const CORE_IMPORT: &str = "github.com/webcore-go/webcore/app/core";
const CORE_ALIAS: &str = "core";

/// Import alias for a package path: last segment, `lib-` dropped, hyphens as underscores
pub fn import_alias(import_path: &str) -> String {
    let last = import_path.rsplit('/').next().unwrap_or(import_path);
    last.replace("lib-", "").replace('-', "_")
}

/// One `"key": &alias.Loader{}` entry of the registry map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub key: String,
    pub alias: String,
    pub loader: String,
}

/// The registry source for a library selection
#[derive(Debug, Clone, Default)]
pub struct LibraryManifest {
    /// alias -> import path, one per unique path
    imports: BTreeMap<String, String>,
    entries: Vec<ManifestEntry>,
}

impl LibraryManifest {
    pub fn new(libraries: &[&LibraryOption]) -> Self {
        let mut aliases_by_path: BTreeMap<&str, String> = BTreeMap::new();
        let mut taken: HashSet<String> = HashSet::from([CORE_ALIAS.to_string()]);
        let mut manifest = Self::default();

        for lib in libraries {
            let alias = aliases_by_path
                .entry(lib.import_path)
                .or_insert_with(|| {
                    let base = import_alias(lib.import_path);
                    let mut alias = base.clone();
                    let mut n = 2;
                    while taken.contains(&alias) {
                        alias = format!("{}_{}", base, n);
                        n += 1;
                    }
                    taken.insert(alias.clone());
                    manifest
                        .imports
                        .insert(alias.clone(), lib.import_path.to_string());
                    alias
                })
                .clone();

            manifest.entries.push(ManifestEntry {
                key: lib.key.to_string(),
                alias,
                loader: lib.loader_name(),
            });
        }

        manifest
    }

    /// (alias, import path) pairs, sorted by alias
    pub fn imports(&self) -> impl Iterator<Item = (&str, &str)> {
        self.imports
            .iter()
            .map(|(alias, path)| (alias.as_str(), path.as_str()))
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "package {}\n", MANIFEST_PACKAGE);
        out.push_str("import (\n");
        let _ = writeln!(out, "\t\"{}\"", CORE_IMPORT);
        for (alias, path) in self.imports() {
            let _ = writeln!(out, "\t{} \"{}\"", alias, path);
        }
        out.push_str(")\n\n");

        out.push_str("var APP_LIBRARIES = map[string]core.LibraryLoader{\n");
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "\t\"{}\": &{}.{}{{}},",
                entry.key, entry.alias, entry.loader
            );
        }
        out.push_str("\n\t// Add your library here\n}\n");
        out
    }
}

/// Replace the registry file at `path` with one generated for `libraries`
pub fn write_manifest(path: &Path, libraries: &[&LibraryOption]) -> Result<()> {
    let manifest = LibraryManifest::new(libraries);
    debug!(
        path = %path.display(),
        imports = manifest.imports.len(),
        entries = manifest.entries.len(),
        "writing library manifest"
    );
    write_atomic(path, manifest.render().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_library;

    fn libs(keys: &[&str]) -> Vec<&'static LibraryOption> {
        keys.iter().map(|k| find_library(k).unwrap()).collect()
    }

    #[test]
    fn test_import_alias() {
        assert_eq!(import_alias("github.com/webcore-go/lib-postgres"), "postgres");
        assert_eq!(
            import_alias("github.com/webcore-go/webcore/lib/authstore/yaml"),
            "yaml"
        );
        assert_eq!(import_alias("github.com/acme/lib-big-query"), "big_query");
    }

    #[test]
    fn test_shared_path_gets_one_import() {
        let manifest = LibraryManifest::new(&libs(&["kafka:producer", "kafka:consumer"]));
        let rendered = manifest.render();

        assert_eq!(
            rendered
                .matches("\"github.com/webcore-go/lib-kafka\"")
                .count(),
            1
        );
        assert!(rendered.contains("\t\"kafka:producer\": &kafka.KafkaProducerLoader{},\n"));
        assert!(rendered.contains("\t\"kafka:consumer\": &kafka.KafkaConsumerLoader{},\n"));
        assert_eq!(manifest.entries().len(), 2);
    }

    #[test]
    fn test_mysql_and_sqlite_share_lib_mysql() {
        let manifest = LibraryManifest::new(&libs(&["database:mysql", "database:sqlite"]));
        let imports: Vec<_> = manifest.imports().collect();

        assert_eq!(imports, vec![("mysql", "github.com/webcore-go/lib-mysql")]);
        assert!(manifest
            .render()
            .contains("\t\"database:sqlite\": &mysql.SqliteLoader{},\n"));
    }

    #[test]
    fn test_imports_sorted_by_alias() {
        let manifest = LibraryManifest::new(&libs(&[
            "database:postgres",
            "redis",
            "authstorage:yaml",
            "authentication:basic",
        ]));
        let aliases: Vec<_> = manifest.imports().map(|(alias, _)| alias).collect();
        assert_eq!(aliases, vec!["basic", "postgres", "redis", "yaml"]);
    }

    #[test]
    fn test_render_full_document() {
        let rendered = LibraryManifest::new(&libs(&["redis", "database:postgres"])).render();

        assert_eq!(
            rendered,
            "package deps\n\
             \n\
             import (\n\
             \t\"github.com/webcore-go/webcore/app/core\"\n\
             \tpostgres \"github.com/webcore-go/lib-postgres\"\n\
             \tredis \"github.com/webcore-go/lib-redis\"\n\
             )\n\
             \n\
             var APP_LIBRARIES = map[string]core.LibraryLoader{\n\
             \t\"redis\": &redis.RedisLoader{},\n\
             \t\"database:postgres\": &postgres.PostgresLoader{},\n\
             \n\
             \t// Add your library here\n\
             }\n"
        );
    }

    #[test]
    fn test_empty_selection() {
        let rendered = LibraryManifest::new(&[]).render();
        assert!(rendered.contains("import (\n\t\"github.com/webcore-go/webcore/app/core\"\n)\n"));
        assert!(rendered.contains("core.LibraryLoader{\n\n\t// Add your library here\n}\n"));
    }

    #[test]
    fn test_alias_collisions_are_disambiguated() {
        let first = LibraryOption {
            key: "cache:local",
            description: "Local cache",
            import_path: "github.com/acme/lib-cache",
            loader: None,
            default_selected: false,
        };
        let second = LibraryOption {
            key: "cache:remote",
            description: "Remote cache",
            import_path: "github.com/other/cache",
            loader: None,
            default_selected: false,
        };
        let core_clash = LibraryOption {
            key: "core",
            description: "Clashes with the framework alias",
            import_path: "github.com/acme/lib-core",
            loader: None,
            default_selected: false,
        };

        let manifest = LibraryManifest::new(&[&first, &second, &core_clash]);
        let imports: Vec<_> = manifest.imports().collect();

        assert_eq!(
            imports,
            vec![
                ("cache", "github.com/acme/lib-cache"),
                ("cache_2", "github.com/other/cache"),
                ("core_2", "github.com/acme/lib-core"),
            ]
        );
        assert_eq!(manifest.entries()[1].alias, "cache_2");
    }
}
