//! Template transformation engine
//!
//! Deterministic text and tree rewrites applied to a cloned template:
//! - `file`: literal substitutions and crash-safe whole-file writes
//! - `section`: commenting out config blocks by marker region or line range
//! - `package`: retargeting Go package declarations and import paths
//! - `features`: removing folders of unselected features
//! - `manifest`: generating the library loader registry
//! - `layout`: mono-repo and simple project layouts
//!
//! Every write goes through [`file::write_atomic`]; tree-wide rewrites are
//! staged in an [`staging::EditSet`] before anything is written.

pub mod config;
pub mod features;
pub mod file;
pub mod layout;
pub mod manifest;
pub mod package;
pub mod section;
pub mod staging;

pub use config::{prepare_config_files, prune_config_sections};
pub use features::prune_features;
pub use file::{replace_in_file, set_module_directive, write_atomic};
pub use layout::{apply_layout, update_registration, update_workspace, Registration};
pub use manifest::{write_manifest, LibraryManifest};
pub use package::{retarget_tree, Retarget};
pub use section::comment_section;
