//! External tool detection and invocation
//!
//! - `check`: detecting git and Go
//! - `tool`: running them as child processes

pub mod check;
pub mod tool;

pub use check::{check_tools, ToolInfo};
pub use tool::{CommandRunner, SystemRunner};
