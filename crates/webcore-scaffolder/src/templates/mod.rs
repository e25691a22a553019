//! Template retrieval
//!
//! The template is a plain git repository: it is cloned shallowly (or copied
//! from a local checkout during development) and then rewritten in place by
//! the [`crate::rewrite`] engine.

pub mod fetcher;

pub use fetcher::{fetch_template, is_initialized, FetchOutcome, TemplateSource};
