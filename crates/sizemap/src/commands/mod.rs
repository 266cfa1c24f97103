//! CLI command implementations

pub mod completions;
pub mod derive;
pub mod get;
pub mod list;
pub mod merge;
pub mod validate;
pub mod version;
