//! Type definitions for size maps and sizemap settings

mod dimensions;
mod settings_types;

pub use dimensions::*;
pub use settings_types::*;
