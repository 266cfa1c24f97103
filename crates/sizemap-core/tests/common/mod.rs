//! Common test utilities for sizemap-core
//!
//! - Sample catalog fixtures (`test` and `home` size maps)
//! - Temporary catalog directories

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
