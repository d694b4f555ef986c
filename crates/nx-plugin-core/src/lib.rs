//! # nx-plugin-core
//!
//! Core library for create-nx-plugin providing:
//! - Plugin name parsing (scoped and unscoped)
//! - Raw and resolved option sets for a plugin workspace
//! - Generator schemas shared with the generators crate
//! - Hierarchical configuration loading (embedded defaults, user file, env)

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use utils::get_home_dir;
