//! Cleaner module - finds and removes build and dependency folders
//!
//! This module walks a project tree looking for folders like node_modules or
//! target next to the files that mark them (package.json, Cargo.toml, ...),
//! and provides the pieces needed to confirm and delete them one by one.

pub mod config;
pub mod deleter;
pub mod error;
pub mod patterns;
pub mod prompt;
pub mod scanner;
pub mod size;
pub mod stats;

pub use config::{Config, ConfigSource};
pub use deleter::Deleter;
pub use error::SweepError;
pub use patterns::{default_ignore, default_predicates, Predicate, Trigger, DEFAULT_IGNORE};
pub use prompt::Answer;
pub use scanner::DirWalker;
pub use size::{estimate_size, format_size};
pub use stats::Stats;
