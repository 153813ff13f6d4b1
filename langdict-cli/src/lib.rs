//! CLI library for testing purposes

pub mod config;
pub mod sources;
pub mod validation;

pub use config::{Config, Overrides};
pub use sources::{latest_source_file, resolve_source};
