//! Configuration loading.
//!
//! Settings come from `config.toml` (see [`Config::config_path`]) and are
//! overridden by command-line flags.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, StorageConfig};
