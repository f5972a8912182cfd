//! Application configuration module.
//!
//! Manages the TOML config file for user settings such as the
//! metadata language and the search debounce window.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::{resolve_config_path, resolve_log_dir};
