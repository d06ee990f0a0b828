//! Settings loading from trade-desk.toml.
//!
//! The settings file is optional; every field has a default, and a missing
//! file just yields the defaults. Only boundary-level knobs live here (the
//! fallback page size for listings) - the database URL stays an environment
//! concern, see [`crate::config::database`].

use crate::core::pagination::DEFAULT_PER_PAGE;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings structure representing the entire trade-desk.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Listing defaults
    #[serde(default)]
    pub pagination: PaginationSettings,
}

/// Defaults applied to listing endpoints when the caller sends none
#[derive(Debug, Deserialize)]
pub struct PaginationSettings {
    /// Items per page when the request does not specify one
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse trade-desk.toml: {e}"),
    })
}

/// Loads settings from the default location (./trade-desk.toml),
/// falling back to defaults when the file does not exist.
#[must_use]
pub fn load_default_settings() -> Settings {
    load_settings("trade-desk.toml").unwrap_or_default()
}
