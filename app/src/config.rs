//! Application configuration.
//!
//! Loaded from environment variables with defaults that match the hosted
//! demo catalog. The theme flag lives here, passed explicitly to
//! presentation code; there is no ambient theme state anywhere else.

use std::env;
use std::path::PathBuf;

/// Catalog endpoint used when `CAMPUS_CATALOG_URL` is not set.
pub const DEFAULT_CATALOG_URL: &str = "https://683abb3e43bb370a86738f82.mockapi.io/events";

/// Storage directory used when `CAMPUS_STORAGE_DIR` is not set.
pub const DEFAULT_STORAGE_DIR: &str = ".campus-connect";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Event catalog endpoint.
    pub catalog_url: String,
    /// Directory the on-disk storage keeps its files in.
    pub storage_dir: PathBuf,
    /// Whether presentation should render the dark theme.
    pub dark_mode: bool,
}

impl AppConfig {
    /// Load configuration from `CAMPUS_CATALOG_URL`, `CAMPUS_STORAGE_DIR`
    /// and `CAMPUS_DARK_MODE`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            catalog_url: env::var("CAMPUS_CATALOG_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()),
            storage_dir: env::var_os("CAMPUS_STORAGE_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from),
            dark_mode: parse_flag(env::var("CAMPUS_DARK_MODE").ok().as_deref()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            dark_mode: false,
        }
    }
}

/// Interpret a boolean-ish environment value; absent means off.
fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v == "1" || v.eq_ignore_ascii_case("true"))
}
