//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We try to find a manual-sitemap.toml, and if present we load settings from there. This
//! provides the filter quiet period, directory scan extensions, the number of queued view
//! changes applied per frame, and an optional log file.

use facet::Facet;
use std::fs;
use std::time::Duration;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "manual-sitemap.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from manual-sitemap.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 250)]
    /// Quiet period in milliseconds before a changed filter query is evaluated.
    pub filter_debounce_ms: u64,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = 16)]
    /// Queued view changes applied per frame.
    pub filter_batch: usize,
    #[facet(default)]
    /// File receiving log output while the terminal UI runs; empty disables logging.
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter_debounce_ms: 250,
            file_extensions: vec!["md".to_string()],
            filter_batch: 16,
            log_file: String::new(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from manual-sitemap.toml if present.
    pub fn load() -> Self {
        fs::read_to_string(CONFIG_FILE)
            .map(|contents| Self::from_toml(&contents))
            .unwrap_or_default()
    }

    #[must_use]
    /// Parses configuration text, keeping defaults for absent keys and unreadable input.
    pub fn from_toml(contents: &str) -> Self {
        facet_toml::from_str::<Self>(contents).unwrap_or_default()
    }

    #[must_use]
    /// Filter quiet period as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
