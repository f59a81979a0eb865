//
//  crud-sdk
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Endpoint profiles for the SDK, stored as TOML in the platform-specific
//! configuration directory:
//!
//! - Linux: `~/.config/crud-sdk/config.toml`
//! - macOS: `~/Library/Application Support/crud-sdk/config.toml`
//! - Windows: `%APPDATA%\crud-sdk\config.toml`
//!
//! ## File Format
//!
//! ```toml
//! [core]
//! default_endpoint = "core"
//!
//! [endpoints.core]
//! base_url = "https://api.example.com/core"
//! timeout_secs = 30
//! cache_ttl_secs = 60
//!
//! [endpoints.billing]
//! base_url = "https://api.example.com/billing"
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use crud_sdk::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! if let Some(endpoint) = config.default_endpoint() {
//!     println!("Talking to {}", endpoint.base_url);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

mod file;

pub use file::{config_exists, read_config_file, write_config_file};

/// Top-level SDK configuration.
///
/// Holds the core settings plus any number of named endpoint profiles.
/// Missing files load as the default configuration rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Core settings.
    #[serde(default)]
    pub core: CoreConfig,

    /// Named endpoint profiles.
    #[serde(default)]
    pub endpoints: BTreeMap<String, EndpointConfig>,
}

/// Core settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    /// The endpoint profile used when callers do not name one.
    #[serde(default = "default_endpoint_name")]
    pub default_endpoint: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_endpoint: default_endpoint_name(),
        }
    }
}

fn default_endpoint_name() -> String {
    "core".to_string()
}

/// One remote endpoint profile.
///
/// # Fields
///
/// * `base_url` - Base URL the `crud/` URIs are resolved against
/// * `timeout_secs` - Optional request timeout applied by the HTTP transport
/// * `cache_ttl_secs` - Optional TTL; when set, clients built from this
///   profile attach an in-process cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    /// Base URL the `crud/` URIs are resolved against.
    pub base_url: String,

    /// Request timeout in seconds, applied by the HTTP transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Cache TTL in seconds for GET-equivalent requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
}

impl Config {
    /// Loads the configuration from the platform-specific location.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }

        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Saves the configuration to the platform-specific location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the platform-specific configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error when no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "crud-sdk")
            .context("could not determine configuration directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the named endpoint profile.
    pub fn endpoint(&self, name: &str) -> Option<&EndpointConfig> {
        self.endpoints.get(name)
    }

    /// Returns the default endpoint profile, if configured.
    pub fn default_endpoint(&self) -> Option<&EndpointConfig> {
        self.endpoint(&self.core.default_endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("absent.toml")).expect("load");

        assert_eq!(config, Config::default());
        assert_eq!(config.core.default_endpoint, "core");
        assert!(config.default_endpoint().is_none());
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.endpoints.insert(
            "core".to_string(),
            EndpointConfig {
                base_url: "https://api.example.com/core".to_string(),
                timeout_secs: Some(30),
                cache_ttl_secs: Some(60),
            },
        );

        config.save_to(&path).expect("save");
        let reloaded = Config::load_from(&path).expect("reload");

        assert_eq!(reloaded, config);
        assert_eq!(
            reloaded.default_endpoint().map(|e| e.base_url.as_str()),
            Some("https://api.example.com/core")
        );
    }

    #[test]
    fn test_parses_documented_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        write_config_file(
            &path,
            r#"
[core]
default_endpoint = "billing"

[endpoints.billing]
base_url = "https://api.example.com/billing"
"#,
        )
        .expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.core.default_endpoint, "billing");

        let billing = config.endpoint("billing").expect("profile");
        assert_eq!(billing.base_url, "https://api.example.com/billing");
        assert_eq!(billing.timeout_secs, None);
    }

    #[test]
    fn test_invalid_toml_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        write_config_file(&path, "not [valid toml").expect("write");

        assert!(Config::load_from(&path).is_err());
    }
}
