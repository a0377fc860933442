//! Proxy configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (STRATA_*)
//! 2. TOML config file (if STRATA_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The generation identifier and the core asset list are deployment
//! constants: a deployer ships a new version by bumping both together,
//! and the engine receives them here rather than reading globals.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Proxy configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (STRATA_*)
/// 2. TOML config file (if STRATA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Identifier of the current cache generation.
    ///
    /// Bump together with `core_assets` when shipping a version that
    /// needs a clean cache. Set via STRATA_GENERATION.
    #[serde(default = "default_generation")]
    pub generation: String,

    /// Origin of the application. Requests to any other origin pass
    /// through untouched.
    ///
    /// Set via STRATA_ORIGIN.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Absolute paths seeded into a freshly created generation: the app
    /// shell.
    ///
    /// Set via STRATA_CORE_ASSETS.
    #[serde(default = "default_core_assets")]
    pub core_assets: Vec<String>,

    /// Path of the main entry document, served as the shell when an
    /// uncached navigation fails offline.
    ///
    /// Set via STRATA_FALLBACK_DOCUMENT.
    #[serde(default = "default_fallback_document")]
    pub fallback_document: String,

    /// Path to the SQLite snapshot store.
    ///
    /// Set via STRATA_DB_PATH.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for network fetches.
    ///
    /// Set via STRATA_USER_AGENT.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via STRATA_MAX_BYTES.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Network fetch timeout in milliseconds.
    ///
    /// Set via STRATA_TIMEOUT_MS.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects to follow per fetch.
    ///
    /// Set via STRATA_MAX_REDIRECTS.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_generation() -> String {
    "v1".into()
}

fn default_origin() -> String {
    "http://localhost:8080".into()
}

fn default_core_assets() -> Vec<String> {
    vec!["/".into(), "/index.html".into(), "/manifest.webmanifest".into()]
}

fn default_fallback_document() -> String {
    "/index.html".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./strata-cache.sqlite")
}

fn default_user_agent() -> String {
    "strata/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_redirects() -> usize {
    5
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            generation: default_generation(),
            origin: default_origin(),
            core_assets: default_core_assets(),
            fallback_document: default_fallback_document(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl ProxyConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The configured origin as a parsed URL.
    pub fn origin_url(&self) -> Result<url::Url, ConfigError> {
        url::Url::parse(&self.origin)
            .map_err(|e| ConfigError::Invalid { field: "origin".into(), reason: e.to_string() })
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `STRATA_`
    /// 2. TOML file from `STRATA_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("STRATA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("STRATA_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
