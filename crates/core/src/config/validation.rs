//! Configuration validation rules.
//!
//! This module provides validation logic for `ProxyConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::ProxyConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl ProxyConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `generation` is empty or contains whitespace
    /// - `origin` is not an http(s) URL with a host
    /// - a core asset or the fallback document is not an absolute path
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.is_empty() {
            return Err(ConfigError::Invalid { field: "generation".into(), reason: "must not be empty".into() });
        }
        if self.generation.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                field: "generation".into(),
                reason: "must not contain whitespace".into(),
            });
        }

        let origin = self.origin_url()?;
        match origin.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::Invalid {
                    field: "origin".into(),
                    reason: format!("unsupported scheme: {scheme}"),
                });
            }
        }
        if origin.host_str().is_none() {
            return Err(ConfigError::Invalid { field: "origin".into(), reason: "must have a host".into() });
        }

        for path in &self.core_assets {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid {
                    field: "core_assets".into(),
                    reason: format!("path must be absolute: {path}"),
                });
            }
        }

        if !self.fallback_document.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "fallback_document".into(),
                reason: "path must be absolute".into(),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.core_assets.is_empty() {
            tracing::warn!("core_assets is empty; a fresh generation will not be seeded");
        }

        Ok(())
    }
}
