// src/utils/config.rs
//! Engine configuration
//!
//! `EngineConfig` is a plain data holder: construction performs no validation
//! and has no side effects, so configurations can be built speculatively (in
//! tests, or before deciding whether to start interception at all). Applying
//! the configuration is the controller's job.

use crate::utils::errors::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// HTTP response cache policy for the engine
///
/// The three values map one-to-one onto the engine's cache types; the
/// controller owns that mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// No response caching
    #[default]
    Disabled,

    /// Disk-backed response cache
    Disk,

    /// In-memory response cache
    Memory,
}

/// Configuration applied to the network engine at startup
///
/// Read-only once handed to the controller: exactly one configuration is ever
/// applied per process lifetime, and later `start()` calls are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Enable HTTP/2 support
    #[serde(default = "default_true")]
    pub http2_enabled: bool,

    /// Enable QUIC support
    #[serde(default = "default_true")]
    pub quic_enabled: bool,

    /// Enable Brotli/gzip response compression
    #[serde(default = "default_true")]
    pub compression_enabled: bool,

    /// Enable engine-internal request metrics collection
    #[serde(default)]
    pub metrics_enabled: bool,

    /// Response cache policy
    #[serde(default)]
    pub cache_mode: CacheMode,

    /// User-agent identity, applied as a partial (additive) override
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Hostnames or host-suffixes eligible for interception
    ///
    /// Absent or empty means no host is ever intercepted (fail-closed).
    #[serde(default)]
    pub host_allow_list: Option<Vec<String>>,

    /// Opaque engine-specific options payload, forwarded verbatim
    ///
    /// The content is never inspected or validated by this layer; a malformed
    /// payload is the engine's to reject.
    #[serde(default)]
    pub experimental_options: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    "netshunt".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            http2_enabled: true,
            quic_enabled: true,
            compression_enabled: true,
            metrics_enabled: false,
            cache_mode: CacheMode::Disabled,
            user_agent: default_user_agent(),
            host_allow_list: None,
            experimental_options: None,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_cache_mode(mut self, cache_mode: CacheMode) -> Self {
        self.cache_mode = cache_mode;
        self
    }

    pub fn with_allow_list<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.host_allow_list = Some(hosts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_experimental_options(mut self, options: impl Into<String>) -> Self {
        self.experimental_options = Some(options.into());
        self
    }

    /// Load configuration from `netshunt.{yaml,toml,json}` and `NETSHUNT__*`
    /// environment overrides
    ///
    /// Missing files are fine; every field has a default. Malformed sources
    /// are a hard error so a typoed config is caught at startup rather than
    /// silently ignored.
    pub fn load() -> Result<Self> {
        Self::load_from("netshunt")
    }

    /// Load configuration from a named file stem plus environment overrides
    pub fn load_from(name: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix("NETSHUNT").separator("__"))
            .build()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| EngineError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.http2_enabled);
        assert!(config.quic_enabled);
        assert!(config.compression_enabled);
        assert!(!config.metrics_enabled);
        assert_eq!(config.cache_mode, CacheMode::Disabled);
        assert_eq!(config.user_agent, "netshunt");
        assert!(config.host_allow_list.is_none());
        assert!(config.experimental_options.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_user_agent("my-app/1.0")
            .with_cache_mode(CacheMode::Memory)
            .with_allow_list(["googleapis.com"])
            .with_experimental_options(r#"{"AsyncDNS":{"enable":true}}"#);

        assert_eq!(config.user_agent, "my-app/1.0");
        assert_eq!(config.cache_mode, CacheMode::Memory);
        assert_eq!(
            config.host_allow_list,
            Some(vec!["googleapis.com".to_string()])
        );
        assert!(config.experimental_options.is_some());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"quic_enabled": false, "cache_mode": "disk"}"#).unwrap();

        assert!(config.http2_enabled);
        assert!(!config.quic_enabled);
        assert_eq!(config.cache_mode, CacheMode::Disk);
        assert_eq!(config.user_agent, "netshunt");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netshunt.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "user_agent: test-agent\nhost_allow_list:\n  - googleapis.com\n  - example.org"
        )
        .unwrap();

        let stem = path.with_extension("");
        let config = EngineConfig::load_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(
            config.host_allow_list,
            Some(vec![
                "googleapis.com".to_string(),
                "example.org".to_string()
            ])
        );
        // Untouched fields keep their defaults
        assert!(config.http2_enabled);
        assert_eq!(config.cache_mode, CacheMode::Disabled);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = EngineConfig::load_from("/nonexistent/netshunt").unwrap();
        assert_eq!(config.user_agent, "netshunt");
        assert!(config.host_allow_list.is_none());
    }

    #[test]
    fn test_cache_mode_roundtrip() {
        for (mode, text) in [
            (CacheMode::Disabled, "\"disabled\""),
            (CacheMode::Disk, "\"disk\""),
            (CacheMode::Memory, "\"memory\""),
        ] {
            assert_eq!(serde_json::to_string(&mode).unwrap(), text);
            let back: CacheMode = serde_json::from_str(text).unwrap();
            assert_eq!(back, mode);
        }
    }
}
