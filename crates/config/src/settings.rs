//! Service settings
//!
//! Loaded once at startup from an optional `honeypot.toml` plus
//! `HONEYPOT__`-prefixed environment variables
//! (e.g. `HONEYPOT__SERVER__AUTH__API_KEY=...`).

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub callback: CallbackConfig,
    pub engagement: EngagementConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Maximum concurrent sessions held in memory
    pub max_sessions: usize,
    /// Idle seconds before a session is eligible for cleanup
    pub session_timeout_secs: u64,
    /// Interval between cleanup sweeps
    pub cleanup_interval_secs: u64,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_sessions: 10_000,
            session_timeout_secs: 3600,
            cleanup_interval_secs: 300,
            auth: AuthConfig::default(),
        }
    }
}

/// API-key authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Whether the `x-api-key` check is enforced
    pub enabled: bool,
    /// The expected key
    pub api_key: Option<String>,
    /// Path prefixes that bypass the check
    pub public_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            public_paths: vec![
                "/health".to_string(),
                "/ready".to_string(),
                "/metrics".to_string(),
            ],
        }
    }
}

/// Outbound evaluation-callback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackConfig {
    /// Whether final reports are delivered at all
    pub enabled: bool,
    /// Endpoint receiving the final-report JSON
    pub url: String,
    /// Request timeout
    pub timeout_secs: u64,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            timeout_secs: 5,
        }
    }
}

/// Engagement policy knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// Minimum turn count before a scam-positive session is reported
    pub report_min_turns: u32,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self { report_min_turns: 7 }
    }
}

impl Settings {
    /// Reject configurations that cannot work at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.auth.enabled
            && self
                .server
                .auth
                .api_key
                .as_deref()
                .map(str::is_empty)
                .unwrap_or(true)
        {
            return Err(ConfigError::InvalidValue {
                field: "server.auth.api_key".to_string(),
                message: "auth is enabled but no API key is configured".to_string(),
            });
        }
        if self.callback.enabled && self.callback.url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "callback.url".to_string(),
                message: "callback is enabled but no URL is configured".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from file and environment
pub fn load_settings() -> Result<Settings, ConfigError> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name("honeypot").required(false))
        .add_source(
            config::Environment::with_prefix("HONEYPOT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = cfg.try_deserialize()?;
    settings.validate()?;

    tracing::debug!(
        host = %settings.server.host,
        port = settings.server.port,
        auth = settings.server.auth.enabled,
        callback = settings.callback.enabled,
        "settings loaded"
    );

    Ok(settings)
}
