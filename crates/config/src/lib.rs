//! Configuration for the honeypot service
//!
//! Supports loading settings from:
//! - An optional `honeypot.toml` file
//! - Environment variables (`HONEYPOT__` prefix, `__` separator)
//!
//! The crate also carries the immutable conversational data: the reply
//! script banks and the contextual trigger tables. Both are plain serde
//! structs whose `Default` impls hold the canonical text, so deployments
//! can override them from configuration without touching code.

pub mod scripts;
pub mod settings;
pub mod triggers;

pub use scripts::{ScriptKind, ScriptLibrary, TriggerReplies};
pub use settings::{
    load_settings, AuthConfig, CallbackConfig, EngagementConfig, ServerConfig, Settings,
};
pub use triggers::{TriggerRule, TriggerTable};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
