use std::env;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
}

/// MailerSend relay settings, read from the environment at startup.
/// The store collections run in-process, so the relay is the only
/// external endpoint that needs credentials.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub from_email: String,
    pub from_name: String,
    pub admin_email: String,
}

impl RelayConfig {
    /// Requires `MAILERSEND_API_KEY`, `MAILERSEND_FROM_EMAIL` and
    /// `ADMIN_EMAIL`; `MAILERSEND_FROM_NAME` falls back to the shop
    /// identity.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: require("MAILERSEND_API_KEY")?,
            from_email: require("MAILERSEND_FROM_EMAIL")?,
            from_name: env::var("MAILERSEND_FROM_NAME")
                .unwrap_or_else(|_| "Matrace Konfigurátor".to_string()),
            admin_email: require("ADMIN_EMAIL")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
