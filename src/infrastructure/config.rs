use secrecy::SecretString;
use std::env;
use std::fmt;

use crate::domain::DeletedAssetPolicy;

/// Token used in debug builds when a scope has none configured
const DEV_CLIENT_TOKEN: &str = "dev-client-token";
const DEV_ADMIN_TOKEN: &str = "dev-admin-token";

#[derive(Debug)]
pub enum ConfigError {
    /// No bearer secret configured for a scope (release builds only)
    MissingTokens(&'static str),
    /// A variable is set but cannot be parsed
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingTokens(var) => {
                write!(f, "{} must be set in production", var)
            }
            ConfigError::Invalid { var, value } => {
                write!(f, "Invalid value for {}: '{}'", var, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Bearer secrets per scope. Several values per scope allow rotation.
#[derive(Debug)]
pub struct AuthConfig {
    pub client_tokens: Vec<SecretString>,
    pub admin_tokens: Vec<SecretString>,
}

impl AuthConfig {
    pub fn new(client_tokens: &[&str], admin_tokens: &[&str]) -> Self {
        Self {
            client_tokens: client_tokens
                .iter()
                .map(|t| SecretString::new(t.to_string()))
                .collect(),
            admin_tokens: admin_tokens
                .iter()
                .map(|t| SecretString::new(t.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub deleted_asset_policy: DeletedAssetPolicy,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://asset_registry.db?mode=rwc".to_string());

        let port = match env::var("PORT") {
            Ok(p) => p.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: p.clone(),
            })?,
            Err(_) => 8000,
        };

        let deleted_asset_policy = match env::var("REVIVE_DELETED_ASSETS") {
            Ok(v) => {
                if parse_flag(&v).ok_or_else(|| ConfigError::Invalid {
                    var: "REVIVE_DELETED_ASSETS",
                    value: v.clone(),
                })? {
                    DeletedAssetPolicy::Revive
                } else {
                    DeletedAssetPolicy::Reject
                }
            }
            Err(_) => DeletedAssetPolicy::Revive,
        };

        let auth = AuthConfig {
            client_tokens: tokens_from_env("CLIENT_TOKENS", DEV_CLIENT_TOKEN)?,
            admin_tokens: tokens_from_env("ADMIN_TOKENS", DEV_ADMIN_TOKEN)?,
        };

        Ok(Self {
            database_url,
            port,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| split_list(&s))
                .unwrap_or_else(Vec::new),
            deleted_asset_policy,
            auth,
        })
    }
}

fn tokens_from_env(var: &'static str, dev_token: &str) -> Result<Vec<SecretString>, ConfigError> {
    let tokens = env::var(var).map(|s| split_list(&s)).unwrap_or_default();
    if !tokens.is_empty() {
        return Ok(tokens.into_iter().map(SecretString::new).collect());
    }

    if cfg!(debug_assertions) {
        tracing::warn!("{} not set, falling back to the development token", var);
        Ok(vec![SecretString::new(dev_token.to_string())])
    } else {
        Err(ConfigError::MissingTokens(var))
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
