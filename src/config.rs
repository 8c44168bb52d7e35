//! Process configuration read from the environment.

use std::env;
use std::fmt;

use thiserror::Error;

const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid {name} `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings of the remote table store.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base endpoint, e.g. `https://project.supabase.co`.
    pub url: String,
    /// Anonymous access key sent with every request.
    pub anon_key: String,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

/// Credential guarding the admin surface.
#[derive(Clone)]
pub struct AdminConfig {
    pub token: String,
}

impl AdminConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Everything `main` needs to serve requests.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub store: StoreConfig,
    pub admin: AdminConfig,
    /// Cookie signing secret; a random key is generated when absent.
    pub secret: Option<String>,
    pub address: String,
    pub port: u16,
    /// Cookie domain for the admin session.
    pub domain: Option<String>,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let url = require("SUPABASE_URL")?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: "SUPABASE_URL",
                value: url,
            });
        }
        let anon_key = require("SUPABASE_ANON_KEY")?;
        let admin_token = require("ADMIN_TOKEN")?;

        let port = match get("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            store: StoreConfig::new(url, anon_key),
            admin: AdminConfig::new(admin_token),
            secret: get("SECRET_KEY"),
            address: get("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            port,
            domain: get("DOMAIN"),
        })
    }
}
