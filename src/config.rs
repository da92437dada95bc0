use anyhow::{ensure, Context, Result};
use std::env;
use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
/// Error records are two short members; anything larger is rejected
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub instance_id: String,
    /// Largest request body accepted by the JSON endpoints
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_body_bytes = parse_var(&lookup, "API_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?;
        ensure!(max_body_bytes > 0, "API_MAX_BODY_BYTES must be greater than zero");

        Ok(Config {
            server: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: parse_var(&lookup, "API_PORT", DEFAULT_PORT)?,
                // Only used in logs and health output. Falls back to HOSTNAME (set by
                // Docker/Kubernetes), otherwise "unknown".
                instance_id: lookup("INSTANCE_ID")
                    .or_else(|| lookup("HOSTNAME"))
                    .unwrap_or_else(|| "unknown".to_string()),
                max_body_bytes,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got {:?}", key, raw)),
        None => Ok(default),
    }
}
