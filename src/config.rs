use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Environment variable holding the memory service credential.
pub const API_KEY_VAR: &str = "ZEP_API_KEY";

/// Base URL used when `ZEP_API_URL` is not provided.
pub const DEFAULT_API_URL: &str = "https://api.getzep.com/api/v2";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The memory service credential was absent or blank.
    #[error("Missing credential: {0} must be set to a non-empty API key")]
    MissingCredential(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration shared by the stdio and HTTP binaries.
#[derive(Clone)]
pub struct Config {
    /// Credential sent to the memory service on every request.
    pub api_key: String,
    /// Base URL of the memory service REST API.
    pub api_url: String,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Keep MCP sessions alive across HTTP requests instead of one-shot exchanges.
    pub http_stateful: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("server_port", &self.server_port)
            .field("http_stateful", &self.http_stateful)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup, validating the credential first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = optional(API_KEY_VAR)
            .ok_or_else(|| ConfigError::MissingCredential(API_KEY_VAR.to_string()))?;

        let api_url = optional("ZEP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        reqwest::Url::parse(api_url.trim())
            .map_err(|_| ConfigError::InvalidValue("ZEP_API_URL".to_string()))?;

        let server_port = optional("SERVER_PORT")
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
            })
            .transpose()?;

        let http_stateful = optional("MCP_HTTP_STATEFUL")
            .map(|value| parse_flag(&value))
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            api_key: api_key.trim().to_string(),
            api_url: api_url.trim().to_string(),
            server_port,
            http_stateful,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue("MCP_HTTP_STATEFUL".into())),
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load configuration from the environment and cache it for the process lifetime.
///
/// Reads `.env` first when present. Fails when the credential is missing so callers can abort
/// before any tool is registered.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        api_url = %config.api_url,
        server_port = ?config.server_port,
        http_stateful = config.http_stateful,
        has_api_key = true,
        "Loaded configuration"
    );
    Ok(CONFIG.get_or_init(|| config))
}
