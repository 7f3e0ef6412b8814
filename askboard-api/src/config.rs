/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
/// - `PRODUCTION`: Production mode; logs are emitted as JSON lines (default: false)
/// - `SEED_MOCK_DATA`: Install the mock sample data at startup (default: true)
/// - `RUST_LOG`: Log level (default: askboard_api=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use askboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Forum behaviour
    pub forum: ForumConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Production mode (JSON logs)
    pub production: bool,
}

/// Forum configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumConfig {
    /// Seed the store with mock users and questions at startup
    pub seed_mock_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            forum: ForumConfig {
                seed_mock_data: true,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable has an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let host = env::var("API_HOST").unwrap_or(defaults.api.host);
        let port = match env::var("API_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("API_PORT must be a port number: {}", e))?,
            Err(_) => defaults.api.port,
        };

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => parse_list(&raw),
            Err(_) => defaults.api.cors_origins,
        };
        if cors_origins.is_empty() {
            anyhow::bail!("CORS_ORIGINS must list at least one origin");
        }

        let production = read_bool("PRODUCTION", defaults.api.production)?;
        let seed_mock_data = read_bool("SEED_MOCK_DATA", defaults.forum.seed_mock_data)?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            forum: ForumConfig { seed_mock_data },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// True when log lines should be JSON rather than human-readable
    pub fn json_logs(&self) -> bool {
        self.api.production
    }

    /// True when CORS accepts any origin
    pub fn cors_permissive(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}

fn read_bool(name: &str, default: bool) -> anyhow::Result<bool> {
    match env::var(name) {
        Ok(raw) => parse_bool(&raw)
            .ok_or_else(|| anyhow::anyhow!("{} must be true or false, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
