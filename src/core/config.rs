//! Configuration management for the MCP server.
//!
//! Configuration is populated from defaults, then from environment variables
//! (a `.env` file is honoured). Catalog settings are passed explicitly to the
//! catalog client and the tool dispatcher; nothing here is global state.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Public NUSMods API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.nusmods.com/v2";

/// Academic year queried when a tool call does not name one.
pub const DEFAULT_ACAD_YEAR: &str = "2024-2025";

/// Maximum number of modules listed by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Modules previewed per department in department listings.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Catalog API and rendering configuration.
    pub catalog: CatalogConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Catalog API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without the academic-year segment.
    pub base_url: String,

    /// Default academic year, e.g. "2024-2025".
    pub acad_year: String,

    /// Default number of results shown by `search_modules`.
    pub search_limit: usize,

    /// Modules previewed per department by `list_modules_by_department`.
    pub preview_limit: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load the log level from `MCP_LOG_LEVEL` (a `.env` file is honoured).
    ///
    /// This reads nothing else, so the subscriber can be installed before
    /// the rest of the configuration is parsed and its warnings are seen.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.level = level;
        }
        config
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            acad_year: DEFAULT_ACAD_YEAR.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl CatalogConfig {
    /// Load catalog settings from `NUSMODS_API_BASE_URL`, `CURRENT_ACAD_YEAR`,
    /// `DEFAULT_SEARCH_LIMIT` and `DEFAULT_PREVIEW_LIMIT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("NUSMODS_API_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(acad_year) = std::env::var("CURRENT_ACAD_YEAR") {
            config.acad_year = acad_year;
        }

        config.search_limit = limit_from_env("DEFAULT_SEARCH_LIMIT", config.search_limit);
        config.preview_limit = limit_from_env("DEFAULT_PREVIEW_LIMIT", config.preview_limit);

        config
    }
}

/// Read a positive count from the environment, keeping `default` when the
/// variable is unset or unusable.
fn limit_from_env(var: &str, default: usize) -> usize {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(limit) if limit > 0 => limit,
            _ => {
                warn!("Ignoring {}={:?}: expected a positive integer", var, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "nusmods-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). Catalog settings use the
    /// names documented on [`CatalogConfig::from_env`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        config.transport = TransportConfig::from_env();
        config.catalog = CatalogConfig::from_env();

        config
    }
}
