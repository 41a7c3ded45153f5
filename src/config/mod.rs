//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{
    net::{AddrParseError, IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "vetrina";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/vetrina";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CACHE_REVALIDATE_SECS: u64 = 60;
const DEFAULT_CACHE_DETAIL_LIMIT: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Command-line arguments for the vetrina binary.
#[derive(Debug, Parser)]
#[command(name = "vetrina", version, about = "Personal-site content backend")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "VETRINA_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Apply pending database migrations and exit.
    Migrate(MigrateArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the page revalidation window, in seconds.
    #[arg(long = "cache-revalidate-seconds", value_name = "SECONDS")]
    pub cache_revalidate_secs: Option<u64>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct MigrateArgs {
    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,
}

impl ServeOverrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.server_host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.server_port {
            settings.server.port = port;
        }
        if let Some(url) = &self.database_url {
            settings.database.url = url.clone();
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
        if let Some(json) = self.log_json {
            settings.logging.format = if json {
                LogFormat::Json
            } else {
                LogFormat::Compact
            };
        }
        if let Some(secs) = self.cache_revalidate_secs {
            settings.cache.revalidate_secs = secs;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let host: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(host, self.port))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Seconds a generated page is served before background regeneration.
    pub revalidate_secs: u64,
    /// Maximum number of cached detail pages.
    pub detail_limit: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            revalidate_secs: DEFAULT_CACHE_REVALIDATE_SECS,
            detail_limit: DEFAULT_CACHE_DETAIL_LIMIT,
        }
    }
}

/// Parses the CLI and loads settings with file → env precedence. CLI
/// overrides are applied by the caller once the subcommand is known.
pub fn load_with_cli() -> Result<(CliArgs, Settings), ConfigError> {
    let cli = CliArgs::parse();
    let settings = load(cli.config_file.as_deref())?;
    Ok((cli, settings))
}

pub fn load(config_file: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(Environment::with_prefix("VETRINA").separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.max_connections, 8);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(settings.cache.revalidate_secs, 60);
        assert_eq!(settings.cache.detail_limit, 256);
    }

    #[test]
    fn socket_addr_parses_host_and_port() {
        let server = ServerSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(
            server.socket_addr().expect("addr").to_string(),
            "0.0.0.0:8080"
        );
    }

    #[test]
    fn invalid_host_is_rejected() {
        let server = ServerSettings {
            host: "not-an-ip".to_string(),
            port: 8080,
        };
        assert!(server.socket_addr().is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let mut settings = Settings::default();
        let overrides = ServeOverrides {
            server_host: Some("0.0.0.0".to_string()),
            server_port: Some(9000),
            database_url: Some("postgres://db/override".to_string()),
            log_level: Some("debug".to_string()),
            log_json: Some(true),
            cache_revalidate_secs: Some(5),
        };

        overrides.apply(&mut settings);

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.database.url, "postgres://db/override");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.cache.revalidate_secs, 5);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut settings = Settings::default();
        ServeOverrides::default().apply(&mut settings);
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.logging.format, LogFormat::Compact);
    }
}
