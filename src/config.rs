use crate::domain::page::DEFAULT_PULL_LIMIT;
use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser, Default)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub storage: StorageConfig,

    #[command(flatten)]
    pub valkey: ValkeyConfig,

    #[command(flatten)]
    pub messaging: MessagingConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public API
    #[arg(long, env = "RELAY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Port for the management API (health probes)
    #[arg(long, env = "RELAY_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight work on shutdown
    #[arg(long, env = "RELAY_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080, mgmt_port: 9090, shutdown_timeout_secs: 5 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Durable lists in Valkey/Redis
    #[default]
    Valkey,
    /// Process-local storage, lost on restart
    Memory,
}

#[derive(Clone, Debug, Default, Args)]
pub struct StorageConfig {
    /// Where conversation logs are kept
    #[arg(long = "storage-backend", env = "RELAY_STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Valkey)]
    pub backend: StorageBackend,
}

#[derive(Clone, Debug, Args)]
pub struct ValkeyConfig {
    /// Valkey connection URL
    #[arg(long = "valkey-url", env = "RELAY_VALKEY_URL", default_value = "redis://127.0.0.1:6379")]
    pub url: String,

    /// Prefix prepended to every conversation key
    #[arg(long = "valkey-key-prefix", env = "RELAY_VALKEY_KEY_PREFIX", default_value = "chat:")]
    pub key_prefix: String,

    /// Initial delay between connection attempts in milliseconds
    #[arg(long = "valkey-min-backoff-ms", env = "RELAY_VALKEY_MIN_BACKOFF_MS", default_value_t = 100)]
    pub min_backoff_ms: u64,

    /// Maximum delay between connection attempts in seconds
    #[arg(long = "valkey-max-backoff-secs", env = "RELAY_VALKEY_MAX_BACKOFF_SECS", default_value_t = 5)]
    pub max_backoff_secs: u64,

    /// Number of connection attempts before giving up at startup
    #[arg(long = "valkey-connect-attempts", env = "RELAY_VALKEY_CONNECT_ATTEMPTS", default_value_t = 5)]
    pub connect_attempts: usize,
}

impl Default for ValkeyConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: "chat:".to_string(),
            min_backoff_ms: 100,
            max_backoff_secs: 5,
            connect_attempts: 5,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct MessagingConfig {
    /// Page size used when a pull request asks for a limit of zero
    #[arg(
        long = "pull-default-limit",
        env = "RELAY_PULL_DEFAULT_LIMIT",
        default_value_t = DEFAULT_PULL_LIMIT,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub default_limit: i64,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self { default_limit: DEFAULT_PULL_LIMIT }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "RELAY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; traces and metrics are only exported when set
    #[arg(long, env = "RELAY_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// How often metrics are pushed to the collector
    #[arg(long, env = "RELAY_METRICS_EXPORT_INTERVAL_SECS", default_value_t = 60)]
    pub metrics_export_interval_secs: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { log_format: LogFormat::Text, otlp_endpoint: None, metrics_export_interval_secs: 60 }
    }
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let parsed = Config::parse_from(["chat-relay-server"]);
        let defaults = Config::default();
        assert_eq!(parsed.server.port, defaults.server.port);
        assert_eq!(parsed.server.mgmt_port, defaults.server.mgmt_port);
        assert_eq!(parsed.storage.backend, StorageBackend::Valkey);
        assert_eq!(parsed.valkey.key_prefix, defaults.valkey.key_prefix);
        assert_eq!(parsed.messaging.default_limit, DEFAULT_PULL_LIMIT);
        assert_eq!(parsed.telemetry.log_format, LogFormat::Text);
    }

    #[test]
    fn test_zero_default_limit_rejected() {
        let res = Config::try_parse_from(["chat-relay-server", "--pull-default-limit", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_memory_backend_flag() {
        let parsed = Config::try_parse_from(["chat-relay-server", "--storage-backend", "memory"]).unwrap();
        assert_eq!(parsed.storage.backend, StorageBackend::Memory);
    }
}
