use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Database connection URL (required for the postgres store)
    #[arg(long, env = "EXERCISE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Which store backend holds users and their exercise logs
    #[arg(long, env = "EXERCISE_STORE", value_enum, default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "EXERCISE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "EXERCISE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management (health) listener
    #[arg(long, env = "EXERCISE_MGMT_PORT", default_value_t = 3001)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight work after a shutdown signal
    #[arg(long, env = "EXERCISE_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,

    /// Directory of static assets served for unmatched paths
    #[arg(long, env = "EXERCISE_PUBLIC_DIR", default_value = "public")]
    pub public_dir: String,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    #[arg(long = "db-max-connections", env = "EXERCISE_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    #[arg(long = "db-min-connections", env = "EXERCISE_DB_MIN_CONNECTIONS", default_value_t = 1)]
    pub min_connections: u32,

    /// Seconds to wait for a free connection before failing the request
    #[arg(long = "db-acquire-timeout-secs", env = "EXERCISE_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    #[arg(long = "db-idle-timeout-secs", env = "EXERCISE_DB_IDLE_TIMEOUT_SECS", default_value_t = 600)]
    pub idle_timeout_secs: u64,

    #[arg(long = "db-max-lifetime-secs", env = "EXERCISE_DB_MAX_LIFETIME_SECS", default_value_t = 1800)]
    pub max_lifetime_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the readiness database probe
    #[arg(long, env = "EXERCISE_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { db_timeout_ms: 2000 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// OTLP collector endpoint; traces and metrics are only exported when set
    #[arg(long, env = "EXERCISE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    #[arg(long, env = "EXERCISE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from a `.env` file (if any), the environment, and the command line.
    #[must_use]
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }
}
