use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

pub(crate) const DEFAULT_PROFILE: &str = "development";

/// Command-line arguments for the booktrack binary.
#[derive(Debug, Parser)]
#[command(name = "booktrack", version, about = "Book tracking API server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BOOKTRACK_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Configuration profile; `config/<profile>` is layered over the defaults.
    #[arg(
        long = "profile",
        env = "BOOKTRACK_PROFILE",
        value_name = "NAME",
        default_value = DEFAULT_PROFILE
    )]
    pub profile: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP API.
    Serve(Box<ServeArgs>),
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

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

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

    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,

    /// Override the database pool size.
    #[arg(long = "database-max-connections", value_name = "COUNT")]
    pub database_max_connections: Option<u32>,

    /// Enable or disable the query cache.
    #[arg(
        long = "cache-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub cache_enabled: Option<bool>,

    /// Override the query cache TTL.
    #[arg(long = "cache-query-ttl-seconds", value_name = "SECONDS")]
    pub cache_query_ttl_seconds: Option<u64>,

    /// Override how often expired cache entries are swept (0 disables).
    #[arg(long = "cache-sweep-interval-seconds", value_name = "SECONDS")]
    pub cache_sweep_interval_seconds: Option<u64>,
}
