//! Application configuration.

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        global = true,
        env = "TIFFIN_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub log_format: LogFormat,
}

/// Where the session lives and which services it talks to.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// JSON file the cart and order history are kept in
    #[arg(
        long,
        global = true,
        env = "TIFFIN_SESSION_FILE",
        default_value = "tiffin-session.json"
    )]
    pub session_file: PathBuf,

    /// Order service base URL; orders are accepted locally when omitted
    #[arg(long, global = true, env = "TIFFIN_ORDERS_URL")]
    pub orders_url: Option<String>,

    /// YAML file with currency, pricing, meal windows and menu
    #[arg(long, global = true, env = "TIFFIN_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Seconds to wait for the order service before giving up on a checkout
    #[arg(
        long,
        global = true,
        env = "TIFFIN_CHECKOUT_TIMEOUT_SECS",
        default_value_t = 15u64
    )]
    pub checkout_timeout_secs: u64,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Bound on a single order submission.
    #[must_use]
    pub fn checkout_timeout(&self) -> Duration {
        Duration::from_secs(self.checkout_timeout_secs)
    }
}
