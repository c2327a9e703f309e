//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

/// Shortest accepted tick period in milliseconds
const MIN_TICK_MS: u64 = 50;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "named-timers")]
#[command(about = "Several named 40 minute countdown timers behind a local HTTP API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20540")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Interval between timer ticks in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Tick period, never shorter than `MIN_TICK_MS`
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(MIN_TICK_MS))
    }
}
