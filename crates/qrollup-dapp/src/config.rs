//! Command-line and environment configuration.

use std::time::Duration;

use clap::{ArgAction, Parser};

use qrollup_adapter_sim::DEFAULT_MAX_QUBITS;

/// Quantum gate rollup dapp.
#[derive(Debug, Clone, Parser)]
#[command(name = "qrollup-dapp")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Base URL of the rollup coordinator
    #[arg(long, env = "ROLLUP_HTTP_SERVER_URL")]
    pub rollup_server: String,

    /// Number of qubits in the register
    #[arg(
        long,
        env = "QROLLUP_NUM_QUBITS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(DEFAULT_MAX_QUBITS))
    )]
    pub num_qubits: u32,

    /// Shots per MeasAll
    #[arg(
        long,
        env = "QROLLUP_SHOTS",
        default_value_t = 1024,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub shots: u32,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub http_timeout_secs: u64,

    /// Pause after a failed /finish, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Seed for measurement sampling
    #[arg(long, env = "QROLLUP_SEED")]
    pub seed: Option<u64>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// HTTP timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Retry delay.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Default log filter for the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
