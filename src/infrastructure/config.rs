//! Application configuration

use std::env;

use anyhow::{Context, Result};
use uuid::Uuid;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// HTTP server port
    pub server_port: u16,

    /// Hard cap on total token supply
    pub max_supply: u64,
    /// Tokens minted by each successful daily emission
    pub daily_emission_rate: u64,
    /// Wallet receiving scheduled emissions; nil UUID means the treasury
    pub emission_recipient: Uuid,

    /// Maximum characters a single wallet may hold
    pub max_per_wallet: usize,
    /// Length of the earnings accounting period, in hours
    pub collect_period_hours: i64,
    /// Building-wide efficiency multiplier applied to all earnings
    pub global_efficiency: f64,

    /// Shared secret for the admin HTTP endpoints
    pub admin_key: String,
    /// Optional fixed seed for the character generator
    pub generator_seed: Option<u64>,
    /// Where the state snapshot is written on shutdown/interval
    pub snapshot_path: String,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            max_supply: env::var("MAX_SUPPLY")
                .unwrap_or_else(|_| "1000000000".to_string())
                .parse()
                .context("MAX_SUPPLY must be a non-negative integer")?,
            daily_emission_rate: env::var("DAILY_EMISSION_RATE")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .context("DAILY_EMISSION_RATE must be a non-negative integer")?,
            emission_recipient: env::var("EMISSION_RECIPIENT")
                .map(|value| Uuid::parse_str(&value))
                .unwrap_or(Ok(Uuid::nil()))
                .context("EMISSION_RECIPIENT must be a valid UUID")?,

            max_per_wallet: {
                let value: usize = env::var("MAX_PER_WALLET")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .context("MAX_PER_WALLET must be a positive integer")?;
                anyhow::ensure!(value >= 1, "MAX_PER_WALLET must be at least 1");
                value
            },
            collect_period_hours: env::var("COLLECT_PERIOD_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .context("COLLECT_PERIOD_HOURS must be a positive integer")?,
            global_efficiency: env::var("GLOBAL_EFFICIENCY")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()
                .context("GLOBAL_EFFICIENCY must be a number")?,

            admin_key: env::var("ADMIN_KEY")
                .context("ADMIN_KEY environment variable is required")?,
            generator_seed: match env::var("GENERATOR_SEED") {
                Ok(value) => Some(
                    value
                        .parse()
                        .context("GENERATOR_SEED must be an integer")?,
                ),
                Err(_) => None,
            },
            snapshot_path: env::var("SNAPSHOT_PATH")
                .unwrap_or_else(|_| "engine_state.json".to_string()),
        })
    }
}
