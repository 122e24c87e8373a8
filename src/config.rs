use std::{fmt::Display, str::FromStr, time::Duration};

use log::{info, warn};

const DEFAULT_DATABASE_URL: &str = "sqlite://leaderboard.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the environment (and a `.env` file if present).
    /// Missing or malformed values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            database_url: try_load("DATABASE_URL", DEFAULT_DATABASE_URL.to_owned()),
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", 5),
            connect_timeout: Duration::from_millis(try_load("DATABASE_CONNECT_TIMEOUT_MS", 5000)),
        }
    }

    /// A private in-memory SQLite database behind a single connection.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_owned(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match dotenv::var(key) {
        Err(_) => {
            info!("{} not set, using default: {}", key, default);
            default
        }
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {} value ({}), using default: {}", key, e, default);
            default
        }),
    }
}
