use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::game::{CoordinatorConfig, SweeperConfig, MAX_SQUAD_SIZE, MIN_SQUAD_SIZE};

/// Server settings, read from `UNMASK_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub squad_size: usize,
    pub max_players: usize,
    pub grace_period: Duration,
    pub sweep_interval: Duration,
    pub state_broadcast_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            squad_size: 4,
            max_players: 100,
            grace_period: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(5),
            state_broadcast_interval: Duration::from_millis(1000),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys keep their default; values
    /// that fail to parse are logged and also keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port_var = lookup("UNMASK_PORT").map(|v| ("UNMASK_PORT", v));
        let port = port_var
            .or_else(|| lookup("PORT").map(|v| ("PORT", v)))
            .and_then(|(key, raw)| parse_var(key, &raw))
            .unwrap_or(defaults.port);

        let squad_size = read(&lookup, "UNMASK_SQUAD_SIZE")
            .unwrap_or(defaults.squad_size)
            .clamp(MIN_SQUAD_SIZE, MAX_SQUAD_SIZE);

        let max_players = read(&lookup, "UNMASK_MAX_PLAYERS")
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_players);

        Self {
            host: lookup("UNMASK_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port,
            squad_size,
            max_players,
            grace_period: read(&lookup, "UNMASK_GRACE_PERIOD_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.grace_period),
            sweep_interval: read(&lookup, "UNMASK_SWEEP_INTERVAL_SECS")
                .filter(|&s: &u64| s > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
            state_broadcast_interval: read(&lookup, "UNMASK_STATE_BROADCAST_MS")
                .filter(|&ms: &u64| ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.state_broadcast_interval),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            default_squad_size: self.squad_size,
            max_players: self.max_players,
        }
    }

    pub fn sweeper_config(&self) -> SweeperConfig {
        SweeperConfig {
            sweep_interval: self.sweep_interval,
            grace_period: self.grace_period,
        }
    }
}

fn read<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|raw| parse_var(key, &raw))
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key = %key, value = %raw, "Ignoring invalid config value, using default");
            None
        }
    }
}
