use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "EVENT_REGISTRATIONS_BIND_ADDR";
pub const SUBMIT_DELAY_VAR: &str = "EVENT_REGISTRATIONS_SUBMIT_DELAY_MS";
pub const PAYMENT_DELAY_VAR: &str = "EVENT_REGISTRATIONS_PAYMENT_DELAY_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a socket address: {value}")]
    InvalidAddress { var: &'static str, value: String },

    #[error("{var} is not a number of milliseconds: {value}")]
    InvalidDelay { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub submit_delay: Duration,
    pub payment_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            submit_delay: Duration::from_millis(1000),
            payment_delay: Duration::from_millis(2000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Unset variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidAddress {
                    var: BIND_ADDR_VAR,
                    value,
                })?,
            None => defaults.bind_addr,
        };
        Ok(Self {
            bind_addr,
            submit_delay: delay(&lookup, SUBMIT_DELAY_VAR)?.unwrap_or(defaults.submit_delay),
            payment_delay: delay(&lookup, PAYMENT_DELAY_VAR)?.unwrap_or(defaults.payment_delay),
        })
    }
}

fn delay(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidDelay { var, value })
        })
        .transpose()
}
