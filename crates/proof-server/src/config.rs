//! Server configuration read from the environment.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const ADDR_VAR: &str = "MERKLE_SERVER_ADDR";
const MAX_LEAVES_VAR: &str = "MERKLE_MAX_LEAVES";
const MAX_BODY_BYTES_VAR: &str = "MERKLE_MAX_BODY_BYTES";

const DEFAULT_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_MAX_LEAVES: usize = 1 << 20;
const DEFAULT_MAX_BODY_BYTES: usize = 128 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Upper bound on the number of leaves accepted in one request.
    pub max_leaves: usize,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_value = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value: addr_value.clone(),
            })?;

        Ok(Self {
            addr,
            max_leaves: parse_positive(&lookup, MAX_LEAVES_VAR, DEFAULT_MAX_LEAVES)?,
            max_body_bytes: parse_positive(&lookup, MAX_BODY_BYTES_VAR, DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            max_leaves: DEFAULT_MAX_LEAVES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn parse_positive<F>(lookup: &F, var: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => match value.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidNumber { var, value }),
        },
    }
}
