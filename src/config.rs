//! Runtime configuration, read from the environment.
//!
//! | Variable                 | Default          | Meaning                          |
//! |--------------------------|------------------|----------------------------------|
//! | `EMPLOYEE_REGISTRY_ADDR` | `127.0.0.1:8080` | HTTP listen address              |
//! | `EMPLOYEE_REGISTRY_DATA` | unset            | JSON data file; unset = memory   |
//! | `RUST_LOG`               | `info`           | tracing filter directive         |

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ADDR_VAR: &str = "EMPLOYEE_REGISTRY_ADDR";
pub const DATA_VAR: &str = "EMPLOYEE_REGISTRY_DATA";
pub const LOG_VAR: &str = "RUST_LOG";

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Where the file store keeps its rows. `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            data_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(raw_addr.clone()))?;

        Ok(Self {
            bind_addr,
            data_file: get(DATA_VAR).map(PathBuf::from),
            log_filter: get(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAddr(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddr(raw) => {
                write!(f, "{} is not a socket address: '{}'", ADDR_VAR, raw)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
