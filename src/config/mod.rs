//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `MATCH_SCORE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_SEQ_LEN, DEFAULT_REQUEST_TIMEOUT_MS, MODEL_CONFIG_FILE,
    MODEL_TOKENIZER_FILE, MODEL_WEIGHTS_FILE,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `MATCH_SCORE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    /// When unset the server runs the stub encoder.
    pub model_path: Option<PathBuf>,

    /// Token budget per document. Default: `256`.
    pub max_seq_len: usize,

    /// Upper bound for encoding and comparing one pair. Default: `12000`.
    pub request_timeout_ms: u64,

    /// Request body limit in bytes. Default: 2 MiB.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_path: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "MATCH_SCORE_PORT";
    pub const ENV_BIND_ADDR: &'static str = "MATCH_SCORE_BIND_ADDR";
    pub const ENV_MODEL_PATH: &'static str = "MATCH_SCORE_MODEL_PATH";
    pub const ENV_MAX_SEQ_LEN: &'static str = "MATCH_SCORE_MAX_SEQ_LEN";
    pub const ENV_REQUEST_TIMEOUT_MS: &'static str = "MATCH_SCORE_REQUEST_TIMEOUT_MS";
    pub const ENV_MAX_BODY_BYTES: &'static str = "MATCH_SCORE_MAX_BODY_BYTES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let max_seq_len = parse_number_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len)?;
        let request_timeout_ms =
            parse_number_from_env(Self::ENV_REQUEST_TIMEOUT_MS, defaults.request_timeout_ms)?;
        let max_body_bytes =
            parse_number_from_env(Self::ENV_MAX_BODY_BYTES, defaults.max_body_bytes)?;

        Ok(Self {
            port,
            bind_addr,
            model_path,
            max_seq_len,
            request_timeout_ms,
            max_body_bytes,
        })
    }

    /// Validates limits and the model directory layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_seq_len == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_MAX_SEQ_LEN,
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_REQUEST_TIMEOUT_MS,
            });
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_MAX_BODY_BYTES,
            });
        }

        if let Some(ref dir) = self.model_path {
            if !dir.exists() {
                return Err(ConfigError::PathNotFound { path: dir.clone() });
            }
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory { path: dir.clone() });
            }
            for file in [MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE, MODEL_TOKENIZER_FILE] {
                let path = dir.join(file);
                if !path.is_file() {
                    return Err(ConfigError::NotAFile { path });
                }
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }
}

pub(crate) fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
    env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub(crate) fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    match env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidNumber {
                name: var_name,
                value,
                source: e,
            }),
        Err(_) => Ok(default),
    }
}
