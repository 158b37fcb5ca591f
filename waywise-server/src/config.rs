//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::catalog::DEFAULT_SEED;
use crate::intent::IntentConfig;
use crate::resolve::DEFAULT_THRESHOLD;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// A variable was set but its value could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Configuration for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// CSV catalog to load; the synthetic dataset is generated when absent
    pub catalog_path: Option<PathBuf>,

    /// Seed for the synthetic dataset
    pub seed: u64,

    /// Address to listen on
    pub addr: SocketAddr,

    /// Model endpoint for chat; the keyword extractor is used when absent
    pub llm: Option<IntentConfig>,

    /// Score a location match must exceed
    pub match_threshold: u8,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let seed = parse_var("WAYWISE_SEED", get("WAYWISE_SEED"))?.unwrap_or(DEFAULT_SEED);
        let match_threshold = parse_var("WAYWISE_MATCH_THRESHOLD", get("WAYWISE_MATCH_THRESHOLD"))?
            .unwrap_or(DEFAULT_THRESHOLD);
        if match_threshold > 100 {
            return Err(ConfigError {
                var: "WAYWISE_MATCH_THRESHOLD",
                value: match_threshold.to_string(),
                reason: "must be at most 100".to_string(),
            });
        }

        let addr = match parse_var("WAYWISE_ADDR", get("WAYWISE_ADDR"))? {
            Some(addr) => addr,
            None => DEFAULT_ADDR.parse().map_err(|e: std::net::AddrParseError| ConfigError {
                var: "WAYWISE_ADDR",
                value: DEFAULT_ADDR.to_string(),
                reason: e.to_string(),
            })?,
        };

        let llm = get("WAYWISE_LLM_URL").map(|url| {
            let mut config = IntentConfig::new(url);
            if let Some(model) = get("WAYWISE_LLM_MODEL") {
                config = config.with_model(model);
            }
            if let Some(key) = get("WAYWISE_LLM_API_KEY") {
                config = config.with_api_key(key);
            }
            config
        });

        Ok(Self {
            catalog_path: get("WAYWISE_CATALOG").map(PathBuf::from),
            seed,
            addr,
            llm,
            match_threshold,
        })
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse().map_err(|e: T::Err| ConfigError {
                var,
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
