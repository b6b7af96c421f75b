use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub ledger_rpc_url: String,
    pub ledger_rpc_timeout_secs: u64,
    pub probe_timeout_secs: u64,
    /// Unset means every job in a `jobs` query is probed at once
    pub probe_concurrency: Option<usize>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let probe_concurrency = match lookup("PROBE_CONCURRENCY") {
            Some(value) => {
                let limit: usize = value
                    .parse()
                    .context("PROBE_CONCURRENCY must be a positive integer")?;
                anyhow::ensure!(limit > 0, "PROBE_CONCURRENCY must be a positive integer");
                Some(limit)
            }
            None => None,
        };

        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            ledger_rpc_url: lookup("LEDGER_RPC_URL").context("LEDGER_RPC_URL must be set")?,
            ledger_rpc_timeout_secs: lookup("LEDGER_RPC_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("LEDGER_RPC_TIMEOUT_SECS must be a valid number")?,
            probe_timeout_secs: lookup("PROBE_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("PROBE_TIMEOUT_SECS must be a valid number")?,
            probe_concurrency,
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = config_from(&[("LEDGER_RPC_URL", "http://ledger:8545")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.ledger_rpc_url, "http://ledger:8545");
        assert_eq!(config.ledger_rpc_timeout_secs, 30);
        assert_eq!(config.probe_timeout_secs, 10);
        assert_eq!(config.probe_concurrency, None);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn ledger_url_is_required() {
        assert!(config_from(&[]).is_err());
    }

    #[test]
    fn parses_overrides() {
        let config = config_from(&[
            ("LEDGER_RPC_URL", "http://ledger:8545"),
            ("PORT", "9000"),
            ("PROBE_CONCURRENCY", "16"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.probe_concurrency, Some(16));
        assert_eq!(
            config.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let result = config_from(&[
            ("LEDGER_RPC_URL", "http://ledger:8545"),
            ("PROBE_CONCURRENCY", "0"),
        ]);
        assert!(result.is_err());
    }
}
