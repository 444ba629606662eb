// GroupSwap — Desk Configuration
// Defaults, TOML loading, and per-network endpoint resolution for DeskConfig.

use log::{info, warn};
use std::path::Path;

use crate::atoms::constants::{
    ALGOD_MAINNET_URL, ALGOD_TESTNET_URL, CATALOG_MAINNET_URL, CATALOG_TESTNET_URL, CONFIRMATION_ROUNDS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::types::{DeskConfig, Network};

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            network: Network::default(),
            algod_url: None,
            algod_token: None,
            catalog_url: None,
            confirmation_rounds: CONFIRMATION_ROUNDS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl DeskConfig {
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: DeskConfig = toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> EngineResult<Self> {
        if !path.exists() {
            warn!("[desk] No config at {}, using defaults", path.display());
            return Ok(DeskConfig::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!("[desk] Loaded config from {} ({:?})", path.display(), config.network);
        Ok(config)
    }

    fn check(&self) -> EngineResult<()> {
        if self.confirmation_rounds == 0 {
            return Err(EngineError::Config("confirmation_rounds must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(EngineError::Config("request_timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn algod_url(&self) -> String {
        match (&self.algod_url, self.network) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Network::MainNet) => ALGOD_MAINNET_URL.to_string(),
            (None, Network::TestNet) => ALGOD_TESTNET_URL.to_string(),
        }
    }

    pub fn catalog_url(&self) -> String {
        match (&self.catalog_url, self.network) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Network::MainNet) => CATALOG_MAINNET_URL.to_string(),
            (None, Network::TestNet) => CATALOG_TESTNET_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeskConfig::default();
        assert_eq!(config.network, Network::TestNet);
        assert_eq!(config.confirmation_rounds, 4);
        assert_eq!(config.algod_url(), "https://testnet-api.algonode.cloud");
        assert_eq!(config.catalog_url(), "https://testnet.api.perawallet.app/v1/public");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = DeskConfig::from_toml_str("network = \"mainnet\"\n").unwrap();
        assert_eq!(config.network, Network::MainNet);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.algod_url(), "https://mainnet-api.algonode.cloud");
    }

    #[test]
    fn test_url_override_wins() {
        let config = DeskConfig::from_toml_str(
            "network = \"mainnet\"\nalgod_url = \"http://localhost:4001/\"\nalgod_token = \"aaaa\"\n",
        )
        .unwrap();
        assert_eq!(config.algod_url(), "http://localhost:4001");
        assert_eq!(config.algod_token.as_deref(), Some("aaaa"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(DeskConfig::from_toml_str("network = \"betanet\""), Err(EngineError::Config(_))));
        assert!(matches!(DeskConfig::from_toml_str("confirmation_rounds = 0"), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("groupswap-no-such-config.toml");
        assert_eq!(DeskConfig::load(&path).unwrap(), DeskConfig::default());
    }
}
