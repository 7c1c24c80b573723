use std::time::Duration;

use crate::errors::ConfigError;
use crate::states::ObjectId;

pub const TESTNET_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";
pub const CLOCK_OBJECT_ID: &str = "0x6";

pub const MARKET_MODULE: &str = "market";
pub const MARKET_STRUCT: &str = "VotingMarket";

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 10;

pub const VOTE_GAS_BUDGET: u64 = 100_000_000;

pub const POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
pub const CREATION_GRACE: Duration = Duration::from_secs(2);
pub const FINALITY_TIMEOUT: Duration = Duration::from_secs(60);
pub const FINALITY_POLL: Duration = Duration::from_secs(1);

pub const ENV_PACKAGE_ID: &str = "POLYSUI_PACKAGE_ID";
pub const ENV_RPC_URL: &str = "POLYSUI_RPC_URL";
pub const ENV_POLL_SECS: &str = "POLYSUI_POLL_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub package_id: ObjectId,
    pub clock_id: String,
    pub vote_gas_budget: u64,
    pub poll_interval: Duration,
    pub notification_ttl: Duration,
    pub creation_grace: Duration,
    pub finality_timeout: Duration,
    pub finality_poll: Duration,
}

impl NetworkConfig {
    pub fn testnet(package_id: ObjectId) -> Self {
        Self {
            rpc_url: TESTNET_RPC_URL.to_string(),
            package_id,
            clock_id: CLOCK_OBJECT_ID.to_string(),
            vote_gas_budget: VOTE_GAS_BUDGET,
            poll_interval: POLL_INTERVAL,
            notification_ttl: NOTIFICATION_TTL,
            creation_grace: CREATION_GRACE,
            finality_timeout: FINALITY_TIMEOUT,
            finality_poll: FINALITY_POLL,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_package = lookup(ENV_PACKAGE_ID).ok_or(ConfigError::Missing(ENV_PACKAGE_ID))?;
        let package_id = ObjectId::parse(raw_package.trim()).map_err(|_| ConfigError::Invalid {
            key: ENV_PACKAGE_ID,
            value: raw_package.clone(),
        })?;

        let mut cfg = Self::testnet(package_id);
        if let Some(url) = lookup(ENV_RPC_URL).filter(|url| !url.trim().is_empty()) {
            cfg.rpc_url = url.trim().to_string();
        }
        if let Some(secs) = lookup(ENV_POLL_SECS) {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: ENV_POLL_SECS,
                    value: secs.clone(),
                })?;
            cfg.poll_interval = Duration::from_secs(parsed);
        }
        Ok(cfg)
    }

    /// Fully qualified Move type of a market object.
    pub fn market_type(&self) -> String {
        format!("{}::{MARKET_MODULE}::{MARKET_STRUCT}", self.package_id)
    }

    pub fn target(&self, function: &str) -> String {
        format!("{}::{MARKET_MODULE}::{function}", self.package_id)
    }
}
