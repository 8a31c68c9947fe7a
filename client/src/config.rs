//! Client configuration.
//!
//! Loaded from environment variables with sensible defaults; every field can
//! also be set directly when embedding the client.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use ticketchain_contracts::registry::{KnownChain, deployed, factory_address};

/// Chain and transport configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// EIP-155 chain ID the client targets.
    pub chain_id: u64,
    /// Explicit factory address, overriding the registry entry.
    pub factory_override: Option<Address>,
    /// Bound on confirmation waiting before a write's lifecycle fails.
    pub confirmation_timeout: Duration,
    /// How often the RPC submitter polls for a receipt.
    pub receipt_poll_interval: Duration,
}

impl ChainConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TICKETCHAIN_RPC_URL` | `http://localhost:8545` |
    /// | `TICKETCHAIN_CHAIN_ID` | `11155111` (Sepolia) |
    /// | `TICKETCHAIN_FACTORY_ADDRESS` | unset |
    /// | `TICKETCHAIN_CONFIRMATION_TIMEOUT_SECS` | `180` |
    /// | `TICKETCHAIN_RECEIPT_POLL_MS` | `2000` |
    ///
    /// Unparseable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            rpc_url: env::var("TICKETCHAIN_RPC_URL")
                .unwrap_or_else(|_| "http://localhost:8545".to_string()),
            chain_id: env_parse("TICKETCHAIN_CHAIN_ID", KnownChain::Sepolia.chain_id()),
            factory_override: env::var("TICKETCHAIN_FACTORY_ADDRESS")
                .ok()
                .and_then(|s| Address::from_str(&s).ok()),
            confirmation_timeout: Duration::from_secs(env_parse(
                "TICKETCHAIN_CONFIRMATION_TIMEOUT_SECS",
                180,
            )),
            receipt_poll_interval: Duration::from_millis(env_parse(
                "TICKETCHAIN_RECEIPT_POLL_MS",
                2000,
            )),
        }
    }

    /// The factory address for the configured chain.
    ///
    /// An explicit override wins; otherwise the registry entry for
    /// `chain_id` is used. Zero addresses collapse to `None`.
    #[must_use]
    pub fn resolved_factory(&self) -> Option<Address> {
        deployed(self.factory_override).or_else(|| factory_address(self.chain_id))
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: KnownChain::Sepolia.chain_id(),
            factory_override: None,
            confirmation_timeout: Duration::from_secs(180),
            receipt_poll_interval: Duration::from_millis(2000),
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
