//! Wallet session context.
//!
//! The connected wallet identity and active chain are an explicit value
//! threaded into every read and write that needs them, not ambient globals.
//! The client only ever reads a session; connecting and switching chains
//! belong to whatever produces it.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use ticketchain_contracts::registry::KnownChain;

/// The connected wallet identity and the chain it is operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// The connected account address.
    pub address: Address,
    /// EIP-155 chain ID of the active network.
    pub chain_id: u64,
}

impl WalletSession {
    /// Create a session for a connected account on a chain.
    #[must_use]
    pub const fn new(address: Address, chain_id: u64) -> Self {
        Self { address, chain_id }
    }

    /// The active network, if it is one the platform recognizes.
    #[must_use]
    pub const fn known_chain(&self) -> Option<KnownChain> {
        KnownChain::from_chain_id(self.chain_id)
    }
}
