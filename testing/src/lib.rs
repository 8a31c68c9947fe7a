//! # Ticketchain Testing
//!
//! Testing utilities for the ticketing client: a scripted in-memory chain
//! implementing both provider seams, plus small fixture helpers.
//!
//! ## Example
//!
//! ```
//! use alloy::primitives::U256;
//! use ticketchain_client::reads::EventReader;
//! use ticketchain_testing::{MockChain, ScriptedEvent, addr, session};
//!
//! # tokio_test::block_on(async {
//! let chain = MockChain::new();
//! chain.script_event(
//!     addr(0xA1),
//!     ScriptedEvent::named("DevConf", U256::from(1000), 100, 40),
//! );
//!
//! let reader = EventReader::new(chain.clone()).with_session(session(0xBEEF));
//! let details = reader.event_details(Some(addr(0xA1))).await.unwrap();
//! assert_eq!(details.data().unwrap().remaining, 60);
//! # });
//! ```

mod mock_chain;

pub use mock_chain::{MockChain, ScriptedEvent};

use alloy::primitives::{Address, U256};
use ticketchain_client::session::WalletSession;
use ticketchain_contracts::registry::KnownChain;

/// A distinct, non-zero address derived from `seed`.
#[must_use]
pub fn addr(seed: u64) -> Address {
    Address::from_word(U256::from(seed).into())
}

/// A wallet session for `addr(seed)` on Sepolia.
#[must_use]
pub fn session(seed: u64) -> WalletSession {
    WalletSession::new(addr(seed), KnownChain::Sepolia.chain_id())
}

/// A wallet session for `addr(seed)` on an arbitrary chain.
#[must_use]
pub fn session_on(seed: u64, chain_id: u64) -> WalletSession {
    WalletSession::new(addr(seed), chain_id)
}
