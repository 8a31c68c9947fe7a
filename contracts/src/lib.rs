//! # Ticketchain Contracts
//!
//! Contract interface layer for the on-chain event-ticketing platform.
//!
//! This crate names the boundary between the client SDK and the chain:
//!
//! - [`bindings`]: `sol!`-generated schemas for the two consumed contracts —
//!   the event **factory** (deploys and indexes per-event ticket contracts)
//!   and the per-event **ticket** contract (minting, usage, funds).
//! - [`registry`]: the chain-ID → factory-address table for the networks the
//!   platform is deployed on.
//! - [`units`]: conversions between human decimal amounts and on-chain base
//!   units, and between calendar dates and Unix seconds.
//!
//! No I/O happens here; everything is pure data and pure functions.

pub mod bindings;
pub mod registry;
pub mod units;

pub use bindings::{IEventFactory, IEventTicket};
pub use registry::{KnownChain, deployed, factory_address};
pub use units::{UnitError, format_amount, mint_total, parse_amount};
