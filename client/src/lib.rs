//! # Ticketchain Client
//!
//! Client SDK for the on-chain event-ticketing platform: typed read models
//! over the factory and ticket contracts, lifecycle-tracked writes, and
//! cross-event ticket aggregation.
//!
//! ## Layers
//!
//! - [`provider`]: the two seams to the chain — [`provider::ContractReader`]
//!   for idempotent views, [`provider::TransactionSubmitter`] for writes.
//! - [`reads`]: [`reads::EventReader`] maps raw contract tuples into view
//!   models, gating every read on its required inputs.
//! - [`writes`]: [`writes::TicketWriter`] / [`writes::FactoryWriter`] check
//!   preconditions, submit, and drive the transaction lifecycle.
//! - [`lifecycle`]: the `Idle → Pending → Confirming → Success | Failed`
//!   state machine published over a watch channel.
//! - [`portfolio`]: flattens a user's tickets across event contracts.
//! - [`rpc`]: JSON-RPC implementations of the seams, via the `sol!` bindings.
//!
//! ## Example
//!
//! ```no_run
//! use alloy::primitives::{Address, address};
//! use ticketchain_client::config::ChainConfig;
//! use ticketchain_client::reads::EventReader;
//! use ticketchain_client::rpc::RpcReader;
//! use ticketchain_client::session::WalletSession;
//!
//! # async fn demo(provider: impl alloy::providers::Provider) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChainConfig::from_env();
//! let session = WalletSession::new(
//!     address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
//!     config.chain_id,
//! );
//! let reader = EventReader::new(RpcReader::new(provider))
//!     .with_session(session)
//!     .with_factory(config.resolved_factory());
//!
//! let event: Option<Address> = Some(address!("00000000000000000000000000000000000000A1"));
//! if let Some(details) = reader.event_details(event).await?.into_data() {
//!     println!("{}: {} of {} left", details.name, details.remaining, details.max_supply);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod portfolio;
pub mod provider;
pub mod reads;
pub mod rpc;
pub mod session;
pub mod writes;

pub use config::ChainConfig;
pub use error::{ClientError, PreconditionError, TransportError};
pub use lifecycle::{TxPhase, TxTracker};
pub use portfolio::{TicketPortfolio, UserTicket};
pub use provider::{ContractReader, TransactionSubmitter, WriteRequest};
pub use reads::{EventDescriptor, EventReader, ReadOutcome, TicketOwnershipRecord};
pub use session::WalletSession;
pub use writes::{CreateEventRequest, FactoryWriter, TicketWriter};
