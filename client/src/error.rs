//! Error types for the ticketing client.
//!
//! Three families, matching how failures are routed:
//!
//! - [`PreconditionError`]: caller-correctable, returned before any network
//!   call is attempted (missing address, no wallet session, bad input).
//! - [`TransportError`]: the underlying read or submission failed; reads are
//!   safe to retry by re-invoking them.
//! - Transaction failures after submission are not errors at the call site —
//!   they land in the write lifecycle's `Failed` phase (see
//!   [`crate::lifecycle::TxPhase`]).

use thiserror::Error;
use ticketchain_contracts::UnitError;

/// Caller-correctable violations detected before any submission is attempted.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// The target event contract address is missing or the zero address.
    #[error("event contract address is not set")]
    MissingEventAddress,

    /// No wallet session (connected address + chain) was provided.
    #[error("wallet not connected")]
    NotConnected,

    /// No factory contract is deployed for the session's chain.
    #[error("factory contract not deployed on this chain")]
    FactoryNotDeployed,

    /// Amount or quantity input failed unit conversion.
    #[error(transparent)]
    InvalidInput(#[from] UnitError),
}

/// Failures from the underlying chain transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The RPC call itself failed (network, node, revert during `eth_call`).
    #[error("rpc call failed: {0}")]
    Rpc(String),

    /// The response could not be decoded into the expected shape.
    #[error("response decoding failed: {0}")]
    Decode(String),

    /// The transport returned no data where some was required.
    #[error("missing data: {0}")]
    MissingData(String),
}

/// Umbrella error for callers that do not care about the family.
#[derive(Debug, Error)]
pub enum ClientError {
    /// See [`PreconditionError`].
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// See [`TransportError`].
    #[error(transparent)]
    Transport(#[from] TransportError),
}
