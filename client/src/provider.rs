//! Provider seams between the client and the chain.
//!
//! Two traits split the boundary the way the contracts split it:
//! [`ContractReader`] for idempotent view calls and [`TransactionSubmitter`]
//! for state-changing submissions plus confirmation tracking. The RPC
//! implementations live in [`crate::rpc`]; the testing crate provides a
//! scripted in-memory chain behind the same seams.

use crate::error::TransportError;
use crate::session::WalletSession;
use alloy::primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};

/// Raw `getEventDetails` tuple, field for field as the contract returns it.
///
/// Mapping into the application-level view model happens in
/// [`crate::reads::EventReader`]; this struct stays at contract width
/// (`U256`) so nothing is narrowed before the read layer decides how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEventDetails {
    /// Event name.
    pub name: String,
    /// Event description.
    pub description: String,
    /// Event date as Unix seconds.
    pub date: U256,
    /// Venue / location string.
    pub location: String,
    /// Ticket price in base units.
    pub price: U256,
    /// Maximum ticket supply.
    pub max_supply: U256,
    /// Tickets sold so far.
    pub sold: U256,
    /// Tickets remaining, as reported by the contract.
    pub remaining: U256,
}

/// Confirmation data for a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxConfirmation {
    /// Block the transaction was mined in.
    pub block_number: u64,
    /// Whether the transaction reverted on chain.
    pub reverted: bool,
}

/// Arguments for `createEvent`, already encoded to contract width.
///
/// Date and price conversion happen in the writer before this struct is
/// built; string fields pass through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCreateEvent {
    /// NFT collection name.
    pub name: String,
    /// NFT collection symbol.
    pub symbol: String,
    /// Event name.
    pub event_name: String,
    /// Event description.
    pub event_description: String,
    /// Event date as Unix seconds.
    pub event_date: U256,
    /// Venue / location string.
    pub event_location: String,
    /// Ticket price in base units.
    pub ticket_price: U256,
    /// Maximum ticket supply.
    pub max_tickets: U256,
    /// Base URI for ticket metadata.
    pub base_token_uri: String,
}

/// A state-changing call, ready for submission.
///
/// This is the unit the [`TransactionSubmitter`] seam accepts: the RPC
/// implementation encodes each variant through the contract bindings, and
/// the mock chain records them verbatim for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequest {
    /// Mint one ticket, paying `value` base units.
    MintTicket {
        /// Target event contract.
        event: Address,
        /// Attached payment.
        value: U256,
    },
    /// Mint `quantity` tickets in one call, paying `value` base units total.
    MintTickets {
        /// Target event contract.
        event: Address,
        /// Number of tickets.
        quantity: U256,
        /// Attached payment for the whole batch.
        value: U256,
    },
    /// Deploy a new event through the factory.
    CreateEvent {
        /// Factory contract.
        factory: Address,
        /// Encoded constructor arguments.
        args: EncodedCreateEvent,
    },
    /// Check a ticket in (organizer only).
    UseTicket {
        /// Target event contract.
        event: Address,
        /// Ticket to mark used.
        token_id: U256,
    },
    /// Withdraw accumulated funds (organizer only).
    Withdraw {
        /// Target event contract.
        event: Address,
    },
    /// Update the platform fee in basis points (platform owner only).
    SetPlatformFee {
        /// Factory contract.
        factory: Address,
        /// New fee in basis points.
        fee_bps: U256,
    },
    /// Update the platform fee wallet (platform owner only).
    SetPlatformWallet {
        /// Factory contract.
        factory: Address,
        /// New fee recipient.
        wallet: Address,
    },
    /// Hand factory ownership to another account (platform owner only).
    TransferOwnership {
        /// Factory contract.
        factory: Address,
        /// New owner.
        new_owner: Address,
    },
}

/// Idempotent view calls against the factory and ticket contracts.
///
/// Every method maps one contract function; all are safely repeatable and
/// return raw contract-width values. Gating (absent address, missing
/// session) happens above this seam, so implementations may assume their
/// inputs are live contracts.
pub trait ContractReader: Send + Sync {
    /// Read the full event-details tuple from a ticket contract.
    fn event_details(
        &self,
        event: Address,
    ) -> impl Future<Output = Result<RawEventDetails, TransportError>> + Send;

    /// Read the ticket price in base units.
    fn ticket_price(
        &self,
        event: Address,
    ) -> impl Future<Output = Result<U256, TransportError>> + Send;

    /// Read the remaining ticket supply.
    fn tickets_remaining(
        &self,
        event: Address,
    ) -> impl Future<Output = Result<U256, TransportError>> + Send;

    /// Whether a ticket has been checked in.
    fn ticket_used(
        &self,
        event: Address,
        token_id: U256,
    ) -> impl Future<Output = Result<bool, TransportError>> + Send;

    /// Current owner of a ticket.
    fn owner_of(
        &self,
        event: Address,
        token_id: U256,
    ) -> impl Future<Output = Result<Address, TransportError>> + Send;

    /// Metadata URI for a ticket.
    fn token_uri(
        &self,
        event: Address,
        token_id: U256,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// Ticket IDs held by an account for one event.
    fn user_tickets(
        &self,
        event: Address,
        holder: Address,
    ) -> impl Future<Output = Result<Vec<U256>, TransportError>> + Send;

    /// Number of tickets held by an account for one event.
    fn ticket_balance(
        &self,
        event: Address,
        holder: Address,
    ) -> impl Future<Output = Result<U256, TransportError>> + Send;

    /// Organizer (owner) of an event contract.
    fn event_owner(
        &self,
        event: Address,
    ) -> impl Future<Output = Result<Address, TransportError>> + Send;

    /// All event contracts the factory has deployed.
    fn all_events(
        &self,
        factory: Address,
    ) -> impl Future<Output = Result<Vec<Address>, TransportError>> + Send;

    /// Event contracts deployed by one organizer.
    fn organizer_events(
        &self,
        factory: Address,
        organizer: Address,
    ) -> impl Future<Output = Result<Vec<Address>, TransportError>> + Send;

    /// A page of event contracts, `offset`-based.
    fn events_paginated(
        &self,
        factory: Address,
        offset: U256,
        limit: U256,
    ) -> impl Future<Output = Result<Vec<Address>, TransportError>> + Send;

    /// Total number of events the factory has deployed.
    fn total_events(
        &self,
        factory: Address,
    ) -> impl Future<Output = Result<U256, TransportError>> + Send;

    /// Whether an address is a factory-deployed event contract.
    fn is_event_contract(
        &self,
        factory: Address,
        candidate: Address,
    ) -> impl Future<Output = Result<bool, TransportError>> + Send;

    /// Platform fee in basis points.
    fn platform_fee_bps(
        &self,
        factory: Address,
    ) -> impl Future<Output = Result<U256, TransportError>> + Send;

    /// Platform fee recipient.
    fn platform_wallet(
        &self,
        factory: Address,
    ) -> impl Future<Output = Result<Address, TransportError>> + Send;
}

/// Submission and confirmation of state-changing calls.
///
/// `submit` hands the request to the wallet/transport and resolves with the
/// transaction hash once it is accepted into the mempool. `confirm` resolves
/// once the transaction is mined. Neither bounds its own waiting time; the
/// write layer wraps `confirm` in an explicit timeout.
pub trait TransactionSubmitter: Send + Sync {
    /// Submit a write on behalf of the session's account.
    fn submit(
        &self,
        session: &WalletSession,
        request: WriteRequest,
    ) -> impl Future<Output = Result<TxHash, TransportError>> + Send;

    /// Wait for the transaction to be mined and report the outcome.
    fn confirm(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = Result<TxConfirmation, TransportError>> + Send;
}
