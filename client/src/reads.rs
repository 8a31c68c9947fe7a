//! Read-model layer: typed view models over raw contract reads.
//!
//! Every read is gated: if a required input is absent (no address, zero
//! address, no wallet session, no token id) the read is *disabled* — it
//! issues no call and yields [`ReadOutcome::Disabled`], which is a designed
//! inactivity state, not an error. Transport failures surface as the `Err`
//! arm; refetching is re-invoking the same method (all reads are idempotent).

use crate::error::TransportError;
use crate::provider::{ContractReader, RawEventDetails};
use crate::session::WalletSession;
use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketchain_contracts::registry::deployed;
use ticketchain_contracts::units::{format_amount, from_unix_seconds};

/// Outcome of a gated read.
///
/// `Disabled` means a required input was absent and no call was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadOutcome<T> {
    /// Required inputs were absent; nothing was fetched.
    Disabled,
    /// The read completed and mapped successfully.
    Loaded(T),
}

impl<T> ReadOutcome<T> {
    /// The loaded value, if any.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Disabled => None,
            Self::Loaded(value) => Some(value),
        }
    }

    /// Consume the outcome, yielding the loaded value if any.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Disabled => None,
            Self::Loaded(value) => Some(value),
        }
    }

    /// Whether the read was gated off.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Map the loaded value, preserving `Disabled`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadOutcome<U> {
        match self {
            Self::Disabled => ReadOutcome::Disabled,
            Self::Loaded(value) => ReadOutcome::Loaded(f(value)),
        }
    }
}

/// Application-level view of one event, mapped from the contract tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// Event name.
    pub name: String,
    /// Event description.
    pub description: String,
    /// Event date, if the on-chain seconds fit a representable timestamp.
    pub starts_at: Option<DateTime<Utc>>,
    /// Venue / location string.
    pub location: String,
    /// Ticket price as a decimal string, for display.
    pub price: String,
    /// Ticket price in base units, for payment math.
    pub price_base_units: U256,
    /// Maximum ticket supply.
    pub max_supply: u64,
    /// Tickets sold.
    pub sold: u64,
    /// Tickets remaining, as reported by the contract.
    ///
    /// Taken verbatim from the contract's report — never recomputed from
    /// `max_supply - sold` here, so the view cannot drift from the source.
    pub remaining: u64,
}

impl From<RawEventDetails> for EventDescriptor {
    fn from(raw: RawEventDetails) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            starts_at: from_unix_seconds(raw.date),
            location: raw.location,
            price: format_amount(raw.price),
            price_base_units: raw.price,
            max_supply: count(raw.max_supply),
            sold: count(raw.sold),
            remaining: count(raw.remaining),
        }
    }
}

/// View of one ticket's ownership relative to the connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketOwnershipRecord {
    /// The ticket's token ID.
    pub token_id: U256,
    /// Current on-chain owner.
    pub owner: Address,
    /// Whether the connected wallet is the owner.
    ///
    /// Derived from `owner` and the session address; `Address` equality is
    /// byte equality, so checksum casing of the original strings is
    /// irrelevant.
    pub is_owner: bool,
}

/// Counts are narrowed to `u64`; a supply beyond that saturates rather than
/// failing the whole read.
fn count(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Read-model façade over a [`ContractReader`].
///
/// Holds the optional wallet session (for holder-scoped reads) and the
/// optional factory address (for registry reads). Both are explicit values,
/// not ambient context.
#[derive(Debug, Clone)]
pub struct EventReader<R> {
    reader: R,
    session: Option<WalletSession>,
    factory: Option<Address>,
}

impl<R: ContractReader> EventReader<R> {
    /// Create a reader with no session and no factory configured.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            session: None,
            factory: None,
        }
    }

    /// Attach a wallet session for holder-scoped reads.
    #[must_use]
    pub const fn with_session(mut self, session: WalletSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Configure the factory address; zero collapses to "not deployed".
    #[must_use]
    pub fn with_factory(mut self, factory: Option<Address>) -> Self {
        self.factory = deployed(factory);
        self
    }

    /// The attached session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&WalletSession> {
        self.session.as_ref()
    }

    /// Access the underlying reader seam.
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Full event details for one ticket contract.
    ///
    /// Disabled when `event` is absent or the zero address.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn event_details(
        &self,
        event: Option<Address>,
    ) -> Result<ReadOutcome<EventDescriptor>, TransportError> {
        let Some(event) = deployed(event) else {
            return Ok(ReadOutcome::Disabled);
        };
        let raw = self.reader.event_details(event).await?;
        Ok(ReadOutcome::Loaded(EventDescriptor::from(raw)))
    }

    /// Ticket price as `(decimal string, base units)`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn ticket_price(
        &self,
        event: Option<Address>,
    ) -> Result<ReadOutcome<(String, U256)>, TransportError> {
        let Some(event) = deployed(event) else {
            return Ok(ReadOutcome::Disabled);
        };
        let base_units = self.reader.ticket_price(event).await?;
        Ok(ReadOutcome::Loaded((format_amount(base_units), base_units)))
    }

    /// Remaining ticket supply.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn tickets_remaining(
        &self,
        event: Option<Address>,
    ) -> Result<ReadOutcome<u64>, TransportError> {
        let Some(event) = deployed(event) else {
            return Ok(ReadOutcome::Disabled);
        };
        let remaining = self.reader.tickets_remaining(event).await?;
        Ok(ReadOutcome::Loaded(count(remaining)))
    }

    /// Whether one ticket has been checked in.
    ///
    /// Requires both a live address and a token ID.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn ticket_used(
        &self,
        event: Option<Address>,
        token_id: Option<U256>,
    ) -> Result<ReadOutcome<bool>, TransportError> {
        let (Some(event), Some(token_id)) = (deployed(event), token_id) else {
            return Ok(ReadOutcome::Disabled);
        };
        let used = self.reader.ticket_used(event, token_id).await?;
        Ok(ReadOutcome::Loaded(used))
    }

    /// Metadata URI for one ticket.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn token_uri(
        &self,
        event: Option<Address>,
        token_id: Option<U256>,
    ) -> Result<ReadOutcome<String>, TransportError> {
        let (Some(event), Some(token_id)) = (deployed(event), token_id) else {
            return Ok(ReadOutcome::Disabled);
        };
        let uri = self.reader.token_uri(event, token_id).await?;
        Ok(ReadOutcome::Loaded(uri))
    }

    /// Ownership of one ticket relative to the connected wallet.
    ///
    /// Requires a live address, a token ID and a session.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn ticket_ownership(
        &self,
        event: Option<Address>,
        token_id: Option<U256>,
    ) -> Result<ReadOutcome<TicketOwnershipRecord>, TransportError> {
        let (Some(event), Some(token_id), Some(session)) =
            (deployed(event), token_id, self.session)
        else {
            return Ok(ReadOutcome::Disabled);
        };
        let owner = self.reader.owner_of(event, token_id).await?;
        Ok(ReadOutcome::Loaded(TicketOwnershipRecord {
            token_id,
            owner,
            is_owner: owner == session.address,
        }))
    }

    /// Ticket IDs the connected wallet holds for one event.
    ///
    /// Requires a live address and a session.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn user_tickets(
        &self,
        event: Option<Address>,
    ) -> Result<ReadOutcome<Vec<U256>>, TransportError> {
        let (Some(event), Some(session)) = (deployed(event), self.session) else {
            return Ok(ReadOutcome::Disabled);
        };
        let ids = self.reader.user_tickets(event, session.address).await?;
        Ok(ReadOutcome::Loaded(ids))
    }

    /// Number of tickets the connected wallet holds for one event.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn user_ticket_balance(
        &self,
        event: Option<Address>,
    ) -> Result<ReadOutcome<u64>, TransportError> {
        let (Some(event), Some(session)) = (deployed(event), self.session) else {
            return Ok(ReadOutcome::Disabled);
        };
        let balance = self.reader.ticket_balance(event, session.address).await?;
        Ok(ReadOutcome::Loaded(count(balance)))
    }

    /// Organizer (owner) of one event contract.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn event_owner(
        &self,
        event: Option<Address>,
    ) -> Result<ReadOutcome<Address>, TransportError> {
        let Some(event) = deployed(event) else {
            return Ok(ReadOutcome::Disabled);
        };
        let owner = self.reader.event_owner(event).await?;
        Ok(ReadOutcome::Loaded(owner))
    }

    /// All events the configured factory has deployed.
    ///
    /// Disabled while no factory is configured for the chain.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn all_events(&self) -> Result<ReadOutcome<Vec<Address>>, TransportError> {
        let Some(factory) = self.factory else {
            return Ok(ReadOutcome::Disabled);
        };
        let events = self.reader.all_events(factory).await?;
        Ok(ReadOutcome::Loaded(events))
    }

    /// Events deployed by one organizer.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn organizer_events(
        &self,
        organizer: Option<Address>,
    ) -> Result<ReadOutcome<Vec<Address>>, TransportError> {
        let (Some(factory), Some(organizer)) = (self.factory, organizer) else {
            return Ok(ReadOutcome::Disabled);
        };
        let events = self.reader.organizer_events(factory, organizer).await?;
        Ok(ReadOutcome::Loaded(events))
    }

    /// One page of deployed events.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn events_paginated(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<ReadOutcome<Vec<Address>>, TransportError> {
        let Some(factory) = self.factory else {
            return Ok(ReadOutcome::Disabled);
        };
        let events = self
            .reader
            .events_paginated(factory, U256::from(offset), U256::from(limit))
            .await?;
        Ok(ReadOutcome::Loaded(events))
    }

    /// Total number of deployed events.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn total_events(&self) -> Result<ReadOutcome<u64>, TransportError> {
        let Some(factory) = self.factory else {
            return Ok(ReadOutcome::Disabled);
        };
        let total = self.reader.total_events(factory).await?;
        Ok(ReadOutcome::Loaded(count(total)))
    }

    /// Whether an address is a factory-deployed event contract.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn is_event_contract(
        &self,
        candidate: Option<Address>,
    ) -> Result<ReadOutcome<bool>, TransportError> {
        let (Some(factory), Some(candidate)) = (self.factory, candidate) else {
            return Ok(ReadOutcome::Disabled);
        };
        let known = self.reader.is_event_contract(factory, candidate).await?;
        Ok(ReadOutcome::Loaded(known))
    }

    /// Platform fee in basis points.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn platform_fee_bps(&self) -> Result<ReadOutcome<u64>, TransportError> {
        let Some(factory) = self.factory else {
            return Ok(ReadOutcome::Disabled);
        };
        let bps = self.reader.platform_fee_bps(factory).await?;
        Ok(ReadOutcome::Loaded(count(bps)))
    }

    /// Platform fee recipient.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying read fails.
    pub async fn platform_wallet(&self) -> Result<ReadOutcome<Address>, TransportError> {
        let Some(factory) = self.factory else {
            return Ok(ReadOutcome::Disabled);
        };
        let wallet = self.reader.platform_wallet(factory).await?;
        Ok(ReadOutcome::Loaded(wallet))
    }
}
