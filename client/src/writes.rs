//! Write layer: state-changing calls with lifecycle tracking.
//!
//! Each writer checks its preconditions synchronously — a violation returns
//! [`PreconditionError`] before anything touches the network and leaves the
//! lifecycle untouched. Once submission is attempted, every outcome
//! (acceptance, revert, transport failure, confirmation timeout) is reported
//! through the writer's [`TxTracker`], and the action resolves `Ok(())` when
//! the lifecycle reaches a terminal phase.

use crate::error::PreconditionError;
use crate::lifecycle::{TxPhase, TxTracker};
use crate::provider::{EncodedCreateEvent, TransactionSubmitter, WriteRequest};
use crate::session::WalletSession;
use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{info, warn};
use ticketchain_contracts::registry::deployed;
use ticketchain_contracts::units::{mint_total, parse_amount, to_unix_seconds};

/// Default bound on confirmation waiting before the lifecycle fails.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(180);

/// Parameters for creating a new event, in caller-facing units.
///
/// String fields pass through to the contract unmodified; length and content
/// validation belong to the caller and ultimately the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    /// NFT collection name.
    pub name: String,
    /// NFT collection symbol.
    pub symbol: String,
    /// Event name.
    pub event_name: String,
    /// Event description.
    pub event_description: String,
    /// Event date; converted to Unix seconds at submission.
    pub event_date: DateTime<Utc>,
    /// Venue / location string.
    pub event_location: String,
    /// Ticket price as a decimal string; converted to base units at submission.
    pub ticket_price: String,
    /// Maximum ticket supply.
    pub max_tickets: u64,
    /// Base URI for ticket metadata.
    pub base_token_uri: String,
}

/// Drive one write through submission and confirmation, reporting through
/// the tracker. Shared by both writers.
async fn execute<S: TransactionSubmitter>(
    submitter: &S,
    tracker: &TxTracker,
    session: WalletSession,
    request: WriteRequest,
    confirmation_timeout: Duration,
) {
    // Last-write-wins: a new action supersedes whatever the tracker held.
    tracker.reset();
    tracker.advance(TxPhase::Pending);

    let hash = match submitter.submit(&session, request).await {
        Ok(hash) => hash,
        Err(e) => {
            warn!(error = %e, "transaction submission failed");
            tracker.advance(TxPhase::Failed {
                message: e.to_string(),
            });
            return;
        }
    };
    info!(%hash, "transaction submitted");
    tracker.advance(TxPhase::Confirming { hash });

    match timeout(confirmation_timeout, submitter.confirm(hash)).await {
        Ok(Ok(confirmation)) if !confirmation.reverted => {
            info!(%hash, block = confirmation.block_number, "transaction confirmed");
            tracker.advance(TxPhase::Success {
                hash,
                block_number: confirmation.block_number,
            });
        }
        Ok(Ok(_)) => {
            warn!(%hash, "transaction reverted");
            tracker.advance(TxPhase::Failed {
                message: "transaction reverted on chain".to_string(),
            });
        }
        Ok(Err(e)) => {
            warn!(%hash, error = %e, "confirmation failed");
            tracker.advance(TxPhase::Failed {
                message: e.to_string(),
            });
        }
        Err(_) => {
            warn!(%hash, timeout = ?confirmation_timeout, "confirmation timed out");
            tracker.advance(TxPhase::Failed {
                message: format!(
                    "confirmation timed out after {}s",
                    confirmation_timeout.as_secs()
                ),
            });
        }
    }
}

/// Writes against one event's ticket contract: minting, check-in, withdrawal.
///
/// One writer tracks at most one transaction at a time; starting another
/// write restarts the lifecycle.
#[derive(Debug)]
pub struct TicketWriter<S> {
    submitter: S,
    session: Option<WalletSession>,
    event: Option<Address>,
    tracker: TxTracker,
    confirmation_timeout: Duration,
}

impl<S: TransactionSubmitter> TicketWriter<S> {
    /// Create a writer for one event contract.
    pub fn new(submitter: S, event: Option<Address>) -> Self {
        Self {
            submitter,
            session: None,
            event: deployed(event),
            tracker: TxTracker::new(),
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Attach the wallet session writes are submitted under.
    #[must_use]
    pub const fn with_session(mut self, session: WalletSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Override the confirmation timeout.
    #[must_use]
    pub const fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Snapshot of the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> TxPhase {
        self.tracker.phase()
    }

    /// Subscribe to lifecycle transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TxPhase> {
        self.tracker.subscribe()
    }

    /// Clear the lifecycle back to idle (does not cancel an in-flight call).
    pub fn reset(&self) {
        self.tracker.reset();
    }

    fn require_target(&self) -> Result<(Address, WalletSession), PreconditionError> {
        let event = self.event.ok_or(PreconditionError::MissingEventAddress)?;
        let session = self.session.ok_or(PreconditionError::NotConnected)?;
        Ok((event, session))
    }

    /// Mint a single ticket, paying `price` (decimal string).
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] for a missing event address, missing
    /// session, or unparseable price; post-submission failures are reported
    /// through the lifecycle instead.
    pub async fn mint_ticket(&self, price: &str) -> Result<(), PreconditionError> {
        let (event, session) = self.require_target()?;
        let value = parse_amount(price)?;
        execute(
            &self.submitter,
            &self.tracker,
            session,
            WriteRequest::MintTicket { event, value },
            self.confirmation_timeout,
        )
        .await;
        Ok(())
    }

    /// Mint `quantity` tickets in one call.
    ///
    /// The attached value is `price × quantity` computed exactly in base
    /// units, never through floating-point accumulation.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] for a missing event address, missing
    /// session, zero quantity, or unparseable price.
    pub async fn mint_tickets(
        &self,
        quantity: u32,
        price_per_ticket: &str,
    ) -> Result<(), PreconditionError> {
        let (event, session) = self.require_target()?;
        let value = mint_total(price_per_ticket, quantity)?;
        execute(
            &self.submitter,
            &self.tracker,
            session,
            WriteRequest::MintTickets {
                event,
                quantity: U256::from(quantity),
                value,
            },
            self.confirmation_timeout,
        )
        .await;
        Ok(())
    }

    /// Check a ticket in (organizer only; enforced by the contract).
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] for a missing event address or session.
    pub async fn use_ticket(&self, token_id: U256) -> Result<(), PreconditionError> {
        let (event, session) = self.require_target()?;
        execute(
            &self.submitter,
            &self.tracker,
            session,
            WriteRequest::UseTicket { event, token_id },
            self.confirmation_timeout,
        )
        .await;
        Ok(())
    }

    /// Withdraw accumulated funds (organizer only; enforced by the contract).
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] for a missing event address or session.
    pub async fn withdraw(&self) -> Result<(), PreconditionError> {
        let (event, session) = self.require_target()?;
        execute(
            &self.submitter,
            &self.tracker,
            session,
            WriteRequest::Withdraw { event },
            self.confirmation_timeout,
        )
        .await;
        Ok(())
    }
}

/// Writes against the factory: event creation and platform administration.
#[derive(Debug)]
pub struct FactoryWriter<S> {
    submitter: S,
    session: Option<WalletSession>,
    factory: Option<Address>,
    tracker: TxTracker,
    confirmation_timeout: Duration,
}

impl<S: TransactionSubmitter> FactoryWriter<S> {
    /// Create a writer for the factory; zero collapses to "not deployed".
    pub fn new(submitter: S, factory: Option<Address>) -> Self {
        Self {
            submitter,
            session: None,
            factory: deployed(factory),
            tracker: TxTracker::new(),
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Attach the wallet session writes are submitted under.
    #[must_use]
    pub const fn with_session(mut self, session: WalletSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Override the confirmation timeout.
    #[must_use]
    pub const fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Snapshot of the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> TxPhase {
        self.tracker.phase()
    }

    /// Subscribe to lifecycle transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TxPhase> {
        self.tracker.subscribe()
    }

    /// Clear the lifecycle back to idle (does not cancel an in-flight call).
    pub fn reset(&self) {
        self.tracker.reset();
    }

    fn require_factory(&self) -> Result<(Address, WalletSession), PreconditionError> {
        let session = self.session.ok_or(PreconditionError::NotConnected)?;
        let factory = self.factory.ok_or(PreconditionError::FactoryNotDeployed)?;
        Ok((factory, session))
    }

    /// Deploy a new event through the factory.
    ///
    /// Converts the date to Unix seconds and the price to base units; all
    /// string fields pass through unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] if no session is attached, the factory
    /// is not deployed, or the price/date cannot be encoded.
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<(), PreconditionError> {
        let (factory, session) = self.require_factory()?;
        let args = EncodedCreateEvent {
            name: request.name,
            symbol: request.symbol,
            event_name: request.event_name,
            event_description: request.event_description,
            event_date: to_unix_seconds(request.event_date)?,
            event_location: request.event_location,
            ticket_price: parse_amount(&request.ticket_price)?,
            max_tickets: U256::from(request.max_tickets),
            base_token_uri: request.base_token_uri,
        };
        execute(
            &self.submitter,
            &self.tracker,
            session,
            WriteRequest::CreateEvent { factory, args },
            self.confirmation_timeout,
        )
        .await;
        Ok(())
    }

    /// Update the platform fee in basis points (platform owner only).
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] if no session is attached or the
    /// factory is not deployed.
    pub async fn set_platform_fee(&self, fee_bps: u64) -> Result<(), PreconditionError> {
        let (factory, session) = self.require_factory()?;
        execute(
            &self.submitter,
            &self.tracker,
            session,
            WriteRequest::SetPlatformFee {
                factory,
                fee_bps: U256::from(fee_bps),
            },
            self.confirmation_timeout,
        )
        .await;
        Ok(())
    }

    /// Update the platform fee wallet (platform owner only).
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] if no session is attached or the
    /// factory is not deployed.
    pub async fn set_platform_wallet(&self, wallet: Address) -> Result<(), PreconditionError> {
        let (factory, session) = self.require_factory()?;
        execute(
            &self.submitter,
            &self.tracker,
            session,
            WriteRequest::SetPlatformWallet { factory, wallet },
            self.confirmation_timeout,
        )
        .await;
        Ok(())
    }

    /// Hand factory ownership to another account (platform owner only).
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] if no session is attached or the
    /// factory is not deployed.
    pub async fn transfer_ownership(&self, new_owner: Address) -> Result<(), PreconditionError> {
        let (factory, session) = self.require_factory()?;
        execute(
            &self.submitter,
            &self.tracker,
            session,
            WriteRequest::TransferOwnership { factory, new_owner },
            self.confirmation_timeout,
        )
        .await;
        Ok(())
    }
}
