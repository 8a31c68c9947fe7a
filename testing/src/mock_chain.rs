//! Scripted in-memory chain.
//!
//! [`MockChain`] implements both client seams over shared in-memory state:
//! reads are served from scripted events and a scripted factory, writes are
//! recorded verbatim and confirmed with deterministic hashes. Per-method
//! call counters make "no call was issued" assertions possible, and failure
//! injection covers transport errors, reverts and stalled confirmations.

use alloy::primitives::{Address, B256, TxHash, U256};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use ticketchain_client::error::TransportError;
use ticketchain_client::provider::{
    ContractReader, RawEventDetails, TransactionSubmitter, TxConfirmation, WriteRequest,
};
use ticketchain_client::session::WalletSession;

/// One scripted event contract.
#[derive(Debug, Clone)]
pub struct ScriptedEvent {
    details: RawEventDetails,
    owner: Address,
    tickets: HashMap<Address, Vec<U256>>,
    used: HashSet<U256>,
    owners: HashMap<U256, Address>,
    uris: HashMap<U256, String>,
}

impl ScriptedEvent {
    /// Start scripting an event with the given raw details tuple.
    #[must_use]
    pub fn new(details: RawEventDetails) -> Self {
        Self {
            details,
            owner: Address::ZERO,
            tickets: HashMap::new(),
            used: HashSet::new(),
            owners: HashMap::new(),
            uris: HashMap::new(),
        }
    }

    /// Convenience constructor with typical details.
    #[must_use]
    pub fn named(name: &str, price: U256, max_supply: u64, sold: u64) -> Self {
        Self::new(RawEventDetails {
            name: name.to_string(),
            description: format!("{name} description"),
            date: U256::from(1_760_000_000_u64),
            location: "somewhere".to_string(),
            price,
            max_supply: U256::from(max_supply),
            sold: U256::from(sold),
            remaining: U256::from(max_supply - sold),
        })
    }

    /// Set the organizer address.
    #[must_use]
    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    /// Give `holder` the listed ticket IDs; each becomes owned by `holder`.
    #[must_use]
    pub fn with_tickets(mut self, holder: Address, token_ids: &[u64]) -> Self {
        let ids: Vec<U256> = token_ids.iter().map(|id| U256::from(*id)).collect();
        for id in &ids {
            self.owners.insert(*id, holder);
        }
        self.tickets.insert(holder, ids);
        self
    }

    /// Mark a ticket as checked in.
    #[must_use]
    pub fn with_used(mut self, token_id: u64) -> Self {
        self.used.insert(U256::from(token_id));
        self
    }

    /// Script a metadata URI for a ticket.
    #[must_use]
    pub fn with_uri(mut self, token_id: u64, uri: &str) -> Self {
        self.uris.insert(U256::from(token_id), uri.to_string());
        self
    }

    /// Override the reported remaining supply (to script drift).
    #[must_use]
    pub fn with_reported_remaining(mut self, remaining: u64) -> Self {
        self.details.remaining = U256::from(remaining);
        self
    }
}

#[derive(Debug, Default)]
struct ScriptedFactory {
    all_events: Vec<Address>,
    organizer_events: HashMap<Address, Vec<Address>>,
    fee_bps: U256,
    platform_wallet: Address,
}

#[derive(Debug, Default)]
struct Inner {
    events: HashMap<Address, ScriptedEvent>,
    factory: ScriptedFactory,
    read_calls: HashMap<&'static str, usize>,
    failing_events: HashSet<Address>,
    fail_all_reads: bool,
    submissions: Vec<(WalletSession, WriteRequest)>,
    fail_next_submit: Option<String>,
    revert_next: bool,
    stall_confirmations: bool,
    hashes_issued: u64,
}

/// In-memory chain implementing [`ContractReader`] and
/// [`TransactionSubmitter`].
///
/// Clones share state, so a test can hand one clone to the client and keep
/// another for scripting and assertions.
#[derive(Debug, Clone, Default)]
pub struct MockChain {
    inner: Arc<Mutex<Inner>>,
}

impl MockChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Script an event contract at `address`.
    pub fn script_event(&self, address: Address, event: ScriptedEvent) {
        self.lock().events.insert(address, event);
    }

    /// Script the factory's deployed-event list.
    pub fn script_all_events(&self, events: &[Address]) {
        self.lock().factory.all_events = events.to_vec();
    }

    /// Script one organizer's deployed-event list.
    pub fn script_organizer_events(&self, organizer: Address, events: &[Address]) {
        self.lock()
            .factory
            .organizer_events
            .insert(organizer, events.to_vec());
    }

    /// Script the platform fee configuration.
    pub fn script_platform(&self, fee_bps: u64, wallet: Address) {
        let mut inner = self.lock();
        inner.factory.fee_bps = U256::from(fee_bps);
        inner.factory.platform_wallet = wallet;
    }

    /// Make every read against `event` fail with a transport error.
    pub fn fail_reads_for(&self, event: Address) {
        self.lock().failing_events.insert(event);
    }

    /// Make every read fail with a transport error.
    pub fn fail_all_reads(&self) {
        self.lock().fail_all_reads = true;
    }

    /// Make the next submission fail with `message` before a hash exists.
    pub fn fail_next_submit(&self, message: &str) {
        self.lock().fail_next_submit = Some(message.to_string());
    }

    /// Make the next confirmed transaction report a revert.
    pub fn revert_next(&self) {
        self.lock().revert_next = true;
    }

    /// Make confirmations hang forever (for timeout tests).
    pub fn stall_confirmations(&self) {
        self.lock().stall_confirmations = true;
    }

    /// Number of underlying calls recorded for one reader method.
    #[must_use]
    pub fn read_calls(&self, method: &str) -> usize {
        self.lock().read_calls.get(method).copied().unwrap_or(0)
    }

    /// Total underlying read calls recorded.
    #[must_use]
    pub fn total_read_calls(&self) -> usize {
        self.lock().read_calls.values().sum()
    }

    /// Submitted write requests, in order.
    #[must_use]
    pub fn submissions(&self) -> Vec<WriteRequest> {
        self.lock()
            .submissions
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// Sessions the writes were submitted under, in order.
    #[must_use]
    pub fn submission_sessions(&self) -> Vec<WalletSession> {
        self.lock()
            .submissions
            .iter()
            .map(|(session, _)| *session)
            .collect()
    }

    fn record_read(
        &self,
        method: &'static str,
        event: Option<Address>,
    ) -> Result<MutexGuard<'_, Inner>, TransportError> {
        let mut inner = self.lock();
        *inner.read_calls.entry(method).or_insert(0) += 1;
        if inner.fail_all_reads {
            return Err(TransportError::Rpc(format!("{method}: scripted failure")));
        }
        if let Some(event) = event {
            if inner.failing_events.contains(&event) {
                return Err(TransportError::Rpc(format!(
                    "{method}: scripted failure for {event}"
                )));
            }
        }
        Ok(inner)
    }
}

fn missing(what: &str) -> TransportError {
    TransportError::MissingData(what.to_string())
}

impl ContractReader for MockChain {
    async fn event_details(&self, event: Address) -> Result<RawEventDetails, TransportError> {
        let inner = self.record_read("event_details", Some(event))?;
        inner
            .events
            .get(&event)
            .map(|e| e.details.clone())
            .ok_or_else(|| missing("event not scripted"))
    }

    async fn ticket_price(&self, event: Address) -> Result<U256, TransportError> {
        let inner = self.record_read("ticket_price", Some(event))?;
        inner
            .events
            .get(&event)
            .map(|e| e.details.price)
            .ok_or_else(|| missing("event not scripted"))
    }

    async fn tickets_remaining(&self, event: Address) -> Result<U256, TransportError> {
        let inner = self.record_read("tickets_remaining", Some(event))?;
        inner
            .events
            .get(&event)
            .map(|e| e.details.remaining)
            .ok_or_else(|| missing("event not scripted"))
    }

    async fn ticket_used(&self, event: Address, token_id: U256) -> Result<bool, TransportError> {
        let inner = self.record_read("ticket_used", Some(event))?;
        inner
            .events
            .get(&event)
            .map(|e| e.used.contains(&token_id))
            .ok_or_else(|| missing("event not scripted"))
    }

    async fn owner_of(&self, event: Address, token_id: U256) -> Result<Address, TransportError> {
        let inner = self.record_read("owner_of", Some(event))?;
        inner
            .events
            .get(&event)
            .and_then(|e| e.owners.get(&token_id).copied())
            .ok_or_else(|| missing("token has no owner"))
    }

    async fn token_uri(&self, event: Address, token_id: U256) -> Result<String, TransportError> {
        let inner = self.record_read("token_uri", Some(event))?;
        inner
            .events
            .get(&event)
            .and_then(|e| e.uris.get(&token_id).cloned())
            .ok_or_else(|| missing("token has no uri"))
    }

    async fn user_tickets(
        &self,
        event: Address,
        holder: Address,
    ) -> Result<Vec<U256>, TransportError> {
        let inner = self.record_read("user_tickets", Some(event))?;
        inner
            .events
            .get(&event)
            .map(|e| e.tickets.get(&holder).cloned().unwrap_or_default())
            .ok_or_else(|| missing("event not scripted"))
    }

    async fn ticket_balance(
        &self,
        event: Address,
        holder: Address,
    ) -> Result<U256, TransportError> {
        let inner = self.record_read("ticket_balance", Some(event))?;
        inner
            .events
            .get(&event)
            .map(|e| U256::from(e.tickets.get(&holder).map_or(0, Vec::len)))
            .ok_or_else(|| missing("event not scripted"))
    }

    async fn event_owner(&self, event: Address) -> Result<Address, TransportError> {
        let inner = self.record_read("event_owner", Some(event))?;
        inner
            .events
            .get(&event)
            .map(|e| e.owner)
            .ok_or_else(|| missing("event not scripted"))
    }

    async fn all_events(&self, _factory: Address) -> Result<Vec<Address>, TransportError> {
        let inner = self.record_read("all_events", None)?;
        Ok(inner.factory.all_events.clone())
    }

    async fn organizer_events(
        &self,
        _factory: Address,
        organizer: Address,
    ) -> Result<Vec<Address>, TransportError> {
        let inner = self.record_read("organizer_events", None)?;
        Ok(inner
            .factory
            .organizer_events
            .get(&organizer)
            .cloned()
            .unwrap_or_default())
    }

    async fn events_paginated(
        &self,
        _factory: Address,
        offset: U256,
        limit: U256,
    ) -> Result<Vec<Address>, TransportError> {
        let inner = self.record_read("events_paginated", None)?;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(inner
            .factory
            .all_events
            .iter()
            .skip(offset)
            .take(limit)
            .copied()
            .collect())
    }

    async fn total_events(&self, _factory: Address) -> Result<U256, TransportError> {
        let inner = self.record_read("total_events", None)?;
        Ok(U256::from(inner.factory.all_events.len()))
    }

    async fn is_event_contract(
        &self,
        _factory: Address,
        candidate: Address,
    ) -> Result<bool, TransportError> {
        let inner = self.record_read("is_event_contract", None)?;
        Ok(inner.factory.all_events.contains(&candidate))
    }

    async fn platform_fee_bps(&self, _factory: Address) -> Result<U256, TransportError> {
        let inner = self.record_read("platform_fee_bps", None)?;
        Ok(inner.factory.fee_bps)
    }

    async fn platform_wallet(&self, _factory: Address) -> Result<Address, TransportError> {
        let inner = self.record_read("platform_wallet", None)?;
        Ok(inner.factory.platform_wallet)
    }
}

impl TransactionSubmitter for MockChain {
    async fn submit(
        &self,
        session: &WalletSession,
        request: WriteRequest,
    ) -> Result<TxHash, TransportError> {
        let mut inner = self.lock();
        if let Some(message) = inner.fail_next_submit.take() {
            return Err(TransportError::Rpc(message));
        }
        inner.submissions.push((*session, request));
        inner.hashes_issued += 1;
        Ok(B256::from(U256::from(inner.hashes_issued)))
    }

    async fn confirm(&self, _hash: TxHash) -> Result<TxConfirmation, TransportError> {
        let (stall, reverted, block_number) = {
            let mut inner = self.lock();
            let reverted = inner.revert_next;
            inner.revert_next = false;
            (inner.stall_confirmations, reverted, inner.hashes_issued)
        };
        if stall {
            // Hang forever; writers bound this with their own timeout.
            futures::future::pending::<()>().await;
        }
        Ok(TxConfirmation {
            block_number,
            reverted,
        })
    }
}
