//! Aggregation of a user's tickets across event contracts.
//!
//! Fans the per-event ticket-ID read out over a caller-supplied address list
//! and flattens the results. Zero-address entries are skipped without
//! erroring the aggregate; duplicates are tolerated and simply appear twice.
//! Per-address failures collapse into a single `has_error` flag — the
//! failing address is not attributed. Refetching is re-invoking the
//! collection method; every constituent read runs again.

use crate::provider::ContractReader;
use crate::reads::EventReader;
use alloy::primitives::{Address, U256};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use ticketchain_contracts::registry::deployed;
use tracing::debug;

/// One ticket in the flattened cross-event view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTicket {
    /// The ticket's token ID.
    pub token_id: U256,
    /// The event contract it belongs to.
    pub event_address: Address,
    /// Whether the ticket has been checked in.
    ///
    /// `false` in the flat view unless usage lookups were requested — the
    /// aggregate read does not fetch usage state on its own.
    pub is_used: bool,
}

/// The flattened cross-event ticket collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketPortfolio {
    /// Tickets in input-address order, then token-ID order within an event.
    pub tickets: Vec<UserTicket>,
    /// True if any constituent read failed. Attribution is intentionally
    /// collapsed; successful events still contribute their tickets.
    pub has_error: bool,
}

impl<R: ContractReader> EventReader<R> {
    /// Collect the connected wallet's tickets across `events`.
    ///
    /// Without a session the portfolio is empty (the reads are all gated
    /// off), mirroring the per-event behavior. `is_used` is left `false`;
    /// use [`Self::portfolio_with_usage`] when usage state is needed.
    pub async fn portfolio(&self, events: &[Address]) -> TicketPortfolio {
        let Some(session) = self.session().copied() else {
            return TicketPortfolio::default();
        };

        let queries = events
            .iter()
            .filter_map(|event| deployed(Some(*event)))
            .map(|event| async move {
                (event, self.reader().user_tickets(event, session.address).await)
            });
        let results = join_all(queries).await;

        let mut portfolio = TicketPortfolio::default();
        for (event_address, result) in results {
            match result {
                Ok(token_ids) => {
                    portfolio
                        .tickets
                        .extend(token_ids.into_iter().map(|token_id| UserTicket {
                            token_id,
                            event_address,
                            is_used: false,
                        }));
                }
                Err(e) => {
                    debug!(event = %event_address, error = %e, "portfolio read failed");
                    portfolio.has_error = true;
                }
            }
        }
        portfolio
    }

    /// Collect the connected wallet's tickets and resolve each ticket's
    /// usage state with a per-ticket lookup.
    ///
    /// A failed usage lookup sets `has_error` and leaves that ticket's
    /// `is_used` as `false`.
    pub async fn portfolio_with_usage(&self, events: &[Address]) -> TicketPortfolio {
        let mut portfolio = self.portfolio(events).await;

        let lookups = portfolio.tickets.iter().map(|ticket| async {
            self.reader()
                .ticket_used(ticket.event_address, ticket.token_id)
                .await
        });
        let usage = join_all(lookups).await;

        for (ticket, used) in portfolio.tickets.iter_mut().zip(usage) {
            match used {
                Ok(is_used) => ticket.is_used = is_used,
                Err(e) => {
                    debug!(event = %ticket.event_address, token = %ticket.token_id, error = %e, "usage lookup failed");
                    portfolio.has_error = true;
                }
            }
        }
        portfolio
    }
}
