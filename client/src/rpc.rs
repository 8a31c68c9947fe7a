//! RPC-backed implementations of the provider seams.
//!
//! [`RpcReader`] issues `eth_call`s through the generated contract bindings;
//! [`RpcSubmitter`] sends transactions and polls for receipts. Signing is
//! the provider's concern — build it with a wallet filler so submissions are
//! signed for the session account.

use crate::error::TransportError;
use crate::provider::{
    ContractReader, RawEventDetails, TransactionSubmitter, TxConfirmation, WriteRequest,
};
use crate::session::WalletSession;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use std::time::Duration;
use ticketchain_contracts::{IEventFactory, IEventTicket};
use tracing::debug;

fn transport(e: impl std::fmt::Display) -> TransportError {
    TransportError::Rpc(e.to_string())
}

/// [`ContractReader`] over a JSON-RPC provider.
#[derive(Debug, Clone)]
pub struct RpcReader<P> {
    provider: P,
}

impl<P: Provider> RpcReader<P> {
    /// Wrap a provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider> ContractReader for RpcReader<P> {
    async fn event_details(&self, event: Address) -> Result<RawEventDetails, TransportError> {
        let contract = IEventTicket::new(event, &self.provider);
        let details = contract.getEventDetails().call().await.map_err(transport)?;
        Ok(RawEventDetails {
            name: details.name,
            description: details.description,
            date: details.date,
            location: details.location,
            price: details.price,
            max_supply: details.maxSupply,
            sold: details.sold,
            remaining: details.remaining,
        })
    }

    async fn ticket_price(&self, event: Address) -> Result<U256, TransportError> {
        IEventTicket::new(event, &self.provider)
            .ticketPrice()
            .call()
            .await
            .map_err(transport)
    }

    async fn tickets_remaining(&self, event: Address) -> Result<U256, TransportError> {
        IEventTicket::new(event, &self.provider)
            .ticketsRemaining()
            .call()
            .await
            .map_err(transport)
    }

    async fn ticket_used(&self, event: Address, token_id: U256) -> Result<bool, TransportError> {
        IEventTicket::new(event, &self.provider)
            .ticketUsed(token_id)
            .call()
            .await
            .map_err(transport)
    }

    async fn owner_of(&self, event: Address, token_id: U256) -> Result<Address, TransportError> {
        IEventTicket::new(event, &self.provider)
            .ownerOf(token_id)
            .call()
            .await
            .map_err(transport)
    }

    async fn token_uri(&self, event: Address, token_id: U256) -> Result<String, TransportError> {
        IEventTicket::new(event, &self.provider)
            .tokenURI(token_id)
            .call()
            .await
            .map_err(transport)
    }

    async fn user_tickets(
        &self,
        event: Address,
        holder: Address,
    ) -> Result<Vec<U256>, TransportError> {
        IEventTicket::new(event, &self.provider)
            .getUserTickets(holder)
            .call()
            .await
            .map_err(transport)
    }

    async fn ticket_balance(
        &self,
        event: Address,
        holder: Address,
    ) -> Result<U256, TransportError> {
        IEventTicket::new(event, &self.provider)
            .balanceOf(holder)
            .call()
            .await
            .map_err(transport)
    }

    async fn event_owner(&self, event: Address) -> Result<Address, TransportError> {
        IEventTicket::new(event, &self.provider)
            .owner()
            .call()
            .await
            .map_err(transport)
    }

    async fn all_events(&self, factory: Address) -> Result<Vec<Address>, TransportError> {
        IEventFactory::new(factory, &self.provider)
            .getAllEvents()
            .call()
            .await
            .map_err(transport)
    }

    async fn organizer_events(
        &self,
        factory: Address,
        organizer: Address,
    ) -> Result<Vec<Address>, TransportError> {
        IEventFactory::new(factory, &self.provider)
            .getOrganizerEvents(organizer)
            .call()
            .await
            .map_err(transport)
    }

    async fn events_paginated(
        &self,
        factory: Address,
        offset: U256,
        limit: U256,
    ) -> Result<Vec<Address>, TransportError> {
        IEventFactory::new(factory, &self.provider)
            .getEventsPaginated(offset, limit)
            .call()
            .await
            .map_err(transport)
    }

    async fn total_events(&self, factory: Address) -> Result<U256, TransportError> {
        IEventFactory::new(factory, &self.provider)
            .totalEvents()
            .call()
            .await
            .map_err(transport)
    }

    async fn is_event_contract(
        &self,
        factory: Address,
        candidate: Address,
    ) -> Result<bool, TransportError> {
        IEventFactory::new(factory, &self.provider)
            .isEventContract(candidate)
            .call()
            .await
            .map_err(transport)
    }

    async fn platform_fee_bps(&self, factory: Address) -> Result<U256, TransportError> {
        IEventFactory::new(factory, &self.provider)
            .platformFeeBps()
            .call()
            .await
            .map_err(transport)
    }

    async fn platform_wallet(&self, factory: Address) -> Result<Address, TransportError> {
        IEventFactory::new(factory, &self.provider)
            .platformWallet()
            .call()
            .await
            .map_err(transport)
    }
}

/// [`TransactionSubmitter`] over a JSON-RPC provider.
///
/// `confirm` polls for the receipt at a fixed interval and never bounds its
/// own waiting; the write layer wraps it in the configured timeout.
#[derive(Debug, Clone)]
pub struct RpcSubmitter<P> {
    provider: P,
    poll_interval: Duration,
}

impl<P: Provider> RpcSubmitter<P> {
    /// Wrap a provider with a receipt poll interval.
    pub const fn new(provider: P, poll_interval: Duration) -> Self {
        Self {
            provider,
            poll_interval,
        }
    }
}

impl<P: Provider> TransactionSubmitter for RpcSubmitter<P> {
    async fn submit(
        &self,
        session: &WalletSession,
        request: WriteRequest,
    ) -> Result<TxHash, TransportError> {
        let from = session.address;
        let pending = match request {
            WriteRequest::MintTicket { event, value } => IEventTicket::new(event, &self.provider)
                .mintTicket()
                .value(value)
                .from(from)
                .send()
                .await
                .map_err(transport)?,
            WriteRequest::MintTickets {
                event,
                quantity,
                value,
            } => IEventTicket::new(event, &self.provider)
                .mintTickets(quantity)
                .value(value)
                .from(from)
                .send()
                .await
                .map_err(transport)?,
            WriteRequest::CreateEvent { factory, args } => {
                IEventFactory::new(factory, &self.provider)
                    .createEvent(
                        args.name,
                        args.symbol,
                        args.event_name,
                        args.event_description,
                        args.event_date,
                        args.event_location,
                        args.ticket_price,
                        args.max_tickets,
                        args.base_token_uri,
                    )
                    .from(from)
                    .send()
                    .await
                    .map_err(transport)?
            }
            WriteRequest::UseTicket { event, token_id } => {
                IEventTicket::new(event, &self.provider)
                    .useTicket(token_id)
                    .from(from)
                    .send()
                    .await
                    .map_err(transport)?
            }
            WriteRequest::Withdraw { event } => IEventTicket::new(event, &self.provider)
                .withdraw()
                .from(from)
                .send()
                .await
                .map_err(transport)?,
            WriteRequest::SetPlatformFee { factory, fee_bps } => {
                IEventFactory::new(factory, &self.provider)
                    .setPlatformFee(fee_bps)
                    .from(from)
                    .send()
                    .await
                    .map_err(transport)?
            }
            WriteRequest::SetPlatformWallet { factory, wallet } => {
                IEventFactory::new(factory, &self.provider)
                    .setPlatformWallet(wallet)
                    .from(from)
                    .send()
                    .await
                    .map_err(transport)?
            }
            WriteRequest::TransferOwnership { factory, new_owner } => {
                IEventFactory::new(factory, &self.provider)
                    .transferOwnership(new_owner)
                    .from(from)
                    .send()
                    .await
                    .map_err(transport)?
            }
        };
        Ok(*pending.tx_hash())
    }

    async fn confirm(&self, hash: TxHash) -> Result<TxConfirmation, TransportError> {
        loop {
            if let Some(receipt) = self
                .provider
                .get_transaction_receipt(hash)
                .await
                .map_err(transport)?
            {
                return Ok(TxConfirmation {
                    block_number: receipt.block_number.unwrap_or_default(),
                    reverted: !receipt.status(),
                });
            }
            debug!(%hash, "receipt not yet available");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
