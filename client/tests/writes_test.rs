//! Write preconditions, submission payloads and lifecycle outcomes.

use alloy::primitives::U256;
use chrono::DateTime;
use std::time::Duration;
use ticketchain_client::error::PreconditionError;
use ticketchain_client::lifecycle::TxPhase;
use ticketchain_client::provider::WriteRequest;
use ticketchain_client::writes::{CreateEventRequest, FactoryWriter, TicketWriter};
use ticketchain_contracts::units::parse_amount;
use ticketchain_testing::{MockChain, addr, session};

fn create_request() -> CreateEventRequest {
    CreateEventRequest {
        name: "DevConf Tickets".to_string(),
        symbol: "DEVC".to_string(),
        event_name: "DevConf".to_string(),
        event_description: "a conference".to_string(),
        event_date: DateTime::from_timestamp(1_760_000_000, 0).unwrap(),
        event_location: "Lisbon".to_string(),
        ticket_price: "0.1".to_string(),
        max_tickets: 500,
        base_token_uri: "ipfs://devconf/".to_string(),
    }
}

#[tokio::test]
async fn precondition_failures_never_reach_the_network() {
    let chain = MockChain::new();

    // Missing event address.
    let writer = TicketWriter::new(chain.clone(), None).with_session(session(0xBEEF));
    assert!(matches!(
        writer.mint_ticket("0.05").await,
        Err(PreconditionError::MissingEventAddress)
    ));

    // Missing session.
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1)));
    assert!(matches!(
        writer.mint_ticket("0.05").await,
        Err(PreconditionError::NotConnected)
    ));

    // Malformed price.
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1))).with_session(session(0xBEEF));
    assert!(matches!(
        writer.mint_ticket("not-a-number").await,
        Err(PreconditionError::InvalidInput(_))
    ));

    // Zero quantity.
    assert!(matches!(
        writer.mint_tickets(0, "0.05").await,
        Err(PreconditionError::InvalidInput(_))
    ));

    assert!(chain.submissions().is_empty());
    // And the lifecycle was never touched.
    assert_eq!(writer.phase(), TxPhase::Idle);
}

#[tokio::test]
async fn mint_ticket_submits_the_parsed_value() {
    let chain = MockChain::new();
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1))).with_session(session(0xBEEF));

    writer.mint_ticket("0.05").await.unwrap();

    assert_eq!(
        chain.submissions(),
        vec![WriteRequest::MintTicket {
            event: addr(0xA1),
            value: parse_amount("0.05").unwrap(),
        }]
    );
    assert_eq!(chain.submission_sessions(), vec![session(0xBEEF)]);
    assert!(matches!(writer.phase(), TxPhase::Success { .. }));
}

#[tokio::test]
async fn multi_mint_value_is_exact() {
    let chain = MockChain::new();
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1))).with_session(session(0xBEEF));

    writer.mint_tickets(3, "0.05").await.unwrap();

    // 3 × 0.05 equals exactly the base-unit encoding of 0.15.
    assert_eq!(
        chain.submissions(),
        vec![WriteRequest::MintTickets {
            event: addr(0xA1),
            quantity: U256::from(3),
            value: parse_amount("0.15").unwrap(),
        }]
    );
}

#[tokio::test]
async fn create_event_converts_date_and_price() {
    let chain = MockChain::new();
    let writer = FactoryWriter::new(chain.clone(), Some(addr(0xFAC))).with_session(session(0x0E));

    writer.create_event(create_request()).await.unwrap();

    let submissions = chain.submissions();
    let WriteRequest::CreateEvent { factory, args } = &submissions[0] else {
        panic!("expected CreateEvent, got {submissions:?}");
    };
    assert_eq!(*factory, addr(0xFAC));
    assert_eq!(args.event_date, U256::from(1_760_000_000_u64));
    assert_eq!(args.ticket_price, parse_amount("0.1").unwrap());
    assert_eq!(args.max_tickets, U256::from(500));
    // Strings pass through unmodified.
    assert_eq!(args.event_name, "DevConf");
    assert_eq!(args.base_token_uri, "ipfs://devconf/");
}

#[tokio::test]
async fn create_event_requires_a_deployed_factory() {
    let chain = MockChain::new();

    let writer = FactoryWriter::new(chain.clone(), None).with_session(session(0x0E));
    assert!(matches!(
        writer.create_event(create_request()).await,
        Err(PreconditionError::FactoryNotDeployed)
    ));

    let writer =
        FactoryWriter::new(chain.clone(), Some(alloy::primitives::Address::ZERO))
            .with_session(session(0x0E));
    assert!(matches!(
        writer.create_event(create_request()).await,
        Err(PreconditionError::FactoryNotDeployed)
    ));

    assert!(chain.submissions().is_empty());
}

#[tokio::test]
async fn submission_failure_lands_in_the_lifecycle() {
    let chain = MockChain::new();
    chain.fail_next_submit("rejected in wallet");
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1))).with_session(session(0xBEEF));

    // Post-submission failures do not error the action itself.
    writer.mint_ticket("0.05").await.unwrap();

    let phase = writer.phase();
    assert!(phase.error().unwrap().contains("rejected in wallet"));
    assert_eq!(phase.hash(), None);
}

#[tokio::test]
async fn revert_lands_in_the_lifecycle() {
    let chain = MockChain::new();
    chain.revert_next();
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1))).with_session(session(0xBEEF));

    writer.use_ticket(U256::from(7)).await.unwrap();

    assert!(writer.phase().error().unwrap().contains("reverted"));
    assert_eq!(
        chain.submissions(),
        vec![WriteRequest::UseTicket {
            event: addr(0xA1),
            token_id: U256::from(7),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn confirmation_timeout_fails_the_lifecycle() {
    let chain = MockChain::new();
    chain.stall_confirmations();
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1)))
        .with_session(session(0xBEEF))
        .with_confirmation_timeout(Duration::from_secs(5));

    writer.withdraw().await.unwrap();

    assert!(writer.phase().error().unwrap().contains("timed out"));
}

#[tokio::test]
async fn lifecycle_phases_only_move_forward() {
    let chain = MockChain::new();
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1))).with_session(session(0xBEEF));
    let mut rx = writer.subscribe();

    writer.mint_ticket("0.05").await.unwrap();

    // Collect whatever the watch retained plus the terminal phase; ranks of
    // observed phases never decrease.
    let mut observed = vec![rx.borrow_and_update().clone()];
    while rx.has_changed().unwrap_or(false) {
        observed.push(rx.borrow_and_update().clone());
    }
    let rank = |p: &TxPhase| match p {
        TxPhase::Idle => 0,
        TxPhase::Pending => 1,
        TxPhase::Confirming { .. } => 2,
        TxPhase::Success { .. } | TxPhase::Failed { .. } => 3,
    };
    for pair in observed.windows(2) {
        assert!(rank(&pair[0]) <= rank(&pair[1]));
    }
    assert!(matches!(writer.phase(), TxPhase::Success { .. }));
    assert!(writer.phase().hash().is_some());
}

#[tokio::test]
async fn reset_clears_a_failed_lifecycle_for_retry() {
    let chain = MockChain::new();
    chain.fail_next_submit("nope");
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1))).with_session(session(0xBEEF));

    writer.mint_ticket("0.05").await.unwrap();
    assert!(writer.phase().error().is_some());

    writer.reset();
    assert_eq!(writer.phase(), TxPhase::Idle);

    // Retry succeeds once the fault is gone.
    writer.mint_ticket("0.05").await.unwrap();
    assert!(matches!(writer.phase(), TxPhase::Success { .. }));
}

#[tokio::test]
async fn a_new_write_supersedes_the_previous_lifecycle() {
    let chain = MockChain::new();
    let writer = TicketWriter::new(chain.clone(), Some(addr(0xA1))).with_session(session(0xBEEF));

    writer.mint_ticket("0.05").await.unwrap();
    let first = writer.phase();
    writer.mint_ticket("0.05").await.unwrap();
    let second = writer.phase();

    // Both completed, each with its own hash (last-write-wins tracking).
    assert!(first.is_terminal() && second.is_terminal());
    assert_ne!(first.hash(), second.hash());
    assert_eq!(chain.submissions().len(), 2);
}

#[tokio::test]
async fn factory_admin_writes_submit_their_requests() {
    let chain = MockChain::new();
    let writer = FactoryWriter::new(chain.clone(), Some(addr(0xFAC))).with_session(session(0x0E));

    writer.set_platform_fee(250).await.unwrap();
    writer.set_platform_wallet(addr(0xFEE)).await.unwrap();
    writer.transfer_ownership(addr(0xB055)).await.unwrap();

    assert_eq!(
        chain.submissions(),
        vec![
            WriteRequest::SetPlatformFee {
                factory: addr(0xFAC),
                fee_bps: U256::from(250),
            },
            WriteRequest::SetPlatformWallet {
                factory: addr(0xFAC),
                wallet: addr(0xFEE),
            },
            WriteRequest::TransferOwnership {
                factory: addr(0xFAC),
                new_owner: addr(0xB055),
            },
        ]
    );
}
