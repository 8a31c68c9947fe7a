//! Read-model behavior over a scripted chain: gating, mapping, idempotence.

use alloy::primitives::{Address, U256};
use ticketchain_client::reads::{EventReader, ReadOutcome};
use ticketchain_contracts::units::parse_amount;
use ticketchain_testing::{MockChain, ScriptedEvent, addr, session};

#[tokio::test]
async fn absent_address_disables_the_read_without_a_call() {
    let chain = MockChain::new();
    let reader = EventReader::new(chain.clone());

    let outcome = reader.event_details(None).await.unwrap();
    assert!(outcome.is_disabled());

    let outcome = reader.ticket_price(Some(Address::ZERO)).await.unwrap();
    assert!(outcome.is_disabled());

    let outcome = reader.tickets_remaining(None).await.unwrap();
    assert!(outcome.is_disabled());

    // Disabled is a designed inactivity state: nothing hit the chain.
    assert_eq!(chain.total_read_calls(), 0);
}

#[tokio::test]
async fn per_ticket_reads_require_a_token_id() {
    let chain = MockChain::new();
    chain.script_event(addr(0xA1), ScriptedEvent::named("gig", U256::from(1), 10, 0));
    let reader = EventReader::new(chain.clone()).with_session(session(0xBEEF));

    assert!(
        reader
            .ticket_used(Some(addr(0xA1)), None)
            .await
            .unwrap()
            .is_disabled()
    );
    assert!(
        reader
            .token_uri(Some(addr(0xA1)), None)
            .await
            .unwrap()
            .is_disabled()
    );
    assert_eq!(chain.total_read_calls(), 0);
}

#[tokio::test]
async fn holder_scoped_reads_require_a_session() {
    let chain = MockChain::new();
    chain.script_event(addr(0xA1), ScriptedEvent::named("gig", U256::from(1), 10, 0));
    let reader = EventReader::new(chain.clone());

    assert!(
        reader
            .user_tickets(Some(addr(0xA1)))
            .await
            .unwrap()
            .is_disabled()
    );
    assert!(
        reader
            .ticket_ownership(Some(addr(0xA1)), Some(U256::from(1)))
            .await
            .unwrap()
            .is_disabled()
    );
    assert_eq!(chain.total_read_calls(), 0);
}

#[tokio::test]
async fn event_details_map_the_full_tuple() {
    let chain = MockChain::new();
    let price = parse_amount("0.05").unwrap();
    chain.script_event(
        addr(0xA1),
        ScriptedEvent::named("DevConf", price, 100, 40).with_owner(addr(0x0E)),
    );
    let reader = EventReader::new(chain.clone());

    let details = reader
        .event_details(Some(addr(0xA1)))
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(details.name, "DevConf");
    assert_eq!(details.price, "0.050000000000000000");
    assert_eq!(details.price_base_units, price);
    assert_eq!(details.max_supply, 100);
    assert_eq!(details.sold, 40);
    assert_eq!(details.remaining, 60);
    assert!(details.starts_at.is_some());
    // remaining matches the contract's own formula here
    assert_eq!(details.remaining, details.max_supply - details.sold);
}

#[tokio::test]
async fn remaining_is_reported_verbatim_not_recomputed() {
    // The contract reports remaining; the read layer must not "fix" it.
    let chain = MockChain::new();
    chain.script_event(
        addr(0xA1),
        ScriptedEvent::named("drifted", U256::from(1), 100, 40).with_reported_remaining(59),
    );
    let reader = EventReader::new(chain.clone());

    let details = reader
        .event_details(Some(addr(0xA1)))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(details.remaining, 59);
}

#[tokio::test]
async fn refetch_is_idempotent_with_unchanged_state() {
    let chain = MockChain::new();
    chain.script_event(
        addr(0xA1),
        ScriptedEvent::named("gig", U256::from(1000), 10, 3),
    );
    let reader = EventReader::new(chain.clone());

    let first = reader.event_details(Some(addr(0xA1))).await.unwrap();
    let second = reader.event_details(Some(addr(0xA1))).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(chain.read_calls("event_details"), 2);
}

#[tokio::test]
async fn transport_failures_surface_as_errors() {
    let chain = MockChain::new();
    chain.script_event(addr(0xA1), ScriptedEvent::named("gig", U256::from(1), 10, 0));
    chain.fail_reads_for(addr(0xA1));
    let reader = EventReader::new(chain.clone());

    assert!(reader.event_details(Some(addr(0xA1))).await.is_err());
    // The failed read is retryable: clear the fault and refetch.
    let fresh = MockChain::new();
    fresh.script_event(addr(0xA1), ScriptedEvent::named("gig", U256::from(1), 10, 0));
    let reader = EventReader::new(fresh);
    assert!(reader.event_details(Some(addr(0xA1))).await.is_ok());
}

#[tokio::test]
async fn ownership_matches_across_address_casing() {
    // Same account, one string lowercase and one EIP-55 checksummed: both
    // parse to the same Address, so ownership matches.
    let holder_lower: Address = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045"
        .parse()
        .unwrap();
    let holder_checksummed: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        .parse()
        .unwrap();
    assert_eq!(holder_lower, holder_checksummed);

    let chain = MockChain::new();
    chain.script_event(
        addr(0xA1),
        ScriptedEvent::named("gig", U256::from(1), 10, 1).with_tickets(holder_lower, &[7]),
    );
    let reader = EventReader::new(chain.clone()).with_session(
        ticketchain_client::session::WalletSession::new(holder_checksummed, 11_155_111),
    );

    let record = reader
        .ticket_ownership(Some(addr(0xA1)), Some(U256::from(7)))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert!(record.is_owner);
    assert_eq!(record.owner, holder_lower);
}

#[tokio::test]
async fn ownership_is_false_for_other_holders() {
    let chain = MockChain::new();
    chain.script_event(
        addr(0xA1),
        ScriptedEvent::named("gig", U256::from(1), 10, 1).with_tickets(addr(0xD00D), &[7]),
    );
    let reader = EventReader::new(chain.clone()).with_session(session(0xBEEF));

    let record = reader
        .ticket_ownership(Some(addr(0xA1)), Some(U256::from(7)))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert!(!record.is_owner);
}

#[tokio::test]
async fn ticket_used_and_uri_reads_resolve() {
    let chain = MockChain::new();
    chain.script_event(
        addr(0xA1),
        ScriptedEvent::named("gig", U256::from(1), 10, 2)
            .with_tickets(addr(0xBEEF), &[1, 2])
            .with_used(1)
            .with_uri(1, "ipfs://ticket/1"),
    );
    let reader = EventReader::new(chain.clone()).with_session(session(0xBEEF));

    assert_eq!(
        reader
            .ticket_used(Some(addr(0xA1)), Some(U256::from(1)))
            .await
            .unwrap(),
        ReadOutcome::Loaded(true)
    );
    assert_eq!(
        reader
            .ticket_used(Some(addr(0xA1)), Some(U256::from(2)))
            .await
            .unwrap(),
        ReadOutcome::Loaded(false)
    );
    assert_eq!(
        reader
            .token_uri(Some(addr(0xA1)), Some(U256::from(1)))
            .await
            .unwrap(),
        ReadOutcome::Loaded("ipfs://ticket/1".to_string())
    );
    assert_eq!(
        reader.user_ticket_balance(Some(addr(0xA1))).await.unwrap(),
        ReadOutcome::Loaded(2)
    );
}

#[tokio::test]
async fn factory_reads_are_disabled_until_a_factory_resolves() {
    let chain = MockChain::new();
    chain.script_all_events(&[addr(0xA1), addr(0xA2)]);

    let unconfigured = EventReader::new(chain.clone());
    assert!(unconfigured.all_events().await.unwrap().is_disabled());
    assert!(unconfigured.total_events().await.unwrap().is_disabled());
    assert!(
        unconfigured
            .organizer_events(Some(addr(0x0E)))
            .await
            .unwrap()
            .is_disabled()
    );
    assert_eq!(chain.total_read_calls(), 0);

    // A zero factory address is "not deployed", same gate.
    let zeroed = EventReader::new(chain.clone()).with_factory(Some(Address::ZERO));
    assert!(zeroed.all_events().await.unwrap().is_disabled());
    assert_eq!(chain.total_read_calls(), 0);

    let configured = EventReader::new(chain.clone()).with_factory(Some(addr(0xFAC)));
    assert_eq!(
        configured.all_events().await.unwrap(),
        ReadOutcome::Loaded(vec![addr(0xA1), addr(0xA2)])
    );
    assert_eq!(
        configured.total_events().await.unwrap(),
        ReadOutcome::Loaded(2)
    );
}

#[tokio::test]
async fn paginated_and_membership_factory_reads() {
    let chain = MockChain::new();
    chain.script_all_events(&[addr(1), addr(2), addr(3), addr(4)]);
    chain.script_organizer_events(addr(0x0E), &[addr(2)]);
    chain.script_platform(250, addr(0xFEE));
    let reader = EventReader::new(chain.clone()).with_factory(Some(addr(0xFAC)));

    assert_eq!(
        reader.events_paginated(1, 2).await.unwrap(),
        ReadOutcome::Loaded(vec![addr(2), addr(3)])
    );
    assert_eq!(
        reader.organizer_events(Some(addr(0x0E))).await.unwrap(),
        ReadOutcome::Loaded(vec![addr(2)])
    );
    assert_eq!(
        reader.is_event_contract(Some(addr(3))).await.unwrap(),
        ReadOutcome::Loaded(true)
    );
    assert_eq!(
        reader.platform_fee_bps().await.unwrap(),
        ReadOutcome::Loaded(250)
    );
    assert_eq!(
        reader.platform_wallet().await.unwrap(),
        ReadOutcome::Loaded(addr(0xFEE))
    );
}
