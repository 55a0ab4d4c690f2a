use crate::errors::Error;
use crate::test::setup_test;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address};

#[test]
fn test_create_bet_escrow_without_recipient() {
    let ctx = setup_test();
    let creator = ctx.funded_address(1_000);
    let d1 = ctx.funded_address(1_000);
    let d2 = ctx.funded_address(1_000);

    let id = ctx.create_bet_escrow(
        &creator,
        200,
        86_400,
        10,
        vec![&ctx.env, d1.clone(), d2.clone()],
    );

    let parties = ctx.client.get_addresses(&id);
    assert_eq!(parties.recipient, None);

    assert!(ctx.client.if_depositor(&id, &d1));
    assert!(ctx.client.if_depositor(&id, &d2));
    assert_eq!(ctx.client.get_total_depositors(&id), 2);

    // Bets settle in the native asset.
    assert_eq!(ctx.native.balance(&ctx.client.address), 10);
    assert_eq!(ctx.token.balance(&ctx.client.address), 0);
}

#[test]
fn test_set_recipient_requires_registered_depositor() {
    let ctx = setup_test();
    let creator = ctx.funded_address(1_000);
    let d1 = ctx.funded_address(1_000);
    let d2 = ctx.funded_address(1_000);
    let stranger = Address::generate(&ctx.env);

    let id = ctx.create_bet_escrow(
        &creator,
        200,
        86_400,
        10,
        vec![&ctx.env, d1.clone(), d2],
    );

    let result = ctx.client.try_set_recipient(&ctx.mediator, &id, &stranger);
    assert_eq!(result, Err(Ok(Error::InvalidRecipient)));

    // Membership is what counts; d1 has not deposited yet.
    ctx.client.set_recipient(&ctx.mediator, &id, &d1);
    assert_eq!(ctx.client.get_addresses(&id).recipient, Some(d1));
}

#[test]
fn test_set_recipient_only_on_native_escrows() {
    let ctx = setup_test();
    let creator = ctx.funded_address(1_000);
    let recipient = Address::generate(&ctx.env);
    let depositor = ctx.funded_address(1_000);

    let id = ctx.create_token_escrow(&creator, &recipient, 500, 86_400, 5);
    let result = ctx.client.try_set_recipient(&ctx.mediator, &id, &depositor);
    assert_eq!(result, Err(Ok(Error::NotBetEscrow)));
}

#[test]
fn test_set_recipient_only_mediator() {
    let ctx = setup_test();
    let creator = ctx.funded_address(1_000);
    let d1 = ctx.funded_address(1_000);

    let id = ctx.create_bet_escrow(&creator, 200, 86_400, 10, vec![&ctx.env, d1.clone()]);
    let result = ctx.client.try_set_recipient(&creator, &id, &d1);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_bet_full_flow() {
    let ctx = setup_test();
    let creator = ctx.funded_address(1_000);
    let d1 = ctx.funded_address(1_000);
    let d2 = ctx.funded_address(1_000);

    let id = ctx.create_bet_escrow(
        &creator,
        200,
        86_400,
        10,
        vec![&ctx.env, d1.clone(), d2.clone()],
    );

    ctx.client.escrow_deposit(&id, &d1, &90);
    ctx.client.escrow_deposit(&id, &d2, &100);
    assert!(ctx.client.get_states(&id).completed);

    // No winner assigned yet.
    let result = ctx.client.try_release_escrow(&ctx.mediator, &id);
    assert_eq!(result, Err(Ok(Error::RecipientNotSet)));

    ctx.client.set_recipient(&ctx.mediator, &id, &d1);
    ctx.client.release_escrow(&ctx.mediator, &id);

    // 2% of 200 to the company, the pot to the winner.
    assert_eq!(ctx.native.balance(&d1), 1_000 - 90 + 196);
    assert_eq!(ctx.native.balance(&ctx.company), 4);
    assert_eq!(ctx.native.balance(&ctx.client.address), 0);
}
