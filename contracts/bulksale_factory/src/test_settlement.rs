extern crate std;

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::invariants;
use crate::test::{setup, DAY, ETHER};
use crate::{ClaimOutcome, Error};

// ── Pro-rata claims ─────────────────────────────────────────────────

#[test]
fn test_claim_when_allocation_below_total_raised() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(9 * ETHER / 10), &f.u256(ETHER / 10));
    f.advance(DAY);

    let alice = f.depositor(sale_id, ETHER as i128);
    let bob = f.depositor(sale_id, ETHER as i128);
    f.advance(DAY);

    f.client.claim(&sale_id, &alice, &alice);
    f.client.claim(&sale_id, &bob, &bob);

    assert_eq!(f.reward.balance(&alice), f.u256(45 * ETHER / 100));
    assert_eq!(f.reward.balance(&bob), f.u256(45 * ETHER / 100));
    assert_eq!(f.reward.balance(&f.client.address), f.u256(0));

    let sale = f.client.sale(&sale_id);
    assert_eq!(sale.reward_balance, f.u256(0));
    invariants::assert_pool_conserved(&sale);
    invariants::assert_all_sale_invariants(&f.env, &sale);
}

#[test]
fn test_claim_when_allocation_above_total_raised() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(19 * ETHER / 10), &f.u256(ETHER / 10));
    f.advance(DAY);

    let alice = f.depositor(sale_id, (ETHER / 2) as i128);
    let bob = f.depositor(sale_id, (ETHER / 2) as i128);
    f.advance(DAY);

    f.client.claim(&sale_id, &alice, &alice);
    f.client.claim(&sale_id, &bob, &bob);

    assert_eq!(f.reward.balance(&alice), f.u256(95 * ETHER / 100));
    assert_eq!(f.reward.balance(&bob), f.u256(95 * ETHER / 100));
    assert_eq!(f.reward.balance(&f.client.address), f.u256(0));
}

#[test]
fn test_claim_returns_reward_outcome() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(1_000), &f.u256(0));
    f.advance(DAY);
    let alice = f.depositor(sale_id, 300);
    f.depositor(sale_id, 700);
    f.advance(DAY);

    let outcome = f.client.claim(&sale_id, &alice, &alice);
    assert_eq!(outcome, ClaimOutcome::Reward(f.u256(300)));
    assert!(f.client.has_claimed(&sale_id, &alice));
}

#[test]
fn test_claim_pays_designated_recipient() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(1_000), &f.u256(0));
    f.advance(DAY);
    let alice = f.depositor(sale_id, 100);
    f.advance(DAY);

    let cold_wallet = Address::generate(&f.env);
    f.client.claim(&sale_id, &alice, &cold_wallet);

    assert_eq!(f.reward.balance(&cold_wallet), f.u256(1_000));
    assert_eq!(f.reward.balance(&alice), f.u256(0));
}

#[test]
fn test_second_claim_fails_without_moving_tokens() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(1_000), &f.u256(0));
    f.advance(DAY);
    let alice = f.depositor(sale_id, 100);
    f.depositor(sale_id, 100);
    f.advance(DAY);

    f.client.claim(&sale_id, &alice, &alice);
    let alice_balance = f.reward.balance(&alice);
    let custody = f.reward.balance(&f.client.address);

    let result = f.client.try_claim(&sale_id, &alice, &alice);
    assert_eq!(result, Err(Ok(Error::AlreadyClaimed)));

    // Redirecting the payout does not bypass the flag either.
    let other = Address::generate(&f.env);
    let result = f.client.try_claim(&sale_id, &alice, &other);
    assert_eq!(result, Err(Ok(Error::AlreadyClaimed)));

    assert_eq!(f.reward.balance(&alice), alice_balance);
    assert_eq!(f.reward.balance(&f.client.address), custody);
    assert_eq!(f.client.sale(&sale_id).claims, 1);
}

#[test]
fn test_claim_without_deposit_fails() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(1_000), &f.u256(0));
    f.advance(DAY);
    f.depositor(sale_id, 100);
    f.advance(DAY);

    let stranger = Address::generate(&f.env);
    let result = f.client.try_claim(&sale_id, &stranger, &stranger);
    assert_eq!(result, Err(Ok(Error::NothingRaised)));
}

#[test]
fn test_claim_while_open_fails() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(1_000), &f.u256(0));
    f.advance(DAY);
    let alice = f.depositor(sale_id, 100);

    let result = f.client.try_claim(&sale_id, &alice, &alice);
    assert_eq!(result, Err(Ok(Error::SaleNotEnded)));
    assert!(!f.client.has_claimed(&sale_id, &alice));
}

#[test]
fn test_uneven_shares_leave_bounded_residue() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(10), &f.u256(0));
    f.advance(DAY);
    let participants = [
        f.depositor(sale_id, 1),
        f.depositor(sale_id, 1),
        f.depositor(sale_id, 1),
    ];
    f.advance(DAY);

    for participant in participants.iter() {
        f.client.claim(&sale_id, participant, participant);
        assert_eq!(f.reward.balance(participant), f.u256(3));
    }

    let sale = f.client.sale(&sale_id);
    assert_eq!(sale.distributed, f.u256(9));
    assert_eq!(sale.reward_balance, f.u256(1));
    invariants::assert_residue_bounded(&f.env, &sale);
}

// ── Failed raise ────────────────────────────────────────────────────

#[test]
fn test_claim_refunds_when_minimum_not_met() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(ETHER), &f.u256(ETHER));
    f.advance(DAY);
    let alice = f.depositor(sale_id, (ETHER / 4) as i128);
    f.advance(DAY);

    let outcome = f.client.claim(&sale_id, &alice, &alice);
    assert_eq!(outcome, ClaimOutcome::Refund((ETHER / 4) as i128));
    assert_eq!(f.native.balance(&alice), (ETHER / 4) as i128);
    assert_eq!(f.reward.balance(&alice), f.u256(0));
    assert_eq!(f.native.balance(&f.client.address), 0);

    let result = f.client.try_claim(&sale_id, &alice, &alice);
    assert_eq!(result, Err(Ok(Error::AlreadyClaimed)));
}

#[test]
fn test_owner_cannot_withdraw_failed_raise() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(ETHER), &f.u256(ETHER));
    f.advance(DAY);
    f.depositor(sale_id, 100);
    f.advance(DAY);

    let result = f.client.try_withdraw_raised(&sale_id, &f.owner);
    assert_eq!(result, Err(Ok(Error::RaiseFailed)));
}

#[test]
fn test_owner_reclaims_full_pool_after_failed_raise() {
    let f = setup();
    let allocated = f.u256(ETHER);
    let sale_id = f.deploy_sale(&allocated, &f.u256(ETHER));
    f.advance(DAY);
    let alice = f.depositor(sale_id, 100);
    f.advance(DAY);

    // Outstanding refunds do not block the reclaim.
    assert_eq!(f.client.reclaim_rewards(&sale_id, &f.owner), allocated);
    assert_eq!(f.reward.balance(&f.owner), allocated);

    f.client.claim(&sale_id, &alice, &alice);
    assert_eq!(f.native.balance(&alice), 100);
}

// ── Owner settlement ────────────────────────────────────────────────

#[test]
fn test_owner_withdraws_raised_once() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(ETHER), &f.u256(100));
    f.advance(DAY);
    f.depositor(sale_id, 150);
    f.depositor(sale_id, 50);

    assert_eq!(
        f.client.try_withdraw_raised(&sale_id, &f.owner),
        Err(Ok(Error::SaleNotEnded))
    );
    f.advance(DAY);

    assert_eq!(f.client.withdraw_raised(&sale_id, &f.owner), 200);
    assert_eq!(f.native.balance(&f.owner), 200);
    assert_eq!(
        f.client.try_withdraw_raised(&sale_id, &f.owner),
        Err(Ok(Error::AlreadyWithdrawn))
    );
}

#[test]
fn test_withdraw_by_non_owner_fails() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(ETHER), &f.u256(0));
    f.advance(DAY);
    let alice = f.depositor(sale_id, 150);
    f.advance(DAY);

    assert_eq!(
        f.client.try_withdraw_raised(&sale_id, &alice),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        f.client.try_reclaim_rewards(&sale_id, &alice),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn test_residue_reclaim_waits_for_all_claims() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(10), &f.u256(0));
    f.advance(DAY);
    let alice = f.depositor(sale_id, 1);
    let bob = f.depositor(sale_id, 1);
    let carol = f.depositor(sale_id, 1);
    f.advance(DAY);

    f.client.claim(&sale_id, &alice, &alice);
    f.client.claim(&sale_id, &bob, &bob);
    assert_eq!(
        f.client.try_reclaim_rewards(&sale_id, &f.owner),
        Err(Ok(Error::ClaimsOutstanding))
    );

    f.client.claim(&sale_id, &carol, &carol);
    assert_eq!(f.client.reclaim_rewards(&sale_id, &f.owner), f.u256(1));
    assert_eq!(f.reward.balance(&f.client.address), f.u256(0));

    // Nothing left to take the second time.
    assert_eq!(f.client.reclaim_rewards(&sale_id, &f.owner), f.u256(0));
}

#[test]
fn test_reclaim_without_participants_returns_pool() {
    let f = setup();
    let allocated = f.u256(ETHER);
    let sale_id = f.deploy_sale(&allocated, &f.u256(0));

    assert_eq!(
        f.client.try_reclaim_rewards(&sale_id, &f.owner),
        Err(Ok(Error::SaleNotEnded))
    );
    f.advance(2 * DAY);

    assert_eq!(f.client.reclaim_rewards(&sale_id, &f.owner), allocated);
    assert_eq!(f.reward.balance(&f.owner), allocated);
}

#[test]
fn test_removed_template_keeps_existing_sales() {
    let f = setup();
    let sale_id = f.deploy_sale(&f.u256(1_000), &f.u256(0));
    f.client.remove_template(&f.owner, &f.name);
    f.advance(DAY);
    let alice = f.depositor(sale_id, 10);
    f.advance(DAY);

    assert_eq!(
        f.client.claim(&sale_id, &alice, &alice),
        ClaimOutcome::Reward(f.u256(1_000))
    );
}

// ── Properties ──────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_claims_apportion_whole_pool(
        allocated in 1u128..1_000_000_000_000_000_000_000_000u128,
        deposits in proptest::collection::vec(1i128..1_000_000_000_000i128, 1..6),
    ) {
        let f = setup();
        let pool = f.u256(allocated);
        let sale_id = f.deploy_sale(&pool, &f.u256(0));
        f.advance(DAY);

        let mut participants = std::vec::Vec::new();
        let mut total = 0i128;
        for amount in deposits.iter() {
            let before = f.client.total_raised(&sale_id);
            participants.push(f.depositor(sale_id, *amount));
            total += amount;
            invariants::assert_deposit_invariant(before, f.client.total_raised(&sale_id), *amount);
        }
        prop_assert_eq!(f.client.total_raised(&sale_id), total);
        f.advance(DAY);

        for participant in participants.iter() {
            f.client.claim(&sale_id, participant, participant);
            invariants::assert_pool_conserved(&f.client.sale(&sale_id));
        }

        let sale = f.client.sale(&sale_id);
        invariants::assert_all_sale_invariants(&f.env, &sale);
        prop_assert_eq!(f.reward.balance(&f.client.address), sale.reward_balance.clone());

        f.client.reclaim_rewards(&sale_id, &f.owner);
        prop_assert_eq!(f.reward.balance(&f.client.address), f.u256(0));
    }
}
