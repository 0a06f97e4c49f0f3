#![allow(clippy::unwrap_used, clippy::expect_used)]
extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env,
};

use crate::{ConsentContract, ConsentContractClient, ContractError};

fn setup() -> (Env, ConsentContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let contract_id = env.register(ConsentContract, ());
    let client = ConsentContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    let patient = Address::generate(&env);
    let doctor_wallet = Address::generate(&env);
    (env, client, patient, doctor_wallet)
}

#[test]
fn test_grant_then_query_is_active() {
    let (_env, client, patient, wallet) = setup();

    let id = client.grant(&patient, &wallet, &None);
    assert!(client.has_active(&patient, &wallet));

    let consent = client.get_consent(&id);
    assert!(consent.active);
    assert_eq!(consent.granted_at, 1_000);
    assert_eq!(consent.expires_at, None);
}

#[test]
fn test_revoke_then_query_is_inactive() {
    let (_env, client, patient, wallet) = setup();

    let id = client.grant(&patient, &wallet, &None);
    client.revoke(&patient, &wallet);

    assert!(!client.has_active(&patient, &wallet));
    // Audit trail: the row survives revocation.
    assert!(!client.get_consent(&id).active);
}

#[test]
fn test_revoke_without_active_grant_is_not_found() {
    let (_env, client, patient, wallet) = setup();

    let res = client.try_revoke(&patient, &wallet);
    assert_eq!(res, Err(Ok(ContractError::NoActiveConsent)));

    // Same once a grant has already been revoked.
    client.grant(&patient, &wallet, &None);
    client.revoke(&patient, &wallet);
    let res = client.try_revoke(&patient, &wallet);
    assert_eq!(res, Err(Ok(ContractError::NoActiveConsent)));
}

#[test]
fn test_duplicate_active_grant_conflicts() {
    let (_env, client, patient, wallet) = setup();

    client.grant(&patient, &wallet, &None);
    let res = client.try_grant(&patient, &wallet, &None);
    assert_eq!(res, Err(Ok(ContractError::AlreadyGranted)));
}

#[test]
fn test_pairs_are_independent() {
    let (env, client, patient, wallet) = setup();

    let other_wallet = Address::generate(&env);
    client.grant(&patient, &wallet, &None);
    client.grant(&patient, &other_wallet, &None);

    client.revoke(&patient, &wallet);
    assert!(!client.has_active(&patient, &wallet));
    assert!(client.has_active(&patient, &other_wallet));
}

#[test]
fn test_expired_grant_reads_inactive() {
    let (env, client, patient, wallet) = setup();

    let id = client.grant(&patient, &wallet, &Some(500));
    assert!(client.has_active(&patient, &wallet));

    env.ledger().set_timestamp(1_500);
    // Lazy expiry: the stored flag is still true, the query says no.
    assert!(!client.has_active(&patient, &wallet));
    assert!(client.get_consent(&id).active);

    // Revoking a lapsed grant reports no active consent and retires it.
    let res = client.try_revoke(&patient, &wallet);
    assert_eq!(res, Err(Ok(ContractError::NoActiveConsent)));
    assert!(!client.get_consent(&id).active);
}

#[test]
fn test_renewal_after_expiry_keeps_history() {
    let (env, client, patient, wallet) = setup();

    let first = client.grant(&patient, &wallet, &Some(500));
    env.ledger().set_timestamp(2_000);

    // A lapsed grant does not block a renewal.
    let second = client.grant(&patient, &wallet, &Some(500));
    assert_ne!(first, second);
    assert!(client.has_active(&patient, &wallet));

    let history = client.history(&patient, &wallet);
    assert_eq!(history.len(), 2);
    assert!(!history.get(0).unwrap().active);
    assert!(history.get(1).unwrap().active);
}

#[test]
fn test_purge_expired_sweep() {
    let (env, client, patient, wallet) = setup();

    let id = client.grant(&patient, &wallet, &Some(500));

    // Nothing to purge while the grant is live.
    assert!(!client.purge_expired(&patient, &wallet));

    env.ledger().set_timestamp(1_600);
    assert!(client.purge_expired(&patient, &wallet));
    assert!(!client.get_consent(&id).active);

    // Idempotent.
    assert!(!client.purge_expired(&patient, &wallet));
}

#[test]
fn test_zero_ttl_rejected() {
    let (_env, client, patient, wallet) = setup();

    let res = client.try_grant(&patient, &wallet, &Some(0));
    assert_eq!(res, Err(Ok(ContractError::InvalidInput)));
}
