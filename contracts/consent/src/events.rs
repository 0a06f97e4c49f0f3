use soroban_sdk::{symbol_short, Address, Env};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a patient grants record access to a doctor wallet.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentGrantedEvent {
    pub consent_id: u64,
    pub patient: Address,
    pub doctor_wallet: Address,
    pub expires_at: Option<u64>,
    pub timestamp: u64,
}

/// Event published when a patient revokes a grant.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentRevokedEvent {
    pub consent_id: u64,
    pub patient: Address,
    pub doctor_wallet: Address,
    pub timestamp: u64,
}

/// Event published when an expired grant's stored flag is retired, either
/// lazily during grant/revoke or by an explicit sweep.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentExpiredEvent {
    pub consent_id: u64,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_consent_granted(
    env: &Env,
    consent_id: u64,
    patient: Address,
    doctor_wallet: Address,
    expires_at: Option<u64>,
) {
    let topics = (symbol_short!("CNS_GRT"), patient.clone(), doctor_wallet.clone());
    let data = ConsentGrantedEvent {
        consent_id,
        patient,
        doctor_wallet,
        expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_consent_revoked(
    env: &Env,
    consent_id: u64,
    patient: Address,
    doctor_wallet: Address,
) {
    let topics = (symbol_short!("CNS_RVK"), patient.clone(), doctor_wallet.clone());
    let data = ConsentRevokedEvent {
        consent_id,
        patient,
        doctor_wallet,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_consent_expired(env: &Env, consent_id: u64) {
    let topics = (symbol_short!("CNS_EXP"),);
    let data = ConsentExpiredEvent {
        consent_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
