use soroban_sdk::{symbol_short, Address, Env};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a patient anchors a new record reference.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAnchoredEvent {
    pub record_id: u64,
    pub patient: Address,
    pub timestamp: u64,
}

/// Event published each time a doctor reads a patient's references.
/// Part of the access audit trail alongside the consent events.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordsAccessedEvent {
    pub doctor: Address,
    pub patient: Address,
    pub count: u32,
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

pub fn publish_record_anchored(env: &Env, record_id: u64, patient: Address) {
    let topics = (symbol_short!("REC_ADD"), patient.clone());
    let data = RecordAnchoredEvent {
        record_id,
        patient,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_records_accessed(env: &Env, doctor: Address, patient: Address, count: u32) {
    let topics = (symbol_short!("REC_GET"), doctor.clone(), patient.clone());
    let data = RecordsAccessedEvent {
        doctor,
        patient,
        count,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
