use soroban_sdk::{symbol_short, Address, Env};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when the admin credits a balance.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub transfer_id: u64,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Event published when a patient pays a doctor.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferredEvent {
    pub transfer_id: u64,
    pub payer: Address,
    pub payee: Address,
    pub amount: i128,
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

pub fn publish_deposited(env: &Env, transfer_id: u64, to: Address, amount: i128) {
    let topics = (symbol_short!("PAY_DEP"), to.clone());
    let data = DepositedEvent {
        transfer_id,
        to,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_transferred(
    env: &Env,
    transfer_id: u64,
    payer: Address,
    payee: Address,
    amount: i128,
) {
    let topics = (symbol_short!("PAY_TXF"), payer.clone(), payee.clone());
    let data = TransferredEvent {
        transfer_id,
        payer,
        payee,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
