#![no_std]

pub mod events;


use common::{ttl, Role};
use registry::RegistryContractClient;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const TRANSFER_CTR: Symbol = symbol_short!("TX_CTR");
const TRANSFER: Symbol = symbol_short!("TRANSFER");
const BALANCE: Symbol = symbol_short!("BAL");
const TX_OF: Symbol = symbol_short!("TX_OF");

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentsConfig {
    /// Address that may credit balances (the on-ramp).
    pub admin: Address,
    /// Registry contract consulted for role lookups.
    pub registry: Address,
}

/// Append-only ledger row. `payer` is absent for admin deposits; no
/// entrypoint ever mutates or deletes a row — a correction is a new,
/// compensating row.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferRecord {
    pub id: u64,
    pub amount: i128,
    pub timestamp: u64,
    pub payer: Option<Address>,
    pub payee: Option<Address>,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAdmin = 3,
    AmountNotPositive = 4,
    PatientNotFound = 5,
    DoctorNotFound = 6,
    AccountNotFound = 7,
    InsufficientFunds = 8,
    TransferNotFound = 9,
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<PaymentsConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

fn next_transfer_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&TRANSFER_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&TRANSFER_CTR, &next);
    next
}

fn transfer_key(id: u64) -> (Symbol, u64) {
    (TRANSFER, id)
}

fn balance_key(who: &Address) -> (Symbol, Address) {
    (BALANCE, who.clone())
}

fn read_balance(env: &Env, who: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&balance_key(who))
        .unwrap_or(0)
}

fn write_balance(env: &Env, who: &Address, amount: i128) {
    let key = balance_key(who);
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

fn role_of(env: &Env, cfg: &PaymentsConfig, who: &Address) -> Option<Role> {
    RegistryContractClient::new(env, &cfg.registry).get_role(who)
}

fn record_transfer(
    env: &Env,
    id: u64,
    amount: i128,
    payer: Option<Address>,
    payee: Option<Address>,
) {
    let row = TransferRecord {
        id,
        amount,
        timestamp: env.ledger().timestamp(),
        payer: payer.clone(),
        payee: payee.clone(),
    };
    let key = transfer_key(id);
    env.storage().persistent().set(&key, &row);
    ttl::extend_persistent(env, &key);

    for party in [payer, payee].into_iter().flatten() {
        let idx = (TX_OF, party);
        let mut ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&idx)
            .unwrap_or(Vec::new(env));
        ids.push_back(id);
        env.storage().persistent().set(&idx, &ids);
        ttl::extend_persistent(env, &idx);
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PaymentsContract;

#[contractimpl]
impl PaymentsContract {
    /// Initialise with the admin and the registry contract whose role table
    /// gates every movement of funds.
    pub fn initialize(env: Env, admin: Address, registry: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        let cfg = PaymentsConfig { admin, registry };
        env.storage().instance().set(&CONFIG, &cfg);

        events::publish_initialized(&env, cfg.admin);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<PaymentsConfig, ContractError> {
        load_config(&env)
    }

    /// Credit a registered user's balance. Admin only; this is the on-ramp
    /// from whatever the user actually paid with off-chain.
    pub fn deposit(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<u64, ContractError> {
        caller.require_auth();

        let cfg = load_config(&env)?;
        if caller != cfg.admin {
            return Err(ContractError::NotAdmin);
        }
        if amount <= 0 {
            return Err(ContractError::AmountNotPositive);
        }
        if role_of(&env, &cfg, &to).is_none() {
            return Err(ContractError::AccountNotFound);
        }

        let balance = read_balance(&env, &to).saturating_add(amount);
        write_balance(&env, &to, balance);

        let id = next_transfer_id(&env);
        record_transfer(&env, id, amount, None, Some(to.clone()));

        events::publish_deposited(&env, id, to, amount);
        Ok(id)
    }

    /// Pay a doctor from a patient's balance.
    ///
    /// The debit, the credit, and the ledger row are written inside one
    /// invocation: either all three persist or, on any error, none do. The
    /// balance check therefore cannot be raced into an overdraw.
    pub fn transfer(
        env: Env,
        patient: Address,
        doctor: Address,
        amount: i128,
    ) -> Result<u64, ContractError> {
        patient.require_auth();

        let cfg = load_config(&env)?;
        if amount <= 0 {
            return Err(ContractError::AmountNotPositive);
        }
        if role_of(&env, &cfg, &patient) != Some(Role::Patient) {
            return Err(ContractError::PatientNotFound);
        }
        if role_of(&env, &cfg, &doctor) != Some(Role::Doctor) {
            return Err(ContractError::DoctorNotFound);
        }

        let payer_balance = read_balance(&env, &patient);
        if payer_balance < amount {
            return Err(ContractError::InsufficientFunds);
        }

        write_balance(&env, &patient, payer_balance - amount);
        let payee_balance = read_balance(&env, &doctor).saturating_add(amount);
        write_balance(&env, &doctor, payee_balance);

        let id = next_transfer_id(&env);
        record_transfer(&env, id, amount, Some(patient.clone()), Some(doctor.clone()));

        events::publish_transferred(&env, id, patient, doctor, amount);
        Ok(id)
    }

    pub fn balance_of(env: Env, who: Address) -> i128 {
        read_balance(&env, &who)
    }

    pub fn get_transfer(env: Env, id: u64) -> Result<TransferRecord, ContractError> {
        env.storage()
            .persistent()
            .get(&transfer_key(id))
            .ok_or(ContractError::TransferNotFound)
    }

    /// Number of ledger rows written so far.
    pub fn transfer_count(env: Env) -> u64 {
        env.storage().instance().get(&TRANSFER_CTR).unwrap_or(0)
    }

    /// Ledger rows in which the address appears as payer or payee,
    /// oldest first.
    pub fn transfers_of(env: Env, who: Address) -> Vec<TransferRecord> {
        let ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&(TX_OF, who))
            .unwrap_or(Vec::new(&env));
        let mut out = Vec::new(&env);
        for id in ids.iter() {
            if let Some(row) = env.storage().persistent().get(&transfer_key(id)) {
                out.push_back(row);
            }
        }
        out
    }
}
