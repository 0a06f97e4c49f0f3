#![no_std]

pub mod events;

#[cfg(test)]
mod test;

use common::ttl;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONSENT_CTR: Symbol = symbol_short!("CONS_CTR");
const CONSENT: Symbol = symbol_short!("CONSENT");
// Active-grant index: at most one entry per (patient, doctor wallet) pair.
const ACTIVE: Symbol = symbol_short!("ACTIVE");
// Full grant history per pair; rows are never deleted.
const HISTORY: Symbol = symbol_short!("HIST");

// ── Types ────────────────────────────────────────────────────────────────────

/// A patient's grant of record access to a doctor, keyed by the doctor's
/// wallet identity rather than any registry row. Revocation flips `active`;
/// the row itself stays as audit trail.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Consent {
    pub id: u64,
    pub patient: Address,
    pub doctor_wallet: Address,
    pub granted_at: u64,
    pub expires_at: Option<u64>,
    pub active: bool,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidInput = 3,
    AlreadyGranted = 4,
    NoActiveConsent = 5,
    ConsentNotFound = 6,
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn consent_key(id: u64) -> (Symbol, u64) {
    (CONSENT, id)
}

fn active_key(patient: &Address, doctor_wallet: &Address) -> (Symbol, Address, Address) {
    (ACTIVE, patient.clone(), doctor_wallet.clone())
}

fn history_key(patient: &Address, doctor_wallet: &Address) -> (Symbol, Address, Address) {
    (HISTORY, patient.clone(), doctor_wallet.clone())
}

fn next_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&CONSENT_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&CONSENT_CTR, &next);
    next
}

fn is_expired(consent: &Consent, now: u64) -> bool {
    consent.expires_at.map_or(false, |at| now >= at)
}

fn load(env: &Env, id: u64) -> Result<Consent, ContractError> {
    env.storage()
        .persistent()
        .get(&consent_key(id))
        .ok_or(ContractError::ConsentNotFound)
}

/// Flips an expired-or-revoked grant's stored state and drops the active
/// index entry. The row itself is kept.
fn retire(env: &Env, mut consent: Consent) {
    consent.active = false;
    let key = consent_key(consent.id);
    env.storage().persistent().set(&key, &consent);
    ttl::extend_persistent(env, &key);
    env.storage()
        .persistent()
        .remove(&active_key(&consent.patient, &consent.doctor_wallet));
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ConsentContract;

#[contractimpl]
impl ConsentContract {
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, admin);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Grant a doctor wallet access to the caller's records, optionally
    /// bounded by a lifetime in seconds.
    ///
    /// At most one active grant may exist per (patient, wallet) pair: a live
    /// unexpired grant makes this fail with `AlreadyGranted`, while a grant
    /// that has merely expired is retired in place and replaced, so renewals
    /// accumulate as separate rows in the history.
    pub fn grant(
        env: Env,
        patient: Address,
        doctor_wallet: Address,
        ttl_seconds: Option<u64>,
    ) -> Result<u64, ContractError> {
        patient.require_auth();

        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }

        let now = env.ledger().timestamp();
        let expires_at = match ttl_seconds {
            Some(0) => return Err(ContractError::InvalidInput),
            Some(seconds) => Some(now.saturating_add(seconds)),
            None => None,
        };

        let index = active_key(&patient, &doctor_wallet);
        if let Some(existing_id) = env.storage().persistent().get::<_, u64>(&index) {
            let existing = load(&env, existing_id)?;
            if !is_expired(&existing, now) {
                return Err(ContractError::AlreadyGranted);
            }
            events::publish_consent_expired(&env, existing.id);
            retire(&env, existing);
        }

        let id = next_id(&env);
        let consent = Consent {
            id,
            patient: patient.clone(),
            doctor_wallet: doctor_wallet.clone(),
            granted_at: now,
            expires_at,
            active: true,
        };

        let key = consent_key(id);
        env.storage().persistent().set(&key, &consent);
        ttl::extend_persistent(&env, &key);
        env.storage().persistent().set(&index, &id);
        ttl::extend_persistent(&env, &index);

        let hist = history_key(&patient, &doctor_wallet);
        let mut ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&hist)
            .unwrap_or(Vec::new(&env));
        ids.push_back(id);
        env.storage().persistent().set(&hist, &ids);
        ttl::extend_persistent(&env, &hist);

        events::publish_consent_granted(&env, id, patient, doctor_wallet, expires_at);
        Ok(id)
    }

    /// Revoke the caller's active grant for a doctor wallet. A grant that
    /// already lapsed counts as absent: it is retired and the revocation
    /// reports `NoActiveConsent`.
    pub fn revoke(
        env: Env,
        patient: Address,
        doctor_wallet: Address,
    ) -> Result<(), ContractError> {
        patient.require_auth();

        let index = active_key(&patient, &doctor_wallet);
        let id: u64 = env
            .storage()
            .persistent()
            .get(&index)
            .ok_or(ContractError::NoActiveConsent)?;
        let consent = load(&env, id)?;

        let now = env.ledger().timestamp();
        if is_expired(&consent, now) {
            events::publish_consent_expired(&env, id);
            retire(&env, consent);
            return Err(ContractError::NoActiveConsent);
        }

        retire(&env, consent);
        events::publish_consent_revoked(&env, id, patient, doctor_wallet);
        Ok(())
    }

    /// Whether an active, unexpired grant links the pair. Expiry is checked
    /// lazily here; the stored flag is left untouched so the query stays
    /// read-only.
    pub fn has_active(env: Env, patient: Address, doctor_wallet: Address) -> bool {
        let index = active_key(&patient, &doctor_wallet);
        let Some(id) = env.storage().persistent().get::<_, u64>(&index) else {
            return false;
        };
        let Some(consent) = env
            .storage()
            .persistent()
            .get::<_, Consent>(&consent_key(id))
        else {
            return false;
        };
        consent.active && !is_expired(&consent, env.ledger().timestamp())
    }

    /// Sweep an expired grant's stored flag. Permissionless: it only makes
    /// storage agree with what `has_active` already reports. Returns whether
    /// anything was retired.
    pub fn purge_expired(env: Env, patient: Address, doctor_wallet: Address) -> bool {
        let index = active_key(&patient, &doctor_wallet);
        let Some(id) = env.storage().persistent().get::<_, u64>(&index) else {
            return false;
        };
        let Some(consent) = env
            .storage()
            .persistent()
            .get::<_, Consent>(&consent_key(id))
        else {
            return false;
        };
        if !is_expired(&consent, env.ledger().timestamp()) {
            return false;
        }
        events::publish_consent_expired(&env, id);
        retire(&env, consent);
        true
    }

    pub fn get_consent(env: Env, id: u64) -> Result<Consent, ContractError> {
        load(&env, id)
    }

    /// Every grant ever made for the pair, oldest first.
    pub fn history(env: Env, patient: Address, doctor_wallet: Address) -> Vec<Consent> {
        let ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&history_key(&patient, &doctor_wallet))
            .unwrap_or(Vec::new(&env));
        let mut out = Vec::new(&env);
        for id in ids.iter() {
            if let Some(consent) = env.storage().persistent().get(&consent_key(id)) {
                out.push_back(consent);
            }
        }
        out
    }
}
