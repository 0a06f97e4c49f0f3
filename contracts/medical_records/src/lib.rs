#![no_std]

pub mod events;


use common::{ttl, validation, Role};
use consent::ConsentContractClient;
use registry::RegistryContractClient;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String,
    Symbol, Vec,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const RECORD_CTR: Symbol = symbol_short!("REC_CTR");
const RECORD: Symbol = symbol_short!("RECORD");
const PATIENT_RECS: Symbol = symbol_short!("PAT_RECS");

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordsConfig {
    pub admin: Address,
    /// Registry contract consulted for role lookups.
    pub registry: Address,
    /// Consent contract consulted before a doctor may read.
    pub consent: Address,
}

/// A reference to a medical-record file held in the off-chain
/// content-addressed store. Only the content identifier is anchored here;
/// the bytes never touch the chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicalRecord {
    pub id: u64,
    pub patient: Address,
    pub content_hash: String,
    pub uploaded_at: u64,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotPatient = 3,
    NotDoctor = 4,
    InvalidContentHash = 5,
    ConsentRequired = 6,
    RecordNotFound = 7,
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<RecordsConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

fn record_key(id: u64) -> (Symbol, u64) {
    (RECORD, id)
}

fn next_record_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&RECORD_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&RECORD_CTR, &next);
    next
}

fn records_of(env: &Env, patient: &Address) -> Vec<MedicalRecord> {
    let ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&(PATIENT_RECS, patient.clone()))
        .unwrap_or(Vec::new(env));
    let mut out = Vec::new(env);
    for id in ids.iter() {
        if let Some(record) = env.storage().persistent().get(&record_key(id)) {
            out.push_back(record);
        }
    }
    out
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct MedicalRecordsContract;

#[contractimpl]
impl MedicalRecordsContract {
    /// Initialise with the admin and the registry and consent contracts
    /// this one defers to. Deploy order: registry, consent, then this.
    pub fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        consent: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        let cfg = RecordsConfig {
            admin,
            registry,
            consent,
        };
        env.storage().instance().set(&CONFIG, &cfg);

        events::publish_initialized(&env, cfg.admin);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<RecordsConfig, ContractError> {
        load_config(&env)
    }

    /// Anchor a record the patient already pushed to the content-addressed
    /// store, persisting the patient → content-identifier association.
    pub fn add_record(
        env: Env,
        patient: Address,
        content_hash: String,
    ) -> Result<u64, ContractError> {
        patient.require_auth();

        let cfg = load_config(&env)?;
        let role = RegistryContractClient::new(&env, &cfg.registry).get_role(&patient);
        if role != Some(Role::Patient) {
            return Err(ContractError::NotPatient);
        }
        if !validation::is_valid_content_hash(&content_hash) {
            return Err(ContractError::InvalidContentHash);
        }

        let id = next_record_id(&env);
        let record = MedicalRecord {
            id,
            patient: patient.clone(),
            content_hash,
            uploaded_at: env.ledger().timestamp(),
        };

        let key = record_key(id);
        env.storage().persistent().set(&key, &record);
        ttl::extend_persistent(&env, &key);

        let index = (PATIENT_RECS, patient.clone());
        let mut ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&index)
            .unwrap_or(Vec::new(&env));
        ids.push_back(id);
        env.storage().persistent().set(&index, &ids);
        ttl::extend_persistent(&env, &index);

        events::publish_record_anchored(&env, id, patient);
        Ok(id)
    }

    /// A doctor reads a patient's record references. Requires the doctor
    /// role and an active, unexpired consent from the patient to the
    /// doctor's wallet; each read is published for the audit trail.
    pub fn get_patient_records(
        env: Env,
        doctor: Address,
        patient: Address,
    ) -> Result<Vec<MedicalRecord>, ContractError> {
        doctor.require_auth();

        let cfg = load_config(&env)?;
        let role = RegistryContractClient::new(&env, &cfg.registry).get_role(&doctor);
        if role != Some(Role::Doctor) {
            return Err(ContractError::NotDoctor);
        }
        if !ConsentContractClient::new(&env, &cfg.consent).has_active(&patient, &doctor) {
            return Err(ContractError::ConsentRequired);
        }

        let records = records_of(&env, &patient);
        events::publish_records_accessed(&env, doctor, patient, records.len());
        Ok(records)
    }

    /// A patient reads their own record references. No consent involved.
    pub fn get_own_records(env: Env, patient: Address) -> Vec<MedicalRecord> {
        patient.require_auth();
        records_of(&env, &patient)
    }

    pub fn get_record(env: Env, id: u64) -> Result<MedicalRecord, ContractError> {
        env.storage()
            .persistent()
            .get(&record_key(id))
            .ok_or(ContractError::RecordNotFound)
    }

    pub fn record_count(env: Env, patient: Address) -> u32 {
        let ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&(PATIENT_RECS, patient))
            .unwrap_or(Vec::new(&env));
        ids.len()
    }
}
