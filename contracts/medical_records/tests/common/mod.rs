use consent::{ConsentContract, ConsentContractClient};
use medical_records::{MedicalRecordsContract, MedicalRecordsContractClient};
use registry::{RegistryContract, RegistryContractClient};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

pub struct Suite {
    pub env: Env,
    pub registry: RegistryContractClient<'static>,
    pub consent: ConsentContractClient<'static>,
    pub records: MedicalRecordsContractClient<'static>,
    pub admin: Address,
}

/// Deploys the three contracts in their initialization order and wires the
/// collaborator addresses into the records contract.
pub fn deploy_suite() -> Suite {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);

    let registry_id = env.register(RegistryContract, ());
    let registry = RegistryContractClient::new(&env, &registry_id);
    registry.initialize(&admin);

    let consent_id = env.register(ConsentContract, ());
    let consent = ConsentContractClient::new(&env, &consent_id);
    consent.initialize(&admin);

    let records_id = env.register(MedicalRecordsContract, ());
    let records = MedicalRecordsContractClient::new(&env, &records_id);
    records.initialize(&admin, &registry_id, &consent_id);

    Suite {
        env,
        registry,
        consent,
        records,
        admin,
    }
}

pub fn register_patient(suite: &Suite, name: &str, email: &str) -> Address {
    let patient = Address::generate(&suite.env);
    suite.registry.register_patient(
        &patient,
        &String::from_str(&suite.env, name),
        &String::from_str(&suite.env, email),
        &None,
        &None,
        &None,
    );
    patient
}

pub fn onboard_doctor(suite: &Suite, name: &str, email: &str, specialization: &str) -> Address {
    let doctor = Address::generate(&suite.env);
    suite.registry.submit_application(
        &doctor,
        &String::from_str(&suite.env, name),
        &String::from_str(&suite.env, email),
        &String::from_str(&suite.env, specialization),
        &None,
    );
    suite.registry.approve_applicant(&suite.admin, &doctor);
    doctor
}
