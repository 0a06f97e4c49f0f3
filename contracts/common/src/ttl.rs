//! TTL extension helpers for persistent storage keys.

use soroban_sdk::{Env, IntoVal, Val};

/// Remaining-lifetime threshold below which an entry's TTL is extended.
pub const TTL_THRESHOLD: u32 = 5_184_000;
/// Ledger count an entry's TTL is extended to.
pub const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the TTL of a persistent storage entry so it stays live between
/// infrequent accesses (profiles, ledger rows, consent history).
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
