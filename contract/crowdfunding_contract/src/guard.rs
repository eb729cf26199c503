use soroban_sdk::Env;

use crate::storage_types::{CrowdfundError, DataKey};

/// Ledger-wide mutual exclusion for operations that call out to a token contract.
///
/// The flag lives in instance storage for as long as the guard is alive and is
/// cleared when it drops, so every return path (including `?`) releases it. A
/// second `acquire` while the flag is set fails with `ReentrantCall`.
pub struct ReentrancyGuard {
    env: Env,
}

impl ReentrancyGuard {
    pub fn acquire(env: &Env) -> Result<Self, CrowdfundError> {
        if Self::is_locked(env) {
            return Err(CrowdfundError::ReentrantCall);
        }
        env.storage().instance().set(&DataKey::Locked, &true);
        Ok(Self { env: env.clone() })
    }

    pub fn is_locked(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Locked)
            .unwrap_or(false)
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&DataKey::Locked);
    }
}
