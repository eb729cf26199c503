use soroban_sdk::{token, Address, Env};

use crate::storage_types::CrowdfundError;

/// Pull `amount` of `token` from `from` into contract custody.
pub fn transfer_in(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    move_funds(env, token, from, &env.current_contract_address(), amount)
}

/// Push `amount` of `token` from contract custody to `to`.
pub fn transfer_out(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    move_funds(env, token, &env.current_contract_address(), to, amount)
}

// A failed sub-invocation is rolled back by the host, so no funds move on error.
fn move_funds(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    let token_client = token::TokenClient::new(env, token);
    match token_client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(CrowdfundError::TransferFailed),
    }
}
