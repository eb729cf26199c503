use soroban_sdk::Env;

use crate::storage_types::{CrowdfundError, BASIS_POINTS, SECONDS_PER_DAY};

/// Convert days to seconds
pub fn days_to_seconds(days: u32) -> u64 {
    days as u64 * SECONDS_PER_DAY
}

/// Get current timestamp
pub fn get_current_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}

/// True once the ledger clock has reached `deadline`.
pub fn has_ended(env: &Env, deadline: u64) -> bool {
    env.ledger().timestamp() >= deadline
}

/// Deadline `duration_days` after `now`, rejecting a zero duration.
pub fn compute_deadline(now: u64, duration_days: u32) -> Result<u64, CrowdfundError> {
    if duration_days == 0 {
        return Err(CrowdfundError::InvalidDeadline);
    }
    now.checked_add(days_to_seconds(duration_days))
        .ok_or(CrowdfundError::InvalidDeadline)
}

/// Platform cut of `amount`, floored.
pub fn calculate_fee(amount: i128, fee_bps: u32) -> Result<i128, CrowdfundError> {
    amount
        .checked_mul(fee_bps as i128)
        .map(|scaled| scaled / BASIS_POINTS as i128)
        .ok_or(CrowdfundError::ArithmeticOverflow)
}

/// Split a raised total into `(payout, fee)`; the two always add back up to `raised`.
pub fn split_payout(raised: i128, fee_bps: u32) -> Result<(i128, i128), CrowdfundError> {
    let fee = calculate_fee(raised, fee_bps)?;
    let payout = raised
        .checked_sub(fee)
        .ok_or(CrowdfundError::ArithmeticOverflow)?;
    Ok((payout, fee))
}
