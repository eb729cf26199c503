use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::storage_types::CampaignId;

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: CampaignId,
    pub creator: Address,
    pub goal_amount: i128,
    pub deadline: u64,
    pub token: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct ContributionMadeEvent {
    pub campaign_id: CampaignId,
    pub contributor: Address,
    pub amount: i128,
    pub raised_amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignWithdrawnEvent {
    pub campaign_id: CampaignId,
    pub creator: Address,
    pub amount: i128,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RefundClaimedEvent {
    pub campaign_id: CampaignId,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignCancelledEvent {
    pub campaign_id: CampaignId,
    pub creator: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct FeeUpdatedEvent {
    pub old_fee_bps: u32,
    pub new_fee_bps: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreatedEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_created"),), event);
}

pub fn emit_contribution_made(env: &Env, event: ContributionMadeEvent) {
    env.events()
        .publish((Symbol::new(env, "contribution_made"),), event);
}

pub fn emit_campaign_withdrawn(env: &Env, event: CampaignWithdrawnEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_withdrawn"),), event);
}

pub fn emit_refund_claimed(env: &Env, event: RefundClaimedEvent) {
    env.events()
        .publish((Symbol::new(env, "refund_claimed"),), event);
}

pub fn emit_campaign_cancelled(env: &Env, event: CampaignCancelledEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_cancelled"),), event);
}

pub fn emit_fee_updated(env: &Env, event: FeeUpdatedEvent) {
    env.events().publish((Symbol::new(env, "fee_updated"),), event);
}

pub fn emit_ownership_transferred(env: &Env, event: OwnershipTransferredEvent) {
    env.events()
        .publish((Symbol::new(env, "ownership_transferred"),), event);
}
