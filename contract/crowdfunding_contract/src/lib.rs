#![no_std]

mod events;
mod guard;
mod storage_types;
mod transfer;
mod utils;


use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

use guard::ReentrancyGuard;
use storage_types::{DataKey, PersistentKey, TTL_INSTANCE, TTL_PERSISTENT};
use utils::{compute_deadline, get_current_timestamp, has_ended, split_payout};

pub use storage_types::{
    Campaign, CampaignId, CampaignStatus, Config, CrowdfundError, BASIS_POINTS,
    DEFAULT_PLATFORM_FEE_BPS, MAX_PAGE_SIZE, MAX_PLATFORM_FEE_BPS, SECONDS_PER_DAY,
};

#[contract]
pub struct CrowdfundingContract;

#[contractimpl]
impl CrowdfundingContract {
    /// Initialize the contract with the platform owner and the default fee
    pub fn initialize(e: Env, owner: Address) -> Result<(), CrowdfundError> {
        if e.storage().instance().has(&DataKey::Config) {
            return Err(CrowdfundError::AlreadyInitialized);
        }

        let config = Config {
            owner,
            fee_bps: DEFAULT_PLATFORM_FEE_BPS,
        };
        e.storage().instance().set(&DataKey::Config, &config);
        e.storage().instance().set(&DataKey::CampaignCount, &0u64);

        extend_instance(&e);
        Ok(())
    }

    /// Open a new campaign; ids are handed out densely starting at zero
    pub fn create_campaign(
        e: Env,
        creator: Address,
        title: String,
        description: String,
        goal_amount: i128,
        duration_days: u32,
        token: Address,
    ) -> Result<CampaignId, CrowdfundError> {
        creator.require_auth();
        load_config(&e)?;

        if goal_amount <= 0 {
            return Err(CrowdfundError::InvalidGoalAmount);
        }
        let now = get_current_timestamp(&e);
        let deadline = compute_deadline(now, duration_days)?;

        let campaign_id: CampaignId = e
            .storage()
            .instance()
            .get(&DataKey::CampaignCount)
            .unwrap_or(0);

        let campaign = Campaign {
            id: campaign_id,
            creator: creator.clone(),
            title,
            description,
            goal_amount,
            raised_amount: 0,
            total_refunded: 0,
            created_at: now,
            deadline,
            token: token.clone(),
            withdrawn: false,
            active: true,
            contributor_count: 0,
        };
        save_campaign(&e, &campaign);

        let index_key = PersistentKey::CreatorCampaigns(creator.clone());
        let mut created: Vec<CampaignId> = e
            .storage()
            .persistent()
            .get(&index_key)
            .unwrap_or_else(|| Vec::new(&e));
        created.push_back(campaign_id);
        e.storage().persistent().set(&index_key, &created);
        extend_persistent(&e, &index_key);

        e.storage()
            .instance()
            .set(&DataKey::CampaignCount, &(campaign_id + 1));
        extend_instance(&e);

        log!(&e, "campaign created", campaign_id, goal_amount, deadline);
        events::emit_campaign_created(
            &e,
            events::CampaignCreatedEvent {
                campaign_id,
                creator,
                goal_amount,
                deadline,
                token,
            },
        );

        Ok(campaign_id)
    }

    /// Pledge `amount` of the campaign's token; funds are held by the contract
    pub fn contribute(
        e: Env,
        campaign_id: CampaignId,
        contributor: Address,
        amount: i128,
    ) -> Result<(), CrowdfundError> {
        contributor.require_auth();
        let _lock = ReentrancyGuard::acquire(&e)?;

        let mut campaign = get_campaign(&e, campaign_id)?;
        if !campaign.active {
            return Err(CrowdfundError::CampaignNotActive);
        }
        if has_ended(&e, campaign.deadline) {
            return Err(CrowdfundError::CampaignEnded);
        }
        if amount <= 0 {
            return Err(CrowdfundError::InvalidAmount);
        }

        transfer::transfer_in(&e, &campaign.token, &contributor, amount)?;

        let contributed = read_contribution(&e, campaign_id, &contributor)
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        let raised = campaign
            .raised_amount
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        let contribution_key = PersistentKey::Contribution(campaign_id, contributor.clone());
        if !e.storage().persistent().has(&contribution_key) {
            let slot_key = PersistentKey::Contributor(campaign_id, campaign.contributor_count);
            e.storage().persistent().set(&slot_key, &contributor);
            extend_persistent(&e, &slot_key);
            campaign.contributor_count += 1;
        }
        write_contribution(&e, &contribution_key, contributed);
        campaign.raised_amount = raised;
        save_campaign(&e, &campaign);

        events::emit_contribution_made(
            &e,
            events::ContributionMadeEvent {
                campaign_id,
                contributor,
                amount,
                raised_amount: raised,
            },
        );

        Ok(())
    }

    /// Pay out a successful campaign to its creator, less the platform fee
    pub fn withdraw_funds(
        e: Env,
        campaign_id: CampaignId,
        caller: Address,
    ) -> Result<(), CrowdfundError> {
        caller.require_auth();
        let _lock = ReentrancyGuard::acquire(&e)?;

        let config = load_config(&e)?;
        let mut campaign = get_campaign(&e, campaign_id)?;
        require_creator(&campaign, &caller)?;

        if !has_ended(&e, campaign.deadline) {
            return Err(CrowdfundError::CampaignNotEnded);
        }
        if !campaign.goal_reached() {
            return Err(CrowdfundError::GoalNotReached);
        }
        if campaign.withdrawn {
            return Err(CrowdfundError::AlreadyWithdrawn);
        }

        let (payout, fee) = split_payout(campaign.raised_amount, config.fee_bps)?;

        // Finalize before any token call; a failed transfer below reverts these too.
        campaign.withdrawn = true;
        campaign.active = false;
        save_campaign(&e, &campaign);

        transfer::transfer_out(&e, &campaign.token, &campaign.creator, payout)?;
        if fee > 0 {
            transfer::transfer_out(&e, &campaign.token, &config.owner, fee)?;
        }

        log!(&e, "campaign withdrawn", campaign_id, payout, fee);
        events::emit_campaign_withdrawn(
            &e,
            events::CampaignWithdrawnEvent {
                campaign_id,
                creator: campaign.creator,
                amount: payout,
                fee,
            },
        );

        Ok(())
    }

    /// Return a contributor's full pledge once a campaign has missed its goal
    pub fn claim_refund(
        e: Env,
        campaign_id: CampaignId,
        contributor: Address,
    ) -> Result<i128, CrowdfundError> {
        contributor.require_auth();
        let _lock = ReentrancyGuard::acquire(&e)?;

        let mut campaign = get_campaign(&e, campaign_id)?;
        if !has_ended(&e, campaign.deadline) {
            return Err(CrowdfundError::CampaignNotEnded);
        }
        if campaign.goal_reached() {
            return Err(CrowdfundError::GoalReached);
        }

        let amount = read_contribution(&e, campaign_id, &contributor);
        if amount <= 0 {
            return Err(CrowdfundError::NoContribution);
        }

        write_contribution(
            &e,
            &PersistentKey::Contribution(campaign_id, contributor.clone()),
            0,
        );
        campaign.raised_amount -= amount;
        campaign.total_refunded = campaign
            .total_refunded
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        save_campaign(&e, &campaign);

        transfer::transfer_out(&e, &campaign.token, &contributor, amount)?;

        events::emit_refund_claimed(
            &e,
            events::RefundClaimedEvent {
                campaign_id,
                contributor,
                amount,
            },
        );

        Ok(amount)
    }

    /// Stop accepting contributions before the deadline; refunds still wait for it
    pub fn cancel_campaign(
        e: Env,
        campaign_id: CampaignId,
        caller: Address,
    ) -> Result<(), CrowdfundError> {
        caller.require_auth();

        let mut campaign = get_campaign(&e, campaign_id)?;
        require_creator(&campaign, &caller)?;

        if !campaign.active {
            return Err(CrowdfundError::CampaignNotActive);
        }
        if has_ended(&e, campaign.deadline) {
            return Err(CrowdfundError::CampaignEnded);
        }

        campaign.active = false;
        save_campaign(&e, &campaign);

        log!(&e, "campaign cancelled", campaign_id);
        events::emit_campaign_cancelled(
            &e,
            events::CampaignCancelledEvent {
                campaign_id,
                creator: caller,
            },
        );

        Ok(())
    }

    /// Set the platform fee taken on withdrawal; owner only, at most `MAX_PLATFORM_FEE_BPS`
    pub fn update_fee_bps(
        e: Env,
        caller: Address,
        new_fee_bps: u32,
    ) -> Result<(), CrowdfundError> {
        caller.require_auth();
        let mut config = load_config(&e)?;
        require_owner(&config, &caller)?;

        if new_fee_bps > MAX_PLATFORM_FEE_BPS {
            return Err(CrowdfundError::InvalidFeePercentage);
        }

        let old_fee_bps = config.fee_bps;
        config.fee_bps = new_fee_bps;
        save_config(&e, &config);

        events::emit_fee_updated(
            &e,
            events::FeeUpdatedEvent {
                old_fee_bps,
                new_fee_bps,
            },
        );

        Ok(())
    }

    /// Hand the owner role, and future platform fees, to `new_owner`
    pub fn transfer_ownership(
        e: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), CrowdfundError> {
        caller.require_auth();
        let mut config = load_config(&e)?;
        require_owner(&config, &caller)?;

        let previous_owner = config.owner;
        config.owner = new_owner.clone();
        save_config(&e, &config);

        events::emit_ownership_transferred(
            &e,
            events::OwnershipTransferredEvent {
                previous_owner,
                new_owner,
            },
        );

        Ok(())
    }

    // View functions
    pub fn get_campaign(e: Env, campaign_id: CampaignId) -> Result<Campaign, CrowdfundError> {
        get_campaign(&e, campaign_id)
    }

    pub fn get_contribution(
        e: Env,
        campaign_id: CampaignId,
        contributor: Address,
    ) -> Result<i128, CrowdfundError> {
        get_campaign(&e, campaign_id)?;
        Ok(read_contribution(&e, campaign_id, &contributor))
    }

    /// Page through everyone who has ever contributed, in order of first contribution.
    ///
    /// Refunded contributors keep their slot; their `get_contribution` reads zero.
    /// At most `MAX_PAGE_SIZE` addresses are returned per call.
    pub fn get_contributors(
        e: Env,
        campaign_id: CampaignId,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Address>, CrowdfundError> {
        let campaign = get_campaign(&e, campaign_id)?;
        let end = start
            .saturating_add(limit.min(MAX_PAGE_SIZE))
            .min(campaign.contributor_count);

        let mut page = Vec::new(&e);
        for slot in start..end {
            if let Some(contributor) = e
                .storage()
                .persistent()
                .get::<PersistentKey, Address>(&PersistentKey::Contributor(campaign_id, slot))
            {
                page.push_back(contributor);
            }
        }
        Ok(page)
    }

    pub fn get_creator_campaigns(e: Env, creator: Address) -> Vec<CampaignId> {
        e.storage()
            .persistent()
            .get(&PersistentKey::CreatorCampaigns(creator))
            .unwrap_or_else(|| Vec::new(&e))
    }

    pub fn is_successful(e: Env, campaign_id: CampaignId) -> Result<bool, CrowdfundError> {
        let campaign = get_campaign(&e, campaign_id)?;
        Ok(campaign.goal_reached() && has_ended(&e, campaign.deadline))
    }

    pub fn get_campaign_status(
        e: Env,
        campaign_id: CampaignId,
    ) -> Result<CampaignStatus, CrowdfundError> {
        let campaign = get_campaign(&e, campaign_id)?;
        Ok(campaign_status(&e, &campaign))
    }

    pub fn get_campaign_count(e: Env) -> u64 {
        e.storage()
            .instance()
            .get(&DataKey::CampaignCount)
            .unwrap_or(0)
    }

    pub fn get_fee_bps(e: Env) -> Result<u32, CrowdfundError> {
        Ok(load_config(&e)?.fee_bps)
    }

    pub fn get_owner(e: Env) -> Result<Address, CrowdfundError> {
        Ok(load_config(&e)?.owner)
    }
}

// Helper functions
fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn load_config(e: &Env) -> Result<Config, CrowdfundError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(CrowdfundError::NotInitialized)
}

fn save_config(e: &Env, config: &Config) {
    e.storage().instance().set(&DataKey::Config, config);
    extend_instance(e);
}

fn require_owner(config: &Config, caller: &Address) -> Result<(), CrowdfundError> {
    if *caller != config.owner {
        return Err(CrowdfundError::Unauthorized);
    }
    Ok(())
}

fn require_creator(campaign: &Campaign, caller: &Address) -> Result<(), CrowdfundError> {
    if *caller != campaign.creator {
        return Err(CrowdfundError::Unauthorized);
    }
    Ok(())
}

fn get_campaign(e: &Env, campaign_id: CampaignId) -> Result<Campaign, CrowdfundError> {
    e.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign_id))
        .ok_or(CrowdfundError::CampaignNotFound)
}

fn read_contribution(e: &Env, campaign_id: CampaignId, contributor: &Address) -> i128 {
    let key = PersistentKey::Contribution(campaign_id, contributor.clone());
    match e.storage().persistent().get(&key) {
        Some(amount) => amount,
        None => 0,
    }
}

fn write_contribution(e: &Env, key: &PersistentKey, amount: i128) {
    e.storage().persistent().set(key, &amount);
    extend_persistent(e, key);
}

fn save_campaign(e: &Env, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign.id);
    e.storage().persistent().set(&key, campaign);
    extend_persistent(e, &key);
}

fn campaign_status(e: &Env, campaign: &Campaign) -> CampaignStatus {
    if campaign.withdrawn {
        CampaignStatus::Closed
    } else if !has_ended(e, campaign.deadline) {
        if campaign.active {
            CampaignStatus::Funding
        } else {
            CampaignStatus::Cancelled
        }
    } else if campaign.goal_reached() {
        CampaignStatus::Successful
    } else {
        CampaignStatus::Failed
    }
}
