use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    CampaignCount,
    Locked,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    CreatorCampaigns(Address),
    Contribution(CampaignId, Address),
    Contributor(CampaignId, u32), // (CampaignID, slot) -> first-time contributor
}

pub type CampaignId = u64;

/// Platform-wide settings, owned by a single admin identity.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Config {
    pub owner: Address,
    pub fee_bps: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub goal_amount: i128,
    pub raised_amount: i128,
    pub total_refunded: i128,
    pub created_at: u64,
    pub deadline: u64,
    pub token: Address,
    pub withdrawn: bool,
    pub active: bool,
    pub contributor_count: u32,
}

impl Campaign {
    pub fn goal_reached(&self) -> bool {
        self.raised_amount >= self.goal_amount
    }
}

/// Lifecycle position of a campaign, derived from its flags and the ledger clock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[contracttype]
pub enum CampaignStatus {
    Funding,
    Cancelled,
    Successful,
    Failed,
    Closed,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    CampaignNotFound = 3,
    InvalidGoalAmount = 4,
    InvalidDeadline = 5,
    InvalidAmount = 6,
    CampaignNotActive = 7,
    CampaignEnded = 8,
    CampaignNotEnded = 9,
    GoalNotReached = 10,
    GoalReached = 11,
    AlreadyWithdrawn = 12,
    NoContribution = 13,
    TransferFailed = 14,
    Unauthorized = 15,
    InvalidFeePercentage = 16,
    ReentrantCall = 17,
    ArithmeticOverflow = 18,
}

// Constants
pub const BASIS_POINTS: u32 = 10000; // 100% in basis points
pub const DEFAULT_PLATFORM_FEE_BPS: u32 = 250; // 2.5%
pub const MAX_PLATFORM_FEE_BPS: u32 = 1000; // 10%
pub const SECONDS_PER_DAY: u64 = 86400;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
