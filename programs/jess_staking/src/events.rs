//! Events emitted by the JESS staking program.
//!
//! Every state change emits one event so that indexers can rebuild pool
//! and position history without replaying instructions.

use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub stake_pool: Pubkey,
    pub owner: Pubkey,
    pub staking_mint: Pubkey,
    pub reward_rate_per_token_per_second: u128,
    pub timestamp: i64,
}

#[event]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
    pub reward_paid: u64,
    pub new_balance: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct Unstaked {
    pub user: Pubkey,
    pub principal: u64,
    pub reward: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardClaimed {
    pub user: Pubkey,
    pub reward: u64,
    pub reward_pool: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardPoolFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub reward_pool: u64,
}

#[event]
pub struct RewardRateUpdated {
    pub old_rate: u128,
    pub new_rate: u128,
}

#[event]
pub struct PauseToggled {
    pub paused: bool,
    pub by: Pubkey,
}

#[event]
pub struct OwnershipTransferStarted {
    pub previous_owner: Pubkey,
    pub new_owner: Option<Pubkey>,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
