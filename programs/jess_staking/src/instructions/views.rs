//! Read-only view instructions.
//!
//! Values are returned through Anchor return data. Neither view checks the
//! pause flag and neither writes to any account.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{PoolSnapshot, StakePool, UserStake};

/// Accounts required for the pending reward query.
#[derive(Accounts)]
pub struct PendingReward<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// The position to price. Omitted for accounts that never staked.
    pub user_stake: Option<Account<'info, UserStake>>,
}

/// Accounts required for the pool info query.
#[derive(Accounts)]
pub struct PoolInfo<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,
}

/// Reward accrued by a position at the current clock, priced at the
/// current rate. Saturates at `u64::MAX` instead of failing.
pub fn pending_reward_handler(ctx: Context<PendingReward>) -> Result<u64> {
    let stake_pool = &ctx.accounts.stake_pool;
    let Some(user_stake) = ctx.accounts.user_stake.as_ref() else {
        return Ok(0);
    };
    require_keys_eq!(
        user_stake.stake_pool,
        stake_pool.key(),
        StakingError::StakePoolMismatch
    );

    let now = Clock::get()?.unix_timestamp;
    Ok(user_stake.pending_reward(now, stake_pool.reward_rate_per_token_per_second))
}

/// Pool-wide counters.
pub fn staking_info_handler(ctx: Context<PoolInfo>) -> Result<PoolSnapshot> {
    Ok(ctx.accounts.stake_pool.info())
}
