//! # JESS Staking Program
//!
//! A single-token staking program with a shared, owner-funded reward pool.
//!
//! Reward accrues per staked token per second at a pool-wide rate scaled
//! by 10^18:
//!
//! `reward = balance * rate * (now - stake_time) / 10^18`
//!
//! ## Features
//! - Linear reward accrual, settled on every stake, unstake and claim
//! - Top-ups settle accrued reward before adding principal
//! - All-or-nothing settlement: the reward pool must cover every payout
//! - Owner controls for reward rate, funding and pausing
//! - Two-step ownership handover
//! - Checked math with overflow protection

use anchor_lang::prelude::*;

declare_id!("9hJxQhZ6VrVQ2XkT3sH6r8wYqC5pGm1dLbNfRtUe4Kza");

pub mod accounting;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::PoolSnapshot;

#[program]
pub mod jess_staking {
    use super::*;

    /// Initializes the staking pool and its vault for a mint.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `reward_rate_per_token_per_second` - Initial rate, scaled by 10^18
    pub fn initialize(ctx: Context<Initialize>, reward_rate_per_token_per_second: u128) -> Result<()> {
        instructions::initialize::handler(ctx, reward_rate_per_token_per_second)
    }

    /// Stakes tokens, opening a position or topping up an existing one.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `amount` - Amount of tokens to stake
    ///
    /// # Errors
    /// Returns an error if:
    /// - Staking is paused
    /// - Amount is zero
    /// - A top-up's accrued reward exceeds the reward pool
    /// - Insufficient token balance
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Unstakes the whole position, paying principal plus reward.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Staking is paused
    /// - No active stake
    /// - The reward pool cannot cover the accrued reward
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::handler(ctx)
    }

    /// Claims accrued reward without unstaking.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Staking is paused
    /// - No active stake
    /// - The reward pool cannot cover the accrued reward
    pub fn claim_reward(ctx: Context<ClaimReward>) -> Result<()> {
        instructions::claim_reward::handler(ctx)
    }

    /// Owner deposits tokens into the reward pool.
    ///
    /// # Errors
    /// Returns an error if caller is not the owner or amount is zero.
    pub fn fund_reward_pool(ctx: Context<FundRewardPool>, amount: u64) -> Result<()> {
        instructions::fund_reward_pool::handler(ctx, amount)
    }

    /// Owner sets the reward rate (scaled by 10^18).
    pub fn set_reward_rate_per_token_per_second(ctx: Context<AdminControl>, rate: u128) -> Result<()> {
        instructions::admin::set_reward_rate_handler(ctx, rate)
    }

    /// Owner pauses stake, unstake and claim.
    pub fn pause(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::pause_handler(ctx)
    }

    /// Owner resumes stake, unstake and claim.
    pub fn unpause(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::unpause_handler(ctx)
    }

    /// Owner nominates a new owner (default pubkey cancels).
    pub fn transfer_ownership(ctx: Context<AdminControl>, new_owner: Pubkey) -> Result<()> {
        instructions::admin::transfer_ownership_handler(ctx, new_owner)
    }

    /// Nominee accepts ownership.
    pub fn accept_ownership(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::accept_ownership_handler(ctx)
    }

    /// Returns the reward a position has accrued so far.
    pub fn pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
        instructions::views::pending_reward_handler(ctx)
    }

    /// Returns pool-wide counters.
    pub fn staking_info(ctx: Context<PoolInfo>) -> Result<PoolSnapshot> {
        instructions::views::staking_info_handler(ctx)
    }
}
