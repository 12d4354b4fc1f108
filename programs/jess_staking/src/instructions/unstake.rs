//! Unstake instruction handler.
//!
//! Closes a position: principal and settled reward leave the vault in a
//! single transfer.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::accounting;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::Unstaked;
use crate::state::{StakePool, UserStake};

/// Accounts required for unstaking.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The user unstaking tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = pool_vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// User's stake account.
    #[account(
        mut,
        seeds = [USER_STAKE_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ StakingError::InvalidStakeOwner,
        constraint = user_stake.stake_pool == stake_pool.key() @ StakingError::StakePoolMismatch
    )]
    pub user_stake: Account<'info, UserStake>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for receiving principal and reward.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's vault.
    #[account(mut)]
    pub pool_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Unstake the whole position.
///
/// Fails without closing anything if the reward pool cannot cover the
/// settled reward.
///
/// # Arguments
/// * `ctx` - Unstake accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Unstake>) -> Result<()> {
    let clock = Clock::get()?;

    let stake_pool = &mut ctx.accounts.stake_pool;
    let user_stake = &mut ctx.accounts.user_stake;

    let receipt = accounting::unstake(stake_pool, user_stake, clock.unix_timestamp)?;
    stake_pool.last_updated = clock.unix_timestamp;

    let total_staked = stake_pool.total_staked;
    let staking_mint_key = stake_pool.staking_mint;
    let pool_bump = stake_pool.bump;

    // Transfer principal + reward from vault to user using PDA signer
    let seeds = &[STAKE_POOL_SEED, staking_mint_key.as_ref(), &[pool_bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.pool_vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.stake_pool.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, receipt.payout)?;

    msg!("Unstaked {} tokens", receipt.principal);
    msg!("Reward paid: {}", receipt.reward);
    msg!("Pool total staked: {}", total_staked);

    emit!(Unstaked {
        user: ctx.accounts.user.key(),
        principal: receipt.principal,
        reward: receipt.reward,
        total_staked,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
