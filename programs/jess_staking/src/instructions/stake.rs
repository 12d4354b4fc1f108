//! Stake instruction handler.
//!
//! Handles staking tokens into the pool, opening a position or topping
//! up an existing one.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::accounting;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::Staked;
use crate::state::{StakePool, UserStake};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The user staking tokens.
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

    /// User's stake account (created if first time staking).
    #[account(
        init_if_needed,
        payer = user,
        space = UserStake::LEN,
        seeds = [USER_STAKE_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_stake: Account<'info, UserStake>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for the staking token.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's vault.
    #[account(mut)]
    pub pool_vault: Account<'info, TokenAccount>,

    /// System program.
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Stake tokens into the pool.
///
/// A top-up first pays out the reward accrued on the existing balance,
/// then restarts the accrual clock for the combined balance.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Amount of tokens to stake
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let user_key = ctx.accounts.user.key();
    let pool_key = ctx.accounts.stake_pool.key();

    let stake_pool = &mut ctx.accounts.stake_pool;
    let user_stake = &mut ctx.accounts.user_stake;

    let receipt = accounting::stake(stake_pool, user_stake, amount, clock.unix_timestamp)?;

    if receipt.is_new_position {
        user_stake.owner = user_key;
        user_stake.stake_pool = pool_key;
        user_stake.bump = ctx.bumps.user_stake;
    }
    stake_pool.last_updated = clock.unix_timestamp;

    let total_staked = stake_pool.total_staked;
    let staking_mint_key = stake_pool.staking_mint;
    let pool_bump = stake_pool.bump;

    // Transfer tokens from user to vault
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.pool_vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    // Pay out the reward settled on a top-up
    if receipt.reward_paid > 0 {
        let seeds = &[STAKE_POOL_SEED, staking_mint_key.as_ref(), &[pool_bump]];
        let signer_seeds = &[&seeds[..]];

        let cpi_accounts = Transfer {
            from: ctx.accounts.pool_vault.to_account_info(),
            to: ctx.accounts.user_token_account.to_account_info(),
            authority: ctx.accounts.stake_pool.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, receipt.reward_paid)?;
    }

    msg!("Staked {} tokens", amount);
    msg!("Total staked by user: {}", receipt.new_balance);
    if receipt.reward_paid > 0 {
        msg!("Settled {} reward tokens", receipt.reward_paid);
    }

    emit!(Staked {
        user: user_key,
        amount,
        reward_paid: receipt.reward_paid,
        new_balance: receipt.new_balance,
        total_staked,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
