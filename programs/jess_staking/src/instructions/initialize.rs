/// Initialize instruction handler.
///
/// Creates a staking pool for one SPL mint together with the vault that
/// custodies staked principal and the reward pool.
///
/// ## Security Guarantees
/// - The vault is a PDA whose token authority is the stake pool PDA
/// - Mint address is locked to pool state permanently
/// - The initializing signer becomes the pool owner

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PoolInitialized;
use crate::state::StakePool;

/// Accounts required for pool initialization.
///
/// ## Security Notes
/// - `pool_vault` is a PDA with `stake_pool` as authority
/// - Seeds ensure the vault cannot be swapped or replaced
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The owner that will control the pool.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The stake pool account to be created.
    /// SECURITY: PDA derived from STAKE_POOL_SEED + mint ensures one pool per token.
    #[account(
        init,
        payer = authority,
        space = StakePool::LEN,
        seeds = [STAKE_POOL_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// The mint of the staked (and reward) token.
    pub staking_mint: Account<'info, Mint>,

    /// The vault that holds staked tokens and the reward pool.
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, stake_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = stake_pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,
}

/// Initialize a new staking pool.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `reward_rate_per_token_per_second` - Initial rate, scaled by `FIXED_POINT_SCALE`
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Initialize>, reward_rate_per_token_per_second: u128) -> Result<()> {
    require!(
        ctx.accounts.pool_vault.owner == ctx.accounts.stake_pool.key(),
        StakingError::VaultMismatch
    );
    require!(
        ctx.accounts.pool_vault.mint == ctx.accounts.staking_mint.key(),
        StakingError::MintMismatch
    );

    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    stake_pool.owner = ctx.accounts.authority.key();
    stake_pool.pending_owner = None;
    stake_pool.staking_mint = ctx.accounts.staking_mint.key();
    stake_pool.pool_vault = ctx.accounts.pool_vault.key();
    stake_pool.total_staked = 0;
    stake_pool.reward_pool = 0;
    stake_pool.reward_rate_per_token_per_second = reward_rate_per_token_per_second;
    stake_pool.total_rewards_paid = 0;
    stake_pool.staker_count = 0;
    stake_pool.paused = false;
    stake_pool.created_at = clock.unix_timestamp;
    stake_pool.last_updated = clock.unix_timestamp;

    stake_pool.bump = ctx.bumps.stake_pool;
    stake_pool.vault_bump = ctx.bumps.pool_vault;

    msg!("JESS staking pool initialized");
    msg!("Owner: {}", stake_pool.owner);
    msg!("Mint: {}", stake_pool.staking_mint);
    msg!("Reward rate: {}", reward_rate_per_token_per_second);

    emit!(PoolInitialized {
        stake_pool: stake_pool.key(),
        owner: stake_pool.owner,
        staking_mint: stake_pool.staking_mint,
        reward_rate_per_token_per_second,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
