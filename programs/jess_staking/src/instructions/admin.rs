/// Admin instruction handlers.
///
/// Handles owner-only operations for the staking pool and the two-step
/// ownership handover.
///
/// ## Security Guarantees
/// - Every owner-only handler checks signer == pool.owner
/// - Only the pending nominee can accept ownership
/// - PDA validation ensures correct pool

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::{OwnershipTransferStarted, OwnershipTransferred, PauseToggled, RewardRateUpdated};
use crate::state::StakePool;

/// Accounts required for admin operations.
///
/// ## Security Notes
/// - Authority must be signer
/// - Authority is checked against stake_pool.owner (or pending_owner on accept)
/// - Pool PDA validated via seeds
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The pool owner, or the pending owner when accepting.
    pub authority: Signer<'info>,

    /// The stake pool to modify.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,
}

/// Set the reward rate.
///
/// # Security
/// - Only pool.owner can call this
/// - Zero is a valid rate
/// - No position is settled; each position's whole unsettled interval is
///   priced at the rate in force when it next settles
pub fn set_reward_rate_handler(ctx: Context<AdminControl>, rate: u128) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let stake_pool = &mut ctx.accounts.stake_pool;

    let old_rate = stake_pool.set_reward_rate(&authority, rate)?;
    stake_pool.last_updated = Clock::get()?.unix_timestamp;

    msg!("Reward rate updated: {} -> {}", old_rate, rate);
    msg!("Owner: {}", authority);

    emit!(RewardRateUpdated {
        old_rate,
        new_rate: rate,
    });

    Ok(())
}

/// Pause stake, unstake and claim.
///
/// # Security
/// - Only pool.owner can call this
/// - Fails if already paused
/// - Positions are not settled or otherwise touched
pub fn pause_handler(ctx: Context<AdminControl>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let stake_pool = &mut ctx.accounts.stake_pool;

    stake_pool.pause(&authority)?;
    stake_pool.last_updated = Clock::get()?.unix_timestamp;

    msg!("Staking PAUSED");
    msg!("Owner: {}", authority);

    emit!(PauseToggled {
        paused: true,
        by: authority,
    });

    Ok(())
}

/// Resume stake, unstake and claim.
///
/// # Security
/// - Only pool.owner can call this
/// - Fails if not paused
pub fn unpause_handler(ctx: Context<AdminControl>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let stake_pool = &mut ctx.accounts.stake_pool;

    stake_pool.unpause(&authority)?;
    stake_pool.last_updated = Clock::get()?.unix_timestamp;

    msg!("Staking RESUMED");
    msg!("Owner: {}", authority);

    emit!(PauseToggled {
        paused: false,
        by: authority,
    });

    Ok(())
}

/// Nominate a new owner. Ownership moves only when the nominee accepts.
///
/// # Security
/// - Only pool.owner can call this
/// - Passing the default pubkey cancels a pending nomination
pub fn transfer_ownership_handler(ctx: Context<AdminControl>, new_owner: Pubkey) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let stake_pool = &mut ctx.accounts.stake_pool;

    stake_pool.propose_owner(&authority, new_owner)?;
    stake_pool.last_updated = Clock::get()?.unix_timestamp;

    match stake_pool.pending_owner {
        Some(nominee) => msg!("Ownership transfer started: {} -> {}", authority, nominee),
        None => msg!("Pending ownership transfer cancelled"),
    }

    emit!(OwnershipTransferStarted {
        previous_owner: authority,
        new_owner: stake_pool.pending_owner,
    });

    Ok(())
}

/// Complete a two-step ownership handover.
///
/// # Security
/// - Only the pending nominee can call this
pub fn accept_ownership_handler(ctx: Context<AdminControl>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let stake_pool = &mut ctx.accounts.stake_pool;

    let previous_owner = stake_pool.accept_owner(&authority)?;
    stake_pool.last_updated = Clock::get()?.unix_timestamp;

    msg!("Ownership transferred: {} -> {}", previous_owner, authority);

    emit!(OwnershipTransferred {
        previous_owner,
        new_owner: authority,
    });

    Ok(())
}
