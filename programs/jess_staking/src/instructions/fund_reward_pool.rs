/// Fund reward pool instruction handler.
///
/// Handles depositing reward tokens into the pool vault.
///
/// ## Security Guarantees
/// - Only the pool owner can fund
/// - Mint validation prevents wrong token deposits
/// - Deposited tokens are earmarked as rewards, never as principal

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::accounting;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardPoolFunded;
use crate::state::StakePool;

/// Accounts required for funding the reward pool.
///
/// ## Security Notes
/// - Owner check performed by `StakePool::require_owner`
/// - Vault must match the pool's vault
/// - Funder token account must be for correct mint
#[derive(Accounts)]
pub struct FundRewardPool<'info> {
    /// The pool owner.
    #[account(mut)]
    pub funder: Signer<'info>,

    /// The stake pool.
    /// SECURITY: PDA + has_one validations.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = pool_vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// Funder's token account.
    /// SECURITY: Mint and owner validation.
    #[account(
        mut,
        constraint = funder_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = funder_token_account.owner == funder.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    /// Pool's vault.
    #[account(mut)]
    pub pool_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Fund the reward pool.
///
/// # Arguments
/// * `ctx` - FundRewardPool accounts context
/// * `amount` - Amount of tokens to deposit as rewards
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<FundRewardPool>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let funder = ctx.accounts.funder.key();

    let stake_pool = &mut ctx.accounts.stake_pool;
    let reward_pool = accounting::fund_reward_pool(stake_pool, &funder, amount)?;
    stake_pool.last_updated = clock.unix_timestamp;

    let cpi_accounts = Transfer {
        from: ctx.accounts.funder_token_account.to_account_info(),
        to: ctx.accounts.pool_vault.to_account_info(),
        authority: ctx.accounts.funder.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    msg!("Reward pool funded with {} tokens", amount);
    msg!("New reward pool: {}", reward_pool);

    emit!(RewardPoolFunded {
        funder,
        amount,
        reward_pool,
    });

    Ok(())
}
