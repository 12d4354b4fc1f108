//! Error types for the JESS staking program.
//!
//! Every error aborts the whole instruction; the transaction reverts and
//! no account is modified.
//!
//! ## Error Code Ranges
//! - 6000-6004: Input and pool-state errors
//! - 6005-6006: Authorization errors
//! - 6007: Math errors
//! - 6008-6011: Account validation errors

use anchor_lang::prelude::*;

/// Custom error codes for the JESS staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Input / Pool State Errors ==========

    /// [6000] Cannot stake or fund with zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6001] Caller has no active stake position.
    #[msg("No active stake found for this user")]
    NoStake,

    /// [6002] Settlement would pay out more than the reward pool holds.
    #[msg("Reward pool has insufficient funds for this settlement")]
    InsufficientRewardPool,

    /// [6003] Operation is blocked while the pool is paused.
    #[msg("Staking is currently paused")]
    EnforcedPause,

    /// [6004] Unpause called while the pool is not paused.
    #[msg("Staking is not paused")]
    ExpectedPause,

    // ========== Authorization Errors ==========

    /// [6005] Caller is not the pool owner (or not the pending owner on accept).
    #[msg("Unauthorized: caller is not allowed to perform this operation")]
    Unauthorized,

    /// [6006] Signer does not own the stake position.
    #[msg("Unauthorized: signer does not match stake owner")]
    InvalidStakeOwner,

    // ========== Math Errors ==========

    /// [6007] Arithmetic overflow or underflow.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Account Validation Errors ==========

    /// [6008] Mint does not match the pool's staking mint.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// [6009] Vault does not match the pool's vault.
    #[msg("Pool vault address mismatch")]
    VaultMismatch,

    /// [6010] Token account is not owned by the signer.
    #[msg("Token account owner does not match signer")]
    InvalidTokenAccountOwner,

    /// [6011] Stake position belongs to a different pool.
    #[msg("User stake account does not belong to this pool")]
    StakePoolMismatch,
}
