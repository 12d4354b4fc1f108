//! Program constants for the JESS staking program.
//!
//! PDA seeds, the fixed-point scale used by the reward rate, and time
//! periods used when quoting rates.

/// Seed for deriving the stake pool PDA
pub const STAKE_POOL_SEED: &[u8] = b"stake_pool";

/// Seed for deriving user stake account PDAs
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

/// Seed for deriving the pool vault PDA.
/// The vault custodies staked principal and the reward pool together.
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of seconds in a year (365 days)
pub const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

/// Fixed-point scale of `reward_rate_per_token_per_second`.
///
/// A rate of `FIXED_POINT_SCALE` pays one base unit of reward per staked
/// base unit per second.
pub const FIXED_POINT_SCALE: u128 = 1_000_000_000_000_000_000; // 10^18
