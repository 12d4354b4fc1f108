//! Reward accounting for stake positions.
//!
//! Reward accrues linearly in both staked balance and elapsed time:
//!
//! ```text
//! pending = balance * rate * (now - stake_time) / FIXED_POINT_SCALE
//! ```
//!
//! Every state-changing operation settles the caller's pending reward
//! first, at the rate current at settlement time, over the whole interval
//! since `stake_time`. Settlement is quoted before anything is written: the
//! pool must cover the full payout or the operation fails and leaves both
//! accounts untouched. Callers issue token transfers only after these
//! functions return, so all bookkeeping is committed before any CPI.

use anchor_lang::prelude::*;

use crate::constants::FIXED_POINT_SCALE;
use crate::error::StakingError;
use crate::state::{StakePool, UserStake};

/// Reward accrued by `balance` since `stake_time`, in base units.
///
/// A clock reading earlier than `stake_time` counts as zero elapsed time.
/// The product is split around `FIXED_POINT_SCALE` so that large rates do
/// not overflow early while the result stays exactly
/// `floor(balance * rate * elapsed / FIXED_POINT_SCALE)`.
///
/// Returns `None` when the reward does not fit in `u128`.
pub fn accrued_reward(balance: u64, stake_time: i64, now: i64, rate: u128) -> Option<u128> {
    if balance == 0 || rate == 0 {
        return Some(0);
    }

    let elapsed = now.saturating_sub(stake_time).max(0) as u128;
    if elapsed == 0 {
        return Some(0);
    }

    let rate_time = rate.checked_mul(elapsed)?;
    let whole = rate_time / FIXED_POINT_SCALE;
    let fraction = rate_time % FIXED_POINT_SCALE;

    let balance = balance as u128;
    balance
        .checked_mul(whole)?
        .checked_add(balance.checked_mul(fraction)? / FIXED_POINT_SCALE)
}

/// Calculate the reward accrued by `balance` since `stake_time`.
///
/// Never fails: a reward too large for `u64` reads as `u64::MAX`. No pool
/// can cover such a reward, so settlement rejects it separately.
pub fn calculate_pending_reward(balance: u64, stake_time: i64, now: i64, rate: u128) -> u64 {
    accrued_reward(balance, stake_time, now, rate)
        .and_then(|reward| u64::try_from(reward).ok())
        .unwrap_or(u64::MAX)
}

/// A settlement that has been validated but not yet written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub reward: u64,
    reward_pool: u64,
    total_rewards_paid: u64,
    total_rewards_claimed: u64,
}

impl Settlement {
    /// Price the position's unsettled interval at the pool's current rate
    /// and check that the reward pool can cover it.
    pub fn quote(pool: &StakePool, user_stake: &UserStake, now: i64) -> Result<Self> {
        let reward = accrued_reward(
            user_stake.balance,
            user_stake.stake_time,
            now,
            pool.reward_rate_per_token_per_second,
        )
        .and_then(|reward| u64::try_from(reward).ok())
        .ok_or(StakingError::InsufficientRewardPool)?;

        let reward_pool = pool
            .reward_pool
            .checked_sub(reward)
            .ok_or(StakingError::InsufficientRewardPool)?;
        let total_rewards_paid = pool
            .total_rewards_paid
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;
        let total_rewards_claimed = user_stake
            .total_rewards_claimed
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;

        Ok(Self {
            reward,
            reward_pool,
            total_rewards_paid,
            total_rewards_claimed,
        })
    }

    /// Write the settlement and restart the accrual clock at `now`.
    fn commit(self, pool: &mut StakePool, user_stake: &mut UserStake, now: i64) {
        pool.reward_pool = self.reward_pool;
        pool.total_rewards_paid = self.total_rewards_paid;
        user_stake.total_rewards_claimed = self.total_rewards_claimed;
        user_stake.stake_time = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeReceipt {
    /// Reward settled on a top-up, owed to the staker from the vault.
    pub reward_paid: u64,
    pub new_balance: u64,
    pub is_new_position: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnstakeReceipt {
    pub principal: u64,
    pub reward: u64,
    /// Principal plus reward, paid in a single transfer.
    pub payout: u64,
}

/// Add `amount` to a position, settling any pending reward first.
///
/// The caller owes `amount` to the vault; the vault owes
/// `reward_paid` back to the caller.
pub fn stake(
    pool: &mut StakePool,
    user_stake: &mut UserStake,
    amount: u64,
    now: i64,
) -> Result<StakeReceipt> {
    pool.require_not_paused()?;
    require!(amount > 0, StakingError::ZeroAmount);

    let is_new_position = !user_stake.is_active();
    let settlement = if is_new_position {
        None
    } else {
        Some(Settlement::quote(pool, user_stake, now)?)
    };

    let new_balance = user_stake
        .balance
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;
    let total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;
    let staker_count = if is_new_position {
        pool.staker_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?
    } else {
        pool.staker_count
    };

    let reward_paid = match settlement {
        Some(settlement) => {
            let reward = settlement.reward;
            settlement.commit(pool, user_stake, now);
            reward
        }
        None => 0,
    };

    user_stake.balance = new_balance;
    user_stake.stake_time = now;
    pool.total_staked = total_staked;
    pool.staker_count = staker_count;

    Ok(StakeReceipt {
        reward_paid,
        new_balance,
        is_new_position,
    })
}

/// Close a position, settling its pending reward. The whole balance and
/// the reward leave the vault together.
pub fn unstake(
    pool: &mut StakePool,
    user_stake: &mut UserStake,
    now: i64,
) -> Result<UnstakeReceipt> {
    pool.require_not_paused()?;
    require!(user_stake.is_active(), StakingError::NoStake);

    let settlement = Settlement::quote(pool, user_stake, now)?;

    let principal = user_stake.balance;
    let reward = settlement.reward;
    let payout = principal
        .checked_add(reward)
        .ok_or(StakingError::MathOverflow)?;
    let total_staked = pool
        .total_staked
        .checked_sub(principal)
        .ok_or(StakingError::MathOverflow)?;
    let staker_count = pool
        .staker_count
        .checked_sub(1)
        .ok_or(StakingError::MathOverflow)?;

    settlement.commit(pool, user_stake, now);
    user_stake.balance = 0;
    user_stake.stake_time = 0;
    pool.total_staked = total_staked;
    pool.staker_count = staker_count;

    Ok(UnstakeReceipt {
        principal,
        reward,
        payout,
    })
}

/// Settle a position's pending reward without touching its balance.
///
/// Returns the reward owed to the staker. A zero reward is a no-op: no
/// pool check, and `stake_time` keeps its value.
pub fn claim_reward(pool: &mut StakePool, user_stake: &mut UserStake, now: i64) -> Result<u64> {
    pool.require_not_paused()?;
    require!(user_stake.is_active(), StakingError::NoStake);

    let settlement = Settlement::quote(pool, user_stake, now)?;
    if settlement.reward == 0 {
        return Ok(0);
    }

    let reward = settlement.reward;
    settlement.commit(pool, user_stake, now);
    Ok(reward)
}

/// Earmark `amount` freshly deposited tokens for reward payouts.
/// Allowed while paused.
pub fn fund_reward_pool(pool: &mut StakePool, caller: &Pubkey, amount: u64) -> Result<u64> {
    pool.require_owner(caller)?;
    require!(amount > 0, StakingError::ZeroAmount);

    pool.reward_pool = pool
        .reward_pool
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;
    Ok(pool.reward_pool)
}


#[cfg(test)]
mod conservation {
    //! Random operation sequences against an in-memory vault.

    use super::*;
    use crate::constants::SECONDS_PER_YEAR;
    use proptest::prelude::*;

    const STAKERS: usize = 3;
    const WALLET: u64 = 1_000_000_000_000_000;

    #[derive(Debug, Clone)]
    enum Op {
        Stake { who: usize, amount: u64 },
        Unstake { who: usize },
        Claim { who: usize },
        Fund { amount: u64 },
        Advance { seconds: i64 },
        SetRate { rate: u128 },
        Pause,
        Unpause,
    }

    fn op() -> impl Strategy<Value = Op> {
        let max_rate = 20 * FIXED_POINT_SCALE / SECONDS_PER_YEAR as u128;
        prop_oneof![
            (0..STAKERS, 0..1_000_000_000_000u64).prop_map(|(who, amount)| Op::Stake { who, amount }),
            (0..STAKERS).prop_map(|who| Op::Unstake { who }),
            (0..STAKERS).prop_map(|who| Op::Claim { who }),
            (0..10_000_000_000_000u64).prop_map(|amount| Op::Fund { amount }),
            (0..SECONDS_PER_YEAR).prop_map(|seconds| Op::Advance { seconds }),
            (0..=max_rate).prop_map(|rate| Op::SetRate { rate }),
            Just(Op::Pause),
            Just(Op::Unpause),
        ]
    }

    struct Ledger {
        owner: Pubkey,
        pool: StakePool,
        positions: Vec<UserStake>,
        wallets: Vec<u64>,
        vault: u64,
        now: i64,
    }

    impl Ledger {
        fn new() -> Self {
            let owner = Pubkey::new_unique();
            Self {
                owner,
                pool: StakePool {
                    owner,
                    ..StakePool::default()
                },
                positions: vec![UserStake::default(); STAKERS],
                wallets: vec![WALLET; STAKERS],
                vault: 0,
                now: 1_700_000_000,
            }
        }

        fn apply(&mut self, op: &Op) {
            let pool_before = self.pool.clone();
            let positions_before = self.positions.clone();

            let result = match *op {
                Op::Stake { who, amount } => {
                    if self.wallets[who] < amount {
                        return;
                    }
                    stake(&mut self.pool, &mut self.positions[who], amount, self.now).map(|r| {
                        self.wallets[who] = self.wallets[who] - amount + r.reward_paid;
                        self.vault = self.vault + amount - r.reward_paid;
                    })
                }
                Op::Unstake { who } => {
                    unstake(&mut self.pool, &mut self.positions[who], self.now).map(|r| {
                        self.wallets[who] += r.payout;
                        self.vault -= r.payout;
                    })
                }
                Op::Claim { who } => {
                    claim_reward(&mut self.pool, &mut self.positions[who], self.now).map(|reward| {
                        self.wallets[who] += reward;
                        self.vault -= reward;
                    })
                }
                Op::Fund { amount } => {
                    let owner = self.owner;
                    fund_reward_pool(&mut self.pool, &owner, amount).map(|_| self.vault += amount)
                }
                Op::Advance { seconds } => {
                    self.now += seconds;
                    Ok(())
                }
                Op::SetRate { rate } => {
                    let owner = self.owner;
                    self.pool.set_reward_rate(&owner, rate).map(|_| ())
                }
                Op::Pause => {
                    let owner = self.owner;
                    self.pool.pause(&owner)
                }
                Op::Unpause => {
                    let owner = self.owner;
                    self.pool.unpause(&owner)
                }
            };

            if result.is_err() {
                assert_eq!(self.pool, pool_before, "{op:?} failed but changed the pool");
                assert_eq!(self.positions, positions_before, "{op:?} failed but changed a position");
            }
        }

        fn check_invariants(&self) {
            let staked: u64 = self.positions.iter().map(|p| p.balance).sum();
            assert_eq!(self.pool.total_staked, staked);
            assert_eq!(self.vault, self.pool.total_staked + self.pool.reward_pool);

            let active = self.positions.iter().filter(|p| p.is_active()).count() as u64;
            assert_eq!(self.pool.staker_count, active);

            let claimed: u64 = self.positions.iter().map(|p| p.total_rewards_claimed).sum();
            assert_eq!(self.pool.total_rewards_paid, claimed);

            let held: u64 = self.wallets.iter().sum();
            assert_eq!(held + staked, WALLET * STAKERS as u64 + claimed);
        }
    }

    proptest! {
        #[test]
        fn funds_are_conserved(ops in prop::collection::vec(op(), 1..60)) {
            let mut ledger = Ledger::new();
            for op in &ops {
                ledger.apply(op);
                ledger.check_invariants();
            }
        }

        #[test]
        fn pending_doubles_with_elapsed_time(
            balance in 1..1_000_000_000_000_000u64,
            rate in 0..=(20 * FIXED_POINT_SCALE / SECONDS_PER_YEAR as u128),
            elapsed in 0..SECONDS_PER_YEAR,
        ) {
            let once = calculate_pending_reward(balance, 0, elapsed, rate);
            let twice = calculate_pending_reward(balance, 0, 2 * elapsed, rate);
            prop_assert!(twice >= 2 * once && twice - 2 * once <= 1);
        }
    }
}
