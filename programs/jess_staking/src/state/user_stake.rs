use anchor_lang::prelude::*;

use crate::accounting::calculate_pending_reward;

/// A single account's stake position in a pool.
///
/// A position with `balance == 0` is treated as absent and its
/// `stake_time` carries no meaning.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct UserStake {
    pub owner: Pubkey,
    pub stake_pool: Pubkey,

    pub balance: u64,
    /// Start of the current (unsettled) accrual period.
    pub stake_time: i64,

    pub total_rewards_claimed: u64,

    pub bump: u8,
}

impl UserStake {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 1;

    pub fn is_active(&self) -> bool {
        self.balance > 0
    }

    /// Reward accrued since `stake_time` at `rate`. Read-only and never
    /// fails; see [`calculate_pending_reward`].
    pub fn pending_reward(&self, now: i64, rate: u128) -> u64 {
        calculate_pending_reward(self.balance, self.stake_time, now, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FIXED_POINT_SCALE, SECONDS_PER_DAY};

    #[test]
    fn pending_reward_saturates_instead_of_failing() {
        // 10e18 * 1e18 / 31536000 on 100 tokens of a 9-decimal mint
        let rate = 10 * FIXED_POINT_SCALE * FIXED_POINT_SCALE / 31_536_000;
        let position = UserStake {
            balance: 100_000_000_000,
            stake_time: 0,
            ..UserStake::default()
        };

        assert_eq!(position.pending_reward(SECONDS_PER_DAY, rate), u64::MAX);
        assert_eq!(position.pending_reward(i64::MAX, u128::MAX), u64::MAX);
    }

    #[test]
    fn closed_position_accrues_nothing() {
        let position = UserStake {
            stake_time: 0,
            ..UserStake::default()
        };

        assert!(!position.is_active());
        assert_eq!(position.pending_reward(SECONDS_PER_DAY, FIXED_POINT_SCALE), 0);
    }
}
