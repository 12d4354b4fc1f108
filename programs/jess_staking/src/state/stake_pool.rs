use anchor_lang::prelude::*;

use crate::error::StakingError;

#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct StakePool {
    pub owner: Pubkey,
    /// Nominee of an in-flight two-step ownership transfer.
    pub pending_owner: Option<Pubkey>,

    pub staking_mint: Pubkey,
    pub pool_vault: Pubkey,

    pub total_staked: u64,
    /// Tokens in `pool_vault` earmarked for reward payouts.
    pub reward_pool: u64,
    /// Scaled by `FIXED_POINT_SCALE`.
    pub reward_rate_per_token_per_second: u128,

    pub total_rewards_paid: u64,
    pub staker_count: u64,

    pub paused: bool,

    pub last_updated: i64,
    pub created_at: i64,

    pub vault_bump: u8,
    pub bump: u8,
}

/// Pool-wide counters returned by the `staking_info` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub total_staked: u64,
    pub reward_pool: u64,
    pub reward_rate_per_token_per_second: u128,
    pub paused: bool,
    pub staker_count: u64,
    pub total_rewards_paid: u64,
}

impl StakePool {
    pub const LEN: usize = 8
        + 32
        + (1 + 32)
        + (32 * 2)
        + (8 * 2)
        + 16
        + (8 * 2)
        + 1
        + (8 * 2)
        + 2;

    pub fn info(&self) -> PoolSnapshot {
        PoolSnapshot {
            total_staked: self.total_staked,
            reward_pool: self.reward_pool,
            reward_rate_per_token_per_second: self.reward_rate_per_token_per_second,
            paused: self.paused,
            staker_count: self.staker_count,
            total_rewards_paid: self.total_rewards_paid,
        }
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, StakingError::Unauthorized);
        Ok(())
    }

    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.paused, StakingError::EnforcedPause);
        Ok(())
    }

    /// Pauses the pool. Fails if it is already paused.
    pub fn pause(&mut self, caller: &Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        self.require_not_paused()?;
        self.paused = true;
        Ok(())
    }

    /// Unpauses the pool. Fails if it is not paused.
    pub fn unpause(&mut self, caller: &Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        require!(self.paused, StakingError::ExpectedPause);
        self.paused = false;
        Ok(())
    }

    /// Replaces the reward rate. No position is settled; the new rate
    /// prices each position's whole unsettled interval at its next
    /// settlement.
    pub fn set_reward_rate(&mut self, caller: &Pubkey, rate: u128) -> Result<u128> {
        self.require_owner(caller)?;
        let previous = self.reward_rate_per_token_per_second;
        self.reward_rate_per_token_per_second = rate;
        Ok(previous)
    }

    /// First step of an ownership handover. Nominating the default
    /// pubkey cancels any pending nomination.
    pub fn propose_owner(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        self.pending_owner = if new_owner == Pubkey::default() {
            None
        } else {
            Some(new_owner)
        };
        Ok(())
    }

    /// Second step of an ownership handover, callable only by the nominee.
    /// Returns the previous owner.
    pub fn accept_owner(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        match self.pending_owner {
            Some(nominee) if nominee == *caller => {
                let previous = self.owner;
                self.owner = nominee;
                self.pending_owner = None;
                Ok(previous)
            }
            _ => err!(StakingError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_staking_error;

    fn pool_owned_by(owner: Pubkey) -> StakePool {
        StakePool {
            owner,
            ..StakePool::default()
        }
    }

    #[test]
    fn only_owner_can_pause_and_unpause() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut pool = pool_owned_by(owner);

        assert_staking_error(pool.pause(&stranger), StakingError::Unauthorized);
        pool.pause(&owner).unwrap();
        assert!(pool.paused);

        assert_staking_error(pool.unpause(&stranger), StakingError::Unauthorized);
        assert!(pool.paused);
        pool.unpause(&owner).unwrap();
        assert!(!pool.paused);
    }

    #[test]
    fn pause_toggles_are_not_idempotent() {
        let owner = Pubkey::new_unique();
        let mut pool = pool_owned_by(owner);

        assert_staking_error(pool.unpause(&owner), StakingError::ExpectedPause);
        pool.pause(&owner).unwrap();
        assert_staking_error(pool.pause(&owner), StakingError::EnforcedPause);
    }

    #[test]
    fn reward_rate_is_owner_only_and_accepts_zero() {
        let owner = Pubkey::new_unique();
        let mut pool = pool_owned_by(owner);

        assert_staking_error(
            pool.set_reward_rate(&Pubkey::new_unique(), 0),
            StakingError::Unauthorized,
        );
        assert_eq!(pool.set_reward_rate(&owner, 42).unwrap(), 0);
        assert_eq!(pool.set_reward_rate(&owner, 0).unwrap(), 42);
        assert_eq!(pool.reward_rate_per_token_per_second, 0);
    }

    #[test]
    fn ownership_moves_in_two_steps() {
        let owner = Pubkey::new_unique();
        let nominee = Pubkey::new_unique();
        let mut pool = pool_owned_by(owner);

        pool.propose_owner(&owner, nominee).unwrap();
        assert_eq!(pool.owner, owner);
        assert_eq!(pool.pending_owner, Some(nominee));

        assert_eq!(pool.accept_owner(&nominee).unwrap(), owner);
        assert_eq!(pool.owner, nominee);
        assert_eq!(pool.pending_owner, None);

        assert_staking_error(pool.set_reward_rate(&owner, 1), StakingError::Unauthorized);
    }

    #[test]
    fn only_nominee_can_accept() {
        let owner = Pubkey::new_unique();
        let nominee = Pubkey::new_unique();
        let mut pool = pool_owned_by(owner);

        assert_staking_error(pool.accept_owner(&nominee), StakingError::Unauthorized);

        assert_staking_error(
            pool.propose_owner(&nominee, nominee),
            StakingError::Unauthorized,
        );
        pool.propose_owner(&owner, nominee).unwrap();
        assert_staking_error(pool.accept_owner(&owner), StakingError::Unauthorized);
        assert_staking_error(
            pool.accept_owner(&Pubkey::new_unique()),
            StakingError::Unauthorized,
        );
        assert_eq!(pool.owner, owner);
    }

    #[test]
    fn proposing_default_key_cancels_nomination() {
        let owner = Pubkey::new_unique();
        let nominee = Pubkey::new_unique();
        let mut pool = pool_owned_by(owner);

        pool.propose_owner(&owner, nominee).unwrap();
        pool.propose_owner(&owner, Pubkey::default()).unwrap();
        assert_eq!(pool.pending_owner, None);
        assert_staking_error(pool.accept_owner(&nominee), StakingError::Unauthorized);
    }

    #[test]
    fn info_reports_pool_counters() {
        let pool = StakePool {
            total_staked: 300,
            reward_pool: 70,
            reward_rate_per_token_per_second: 9,
            paused: true,
            staker_count: 2,
            total_rewards_paid: 30,
            ..StakePool::default()
        };

        assert_eq!(
            pool.info(),
            PoolSnapshot {
                total_staked: 300,
                reward_pool: 70,
                reward_rate_per_token_per_second: 9,
                paused: true,
                staker_count: 2,
                total_rewards_paid: 30,
            }
        );
    }
}
