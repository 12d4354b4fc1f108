//! Instruction handlers for the JESS staking program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod claim_reward;
pub mod fund_reward_pool;
pub mod initialize;
pub mod stake;
pub mod unstake;
pub mod views;

pub use admin::*;
pub use claim_reward::*;
pub use fund_reward_pool::*;
pub use initialize::*;
pub use stake::*;
pub use unstake::*;
pub use views::*;
