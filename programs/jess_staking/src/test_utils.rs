use anchor_lang::error::Error;
use anchor_lang::Result;

use crate::error::StakingError;

/// Assert that `result` failed with the given program error code.
pub fn assert_staking_error<T: std::fmt::Debug>(result: Result<T>, expected: StakingError) {
    match result.unwrap_err() {
        Error::AnchorError(e) => assert_eq!(
            e.error_code_number,
            u32::from(expected),
            "expected {expected}, got {}",
            e.error_name
        ),
        other => panic!("expected {expected}, got {other:?}"),
    }
}
