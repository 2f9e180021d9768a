use anchor_lang::error::Error;
use anchor_lang::prelude::Result;

use crate::error::KratosError;

/// Assert that `result` failed with the given program error
pub fn assert_kratos_error<T: std::fmt::Debug>(result: Result<T>, expected: KratosError) {
    let expected_name = format!("{:?}", expected);
    let expected_code = u32::from(expected);

    match result {
        Err(Error::AnchorError(error)) => {
            assert_eq!(
                error.error_code_number, expected_code,
                "expected {}, got {}",
                expected_name, error.error_name
            );
        }
        other => panic!("expected {}, got {:?}", expected_name, other),
    }
}
