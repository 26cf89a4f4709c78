//! Assertion helpers with readable failure messages.

use sui_ptb::types::encoding::base64_encode;

/// Assert that `bytes` encode to `expected` base64.
#[allow(dead_code)]
pub fn assert_base64_eq(bytes: &[u8], expected: &str, context: &str) {
    let actual = base64_encode(bytes);
    assert_eq!(
        actual, expected,
        "{}: bytes differ\n  actual:   {}\n  expected: {}",
        context, actual, expected
    );
}

/// Assert that an error's display text contains `needle`.
#[allow(dead_code)]
pub fn assert_error_contains<E: std::fmt::Display>(err: &E, needle: &str) {
    let msg = err.to_string();
    assert!(
        msg.contains(needle),
        "expected error containing '{}', got '{}'",
        needle,
        msg
    );
}
