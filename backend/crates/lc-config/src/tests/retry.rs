use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Retry
// =========================================================================

#[test]
#[serial]
fn given_zero_retries_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _retries = EnvGuard::set("LC_RETRY_RETRIES", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_retries_over_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _retries = EnvGuard::set("LC_RETRY_RETRIES", "51");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_delay_below_min_when_validate_then_error() {
    let (_temp, _guard) = setup_config_dir();
    let _delay = EnvGuard::set("LC_RETRY_DELAY_MS", "5");

    let config = Config::load().unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_valid_delay_when_retry_delay_then_duration_matches() {
    let (_temp, _guard) = setup_config_dir();
    let _delay = EnvGuard::set("LC_RETRY_DELAY_MS", "250");

    let config = Config::load().unwrap();

    assert_that!(config.retry.retry_delay(), eq(Duration::from_millis(250)));
}
