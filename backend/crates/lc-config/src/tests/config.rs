use crate::tests::{EnvGuard, setup_config_dir};
use crate::{CONFIG_FILENAME, Config, ConfigError};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, none, ok};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(config.server.redirect_port, eq(crate::DEFAULT_REDIRECT_PORT));
    assert_that!(config.server.https_on, eq(false));
    assert_that!(config.retry.retries, eq(crate::retry_config::DEFAULT_RETRIES));
    assert_that!(config.probe.max_attempts, eq(20));
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join(CONFIG_FILENAME),
        r#"
            [server]
            https_on = true
            https_port = 8443
            redirect_port = 8080

            [tls]
            cert_path = "tls/cert.pem"
            key_path = "tls/key.pem"

            [database]
            service_name = "MongoDB"
            manage = true

            [logging]
            level = "debug"
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.https_on, eq(true));
    assert_that!(config.server.app_port(), eq(8443));
    assert_that!(config.server.redirect_port, eq(8080));
    assert_that!(config.database.service_name, eq("MongoDB"));
    assert_that!(config.database.manage, eq(true));
    assert_that!(config.logging.level.0, eq(LevelFilter::Debug));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_toml_and_env_when_load_then_env_wins() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join(CONFIG_FILENAME),
        "[server]\nport = 9000\n",
    )
    .unwrap();
    let _port = EnvGuard::set("LC_SERVER_PORT", "9100");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9100));
}

#[test]
#[serial]
fn given_unparseable_env_value_when_load_then_keeps_default() {
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("LC_SERVER_PORT", "not-a-port");

    let config = Config::load().unwrap();

    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
}

#[test]
#[serial]
fn given_invalid_log_level_when_load_then_falls_back_to_info() {
    let (_temp, _guard) = setup_config_dir();
    let _level = EnvGuard::set("LC_LOG_LEVEL", "loud");

    let config = Config::load().unwrap();

    assert_that!(config.logging.level.0, eq(LevelFilter::Info));
}

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join(CONFIG_FILENAME),
        "this is not valid toml {{{{",
    )
    .unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::Toml { .. }));
    assert_that!(err.to_string(), contains_substring(CONFIG_FILENAME));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_created() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let nested = temp.path().join("nested").join("dir");
    let _dir = EnvGuard::set("LC_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.exists());
}

#[test]
#[serial]
fn given_no_log_file_when_log_file_path_then_none() {
    let (_temp, _guard) = setup_config_dir();

    let config = Config::load().unwrap();

    assert_that!(config.log_file_path().unwrap(), none());
}

#[test]
#[serial]
fn given_log_file_when_log_file_path_then_under_config_dir() {
    let (temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("LC_LOG_FILE", "server.log");

    let config = Config::load().unwrap();

    assert_eq!(
        config.log_file_path().unwrap(),
        Some(temp.path().join("log").join("server.log"))
    );
}
