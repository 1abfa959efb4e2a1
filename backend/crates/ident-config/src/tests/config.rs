use crate::Config;
use crate::tests::{EnvGuard, TEST_JWT_SECRET, required_env, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, none, ok, some};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(config.server.host.as_str(), eq(crate::DEFAULT_HOST));
    assert_that!(config.database.timeout_secs, eq(5));
    assert_that!(config.oauth.provider.as_str(), eq("google"));
    assert_that!(config.session.secure, eq(false));
}

#[test]
#[serial]
fn given_required_env_when_load_and_validate_then_ok() {
    // Given
    let _temp = setup_config_dir();
    let _env = required_env();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(config.auth.jwt_secret.as_deref(), some(eq(TEST_JWT_SECRET)));
}

#[test]
#[serial]
fn given_no_secrets_when_validate_then_error_names_jwt_secret() {
    // Given
    let _temp = setup_config_dir();
    let _secret = EnvGuard::remove("IDENT_AUTH_JWT_SECRET");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(config.auth.jwt_secret.as_deref(), none());
    assert_that!(
        result.unwrap_err().to_string(),
        contains_substring("auth.jwt_secret is required")
    );
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_ok_and_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [server]
            port = 9000

            [database]
            timeout_secs = 3

            [frontend]
            base_url = "https://slides.example.com"
            login_url = "https://slides.example.com/login"
        "#,
    )
    .unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(9000));
    assert_that!(config.database.timeout_secs, eq(3));
    assert_that!(
        config.frontend.home_url().as_str(),
        eq("https://slides.example.com/home")
    );
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [server]
            port = 9000
        "#,
    )
    .unwrap();
    let _port = EnvGuard::set("IDENT_SERVER_PORT", "9100");
    let _secure = EnvGuard::set("IDENT_SESSION_SECURE", "1");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9100));
    assert_that!(config.session.secure, eq(true));
}

#[test]
#[serial]
fn given_invalid_toml_when_load_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server\nport = ").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_is_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested").join("ident");
    let _guard = EnvGuard::set("IDENT_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(nested.exists(), eq(true));
}

#[test]
#[serial]
fn given_config_dir_when_database_path_then_joined_to_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let config = Config::load().unwrap();

    // When
    let path = config.database_path().unwrap();

    // Then
    assert_that!(path, eq(&temp.path().join("identity.db")));
}

#[test]
#[serial]
fn given_host_and_port_when_bind_addr_then_formatted() {
    // Given
    let _temp = setup_config_dir();
    let _host = EnvGuard::set("IDENT_SERVER_HOST", "0.0.0.0");
    let _port = EnvGuard::set("IDENT_SERVER_PORT", "8080");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.bind_addr().as_str(), eq("0.0.0.0:8080"));
}
