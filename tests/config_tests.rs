use bizops_rs::config::Config;
use bizops_rs::currency::Currency;
use rust_decimal_macros::dec;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_new_reads_working_directory() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[http]\nbase_url = \"https://api.test\"\n",
    )
    .unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let result = Config::new();

    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert_eq!(config.http.base_url.as_deref(), Some("https://api.test"));
}

#[test]
fn test_config_from_path_with_all_sections() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("bizops.toml");

    let config_content = r#"
[http]
base_url = "https://api.test/v1"
request_timeout_secs = 15
auth_token = "secret"

[retry]
max_retries = 5
base_delay_ms = 200

[currency]
currency = "USD"
max_value = 2500.5
allow_negative = true
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = Config::from_path(&config_path).unwrap();
    assert_eq!(config.http.base_url.as_deref(), Some("https://api.test/v1"));
    assert_eq!(config.http.request_timeout_secs, Some(15));
    assert_eq!(config.http.auth_token.as_deref(), Some("secret"));
    assert_eq!(config.retry.max_retries, 5);
    assert_eq!(config.retry.base_delay_ms, 200);
    assert_eq!(config.currency.currency, Currency::Usd);
    assert_eq!(config.currency.max_value, Some(dec!(2500.5)));
    assert!(config.currency.allow_negative);
}

#[test]
fn test_integer_max_value() {
    let config = Config::from_toml_str("[currency]\nmax_value = 100000\n").unwrap();
    assert_eq!(config.currency.max_value, Some(dec!(100000)));
}

#[test]
fn test_config_with_missing_file() {
    let dir = tempdir().unwrap();
    let result = Config::from_path(dir.path().join("missing.toml"));
    assert!(result.is_err());
}

#[test]
fn test_config_with_invalid_toml() {
    let result = Config::from_toml_str("[retry\nmax_retries = 3\n");
    assert!(result.is_err());
}

#[test]
fn test_config_with_unknown_currency() {
    let result = Config::from_toml_str("[currency]\ncurrency = \"EUR\"\n");
    assert!(result.is_err());
}

#[test]
fn test_config_clone() {
    let config = Config::from_toml_str("[retry]\nmax_retries = 1\n").unwrap();
    let cloned = config.clone();
    assert_eq!(config.retry, cloned.retry);
    assert_eq!(config.currency, cloned.currency);
}
