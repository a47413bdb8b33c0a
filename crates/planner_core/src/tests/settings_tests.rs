use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("meal_planner_{tag}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_when_no_file_and_no_env() {
    let dir = temp_dir("defaults");
    let settings =
        load_settings_from(&dir.join("missing.toml"), env_from(&[])).expect("load settings");

    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.api_base_url, "http://localhost:8000");

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn file_values_apply_and_env_overrides_them() {
    let dir = temp_dir("layered");
    let path = dir.join("planner.toml");
    fs::write(
        &path,
        "api_base_url = \"http://planner.internal:9000/\"\nrequest_timeout_secs = 30\n",
    )
    .expect("write settings");

    let from_file = load_settings_from(&path, env_from(&[])).expect("file settings");
    assert_eq!(from_file.api_base_url, "http://planner.internal:9000");
    assert_eq!(from_file.request_timeout, Some(Duration::from_secs(30)));

    let overridden = load_settings_from(
        &path,
        env_from(&[
            ("MEAL_PLANNER_API_URL", "https://plans.example.com"),
            ("MEAL_PLANNER_TIMEOUT_SECS", "0"),
        ]),
    )
    .expect("env settings");
    assert_eq!(overridden.api_base_url, "https://plans.example.com");
    assert_eq!(overridden.request_timeout, None);

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn prefixed_env_wins_over_short_name() {
    let dir = temp_dir("prefixed");
    let settings = load_settings_from(
        &dir.join("planner.toml"),
        env_from(&[
            ("MEAL_PLANNER_API_URL", "http://short:1"),
            ("APP__API_BASE_URL", "http://prefixed:2"),
        ]),
    )
    .expect("load settings");

    assert_eq!(settings.api_base_url, "http://prefixed:2");
    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn malformed_file_is_reported() {
    let dir = temp_dir("malformed");
    let path = dir.join("planner.toml");
    fs::write(&path, "api_base_url = [").expect("write settings");

    let err = load_settings_from(&path, env_from(&[])).expect_err("parse failure");
    assert!(matches!(err, SettingsError::Parse { .. }));

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn bad_timeout_env_is_reported() {
    let dir = temp_dir("timeout");
    let err = load_settings_from(
        &dir.join("planner.toml"),
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    )
    .expect_err("timeout failure");
    assert!(matches!(err, SettingsError::Timeout { .. }));

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn base_url_normalization() {
    assert_eq!(
        normalize_base_url("  http://localhost:8000///  ").expect("trim"),
        "http://localhost:8000"
    );
    assert_eq!(normalize_base_url("").expect("blank"), DEFAULT_API_BASE_URL);
    assert_eq!(
        normalize_base_url("https://api.example.com/v1/").expect("path"),
        "https://api.example.com/v1"
    );

    assert!(matches!(
        normalize_base_url("localhost:8000"),
        Err(SettingsError::BaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("ftp://files.example.com"),
        Err(SettingsError::BaseUrl { .. })
    ));
}
