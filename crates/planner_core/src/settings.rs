use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::SettingsError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const SETTINGS_FILE: &str = "planner.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Loads settings from `planner.toml` in the working directory and the
/// process environment.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file (if present), then environment
/// overrides. `APP__*` variables win over the short names.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let mut settings = ClientSettings::default();
    let mut raw_base_url = settings.api_base_url.clone();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings =
                toml::from_str(&raw).map_err(|source| SettingsError::Parse {
                    path: path.display().to_string(),
                    source,
                })?;
            if let Some(v) = file_cfg.api_base_url {
                raw_base_url = v;
            }
            if let Some(secs) = file_cfg.request_timeout_secs {
                settings.request_timeout = timeout_from_secs(secs);
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    }

    if let Some(v) = env("MEAL_PLANNER_API_URL") {
        raw_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        raw_base_url = v;
    }

    for key in ["MEAL_PLANNER_TIMEOUT_SECS", "APP__REQUEST_TIMEOUT_SECS"] {
        if let Some(v) = env(key) {
            let secs = v
                .trim()
                .parse::<u64>()
                .map_err(|_| SettingsError::Timeout { value: v.clone() })?;
            settings.request_timeout = timeout_from_secs(secs);
        }
    }

    settings.api_base_url = normalize_base_url(&raw_base_url)?;
    Ok(settings)
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Trims whitespace and trailing slashes; blank input falls back to the
/// default. The result must be an absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_API_BASE_URL.to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|err| SettingsError::BaseUrl {
        value: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SettingsError::BaseUrl {
            value: raw.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(SettingsError::BaseUrl {
            value: raw.to_string(),
            reason: "missing host".into(),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
