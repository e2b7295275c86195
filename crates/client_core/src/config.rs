use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::TopN;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "venomics.toml";
pub const PREDICT_PATH: &str = "/predict";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub server_url: String,
    pub top_n: TopN,
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            top_n: TopN::default(),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    top_n: Option<toml::Value>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `venomics.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();

    match load_file_settings(Path::new(SETTINGS_FILE)) {
        Ok(Some(file_cfg)) => apply_file_settings(&mut settings, file_cfg),
        Ok(None) => {}
        Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn load_file_settings(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.top_n {
        let parsed = match &v {
            toml::Value::Integer(n) => n.to_string().parse::<TopN>(),
            toml::Value::String(s) => s.parse::<TopN>(),
            other => other.to_string().parse::<TopN>(),
        };
        match parsed {
            Ok(top_n) => settings.top_n = top_n,
            Err(error) => warn!(%error, "ignoring top_n from settings file"),
        }
    }
    if let Some(secs) = file_cfg.request_timeout_secs {
        settings.request_timeout = timeout_from_secs(secs);
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("VENOMICS_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__TOP_N") {
        match v.parse::<TopN>() {
            Ok(top_n) => settings.top_n = top_n,
            Err(error) => warn!(%error, "ignoring APP__TOP_N"),
        }
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(secs) => settings.request_timeout = timeout_from_secs(secs),
            Err(error) => warn!(%error, value = %v, "ignoring APP__REQUEST_TIMEOUT_SECS"),
        }
    }
}

/// Zero disables the timeout.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

pub fn normalize_server_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return ClientSettings::default().server_url;
    }
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Resolves the prediction endpoint against the server base URL.
pub fn predict_url(server_url: &str) -> anyhow::Result<Url> {
    let base = normalize_server_url(server_url);
    let base = Url::parse(&format!("{base}/"))
        .with_context(|| format!("invalid server url '{server_url}'"))?;
    base.join(PREDICT_PATH.trim_start_matches('/'))
        .with_context(|| format!("cannot build prediction url from '{server_url}'"))
}
