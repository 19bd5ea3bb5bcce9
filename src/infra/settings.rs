//! Usage: Shell settings (schema + read helpers). Defaults reproduce the production endpoints.

use crate::app_paths;
use crate::backend_sync::DEFAULT_LOGGED_OUT_USER_ID;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_CONTENT_URL: &str = "https://dev.dightinfotech.com/ondemand";
pub const DEFAULT_BACKEND_URL: &str = "https://dev.dightinfotech.com/ondemand/api/save-fcm-token";
const DEFAULT_REACHABILITY_PROBE_INTERVAL_SECONDS: u32 = 5;
const DEFAULT_REACHABILITY_PROBE_TIMEOUT_SECONDS: u32 = 5;
const MAX_REACHABILITY_PROBE_INTERVAL_SECONDS: u32 = 5 * 60;
const MAX_REACHABILITY_PROBE_TIMEOUT_SECONDS: u32 = 60;
const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    pub schema_version: u32,
    pub content_url: String,
    pub backend_url: String,
    pub logged_out_user_id: String,
    pub reachability_probe_interval_seconds: u32,
    pub reachability_probe_timeout_seconds: u32,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            content_url: DEFAULT_CONTENT_URL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            logged_out_user_id: DEFAULT_LOGGED_OUT_USER_ID.to_string(),
            reachability_probe_interval_seconds: DEFAULT_REACHABILITY_PROBE_INTERVAL_SECONDS,
            reachability_probe_timeout_seconds: DEFAULT_REACHABILITY_PROBE_TIMEOUT_SECONDS,
        }
    }
}

fn is_http_url(value: &str) -> bool {
    reqwest::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

fn sanitize_url(value: &mut String, default: &str, field: &str) -> bool {
    let trimmed = value.trim();
    if is_http_url(trimmed) {
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
            return true;
        }
        return false;
    }
    tracing::warn!(field, value = %value, "invalid url in settings, using default");
    *value = default.to_string();
    true
}

fn sanitize_urls(settings: &mut ShellSettings) -> bool {
    let mut changed = false;
    changed |= sanitize_url(&mut settings.content_url, DEFAULT_CONTENT_URL, "content_url");
    changed |= sanitize_url(&mut settings.backend_url, DEFAULT_BACKEND_URL, "backend_url");
    changed
}

fn sanitize_logged_out_user_id(settings: &mut ShellSettings) -> bool {
    if settings.logged_out_user_id.trim().is_empty() {
        settings.logged_out_user_id = DEFAULT_LOGGED_OUT_USER_ID.to_string();
        return true;
    }
    false
}

fn sanitize_reachability(settings: &mut ShellSettings) -> bool {
    let mut changed = false;

    if settings.reachability_probe_interval_seconds == 0 {
        settings.reachability_probe_interval_seconds = DEFAULT_REACHABILITY_PROBE_INTERVAL_SECONDS;
        changed = true;
    }
    if settings.reachability_probe_interval_seconds > MAX_REACHABILITY_PROBE_INTERVAL_SECONDS {
        settings.reachability_probe_interval_seconds = MAX_REACHABILITY_PROBE_INTERVAL_SECONDS;
        changed = true;
    }
    if settings.reachability_probe_timeout_seconds == 0 {
        settings.reachability_probe_timeout_seconds = DEFAULT_REACHABILITY_PROBE_TIMEOUT_SECONDS;
        changed = true;
    }
    if settings.reachability_probe_timeout_seconds > MAX_REACHABILITY_PROBE_TIMEOUT_SECONDS {
        settings.reachability_probe_timeout_seconds = MAX_REACHABILITY_PROBE_TIMEOUT_SECONDS;
        changed = true;
    }

    changed
}

fn sanitize(settings: &mut ShellSettings) -> bool {
    let mut repaired = false;
    repaired |= sanitize_urls(settings);
    repaired |= sanitize_logged_out_user_id(settings);
    repaired |= sanitize_reachability(settings);
    if settings.schema_version != SCHEMA_VERSION {
        settings.schema_version = SCHEMA_VERSION;
        repaired = true;
    }
    repaired
}

fn parse_settings_json(content: &str) -> Result<(ShellSettings, bool), String> {
    let mut settings: ShellSettings = serde_json::from_str(content)
        .map_err(|e| format!("SETTINGS_PARSE: failed to parse {SETTINGS_FILE_NAME}: {e}"))?;
    let repaired = sanitize(&mut settings);
    Ok((settings, repaired))
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_config_dir(app)?.join(SETTINGS_FILE_NAME))
}

fn write_atomically(path: &Path, settings: &ShellSettings) -> Result<(), String> {
    let tmp_path = path.with_file_name(format!("{SETTINGS_FILE_NAME}.tmp"));
    let content = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("SETTINGS_WRITE: failed to serialize settings: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("SETTINGS_WRITE: failed to write temp settings file: {e}"))?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        format!("SETTINGS_WRITE: failed to finalize settings: {e}")
    })
}

fn read_from(path: &Path) -> Result<ShellSettings, String> {
    if !path.exists() {
        let settings = ShellSettings::default();
        // Best-effort: materialize defaults so the file is discoverable/editable.
        if let Err(err) = write_atomically(path, &settings) {
            tracing::debug!("default settings not persisted: {}", err);
        }
        return Ok(settings);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("SETTINGS_READ: failed to read settings: {e}"))?;
    let (settings, repaired) = parse_settings_json(&content)?;
    if repaired {
        if let Err(err) = write_atomically(path, &settings) {
            tracing::debug!("repaired settings not persisted: {}", err);
        }
    }
    Ok(settings)
}

pub fn read(app: &tauri::AppHandle) -> Result<ShellSettings, String> {
    read_from(&settings_path(app)?)
}
