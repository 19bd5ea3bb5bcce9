//! Usage: Resolve per-app config/log directories.

use std::path::PathBuf;
use tauri::Manager;

pub fn app_config_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let dir = app
        .path()
        .app_config_dir()
        .map_err(|e| format!("APP_PATHS: failed to resolve app config dir: {e}"))?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("APP_PATHS: failed to create app config dir: {e}"))?;
    Ok(dir)
}

pub fn app_log_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("APP_PATHS: failed to resolve app log dir: {e}"))?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("APP_PATHS: failed to create app log dir: {e}"))?;
    Ok(dir)
}
