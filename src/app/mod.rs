//! Usage: Application layer (Tauri-managed state, window hosting, platform adapters, lifecycle).

pub(crate) mod app_state;
pub(crate) mod browser_host;
pub(crate) mod cleanup;
pub(crate) mod logging;
pub(crate) mod platform;
