//! Usage: Tauri command surface exposed to the hosted content through the bridge script.

mod webview;

pub(crate) use webview::*;
