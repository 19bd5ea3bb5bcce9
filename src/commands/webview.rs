//! Usage: Content bridge commands (messages, load progress, HTTP errors, state query).

use crate::app_state::ShellState;
use crate::shell::ShellSnapshot;

#[tauri::command]
pub(crate) fn webview_message(state: tauri::State<'_, ShellState>, data: String) {
    let controller = state.controller();
    // Each message is handled independently; nothing waits for the backend round-trip.
    tauri::async_runtime::spawn(async move {
        controller.handle_content_message(&data).await;
    });
}

#[tauri::command]
pub(crate) fn webview_load_progress(state: tauri::State<'_, ShellState>, progress: f64) {
    state.controller().on_load_progress(progress);
}

#[tauri::command]
pub(crate) fn webview_http_error(state: tauri::State<'_, ShellState>, status: u16, url: String) {
    state.controller().on_http_error(status, &url);
}

#[tauri::command]
pub(crate) fn shell_state_get(state: tauri::State<'_, ShellState>) -> ShellSnapshot {
    state.controller().snapshot()
}
