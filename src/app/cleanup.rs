//! Usage: Shell teardown hooks for window/app lifecycle events.

use super::app_state::ShellState;
use tauri::Manager;

/// Releases the reachability subscription. Safe to call more than once; in-flight permission,
/// token and HTTP calls are left to finish and their results are discarded.
pub(crate) fn teardown(app: &tauri::AppHandle) {
    let Some(state) = app.try_state::<ShellState>() else {
        return;
    };
    if state.unmount() {
        tracing::info!("shell teardown: reachability subscription released");
    }
}
