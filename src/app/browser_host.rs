//! Usage: Browser Host window. Creates the main webview on the remote content address, injects
//! the content bridge and forwards page-load lifecycle events to the controller.

use super::app_state::ShellState;
use tauri::webview::PageLoadEvent;
use tauri::Manager;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
#[cfg(desktop)]
const WINDOW_TITLE: &str = "OnDemand";

/// Runs at document start in the top frame. `window.ReactNativeWebView.postMessage` keeps the
/// hosted site's existing calls working; readyState and Navigation Timing give coarse progress
/// and the top-level HTTP status.
const BRIDGE_SCRIPT: &str = r#"
(function () {
  if (window.__ONDEMAND_SHELL_BRIDGE__) return;
  window.__ONDEMAND_SHELL_BRIDGE__ = true;

  function invoke(cmd, args) {
    var internals = window.__TAURI_INTERNALS__;
    if (!internals || typeof internals.invoke !== 'function') return;
    try {
      var pending = internals.invoke(cmd, args);
      if (pending && typeof pending.catch === 'function') pending.catch(function () {});
    } catch (_) {}
  }

  window.ReactNativeWebView = {
    postMessage: function (data) {
      invoke('webview_message', { data: String(data) });
    }
  };

  var PROGRESS = { loading: 0.1, interactive: 0.7, complete: 1 };
  function reportProgress() {
    var value = PROGRESS[document.readyState];
    if (typeof value === 'number') invoke('webview_load_progress', { progress: value });
  }
  reportProgress();
  document.addEventListener('readystatechange', reportProgress);

  window.addEventListener('load', function () {
    if (!window.performance || typeof performance.getEntriesByType !== 'function') return;
    var entries = performance.getEntriesByType('navigation');
    var status = entries.length ? entries[0].responseStatus : 0;
    if (typeof status === 'number' && status >= 400) {
      invoke('webview_http_error', { status: status, url: String(location.href) });
    }
  });
})();
"#;

const OFFLINE_PLACEHOLDER_HTML: &str = r#"<!doctype html>
<html>
<head>
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>
  html, body { margin: 0; height: 100%; background: #f0f0f0; }
  body { display: flex; flex-direction: column; align-items: center; justify-content: center;
         font-family: -apple-system, Roboto, "Segoe UI", sans-serif; }
  .text { font-size: 18px; color: #000; margin-bottom: 10px; }
  .spinner { width: 36px; height: 36px; border: 4px solid #c8c8ff; border-top-color: #0000ff;
             border-radius: 50%; animation: spin 0.9s linear infinite; }
  @keyframes spin { to { transform: rotate(360deg); } }
</style>
</head>
<body>
  <div class="text">No Internet Connection</div>
  <div class="spinner"></div>
</body>
</html>"#;

pub(crate) fn offline_placeholder_script() -> String {
    let html = serde_json::to_string(OFFLINE_PLACEHOLDER_HTML)
        .unwrap_or_else(|_| "\"No Internet Connection\"".to_string());
    format!("document.open();document.write({html});document.close();")
}

pub(crate) fn create_main_window(
    app: &tauri::AppHandle,
    content_url: tauri::Url,
) -> Result<tauri::WebviewWindow, String> {
    let handle = app.clone();
    let builder = tauri::WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW_LABEL,
        tauri::WebviewUrl::External(content_url),
    )
    .initialization_script(BRIDGE_SCRIPT)
    .on_page_load(move |_window, payload| {
        let Some(state) = handle.try_state::<ShellState>() else {
            return;
        };
        let controller = state.controller();
        match payload.event() {
            PageLoadEvent::Started => controller.on_load_start(),
            PageLoadEvent::Finished => controller.on_load_end(),
        }
    });

    #[cfg(desktop)]
    let builder = builder
        .title(WINDOW_TITLE)
        .inner_size(420.0, 860.0)
        .min_inner_size(320.0, 480.0);

    builder
        .build()
        .map_err(|e| format!("WINDOW_CREATE: {e}"))
}

#[cfg(desktop)]
pub(crate) fn focus_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    let _ = window.unminimize();
    let _ = window.show();
    let _ = window.set_focus();
}
