mod app;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use app::{app_state, browser_host};
pub(crate) use domain::{backend_sync, connectivity, push_token, shell};
pub(crate) use infra::{app_paths, backend_client, push_plugin, reachability, settings};
pub(crate) use shared::blocking;

use commands::*;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(push_plugin::init());

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
        browser_host::focus_main_window(app);
    }));

    let app = builder
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                if window.label() == browser_host::MAIN_WINDOW_LABEL {
                    crate::app::cleanup::teardown(window.app_handle());
                }
            }
        })
        .setup(|app| {
            crate::app::logging::init(app.handle());

            let shell_settings = match settings::read(app.handle()) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!("settings read failed, using defaults: {}", err);
                    settings::ShellSettings::default()
                }
            };
            tracing::info!(
                content_url = %shell_settings.content_url,
                backend_url = %shell_settings.backend_url,
                "starting shell"
            );

            let state = app_state::ShellState::new(app.handle(), &shell_settings)?;
            app.manage(state);

            let content_url = tauri::Url::parse(&shell_settings.content_url)
                .map_err(|e| format!("SEC_INVALID_INPUT: invalid content_url: {e}"))?;
            browser_host::create_main_window(app.handle(), content_url)?;

            app.state::<app_state::ShellState>().mount();
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            webview_message,
            webview_load_progress,
            webview_http_error,
            shell_state_get
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            tracing::info!("exit requested, tearing down shell");
            crate::app::cleanup::teardown(app_handle);
        }
    });
}
