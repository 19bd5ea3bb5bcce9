//! Usage: Tauri implementation of the shell's platform seams.
//!
//! - permission / token: `tauri-plugin-notification` + the `push` plugin (blocking calls run off
//!   the async executor)
//! - alerts and the permission rationale: `tauri-plugin-dialog`
//! - view swaps: main webview window (`eval` for the placeholder, `navigate` to restore)
//! - state: `shell:state` event

use super::browser_host;
use crate::blocking;
use crate::connectivity::ShellView;
use crate::push_plugin::PushMessagingHandle;
use crate::push_token::{AuthorizationStatus, PromptCopy, PromptOutcome, PushMessaging};
use crate::shell::{ShellAlert, ShellSnapshot, ShellSurface};
use tauri::{Emitter, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_notification::{NotificationExt, PermissionState};

pub const SHELL_STATE_EVENT_NAME: &str = "shell:state";

fn authorization_from(state: PermissionState) -> AuthorizationStatus {
    match state {
        PermissionState::Granted => AuthorizationStatus::Authorized,
        PermissionState::Denied => AuthorizationStatus::Denied,
        _ => AuthorizationStatus::NotDetermined,
    }
}

fn prompt_outcome_from(state: PermissionState) -> PromptOutcome {
    match state {
        PermissionState::Granted => PromptOutcome::Granted,
        PermissionState::Denied => PromptOutcome::Denied,
        // Prompt dismissed without a decision.
        _ => PromptOutcome::Deferred,
    }
}

pub(crate) struct TauriPlatform {
    app: tauri::AppHandle,
    content_url: tauri::Url,
}

impl TauriPlatform {
    pub(crate) fn new(app: tauri::AppHandle, content_url: tauri::Url) -> Self {
        Self { app, content_url }
    }
}

impl PushMessaging for TauriPlatform {
    async fn request_permission(&self) -> Result<AuthorizationStatus, String> {
        let app = self.app.clone();
        blocking::run("push_request_permission", move || {
            app.notification()
                .request_permission()
                .map(authorization_from)
                .map_err(|e| format!("PUSH_PERMISSION: {e}"))
        })
        .await
    }

    async fn get_token(&self) -> Result<String, String> {
        let app = self.app.clone();
        blocking::run("push_get_token", move || {
            let Some(handle) = app.try_state::<PushMessagingHandle<tauri::Wry>>() else {
                return Err("PUSH_UNAVAILABLE: push plugin is not initialized".to_string());
            };
            handle.token()
        })
        .await
    }

    async fn prompt_notification_permission(
        &self,
        copy: &'static PromptCopy,
    ) -> Result<PromptOutcome, String> {
        let app = self.app.clone();
        blocking::run("notification_permission_prompt", move || {
            let notification = app.notification();
            let current = notification
                .permission_state()
                .map_err(|e| format!("PUSH_PROMPT: {e}"))?;
            if matches!(current, PermissionState::Granted) {
                return Ok(PromptOutcome::Granted);
            }

            let accepted = app
                .dialog()
                .message(copy.message)
                .title(copy.title)
                .kind(MessageDialogKind::Info)
                .buttons(MessageDialogButtons::OkCancelCustom(
                    copy.button_positive.to_string(),
                    copy.button_negative.to_string(),
                ))
                .blocking_show();
            if !accepted {
                return Ok(PromptOutcome::Denied);
            }

            notification
                .request_permission()
                .map(prompt_outcome_from)
                .map_err(|e| format!("PUSH_PROMPT: {e}"))
        })
        .await
    }
}

impl ShellSurface for TauriPlatform {
    fn alert(&self, alert: ShellAlert) {
        self.app
            .dialog()
            .message(alert.message())
            .title(alert.title())
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::Ok)
            .show(|_| {});
    }

    fn show_view(&self, view: ShellView) {
        let Some(window) = self
            .app
            .get_webview_window(browser_host::MAIN_WINDOW_LABEL)
        else {
            tracing::warn!(view = ?view, "main window missing; view swap skipped");
            return;
        };

        let result = match view {
            ShellView::OfflinePlaceholder => {
                window.eval(browser_host::offline_placeholder_script().as_str())
            }
            ShellView::Browser => window.navigate(self.content_url.clone()),
        };
        if let Err(err) = result {
            tracing::warn!(view = ?view, "view swap failed: {}", err);
        }
    }

    fn publish_state(&self, snapshot: &ShellSnapshot) {
        if let Err(err) = self.app.emit(SHELL_STATE_EVENT_NAME, snapshot) {
            tracing::debug!("shell state event not delivered: {}", err);
        }
    }
}
