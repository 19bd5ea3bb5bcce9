//! Usage: Shell Controller. Owns the per-instance UI state (device token, connectivity, load
//! state) and routes platform/webview events to the push token, connectivity, browser and
//! backend sync logic.
//!
//! Platform effects go through [`ShellSurface`] and [`PushMessaging`]; backend delivery goes
//! through [`TokenRegistrar`]. The Tauri wiring lives in `app::platform`.

use super::backend_sync::{self, SyncDecision, SyncOutcome, TokenRegistrar};
use super::browser::{LoadState, LoadTracker};
use super::connectivity::{ConnectivityMonitor, ConnectivityTransition, ShellView};
use super::content_message::{self, InboundMessage, UserIdentity};
use super::push_token::{self, DeviceTokenStore, PushMessaging, TokenOutcome, NOTIFICATION_PROMPT};
use crate::shared::mutex_ext::MutexExt;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAlert {
    ConnectionLost,
    HttpError { status: u16 },
}

impl ShellAlert {
    pub fn title(&self) -> &'static str {
        match self {
            ShellAlert::ConnectionLost => "No Internet Connection",
            ShellAlert::HttpError { .. } => "HTTP Error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ShellAlert::ConnectionLost => "Please check your internet settings.",
            ShellAlert::HttpError { .. } => "There was an error loading the page.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ShellSnapshot {
    pub connected: bool,
    pub view: ShellView,
    pub load_state: LoadState,
    pub loading: bool,
    pub progress: f64,
    pub has_device_token: bool,
}

/// UI effects of the shell. Alerts are blocking for the user, not for the caller.
pub(crate) trait ShellSurface: Send + Sync + 'static {
    fn alert(&self, alert: ShellAlert);
    fn show_view(&self, view: ShellView);
    fn publish_state(&self, snapshot: &ShellSnapshot);
}

pub(crate) struct ShellController<P, R> {
    platform: Arc<P>,
    registrar: R,
    token: DeviceTokenStore,
    connectivity: Mutex<ConnectivityMonitor>,
    load: Mutex<LoadTracker>,
    logged_out_user_id: String,
}

impl<P, R> ShellController<P, R>
where
    P: PushMessaging + ShellSurface,
    R: TokenRegistrar,
{
    pub(crate) fn new(platform: Arc<P>, registrar: R, logged_out_user_id: impl Into<String>) -> Self {
        Self {
            platform,
            registrar,
            token: DeviceTokenStore::default(),
            connectivity: Mutex::new(ConnectivityMonitor::default()),
            load: Mutex::new(LoadTracker::default()),
            logged_out_user_id: logged_out_user_id.into(),
        }
    }

    pub(crate) fn snapshot(&self) -> ShellSnapshot {
        let (connected, view) = {
            let monitor = self.connectivity.lock_or_recover();
            (monitor.is_connected(), monitor.view())
        };
        let load = self.load.lock_or_recover();
        ShellSnapshot {
            connected,
            view,
            load_state: load.state(),
            loading: load.is_loading(),
            progress: load.progress(),
            has_device_token: self.token.is_present(),
        }
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.platform.publish_state(&snapshot);
    }

    /// Permission/Token Manager entry point, run once on mount.
    pub(crate) async fn init_push_token(&self) -> TokenOutcome {
        let outcome = push_token::acquire(self.platform.as_ref(), &self.token).await;
        if matches!(outcome, TokenOutcome::Stored { .. }) {
            self.publish();
        }
        outcome
    }

    pub(crate) fn on_reachability_changed(&self, connected: bool) -> ConnectivityTransition {
        let (transition, view) = {
            let mut monitor = self.connectivity.lock_or_recover();
            let transition = monitor.apply(connected);
            (transition, monitor.view())
        };

        match transition {
            ConnectivityTransition::Lost => {
                tracing::warn!("network connectivity lost");
                self.platform.show_view(view);
                self.platform.alert(ShellAlert::ConnectionLost);
            }
            ConnectivityTransition::Restored => {
                tracing::info!("network connectivity restored");
                self.platform.show_view(view);
            }
            ConnectivityTransition::Unchanged => return transition,
        }

        self.publish();
        transition
    }

    pub(crate) fn on_load_start(&self) {
        self.load.lock_or_recover().on_load_start();
        tracing::debug!("content navigation started");
        self.publish();
    }

    pub(crate) fn on_load_progress(&self, progress: f64) {
        let updated = self.load.lock_or_recover().on_progress(progress);
        if updated {
            self.publish();
        } else {
            tracing::debug!(progress, "ignoring non-finite load progress");
        }
    }

    pub(crate) fn on_load_end(&self) {
        self.load.lock_or_recover().on_load_end();
        tracing::debug!("content navigation finished");
        self.publish();
    }

    pub(crate) fn on_http_error(&self, status: u16, url: &str) {
        self.load.lock_or_recover().on_http_error();
        tracing::warn!(status, url = %url, "content failed to load");
        self.platform.alert(ShellAlert::HttpError { status });
        self.publish();
    }

    /// Handles one raw string from the content bridge. Returns the sync outcome when the
    /// message carried a user identity.
    pub(crate) async fn handle_content_message(&self, raw: &str) -> Option<SyncOutcome> {
        match content_message::parse(raw) {
            Ok(InboundMessage::User(user)) => {
                tracing::info!(user_id = %user.id, "user data received from content");
                Some(self.sync_user(&user).await)
            }
            Ok(InboundMessage::Ignored) => {
                tracing::debug!("ignoring content message without user data");
                None
            }
            Err(err) => {
                tracing::error!("error parsing message from content: {}", err);
                None
            }
        }
    }

    pub(crate) async fn sync_user(&self, user: &UserIdentity) -> SyncOutcome {
        let registration =
            match backend_sync::decide(user, self.token.get(), &self.logged_out_user_id) {
                SyncDecision::Send(registration) => registration,
                SyncDecision::Skip(reason) => {
                    tracing::debug!(user_id = %user.id, reason = ?reason, "backend sync skipped");
                    return SyncOutcome::Skipped(reason);
                }
            };

        match self.registrar.register(&registration).await {
            Ok(response) => {
                tracing::info!(
                    user_id = %registration.user_id,
                    token = %push_token::fingerprint(&registration.token),
                    response = %response,
                    "token successfully sent to backend"
                );
                self.spawn_permission_nudge();
                SyncOutcome::Sent { response }
            }
            Err(err) => {
                tracing::warn!(
                    user_id = %registration.user_id,
                    "error sending token to backend: {}",
                    err
                );
                SyncOutcome::Failed(err)
            }
        }
    }

    /// Detached: the prompt outcome is logged and then dropped. Nobody awaits the task and
    /// shell teardown does not cancel it.
    fn spawn_permission_nudge(&self) {
        let platform = Arc::clone(&self.platform);
        let _detached = tauri::async_runtime::spawn(async move {
            match platform
                .prompt_notification_permission(&NOTIFICATION_PROMPT)
                .await
            {
                Ok(outcome) => {
                    tracing::info!(outcome = ?outcome, "notification permission prompt finished")
                }
                Err(err) => tracing::warn!("notification permission prompt failed: {}", err),
            }
        });
    }
}
