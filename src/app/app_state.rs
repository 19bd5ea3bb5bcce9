//! Usage: Tauri-managed shell state used by `commands/*`, window hooks and lifecycle cleanup.

use super::platform::TauriPlatform;
use crate::backend_client::{self, HttpTokenRegistrar};
use crate::push_token::TokenOutcome;
use crate::reachability::{self, ProbeOptions, SubscriptionSlot};
use crate::settings::ShellSettings;
use crate::shell::ShellController;
use std::sync::Arc;
use std::time::Duration;

pub(crate) type AppController = ShellController<TauriPlatform, HttpTokenRegistrar>;

pub(crate) struct ShellState {
    controller: Arc<AppController>,
    client: reqwest::Client,
    probe_target: reqwest::Url,
    probe_options: ProbeOptions,
    reachability: SubscriptionSlot,
}

impl ShellState {
    pub(crate) fn new(app: &tauri::AppHandle, settings: &ShellSettings) -> Result<Self, String> {
        let content_url = tauri::Url::parse(&settings.content_url)
            .map_err(|e| format!("SEC_INVALID_INPUT: invalid content_url: {e}"))?;
        let probe_target = reqwest::Url::parse(&settings.content_url)
            .map_err(|e| format!("SEC_INVALID_INPUT: invalid content_url: {e}"))?;

        let client = backend_client::build_http_client()?;
        let registrar = HttpTokenRegistrar::new(client.clone(), &settings.backend_url)?;
        let platform = Arc::new(TauriPlatform::new(app.clone(), content_url));
        let controller = Arc::new(ShellController::new(
            platform,
            registrar,
            settings.logged_out_user_id.clone(),
        ));

        Ok(Self {
            controller,
            client,
            probe_target,
            probe_options: ProbeOptions {
                interval: Duration::from_secs(u64::from(
                    settings.reachability_probe_interval_seconds,
                )),
                timeout: Duration::from_secs(u64::from(
                    settings.reachability_probe_timeout_seconds,
                )),
            },
            reachability: SubscriptionSlot::default(),
        })
    }

    pub(crate) fn controller(&self) -> Arc<AppController> {
        Arc::clone(&self.controller)
    }

    /// Starts the Permission/Token Manager and the Connectivity Monitor independently.
    pub(crate) fn mount(&self) {
        let controller = self.controller();
        tauri::async_runtime::spawn(async move {
            match controller.init_push_token().await {
                TokenOutcome::Stored { fingerprint } => {
                    tracing::debug!(token = %fingerprint, "device token ready for backend sync")
                }
                other => tracing::debug!(outcome = ?other, "push token initialization finished"),
            }
        });

        let controller = self.controller();
        let subscription = reachability::subscribe(
            self.client.clone(),
            self.probe_target.clone(),
            self.probe_options,
            move |connected| {
                controller.on_reachability_changed(connected);
            },
        );

        if self.reachability.install(subscription) {
            tracing::debug!("previous reachability subscription replaced");
        }
    }

    /// Returns whether a live subscription was released.
    pub(crate) fn unmount(&self) -> bool {
        self.reachability.release()
    }
}
