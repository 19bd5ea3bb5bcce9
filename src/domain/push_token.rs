//! Usage: Notification permission + push token acquisition (Permission/Token Manager).
//!
//! The platform side is reached through [`PushMessaging`]; the token itself lives only in
//! memory inside [`DeviceTokenStore`].

use crate::shared::mutex_ext::MutexExt;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::sync::Mutex;

const TOKEN_FINGERPRINT_LEN: usize = 12;

/// Authorization reported by the platform messaging service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Authorized,
    Provisional,
}

impl AuthorizationStatus {
    pub fn allows_token(self) -> bool {
        matches!(self, Self::Authorized | Self::Provisional)
    }
}

/// Result of the secondary notification permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Granted,
    Denied,
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptCopy {
    pub title: &'static str,
    pub message: &'static str,
    pub button_positive: &'static str,
    pub button_negative: &'static str,
}

pub const NOTIFICATION_PROMPT: PromptCopy = PromptCopy {
    title: "Notification Permission",
    message: "This app would like to send you notifications.",
    button_positive: "OK",
    button_negative: "Cancel",
};

pub(crate) trait PushMessaging: Send + Sync + 'static {
    fn request_permission(
        &self,
    ) -> impl Future<Output = Result<AuthorizationStatus, String>> + Send;

    fn get_token(&self) -> impl Future<Output = Result<String, String>> + Send;

    /// OS-level runtime prompt; used as the nudge after a successful registration.
    fn prompt_notification_permission(
        &self,
        copy: &'static PromptCopy,
    ) -> impl Future<Output = Result<PromptOutcome, String>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    Stored { fingerprint: String },
    PermissionNotGranted(AuthorizationStatus),
    Failed(String),
}

#[derive(Debug, Default)]
pub(crate) struct DeviceTokenStore(Mutex<Option<String>>);

impl DeviceTokenStore {
    pub(crate) fn get(&self) -> Option<String> {
        self.0.lock_or_recover().clone()
    }

    pub(crate) fn is_present(&self) -> bool {
        self.0.lock_or_recover().is_some()
    }

    pub(crate) fn set(&self, token: String) {
        *self.0.lock_or_recover() = Some(token);
    }
}

/// Short, log-safe digest of a push token.
pub fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut out = String::with_capacity(TOKEN_FINGERPRINT_LEN);
    for byte in digest.iter() {
        if out.len() >= TOKEN_FINGERPRINT_LEN {
            break;
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out.truncate(TOKEN_FINGERPRINT_LEN);
    out
}

pub(crate) async fn acquire<P: PushMessaging>(push: &P, store: &DeviceTokenStore) -> TokenOutcome {
    let status = match push.request_permission().await {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!("notification permission request failed: {}", err);
            return TokenOutcome::Failed(err);
        }
    };

    if !status.allows_token() {
        tracing::info!(status = ?status, "notification permission not granted; skipping token fetch");
        return TokenOutcome::PermissionNotGranted(status);
    }
    tracing::info!(status = ?status, "notification permission granted");

    let token = match push.get_token().await {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!("push token fetch failed: {}", err);
            return TokenOutcome::Failed(err);
        }
    };

    let token = token.trim().to_string();
    if token.is_empty() {
        let err = "PUSH_TOKEN_EMPTY: messaging service returned an empty token".to_string();
        tracing::warn!("{}", err);
        return TokenOutcome::Failed(err);
    }

    let fingerprint = fingerprint(&token);
    store.set(token);
    tracing::info!(token = %fingerprint, "push token stored");
    TokenOutcome::Stored { fingerprint }
}
