//! Usage: Decide whether a user identity should be registered with the backend, and the
//! registrar seam used to deliver it.

use super::content_message::UserIdentity;
use std::future::Future;

/// Content reports this id while nobody is logged in. Fragile: it is only a convention of the
/// hosted site, so it is configurable.
pub const DEFAULT_LOGGED_OUT_USER_ID: &str = "Login";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TokenRegistration {
    pub user_id: String,
    pub token: String,
}

pub(crate) trait TokenRegistrar: Send + Sync + 'static {
    /// Resolves with the response body on a 2xx answer.
    fn register(
        &self,
        registration: &TokenRegistration,
    ) -> impl Future<Output = Result<String, String>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    LoggedOut,
    NoDeviceToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    Send(TokenRegistration),
    Skip(SkipReason),
}

pub fn decide(user: &UserIdentity, token: Option<String>, logged_out_user_id: &str) -> SyncDecision {
    if user.id == logged_out_user_id {
        return SyncDecision::Skip(SkipReason::LoggedOut);
    }
    match token {
        Some(token) => SyncDecision::Send(TokenRegistration {
            user_id: user.id.clone(),
            token,
        }),
        None => SyncDecision::Skip(SkipReason::NoDeviceToken),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Skipped(SkipReason),
    Sent { response: String },
    Failed(String),
}
