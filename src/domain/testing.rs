//! Usage: In-memory fakes for the controller's platform and backend seams (tests only).

use super::backend_sync::{TokenRegistrar, TokenRegistration};
use super::connectivity::ShellView;
use super::push_token::{AuthorizationStatus, PromptCopy, PromptOutcome, PushMessaging};
use super::shell::{ShellAlert, ShellSnapshot, ShellSurface};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) struct FakePlatform {
    permission: Result<AuthorizationStatus, String>,
    token: Result<String, String>,
    prompt: Result<PromptOutcome, String>,
    token_requests: AtomicUsize,
    prompts: AtomicUsize,
    prompt_titles: Mutex<Vec<&'static str>>,
    alerts: Mutex<Vec<ShellAlert>>,
    views: Mutex<Vec<ShellView>>,
    snapshots: Mutex<Vec<ShellSnapshot>>,
}

impl FakePlatform {
    pub(crate) fn new(
        permission: Result<AuthorizationStatus, String>,
        token: Result<String, String>,
    ) -> Self {
        Self {
            permission,
            token,
            prompt: Ok(PromptOutcome::Granted),
            token_requests: AtomicUsize::new(0),
            prompts: AtomicUsize::new(0),
            prompt_titles: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
            views: Mutex::new(Vec::new()),
            snapshots: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn granted(token: &str) -> Self {
        Self::new(Ok(AuthorizationStatus::Authorized), Ok(token.to_string()))
    }

    pub(crate) fn denied() -> Self {
        Self::new(Ok(AuthorizationStatus::Denied), Ok("unused".to_string()))
    }

    pub(crate) fn with_prompt(mut self, prompt: Result<PromptOutcome, String>) -> Self {
        self.prompt = prompt;
        self
    }

    pub(crate) fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    pub(crate) fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub(crate) fn prompt_titles(&self) -> Vec<&'static str> {
        self.prompt_titles.lock().expect("prompt titles").clone()
    }

    pub(crate) fn alerts(&self) -> Vec<ShellAlert> {
        self.alerts.lock().expect("alerts").clone()
    }

    pub(crate) fn views(&self) -> Vec<ShellView> {
        self.views.lock().expect("views").clone()
    }

    pub(crate) fn last_snapshot(&self) -> Option<ShellSnapshot> {
        self.snapshots.lock().expect("snapshots").last().cloned()
    }

    pub(crate) fn snapshot_count(&self) -> usize {
        self.snapshots.lock().expect("snapshots").len()
    }

    /// The nudge runs on a detached task; poll until it has been observed.
    pub(crate) async fn wait_for_prompts(&self, expected: usize) -> bool {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.prompts() < expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .is_ok()
    }
}

impl PushMessaging for FakePlatform {
    async fn request_permission(&self) -> Result<AuthorizationStatus, String> {
        self.permission.clone()
    }

    async fn get_token(&self) -> Result<String, String> {
        self.token_requests.fetch_add(1, Ordering::SeqCst);
        self.token.clone()
    }

    async fn prompt_notification_permission(
        &self,
        copy: &'static PromptCopy,
    ) -> Result<PromptOutcome, String> {
        self.prompt_titles.lock().expect("prompt titles").push(copy.title);
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.prompt.clone()
    }
}

impl ShellSurface for FakePlatform {
    fn alert(&self, alert: ShellAlert) {
        self.alerts.lock().expect("alerts").push(alert);
    }

    fn show_view(&self, view: ShellView) {
        self.views.lock().expect("views").push(view);
    }

    fn publish_state(&self, snapshot: &ShellSnapshot) {
        self.snapshots.lock().expect("snapshots").push(snapshot.clone());
    }
}

#[derive(Clone)]
pub(crate) struct FakeRegistrar {
    response: Result<String, String>,
    sent: Arc<Mutex<Vec<TokenRegistration>>>,
}

impl FakeRegistrar {
    pub(crate) fn ok(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn failing(err: &str) -> Self {
        Self {
            response: Err(err.to_string()),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn sent(&self) -> Vec<TokenRegistration> {
        self.sent.lock().expect("sent").clone()
    }
}

impl TokenRegistrar for FakeRegistrar {
    async fn register(&self, registration: &TokenRegistration) -> Result<String, String> {
        self.sent.lock().expect("sent").push(registration.clone());
        self.response.clone()
    }
}
