//! Usage: Browser Host load-state tracking driven by webview lifecycle callbacks.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone)]
pub(crate) struct LoadTracker {
    state: LoadState,
    progress: f64,
}

impl Default for LoadTracker {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            progress: 0.0,
        }
    }
}

impl LoadTracker {
    pub(crate) fn on_load_start(&mut self) {
        self.state = LoadState::Loading;
        self.progress = 0.0;
    }

    /// Monotonicity is the webview's contract; values are stored as reported.
    pub(crate) fn on_progress(&mut self, progress: f64) -> bool {
        if !progress.is_finite() {
            return false;
        }
        self.progress = progress.clamp(0.0, 1.0);
        true
    }

    pub(crate) fn on_load_end(&mut self) {
        // An HTTP error reported before the navigation finished stays visible.
        if self.state != LoadState::Error {
            self.state = LoadState::Loaded;
        }
    }

    pub(crate) fn on_http_error(&mut self) {
        self.state = LoadState::Error;
    }

    pub(crate) fn state(&self) -> LoadState {
        self.state
    }

    pub(crate) fn progress(&self) -> f64 {
        self.progress
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }
}
