//! Usage: Connectivity state + transition detection (Connectivity Monitor).

/// Which surface the main window should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellView {
    Browser,
    OfflinePlaceholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityTransition {
    Lost,
    Restored,
    Unchanged,
}

#[derive(Debug, Clone)]
pub(crate) struct ConnectivityMonitor {
    connected: bool,
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        // Assume online until the first reachability event says otherwise.
        Self { connected: true }
    }
}

impl ConnectivityMonitor {
    pub(crate) fn apply(&mut self, connected: bool) -> ConnectivityTransition {
        let previous = std::mem::replace(&mut self.connected, connected);
        match (previous, connected) {
            (true, false) => ConnectivityTransition::Lost,
            (false, true) => ConnectivityTransition::Restored,
            _ => ConnectivityTransition::Unchanged,
        }
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.connected
    }

    pub(crate) fn view(&self) -> ShellView {
        if self.connected {
            ShellView::Browser
        } else {
            ShellView::OfflinePlaceholder
        }
    }
}
