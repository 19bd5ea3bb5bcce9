//! Usage: Reachability signal for the Connectivity Monitor.
//!
//! A background task probes the content origin (HTTP HEAD, falling back to GET) and reports
//! `true/false` to a callback: the first result always, afterwards only on change. The returned
//! [`ReachabilitySubscription`] owns the task; unsubscribing (or dropping it) stops the probe.
//! [`SubscriptionSlot`] holds the live subscription between mount and teardown.

use crate::shared::mutex_ext::MutexExt;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProbeOptions {
    pub(crate) interval: Duration,
    pub(crate) timeout: Duration,
}

/// Any HTTP response counts as reachable; only transport failures do not.
pub(crate) async fn is_reachable(
    client: &reqwest::Client,
    target: &reqwest::Url,
    timeout: Duration,
) -> bool {
    if client.head(target.clone()).timeout(timeout).send().await.is_ok() {
        return true;
    }

    match client.get(target.clone()).timeout(timeout).send().await {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(url = %target, "reachability probe failed: {}", err);
            false
        }
    }
}

pub(crate) struct ReachabilitySubscription {
    task: Option<tauri::async_runtime::JoinHandle<()>>,
}

impl ReachabilitySubscription {
    pub(crate) fn unsubscribe(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("reachability subscription released");
        }
    }
}

impl Drop for ReachabilitySubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

pub(crate) fn subscribe<F>(
    client: reqwest::Client,
    target: reqwest::Url,
    options: ProbeOptions,
    on_change: F,
) -> ReachabilitySubscription
where
    F: Fn(bool) + Send + Sync + 'static,
{
    let task = tauri::async_runtime::spawn(async move {
        let mut last: Option<bool> = None;
        loop {
            let reachable = is_reachable(&client, &target, options.timeout).await;

            if last != Some(reachable) {
                last = Some(reachable);
                tracing::info!(connected = reachable, "reachability changed");
                on_change(reachable);
            }

            tokio::time::sleep(options.interval).await;
        }
    });

    ReachabilitySubscription { task: Some(task) }
}

#[derive(Default)]
pub(crate) struct SubscriptionSlot {
    current: Mutex<Option<ReachabilitySubscription>>,
}

impl SubscriptionSlot {
    /// Stores `subscription`, unsubscribing the one it replaces. Returns whether one was replaced.
    pub(crate) fn install(&self, subscription: ReachabilitySubscription) -> bool {
        let previous = self.current.lock_or_recover().replace(subscription);
        match previous {
            Some(previous) => {
                previous.unsubscribe();
                true
            }
            None => false,
        }
    }

    /// Returns whether a live subscription was released.
    pub(crate) fn release(&self) -> bool {
        let subscription = self.current.lock_or_recover().take();
        match subscription {
            Some(subscription) => {
                subscription.unsubscribe();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    const FAST: ProbeOptions = ProbeOptions {
        interval: Duration::from_millis(20),
        timeout: Duration::from_millis(500),
    };

    async fn spawn_origin() -> (SocketAddr, oneshot::Sender<()>) {
        let app = Router::new().route("/ondemand", get(|| async { "ok" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });
        (addr, shutdown_tx)
    }

    fn closed_port() -> SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        addr
    }

    fn recorder() -> (Arc<Mutex<Vec<bool>>>, impl Fn(bool) + Send + Sync + 'static) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        (events, move |connected| {
            sink.lock().expect("events").push(connected)
        })
    }

    async fn wait_for(events: &Arc<Mutex<Vec<bool>>>, len: usize) -> Vec<bool> {
        let _ = tokio::time::timeout(Duration::from_secs(5), async {
            while events.lock().expect("events").len() < len {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        events.lock().expect("events").clone()
    }

    fn url_for(addr: SocketAddr) -> reqwest::Url {
        reqwest::Url::parse(&format!("http://{addr}/ondemand")).expect("url")
    }

    #[tokio::test]
    async fn live_origin_is_reachable() {
        let (addr, _shutdown) = spawn_origin().await;
        let client = reqwest::Client::new();

        assert!(is_reachable(&client, &url_for(addr), Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn error_status_still_counts_as_reachable() {
        let (addr, _shutdown) = spawn_origin().await;
        let client = reqwest::Client::new();
        let missing = reqwest::Url::parse(&format!("http://{addr}/missing")).expect("url");

        assert!(is_reachable(&client, &missing, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let client = reqwest::Client::new();

        assert!(!is_reachable(&client, &url_for(closed_port()), Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn reports_first_result_then_only_changes() {
        let (addr, shutdown) = spawn_origin().await;
        let (events, on_change) = recorder();

        let subscription = subscribe(reqwest::Client::new(), url_for(addr), FAST, on_change);

        assert_eq!(wait_for(&events, 1).await, vec![true]);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(events.lock().expect("events").clone(), vec![true]);

        let _ = shutdown.send(());
        assert_eq!(wait_for(&events, 2).await, vec![true, false]);

        subscription.unsubscribe();
    }

    #[tokio::test]
    async fn unreachable_origin_reports_disconnected() {
        let (events, on_change) = recorder();

        let _subscription = subscribe(
            reqwest::Client::new(),
            url_for(closed_port()),
            FAST,
            on_change,
        );

        assert_eq!(wait_for(&events, 1).await, vec![false]);
    }

    #[tokio::test]
    async fn dropping_subscription_stops_reporting() {
        let (addr, shutdown) = spawn_origin().await;
        let (events, on_change) = recorder();

        let subscription = subscribe(reqwest::Client::new(), url_for(addr), FAST, on_change);
        assert_eq!(wait_for(&events, 1).await, vec![true]);

        drop(subscription);
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = shutdown.send(());
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(events.lock().expect("events").clone(), vec![true]);
    }

    #[tokio::test]
    async fn installing_again_stops_the_replaced_subscription() {
        let (addr, shutdown) = spawn_origin().await;
        let slot = SubscriptionSlot::default();
        let (first_events, first) = recorder();
        let (second_events, second) = recorder();

        assert!(!slot.install(subscribe(reqwest::Client::new(), url_for(addr), FAST, first)));
        assert_eq!(wait_for(&first_events, 1).await, vec![true]);

        assert!(slot.install(subscribe(reqwest::Client::new(), url_for(addr), FAST, second)));
        assert_eq!(wait_for(&second_events, 1).await, vec![true]);

        let _ = shutdown.send(());
        assert_eq!(wait_for(&second_events, 2).await, vec![true, false]);
        assert_eq!(first_events.lock().expect("events").clone(), vec![true]);

        assert!(slot.release());
    }

    #[tokio::test]
    async fn release_is_idempotent_and_stops_reporting() {
        let (addr, shutdown) = spawn_origin().await;
        let slot = SubscriptionSlot::default();
        let (events, on_change) = recorder();

        slot.install(subscribe(reqwest::Client::new(), url_for(addr), FAST, on_change));
        assert_eq!(wait_for(&events, 1).await, vec![true]);

        assert!(slot.release());
        assert!(!slot.release());

        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = shutdown.send(());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(events.lock().expect("events").clone(), vec![true]);
    }

    #[test]
    fn release_on_empty_slot_is_a_no_op() {
        let slot = SubscriptionSlot::default();

        assert!(!slot.release());
        assert!(!slot.release());
    }
}
