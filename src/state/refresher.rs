use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic fight-card refresh — every 60 seconds, enough to catch live
/// results on event night. Rankings and profiles are loaded on demand only.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests }
    }

    pub async fn run(self) {
        let mut events_interval = interval(Duration::from_secs(60));
        // Skip the immediate first tick so startup loading isn't double-triggered.
        events_interval.tick().await;

        loop {
            events_interval.tick().await;
            let _ = self
                .network_requests
                .send(NetworkRequest::RefreshEvents)
                .await;
        }
    }
}
