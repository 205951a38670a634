//! Expiry sweeper.
//!
//! A fixed-interval task owned by the store component. Each pass collects
//! items older than the retention window, deletes their stored bytes and
//! returns their keys to the pool.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::ShareStore;

pub struct ExpirySweeper {
    store: Arc<ShareStore>,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(store: Arc<ShareStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Start the sweep loop. Runs until the process exits.
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            "Expiry sweeper started, interval {}s",
            self.interval.as_secs()
        );
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(self.interval).await;
                let report = self.store.sweep_expired().await;
                if report.is_empty() {
                    debug!("Sweep pass: nothing expired");
                } else {
                    info!(
                        "Sweep pass: {} items expired, {} files deleted, {} already gone",
                        report.items_removed, report.files_deleted, report.files_already_gone
                    );
                }
            }
        })
    }
}
