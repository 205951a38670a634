use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::store::ShareStore;

/// Shutdown timeout in seconds
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

pub async fn listen_for_shutdown(store: &Arc<ShareStore>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, draining store...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    let shutdown_result = timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        perform_shutdown_tasks(store),
    )
    .await;

    match shutdown_result {
        Ok(()) => {
            info!("All shutdown tasks completed successfully");
        }
        Err(_) => {
            error!(
                "Shutdown tasks timed out after {} seconds! Forcing exit.",
                SHUTDOWN_TIMEOUT_SECS
            );
        }
    }
}

/// Everything here is ephemeral; live items and their stored bytes must not
/// survive the process.
async fn perform_shutdown_tasks(store: &Arc<ShareStore>) {
    let report = store.drain_all().await;
    info!(
        "Drained {} live items ({} stored files removed)",
        report.items_removed, report.files_deleted
    );
}
