//! Server startup preparation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::get_config;
use crate::store::{ExpirySweeper, FileStorage, ShareStore, WordPool};

pub struct StartupContext {
    pub store: Arc<ShareStore>,
}

/// Prepare the server startup context: word pool, upload directory, store
/// and the expiry sweeper.
///
/// A missing or empty word list is fatal; everything else here only
/// creates directories and spawns tasks.
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let pool =
        WordPool::load(Path::new(&config.words.path)).context("Failed to load word list")?;
    info!(
        "Word pool loaded from {} with {} keys",
        config.words.path,
        pool.len()
    );

    let files = FileStorage::new(&config.upload.dir);
    files
        .ensure_root()
        .await
        .context("Failed to create upload directory")?;
    debug!("Upload directory ready: {}", config.upload.dir);

    let store = Arc::new(ShareStore::new(
        pool,
        files,
        Duration::from_secs(config.retention.window_secs),
    ));

    ExpirySweeper::new(
        store.clone(),
        Duration::from_secs(config.retention.sweep_interval_secs),
    )
    .spawn();

    info!(
        "Startup preparation finished in {} ms (retention window {}s)",
        start_time.elapsed().as_millis(),
        config.retention.window_secs
    );

    Ok(StartupContext { store })
}
