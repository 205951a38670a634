//! Server mode.
//!
//! Configures and starts the HTTP server with all routes. The catch-all
//! `/{key}` route is registered last so the literal routes win.

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use tracing::warn;

use crate::api::services::{
    AppStartTime, CreateService, FrontendService, HealthService, RetrieveService, UploadPolicy,
};
use crate::config::get_config;
use crate::runtime::{shutdown, startup};

/// Run the HTTP server
///
/// 1. Records startup time
/// 2. Prepares server components (word pool, upload dir, store, sweeper)
/// 3. Configures and starts the HTTP server
/// 4. Listens for graceful shutdown signals
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = startup::prepare_server_startup().await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let store = startup.store.clone();
    let config = get_config();

    let upload_policy = UploadPolicy {
        max_size: config.upload.max_size as usize,
    };

    let cpu_count = config.server.cpu_count.min(32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!(
        "Starting server at http://{} with {} workers",
        bind_address, cpu_count
    );

    let store_for_shutdown = store.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(upload_policy.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .route("/", web::get().to(FrontendService::handle_index))
            .route("/404", web::get().to(FrontendService::handle_not_found))
            .route("/favicon.ico", web::get().to(FrontendService::handle_favicon))
            .route("/health", web::get().to(HealthService::health_check))
            .route("/create", web::post().to(CreateService::create_item))
            .route("/{key}", web::get().to(RetrieveService::handle_key))
    })
    .workers(cpu_count)
    .bind(bind_address)?
    .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = shutdown::listen_for_shutdown(&store_for_shutdown) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
