use anyhow::Result;
use tracing::debug;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    sharekey::config::init_config();
    let config = sharekey::config::get_config();

    // Guard must be kept alive until exit so buffered log lines are flushed
    let _log_guard = sharekey::system::logging::init_logging(&config);

    debug!("Configuration and logging initialized");

    sharekey::runtime::server::run_server().await
}
