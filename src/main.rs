use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trade_desk::config;
use trade_desk::errors::Result;
use trade_desk::response::ServiceInfo;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load optional settings overrides
    let settings = config::settings::load_default_settings();

    // 4. Connect to the database and ensure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database tables ensured."))
        .inspect_err(|e| error!("Failed to provision schema: {e}"))?;

    let identity = ServiceInfo::current();
    info!(
        service = identity.service,
        version = identity.version,
        default_per_page = settings.pagination.per_page,
        "trade-desk store is provisioned and ready"
    );

    Ok(())
}
