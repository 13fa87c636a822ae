//! Torneo API - AWS Lambda Runtime

use lambda_http::{run, Error};
use sqlx::PgPool;
use tracing::info;

use torneo_app::{create_app, with_middleware};
use torneo_common::{Config, StoreProvider};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Torneo API Lambda");

    let config = Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let pool = match (config.store_provider, config.database_url.as_deref()) {
        (StoreProvider::Postgres, Some(url)) => {
            let pool = PgPool::connect(url)
                .await
                .map_err(|e| Error::from(format!("Database error: {}", e)))?;
            info!("Database connection established");
            Some(pool)
        }
        _ => None,
    };

    let app = create_app(&config, pool)
        .await
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let cors_origins = config
        .cors_allowed_origins
        .as_deref()
        .ok_or_else(|| Error::from("CORS_ALLOWED_ORIGINS environment variable is required"))?;

    let app = with_middleware(app, Some(cors_origins));

    info!("Torneo API Lambda ready to serve requests");

    run(app).await
}
