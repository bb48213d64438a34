use tokio::net::TcpListener;
use tracing::info;

use workout_api::api::routes::create_routes;
use workout_api::config::{run_migrations, AppConfig, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;

    let app = create_routes(pool, &config);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!(
        "Workout assignment API listening on http://{}",
        config.server_address()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
