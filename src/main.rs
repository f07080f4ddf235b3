use tracing::info;

use skillxchange_backend::api::{CorsPolicy, router};
use skillxchange_backend::config::AppConfig;
use skillxchange_backend::error::AppError;
use skillxchange_backend::state::AppState;
use skillxchange_backend::{db, telemetry};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = AppConfig::from_env()?;

    let pool = db::connect(&config).await?;
    db::migrate(&pool).await?;

    let state = AppState::new(pool.clone());
    let app = router(state, CorsPolicy::new(config.allowed_origins.clone()));

    info!("allowing browser origins {:?}", config.allowed_origins);
    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
