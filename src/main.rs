//! coach-desk: HTTP service for coach attendance, salaries and feedback.

use std::env;

use coach_desk::api::{AppState, create_router};
use coach_desk::config::ConfigLoader;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config_dir =
        env::var("COACH_DESK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging().level.as_str().into()),
        )
        .init();

    let port = match env::var("PORT") {
        Ok(raw) => raw.parse::<u16>()?,
        Err(_) => config.server().port,
    };

    let state = AppState::from_config(&config)?;
    tracing::info!(
        config_dir = %config_dir,
        coach_count = config.coaches().len(),
        player_count = config.players().len(),
        "Coach store seeded from roster"
    );

    let addr = format!("{}:{}", config.server().host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("coach-desk listening on {addr}");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
