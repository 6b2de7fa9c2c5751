use std::sync::Arc;
use std::time::Duration;

use tracing::Level;

use crate::controller::create_router;
use crate::controller::discord::checkin::CheckinHandler;
use crate::shared::middleware::discord_validation::SignatureVerifier;
use crate::shared::structs::AppState;
use crate::shared::structs::config::Configuration;
use crate::shared::utility::google_maps::GoogleMapsResolver;

mod controller;
mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Configuration::load_from_config_file()?;

    let log_level = match config.log_level.as_str() {
        "TRACE" => Level::TRACE,
        "INFO" => Level::INFO,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::DEBUG,
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(log_level)
        .pretty()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!(
            "Initialization of tracing subscriber failed with error: {}",
            e
        );
    }

    let verifier = SignatureVerifier::new(&config.application_public_key)?;

    let maps_client = Arc::new(google_maps::Client::try_new(config.google_maps_api_key.as_str())?);
    let resolver = Arc::new(GoogleMapsResolver::new(
        maps_client,
        config.locations.clone(),
    ));
    let checkin = Arc::new(CheckinHandler::new(
        resolver,
        Duration::from_secs(config.resolver_timeout_secs),
        config.show_coordinates,
    ));

    let server_bind_point = format!("{}:{}", config.server_bind_point, config.port);

    let state = AppState { verifier, checkin };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&server_bind_point).await?;
    tracing::info!("Listening for interactions on {server_bind_point}");
    axum::serve(listener, app).await?;

    Ok(())
}
