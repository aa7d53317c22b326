use std::net::SocketAddr;

use roadcheck_server::cache::{CacheConfig, CachedWeather};
use roadcheck_server::config::{DEFAULT_CAMERAS_PATH, DEFAULT_CLOSURES_PATH, DataConfig};
use roadcheck_server::facts::RoadFacts;
use roadcheck_server::weather::{MeteostatClient, MeteostatConfig};
use roadcheck_server::web::{AppState, create_router};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Address served when `ROADCHECK_ADDR` is unset.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let api_key = std::env::var("METEOSTAT_API_KEY").unwrap_or_else(|_| {
        warn!("METEOSTAT_API_KEY not set; weather lookups will fail");
        String::new()
    });

    let mut meteostat_config = MeteostatConfig::new(api_key);
    if let Ok(stations) = std::env::var("METEOSTAT_STATIONS") {
        meteostat_config = meteostat_config.with_stations(
            stations
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty()),
        );
    }

    let meteostat =
        MeteostatClient::new(meteostat_config).expect("Failed to create Meteostat client");
    let weather = CachedWeather::new(meteostat, &CacheConfig::default());

    // Datasets are loaded once; a broken dataset stops startup
    let data_config = DataConfig::new(
        env_or("ROADCHECK_CAMERAS", DEFAULT_CAMERAS_PATH),
        env_or("ROADCHECK_CLOSURES", DEFAULT_CLOSURES_PATH),
    );
    let facts = RoadFacts::load(&data_config, weather).expect("Failed to load datasets");

    let app = create_router(AppState::new(facts)).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = env_or("ROADCHECK_ADDR", DEFAULT_ADDR)
        .parse()
        .expect("ROADCHECK_ADDR is not a socket address");
    info!(%addr, "road facts server listening");
    info!("  GET /health");
    info!("  GET /cameras?street=");
    info!("  GET /cameras/check?street=&year=");
    info!("  GET /closures/check?locality=&street=&at=");
    info!("  GET /rain/on?date=");
    info!("  GET /rain/before?date=&hour=&lookback_hours=");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
