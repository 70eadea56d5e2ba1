use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ev_route_server::catalog::StationCatalog;
use ev_route_server::config::AppConfig;
use ev_route_server::geocode::{CachedGeocoder, GeocoderBackend, NominatimClient, StaticGeocoder};
use ev_route_server::optimizer::RouteOptimizer;
use ev_route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Load station data (fail fast if unavailable)
    info!(path = %config.catalog_path.display(), "loading charging stations");
    let catalog = StationCatalog::from_path(&config.catalog_path).await?;

    // Spawn background task to re-read the station file
    if let Some(period) = config.catalog_refresh {
        let catalog_refresh = catalog.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match catalog_refresh.refresh().await {
                    Ok(count) => info!(count, "refreshed charging stations"),
                    Err(e) => warn!(error = %e, "failed to refresh charging stations"),
                }
            }
        });
    }

    let geocoder = match &config.places_path {
        Some(path) => {
            let table = StaticGeocoder::from_path(path)?;
            info!(places = table.len(), "using offline place table for geocoding");
            GeocoderBackend::Static(table)
        }
        None => {
            info!(base_url = %config.geocoder.base_url, "using nominatim for geocoding");
            let client = NominatimClient::new(config.geocoder.clone())?;
            GeocoderBackend::Nominatim(CachedGeocoder::new(client, &config.geocode_cache))
        }
    };

    let optimizer = RouteOptimizer::new(catalog, geocoder, config.route_links.clone());
    let app = create_router(AppState::new(optimizer));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "EV route server listening");
    info!("  GET  /health           - Health check");
    info!("  POST /optimize_route   - Stations in range and route link");
    info!("  GET  /stations         - List charging stations");
    info!("  POST /stations         - Replace stations from CSV body");
    info!("  POST /stations/reload  - Re-read the station file");

    axum::serve(listener, app).await?;

    Ok(())
}
