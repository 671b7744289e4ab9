//! Main entry point for the flockwatch service.
//! Sets up the HTTP server, configures logging, and loads the engine
//! configuration from the environment.

use actix_web::{web, App, HttpServer};

use flockwatch::api;
use flockwatch::config::EngineConfig;
use flockwatch::service::SightingScreener;

/// Main entry point for the flockwatch service.
///
/// # Server Configuration
/// - Binds to 0.0.0.0 on PORT (default 8080)
/// - Engine endpoints are under the /engine prefix
/// - GET /health at the root for platform health checks
///
/// # Environment Variables
/// See [`flockwatch::config`] for the FLOCKWATCH_ settings. The log level is
/// controlled with RUST_LOG.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = EngineConfig::from_env_or_default();
    log::info!("Starting flockwatch with configuration: {:?}", config);

    // Configuration is the only shared state; requests carry their own data
    let screener = web::Data::new(SightingScreener::new(Some(config)));

    let port = match std::env::var("PORT") {
        Ok(value) => value.parse::<u16>().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid PORT {}: {}", value, e),
            )
        })?,
        Err(_) => 8080,
    };

    log::info!("Starting server on port {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(screener.clone())
            .configure(api::configure)
            .service(api::health)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
