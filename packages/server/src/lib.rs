#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the massacre map dashboard.
//!
//! Loads the CSV dataset once at startup and serves filtered record
//! collections, statistics and the yearly timeline as JSON to the browser
//! front end, which is served as static files from `STATIC_DIR`.

pub mod config;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use massacre_map_geocoder::enrich::enrich_coordinates;
use massacre_map_geocoder::service_registry::{
    build_geocoders, enabled_services, slowest_rate_limit,
};
use massacre_map_incident_models::IncidentRecord;

pub use config::{ConfigError, ServerConfig};

/// Shared application state.
pub struct AppState {
    /// Dataset loaded at startup. Never modified afterwards.
    pub dataset: Arc<[IncidentRecord]>,
}

impl AppState {
    /// Wraps a loaded dataset.
    #[must_use]
    pub fn new(records: Vec<IncidentRecord>) -> Self {
        Self {
            dataset: Arc::from(records),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/categories", web::get().to(handlers::categories))
            .route("/governors", web::get().to(handlers::governors))
            .route("/incidents", web::get().to(handlers::incidents))
            .route("/statistics", web::get().to(handlers::statistics))
            .route("/timeline", web::get().to(handlers::timeline)),
    );
}

/// Loads the dataset described by `config`, geocoding missing positions
/// when enabled.
///
/// Never fails: an unreadable dataset becomes an empty one, and a
/// geocoder that cannot be set up leaves the records as loaded.
pub async fn load_dataset(config: &ServerConfig) -> Vec<IncidentRecord> {
    let records = massacre_map_source::load_or_empty(&config.data_path).await;

    if !config.geocode_missing {
        return records;
    }

    let client = match massacre_map_geocoder::build_client() {
        Ok(client) => client,
        Err(e) => {
            log::warn!("Geocoding disabled: {e}");
            return records;
        }
    };

    let delay = slowest_rate_limit(&enabled_services());
    let geocoders = build_geocoders(&client);
    log::info!(
        "Geocoding records without coordinates using {} providers",
        geocoders.len()
    );

    enrich_coordinates(&records, &geocoders, delay).await
}

/// Starts the massacre map API server.
///
/// Reads [`ServerConfig`] from the environment, loads the dataset and
/// starts the Actix-Web HTTP server. The caller provides the async runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the configuration is invalid or
/// the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env().map_err(|e| {
        log::error!("{e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("Loading dataset from {}...", config.data_path.display());
    let state = web::Data::new(AppState::new(load_dataset(&config).await));

    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::warn!(
            "Static directory {} not found; serving the API only",
            static_dir.display()
        );
    }

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();
        let static_dir = static_dir.clone();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            .configure(move |cfg| {
                // Serve frontend static files (production)
                if serve_static {
                    cfg.service(Files::new("/", static_dir).index_file("index.html"));
                }
            })
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
