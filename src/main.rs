//! Scraping proxy server
//!
//! Main entry point for the REST API service.

use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use toon_scraper::config::Config;
use toon_scraper::parser::profiles::PROFILE_VERSION;
use toon_scraper::routes::{configure_routes, cors, ApiDoc, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::other(e)
    })?;
    let bind_address = format!("{}:{}", config.host, config.port);

    info!(
        "Scraping {} with selector profiles {}",
        config.base_url, PROFILE_VERSION
    );

    let app_state = web::Data::new(AppState::new(config).map_err(|e| {
        error!("Failed to initialize application state: {}", e);
        std::io::Error::other(e)
    })?);

    info!("Starting scraper API server on {}", bind_address);

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .app_data(app_state.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
