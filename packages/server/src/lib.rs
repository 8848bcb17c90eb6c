#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the football API.
//!
//! Serves read-only JSON routes under `/api` that scrape Italian Wikipedia
//! and Eurosport on demand. Data routes wrap their result in the
//! `{success, data, error}` envelope from [`football_api_server_models`];
//! unknown routes and wrong methods get a JSON error body instead of the
//! framework's empty response.

pub mod config;
mod handlers;
pub mod interactive;

use actix_cors::Cors;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use football_api_scraper::{PageClient, ScrapeError};
use football_api_server_models::ApiError;

pub use config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// HTTP client used by every extractor.
    pub client: PageClient,
}

impl AppState {
    /// Builds the state from the scraper settings of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Upstream`] if the HTTP client cannot be built.
    pub fn new(config: &ServerConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: PageClient::new(config.scrape.clone())?,
        })
    }
}

/// Registers the `/api` routes.
///
/// Each path is its own resource so a wrong method gets the resource's
/// 405 rather than falling through to the scope's 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handlers::query_error));
    cfg.service(
        web::scope("/api")
            .service(web::resource("/health").route(web::get().to(handlers::health)))
            .service(web::resource("/leagues").route(web::get().to(handlers::leagues)))
            .service(web::resource("/intro").route(web::get().to(handlers::intro)))
            .service(web::resource("/infobox").route(web::get().to(handlers::infobox)))
            .service(web::resource("/teams").route(web::get().to(handlers::teams)))
            .service(web::resource("/ranking").route(web::get().to(handlers::ranking)))
            .service(web::resource("/scorers").route(web::get().to(handlers::scorers)))
            .service(web::resource("/gamedays").route(web::get().to(handlers::gamedays))),
    );
}

/// Middleware that turns 404 and 405 responses into JSON error bodies.
#[must_use]
pub fn json_error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .handler(StatusCode::NOT_FOUND, json_error_body)
        .handler(StatusCode::METHOD_NOT_ALLOWED, json_error_body)
}

#[allow(clippy::unnecessary_wraps)]
fn json_error_body<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let body = if status == StatusCode::METHOD_NOT_ALLOWED {
        ApiError::method_not_allowed()
    } else {
        ApiError::not_found()
    };

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, HttpResponse::build(status).json(body)).map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}

/// Starts the football API server.
///
/// Builds the shared HTTP client from `config` and serves until shut
/// down. This is a regular async function; the caller provides the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP client cannot be built,
/// the server fails to bind, or it encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!(
        "Scraping Wikipedia at {} and Eurosport at {} (timeout {:?})",
        config.scrape.wikipedia_url,
        config.scrape.eurosport_url,
        config.scrape.timeout
    );

    let state = web::Data::new(AppState::new(&config).map_err(std::io::Error::other)?);

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(json_error_handlers())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
