//! HTTP handler functions for the football API.

use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use football_api_scraper::{ScrapeError, gamedays, infobox, intro, ranking, scorers, teams};
use football_api_server_models::{
    ApiError, ApiHealth, ApiLeague, ApiResponse, LeagueQueryParams, SeasonQueryParams,
    ValidationError,
};
use serde::Serialize;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/leagues`
///
/// Lists every known league with its keys and the sources it supports.
pub async fn leagues() -> HttpResponse {
    let leagues: Vec<ApiLeague> = football_api_league::registry()
        .all()
        .iter()
        .map(ApiLeague::from)
        .collect();

    HttpResponse::Ok().json(ApiResponse::ok(leagues))
}

/// `GET /api/intro`
///
/// Lead section of the season's Wikipedia page.
pub async fn intro(
    state: web::Data<AppState>,
    query: web::Query<SeasonQueryParams>,
) -> HttpResponse {
    let params = match query.validate() {
        Ok(params) => params,
        Err(e) => return bad_request(&e),
    };

    envelope(
        "intro",
        intro::fetch_intro(&state.client, &params.league, params.season).await,
    )
}

/// `GET /api/infobox`
pub async fn infobox(
    state: web::Data<AppState>,
    query: web::Query<SeasonQueryParams>,
) -> HttpResponse {
    let params = match query.validate() {
        Ok(params) => params,
        Err(e) => return bad_request(&e),
    };

    envelope(
        "infobox",
        infobox::fetch_infobox(&state.client, &params.league, params.season).await,
    )
}

/// `GET /api/teams`
pub async fn teams(
    state: web::Data<AppState>,
    query: web::Query<SeasonQueryParams>,
) -> HttpResponse {
    let params = match query.validate() {
        Ok(params) => params,
        Err(e) => return bad_request(&e),
    };

    envelope(
        "teams",
        teams::fetch_teams(&state.client, &params.league, params.season).await,
    )
}

/// `GET /api/ranking`
///
/// Current standings; takes no season.
pub async fn ranking(
    state: web::Data<AppState>,
    query: web::Query<LeagueQueryParams>,
) -> HttpResponse {
    let params = match query.validate() {
        Ok(params) => params,
        Err(e) => return bad_request(&e),
    };

    envelope(
        "ranking",
        ranking::fetch_ranking(&state.client, &params.league).await,
    )
}

/// `GET /api/scorers`
pub async fn scorers(
    state: web::Data<AppState>,
    query: web::Query<SeasonQueryParams>,
) -> HttpResponse {
    let params = match query.validate() {
        Ok(params) => params,
        Err(e) => return bad_request(&e),
    };

    envelope(
        "scorers",
        scorers::fetch_scorers(&state.client, &params.league, params.season).await,
    )
}

/// `GET /api/gamedays`
pub async fn gamedays(
    state: web::Data<AppState>,
    query: web::Query<SeasonQueryParams>,
) -> HttpResponse {
    let params = match query.validate() {
        Ok(params) => params,
        Err(e) => return bad_request(&e),
    };

    envelope(
        "gamedays",
        gamedays::fetch_gamedays(&state.client, &params.league, params.season).await,
    )
}

/// Wraps an extractor result in the response envelope.
///
/// Extraction failures are part of the normal contract and keep status
/// 200; only internal faults become a 500.
fn envelope<T: Serialize>(route: &str, result: Result<T, ScrapeError>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::ok(data)),
        Err(e) if e.is_internal() => {
            log::error!("Internal error in /api/{route}: {e}");
            HttpResponse::InternalServerError().json(ApiError::internal())
        }
        Err(e) => {
            log::info!("/api/{route} failed: {e}");
            HttpResponse::Ok().json(ApiResponse::<T>::err(e.to_string()))
        }
    }
}

fn bad_request(error: &ValidationError) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::err(error.to_string()))
}

/// Rejects a query string that cannot be decoded at all with the same
/// envelope as a validation failure.
pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::err(err.to_string()));
    InternalError::from_response(err, response).into()
}
