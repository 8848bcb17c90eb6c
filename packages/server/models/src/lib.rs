#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the football API server.
//!
//! Query strings are deserialized leniently into `*QueryParams` (every
//! field optional, every value a string) and then validated into typed
//! parameters, so a malformed request always produces a
//! [`ValidationError`] message rather than a framework rejection.

use football_api_league_models::{LeagueDefinition, Season, UpstreamSource};
use serde::{Deserialize, Serialize};

/// Accepted length range of a league key, in characters.
pub const LEAGUE_KEY_LENGTH: std::ops::RangeInclusive<usize> = 2..=30;

/// Accepted range of season years.
pub const SEASON_YEARS: std::ops::RangeInclusive<u16> = 1990..=2100;

/// Description returned with every unexpected internal failure.
pub const INTERNAL_ERROR_DESCRIPTION: &str = "An unexpected error occurred. Please contact support.";

/// The result envelope returned by every data route.
///
/// Exactly one of `data` and `error` is set; both are always serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request produced data.
    pub success: bool,
    /// The extracted record on success.
    pub data: Option<T>,
    /// Human-readable reason on failure.
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful envelope carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed envelope carrying `message`.
    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Details of a framework-level or internal HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// HTTP status code.
    pub code: u16,
    /// Canonical status name, e.g. `Not Found`.
    pub name: String,
    /// Longer explanation.
    pub description: String,
}

/// Body returned for unknown routes, disallowed methods and internal
/// faults: `{success: false, error: {code, name, description}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Always `false`.
    pub success: bool,
    /// What went wrong.
    pub error: ApiErrorDetail,
}

impl ApiError {
    /// Builds an error body for `code`.
    #[must_use]
    pub fn new(code: u16, name: &str, description: &str) -> Self {
        Self {
            success: false,
            error: ApiErrorDetail {
                code,
                name: name.to_owned(),
                description: description.to_owned(),
            },
        }
    }

    /// The generic body for an unexpected internal failure.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(500, "Internal Server Error", INTERNAL_ERROR_DESCRIPTION)
    }

    /// The body for an unknown route.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(
            404,
            "Not Found",
            "The requested URL was not found on the server. If you entered the URL \
             manually please check your spelling and try again.",
        )
    }

    /// The body for a known route called with the wrong method.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(
            405,
            "Method Not Allowed",
            "The method is not allowed for the requested URL.",
        )
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A league as listed by `GET /api/leagues`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLeague {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Keys accepted by the `league` parameter.
    pub keys: Vec<String>,
    /// Upstream sources this league can be fetched from.
    pub sources: Vec<UpstreamSource>,
}

impl From<&LeagueDefinition> for ApiLeague {
    fn from(def: &LeagueDefinition) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            keys: def.keys.clone(),
            sources: def.supported_sources(),
        }
    }
}

/// A query parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required parameter is absent or empty.
    #[error("Missing required parameter '{0}'.")]
    Missing(&'static str),

    /// The league key is too short or too long.
    #[error("Parameter 'league' must be between {min} and {max} characters long.")]
    LeagueLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// A year is not an integer.
    #[error("Parameter '{name}' must be an integer, got '{value}'.")]
    NotAnInteger {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A year is outside the accepted range.
    #[error("Parameter '{name}' must be between {min} and {max}, got {value}.")]
    YearOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: i64,
        /// Lowest accepted year.
        min: u16,
        /// Highest accepted year.
        max: u16,
    },
}

/// Raw query string of the league-only routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueQueryParams {
    /// League key.
    pub league: Option<String>,
}

/// Raw query string of the per-season routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonQueryParams {
    /// League key.
    pub league: Option<String>,
    /// First year of the season.
    pub start: Option<String>,
    /// Second year of the season.
    pub end: Option<String>,
}

/// Validated parameters of a league-only route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueParams {
    /// League key, as given.
    pub league: String,
}

/// Validated parameters of a per-season route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonParams {
    /// League key, as given.
    pub league: String,
    /// The requested season.
    pub season: Season,
}

impl LeagueQueryParams {
    /// Validates the raw query.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `league` is missing or has the
    /// wrong length.
    pub fn validate(&self) -> Result<LeagueParams, ValidationError> {
        Ok(LeagueParams {
            league: validate_league(self.league.as_deref())?,
        })
    }
}

impl SeasonQueryParams {
    /// Validates the raw query.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the first parameter, in
    /// `league`, `start`, `end` order, that is missing or invalid.
    pub fn validate(&self) -> Result<SeasonParams, ValidationError> {
        let league = validate_league(self.league.as_deref())?;
        let start = validate_year("start", self.start.as_deref())?;
        let end = validate_year("end", self.end.as_deref())?;

        Ok(SeasonParams {
            league,
            season: Season::new(start, end),
        })
    }
}

fn validate_league(value: Option<&str>) -> Result<String, ValidationError> {
    let league = value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing("league"))?;

    if !LEAGUE_KEY_LENGTH.contains(&league.chars().count()) {
        return Err(ValidationError::LeagueLength {
            min: *LEAGUE_KEY_LENGTH.start(),
            max: *LEAGUE_KEY_LENGTH.end(),
        });
    }

    Ok(league.to_owned())
}

fn validate_year(name: &'static str, value: Option<&str>) -> Result<u16, ValidationError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing(name))?;

    let year: i64 = raw.parse().map_err(|_| ValidationError::NotAnInteger {
        name,
        value: raw.to_owned(),
    })?;

    u16::try_from(year)
        .ok()
        .filter(|y| SEASON_YEARS.contains(y))
        .ok_or(ValidationError::YearOutOfRange {
            name,
            value: year,
            min: *SEASON_YEARS.start(),
            max: *SEASON_YEARS.end(),
        })
}
