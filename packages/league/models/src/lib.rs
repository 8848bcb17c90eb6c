#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! League definition types shared across the football API.
//!
//! A [`LeagueDefinition`] is deserialized from an embedded TOML file and
//! records, for each upstream site, how that site names the competition.
//! A missing entry in [`LeagueSources`] means the league is not available
//! on that site.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// An upstream site (or page family) the extractors read from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UpstreamSource {
    /// Wikipedia season pages (intro, infobox, team list).
    Wikipedia,
    /// Wikipedia season pages carrying the full matchday bracket.
    Schedule,
    /// Eurosport live standings pages.
    Ranking,
    /// Eurosport per-season top scorer pages.
    Scorers,
}

impl UpstreamSource {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Wikipedia, Self::Schedule, Self::Ranking, Self::Scorers]
    }
}

/// A supported competition, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueDefinition {
    /// Canonical identifier (e.g., `"serie_a"`).
    pub id: String,
    /// Human-readable name (e.g., "Serie A").
    pub name: String,
    /// Request keys that resolve to this league (e.g., `["SerieA", "italy"]`).
    pub keys: Vec<String>,
    /// Per-site naming for this league.
    pub sources: LeagueSources,
}

impl LeagueDefinition {
    /// Returns the path fragment this league uses on `source`, if the
    /// league is available there.
    #[must_use]
    pub fn source(&self, source: UpstreamSource) -> Option<&str> {
        self.sources.get(source)
    }

    /// Lists the upstream sources this league is available on.
    #[must_use]
    pub fn supported_sources(&self) -> Vec<UpstreamSource> {
        UpstreamSource::all()
            .iter()
            .copied()
            .filter(|s| self.sources.get(*s).is_some())
            .collect()
    }
}

/// How each upstream site names a league.
///
/// Wikipedia entries are page-title bases with underscores
/// (`"Premier_League"`); Eurosport entries are URL slugs with hyphens
/// (`"Premier-League"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSources {
    /// Wikipedia page-title base for season pages.
    pub wikipedia: Option<String>,
    /// Wikipedia page-title base for season pages with a matchday bracket.
    pub schedule: Option<String>,
    /// Eurosport standings slug.
    pub ranking: Option<String>,
    /// Eurosport top-scorer slug.
    pub scorers: Option<String>,
}

impl LeagueSources {
    /// Returns the entry for `source`, if present.
    #[must_use]
    pub fn get(&self, source: UpstreamSource) -> Option<&str> {
        match source {
            UpstreamSource::Wikipedia => self.wikipedia.as_deref(),
            UpstreamSource::Schedule => self.schedule.as_deref(),
            UpstreamSource::Ranking => self.ranking.as_deref(),
            UpstreamSource::Scorers => self.scorers.as_deref(),
        }
    }
}

/// A competition season such as 2023-2024.
///
/// No relation between `start` and `end` is enforced; the upstream page
/// simply won't exist for an inconsistent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season {
    /// First calendar year of the season.
    pub start: u16,
    /// Last calendar year of the season.
    pub end: u16,
}

impl Season {
    /// Creates a season from its start and end years.
    #[must_use]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
