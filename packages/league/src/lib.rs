#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! League registry: loads every supported league from embedded TOML.
//!
//! Each `.toml` file in `packages/league/leagues/` is baked into the binary
//! at compile time via [`include_str!`] and parsed once, on first use, into
//! a process-wide [`LeagueRegistry`]. Adding a league is a matter of
//! creating a new TOML file and adding it to the list below.
//!
//! Upstream URL conventions are irregular (Eurosport calls the Primeira
//! Liga `superliga`), so every source name is spelled out per league
//! rather than derived.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use football_api_league_models::{LeagueDefinition, UpstreamSource};

/// TOML configs embedded at compile time.
const LEAGUE_TOMLS: &[(&str, &str)] = &[
    ("serie_a", include_str!("../leagues/serie_a.toml")),
    ("serie_b", include_str!("../leagues/serie_b.toml")),
    (
        "premier_league",
        include_str!("../leagues/premier_league.toml"),
    ),
    ("bundesliga", include_str!("../leagues/bundesliga.toml")),
    ("ligue_1", include_str!("../leagues/ligue_1.toml")),
    ("eredivisie", include_str!("../leagues/eredivisie.toml")),
    ("primeira_liga", include_str!("../leagues/primeira_liga.toml")),
    ("pro_league", include_str!("../leagues/pro_league.toml")),
    ("super_lig", include_str!("../leagues/super_lig.toml")),
    (
        "scottish_premiership",
        include_str!("../leagues/scottish_premiership.toml"),
    ),
    (
        "russian_premier_league",
        include_str!("../leagues/russian_premier_league.toml"),
    ),
    (
        "swiss_super_league",
        include_str!("../leagues/swiss_super_league.toml"),
    ),
];

/// Total number of configured leagues (used in tests).
#[cfg(test)]
const EXPECTED_LEAGUE_COUNT: usize = 12;

static REGISTRY: LazyLock<LeagueRegistry> = LazyLock::new(LeagueRegistry::load);

/// Errors from league key resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeagueError {
    /// No league answers to this key.
    #[error("League key '{key}' not found in dictionary.")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// The league exists but the upstream site does not cover it.
    #[error("League key '{key}' is not available on the {upstream} source.")]
    Unsupported {
        /// The key that was looked up.
        key: String,
        /// The upstream site that lacks the league.
        upstream: UpstreamSource,
    },

    /// Two league definitions claim the same key.
    #[error("League key '{key}' is claimed by more than one league.")]
    DuplicateKey {
        /// The contested key.
        key: String,
    },
}

/// Immutable lookup table from request keys to league definitions.
#[derive(Debug)]
pub struct LeagueRegistry {
    leagues: Vec<LeagueDefinition>,
    by_key: BTreeMap<String, usize>,
}

impl LeagueRegistry {
    /// Builds the registry from the embedded TOML configs.
    ///
    /// # Panics
    ///
    /// Panics if any TOML config is malformed or two leagues claim the same
    /// key. Both are development errors since the configs are embedded.
    fn load() -> Self {
        let leagues: Vec<LeagueDefinition> = LEAGUE_TOMLS
            .iter()
            .map(|(name, toml_str)| {
                toml::from_str(toml_str)
                    .unwrap_or_else(|e| panic!("Failed to parse league '{name}': {e}"))
            })
            .collect();

        Self::from_definitions(leagues).unwrap_or_else(|e| panic!("Invalid league registry: {e}"))
    }

    /// Builds a registry from explicit definitions.
    ///
    /// # Errors
    ///
    /// Returns [`LeagueError::DuplicateKey`] for the first key claimed by
    /// more than one league.
    pub fn from_definitions(leagues: Vec<LeagueDefinition>) -> Result<Self, LeagueError> {
        let mut by_key = BTreeMap::new();
        for (idx, league) in leagues.iter().enumerate() {
            for key in &league.keys {
                if by_key.insert(key.clone(), idx).is_some() {
                    return Err(LeagueError::DuplicateKey { key: key.clone() });
                }
            }
        }

        log::debug!("Loaded {} leagues ({} keys)", leagues.len(), by_key.len());
        Ok(Self { leagues, by_key })
    }

    /// Returns every configured league, in declaration order.
    #[must_use]
    pub fn all(&self) -> &[LeagueDefinition] {
        &self.leagues
    }

    /// Looks up the league a request key refers to. Matching is exact and
    /// case-sensitive.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&LeagueDefinition> {
        self.by_key.get(key).map(|idx| &self.leagues[*idx])
    }

    /// Resolves a request key to the path fragment `source` uses for the
    /// league.
    ///
    /// # Errors
    ///
    /// Returns [`LeagueError::NotFound`] for an unknown key and
    /// [`LeagueError::Unsupported`] when the league has no entry for
    /// `source`.
    pub fn resolve(&self, key: &str, source: UpstreamSource) -> Result<&str, LeagueError> {
        let league = self.lookup(key).ok_or_else(|| {
            log::warn!("Unknown league key '{key}'");
            LeagueError::NotFound {
                key: key.to_owned(),
            }
        })?;

        league.source(source).ok_or_else(|| {
            log::warn!("League '{}' has no {source} entry", league.id);
            LeagueError::Unsupported {
                key: key.to_owned(),
                upstream: source,
            }
        })
    }
}

/// Returns the process-wide league registry.
#[must_use]
pub fn registry() -> &'static LeagueRegistry {
    &REGISTRY
}

/// Shorthand for [`LeagueRegistry::resolve`] on the process-wide registry.
///
/// # Errors
///
/// See [`LeagueRegistry::resolve`].
pub fn resolve(key: &str, source: UpstreamSource) -> Result<&'static str, LeagueError> {
    registry().resolve(key, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_leagues() {
        assert_eq!(registry().all().len(), EXPECTED_LEAGUE_COUNT);
    }

    #[test]
    fn league_ids_are_unique() {
        let mut ids: Vec<&str> = registry().all().iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EXPECTED_LEAGUE_COUNT);
    }

    #[test]
    fn all_leagues_have_keys_and_a_wikipedia_title() {
        for league in registry().all() {
            assert!(!league.keys.is_empty(), "{}: no keys", league.id);
            assert!(
                league.source(UpstreamSource::Wikipedia).is_some(),
                "{}: no wikipedia title",
                league.id
            );
        }
    }

    #[test]
    fn aliases_resolve_to_the_same_league() {
        let a = resolve("SerieA", UpstreamSource::Wikipedia).unwrap();
        let b = resolve("italy", UpstreamSource::Wikipedia).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "Serie_A");
        assert_eq!(
            resolve("holland", UpstreamSource::Ranking).unwrap(),
            resolve("netherlands", UpstreamSource::Ranking).unwrap()
        );
    }

    #[test]
    fn eurosport_slugs_differ_from_wikipedia_titles() {
        assert_eq!(
            resolve("portugal", UpstreamSource::Ranking).unwrap(),
            "superliga"
        );
        assert_eq!(
            resolve("PremierLeague", UpstreamSource::Scorers).unwrap(),
            "Premier-League"
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(registry().lookup("SerieA").is_some());
        assert!(registry().lookup("seriea").is_none());
        assert!(registry().lookup("Italy").is_none());
    }

    #[test]
    fn unknown_key_is_not_found() {
        let err = resolve("madeup", UpstreamSource::Ranking).unwrap_err();
        assert_eq!(
            err,
            LeagueError::NotFound {
                key: "madeup".to_owned()
            }
        );
        assert!(err.to_string().contains("madeup"));
    }

    #[test]
    fn coverage_gaps_are_unsupported() {
        let err = resolve("SerieB", UpstreamSource::Ranking).unwrap_err();
        assert!(matches!(err, LeagueError::Unsupported { .. }));
        assert!(err.to_string().contains("SerieB"));

        assert!(resolve("turkey", UpstreamSource::Ranking).is_ok());
        assert!(resolve("turkey", UpstreamSource::Scorers).is_err());
        assert!(resolve("belgium", UpstreamSource::Ranking).is_err());
    }

    #[test]
    fn schedule_covers_five_leagues() {
        let count = registry()
            .all()
            .iter()
            .filter(|l| l.source(UpstreamSource::Schedule).is_some())
            .count();
        assert_eq!(count, 5);
        assert!(resolve("SerieB", UpstreamSource::Schedule).is_ok());
        assert!(resolve("netherlands", UpstreamSource::Schedule).is_err());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let league: LeagueDefinition = toml::from_str(
            r#"
            id = "dup"
            name = "Dup"
            keys = ["Same"]

            [sources]
            wikipedia = "Dup"
            "#,
        )
        .unwrap();
        let err = LeagueRegistry::from_definitions(vec![league.clone(), league]).unwrap_err();
        assert_eq!(
            err,
            LeagueError::DuplicateKey {
                key: "Same".to_owned()
            }
        );
        assert!(err.to_string().contains("'Same'"));
    }
}
