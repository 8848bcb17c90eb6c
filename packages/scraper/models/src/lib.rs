#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Records produced by the football page extractors.
//!
//! These types are serialized to JSON by the API server as the `data`
//! member of the response envelope. Field names on the wire follow the
//! labels the public API has always used (`"goals scored"`, `"Goals +/-"`,
//! ...), hence the explicit renames.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// An ordered string-to-string mapping.
///
/// Serializes as a JSON object whose keys keep insertion order. Inserting
/// an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(Vec<(String, String)>);

impl FieldMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: String, value: String) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Lead section of a season's Wikipedia page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonIntro {
    /// Page title as reported by the MediaWiki API.
    pub title: String,
    /// Lead section as HTML.
    pub html: String,
    /// Lead section with tags stripped.
    pub text: String,
}

/// A top-level infobox entry: either a plain value or a named section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InfoboxEntry {
    /// A key/value row outside any section.
    Value(String),
    /// The key/value rows following a full-width section header.
    Section(FieldMap),
}

/// The structured summary table of a Wikipedia page, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Infobox {
    entries: Vec<(String, InfoboxEntry)>,
}

impl Infobox {
    /// Creates an empty infobox.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Opens a section named `name`. A section with the same name is
    /// replaced by an empty one.
    pub fn open_section(&mut self, name: String) {
        self.set(name, InfoboxEntry::Section(FieldMap::new()));
    }

    /// Records a key/value pair under `section` (which must have been
    /// opened) or at the top level when `section` is `None`.
    pub fn insert(&mut self, section: Option<&str>, key: String, value: String) {
        match section {
            Some(name) => {
                if let Some(InfoboxEntry::Section(fields)) = self
                    .entries
                    .iter_mut()
                    .find(|(k, _)| k == name)
                    .map(|(_, e)| e)
                {
                    fields.insert(key, value);
                }
            }
            None => self.set(key, InfoboxEntry::Value(value)),
        }
    }

    /// Returns the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&InfoboxEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the infobox has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, key: String, entry: InfoboxEntry) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = entry;
        } else {
            self.entries.push((key, entry));
        }
    }
}

impl Serialize for Infobox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One row of a season's participating-teams table, keyed by column header.
pub type TeamRow = FieldMap;

/// One team's line in the live league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Table position.
    #[serde(rename = "Rank")]
    pub rank: String,
    /// Team name.
    #[serde(rename = "Team")]
    pub team: String,
    /// Matches played.
    #[serde(rename = "Match")]
    pub played: String,
    /// Matches won.
    #[serde(rename = "Win")]
    pub wins: String,
    /// Matches drawn.
    #[serde(rename = "Draw")]
    pub draws: String,
    /// Matches lost.
    #[serde(rename = "Loss")]
    pub losses: String,
    /// Goals scored.
    #[serde(rename = "goals scored")]
    pub goals_for: String,
    /// Goals conceded.
    #[serde(rename = "goals conceded")]
    pub goals_against: String,
    /// Goal difference.
    #[serde(rename = "Goals +/-")]
    pub goal_difference: String,
    /// Points.
    #[serde(rename = "Points")]
    pub points: String,
}

/// One player's line in a season's top-scorer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorer {
    /// Ranking position.
    #[serde(rename = "Position")]
    pub position: String,
    /// Player name.
    #[serde(rename = "Player")]
    pub player: String,
    /// Team name.
    #[serde(rename = "Team")]
    pub team: String,
    /// Appearances.
    #[serde(rename = "Appearances")]
    pub appearances: String,
    /// Goals scored.
    #[serde(rename = "Goals")]
    pub goals: String,
}

/// A single fixture from a season's matchday bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Date cell text, or `"N/A"` for rows that only carry a kickoff time.
    pub date: String,
    /// Fixture, `"Home - Away"`.
    #[serde(rename = "match")]
    pub fixture: String,
    /// Final score, or `"-"` when not yet played.
    pub score: String,
    /// Kickoff time when the row carries one.
    pub match_time: Option<String>,
}

/// One matchday: its heading and its fixtures in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchday {
    /// Nearest heading preceding the matchday table.
    pub label: Option<String>,
    /// Fixtures played on this matchday.
    pub matches: Vec<MatchRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_map_keeps_insertion_order() {
        let row: FieldMap = [
            ("Squadra".to_owned(), "Inter".to_owned()),
            ("Città".to_owned(), "Milano".to_owned()),
            ("Allenatore".to_owned(), "Inzaghi".to_owned()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"Squadra":"Inter","Città":"Milano","Allenatore":"Inzaghi"}"#
        );
    }

    #[test]
    fn field_map_insert_replaces() {
        let mut map = FieldMap::new();
        map.insert("a".to_owned(), "1".to_owned());
        map.insert("a".to_owned(), "2".to_owned());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some("2"));
    }

    #[test]
    fn infobox_nests_sections() {
        let mut infobox = Infobox::new();
        infobox.insert(None, "Sport".to_owned(), "Calcio".to_owned());
        infobox.open_section("Risultati".to_owned());
        infobox.insert(
            Some("Risultati"),
            "Vincitore".to_owned(),
            "Inter".to_owned(),
        );

        let json = serde_json::to_value(&infobox).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Sport": "Calcio",
                "Risultati": { "Vincitore": "Inter" }
            })
        );
    }

    #[test]
    fn standing_uses_public_field_names() {
        let standing = Standing {
            rank: "1".to_owned(),
            team: "Inter".to_owned(),
            played: "38".to_owned(),
            wins: "29".to_owned(),
            draws: "7".to_owned(),
            losses: "2".to_owned(),
            goals_for: "89".to_owned(),
            goals_against: "22".to_owned(),
            goal_difference: "67".to_owned(),
            points: "94".to_owned(),
        };
        let json = serde_json::to_value(&standing).unwrap();
        assert_eq!(json["goals scored"], "89");
        assert_eq!(json["Goals +/-"], "67");
        assert_eq!(json.as_object().unwrap().len(), 10);
    }

    #[test]
    fn match_record_serializes_match_key() {
        let record = MatchRecord {
            date: "19 ago.".to_owned(),
            fixture: "Inter - Monza".to_owned(),
            score: "2-0".to_owned(),
            match_time: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["match"], "Inter - Monza");
        assert!(json["match_time"].is_null());
    }
}
