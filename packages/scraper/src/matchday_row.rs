//! Classification of a single three-cell matchday row.
//!
//! Wikipedia matchday tables mix a few row layouts:
//!
//! | first cell | second cell      | third cell | row kind                   |
//! |------------|------------------|------------|----------------------------|
//! | `20:45`    | `Home-Away`      | `2-1`/` `  | kick-off time, no date     |
//! | `12 mag.`  | `Home - Away`    | `2-1`      | played match               |
//! | `12 mag.`  | `Home - Away`    | `20:45`    | scheduled match            |
//!
//! Rules are checked in that order. Rows matching none of them are
//! [`MatchdayRow::Unparseable`] and dropped by the caller.

use football_api_scraper_models::MatchRecord;

/// Date placeholder for rows that only carry a kick-off time.
pub const NO_DATE: &str = "N/A";

/// Score placeholder for matches that have not been played.
pub const NO_SCORE: &str = "-";

/// A classified matchday row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchdayRow {
    /// The match has a final score.
    Scored {
        date: String,
        fixture: String,
        score: String,
        match_time: Option<String>,
    },
    /// The match is scheduled; the score is not known yet.
    Pending {
        date: String,
        fixture: String,
        match_time: Option<String>,
    },
    /// The row does not follow any known layout.
    Unparseable,
}

impl MatchdayRow {
    /// Classifies the stripped texts of a row's three cells.
    #[must_use]
    pub fn classify([first, second, third]: [&str; 3]) -> Self {
        if first.contains(':') {
            let date = NO_DATE.to_owned();
            let fixture = normalize_fixture(second);
            let match_time = Some(first.to_owned());

            return if third.contains('-') {
                Self::Scored {
                    date,
                    fixture,
                    score: third.to_owned(),
                    match_time,
                }
            } else {
                Self::Pending {
                    date,
                    fixture,
                    match_time,
                }
            };
        }

        if third.contains('-') {
            return Self::Scored {
                date: first.to_owned(),
                fixture: second.to_owned(),
                score: third.to_owned(),
                match_time: None,
            };
        }

        if third.contains(':') {
            return Self::Pending {
                date: first.to_owned(),
                fixture: second.to_owned(),
                match_time: Some(third.to_owned()),
            };
        }

        Self::Unparseable
    }

    /// Converts the row into a [`MatchRecord`], or `None` if it is
    /// [`MatchdayRow::Unparseable`].
    #[must_use]
    pub fn into_record(self) -> Option<MatchRecord> {
        match self {
            Self::Scored {
                date,
                fixture,
                score,
                match_time,
            } => Some(MatchRecord {
                date,
                fixture,
                score,
                match_time,
            }),
            Self::Pending {
                date,
                fixture,
                match_time,
            } => Some(MatchRecord {
                date,
                fixture,
                score: NO_SCORE.to_owned(),
                match_time,
            }),
            Self::Unparseable => None,
        }
    }
}

/// Rewrites `Home-Away` as `Home - Away`. Text without a hyphen is kept.
fn normalize_fixture(text: &str) -> String {
    match text.split_once('-') {
        Some((home, away)) => format!("{} - {}", home.trim(), away.trim()),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_only_row_without_score() {
        let record = MatchdayRow::classify(["20:45", "Team A - Team B", ""])
            .into_record()
            .unwrap();

        assert_eq!(record.date, "N/A");
        assert_eq!(record.fixture, "Team A - Team B");
        assert_eq!(record.score, "-");
        assert_eq!(record.match_time.as_deref(), Some("20:45"));
    }

    #[test]
    fn time_only_row_normalizes_fixture_spacing() {
        let row = MatchdayRow::classify(["18:00", "Inter-Milan", "2-1"]);
        assert_eq!(
            row,
            MatchdayRow::Scored {
                date: "N/A".to_owned(),
                fixture: "Inter - Milan".to_owned(),
                score: "2-1".to_owned(),
                match_time: Some("18:00".to_owned()),
            }
        );
    }

    #[test]
    fn dated_row_with_score() {
        let record = MatchdayRow::classify(["19 ago.", "Genoa - Inter", "1-4"])
            .into_record()
            .unwrap();

        assert_eq!(record.date, "19 ago.");
        assert_eq!(record.fixture, "Genoa - Inter");
        assert_eq!(record.score, "1-4");
        assert_eq!(record.match_time, None);
    }

    #[test]
    fn dated_row_with_kickoff_time() {
        let record = MatchdayRow::classify(["26 mag.", "Roma - Empoli", "20:45"])
            .into_record()
            .unwrap();

        assert_eq!(record.date, "26 mag.");
        assert_eq!(record.score, "-");
        assert_eq!(record.match_time.as_deref(), Some("20:45"));
    }

    #[test]
    fn unknown_layout_is_dropped() {
        let row = MatchdayRow::classify(["Rinviata", "Lazio - Torino", "n.d."]);
        assert_eq!(row, MatchdayRow::Unparseable);
        assert_eq!(row.into_record(), None);
    }
}
