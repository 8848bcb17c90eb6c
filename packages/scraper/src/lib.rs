#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Page extractors for football season data.
//!
//! Each module fetches one kind of upstream page and maps a fixed
//! structural pattern in it to a record from
//! [`football_api_scraper_models`]:
//!
//! * [`intro`]: lead section via the `MediaWiki` API
//! * [`infobox`]: the season page's summary table
//! * [`teams`]: the participating-teams table
//! * [`ranking`]: Eurosport's live standings
//! * [`scorers`]: Eurosport's per-season top scorers
//! * [`gamedays`]: the season's matchday bracket
//!
//! Extractors are stateless: one fetch through a shared [`PageClient`],
//! one parse, no caching and no retries. Every `parse_*` function is
//! exposed separately so it can be exercised against fixture markup.

pub mod client;
pub mod gamedays;
pub mod html;
pub mod infobox;
pub mod intro;
pub mod matchday_row;
pub mod ranking;
pub mod scorers;
pub mod teams;

use std::collections::BTreeMap;
use std::time::Duration;

use football_api_league::LeagueError;
use football_api_league_models::Season;

pub use client::PageClient;

/// Default Wikipedia host; season pages are read from the Italian edition.
pub const DEFAULT_WIKIPEDIA_URL: &str = "https://it.wikipedia.org";

/// Default Eurosport host.
pub const DEFAULT_EUROSPORT_URL: &str = "https://www.eurosport.it";

/// Default timeout for a single outbound fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent sent to sites that accept ordinary clients.
pub const DEFAULT_USER_AGENT: &str = concat!("football_api/", env!("CARGO_PKG_VERSION"));

/// User-Agent sent to Eurosport's standings pages, which reject
/// non-browser clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Errors that can occur while fetching or extracting a page.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The league key is unknown or not covered by the upstream site.
    #[error(transparent)]
    League(#[from] LeagueError),

    /// The `MediaWiki` API has no page with this title.
    #[error("The page '{title}' does not exist on Wikipedia.")]
    PageNotFound {
        /// The requested page title.
        title: String,
    },

    /// The `MediaWiki` API response lists no pages at all.
    #[error("No pages found in the response.")]
    NoPages,

    /// The anchor the target table hangs off is absent.
    #[error("Section '{section}' not found.")]
    SectionNotFound {
        /// Human-readable section name.
        section: String,
    },

    /// The expected table is absent from the page.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The page has no infobox.
    #[error("Infobox not found in the page.")]
    InfoboxNotFound,

    /// The HTTP request failed, timed out, or returned a non-2xx status.
    #[error("Request error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The upstream payload could not be interpreted.
    #[error("Parsing error: {0}")]
    Parse(String),

    /// An extractor's own CSS selector failed to compile.
    #[error("Invalid CSS selector: {0}")]
    Selector(String),
}

impl ScrapeError {
    /// Whether this error points at a defect in the extractor itself
    /// rather than at the request or the upstream page.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Selector(_))
    }
}

/// Configuration shared by every extractor.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Wikipedia base URL, without trailing slash.
    pub wikipedia_url: String,
    /// Eurosport base URL, without trailing slash.
    pub eurosport_url: String,
    /// Timeout applied to every outbound request.
    pub timeout: Duration,
    /// Default User-Agent header.
    pub user_agent: String,
    /// Additional HTTP headers to include in requests.
    pub headers: BTreeMap<String, String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            wikipedia_url: DEFAULT_WIKIPEDIA_URL.to_owned(),
            eurosport_url: DEFAULT_EUROSPORT_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            headers: BTreeMap::new(),
        }
    }
}

impl ScrapeConfig {
    /// Creates a new `ScrapeConfig` pointing at the public upstream sites.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the Wikipedia base URL.
    #[must_use]
    pub fn with_wikipedia_url(mut self, url: &str) -> Self {
        url.trim_end_matches('/').clone_into(&mut self.wikipedia_url);
        self
    }

    /// Overrides the Eurosport base URL.
    #[must_use]
    pub fn with_eurosport_url(mut self, url: &str) -> Self {
        url.trim_end_matches('/').clone_into(&mut self.eurosport_url);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the default User-Agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        user_agent.clone_into(&mut self.user_agent);
        self
    }

    /// Adds an HTTP header to include in requests.
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_owned(), value.to_owned());
        self
    }
}

/// Builds a season page title such as `Serie_A_2023-2024` from a registry
/// title base. A trailing underscore on the base is ignored.
#[must_use]
pub fn season_title(base: &str, season: Season) -> String {
    format!("{}_{season}", base.trim_end_matches('_'))
}

/// Returns the URL of a Wikipedia page.
#[must_use]
pub fn wiki_page_url(wikipedia_url: &str, title: &str) -> String {
    format!("{wikipedia_url}/wiki/{title}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_season_titles() {
        let season = Season::new(2023, 2024);
        assert_eq!(season_title("Serie_A", season), "Serie_A_2023-2024");
        assert_eq!(season_title("Serie_A_", season), "Serie_A_2023-2024");
    }

    #[test]
    fn config_trims_trailing_slashes() {
        let config = ScrapeConfig::new()
            .with_wikipedia_url("http://127.0.0.1:1234/")
            .with_eurosport_url("http://127.0.0.1:5678");
        assert_eq!(config.wikipedia_url, "http://127.0.0.1:1234");
        assert_eq!(config.eurosport_url, "http://127.0.0.1:5678");
    }

    #[test]
    fn league_errors_keep_their_message() {
        let err = ScrapeError::from(LeagueError::NotFound {
            key: "madeup".to_owned(),
        });
        assert!(err.to_string().contains("madeup"));
        assert!(!err.is_internal());
        assert!(ScrapeError::Selector("x".to_owned()).is_internal());
    }
}
