//! Season intro extractor.
//!
//! Reads the lead section of a season's Wikipedia page through the
//! `MediaWiki` `extracts` API rather than scraping the page itself.
//!
//! See <https://www.mediawiki.org/wiki/Extension:TextExtracts#API>

use std::collections::BTreeMap;

use football_api_league_models::{Season, UpstreamSource};
use football_api_scraper_models::SeasonIntro;
use serde::Deserialize;

use crate::{PageClient, ScrapeError, html, season_title};

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: BTreeMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    title: Option<String>,
    extract: Option<String>,
    missing: Option<serde_json::Value>,
}

/// Returns the `MediaWiki` API endpoint for `wikipedia_url`.
#[must_use]
pub fn api_url(wikipedia_url: &str) -> String {
    format!("{wikipedia_url}/w/api.php")
}

/// Fetches the lead section of the season page for `league_key`.
///
/// # Errors
///
/// Returns [`ScrapeError::League`] for an unknown key,
/// [`ScrapeError::PageNotFound`] if the page does not exist,
/// [`ScrapeError::NoPages`] if the response lists no page, and
/// [`ScrapeError::Upstream`] on network failure.
pub async fn fetch_intro(
    client: &PageClient,
    league_key: &str,
    season: Season,
) -> Result<SeasonIntro, ScrapeError> {
    let base = football_api_league::resolve(league_key, UpstreamSource::Wikipedia)?;
    let title = season_title(base, season);
    let url = api_url(&client.config().wikipedia_url);

    let body: ExtractResponse = client
        .fetch_json(
            &url,
            &[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("titles", title.as_str()),
                ("format", "json"),
            ],
        )
        .await?;

    parse_intro(body, &title)
}

/// Maps a decoded `extracts` response to a [`SeasonIntro`].
fn parse_intro(body: ExtractResponse, title: &str) -> Result<SeasonIntro, ScrapeError> {
    let page = body
        .query
        .and_then(|q| q.pages.into_values().next())
        .ok_or(ScrapeError::NoPages)?;

    if page.missing.is_some() {
        return Err(ScrapeError::PageNotFound {
            title: title.to_owned(),
        });
    }

    let html = page.extract.unwrap_or_default();
    let text = html::strip_tags(&html);

    Ok(SeasonIntro {
        title: page.title.unwrap_or_else(|| title.to_owned()),
        html,
        text,
    })
}

/// Parses a raw `extracts` response body.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] for malformed JSON,
/// [`ScrapeError::NoPages`] when the response lists no page, and
/// [`ScrapeError::PageNotFound`] when the page is marked missing.
pub fn parse_intro_json(body: &str, title: &str) -> Result<SeasonIntro, ScrapeError> {
    let body: ExtractResponse =
        serde_json::from_str(body).map_err(|e| ScrapeError::Parse(e.to_string()))?;
    parse_intro(body, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lead_section() {
        let body = r#"{
            "batchcomplete": "",
            "query": {
                "pages": {
                    "9387711": {
                        "pageid": 9387711,
                        "ns": 0,
                        "title": "Serie A 2023-2024",
                        "extract": "<p>La <b>Serie A 2023-2024</b> è stata la 122ª edizione.</p>"
                    }
                }
            }
        }"#;

        let intro = parse_intro_json(body, "Serie_A_2023-2024").unwrap();
        assert_eq!(intro.title, "Serie A 2023-2024");
        assert!(intro.html.starts_with("<p>"));
        assert_eq!(intro.text, "La Serie A 2023-2024 è stata la 122ª edizione.");
    }

    #[test]
    fn missing_page_is_page_not_found() {
        let body = r#"{
            "query": {
                "pages": {
                    "-1": { "ns": 0, "title": "Serie A 1800-1801", "missing": "" }
                }
            }
        }"#;

        let err = parse_intro_json(body, "Serie_A_1800-1801").unwrap_err();
        assert!(matches!(err, ScrapeError::PageNotFound { .. }));
        assert!(err.to_string().contains("Serie_A_1800-1801"));
    }

    #[test]
    fn empty_pages_is_reported_as_no_pages() {
        let err = parse_intro_json(r#"{"query": {"pages": {}}}"#, "X").unwrap_err();
        assert!(matches!(err, ScrapeError::NoPages));
        assert_eq!(err.to_string(), "No pages found in the response.");

        let err = parse_intro_json("{}", "X").unwrap_err();
        assert!(matches!(err, ScrapeError::NoPages));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_intro_json("<html>", "X").unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[tokio::test]
    async fn unknown_league_never_hits_the_network() {
        let client = PageClient::new(
            crate::ScrapeConfig::new().with_wikipedia_url("http://127.0.0.1:9"),
        )
        .unwrap();
        let err = fetch_intro(&client, "madeup", Season::new(2023, 2024))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::League(_)));
        assert!(err.to_string().contains("madeup"));
    }

    #[tokio::test]
    async fn fetches_through_the_extracts_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/w/api.php")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("titles".into(), "Serie_A_2023-2024".into()),
                mockito::Matcher::UrlEncoded("prop".into(), "extracts".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"query":{"pages":{"1":{"title":"Serie A 2023-2024","extract":"<p>Intro</p>"}}}}"#,
            )
            .create_async()
            .await;

        let client =
            PageClient::new(crate::ScrapeConfig::new().with_wikipedia_url(&server.url())).unwrap();
        let intro = fetch_intro(&client, "SerieA", Season::new(2023, 2024))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(intro.text, "Intro");
    }
}
