//! Matchday schedule extractor.
//!
//! Season pages list each matchday as a `table[width="99%"]` under an `h3`
//! heading naming the round. Rows are classified by
//! [`MatchdayRow::classify`]; rows it cannot place are dropped.

use football_api_league_models::{Season, UpstreamSource};
use football_api_scraper_models::{MatchRecord, Matchday};
use scraper::{ElementRef, Html};

use crate::matchday_row::MatchdayRow;
use crate::{PageClient, ScrapeError, html, season_title, wiki_page_url};

/// Fetches the matchday schedule of the season page for `league_key`.
///
/// # Errors
///
/// Returns [`ScrapeError::League`] for an unknown key or a league without a
/// schedule, and [`ScrapeError::Upstream`] on network failure.
pub async fn fetch_gamedays(
    client: &PageClient,
    league_key: &str,
    season: Season,
) -> Result<Vec<Matchday>, ScrapeError> {
    let base = football_api_league::resolve(league_key, UpstreamSource::Schedule)?;
    let url = wiki_page_url(&client.config().wikipedia_url, &season_title(base, season));

    let body = client.fetch_html(&url).await?;
    parse_gamedays(&body)
}

/// Extracts every matchday table from a season page, in document order.
///
/// A page without matchday tables yields an empty list.
///
/// # Errors
///
/// Only fails if a selector fails to compile.
pub fn parse_gamedays(body: &str) -> Result<Vec<Matchday>, ScrapeError> {
    let document = Html::parse_document(body);

    let heading_sel = html::selector("h3")?;
    let table_sel = html::selector(r#"table[width="99%"]"#)?;
    let row_sel = html::selector("tr")?;
    let cell_sel = html::selector("td, th")?;

    let mut matchdays = Vec::new();
    let mut label: Option<String> = None;

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };

        if heading_sel.matches(&element) {
            label = Some(html::stripped_text(element));
        } else if table_sel.matches(&element) {
            let matches = table_matches(element, &row_sel, &cell_sel);
            log::debug!(
                "Matchday {:?}: {} matches",
                label.as_deref().unwrap_or("-"),
                matches.len()
            );
            matchdays.push(Matchday {
                label: label.clone(),
                matches,
            });
        }
    }

    Ok(matchdays)
}

fn table_matches(
    table: ElementRef<'_>,
    row_sel: &scraper::Selector,
    cell_sel: &scraper::Selector,
) -> Vec<MatchRecord> {
    table
        .select(row_sel)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(cell_sel).map(html::stripped_text).collect();
            let [first, second, third] = cells.as_slice() else {
                return None;
            };
            MatchdayRow::classify([first.as_str(), second.as_str(), third.as_str()]).into_record()
        })
        .collect()
}
