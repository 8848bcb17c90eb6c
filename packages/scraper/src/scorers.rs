//! Top scorers extractor (Eurosport).

use football_api_league_models::{Season, UpstreamSource};
use football_api_scraper_models::Scorer;
use scraper::Html;

use crate::{PageClient, ScrapeError, html};

/// Minimum number of cells a scorer row must have.
pub const MIN_CELLS: usize = 5;

/// Returns the per-season top scorers URL for a Eurosport league slug.
#[must_use]
pub fn scorers_url(eurosport_url: &str, slug: &str, season: Season) -> String {
    format!("{eurosport_url}/calcio/{slug}/{season}/standingperson.shtml")
}

/// Fetches the top scorers of `league_key` in `season`.
///
/// # Errors
///
/// Returns [`ScrapeError::League`] for an unknown or unsupported key,
/// [`ScrapeError::TableNotFound`] if the page has no scorer table, and
/// [`ScrapeError::Upstream`] on network failure.
pub async fn fetch_scorers(
    client: &PageClient,
    league_key: &str,
    season: Season,
) -> Result<Vec<Scorer>, ScrapeError> {
    let slug = football_api_league::resolve(league_key, UpstreamSource::Scorers)?;
    let url = scorers_url(&client.config().eurosport_url, slug, season);

    let body = client.fetch_html(&url).await?;
    parse_scorers(&body)
}

/// Extracts the scorer table from a Eurosport page.
///
/// The player cell also carries the team name in a `span.team-name`; that
/// span is left out so the two don't run together.
///
/// # Errors
///
/// Returns [`ScrapeError::TableNotFound`] if there is no
/// `table.standing-table`.
pub fn parse_scorers(body: &str) -> Result<Vec<Scorer>, ScrapeError> {
    let document = Html::parse_document(body);

    let table_sel = html::selector("table.standing-table")?;
    let row_sel = html::selector("tr")?;
    let cell_sel = html::selector("td")?;
    let team_label_sel = html::selector("span.team-name")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScrapeError::TableNotFound("top scorers table not found".to_owned()))?;

    let mut scorers = Vec::new();
    for row in table.select(&row_sel).skip(1) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() < MIN_CELLS {
            continue;
        }

        scorers.push(Scorer {
            position: html::stripped_text(cells[0]),
            player: html::stripped_text_excluding(cells[1], &team_label_sel),
            team: html::stripped_text(cells[2]),
            appearances: html::stripped_text(cells[3]),
            goals: html::stripped_text(cells[4]),
        });
    }

    Ok(scorers)
}
