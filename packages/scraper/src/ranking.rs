//! Live league table extractor (Eurosport).
//!
//! The standings page is located by `data-testid` attributes rather than
//! classes. Each data row interleaves badge and spacer cells with the
//! values, so fields are read from fixed cell positions; a layout change
//! upstream will shift them.

use football_api_league_models::UpstreamSource;
use football_api_scraper_models::Standing;
use scraper::Html;

use crate::{BROWSER_USER_AGENT, PageClient, ScrapeError, html};

/// Rows with fewer cells than this are treated as malformed.
pub const MIN_CELLS: usize = 10;

/// Cell positions of rank, team, played, wins, draws, losses, goals for,
/// goals against, goal difference and points.
const COLUMNS: [usize; 10] = [1, 3, 5, 6, 7, 8, 9, 10, 11, 12];

/// Returns the standings URL for a Eurosport league slug.
#[must_use]
pub fn ranking_url(eurosport_url: &str, slug: &str) -> String {
    format!("{eurosport_url}/calcio/{slug}/classifica.shtml")
}

/// Fetches the current standings for `league_key`.
///
/// # Errors
///
/// Returns [`ScrapeError::League`] for an unknown or unsupported key,
/// [`ScrapeError::TableNotFound`] if the page has no standings table, and
/// [`ScrapeError::Upstream`] on network failure.
pub async fn fetch_ranking(
    client: &PageClient,
    league_key: &str,
) -> Result<Vec<Standing>, ScrapeError> {
    let slug = football_api_league::resolve(league_key, UpstreamSource::Ranking)?;
    let url = ranking_url(&client.config().eurosport_url, slug);

    let body = client.fetch_html_as(&url, BROWSER_USER_AGENT).await?;
    parse_ranking(&body)
}

/// Extracts the standings table from a Eurosport page, in table order.
///
/// # Errors
///
/// Returns [`ScrapeError::TableNotFound`] if there is no
/// `table[data-testid="table"]`.
pub fn parse_ranking(body: &str) -> Result<Vec<Standing>, ScrapeError> {
    let document = Html::parse_document(body);

    let table_sel = html::selector(r#"table[data-testid="table"]"#)?;
    let row_sel = html::selector(r#"tbody tr[data-testid="table-row-data"]"#)?;
    let cell_sel = html::selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScrapeError::TableNotFound("standings table not found on page".to_owned()))?;

    let mut standings = Vec::new();
    for row in table.select(&row_sel) {
        let cells: Vec<String> = row.select(&cell_sel).map(html::stripped_text).collect();

        if cells.len() < MIN_CELLS {
            log::debug!("Skipping standings row with {} cells", cells.len());
            continue;
        }

        let Some([rank, team, played, wins, draws, losses, gf, ga, gd, points]) =
            pick_columns(&cells)
        else {
            log::debug!(
                "Skipping standings row with {} cells: missing value columns",
                cells.len()
            );
            continue;
        };

        standings.push(Standing {
            rank,
            team,
            played,
            wins,
            draws,
            losses,
            goals_for: gf,
            goals_against: ga,
            goal_difference: gd,
            points,
        });
    }

    Ok(standings)
}

/// Reads the value cells out of a row, or `None` if the row is too short.
fn pick_columns(cells: &[String]) -> Option<[String; 10]> {
    let mut out: [String; 10] = Default::default();
    for (slot, idx) in out.iter_mut().zip(COLUMNS) {
        slot.clone_from(cells.get(idx)?);
    }
    Some(out)
}
