//! Participating-teams table extractor.
//!
//! Locates the `Squadre_partecipanti` anchor on a season page, then the
//! first `table.wikitable` after it, and extracts each row into a
//! [`TeamRow`] keyed by the column headers found in the table's first row.

use football_api_league_models::{Season, UpstreamSource};
use football_api_scraper_models::TeamRow;
use scraper::Html;

use crate::{PageClient, ScrapeError, html, season_title, wiki_page_url};

/// Element id of the participating-teams heading.
pub const SECTION_ID: &str = "Squadre_partecipanti";

/// Fetches the participating-teams table of the season page for
/// `league_key`.
///
/// # Errors
///
/// Returns [`ScrapeError::League`] for an unknown key,
/// [`ScrapeError::SectionNotFound`] or [`ScrapeError::TableNotFound`] when
/// the page lacks the expected structure, and [`ScrapeError::Upstream`] on
/// network failure.
pub async fn fetch_teams(
    client: &PageClient,
    league_key: &str,
    season: Season,
) -> Result<Vec<TeamRow>, ScrapeError> {
    let base = football_api_league::resolve(league_key, UpstreamSource::Wikipedia)?;
    let url = wiki_page_url(&client.config().wikipedia_url, &season_title(base, season));

    let body = client.fetch_html(&url).await?;
    parse_teams(&body)
}

/// Extracts the participating-teams table from a season page.
///
/// Rows whose cell count differs from the header count (merged or extra
/// cells) are dropped rather than partially mapped.
///
/// # Errors
///
/// Returns [`ScrapeError::SectionNotFound`] if the anchor is missing and
/// [`ScrapeError::TableNotFound`] if no usable table follows it.
pub fn parse_teams(body: &str) -> Result<Vec<TeamRow>, ScrapeError> {
    let document = Html::parse_document(body);

    let anchor_sel = html::selector(&format!("#{SECTION_ID}"))?;
    let table_sel = html::selector("table.wikitable")?;
    let row_sel = html::selector("tr")?;
    let header_sel = html::selector("th")?;
    let cell_sel = html::selector("td, th")?;

    if document.select(&anchor_sel).next().is_none() {
        return Err(ScrapeError::SectionNotFound {
            section: "Squadre partecipanti".to_owned(),
        });
    }

    let table = html::first_after(&document, &anchor_sel, &table_sel).ok_or_else(|| {
        ScrapeError::TableNotFound("no table under the 'Squadre partecipanti' section".to_owned())
    })?;

    let mut rows = table.select(&row_sel);
    let header_row = rows.next().ok_or_else(|| {
        ScrapeError::TableNotFound("the 'Squadre partecipanti' table has no rows".to_owned())
    })?;

    // ── Extract headers ─────────────────────────────────────────────
    let headers = distinct_headers(header_row.select(&header_sel).map(html::stripped_text));

    // ── Extract body rows ───────────────────────────────────────────
    let mut teams = Vec::new();
    for (idx, row) in rows.enumerate() {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|el| html::joined_text(el, " "))
            .collect();

        if cells.len() != headers.len() {
            log::debug!(
                "Skipping team row {}: {} cells, expected {}",
                idx + 1,
                cells.len(),
                headers.len()
            );
            continue;
        }

        teams.push(headers.iter().cloned().zip(cells).collect());
    }

    Ok(teams)
}

/// Suffixes repeated header labels (`Stadio`, `Stadio (2)`) so every
/// column keeps its own key.
fn distinct_headers(labels: impl Iterator<Item = String>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for label in labels {
        let mut candidate = label.clone();
        let mut n = 1;
        while headers.contains(&candidate) {
            n += 1;
            candidate = format!("{label} ({n})");
        }
        headers.push(candidate);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="wikitable"><tr><th>Altro</th></tr><tr><td>x</td></tr></table>
        <div class="mw-heading mw-heading2">
          <h2 id="Squadre_partecipanti">Squadre partecipanti</h2>
        </div>
        <table class="wikitable sortable">
          <tbody>
            <tr><th>Squadra</th><th>Città</th><th>Stadio</th></tr>
            <tr><td><a>Atalanta</a></td><td>Bergamo</td><td>Gewiss Stadium</td></tr>
            <tr><td rowspan="2"><a>Inter</a></td><td>Milano</td><td>San Siro</td></tr>
            <tr><td><a>Milan</a></td><td>Milano</td><td>San Siro<br>(condiviso)</td></tr>
            <tr><td>Monza</td><td>Monza</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn rows_are_keyed_by_header() {
        let teams = parse_teams(PAGE).unwrap();

        assert_eq!(teams.len(), 3);
        assert_eq!(
            teams[0].keys().collect::<Vec<_>>(),
            vec!["Squadra", "Città", "Stadio"]
        );
        assert_eq!(teams[0].get("Squadra"), Some("Atalanta"));
        assert_eq!(teams[2].get("Stadio"), Some("San Siro (condiviso)"));
    }

    #[test]
    fn mismatched_rows_are_dropped() {
        let teams = parse_teams(PAGE).unwrap();
        for row in &teams {
            assert_eq!(row.len(), 3);
        }
        assert!(teams.iter().all(|row| row.get("Squadra") != Some("Monza")));
    }

    #[test]
    fn table_before_the_anchor_is_ignored() {
        let teams = parse_teams(PAGE).unwrap();
        assert!(teams.iter().all(|row| row.get("Altro").is_none()));
    }

    #[test]
    fn repeated_headers_keep_every_column() {
        let teams = parse_teams(
            r#"<h2 id="Squadre_partecipanti">Squadre</h2>
               <table class="wikitable">
                 <tr><th>Squadra</th><th>Stadio</th><th>Stadio</th></tr>
                 <tr><td>Inter</td><td>San Siro</td><td>Arena Civica</td></tr>
               </table>"#,
        )
        .unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(
            teams[0].keys().collect::<Vec<_>>(),
            vec!["Squadra", "Stadio", "Stadio (2)"]
        );
        assert_eq!(teams[0].get("Stadio (2)"), Some("Arena Civica"));
    }

    #[test]
    fn missing_section_is_reported() {
        let err = parse_teams(r#"<table class="wikitable"><tr><th>A</th></tr></table>"#)
            .unwrap_err();
        assert!(matches!(err, ScrapeError::SectionNotFound { .. }));
    }

    #[test]
    fn missing_table_is_reported() {
        let err = parse_teams(r#"<h2 id="Squadre_partecipanti">Squadre</h2><p>Nessuna</p>"#)
            .unwrap_err();
        assert!(matches!(err, ScrapeError::TableNotFound(_)));
    }
}
