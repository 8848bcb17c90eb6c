//! Infobox extractor.
//!
//! The Italian Wikipedia summary table (`table.infobox.sinottico`) has no
//! fixed schema. Grouping is driven purely by row shape, top to bottom:
//!
//! * a header cell spanning both columns opens a new named section;
//! * a row with both a header and a data cell is a key/value pair, stored
//!   under the open section or at the top level when none is open;
//! * anything else (images, captions) is ignored.

use football_api_league_models::{Season, UpstreamSource};
use football_api_scraper_models::Infobox;
use scraper::Html;

use crate::{PageClient, ScrapeError, html, season_title, wiki_page_url};

/// Fetches and parses the infobox of the season page for `league_key`.
///
/// # Errors
///
/// Returns [`ScrapeError::League`] for an unknown key,
/// [`ScrapeError::InfoboxNotFound`] if the page has no infobox, and
/// [`ScrapeError::Upstream`] on network failure.
pub async fn fetch_infobox(
    client: &PageClient,
    league_key: &str,
    season: Season,
) -> Result<Infobox, ScrapeError> {
    let base = football_api_league::resolve(league_key, UpstreamSource::Wikipedia)?;
    let url = wiki_page_url(&client.config().wikipedia_url, &season_title(base, season));

    let body = client.fetch_html(&url).await?;
    parse_infobox(&body)
}

/// Extracts the infobox from a Wikipedia page.
///
/// # Errors
///
/// Returns [`ScrapeError::InfoboxNotFound`] if the page has no
/// `table.infobox.sinottico`.
pub fn parse_infobox(body: &str) -> Result<Infobox, ScrapeError> {
    let document = Html::parse_document(body);

    let table_sel = html::selector("table.infobox.sinottico")?;
    let row_sel = html::selector("tr")?;
    let section_sel = html::selector(r#"th[colspan="2"]"#)?;
    let th_sel = html::selector("th")?;
    let td_sel = html::selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or(ScrapeError::InfoboxNotFound)?;

    let mut infobox = Infobox::new();
    let mut current_section: Option<String> = None;

    for row in table.select(&row_sel) {
        if row.select(&section_sel).next().is_some() {
            let name = html::stripped_text(row);
            infobox.open_section(name.clone());
            // An unnamed header (e.g. an image banner) closes the open section.
            current_section = Some(name).filter(|name| !name.is_empty());
            continue;
        }

        if let (Some(th), Some(td)) = (row.select(&th_sel).next(), row.select(&td_sel).next()) {
            let key = html::stripped_text(th);
            let value = html::joined_text(td, " ");
            infobox.insert(current_section.as_deref(), key, value);
        }
    }

    Ok(infobox)
}

#[cfg(test)]
mod tests {
    use football_api_scraper_models::InfoboxEntry;

    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="infobox sinottico">
          <tr><th colspan="2" class="sinottico_testata">Serie A 2023-2024</th></tr>
          <tr><td colspan="2"><img src="logo.png"></td></tr>
          <tr><th>Competizione</th><td><a href="/wiki/Serie_A">Serie A</a></td></tr>
          <tr><th>Sport</th><td>Calcio</td></tr>
          <tr><th colspan="2">Risultati</th></tr>
          <tr><th>Vincitore</th><td><a>Inter</a><br>(20º titolo)</td></tr>
          <tr><th>Retrocessioni</th><td>Frosinone<br>Sassuolo<br>Salernitana</td></tr>
          <tr><th colspan="2">Statistiche</th></tr>
          <tr><th>Miglior marcatore</th><td>Lautaro Martínez (24)</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn groups_rows_into_sections() {
        let infobox = parse_infobox(PAGE).unwrap();

        // Header section plus two named sections.
        assert_eq!(infobox.len(), 3);

        let Some(InfoboxEntry::Section(header)) = infobox.get("Serie A 2023-2024") else {
            panic!("expected title section");
        };
        assert_eq!(header.get("Competizione"), Some("Serie A"));
        assert_eq!(header.get("Sport"), Some("Calcio"));

        let Some(InfoboxEntry::Section(results)) = infobox.get("Risultati") else {
            panic!("expected Risultati section");
        };
        assert_eq!(results.get("Vincitore"), Some("Inter (20º titolo)"));
        assert_eq!(
            results.get("Retrocessioni"),
            Some("Frosinone Sassuolo Salernitana")
        );

        let Some(InfoboxEntry::Section(stats)) = infobox.get("Statistiche") else {
            panic!("expected Statistiche section");
        };
        assert_eq!(stats.get("Miglior marcatore"), Some("Lautaro Martínez (24)"));
    }

    #[test]
    fn rows_before_any_section_are_top_level() {
        let infobox = parse_infobox(
            r#"<table class="infobox sinottico">
                 <tr><th>Sport</th><td>Calcio</td></tr>
                 <tr><th colspan="2">Dati</th></tr>
                 <tr><th>Edizione</th><td>122ª</td></tr>
               </table>"#,
        )
        .unwrap();

        assert_eq!(
            infobox.get("Sport"),
            Some(&InfoboxEntry::Value("Calcio".to_owned()))
        );
        let json = serde_json::to_value(&infobox).unwrap();
        assert_eq!(json["Dati"]["Edizione"], "122ª");
    }

    #[test]
    fn unnamed_header_keeps_rows_at_top_level() {
        let infobox = parse_infobox(
            r#"<table class="infobox sinottico">
                 <tr><th colspan="2"><img src="logo.png"></th></tr>
                 <tr><th>Sport</th><td>Calcio</td></tr>
               </table>"#,
        )
        .unwrap();

        assert_eq!(
            infobox.get("Sport"),
            Some(&InfoboxEntry::Value("Calcio".to_owned()))
        );
        let json = serde_json::to_value(&infobox).unwrap();
        assert_eq!(json, serde_json::json!({"": {}, "Sport": "Calcio"}));
    }

    #[test]
    fn missing_infobox_is_reported() {
        let err = parse_infobox(r#"<table class="wikitable"><tr><td>x</td></tr></table>"#)
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InfoboxNotFound));
    }
}
