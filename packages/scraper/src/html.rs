//! Text and traversal helpers over parsed HTML.

use scraper::{ElementRef, Html, Selector};

use crate::ScrapeError;

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
///
/// # Errors
///
/// Returns [`ScrapeError::Selector`] if `css` is not a valid selector.
pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::Selector(format!("invalid CSS selector '{css}': {e}")))
}

/// Concatenates the element's text nodes, each trimmed, skipping empty ones.
#[must_use]
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Joins the element's trimmed, non-empty text nodes with `separator`.
#[must_use]
pub fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Like [`stripped_text`] but ignores text inside any descendant matching
/// `exclude`.
#[must_use]
pub fn stripped_text_excluding(element: ElementRef<'_>, exclude: &Selector) -> String {
    let mut out = String::new();
    collect_text_excluding(element, exclude, &mut out);
    out
}

fn collect_text_excluding(element: ElementRef<'_>, exclude: &Selector, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text.trim());
        } else if let Some(child_el) = ElementRef::wrap(child)
            && !exclude.matches(&child_el)
        {
            collect_text_excluding(child_el, exclude, out);
        }
    }
}

/// Removes markup from an HTML fragment, keeping its text verbatim.
#[must_use]
pub fn strip_tags(fragment: &str) -> String {
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect()
}

/// Returns the first element matching `target` that follows the first
/// element matching `anchor` in document order. Descendants of the anchor
/// count as following it.
#[must_use]
pub fn first_after<'a>(
    document: &'a Html,
    anchor: &Selector,
    target: &Selector,
) -> Option<ElementRef<'a>> {
    let mut after_anchor = false;
    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if after_anchor {
            if target.matches(&element) {
                return Some(element);
            }
        } else if anchor.matches(&element) {
            after_anchor = true;
        }
    }
    None
}
