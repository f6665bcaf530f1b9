// Anchor extraction over fetched page HTML
//
// Pages in the statistics hierarchy are plain server-rendered HTML; all
// discovery works off `<a href>` elements. Relative hrefs are resolved
// against the page's own URL. Anchors without a usable href are skipped.

use scraper::{Html, Selector};
use url::Url;

/// A document candidate discovered on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// Absolute document URL
    pub url: Url,

    /// Anchor text as rendered, trimmed
    pub text: String,
}

/// Extract all anchors with a resolvable href as (absolute URL, text) pairs
pub fn extract_links(html: &str, page_url: &Url) -> Vec<(Url, String)> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a").unwrap();

    let mut links = Vec::new();

    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        // Relative hrefs resolve against the page URL; anything the URL
        // parser rejects is skipped rather than failing the page.
        let Ok(absolute) = page_url.join(href) else {
            continue;
        };

        let text = element.text().collect::<String>().trim().to_string();
        links.push((absolute, text));
    }

    links
}

/// First anchor whose text contains `needle`, case-insensitively
pub fn find_link_by_text(html: &str, page_url: &Url, needle: &str) -> Option<Url> {
    let needle = needle.to_lowercase();

    extract_links(html, page_url)
        .into_iter()
        .find(|(_, text)| text.to_lowercase().contains(&needle))
        .map(|(url, _)| url)
}

/// Anchors whose raw href ends, case-insensitively, in an allowed extension
pub fn document_links(html: &str, page_url: &Url, allowed_extensions: &[String]) -> Vec<CandidateLink> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a").unwrap();

    let mut links = Vec::new();

    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty() || !has_allowed_extension(href, allowed_extensions) {
            continue;
        }

        let Ok(absolute) = page_url.join(href) else {
            continue;
        };

        let text = element.text().collect::<String>().trim().to_string();
        links.push(CandidateLink { url: absolute, text });
    }

    links
}

/// Case-insensitive href suffix check against the allowed extension set
pub fn has_allowed_extension(href: &str, allowed_extensions: &[String]) -> bool {
    let href = href.to_lowercase();
    allowed_extensions
        .iter()
        .any(|ext| href.ends_with(&ext.to_lowercase()))
}
