use crate::error::{CrawlError, Result};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Collect every anchor href in `html`, resolved against `base`, in
/// document order. Hrefs that fail to resolve are skipped. No
/// deduplication and no host filtering happens here; both are the
/// controller's job.
pub fn extract_links(html: &str, base: &Url) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]")
        .map_err(|e| CrawlError::Parse(format!("bad anchor selector: {e}")))?;

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            match base.join(href) {
                Ok(resolved) => links.push(resolved.to_string()),
                Err(e) => debug!("Skipping unparseable href {}: {}", href, e),
            }
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://blog.example.dev").unwrap()
    }

    #[test]
    fn resolves_relative_hrefs_against_base() {
        let html = r#"<html><body><a href="/path/one">one</a></body></html>"#;
        let links = extract_links(html, &base()).unwrap();
        assert_eq!(links, vec!["https://blog.example.dev/path/one"]);
    }

    #[test]
    fn passes_absolute_hrefs_through() {
        let html = r#"<html><body><a href="https://other.com/path/one">one</a></body></html>"#;
        let links = extract_links(html, &base()).unwrap();
        assert_eq!(links, vec!["https://other.com/path/one"]);
    }

    #[test]
    fn preserves_document_order_without_dedup() {
        let html = r#"<html><body>
            <a href="/b">b</a>
            <a href="/a">a</a>
            <a href="/b">b again</a>
        </body></html>"#;
        let links = extract_links(html, &base()).unwrap();
        assert_eq!(
            links,
            vec![
                "https://blog.example.dev/b",
                "https://blog.example.dev/a",
                "https://blog.example.dev/b",
            ]
        );
    }

    #[test]
    fn no_anchors_yields_empty_sequence() {
        let html = "<html><body><p>no links here</p></body></html>";
        let links = extract_links(html, &base()).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn anchors_without_href_are_ignored() {
        let html = r#"<html><body><a name="top">anchor</a><a href="/x">x</a></body></html>"#;
        let links = extract_links(html, &base()).unwrap();
        assert_eq!(links, vec!["https://blog.example.dev/x"]);
    }

    #[test]
    fn mixed_relative_and_absolute() {
        let html = r#"<html><body>
            <a href="/path/one">relative</a>
            <a href="https://other.com/path/one">absolute</a>
        </body></html>"#;
        let links = extract_links(html, &base()).unwrap();
        assert_eq!(
            links,
            vec![
                "https://blog.example.dev/path/one",
                "https://other.com/path/one",
            ]
        );
    }
}
