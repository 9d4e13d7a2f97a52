use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the final ranking: a normalized page and how many internal
/// links pointed at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCount {
    pub url: String,
    pub count: u64,
}

/// Rank the visit table by count descending, ties broken by URL
/// ascending. Pure and deterministic; an empty table yields an empty
/// ranking.
pub fn sort_pages(pages: &HashMap<String, u64>) -> Vec<PageCount> {
    let mut ranked: Vec<PageCount> = pages
        .iter()
        .map(|(url, count)| PageCount {
            url: url.clone(),
            count: *count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.url.cmp(&b.url)));
    ranked
}

/// Render the finished visit table as the printable report.
pub fn render(pages: &HashMap<String, u64>, base_url: &str) -> String {
    let mut out = String::new();
    out.push_str("======================================\n");
    out.push_str(&format!(" REPORT for {base_url}\n"));
    out.push_str("======================================\n");

    for page in sort_pages(pages) {
        out.push_str(&format!(
            "Found {} internal links to {}\n",
            page.count, page.url
        ));
    }

    out
}
