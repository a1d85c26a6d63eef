use std::sync::LazyLock;

use regex::Regex;

static QUALIFIER_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\(\|]").expect("static pattern"));

/// Strip release qualifiers: everything from the first `[`, `(` or `|` on.
pub fn clean_title(full_title: &str) -> &str {
    let end = QUALIFIER_START
        .find(full_title)
        .map(|m| m.start())
        .unwrap_or(full_title.len());
    full_title[..end].trim()
}

/// Image hosts sometimes hand out protocol-relative URLs.
pub fn absolutize_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}
