//! Text folding shared by the indexer, the alias builder and the filter.
//!
//! Manuals are written with German umlauts in titles and prose, while aliases end up in location
//! fragments and the filter compares lowercased text. Both sides fold umlauts to ASCII digraphs
//! so that a query typed as `gruesse` finds `Grüße`.

use regex::Regex;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("html tag pattern is valid"));
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("markdown link pattern is valid")
});
static MARKUP_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_`~#>|\[\]]+").expect("markup pattern is valid"));

/// Replaces umlauts and sharp s with their ASCII digraphs, keeping the case of the first letter.
#[must_use]
pub fn fold_umlauts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            'Ü' => out.push_str("Ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'ü' => out.push_str("ue"),
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ß' => out.push_str("ss"),
            _ => out.push(ch),
        }
    }
    out
}

/// Collapses every whitespace run to a single space and trims both ends.
#[must_use]
pub fn condense_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Canonical form used for full-text matching: condensed, folded and lowercased.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    fold_umlauts(&condense_whitespace(text)).to_lowercase()
}

/// Derives the alias fragment of a single heading title.
///
/// Only ASCII letters and digits survive folding. Returns `None` if nothing is left, so the
/// caller can fall back to the numbered placeholder.
#[must_use]
pub fn alias_fragment(title: &str) -> Option<String> {
    let alias: String = fold_umlauts(title)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if alias.is_empty() {
        None
    } else {
        Some(alias)
    }
}

/// Reduces markdown and inline HTML to the plain words a reader sees.
///
/// Link and image syntax keeps its label, tags and emphasis markers become spaces. The result
/// is not normalized; pass it through [`normalize_text`] for indexing.
#[must_use]
pub fn strip_markup(source: &str) -> String {
    let text = HTML_TAG.replace_all(source, " ");
    let text = LINK.replace_all(&text, "$1");
    MARKUP_PUNCTUATION.replace_all(&text, " ").into_owned()
}

#[cfg(test)]
#[path = "tests/normalize.rs"]
mod tests;
