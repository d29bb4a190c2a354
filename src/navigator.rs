//! Chapter references and their resolution against a [`Sitemap`].
//!
//! A reference is what UI controls and links hand to the navigator: a numeric path, an alias,
//! a relative jump such as `+1` or `--1`, or a keyword such as `:last`. Resolution is pure; the
//! side effects of navigating live in [`crate::manual::ManualDocument`].

use crate::sitemap::{ChapterRecord, Sitemap};
use crate::view::ScrollPosition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Display mode of the table of contents overlay.
pub enum TocMode {
    /// Every entry is listed.
    Full,
    /// Only entries of the current chapter's article are listed.
    Focus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Parsed form of a chapter reference.
pub enum Reference<'a> {
    /// `++n` / `--n`: move by whole articles.
    ArticleOffset(i64),
    /// `+n` / `-n`: move by chapters.
    ChapterOffset(i64),
    /// `:first`: first chapter of the current article.
    ArticleFirst,
    /// `::first`: first chapter of the document.
    DocumentFirst,
    /// `:last`: last chapter of the current article.
    ArticleLast,
    /// `::last`: last chapter of the document.
    DocumentLast,
    /// `:toc` / `:toc-focus`: toggle the table of contents.
    Toc(TocMode),
    /// Alias, numeric path or `#<n>` sequence index.
    Chapter(&'a str),
}

impl<'a> Reference<'a> {
    #[must_use]
    /// Classifies a reference. Keywords are case-insensitive; anything unrecognised is a
    /// chapter lookup.
    pub fn parse(text: &'a str) -> Self {
        let text = text.trim();
        if let Some(offset) = parse_offset(text) {
            return offset;
        }
        match text.to_ascii_lowercase().as_str() {
            ":first" => Self::ArticleFirst,
            "::first" => Self::DocumentFirst,
            ":last" => Self::ArticleLast,
            "::last" => Self::DocumentLast,
            ":toc" => Self::Toc(TocMode::Full),
            ":toc-focus" => Self::Toc(TocMode::Focus),
            _ => Self::Chapter(text),
        }
    }
}

/// Recognises `[+-]+\d+`. A single sign moves by chapters, two or more by articles; the sign
/// directly before the digits gives the direction.
fn parse_offset(text: &str) -> Option<Reference<'_>> {
    let digits_at = text.find(|ch: char| ch.is_ascii_digit())?;
    let (signs, digits) = text.split_at(digits_at);
    if signs.is_empty()
        || !signs.chars().all(|ch| ch == '+' || ch == '-')
        || !digits.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }
    // Offsets beyond i64 saturate, the jump is clamped to the document anyway.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    let offset = if signs.ends_with('-') {
        -magnitude
    } else {
        magnitude
    };
    if signs.len() >= 2 {
        Some(Reference::ArticleOffset(offset))
    } else {
        Some(Reference::ChapterOffset(offset))
    }
}

/// Resolves a reference relative to the current chapter.
///
/// Returns `None` for unresolvable references, for references that need a current chapter
/// when there is none, for an empty sitemap, and for the table of contents keywords.
#[must_use]
pub fn resolve<'s>(
    sitemap: &'s Sitemap,
    current: Option<&ChapterRecord>,
    reference: &str,
) -> Option<&'s ChapterRecord> {
    if sitemap.is_empty() {
        return None;
    }
    match Reference::parse(reference) {
        Reference::ArticleOffset(offset) => {
            let max = i64::from(sitemap.max_article());
            if max < 1 {
                return None;
            }
            let base = current.map_or(0, |chapter| i64::from(chapter.article));
            let target = base.saturating_add(offset).clamp(1, max);
            sitemap.first_of_article(u32::try_from(target).ok()?)
        }
        Reference::ChapterOffset(offset) => {
            let size = i64::try_from(sitemap.size()).ok()?;
            let base = current.map_or(0, |chapter| {
                i64::try_from(chapter.sequence).unwrap_or_default()
            });
            let target = base.saturating_add(offset).clamp(1, size);
            sitemap.by_sequence(usize::try_from(target).ok()?)
        }
        Reference::ArticleFirst => {
            current.and_then(|chapter| sitemap.first_of_article(chapter.article))
        }
        Reference::DocumentFirst => sitemap.by_sequence(1),
        Reference::ArticleLast => {
            current.and_then(|chapter| sitemap.last_of_article(chapter.article))
        }
        Reference::DocumentLast => sitemap.by_sequence(sitemap.size()),
        Reference::Toc(_) => None,
        Reference::Chapter(text) => sitemap.lookup(text),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// What the reader is looking at.
pub struct NavigationState {
    /// Sequence index of the current chapter.
    pub current: Option<usize>,
    /// Table of contents overlay, if shown.
    pub toc: Option<TocMode>,
    /// Scroll position of the chapter view saved when the overlay opened.
    pub screen: ScrollPosition,
}

impl NavigationState {
    #[must_use]
    /// Current chapter record, looked up in `sitemap`.
    pub fn current<'s>(&self, sitemap: &'s Sitemap) -> Option<&'s ChapterRecord> {
        self.current.and_then(|sequence| sitemap.by_sequence(sequence))
    }

    #[must_use]
    /// Whether the overlay is shown in `mode`.
    pub fn is_toc_shown(&self, mode: TocMode) -> bool {
        self.toc == Some(mode)
    }
}

#[cfg(test)]
#[path = "tests/navigator.rs"]
mod tests;
