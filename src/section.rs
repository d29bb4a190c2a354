//! Document tree consumed by the indexer.
//!
//! A manual is an ordered list of sections (the top-level containers a reader sees one at a
//! time). Each section carries its headings in document order together with the text that
//! follows each heading up to the next one. One section hosts the navigation region where the
//! table of contents is rendered.

use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
/// Ordered top-level containers of a manual.
pub struct DocumentTree {
    /// Sections in document order.
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, Default, Serialize)]
/// Top-level container of a manual, shown or hidden as a whole.
pub struct Section {
    /// Source file containing this section.
    pub file_path: String,
    /// Byte offset where the section begins in its file.
    pub byte_start: usize,
    /// Byte offset where the section ends in its file.
    pub byte_end: usize,
    /// Whether the section contains a navigation region.
    pub has_nav: bool,
    /// Raw section content, used by views to display the section.
    pub text: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
}

#[derive(Clone, Debug, Default, Serialize)]
/// Heading element with the content it introduces.
pub struct Heading {
    /// Heading rank, 1 to 6.
    pub level: usize,
    /// Heading text without markup symbols.
    pub title: String,
    /// Content between this heading and the next heading of the same section.
    pub body: String,
    /// Zero-based line of the heading within [`Section::text`].
    pub line: usize,
}

impl DocumentTree {
    #[must_use]
    /// Wraps already extracted sections.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    #[must_use]
    /// Position of the first section hosting a navigation region.
    pub fn nav_host(&self) -> Option<usize> {
        self.sections.iter().position(|section| section.has_nav)
    }
}

impl Section {
    #[must_use]
    /// Section built from headings alone, for callers that assemble trees by hand.
    pub fn with_headings(headings: Vec<Heading>) -> Self {
        Self {
            headings,
            ..Self::default()
        }
    }

    #[must_use]
    /// Empty section marked as the navigation host.
    pub fn nav() -> Self {
        Self {
            has_nav: true,
            ..Self::default()
        }
    }
}

impl Heading {
    #[must_use]
    /// Heading with a title and body but no source coordinates.
    pub fn new(level: usize, title: &str, body: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            body: body.to_string(),
            line: 0,
        }
    }
}
