//! Markdown format implementation using tree-sitter-md.
//!
//! Sections are separated by thematic breaks (`***`, `---`, `___`), chapters come from
//! ATX-style headings (# syntax), and an HTML block opening a `<nav>` element marks the
//! section that hosts the table of contents.

use crate::formats::Format;

/// Tree-sitter queries for ATX headings, thematic breaks and HTML blocks.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn structure_query(&self) -> &'static str {
        "(atx_heading) @heading (thematic_break) @break (html_block) @block"
    }

    fn heading_level(&self, kind: &str) -> Option<usize> {
        kind.strip_prefix("atx_h")?
            .strip_suffix("_marker")?
            .parse()
            .ok()
            .filter(|level| (1..=6).contains(level))
    }

    fn title_kind(&self) -> &'static str {
        "inline"
    }

    fn is_nav_block(&self, text: &str) -> bool {
        let text = text.trim_start().to_ascii_lowercase();
        text.strip_prefix("<nav")
            .is_some_and(|rest| rest.starts_with(['>', ' ', '/', '\n', '\t', '\r']))
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }
}
