//! Format trait and implementations for manual source formats.
//!
//! A format supplies the tree-sitter grammar and a structure query whose captures mark
//! headings, section breaks and embedded blocks, plus the few rules that interpret them. The
//! loader in [`crate::input`] stays format-agnostic.

pub mod markdown;

/// Capture name of heading nodes in [`Format::structure_query`].
pub const CAPTURE_HEADING: &str = "heading";
/// Capture name of section break nodes.
pub const CAPTURE_BREAK: &str = "break";
/// Capture name of raw blocks that may host the navigation region.
pub const CAPTURE_BLOCK: &str = "block";

/// Grammar and structure rules of a manual source format.
pub trait Format {
    /// Tree-sitter grammar.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing `@heading`, `@break` and `@block` nodes.
    fn structure_query(&self) -> &str;
    /// Heading level encoded by a heading child node kind, e.g. `atx_h2_marker`.
    fn heading_level(&self, kind: &str) -> Option<usize>;
    /// Node kind holding a heading's text.
    fn title_kind(&self) -> &str;
    /// Whether a raw block opens the navigation region.
    fn is_nav_block(&self, text: &str) -> bool;
    /// File suffix matched when scanning directories.
    fn file_extension(&self) -> &str;
}
