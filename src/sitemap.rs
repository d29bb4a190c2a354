//! Chapter indexing: numbering, aliases, lookup table and full-text index.
//!
//! Every heading after the navigation host becomes a chapter. Chapters are numbered with a
//! counter per heading level, the way a printed manual numbers `2.3.1`, and receive an alias
//! built from their own title prefixed with the alias of their parent, so `Setup` below
//! `Intro` becomes `IntroSetup`. The alias is what ends up in the location fragment.
//!
//! The index is built once per document load and never changes afterwards. All navigation
//! and filtering reads from it.

use crate::normalize::{alias_fragment, normalize_text, strip_markup};
use crate::section::DocumentTree;
use regex::{Captures, Regex};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Deepest heading level that takes part in chapter numbering.
pub const MAX_LEVEL: usize = 6;

static CROSS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[#([A-Za-z0-9][A-Za-z0-9.]*)\]").expect("cross reference pattern is valid")
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Hierarchical chapter number with one segment per heading level.
///
/// Ordering follows document order, because segments only ever grow within a level.
pub struct ChapterPath([u32; MAX_LEVEL]);

impl ChapterPath {
    #[must_use]
    /// Path from all six segments.
    pub fn new(segments: [u32; MAX_LEVEL]) -> Self {
        Self(segments)
    }

    #[must_use]
    /// Path of the first-level chapter `article.0.0.0.0.0`.
    pub fn article(article: u32) -> Self {
        let mut segments = [0; MAX_LEVEL];
        segments[0] = article;
        Self(segments)
    }

    #[must_use]
    /// Parses a dotted numeric path, padding missing levels with zeros.
    ///
    /// Segments beyond the sixth are accepted only when they are zero, so `1.2.0.0.0.0.0`
    /// still names chapter `1.2`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut segments = [0; MAX_LEVEL];
        for (index, part) in text.trim().split('.').enumerate() {
            if part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit()) {
                return None;
            }
            let value = part.parse::<u32>().ok()?;
            match segments.get_mut(index) {
                Some(slot) => *slot = value,
                None if value == 0 => {}
                None => return None,
            }
        }
        Some(Self(segments))
    }

    #[must_use]
    /// All six segments.
    pub fn segments(&self) -> &[u32; MAX_LEVEL] {
        &self.0
    }

    #[must_use]
    /// First segment, the article this chapter belongs to.
    pub fn article_number(&self) -> u32 {
        self.0[0]
    }

    #[must_use]
    /// Number of segments up to and including the last non-zero one.
    pub fn depth(&self) -> usize {
        self.0.iter().rposition(|segment| *segment != 0).map_or(0, |pos| pos + 1)
    }

    #[must_use]
    /// Path of the enclosing chapter: the last non-zero segment is dropped.
    ///
    /// First-level paths have no parent.
    pub fn parent(&self) -> Option<Self> {
        let depth = self.depth();
        if depth <= 1 {
            return None;
        }
        let mut segments = self.0;
        segments[depth - 1] = 0;
        Some(Self(segments))
    }

    #[must_use]
    /// Full dotted form with all six segments, e.g. `2.3.0.0.0.0`.
    pub fn number(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ChapterPath {
    /// Display form with trailing zero segments trimmed, e.g. `2.3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.depth().max(1);
        let text = self.0[..depth]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&text)
    }
}

impl Serialize for ChapterPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One heading of the manual, addressable by sequence, path and alias.
pub struct ChapterRecord {
    /// 1-based position among all chapters.
    pub sequence: usize,
    /// First path segment.
    pub article: u32,
    /// Full hierarchical number.
    pub path: ChapterPath,
    /// Display form of the path, trailing zeros trimmed.
    pub chapter: String,
    /// ASCII identifier usable as location fragment.
    pub alias: String,
    /// Trimmed heading text.
    pub title: String,
    /// Heading level the chapter was created from.
    pub level: usize,
    /// Document section holding the heading.
    pub section: usize,
    /// Line of the heading within its section.
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Table of contents entry, emitted in document order.
pub struct TocEntry {
    /// Heading level, used for indentation.
    pub level: usize,
    /// Full hierarchical number.
    pub path: ChapterPath,
    /// Display form of the path.
    pub chapter: String,
    /// Link target.
    pub alias: String,
    /// Link text.
    pub title: String,
}

impl TocEntry {
    #[must_use]
    /// Anchor markup for a navigation region of an HTML rendition of the manual.
    pub fn render_html(&self) -> String {
        format!(
            "<a href=\"#{alias}\" level=\"{level}\" number=\"{number}\" chapter=\"{chapter}\" alias=\"{alias}\">{title}</a>",
            alias = escape_html(&self.alias),
            level = self.level,
            number = self.path.number(),
            chapter = self.chapter,
            title = escape_html(&self.title),
        )
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[derive(Clone, Debug, Default, Serialize)]
/// Chapter table, table of contents and full-text index of one document.
pub struct Sitemap {
    chapters: Vec<ChapterRecord>,
    #[serde(skip)]
    by_path: HashMap<ChapterPath, usize>,
    #[serde(skip)]
    by_alias: HashMap<String, usize>,
    toc: Vec<TocEntry>,
    index: BTreeMap<ChapterPath, String>,
    toc_section: Option<usize>,
    section_chapters: Vec<Vec<ChapterPath>>,
}

/// Builds the chapter table, table of contents and full-text index of a document.
///
/// Only sections after the first navigation host carry chapters. A document without a
/// navigation host produces an empty sitemap.
#[must_use]
pub fn build_index(tree: &DocumentTree) -> Sitemap {
    let mut sitemap = Sitemap {
        section_chapters: vec![Vec::new(); tree.sections.len()],
        ..Sitemap::default()
    };

    let Some(host) = tree.nav_host() else {
        debug!(sections = tree.sections.len(), "no navigation host, index is empty");
        return sitemap;
    };
    sitemap.toc_section = Some(host);

    // Slot 0 holds the last seen level, slots 1 to 6 the count per level.
    let mut numbers = [0_u32; MAX_LEVEL + 1];

    for (section_index, section) in tree.sections.iter().enumerate().skip(host + 1) {
        for heading in &section.headings {
            let level = heading.level;
            if !(1..=MAX_LEVEL).contains(&level) {
                continue;
            }
            numbers[level] += 1;
            for slot in &mut numbers[level + 1..] {
                *slot = 0;
            }
            numbers[0] = u32::try_from(level).unwrap_or_default();

            let mut segments = [0; MAX_LEVEL];
            segments.copy_from_slice(&numbers[1..]);
            let path = ChapterPath::new(segments);

            let parent_alias = path
                .parent()
                .and_then(|parent| sitemap.by_path(parent))
                .map(|parent| parent.alias.clone())
                .unwrap_or_default();
            let title = heading.title.trim().to_string();
            let own_alias =
                alias_fragment(&title).unwrap_or_else(|| format!("[{}]", numbers[level]));

            let record = ChapterRecord {
                sequence: sitemap.chapters.len() + 1,
                article: path.article_number(),
                path,
                chapter: path.to_string(),
                alias: format!("{parent_alias}{own_alias}"),
                title,
                level,
                section: section_index,
                line: heading.line,
            };

            let text = format!("{} {}", record.title, strip_markup(&heading.body));
            sitemap.index.insert(path, normalize_text(&text));
            sitemap.section_chapters[section_index].push(path);
            sitemap.insert(record);
        }
    }

    debug!(
        chapters = sitemap.size(),
        toc_section = host,
        "chapter index built"
    );
    sitemap
}

impl Sitemap {
    fn insert(&mut self, record: ChapterRecord) {
        let slot = self.chapters.len();
        self.by_path.insert(record.path, slot);
        // Alias collisions are not resolved: the later chapter takes the key.
        self.by_alias.insert(record.alias.clone(), slot);
        self.toc.push(TocEntry {
            level: record.level,
            path: record.path,
            chapter: record.chapter.clone(),
            alias: record.alias.clone(),
            title: record.title.clone(),
        });
        self.chapters.push(record);
    }

    #[must_use]
    /// Number of chapters.
    pub fn size(&self) -> usize {
        self.chapters.len()
    }

    #[must_use]
    /// Whether the document has no chapters.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    #[must_use]
    /// All chapters in document order.
    pub fn chapters(&self) -> &[ChapterRecord] {
        &self.chapters
    }

    #[must_use]
    /// Chapter by 1-based sequence index.
    pub fn by_sequence(&self, sequence: usize) -> Option<&ChapterRecord> {
        sequence
            .checked_sub(1)
            .and_then(|slot| self.chapters.get(slot))
    }

    #[must_use]
    /// Chapter by full numeric path.
    pub fn by_path(&self, path: ChapterPath) -> Option<&ChapterRecord> {
        self.by_path.get(&path).map(|slot| &self.chapters[*slot])
    }

    #[must_use]
    /// Chapter by alias.
    pub fn by_alias(&self, alias: &str) -> Option<&ChapterRecord> {
        self.by_alias.get(alias).map(|slot| &self.chapters[*slot])
    }

    #[must_use]
    /// Resolves a plain chapter reference.
    ///
    /// Accepts a dotted numeric path (`1.2`), `#<n>` for a sequence index, or an alias with an
    /// optional leading `#` as found in location fragments.
    pub fn lookup(&self, reference: &str) -> Option<&ChapterRecord> {
        let reference = reference.trim();
        let (hashed, reference) = match reference.strip_prefix('#') {
            Some(rest) => (true, rest.trim()),
            None => (false, reference),
        };
        if reference.is_empty() {
            return None;
        }
        if hashed && reference.chars().all(|ch| ch.is_ascii_digit()) {
            return reference
                .parse::<usize>()
                .ok()
                .and_then(|sequence| self.by_sequence(sequence));
        }
        if reference.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
            return ChapterPath::parse(reference).and_then(|path| self.by_path(path));
        }
        self.by_alias(reference)
    }

    #[must_use]
    /// Article number of the last chapter, the upper bound for article jumps.
    pub fn max_article(&self) -> u32 {
        self.chapters.last().map_or(0, |chapter| chapter.article)
    }

    #[must_use]
    /// First chapter whose path starts with `article`.
    pub fn first_of_article(&self, article: u32) -> Option<&ChapterRecord> {
        self.by_path(ChapterPath::article(article)).or_else(|| {
            self.chapters
                .iter()
                .find(|chapter| chapter.article == article)
        })
    }

    #[must_use]
    /// Last chapter of the contiguous run that starts with the first chapter of `article`.
    pub fn last_of_article(&self, article: u32) -> Option<&ChapterRecord> {
        let first = self.first_of_article(article)?;
        self.chapters[first.sequence - 1..]
            .iter()
            .take_while(|chapter| chapter.article == article)
            .last()
    }

    #[must_use]
    /// Table of contents in document order.
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    #[must_use]
    /// Section hosting the table of contents.
    pub fn toc_section(&self) -> Option<usize> {
        self.toc_section
    }

    #[must_use]
    /// Number of sections of the indexed document.
    pub fn section_count(&self) -> usize {
        self.section_chapters.len()
    }

    #[must_use]
    /// Whether `section` holds the chapter at `path`.
    pub fn section_contains(&self, section: usize, path: ChapterPath) -> bool {
        self.section_chapters
            .get(section)
            .is_some_and(|paths| paths.contains(&path))
    }

    #[must_use]
    /// Full-text index: normalized chapter text keyed by path.
    pub fn full_text(&self) -> &BTreeMap<ChapterPath, String> {
        &self.index
    }

    #[must_use]
    /// Normalized text of one chapter.
    pub fn text(&self, path: ChapterPath) -> Option<&str> {
        self.index.get(&path).map(String::as_str)
    }

    #[must_use]
    /// Replaces `[#ref]` cross references with markdown links to the referenced chapter.
    ///
    /// References that do not resolve are left as written.
    pub fn expand_references(&self, text: &str) -> String {
        CROSS_REFERENCE
            .replace_all(text, |captures: &Captures<'_>| {
                match self.lookup(&captures[1]) {
                    Some(chapter) => {
                        format!("[{} {}](#{})", chapter.chapter, chapter.title, chapter.alias)
                    }
                    None => captures[0].to_string(),
                }
            })
            .into_owned()
    }

    #[must_use]
    /// Titles from the outermost ancestor down to the chapter itself.
    pub fn breadcrumb(&self, path: ChapterPath) -> Vec<&str> {
        let mut titles = Vec::new();
        let mut cursor = Some(path);
        while let Some(current) = cursor {
            if let Some(chapter) = self.by_path(current) {
                titles.push(chapter.title.as_str());
            }
            cursor = current.parent();
        }
        titles.reverse();
        titles
    }
}

#[cfg(test)]
#[path = "tests/sitemap.rs"]
mod tests;
