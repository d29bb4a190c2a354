//! Turns manual files into a [`DocumentTree`].
//!
//! Paths are expanded into an ordered list of files, each file is parsed with the format's
//! grammar, and the structure query splits it into sections at section breaks. Files are
//! sections of their own as well, so a manual can be one file with breaks or a directory with
//! one file per section.

use crate::error::LoadError;
use crate::formats::{Format, CAPTURE_BLOCK, CAPTURE_BREAK, CAPTURE_HEADING};
use crate::section::{DocumentTree, Heading, Section};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Expands files and directories into the files to load, in a stable order.
///
/// Directories are walked recursively with entries sorted by name. Only files whose extension
/// is in `extensions` are kept from directories; explicitly named files are always kept.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_dir(&path, extensions, &mut documents)?;
        } else if path.is_file() {
            documents.push(path);
        }
    }
    Ok(documents)
}

fn collect_dir(dir: &Path, extensions: &[String], documents: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    for path in entries {
        if path.is_dir() {
            collect_dir(&path, extensions, documents)?;
        } else if has_extension(&path, extensions) {
            documents.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

/// Loads every file into one document tree, in the given order.
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed.
pub fn load_tree(files: &[PathBuf], format: &impl Format) -> Result<DocumentTree, LoadError> {
    let mut sections = Vec::new();
    for file in files {
        sections.extend(extract_sections(file, format)?);
    }
    debug!(files = files.len(), sections = sections.len(), "document tree loaded");
    Ok(DocumentTree::new(sections))
}

/// Reads and splits one file into sections.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn extract_sections(path: &Path, format: &impl Format) -> Result<Vec<Section>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sections(&content, &path.to_string_lossy(), format)
}

struct HeadingNode {
    start: usize,
    end: usize,
    level: usize,
    title: String,
}

/// Splits source text into sections.
///
/// # Errors
///
/// Returns an error if the grammar or structure query cannot be loaded, or parsing fails.
pub fn parse_sections(
    content: &str,
    file_path: &str,
    format: &impl Format,
) -> Result<Vec<Section>, LoadError> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| LoadError::Parse(PathBuf::from(file_path)))?;
    let query = Query::new(&language, format.structure_query())?;
    let capture_names = query.capture_names();
    let bytes = content.as_bytes();

    let mut headings = Vec::new();
    let mut breaks = Vec::new();
    let mut nav_blocks = Vec::new();

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            match capture_names.get(capture.index as usize).copied() {
                Some(CAPTURE_HEADING) => {
                    if let Some(heading) = heading_node(node, bytes, format) {
                        headings.push(heading);
                    }
                }
                Some(CAPTURE_BREAK) => breaks.push(node.byte_range()),
                Some(CAPTURE_BLOCK) => {
                    let text = node.utf8_text(bytes).unwrap_or_default();
                    if format.is_nav_block(text) {
                        nav_blocks.push(node.start_byte());
                    }
                }
                _ => {}
            }
        }
    }
    headings.sort_by_key(|heading| heading.start);
    breaks.sort_by_key(|range| range.start);

    let mut bounds = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for range in &breaks {
        bounds.push((start, range.start));
        start = range.end;
    }
    bounds.push((start, content.len()));

    let mut sections = Vec::new();
    for (byte_start, byte_end) in bounds {
        let text = &content[byte_start..byte_end];
        let has_nav = nav_blocks
            .iter()
            .any(|pos| (byte_start..byte_end).contains(pos));
        let owned: Vec<&HeadingNode> = headings
            .iter()
            .filter(|heading| (byte_start..byte_end).contains(&heading.start))
            .collect();
        if owned.is_empty() && !has_nav && text.trim().is_empty() {
            continue;
        }

        let section_headings = owned
            .iter()
            .enumerate()
            .map(|(index, heading)| {
                let body_end = owned.get(index + 1).map_or(byte_end, |next| next.start);
                Heading {
                    level: heading.level,
                    title: heading.title.clone(),
                    body: content[heading.end.min(body_end)..body_end].to_string(),
                    line: content[byte_start..heading.start].matches('\n').count(),
                }
            })
            .collect();

        sections.push(Section {
            file_path: file_path.to_string(),
            byte_start,
            byte_end,
            has_nav,
            text: text.to_string(),
            headings: section_headings,
        });
    }
    Ok(sections)
}

fn heading_node(node: Node<'_>, bytes: &[u8], format: &impl Format) -> Option<HeadingNode> {
    let mut level = None;
    let mut title = String::new();
    let mut walker = node.walk();
    for child in node.children(&mut walker) {
        if let Some(found) = format.heading_level(child.kind()) {
            level = Some(found);
        } else if child.kind() == format.title_kind() {
            title = child.utf8_text(bytes).unwrap_or_default().trim().to_string();
        }
    }
    Some(HeadingNode {
        start: node.start_byte(),
        end: node.end_byte(),
        level: level?,
        title,
    })
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
