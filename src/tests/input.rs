use super::{extract_sections, find_documents, load_tree, parse_sections};
use crate::error::LoadError;
use crate::formats::markdown::MarkdownFormat;
use crate::sitemap::build_index;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

const MANUAL: &str = "# Preface

Read this first.

<nav>
</nav>

---

# Intro

Welcome.

## Setup

Install.

***

# Config

Options.
";

#[test]
fn test_breaks_split_sections() {
    let sections = parse_sections(MANUAL, "manual.md", &MarkdownFormat).unwrap();
    assert_eq!(sections.len(), 3);
    assert!(sections[0].has_nav);
    assert!(!sections[1].has_nav);

    let titles: Vec<Vec<&str>> = sections
        .iter()
        .map(|section| section.headings.iter().map(|h| h.title.as_str()).collect())
        .collect();
    assert_eq!(
        titles,
        vec![vec!["Preface"], vec!["Intro", "Setup"], vec!["Config"]]
    );
    assert!(sections[1].text.contains("## Setup"));
    assert!(!sections[1].text.contains("# Config"));
}

#[test]
fn test_heading_levels_bodies_and_lines() {
    let sections = parse_sections(MANUAL, "manual.md", &MarkdownFormat).unwrap();
    let intro = &sections[1].headings[0];
    let setup = &sections[1].headings[1];
    assert_eq!(intro.level, 1);
    assert_eq!(setup.level, 2);
    assert_eq!(intro.body.trim(), "Welcome.");
    assert_eq!(setup.body.trim(), "Install.");
    assert_eq!(setup.line - intro.line, 4);
    assert_eq!(sections[1].file_path, "manual.md");
}

#[test]
fn test_empty_sections_are_skipped() {
    let sections = parse_sections("# A\n\n---\n\n---\n\n# B\n", "x.md", &MarkdownFormat).unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[1].headings[0].title, "B");
}

#[test]
fn test_nav_detection_ignores_other_blocks() {
    let sections =
        parse_sections("<div>\n</div>\n\n# A\n", "x.md", &MarkdownFormat).unwrap();
    assert_eq!(sections.len(), 1);
    assert!(!sections[0].has_nav);
}

#[test]
fn test_loaded_manual_indexes_after_navigation() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{MANUAL}").unwrap();

    let tree = load_tree(&[file.path().to_path_buf()], &MarkdownFormat).unwrap();
    let sitemap = build_index(&tree);
    let chapters: Vec<(&str, &str)> = sitemap
        .chapters()
        .iter()
        .map(|chapter| (chapter.chapter.as_str(), chapter.alias.as_str()))
        .collect();
    assert_eq!(
        chapters,
        vec![("1", "Intro"), ("1.1", "IntroSetup"), ("2", "Config")]
    );
    assert_eq!(sitemap.toc_section(), Some(0));
    assert_eq!(sitemap.text(sitemap.chapters()[1].path), Some("setup install."));
}

#[test]
fn test_files_are_sections_in_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("00-nav.md"), "<nav></nav>\n").unwrap();
    fs::write(dir.path().join("01-intro.md"), "# Intro\n\nHello.\n").unwrap();
    fs::create_dir(dir.path().join("02-more")).unwrap();
    fs::write(dir.path().join("02-more").join("usage.md"), "# Usage\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "# Ignored\n").unwrap();

    let files = find_documents(vec![dir.path().to_path_buf()], &["md".to_string()]).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|file| file.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["00-nav.md", "01-intro.md", "usage.md"]);

    let tree = load_tree(&files, &MarkdownFormat).unwrap();
    assert_eq!(tree.sections.len(), 3);
    assert_eq!(tree.nav_host(), Some(0));
    assert_eq!(build_index(&tree).size(), 2);
}

#[test]
fn test_named_files_skip_the_extension_filter() {
    let dir = tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "# Notes\n").unwrap();
    let files = find_documents(vec![notes.clone()], &["md".to_string()]).unwrap();
    assert_eq!(files, vec![notes]);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = extract_sections(&dir.path().join("absent.md"), &MarkdownFormat).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
