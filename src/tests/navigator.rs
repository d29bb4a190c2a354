use super::{resolve, NavigationState, Reference, TocMode};
use crate::section::{DocumentTree, Heading, Section};
use crate::sitemap::{build_index, Sitemap};
use pretty_assertions::assert_eq;

/// Three articles: 1 (1, 1.1, 1.2), 2 (2), 3 (3, 3.1).
fn sitemap() -> Sitemap {
    build_index(&DocumentTree::new(vec![
        Section::nav(),
        Section::with_headings(vec![
            Heading::new(1, "Intro", ""),
            Heading::new(2, "Setup", ""),
            Heading::new(2, "Usage", ""),
        ]),
        Section::with_headings(vec![Heading::new(1, "Config", "")]),
        Section::with_headings(vec![Heading::new(1, "Appendix", ""), Heading::new(2, "Faq", "")]),
    ]))
}

fn target(sitemap: &Sitemap, current: Option<usize>, reference: &str) -> Option<String> {
    let current = current.and_then(|sequence| sitemap.by_sequence(sequence));
    resolve(sitemap, current, reference).map(|chapter| chapter.chapter.clone())
}

#[test]
fn test_parse_reference_forms() {
    assert_eq!(Reference::parse("+1"), Reference::ChapterOffset(1));
    assert_eq!(Reference::parse("-3"), Reference::ChapterOffset(-3));
    assert_eq!(Reference::parse("++2"), Reference::ArticleOffset(2));
    assert_eq!(Reference::parse("--1"), Reference::ArticleOffset(-1));
    assert_eq!(Reference::parse("+-1"), Reference::ArticleOffset(-1));
    assert_eq!(Reference::parse(":First"), Reference::ArticleFirst);
    assert_eq!(Reference::parse("::first"), Reference::DocumentFirst);
    assert_eq!(Reference::parse(":last"), Reference::ArticleLast);
    assert_eq!(Reference::parse("::LAST"), Reference::DocumentLast);
    assert_eq!(Reference::parse(":toc"), Reference::Toc(TocMode::Full));
    assert_eq!(Reference::parse(":toc-focus"), Reference::Toc(TocMode::Focus));
    assert_eq!(Reference::parse("1.2"), Reference::Chapter("1.2"));
    assert_eq!(Reference::parse(" IntroSetup "), Reference::Chapter("IntroSetup"));
    assert_eq!(Reference::parse("+1a"), Reference::Chapter("+1a"));
}

#[test]
fn test_chapter_offsets_clamp_to_document() {
    let sitemap = sitemap();
    assert_eq!(target(&sitemap, Some(1), "+1").as_deref(), Some("1.1"));
    assert_eq!(target(&sitemap, Some(3), "+1").as_deref(), Some("2"));
    assert_eq!(target(&sitemap, Some(6), "+1").as_deref(), Some("3.1"));
    assert_eq!(target(&sitemap, Some(1), "-1").as_deref(), Some("1"));
    assert_eq!(target(&sitemap, Some(2), "-10").as_deref(), Some("1"));
    assert_eq!(target(&sitemap, Some(2), "+100").as_deref(), Some("3.1"));
}

#[test]
fn test_offsets_without_current_chapter_count_from_zero() {
    let sitemap = sitemap();
    assert_eq!(target(&sitemap, None, "+1").as_deref(), Some("1"));
    assert_eq!(target(&sitemap, None, "+2").as_deref(), Some("1.1"));
    assert_eq!(target(&sitemap, None, "-1").as_deref(), Some("1"));
    assert_eq!(target(&sitemap, None, "++2").as_deref(), Some("2"));
}

#[test]
fn test_oversized_offsets_saturate() {
    let sitemap = sitemap();
    assert_eq!(
        Reference::parse("+99999999999999999999"),
        Reference::ChapterOffset(i64::MAX)
    );
    assert_eq!(
        Reference::parse("-99999999999999999999"),
        Reference::ChapterOffset(-i64::MAX)
    );
    assert_eq!(
        target(&sitemap, Some(2), "+99999999999999999999").as_deref(),
        Some("3.1")
    );
    assert_eq!(
        target(&sitemap, Some(6), "--99999999999999999999").as_deref(),
        Some("1")
    );
}

#[test]
fn test_article_offsets_land_on_first_chapter() {
    let sitemap = sitemap();
    assert_eq!(target(&sitemap, Some(2), "++1").as_deref(), Some("2"));
    assert_eq!(target(&sitemap, Some(6), "--1").as_deref(), Some("2"));
    assert_eq!(target(&sitemap, Some(6), "++1").as_deref(), Some("3"));
    assert_eq!(target(&sitemap, Some(2), "--5").as_deref(), Some("1"));
}

#[test]
fn test_first_and_last_keywords() {
    let sitemap = sitemap();
    assert_eq!(target(&sitemap, Some(2), ":first").as_deref(), Some("1"));
    assert_eq!(target(&sitemap, Some(1), ":last").as_deref(), Some("1.2"));
    assert_eq!(target(&sitemap, Some(4), ":last").as_deref(), Some("2"));
    assert_eq!(target(&sitemap, Some(4), "::first").as_deref(), Some("1"));
    assert_eq!(target(&sitemap, Some(1), "::last").as_deref(), Some("3.1"));
    assert_eq!(target(&sitemap, None, ":first"), None);
    assert_eq!(target(&sitemap, None, "::last").as_deref(), Some("3.1"));
}

#[test]
fn test_plain_references() {
    let sitemap = sitemap();
    assert_eq!(target(&sitemap, None, "AppendixFaq").as_deref(), Some("3.1"));
    assert_eq!(target(&sitemap, None, "#IntroUsage").as_deref(), Some("1.2"));
    assert_eq!(target(&sitemap, None, "#4").as_deref(), Some("2"));
    assert_eq!(target(&sitemap, None, "1.1").as_deref(), Some("1.1"));
    assert_eq!(target(&sitemap, None, "9.9"), None);
    assert_eq!(target(&sitemap, None, ":toc"), None);
}

#[test]
fn test_empty_sitemap_resolves_nothing() {
    let sitemap = build_index(&DocumentTree::default());
    assert_eq!(target(&sitemap, None, "+1"), None);
    assert_eq!(target(&sitemap, None, "::first"), None);
}

#[test]
fn test_navigation_state() {
    let sitemap = sitemap();
    let state = NavigationState {
        current: Some(5),
        toc: Some(TocMode::Focus),
        ..NavigationState::default()
    };
    assert_eq!(state.current(&sitemap).unwrap().alias, "Appendix");
    assert!(state.is_toc_shown(TocMode::Focus));
    assert!(!state.is_toc_shown(TocMode::Full));
}
