use super::{build_index, ChapterPath, Sitemap};
use crate::section::{DocumentTree, Heading, Section};
use pretty_assertions::assert_eq;

fn path(text: &str) -> ChapterPath {
    ChapterPath::parse(text).unwrap()
}

fn manual() -> Sitemap {
    build_index(&DocumentTree::new(vec![
        Section::with_headings(vec![Heading::new(1, "Preface", "Not a chapter")]),
        Section::nav(),
        Section::with_headings(vec![
            Heading::new(1, "Intro", "Welcome to the manual."),
            Heading::new(2, "Setup", "Install on **Linux** or Windows."),
            Heading::new(2, "Usage", "Run [#IntroSetup] first."),
        ]),
        Section::with_headings(vec![
            Heading::new(1, "Reference", ""),
            Heading::new(2, "---", "Unnamed chapter"),
            Heading::new(3, "Options", "Flags and switches"),
        ]),
    ]))
}

#[test]
fn test_numbering_and_aliases() {
    let sitemap = manual();
    let rows: Vec<(usize, String, String)> = sitemap
        .chapters()
        .iter()
        .map(|chapter| (chapter.sequence, chapter.chapter.clone(), chapter.alias.clone()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "1".to_string(), "Intro".to_string()),
            (2, "1.1".to_string(), "IntroSetup".to_string()),
            (3, "1.2".to_string(), "IntroUsage".to_string()),
            (4, "2".to_string(), "Reference".to_string()),
            (5, "2.1".to_string(), "Reference[1]".to_string()),
            (6, "2.1.1".to_string(), "Reference[1]Options".to_string()),
        ]
    );
}

#[test]
fn test_headings_before_navigation_are_not_chapters() {
    let sitemap = manual();
    assert_eq!(sitemap.toc_section(), Some(1));
    assert!(sitemap.by_alias("Preface").is_none());
    assert_eq!(sitemap.chapters()[0].section, 2);
}

#[test]
fn test_document_without_navigation_has_no_chapters() {
    let sitemap = build_index(&DocumentTree::new(vec![Section::with_headings(vec![
        Heading::new(1, "Intro", ""),
    ])]));
    assert!(sitemap.is_empty());
    assert_eq!(sitemap.toc_section(), None);
    assert_eq!(sitemap.max_article(), 0);
}

#[test]
fn test_three_lookups_share_one_record() {
    let sitemap = manual();
    for chapter in sitemap.chapters() {
        let by_sequence = sitemap.by_sequence(chapter.sequence).unwrap();
        let by_path = sitemap.by_path(chapter.path).unwrap();
        let by_alias = sitemap.by_alias(&chapter.alias).unwrap();
        assert!(std::ptr::eq(by_sequence, by_path));
        assert!(std::ptr::eq(by_path, by_alias));
    }
    assert!(sitemap.by_sequence(0).is_none());
    assert!(sitemap.by_sequence(7).is_none());
}

#[test]
fn test_lookup_accepts_every_reference_form() {
    let sitemap = manual();
    assert_eq!(sitemap.lookup("1.2").unwrap().alias, "IntroUsage");
    assert_eq!(sitemap.lookup("1.2.0.0.0.0").unwrap().alias, "IntroUsage");
    assert_eq!(sitemap.lookup("#3").unwrap().alias, "IntroUsage");
    assert_eq!(sitemap.lookup("#IntroUsage").unwrap().chapter, "1.2");
    assert_eq!(sitemap.lookup("IntroUsage").unwrap().chapter, "1.2");
    assert!(sitemap.lookup("3.1").is_none());
    assert!(sitemap.lookup("Nowhere").is_none());
    assert!(sitemap.lookup("#").is_none());
}

#[test]
fn test_chapter_path_forms() {
    let chapter = path("2.3.1");
    assert_eq!(chapter.to_string(), "2.3.1");
    assert_eq!(chapter.number(), "2.3.1.0.0.0");
    assert_eq!(chapter.depth(), 3);
    assert_eq!(chapter.article_number(), 2);
    assert_eq!(chapter.parent(), Some(path("2.3")));
    assert_eq!(path("2").parent(), None);
    assert_eq!(ChapterPath::default().to_string(), "0");
    assert_eq!(ChapterPath::parse("1..2"), None);
    assert_eq!(ChapterPath::parse("1.2.3.4.5.6.7"), None);
    assert!(path("1.2") < path("1.10"));
}

#[test]
fn test_skipped_level_keeps_a_zero_segment() {
    let sitemap = build_index(&DocumentTree::new(vec![
        Section::nav(),
        Section::with_headings(vec![Heading::new(1, "Top", ""), Heading::new(3, "Deep", "")]),
    ]));
    let deep = sitemap.by_sequence(2).unwrap();
    assert_eq!(deep.chapter, "1.0.1");
    assert_eq!(deep.alias, "TopDeep");
}

#[test]
fn test_article_bounds() {
    let sitemap = manual();
    assert_eq!(sitemap.max_article(), 2);
    assert_eq!(sitemap.first_of_article(2).unwrap().alias, "Reference");
    assert_eq!(sitemap.last_of_article(1).unwrap().alias, "IntroUsage");
    assert_eq!(sitemap.last_of_article(2).unwrap().chapter, "2.1.1");
    assert!(sitemap.first_of_article(3).is_none());
}

#[test]
fn test_full_text_is_normalized_title_and_body() {
    let sitemap = manual();
    assert_eq!(
        sitemap.text(path("1.1")),
        Some("setup install on linux or windows.")
    );
    assert_eq!(sitemap.full_text().len(), sitemap.size());
}

#[test]
fn test_alias_collision_last_wins() {
    let sitemap = build_index(&DocumentTree::new(vec![
        Section::nav(),
        Section::with_headings(vec![Heading::new(1, "Intro", ""), Heading::new(1, "Intro", "")]),
    ]));
    assert_eq!(sitemap.size(), 2);
    assert_eq!(sitemap.by_alias("Intro").unwrap().chapter, "2");
    assert_eq!(sitemap.by_path(path("1")).unwrap().alias, "Intro");
}

#[test]
fn test_expand_references() {
    let sitemap = manual();
    assert_eq!(
        sitemap.expand_references("Run [#IntroSetup] first, see [#2.1.1] and [#Missing]."),
        "Run [1.1 Setup](#IntroSetup) first, see [2.1.1 Options](#Reference[1]Options) and [#Missing]."
    );
}

#[test]
fn test_breadcrumb_and_sections() {
    let sitemap = manual();
    assert_eq!(sitemap.breadcrumb(path("2.1.1")), vec!["Reference", "---", "Options"]);
    assert!(sitemap.section_contains(2, path("1.1")));
    assert!(!sitemap.section_contains(3, path("1.1")));
    assert_eq!(sitemap.section_count(), 4);
}

#[test]
fn test_toc_entries_render_as_anchors() {
    let sitemap = manual();
    assert_eq!(sitemap.toc().len(), 6);
    assert_eq!(
        sitemap.toc()[1].render_html(),
        r##"<a href="#IntroSetup" level="2" number="1.1.0.0.0.0" chapter="1.1" alias="IntroSetup">Setup</a>"##
    );
}

#[test]
fn test_index_serializes_paths_as_display_numbers() {
    let sitemap = manual();
    let json = serde_json::to_value(&sitemap).unwrap();
    assert_eq!(json["chapters"][1]["path"], "1.1");
    assert_eq!(json["index"]["2.1.1"], "options flags and switches");
}
