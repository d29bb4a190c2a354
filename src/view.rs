//! The seam between the engine and whatever displays the manual.
//!
//! [`DocumentView`] lists the mutations the engine performs on a rendered document: section
//! visibility, the location fragment, markers on table of contents entries, the error marker on
//! the filter input and the scroll position. [`ViewModel`] is an in-memory implementation that
//! the terminal front-end renders from and that tests inspect.

use crate::sitemap::{ChapterPath, Sitemap};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
/// Horizontal and vertical scroll offset of the chapter view.
pub struct ScrollPosition {
    /// Columns scrolled to the right.
    pub left: u16,
    /// Lines scrolled down.
    pub top: u16,
}

/// Mutation primitives of a rendered document.
pub trait DocumentView {
    /// Shows or hides a whole section.
    fn set_section_visible(&mut self, section: usize, visible: bool);
    /// Sets the location fragment and scrolls to the anchor it names.
    fn set_fragment(&mut self, alias: &str);
    /// Adds or removes the "active" marker of a table of contents entry.
    fn set_toc_entry_active(&mut self, path: ChapterPath, active: bool);
    /// Adds or removes the "minor" marker of a table of contents entry.
    fn set_toc_entry_minor(&mut self, path: ChapterPath, minor: bool);
    /// Shows or hides a single table of contents entry.
    fn set_toc_entry_visible(&mut self, path: ChapterPath, visible: bool);
    /// Adds or removes the "focus" marker of the table of contents.
    fn set_toc_focus(&mut self, focus: bool);
    /// Adds or removes the "error" marker of the filter input.
    fn set_filter_error(&mut self, error: bool);
    /// Current scroll position of the chapter view.
    fn scroll_position(&self) -> ScrollPosition;
    /// Moves the chapter view.
    fn set_scroll_position(&mut self, position: ScrollPosition);
}

#[derive(Clone, Debug, Default)]
/// In-memory document view.
pub struct ViewModel {
    visible: Vec<bool>,
    fragment: Option<String>,
    active: HashSet<ChapterPath>,
    minor: HashSet<ChapterPath>,
    hidden_entries: HashSet<ChapterPath>,
    toc_focus: bool,
    filter_error: bool,
    scroll: ScrollPosition,
    anchors: HashMap<String, u16>,
}

impl ViewModel {
    #[must_use]
    /// View over `sections` sections, all visible, with no anchors.
    pub fn new(sections: usize) -> Self {
        Self {
            visible: vec![true; sections],
            ..Self::default()
        }
    }

    #[must_use]
    /// View over the sections of an indexed document, with one anchor per chapter alias.
    pub fn for_sitemap(sitemap: &Sitemap) -> Self {
        let mut view = Self::new(sitemap.section_count());
        for chapter in sitemap.chapters() {
            let line = u16::try_from(chapter.line).unwrap_or(u16::MAX);
            view.anchors.insert(chapter.alias.clone(), line);
        }
        view
    }

    #[must_use]
    /// Whether a section is shown.
    pub fn is_section_visible(&self, section: usize) -> bool {
        self.visible.get(section).copied().unwrap_or(false)
    }

    #[must_use]
    /// Indices of all shown sections.
    pub fn visible_sections(&self) -> Vec<usize> {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(index, visible)| visible.then_some(index))
            .collect()
    }

    #[must_use]
    /// Current location fragment.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    #[must_use]
    /// Whether the entry carries the "active" marker.
    pub fn is_active(&self, path: ChapterPath) -> bool {
        self.active.contains(&path)
    }

    #[must_use]
    /// Whether the entry carries the "minor" marker.
    pub fn is_minor(&self, path: ChapterPath) -> bool {
        self.minor.contains(&path)
    }

    #[must_use]
    /// Whether the entry is listed.
    pub fn is_entry_visible(&self, path: ChapterPath) -> bool {
        !self.hidden_entries.contains(&path)
    }

    #[must_use]
    /// Whether the table of contents is focused on one article.
    pub fn toc_focus(&self) -> bool {
        self.toc_focus
    }

    #[must_use]
    /// Whether the filter input carries the "error" marker.
    pub fn filter_error(&self) -> bool {
        self.filter_error
    }

    /// Scrolls by a signed number of lines, stopping at the top.
    pub fn scroll_by(&mut self, lines: i32) {
        let top = i32::from(self.scroll.top).saturating_add(lines);
        self.scroll.top = u16::try_from(top.max(0)).unwrap_or(u16::MAX);
    }
}

impl DocumentView for ViewModel {
    fn set_section_visible(&mut self, section: usize, visible: bool) {
        if section >= self.visible.len() {
            self.visible.resize(section + 1, true);
        }
        self.visible[section] = visible;
    }

    fn set_fragment(&mut self, alias: &str) {
        self.fragment = Some(alias.to_string());
        if let Some(line) = self.anchors.get(alias) {
            self.scroll = ScrollPosition {
                left: 0,
                top: *line,
            };
        }
    }

    fn set_toc_entry_active(&mut self, path: ChapterPath, active: bool) {
        if active {
            self.active.insert(path);
        } else {
            self.active.remove(&path);
        }
    }

    fn set_toc_entry_minor(&mut self, path: ChapterPath, minor: bool) {
        if minor {
            self.minor.insert(path);
        } else {
            self.minor.remove(&path);
        }
    }

    fn set_toc_entry_visible(&mut self, path: ChapterPath, visible: bool) {
        if visible {
            self.hidden_entries.remove(&path);
        } else {
            self.hidden_entries.insert(path);
        }
    }

    fn set_toc_focus(&mut self, focus: bool) {
        self.toc_focus = focus;
    }

    fn set_filter_error(&mut self, error: bool) {
        self.filter_error = error;
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    fn set_scroll_position(&mut self, position: ScrollPosition) {
        self.scroll = position;
    }
}
