//! One loaded manual: its index, what the reader is looking at and the filter input.
//!
//! [`ManualDocument`] is constructed once per document load and owned by the UI layer. UI
//! handlers call [`ManualDocument::navigate`] and [`ManualDocument::filter`]; the resulting
//! view changes are queued and applied one per tick by [`ManualDocument::tick`]. Navigation
//! state changes at once, its view changes (chapter and table of contents alike) run in the
//! order they were requested, so a navigation's hide/show and fragment update always land
//! before its toc entry turns active and the last request decides what is shown. Filter steps
//! wait in a queue of their own behind navigation, so a long filter run never delays a page
//! turn.

use crate::filter::{evaluate, FilterState};
use crate::navigator::{resolve, NavigationState, Reference, TocMode};
use crate::section::DocumentTree;
use crate::sitemap::{build_index, ChapterPath, Sitemap};
use crate::view::DocumentView;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A deferred view change.
pub enum Effect {
    /// Show the sections holding `path`, hide every other section.
    ShowChapter {
        /// Chapter to show.
        path: ChapterPath,
    },
    /// Set the location fragment, then optionally restore the saved scroll position.
    Fragment {
        /// New fragment.
        alias: String,
        /// Whether to return to the scroll position saved when the overlay opened.
        restore: bool,
    },
    /// Show the table of contents section alone, listing the entries of `article` or all.
    ShowToc {
        /// Article the overlay is focused on.
        article: Option<u32>,
        /// Whether to save the chapter view's scroll position first.
        save_screen: bool,
    },
    /// Mark `path` active in the table of contents, clear all other entries.
    MarkActive {
        /// Chapter to mark.
        path: ChapterPath,
    },
    /// Evaluate the filter of run `generation` against one chapter.
    FilterChapter {
        /// Run the step belongs to.
        generation: u64,
        /// Chapter to evaluate.
        path: ChapterPath,
    },
}

#[derive(Clone, Debug)]
/// Index, navigation state and filter state of one loaded manual.
pub struct ManualDocument {
    sitemap: Sitemap,
    navigation: NavigationState,
    filter: FilterState,
    pending: VecDeque<Effect>,
    filter_steps: VecDeque<Effect>,
}

impl ManualDocument {
    #[must_use]
    /// Indexes `tree` and starts with no current chapter.
    pub fn new(tree: &DocumentTree, debounce: Duration) -> Self {
        Self::from_sitemap(build_index(tree), debounce)
    }

    #[must_use]
    /// Wraps an already built index.
    pub fn from_sitemap(sitemap: Sitemap, debounce: Duration) -> Self {
        Self {
            sitemap,
            navigation: NavigationState::default(),
            filter: FilterState::new(debounce),
            pending: VecDeque::new(),
            filter_steps: VecDeque::new(),
        }
    }

    #[must_use]
    /// The document's index.
    pub fn sitemap(&self) -> &Sitemap {
        &self.sitemap
    }

    #[must_use]
    /// What the reader is looking at.
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    #[must_use]
    /// State of the filter input.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    /// Navigation view changes not yet applied.
    pub fn pending(&self) -> &VecDeque<Effect> {
        &self.pending
    }

    #[must_use]
    /// Filter steps not yet applied.
    pub fn filter_steps(&self) -> &VecDeque<Effect> {
        &self.filter_steps
    }

    /// Moves to the chapter named by `reference`, or toggles the table of contents.
    ///
    /// Navigation state changes at once, view changes are queued. Unresolvable references
    /// change nothing.
    pub fn navigate(&mut self, reference: &str) {
        if self.sitemap.is_empty() {
            return;
        }
        if let Reference::Toc(mode) = Reference::parse(reference) {
            self.toggle_toc(mode);
            return;
        }
        let current = self.navigation.current(&self.sitemap);
        let Some(target) = resolve(&self.sitemap, current, reference) else {
            debug!(reference, "chapter reference does not resolve");
            return;
        };
        let sequence = target.sequence;
        self.open(sequence, false);
    }

    /// Closes the table of contents and returns to the current chapter.
    pub fn hide_toc(&mut self) {
        if let Some(mode) = self.navigation.toc {
            self.toggle_toc(mode);
        }
    }

    /// Records the content of the filter input; evaluation follows after the quiet period.
    pub fn filter(&mut self, query: &str, now: Instant) {
        if self.sitemap.is_empty() {
            return;
        }
        self.filter.submit(query, now);
    }

    /// Starts a due filter run, then applies the oldest queued navigation change or, with
    /// none left, the oldest filter step.
    ///
    /// Returns whether a view change was applied.
    pub fn tick<V: DocumentView + ?Sized>(&mut self, view: &mut V, now: Instant) -> bool {
        self.poll_filter(view, now);
        let next = self
            .pending
            .pop_front()
            .or_else(|| self.filter_steps.pop_front());
        match next {
            Some(effect) => {
                self.apply(effect, view);
                true
            }
            None => false,
        }
    }

    /// Runs up to `budget` ticks; returns how many view changes were applied.
    pub fn run_pending<V: DocumentView + ?Sized>(
        &mut self,
        view: &mut V,
        now: Instant,
        budget: usize,
    ) -> usize {
        let mut applied = 0;
        while applied < budget && self.tick(view, now) {
            applied += 1;
        }
        applied
    }

    /// Applies every queued view change.
    pub fn flush<V: DocumentView + ?Sized>(&mut self, view: &mut V, now: Instant) {
        while self.tick(view, now) {}
    }

    fn open(&mut self, sequence: usize, restore: bool) {
        let Some(chapter) = self.sitemap.by_sequence(sequence) else {
            return;
        };
        self.navigation.current = Some(sequence);
        self.navigation.toc = None;
        self.pending.push_back(Effect::ShowChapter { path: chapter.path });
        self.pending.push_back(Effect::Fragment {
            alias: chapter.alias.clone(),
            restore,
        });
        self.pending
            .push_back(Effect::MarkActive { path: chapter.path });
    }

    fn toggle_toc(&mut self, mode: TocMode) {
        if self.navigation.is_toc_shown(mode) {
            if let Some(sequence) = self.navigation.current {
                self.open(sequence, true);
            }
            return;
        }

        let article = match mode {
            TocMode::Focus => self
                .navigation
                .current(&self.sitemap)
                .map(|chapter| chapter.article),
            TocMode::Full => None,
        };
        // The scroll position is saved only while a chapter, not the overlay, is shown.
        let save_screen = self.navigation.toc.is_none() && self.navigation.current.is_some();
        self.pending.push_back(Effect::ShowToc {
            article,
            save_screen,
        });
        self.navigation.toc = Some(mode);
    }

    fn poll_filter<V: DocumentView + ?Sized>(&mut self, view: &mut V, now: Instant) {
        let Some(generation) = self.filter.poll(now) else {
            return;
        };
        debug!(
            generation,
            query = self.filter.evaluated().unwrap_or_default(),
            "filter run started"
        );
        view.set_filter_error(false);
        for path in self.sitemap.full_text().keys() {
            self.filter_steps.push_back(Effect::FilterChapter {
                generation,
                path: *path,
            });
        }
    }

    fn apply<V: DocumentView + ?Sized>(&mut self, effect: Effect, view: &mut V) {
        match effect {
            Effect::ShowChapter { path } => {
                let toc_section = self.sitemap.toc_section();
                for section in 0..self.sitemap.section_count() {
                    let visible = Some(section) != toc_section
                        && self.sitemap.section_contains(section, path);
                    view.set_section_visible(section, visible);
                }
            }
            Effect::Fragment { alias, restore } => {
                view.set_fragment(&alias);
                if restore {
                    view.set_scroll_position(self.navigation.screen);
                }
            }
            Effect::ShowToc {
                article,
                save_screen,
            } => {
                if save_screen {
                    self.navigation.screen = view.scroll_position();
                }
                view.set_toc_focus(article.is_some());
                for entry in self.sitemap.toc() {
                    let visible =
                        article.is_none_or(|article| entry.path.article_number() == article);
                    view.set_toc_entry_visible(entry.path, visible);
                }
                let toc_section = self.sitemap.toc_section();
                for section in 0..self.sitemap.section_count() {
                    view.set_section_visible(section, Some(section) == toc_section);
                }
            }
            Effect::MarkActive { path } => {
                for entry in self.sitemap.toc() {
                    view.set_toc_entry_active(entry.path, entry.path == path);
                }
            }
            Effect::FilterChapter { generation, path } => {
                if !self.filter.is_current(generation) {
                    return;
                }
                let (Some(query), Some(text)) = (self.filter.compiled(), self.sitemap.text(path))
                else {
                    return;
                };
                match evaluate(query, text) {
                    Ok(matched) => view.set_toc_entry_minor(path, !matched),
                    Err(err) => {
                        // The chapter keeps its previous match state.
                        view.set_filter_error(true);
                        if self.filter.note_error() {
                            warn!(
                                error = %err,
                                query = self.filter.evaluated().unwrap_or_default(),
                                "filter query is malformed"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/manual.rs"]
mod tests;
