//! The terminal reader's state: one loaded manual plus the input the reader is typing.
//!
//! Keys are translated into chapter references and filter queries for
//! [`ManualDocument`](crate::manual::ManualDocument); the view changes it queues are applied to
//! a [`ViewModel`] a batch per frame by [`AppState::pump`], and the UI draws from that model.

use crate::config::Config;
use crate::manual::ManualDocument;
use crate::navigator::{resolve, Reference};
use crate::section::DocumentTree;
use crate::sitemap::TocEntry;
use crate::view::ViewModel;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which input line, if any, receives typed characters.
pub enum InputMode {
    /// Keys navigate.
    Normal,
    /// Keys edit the filter query.
    Filter,
    /// Keys edit a chapter reference typed after `:`.
    Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What the event loop should do after a key.
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the terminal UI.
    Quit,
}

/// Keywords accepted in command mode without their leading colon.
const COMMAND_KEYWORDS: [&str; 4] = ["first", "last", "toc", "toc-focus"];

/// One loaded manual and the reader's input state.
pub struct AppState {
    /// Sections as loaded, rendered when visible.
    pub tree: DocumentTree,
    /// Index, navigation and filter state.
    pub manual: ManualDocument,
    /// Rendered state the engine mutates.
    pub view: ViewModel,
    /// Active input line.
    pub mode: InputMode,
    /// Filter query as typed.
    pub filter_buffer: String,
    /// Chapter reference typed after `:`.
    pub command_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Highlighted table of contents entry.
    pub toc_cursor: usize,
    /// View changes applied per frame.
    pub batch: usize,
}

impl AppState {
    #[must_use]
    /// Indexes `tree` with the configured filter quiet period.
    pub fn new(tree: DocumentTree, cfg: &Config) -> Self {
        let manual = ManualDocument::new(&tree, cfg.debounce());
        let view = ViewModel::for_sitemap(manual.sitemap());
        Self {
            tree,
            manual,
            view,
            mode: InputMode::Normal,
            filter_buffer: String::new(),
            command_buffer: String::new(),
            message: None,
            toc_cursor: 0,
            batch: cfg.filter_batch.max(1),
        }
    }

    /// Navigates to `reference`, reporting references that lead nowhere.
    pub fn navigate(&mut self, reference: &str) {
        let sitemap = self.manual.sitemap();
        let is_toc = matches!(Reference::parse(reference), Reference::Toc(_));
        let current = self.manual.navigation().current(sitemap);
        if !is_toc && resolve(sitemap, current, reference).is_none() {
            self.message = Some(format!("No chapter for {}", reference.trim()));
            return;
        }
        self.message = None;
        self.manual.navigate(reference);
        if self.is_toc_shown() {
            // The current chapter's entry is listed in both overlay modes.
            self.toc_cursor = self.current_toc_position().unwrap_or(0);
        }
    }

    /// Applies up to one batch of queued view changes.
    pub fn pump(&mut self, now: Instant) -> usize {
        self.manual.run_pending(&mut self.view, now, self.batch)
    }

    #[must_use]
    /// Whether the table of contents overlay is shown.
    pub fn is_toc_shown(&self) -> bool {
        self.manual.navigation().toc.is_some()
    }

    #[must_use]
    /// Table of contents entries currently listed, with their position in the full list.
    pub fn listed_entries(&self) -> Vec<(usize, &TocEntry)> {
        self.manual
            .sitemap()
            .toc()
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.view.is_entry_visible(entry.path))
            .collect()
    }

    #[must_use]
    /// Text of the shown chapter sections with cross references expanded.
    pub fn chapter_text(&self) -> String {
        let toc_section = self.manual.sitemap().toc_section();
        self.view
            .visible_sections()
            .into_iter()
            .filter(|section| Some(*section) != toc_section)
            .filter_map(|section| self.tree.sections.get(section))
            .map(|section| self.manual.sitemap().expand_references(&section.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        match self.mode {
            InputMode::Normal => return self.handle_normal_key(key),
            InputMode::Filter => self.handle_filter_key(key, now),
            InputMode::Command => return self.handle_command_key(key),
        }
        Control::Continue
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Char('t') => self.navigate(":toc"),
            KeyCode::Char('f') => self.navigate(":toc-focus"),
            KeyCode::Char('n') | KeyCode::Right => self.navigate("+1"),
            KeyCode::Char('p') | KeyCode::Left => self.navigate("-1"),
            KeyCode::Char('N') | KeyCode::PageDown => self.navigate("++1"),
            KeyCode::Char('P') | KeyCode::PageUp => self.navigate("--1"),
            KeyCode::Home if ctrl => self.navigate("::first"),
            KeyCode::End if ctrl => self.navigate("::last"),
            KeyCode::Char('g') | KeyCode::Home => self.navigate(":first"),
            KeyCode::Char('G') | KeyCode::End => self.navigate(":last"),
            KeyCode::Char('/') => {
                self.mode = InputMode::Filter;
                self.message = None;
            }
            KeyCode::Char(':') => {
                self.mode = InputMode::Command;
                self.command_buffer.clear();
                self.message = None;
            }
            KeyCode::Esc => self.manual.hide_toc(),
            KeyCode::Up | KeyCode::Char('k') => self.step(-1),
            KeyCode::Down | KeyCode::Char('j') => self.step(1),
            KeyCode::Enter => self.open_toc_entry(),
            _ => {}
        }
        Control::Continue
    }

    fn handle_filter_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c) => {
                self.filter_buffer.push(c);
                self.manual.filter(&self.filter_buffer, now);
            }
            KeyCode::Backspace => {
                self.filter_buffer.pop();
                self.manual.filter(&self.filter_buffer, now);
            }
            KeyCode::Enter | KeyCode::Esc => self.mode = InputMode::Normal,
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Char(c) => self.command_buffer.push(c),
            KeyCode::Backspace => {
                self.command_buffer.pop();
            }
            KeyCode::Enter => {
                let cmd = std::mem::take(&mut self.command_buffer);
                self.mode = InputMode::Normal;
                match cmd.trim() {
                    "q" | "quit" => return Control::Quit,
                    "" => {}
                    other => self.navigate(&command_reference(other)),
                }
            }
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.command_buffer.clear();
            }
            _ => {}
        }
        Control::Continue
    }

    /// Moves the overlay cursor, or scrolls the chapter view when no overlay is shown.
    fn step(&mut self, delta: i32) {
        if !self.is_toc_shown() {
            self.view.scroll_by(delta);
            return;
        }
        let total = self.manual.sitemap().toc().len();
        if total == 0 {
            return;
        }
        let mut cursor = self.toc_cursor;
        loop {
            let next = if delta < 0 {
                cursor.checked_sub(1)
            } else {
                Some(cursor + 1).filter(|next| *next < total)
            };
            let Some(next) = next else {
                return;
            };
            cursor = next;
            if self.is_listed(cursor) {
                self.toc_cursor = cursor;
                return;
            }
        }
    }

    fn is_listed(&self, position: usize) -> bool {
        self.manual
            .sitemap()
            .toc()
            .get(position)
            .is_some_and(|entry| self.view.is_entry_visible(entry.path))
    }

    fn current_toc_position(&self) -> Option<usize> {
        let current = self.manual.navigation().current(self.manual.sitemap())?;
        self.manual
            .sitemap()
            .toc()
            .iter()
            .position(|entry| entry.path == current.path)
    }

    fn open_toc_entry(&mut self) {
        if !self.is_toc_shown() {
            return;
        }
        let Some(entry) = self.manual.sitemap().toc().get(self.toc_cursor) else {
            return;
        };
        let reference = entry.chapter.clone();
        self.navigate(&reference);
    }
}

/// Turns command line input into a chapter reference; keywords may omit their colon.
#[must_use]
pub fn command_reference(input: &str) -> String {
    let input = input.trim();
    if input.starts_with(':') || COMMAND_KEYWORDS.contains(&input.to_ascii_lowercase().as_str()) {
        format!(":{input}")
    } else {
        input.to_string()
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
