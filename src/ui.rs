//! The UI renders the application state into something readable.
//!
//! The draw function shows either the table of contents overlay or the current chapter, with
//! the filter input and a help line underneath.

use crate::app_state::{AppState, InputMode};
use crate::view::DocumentView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the overlay or the chapter view, the filter input and the help line.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Overlay or chapter
            Constraint::Length(3), // Filter
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    if app.is_toc_shown() {
        draw_toc(f, app, chunks[0]);
    } else {
        draw_chapter(f, app, chunks[0]);
    }
    draw_filter(f, app, chunks[1]);
    draw_help(f, app, chunks[2]);
}

fn draw_toc(f: &mut Frame, app: &AppState, area: Rect) {
    let mut selected = None;
    let items: Vec<ListItem> = app
        .listed_entries()
        .into_iter()
        .enumerate()
        .map(|(row, (position, entry))| {
            if position == app.toc_cursor {
                selected = Some(row);
            }
            let indent = "  ".repeat(entry.level.saturating_sub(1));
            let line = Line::from(vec![
                Span::raw(indent),
                Span::styled(
                    format!("{} ", entry.chapter),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(entry.title.clone()),
            ]);

            let mut style = Style::default();
            if app.view.is_minor(entry.path) {
                style = style.fg(Color::DarkGray);
            }
            if app.view.is_active(entry.path) {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(line).style(style)
        })
        .collect();

    let title = if app.view.toc_focus() {
        "Contents (this article)"
    } else {
        "Contents"
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_chapter(f: &mut Frame, app: &AppState, area: Rect) {
    let sitemap = app.manual.sitemap();
    let title = match app.manual.navigation().current(sitemap) {
        Some(chapter) => format!(
            "{} {}",
            chapter.chapter,
            sitemap.breadcrumb(chapter.path).join(" > ")
        ),
        None => "Manual".to_string(),
    };
    let position = app.view.scroll_position();
    let chapter = Paragraph::new(app.chapter_text())
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((position.top, position.left));
    f.render_widget(chapter, area);
}

fn draw_filter(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, border) = if app.view.filter_error() {
        ("Filter (malformed)", Style::default().fg(Color::Red))
    } else if app.mode == InputMode::Filter {
        ("Filter", Style::default().fg(Color::Yellow))
    } else {
        ("Filter", Style::default())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);
    let filter = Paragraph::new(app.filter_buffer.as_str()).block(block);
    f.render_widget(filter, area);
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let help_text = if app.mode == InputMode::Command {
        format!(":{}", app.command_buffer)
    } else if let Some(ref msg) = app.message {
        msg.clone()
    } else if app.mode == InputMode::Filter {
        "Type a query | Enter/Esc: Done".to_string()
    } else if app.is_toc_shown() {
        "↑/↓: Select | Enter: Open | t/f: Close | Esc: Back | /: Filter | q: Quit".to_string()
    } else {
        "n/p: Chapter | N/P: Article | g/G: First/Last | t: Contents | f: Focus | /: Filter | :ref | q: Quit"
            .to_string()
    };

    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
