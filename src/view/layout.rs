//! Screen layout rendering.
//!
//! Pure rendering from a [`Screen`] snapshot: header, content list (or the
//! loading/error placeholder), status bar, and a toast stack overlaid on
//! the top-right corner of the content.

use crate::model::Toast;
use crate::state::ShellView;
use crate::view::catalog::Row;
use crate::view::styles::ShellStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashMap;
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// Everything one frame needs.
#[derive(Debug)]
pub struct Screen<'a> {
    /// Shell snapshot.
    pub shell: ShellView<'a>,
    /// Header title of the mounted view.
    pub title: &'a str,
    /// All rows of the mounted view.
    pub rows: &'a [Row],
    /// Rows the virtual list chose to render.
    pub window: Range<usize>,
    /// Container offset.
    pub offset: u32,
    /// Container max offset.
    pub max_offset: u32,
    /// Liked-track index.
    pub liked: &'a HashMap<String, bool>,
}

/// The three horizontal bands of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title bar.
    pub header: Rect,
    /// Scrollable content.
    pub content: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the frame into header, content and status bar.
pub fn split(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ScreenAreas {
        header: chunks[0],
        content: chunks[1],
        status: chunks[2],
    }
}

/// Terminal lines per row.
pub fn row_height(compact: bool) -> u16 {
    if compact {
        1
    } else {
        2
    }
}

/// Rows that fit in `content`.
pub fn visible_rows(content: Rect, compact: bool) -> u32 {
    u32::from(content.height / row_height(compact))
}

/// Render a full frame.
pub fn render_screen(frame: &mut Frame, screen: &Screen<'_>, styles: &ShellStyles) {
    let areas = split(frame.area());

    render_header(frame, areas.header, screen, styles);
    render_content(frame, areas.content, screen, styles);
    render_status_bar(frame, areas.status, screen, styles);
    render_toasts(frame, areas.content, screen.shell.toasts, styles);
}

fn is_compact(screen: &Screen<'_>) -> bool {
    screen
        .shell
        .settings
        .get_bool(crate::model::settings::COMPACT)
        .unwrap_or(false)
}

fn render_header(frame: &mut Frame, area: Rect, screen: &Screen<'_>, styles: &ShellStyles) {
    let mut text = format!("{}  {}", screen.title, screen.shell.current_path);
    if is_compact(screen) {
        text.push_str("  [compact]");
    }
    if screen.shell.is_restoring {
        text.push_str("  [restoring]");
    }
    frame.render_widget(Paragraph::new(text).style(styles.header()), area);
}

fn render_content(frame: &mut Frame, area: Rect, screen: &Screen<'_>, styles: &ShellStyles) {
    if let Some(error) = screen.shell.loading_error {
        let paragraph = Paragraph::new(format!("Could not load library: {error}"))
            .style(styles.error());
        frame.render_widget(paragraph, area);
        return;
    }

    if screen.shell.show_spinner {
        frame.render_widget(Paragraph::new("Loading library..."), area);
        return;
    }

    if screen.rows.is_empty() {
        frame.render_widget(Paragraph::new("Nothing here."), area);
        return;
    }

    let compact = is_compact(screen);
    let rows = screen.rows.get(screen.window.clone()).unwrap_or_default();
    let mut lines = Vec::with_capacity(rows.len() * usize::from(row_height(compact)));
    for row in rows {
        let marker = if screen.liked.contains_key(&row.id) {
            Span::styled("♥ ", styles.liked())
        } else {
            Span::raw("  ")
        };
        lines.push(Line::from(vec![marker, Span::raw(row.title.as_str())]));
        if !compact {
            lines.push(Line::styled(format!("  {}", row.detail), styles.detail()));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, screen: &Screen<'_>, styles: &ShellStyles) {
    let network = if screen.shell.offline {
        "OFFLINE"
    } else {
        "online"
    };
    let size = screen
        .shell
        .dimensions
        .map(|d| format!("{}x{}", d.width, d.height))
        .unwrap_or_else(|| "-".to_string());
    let text = format!(
        "{network} | row {}/{} | {size} | q quit, Enter open, b back, f fwd, o net, s compact",
        screen.offset, screen.max_offset
    );

    frame.render_widget(
        Paragraph::new(text).style(styles.status(screen.shell.offline)),
        area,
    );
}

/// Stack toasts top-right, newest at the bottom, as many as fit.
fn render_toasts(frame: &mut Frame, area: Rect, toasts: &[Toast], styles: &ShellStyles) {
    const TOAST_HEIGHT: u16 = 3;

    let mut y = area.y;
    for toast in toasts {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let width = u16::try_from(toast.message.width() + 4)
            .unwrap_or(u16::MAX)
            .min(area.width);
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height: TOAST_HEIGHT,
        };

        let style = styles.toast(toast.intent);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.message.as_str())
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
