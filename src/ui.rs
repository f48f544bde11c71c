//! UI rendering module.
//!
//! All drawing happens here: the header with the address fragment, the
//! navigation sidebar, the content pane, the log strip, and the help
//! overlay, in the Kanagawa Dragon aesthetic.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Focus, LogLevel, HEADER_ROWS, LOG_ROWS, SIDEBAR_COLS};
use crate::layout::Row;
use crate::theme::{colors, styles};

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Fill background with theme color
    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(10),
            Constraint::Length(LOG_ROWS),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);
    render_logs(frame, app, chunks[2]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Header: title, address fragment, copy flash, scroll position
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border())
        .title(" refsheet ")
        .title_style(styles::title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let back_style = if app.location.can_go_back() {
        styles::text_dim()
    } else {
        styles::text_hint()
    };
    let forward_style = if app.location.can_go_forward() {
        styles::text_dim()
    } else {
        styles::text_hint()
    };
    let mut spans = vec![
        Span::styled("‹ ", back_style),
        Span::styled("› ", forward_style),
        Span::styled(app.address_text(), styles::address()),
        Span::styled("  ", styles::text_dim()),
        Span::styled(
            format!("{} sections", app.catalog.sections.len()),
            styles::text_dim(),
        ),
    ];
    if app.copied_at.is_some() {
        spans.push(Span::styled("  ✓ copied", styles::success()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    let position = Paragraph::new(Line::from(Span::styled(
        format!("{}% ", app.scroll.percent()),
        styles::text_hint(),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(position, inner);
}

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    if app.sidebar_collapsed {
        render_content(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_COLS), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
}

/// Navigation sidebar: one entry per section, active entry highlighted
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Sidebar {
        styles::border_focused()
    } else {
        styles::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Navigation ")
        .title_style(styles::title());

    let active = app.spy.active_section();
    let items: Vec<ListItem> = app
        .catalog
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let is_active = active == Some(section.id.as_str());
            let is_cursor = app.focus == Focus::Sidebar && index == app.sidebar_selected;
            let style = if is_active {
                styles::nav_active()
            } else if is_cursor {
                styles::nav_cursor()
            } else {
                styles::nav_inactive()
            };
            let marker = if is_active { "› " } else { "  " };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, section.title),
                style,
            )))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Content pane: the visible window of flattened rows
fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Content {
        styles::border_focused()
    } else {
        styles::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Reference ")
        .title_style(styles::title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let offset = app.scroll.row_offset().max(0) as usize;
    let end = (offset + inner.height as usize).min(app.layout.rows.len());
    let lines: Vec<Line> = app.layout.rows[offset.min(app.layout.rows.len())..end]
        .iter()
        .map(content_line)
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Map one content row to a styled line
fn content_line(row: &Row) -> Line<'_> {
    match row {
        Row::Blank => Line::default(),
        Row::SectionTitle(title) => Line::from(Span::styled(
            format!("§ {}", title),
            styles::section_title(),
        )),
        Row::Description(text) => Line::from(Span::styled(text.as_str(), styles::text_dim())),
        Row::SubsectionTitle(title) => Line::from(Span::styled(
            format!("▸ {}", title),
            styles::subsection_title(),
        )),
        Row::CodeTop { language, title } => {
            let label = match title {
                Some(title) => format!("╭─ {} · {} ", language, title),
                None => format!("╭─ {} ", language),
            };
            Line::from(Span::styled(label, styles::code_frame()))
        }
        Row::CodeLine(code) => Line::from(vec![
            Span::styled("│ ", styles::code_frame()),
            Span::styled(code.as_str(), styles::code()),
        ]),
        Row::CodeBottom => Line::from(Span::styled("╰─", styles::code_frame())),
        Row::TipHeader => Line::from(Span::styled("✦ Tip", styles::tip())),
        Row::Tip(tip) => Line::from(Span::styled(format!("  · {}", tip), styles::tip())),
        Row::WarningHeader => Line::from(Span::styled("▲ Warning", styles::warning())),
        Row::Warning(warning) => {
            Line::from(Span::styled(format!("  · {}", warning), styles::warning()))
        }
    }
}

/// Log strip: the most recent messages with level colors
fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border())
        .title(" Messages ")
        .title_style(styles::title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    let lines: Vec<Line> = app
        .logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let style = match entry.level {
                LogLevel::Info => styles::info(),
                LogLevel::Success => styles::success(),
                LogLevel::Warning => styles::warning(),
                LogLevel::Error => styles::error(),
            };
            Line::from(Span::styled(entry.message.as_str(), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Centered help overlay listing the key bindings
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(52, 18, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_focused())
        .title(" Help ")
        .title_style(styles::title())
        .style(Style::default().bg(colors::BG_MEDIUM));

    let bindings: &[(&str, &str)] = &[
        ("j/k, ↑/↓", "scroll"),
        ("d/u", "half page"),
        ("g/G", "top / bottom"),
        ("n/p", "next / previous section"),
        ("Tab", "focus sidebar / content"),
        ("Enter", "open selected section"),
        ("[ / ]", "history back / forward"),
        ("s", "toggle sidebar"),
        ("y", "copy active section's code"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];
    let mut lines = vec![Line::default()];
    for (keys, action) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", keys), styles::text()),
            Span::styled(*action, styles::text_dim()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Centered rectangle of fixed size, clamped to the available area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
