//! Renderer: converts DocumentLine rows to ratatui Frame output.
//!
//! This is the final stage of the rendering pipeline. It reads from
//! `&App` to determine which rows are visible, resolves token styles for
//! each block's current theme, and draws the rows, a status bar, the
//! latest toast, and the help overlay.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::controller::{CodeBlock, CopyState};
use crate::document::DocumentLine;
use crate::host::NotificationKind;
use crate::layout::{TAB_WIDTH, char_width, line_count};
use crate::palette::{Theme, style_for};
use crate::tokenizer::TokenKind;

const HELP_TEXT: &[(&str, &str)] = &[
    ("j / k", "scroll"),
    ("d / u", "half page"),
    ("g / G", "top / bottom"),
    ("h / l", "scroll sideways (wrap off)"),
    ("Tab", "next block"),
    ("w", "toggle wrap"),
    ("c / y", "copy block"),
    ("Enter", "load a large block now"),
    ("t", "toggle light / dark"),
    ("q", "quit"),
];

/// Draws the current view of the page, toast, and status bar to the frame.
///
/// The content area occupies all rows except the last, which is reserved
/// for the status bar. For extremely small terminals (height < 2), only
/// the status bar is rendered.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Reserve the bottom row for the status bar.
    let content_height = area.height.saturating_sub(1) as usize;
    let content_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: content_height as u16,
    };

    if content_height > 0 {
        let range = app.visible_range();
        for (i, row_idx) in range.enumerate() {
            if i >= content_height {
                break;
            }
            let Some(row) = app.document.lines.get(row_idx) else {
                break;
            };

            // saturating_add prevents u16 overflow if area.y is non-zero and i is large.
            let y = content_area.y.saturating_add(i as u16);
            let line_area = Rect {
                x: content_area.x,
                y,
                width: content_area.width,
                height: 1,
            };
            let line = render_row(app, row, content_area.width as usize);
            frame.render_widget(Paragraph::new(line), line_area);
        }
        draw_toast(frame, app, content_area);
    }

    draw_status_bar(frame, app, area);

    if app.show_help {
        draw_help(frame, area);
    }
}

fn render_row(app: &App, row: &DocumentLine, width: usize) -> Line<'static> {
    match row {
        DocumentLine::Header { block } => match app.blocks.get(*block) {
            Some(b) => header_line(b, *block == app.focus, width),
            None => Line::default(),
        },
        DocumentLine::Code {
            block,
            number,
            gutter,
            wrapped,
            segments,
        } => {
            let theme = block_theme(app, *block);
            let mut spans = vec![gutter_span(*number, *gutter, theme)];
            let skip = if *wrapped { 0 } else { app.h_scroll };
            let mut skipped = 0;
            for (kind, text) in segments {
                let text = expand_tabs(text);
                let (visible, consumed) = skip_columns(&text, skip.saturating_sub(skipped));
                skipped += consumed;
                if !visible.is_empty() {
                    spans.push(Span::styled(visible.to_string(), style_for(*kind, theme)));
                }
            }
            fill_line(spans, width, theme.background())
        }
        DocumentLine::Placeholder {
            block,
            number,
            gutter,
            text,
        } => {
            let theme = block_theme(app, *block);
            let style = style_for(TokenKind::Plain, theme).add_modifier(Modifier::DIM);
            let text = expand_tabs(text);
            let (visible, _) = skip_columns(&text, app.h_scroll);
            let spans = vec![
                gutter_span(Some(*number), *gutter, theme),
                Span::styled(visible.to_string(), style),
            ];
            fill_line(spans, width, theme.background())
        }
        DocumentLine::Note { block, text } => {
            let theme = block_theme(app, *block);
            let style = style_for(TokenKind::Comment, theme);
            fill_line(
                vec![Span::styled(format!("  {text}"), style)],
                width,
                theme.background(),
            )
        }
        DocumentLine::Empty => Line::default(),
    }
}

fn block_theme(app: &App, block: usize) -> Theme {
    app.blocks
        .get(block)
        .map_or(app.theme, |b| b.state().theme)
}

/// Header bar: language and line count on the left, wrap and copy
/// affordances on the right.
fn header_line(block: &CodeBlock, focused: bool, width: usize) -> Line<'static> {
    let state = block.state();
    let style = state.theme.header_style();
    let marker = if focused { "▶" } else { " " };
    let lines = line_count(block.source().code());
    let loading = if block.is_loaded() { "" } else { " · loading" };
    let left = format!(
        "{marker} {} · {lines} line{}{loading}",
        block.source().display_language(),
        if lines == 1 { "" } else { "s" }
    );

    let wrap = if state.wrap_enabled { "[wrap: on]" } else { "[wrap: off]" };
    let copy_style = match state.copy_state {
        CopyState::Idle => style,
        CopyState::Copying => style.add_modifier(Modifier::DIM),
        CopyState::Succeeded => style.fg(Color::Green).add_modifier(Modifier::BOLD),
        CopyState::Failed => style.fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    let copy = format!("[{}]", block.copy_label());
    let right_width = wrap.width() + 1 + copy.width() + 1;

    let left_style = if focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    };
    let pad = width.saturating_sub(left.width() + right_width);
    Line::from(vec![
        Span::styled(left, left_style),
        Span::styled(" ".repeat(pad), style),
        Span::styled(wrap.to_string(), style),
        Span::styled(" ", style),
        Span::styled(copy, copy_style),
        Span::styled(" ", style),
    ])
}

fn gutter_span(number: Option<usize>, gutter: usize, theme: Theme) -> Span<'static> {
    let text = match number {
        Some(n) => format!("{n:>gutter$} │ "),
        None => format!("{:>gutter$} │ ", ""),
    };
    Span::styled(text, theme.gutter_style())
}

/// Pads the line with background out to `width` columns.
fn fill_line(mut spans: Vec<Span<'static>>, width: usize, bg: Color) -> Line<'static> {
    // Use display width (columns), not byte length, to handle multi-byte
    // characters correctly (e.g. Unicode operators, CJK, arrows).
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let remaining = width.saturating_sub(used);
    if remaining > 0 {
        spans.push(Span::styled(" ".repeat(remaining), Style::default().bg(bg)));
    }
    Line::from(spans)
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Drops the first `columns` display columns of `text`. Returns the rest
/// and how many columns were dropped.
fn skip_columns(text: &str, columns: usize) -> (&str, usize) {
    let mut skipped = 0;
    for (i, c) in text.char_indices() {
        if skipped >= columns {
            return (&text[i..], skipped);
        }
        skipped += char_width(c);
    }
    ("", skipped)
}

/// Draws the latest toast in the bottom-right corner of the content area,
/// word-wrapped to at most half the width.
fn draw_toast(frame: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = app.toasts.latest() else {
        return;
    };
    let max_width = (area.width as usize / 2).max(20).min(area.width as usize);
    let inner_width = max_width.saturating_sub(4).max(1);
    let wrapped = textwrap::wrap(&toast.notification.message, inner_width);
    let height = (wrapped.len() as u16 + 2).min(area.height);
    let text_width = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
    let width = (text_width as u16 + 4).min(area.width);
    if height < 3 || width < 5 {
        return;
    }

    let toast_area = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    };
    let color = match toast.notification.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Failure => Color::Red,
    };
    let lines: Vec<Line> = wrapped
        .into_iter()
        .map(|l| Line::from(Span::raw(format!(" {l}"))))
        .collect();
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(Clear, toast_area);
    frame.render_widget(widget, toast_area);
}

/// Renders the status bar at the bottom row of the given area.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_y = area.y + area.height.saturating_sub(1);
    let status_area = Rect {
        x: area.x,
        y: status_y,
        width: area.width,
        height: 1,
    };

    let percent = app.scroll_percent();
    let block_count = app.blocks.len();
    let current_block = if block_count == 0 { 0 } else { app.focus + 1 };

    let status_text = format!(
        " {} | block {}/{} | {} | {}% | ? help ",
        app.title,
        current_block,
        block_count,
        app.theme.name(),
        percent
    );

    let status_style = Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD);

    // Pad the status text to fill the entire width.
    let padded = format!("{:<width$}", status_text, width = area.width as usize);
    let status_line = Line::from(Span::styled(padded, status_style));
    frame.render_widget(Paragraph::new(status_line), status_area);
}

/// Centered key-binding overlay.
fn draw_help(frame: &mut Frame, area: Rect) {
    let key_width = HELP_TEXT.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let width = area.width.min(48);
    let desc_width = (width as usize).saturating_sub(key_width + 5).max(1);

    let mut lines = Vec::new();
    for (key, desc) in HELP_TEXT {
        for (i, part) in textwrap::wrap(desc, desc_width).into_iter().enumerate() {
            let key = if i == 0 { *key } else { "" };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {key:<key_width$}  "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(part.into_owned()),
            ]));
        }
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let help_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" keys "));
    frame.render_widget(Clear, help_area);
    frame.render_widget(widget, help_area);
}
