//! Application state: the page of code blocks, scroll, focus, and toasts.
//!
//! `App` is a pure state container: it never imports `ratatui::Frame` or
//! performs any rendering. The renderer reads from `&App` to determine
//! what to draw. It plays the host role for every `CodeBlock`: it pushes
//! the theme and visibility signals, owns the clipboard, and collects
//! notifications as toasts.

use std::ops::Range;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::{BlockConfig, CodeBlock, CopyRequest};
use crate::document::{DocumentLine, GUTTER_PADDING, PreRenderedDocument, flatten};
use crate::host::{Clipboard, Notification, Notifier};
use crate::layout::str_width;
use crate::lazy::{TokenizeJob, Visibility};
use crate::palette::Theme;
use crate::source::SourceBlock;

/// How long a toast stays in the status area.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Columns moved per horizontal scroll step.
const H_SCROLL_STEP: usize = 4;

/// A notification with its expiry time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub notification: Notification,
    pub expires_at: Instant,
}

/// Notification sink that turns notifications into timed toasts.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    now: Option<Instant>,
}

impl Toasts {
    /// Sets the clock used to stamp incoming notifications.
    fn at(&mut self, now: Instant) -> &mut Self {
        self.now = Some(now);
        self
    }

    /// The most recent live toast.
    pub fn latest(&self) -> Option<&Toast> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn expire(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.expires_at > now);
        self.items.len() != before
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.items.iter().map(|t| t.expires_at).min()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notification: Notification) {
        let now = self.now.unwrap_or_else(Instant::now);
        tracing::info!(kind = ?notification.kind, message = %notification.message, "notification");
        self.items.push(Toast {
            notification,
            expires_at: now + TOAST_DURATION,
        });
    }
}

/// Application state for the TUI viewer.
pub struct App {
    /// One controller per code block, in page order.
    pub blocks: Vec<CodeBlock>,
    /// The flattened page (all rows laid out for display).
    pub document: PreRenderedDocument,
    /// Current vertical scroll offset (0 = top of page).
    pub scroll_offset: usize,
    /// Columns skipped on non-wrapped code rows.
    pub h_scroll: usize,
    /// Number of visible rows in the content area (excludes status bar).
    pub viewport_height: usize,
    /// Terminal width the document was flattened for.
    pub width: u16,
    /// Index of the block that keyboard actions apply to.
    pub focus: usize,
    /// Page-wide theme, pushed into every block.
    pub theme: Theme,
    /// Name of what is being displayed (shown in the status bar).
    pub title: String,
    pub toasts: Toasts,
    pub show_help: bool,
    /// When true, the event loop should exit.
    pub quit: bool,
    clipboard: Box<dyn Clipboard>,
    pending_copy: Option<(usize, CopyRequest)>,
    pending_jobs: Vec<(usize, TokenizeJob)>,
}

impl App {
    /// Mounts a block per source. Viewport height and width must be set by
    /// `main.rs` (via [`App::resize`]) before the first draw.
    pub fn new(
        sources: Vec<SourceBlock>,
        config: BlockConfig,
        theme: Theme,
        title: String,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let blocks: Vec<CodeBlock> = sources
            .into_iter()
            .map(|s| CodeBlock::new(s, config, theme))
            .collect();
        let document = flatten(&blocks, 0);
        Self {
            blocks,
            document,
            scroll_offset: 0,
            h_scroll: 0,
            viewport_height: 0,
            width: 0,
            focus: 0,
            theme,
            title,
            toasts: Toasts::default(),
            show_help: false,
            quit: false,
            clipboard,
            pending_copy: None,
            pending_jobs: Vec::new(),
        }
    }

    /// Updates the viewport, re-flattening the page if the width changed.
    pub fn resize(&mut self, width: u16, viewport_height: usize) {
        self.viewport_height = viewport_height;
        if width != self.width {
            self.width = width;
            self.relayout();
        }
        self.clamp_scroll();
    }

    /// Rebuilds the document after wrap, width, or load changes.
    pub fn relayout(&mut self) {
        self.document = flatten(&self.blocks, self.width);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
        self.h_scroll = self.h_scroll.min(self.max_h_scroll());
    }

    /// Sends `Visible` to every block intersecting the viewport and queues
    /// the tokenize jobs they hand back.
    pub fn signal_visible_blocks(&mut self) {
        let visible = self.visible_range();
        for (i, rows) in self.document.block_rows.iter().enumerate() {
            if rows.start < visible.end && visible.start < rows.end {
                if let Some(job) = self.blocks[i].signal_visibility(Visibility::Visible) {
                    self.pending_jobs.push((i, job));
                }
            }
        }
    }

    /// True when a copy or tokenize job is waiting for [`App::run_pending`].
    pub fn has_pending_work(&self) -> bool {
        self.pending_copy.is_some() || !self.pending_jobs.is_empty()
    }

    /// Runs queued clipboard writes and deferred tokenization. Called by the
    /// event loop after a frame is drawn, so placeholders and the
    /// "Copying…" label get a frame on screen. Returns whether anything ran.
    pub fn run_pending(&mut self, now: Instant) -> bool {
        let mut ran = false;

        if let Some((index, request)) = self.pending_copy.take() {
            let result = self.clipboard.write(request.text());
            if let Some(block) = self.blocks.get_mut(index) {
                block.complete_copy(request.ticket(), result, now, self.toasts.at(now));
            }
            ran = true;
        }

        let jobs = std::mem::take(&mut self.pending_jobs);
        let mut loaded = false;
        for (index, job) in jobs {
            let outcome = job.run();
            if let Some(block) = self.blocks.get_mut(index) {
                loaded |= block.apply(outcome);
            }
            ran = true;
        }
        if loaded {
            self.relayout();
        }

        ran
    }

    /// Applies due copy-feedback transitions and expires toasts.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.toasts.expire(now);
        for block in &mut self.blocks {
            changed |= block.tick(now);
        }
        changed
    }

    /// Earliest time something on screen changes by itself.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.blocks
            .iter()
            .filter_map(CodeBlock::next_deadline)
            .chain(self.toasts.next_deadline())
            .min()
    }

    /// Dispatches a key event to the appropriate action.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            // Any key closes the help overlay; quit keys still quit.
            self.show_help = false;
            if !matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return;
            }
        }
        match key.code {
            // Scroll down 1 line
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(1),
            // Scroll up 1 line
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(1),
            // Scroll down half-page
            KeyCode::Char('d') | KeyCode::PageDown => {
                let half = self.viewport_height / 2;
                self.scroll_down(half.max(1));
            }
            // Scroll up half-page
            KeyCode::Char('u') | KeyCode::PageUp => {
                let half = self.viewport_height / 2;
                self.scroll_up(half.max(1));
            }
            // Scroll to top
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to_top(),
            // Scroll to bottom (Shift+g = 'G')
            KeyCode::Char('G') | KeyCode::End => self.scroll_to_bottom(),
            // Horizontal scroll of non-wrapped rows
            KeyCode::Char('h') | KeyCode::Left => {
                self.h_scroll = self.h_scroll.saturating_sub(H_SCROLL_STEP);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.h_scroll = (self.h_scroll + H_SCROLL_STEP).min(self.max_h_scroll());
            }
            // Block focus
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            // Block actions
            KeyCode::Char('w') => self.toggle_wrap(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('c') | KeyCode::Char('y') => self.copy_focused(),
            KeyCode::Enter => self.materialize_focused(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('?') => self.show_help = true,
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Moves focus to the next block and scrolls its header into view.
    pub fn focus_next(&mut self) {
        if self.blocks.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.blocks.len();
        self.reveal_focus();
    }

    pub fn focus_prev(&mut self) {
        if self.blocks.is_empty() {
            return;
        }
        self.focus = (self.focus + self.blocks.len() - 1) % self.blocks.len();
        self.reveal_focus();
    }

    fn reveal_focus(&mut self) {
        if let Some(rows) = self.document.block_rows.get(self.focus) {
            let visible = self.visible_range();
            if !visible.contains(&rows.start) {
                self.scroll_offset = rows.start.min(self.max_scroll());
            }
        }
    }

    /// Toggles wrap on the focused block.
    pub fn toggle_wrap(&mut self) {
        if let Some(block) = self.blocks.get_mut(self.focus) {
            block.toggle_wrap();
            self.relayout();
        }
    }

    /// Queues a copy of the focused block; ignored while one is in flight.
    pub fn copy_focused(&mut self) {
        if self.pending_copy.is_some() {
            return;
        }
        if let Some(block) = self.blocks.get_mut(self.focus) {
            if let Some(request) = block.request_copy() {
                self.pending_copy = Some((self.focus, request));
            }
        }
    }

    /// Explicitly requests the focused block's styled output.
    pub fn materialize_focused(&mut self) {
        if let Some(block) = self.blocks.get_mut(self.focus) {
            if let Some(job) = block.signal_visibility(Visibility::Requested) {
                self.pending_jobs.push((self.focus, job));
            }
        }
    }

    /// Flips the page theme and pushes it into every block.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        for block in &mut self.blocks {
            block.set_theme(self.theme);
        }
    }

    /// Returns the range of row indices visible in the current viewport.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.scroll_offset + self.viewport_height).min(self.document.total_height);
        self.scroll_offset.min(end)..end
    }

    /// Scrolls down by `n` lines, clamped to the maximum scroll position.
    pub fn scroll_down(&mut self, n: usize) {
        let max = self.max_scroll();
        self.scroll_offset = self.scroll_offset.saturating_add(n).min(max);
    }

    /// Scrolls up by `n` lines, clamped to 0.
    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    /// Scrolls to the top of the page.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scrolls to the bottom of the page.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Returns the maximum valid scroll offset.
    ///
    /// When the page is shorter than the viewport, returns 0 (no scrolling).
    pub fn max_scroll(&self) -> usize {
        self.document
            .total_height
            .saturating_sub(self.viewport_height)
    }

    /// Largest horizontal offset that still shows the end of the widest
    /// unwrapped row. Wrapped rows never scroll sideways.
    pub fn max_h_scroll(&self) -> usize {
        let width = self.width as usize;
        self.document
            .lines
            .iter()
            .filter_map(|line| match line {
                DocumentLine::Code {
                    gutter,
                    wrapped: false,
                    segments,
                    ..
                } => Some((*gutter, segments.iter().map(|(_, t)| str_width(t)).sum::<usize>())),
                DocumentLine::Placeholder { gutter, text, .. } => Some((*gutter, str_width(text))),
                _ => None,
            })
            .map(|(gutter, content)| {
                content.saturating_sub(width.saturating_sub(gutter + GUTTER_PADDING))
            })
            .max()
            .unwrap_or(0)
    }

    /// Returns the current scroll position as a percentage (0–100).
    ///
    /// Returns 100 when the page fits within the viewport or when
    /// scrolled to the bottom.
    pub fn scroll_percent(&self) -> u16 {
        let max = self.max_scroll();
        if max == 0 {
            return 100;
        }
        ((self.scroll_offset as f64 / max as f64) * 100.0) as u16
    }

    /// Cancels timers and deferred work of every block.
    pub fn unmount(&mut self) {
        for block in &mut self.blocks {
            block.unmount();
        }
        self.pending_jobs.clear();
        self.pending_copy = None;
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
