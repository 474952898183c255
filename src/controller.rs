//! Interaction controller: one `CodeBlock` per widget instance.
//!
//! `CodeBlock` owns the block's `RenderState` and is the only piece that
//! talks to the host (clipboard, notifications, visibility and theme
//! signals). It never imports `ratatui::Frame`; the renderer reads from it.
//!
//! Copy feedback is an explicit timed state machine:
//!
//! ```text
//! Idle ──request──▶ Copying ──ok──▶ Succeeded ──(feedback elapsed)──▶ Idle
//!                          └─err──▶ Failed    ──(feedback elapsed)──▶ Idle
//! ```
//!
//! Requests while `Copying` are ignored. Time is passed in, never read.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::host::{Clipboard, ClipboardError, Notification, Notifier};
use crate::layout::{CodeLayout, layout, line_count};
use crate::lazy::{
    DEFAULT_LAZY_THRESHOLD_BYTES, LazyLoader, LoadState, TokenizeJob, TokenizeOutcome, Visibility,
};
use crate::palette::Theme;
use crate::source::SourceBlock;
use crate::tokenizer::{Token, validate_tokens};

/// How long `Succeeded` / `Failed` stay on screen.
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Tunables shared by every block of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockConfig {
    /// Code size (bytes) at which tokenization waits for a visibility signal.
    pub lazy_threshold: usize,
    /// Display interval of copy feedback before reverting to `Idle`.
    pub copy_feedback: Duration,
    /// Initial wrap mode.
    pub wrap_by_default: bool,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            lazy_threshold: DEFAULT_LAZY_THRESHOLD_BYTES,
            copy_feedback: DEFAULT_COPY_FEEDBACK,
            wrap_by_default: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Copying,
    Succeeded,
    Failed,
}

/// Transient UI state of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub wrap_enabled: bool,
    pub theme: Theme,
    pub load_state: LoadState,
    pub copy_state: CopyState,
}

impl RenderState {
    fn initial(config: &BlockConfig, theme: Theme) -> Self {
        Self {
            wrap_enabled: config.wrap_by_default,
            theme,
            load_state: LoadState::Pending,
            copy_state: CopyState::Idle,
        }
    }
}

/// A copy-state change due at `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub at: Instant,
    pub to: CopyState,
}

/// An accepted copy request. Hand `text()` to the clipboard, then report
/// back with [`CodeBlock::complete_copy`].
#[derive(Debug, Clone)]
pub struct CopyRequest {
    ticket: u64,
    source: Arc<SourceBlock>,
}

impl CopyRequest {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// The original, untokenized code.
    pub fn text(&self) -> &str {
        self.source.code()
    }
}

/// One interactive code block.
#[derive(Debug)]
pub struct CodeBlock {
    source: Arc<SourceBlock>,
    config: BlockConfig,
    state: RenderState,
    loader: LazyLoader,
    tokens: Vec<Token>,
    layout: CodeLayout,
    scheduled: Option<ScheduledTransition>,
    copy_ticket: u64,
}

impl CodeBlock {
    /// Mounts a block. Small sources are tokenized right away.
    pub fn new(source: SourceBlock, config: BlockConfig, theme: Theme) -> Self {
        let mut block = Self {
            source: Arc::new(source),
            config,
            state: RenderState::initial(&config, theme),
            loader: LazyLoader::new(config.lazy_threshold),
            tokens: Vec::new(),
            layout: CodeLayout::default(),
            scheduled: None,
            copy_ticket: 0,
        };
        block.load_eagerly();
        block
    }

    /// Replaces the source. Rendering state is reset (the host theme is
    /// kept), outstanding tokenization and copy feedback are dropped.
    pub fn set_source(&mut self, source: SourceBlock) {
        tracing::debug!(
            old = self.source.instance_key(),
            new = source.instance_key(),
            "replacing block source"
        );
        self.source = Arc::new(source);
        self.loader.invalidate();
        self.state = RenderState::initial(&self.config, self.state.theme);
        self.tokens.clear();
        self.layout = CodeLayout::default();
        self.scheduled = None;
        // Completions for requests issued against the old source are stale.
        self.copy_ticket += 1;
        self.load_eagerly();
    }

    fn load_eagerly(&mut self) {
        if self
            .loader
            .should_tokenize_now(self.source.code().len(), Visibility::Hidden)
        {
            if let Some(job) = self.loader.schedule(&self.source) {
                self.apply(job.run());
            }
        }
    }

    pub fn source(&self) -> &SourceBlock {
        &self.source
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.state.load_state == LoadState::Loaded
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Styled lines, once loaded.
    pub fn layout(&self) -> Option<&CodeLayout> {
        self.is_loaded().then_some(&self.layout)
    }

    /// Generation of the current source, for matching deferred work.
    pub fn generation(&self) -> u64 {
        self.loader.generation()
    }

    // ── Lazy loading ──────────────────────────────────────────────

    /// Feeds a host visibility signal. Returns the deferred job to run when
    /// the block should materialize now.
    pub fn signal_visibility(&mut self, visibility: Visibility) -> Option<TokenizeJob> {
        if self.is_loaded() {
            return None;
        }
        if !self
            .loader
            .should_tokenize_now(self.source.code().len(), visibility)
        {
            return None;
        }
        self.loader.schedule(&self.source)
    }

    /// Installs the result of a deferred job. Outcomes from a replaced
    /// source are discarded. Returns whether the outcome was applied.
    pub fn apply(&mut self, outcome: TokenizeOutcome) -> bool {
        if self.is_loaded() || !self.loader.accept(&outcome) {
            tracing::debug!(
                key = self.source.instance_key(),
                outcome = outcome.generation,
                current = self.loader.generation(),
                "discarding stale tokenization"
            );
            return false;
        }
        debug_assert!(validate_tokens(self.source.code(), &outcome.tokens));
        self.tokens = outcome.tokens;
        self.layout = layout(&self.tokens, self.state.wrap_enabled);
        self.state.load_state = LoadState::Loaded;
        true
    }

    /// Requests materialization and runs the job in place.
    pub fn materialize(&mut self) -> bool {
        match self.signal_visibility(Visibility::Requested) {
            Some(job) => self.apply(job.run()),
            None => false,
        }
    }

    // ── Wrap and theme ────────────────────────────────────────────

    /// Flips wrap mode and relays out the existing tokens.
    pub fn toggle_wrap(&mut self) {
        self.set_wrap(!self.state.wrap_enabled);
    }

    pub fn set_wrap(&mut self, enabled: bool) {
        if self.state.wrap_enabled == enabled {
            return;
        }
        self.state.wrap_enabled = enabled;
        if self.is_loaded() {
            self.layout = layout(&self.tokens, enabled);
        }
    }

    /// Host theme signal. Styles are resolved at draw time, so nothing is
    /// re-tokenized or relaid out.
    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
    }

    // ── Copy ──────────────────────────────────────────────────────

    /// Starts a copy. Returns `None` while a copy is already in flight.
    ///
    /// A request during `Succeeded`/`Failed` starts over and cancels the
    /// pending revert to `Idle`.
    pub fn request_copy(&mut self) -> Option<CopyRequest> {
        if self.state.copy_state == CopyState::Copying {
            tracing::debug!(key = self.source.instance_key(), "copy already in flight");
            return None;
        }
        self.scheduled = None;
        self.copy_ticket += 1;
        self.state.copy_state = CopyState::Copying;
        Some(CopyRequest {
            ticket: self.copy_ticket,
            source: Arc::clone(&self.source),
        })
    }

    /// Reports the clipboard outcome of `ticket`, notifies the user, and
    /// schedules the revert. Unknown or stale tickets are ignored.
    pub fn complete_copy(
        &mut self,
        ticket: u64,
        result: Result<(), ClipboardError>,
        now: Instant,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if ticket != self.copy_ticket || self.state.copy_state != CopyState::Copying {
            return false;
        }
        let to = match result {
            Ok(()) => {
                let lines = line_count(self.source.code());
                notifier.notify(Notification::success(format!(
                    "Copied {lines} line{} to clipboard",
                    if lines == 1 { "" } else { "s" }
                )));
                CopyState::Succeeded
            }
            Err(err) => {
                tracing::warn!(key = self.source.instance_key(), %err, "copy failed");
                notifier.notify(Notification::failure(format!("Failed to copy code: {err}")));
                CopyState::Failed
            }
        };
        self.state.copy_state = to;
        self.scheduled = Some(ScheduledTransition {
            at: now + self.config.copy_feedback,
            to: CopyState::Idle,
        });
        true
    }

    /// Request, write, and complete in one call.
    pub fn copy_to_clipboard(
        &mut self,
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
        now: Instant,
    ) -> CopyState {
        if let Some(request) = self.request_copy() {
            let result = clipboard.write(request.text());
            self.complete_copy(request.ticket(), result, now, notifier);
        }
        self.state.copy_state
    }

    /// Applies a due transition. Returns whether the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.scheduled {
            Some(transition) if transition.at <= now => {
                self.state.copy_state = transition.to;
                self.scheduled = None;
                true
            }
            _ => false,
        }
    }

    /// When the next scheduled transition is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.map(|t| t.at)
    }

    /// Tears the widget down: cancels the feedback timer, any in-flight copy
    /// and any deferred tokenization.
    pub fn unmount(&mut self) {
        self.scheduled = None;
        self.copy_ticket += 1;
        self.state.copy_state = CopyState::Idle;
        self.loader.invalidate();
    }

    /// Text of the copy affordance for the current state.
    pub fn copy_label(&self) -> &'static str {
        match self.state.copy_state {
            CopyState::Idle => "Copy",
            CopyState::Copying => "Copying…",
            CopyState::Succeeded => "Copied!",
            CopyState::Failed => "Copy failed",
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
