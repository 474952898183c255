//! Lazy loader: decides when a block is tokenized and guards deferred work.
//!
//! Small blocks tokenize on construction. Blocks at or above the threshold
//! wait for a visibility or request signal from the host. Deferred work is
//! tagged with a generation; replacing the source bumps the generation so a
//! late result for the old source is never applied to the new one.

use std::sync::Arc;
use std::time::Instant;

use crate::source::SourceBlock;
use crate::tokenizer::{Token, tokenize};

/// Default size (bytes) at which tokenization is deferred.
pub const DEFAULT_LAZY_THRESHOLD_BYTES: usize = 16 * 1024;

/// Host signal about whether a block should materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Off screen, nothing asked for.
    #[default]
    Hidden,
    /// Scrolled into view.
    Visible,
    /// Explicitly expanded by the user.
    Requested,
}

/// Whether styled output is available yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
}

/// Tokenization work for one generation of a block's source.
#[derive(Debug, Clone)]
pub struct TokenizeJob {
    generation: u64,
    source: Arc<SourceBlock>,
}

/// The result of a [`TokenizeJob`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeOutcome {
    pub generation: u64,
    pub tokens: Vec<Token>,
}

impl TokenizeJob {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Runs the tokenizer. Output is identical to eager tokenization of the
    /// same source.
    pub fn run(self) -> TokenizeOutcome {
        let started = Instant::now();
        let tokens = tokenize(self.source.code(), self.source.language());
        tracing::debug!(
            key = self.source.instance_key(),
            generation = self.generation,
            bytes = self.source.code().len(),
            tokens = tokens.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "tokenized block"
        );
        TokenizeOutcome {
            generation: self.generation,
            tokens,
        }
    }
}

/// Per-block scheduling policy plus the generation counter.
#[derive(Debug, Clone)]
pub struct LazyLoader {
    threshold: usize,
    generation: u64,
    in_flight: bool,
}

impl LazyLoader {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            generation: 0,
            in_flight: false,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a job for the current generation is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Inputs below the threshold tokenize immediately; larger ones only
    /// once the host says the block is visible or requested.
    pub fn should_tokenize_now(&self, code_len: usize, visibility: Visibility) -> bool {
        code_len < self.threshold || visibility != Visibility::Hidden
    }

    /// Hands out a job for the current generation, or `None` if one is
    /// already outstanding.
    pub fn schedule(&mut self, source: &Arc<SourceBlock>) -> Option<TokenizeJob> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(TokenizeJob {
            generation: self.generation,
            source: Arc::clone(source),
        })
    }

    /// Drops any outstanding job: its outcome will be rejected.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    /// Accepts `outcome` only if it belongs to the current generation.
    pub fn accept(&mut self, outcome: &TokenizeOutcome) -> bool {
        if outcome.generation != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }
}

impl Default for LazyLoader {
    fn default() -> Self {
        Self::new(DEFAULT_LAZY_THRESHOLD_BYTES)
    }
}

#[cfg(test)]
#[path = "lazy_tests.rs"]
mod tests;
