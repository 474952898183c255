//! Page flattening: stacks every `CodeBlock` into one list of terminal rows.
//!
//! The result is sized for a given terminal width and wrap state, and is
//! rebuilt when either changes or a block finishes loading. Rows carry
//! token kinds rather than styles, so a theme change needs no rebuild.

use std::ops::Range;

use crate::controller::CodeBlock;
use crate::layout::{gutter_width, line_count, source_lines};
use crate::tokenizer::TokenKind;

/// Columns taken by the gutter decoration around the number: `" │ "`.
pub const GUTTER_PADDING: usize = 3;

/// A pre-rendered page ready for viewport slicing.
pub struct PreRenderedDocument {
    /// All rows in display order.
    pub lines: Vec<DocumentLine>,
    /// Total number of rows (== `lines.len()`).
    pub total_height: usize,
    /// Row range occupied by each block, header included.
    pub block_rows: Vec<Range<usize>>,
}

/// One row of the page. The renderer matches on this exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLine {
    /// Language label and affordances of a block.
    Header { block: usize },
    /// A styled code row. `number` is `None` on wrapped continuations.
    Code {
        block: usize,
        number: Option<usize>,
        gutter: usize,
        wrapped: bool,
        segments: Vec<(TokenKind, String)>,
    },
    /// Raw text shown while a deferred block waits for its tokens.
    Placeholder {
        block: usize,
        number: usize,
        gutter: usize,
        text: String,
    },
    /// A short message inside a block (empty input).
    Note { block: usize, text: &'static str },
    /// Spacing between blocks.
    Empty,
}

impl PreRenderedDocument {
    /// The block a row belongs to, if any.
    pub fn block_at(&self, row: usize) -> Option<usize> {
        self.block_rows.iter().position(|r| r.contains(&row))
    }
}

/// Flattens `blocks` into rows for a terminal `width` columns wide.
pub fn flatten(blocks: &[CodeBlock], width: u16) -> PreRenderedDocument {
    let mut lines: Vec<DocumentLine> = Vec::new();
    let mut block_rows = Vec::with_capacity(blocks.len());
    let width = width as usize;

    for (i, block) in blocks.iter().enumerate() {
        // Inter-block spacing (not before the first block).
        if i > 0 {
            lines.push(DocumentLine::Empty);
        }
        let start = lines.len();
        lines.push(DocumentLine::Header { block: i });

        let code = block.source().code();
        if code.is_empty() {
            lines.push(DocumentLine::Note {
                block: i,
                text: "(empty)",
            });
        } else if let Some(layout) = block.layout() {
            let gutter = gutter_width(layout.lines.len());
            let code_width = width.saturating_sub(gutter + GUTTER_PADDING);
            for row in layout.visual_rows(code_width) {
                lines.push(DocumentLine::Code {
                    block: i,
                    number: (!row.continuation).then_some(row.line + 1),
                    gutter,
                    wrapped: layout.wrap_enabled,
                    segments: row
                        .segments
                        .iter()
                        .map(|s| (s.kind, s.text.to_string()))
                        .collect(),
                });
            }
        } else {
            let gutter = gutter_width(line_count(code));
            for (n, text) in source_lines(code).enumerate() {
                lines.push(DocumentLine::Placeholder {
                    block: i,
                    number: n + 1,
                    gutter,
                    text: text.to_string(),
                });
            }
        }
        block_rows.push(start..lines.len());
    }

    let total_height = lines.len();
    PreRenderedDocument {
        lines,
        total_height,
        block_rows,
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
