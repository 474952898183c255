//! Layout engine: partitions a token stream into numbered lines.
//!
//! `layout()` is a pure partition: every token lands in exactly one `Line`,
//! in order, and nothing is added or removed. The wrap flag never changes
//! which characters belong to which line; it only affects how
//! [`CodeLayout::visual_rows`] breaks a line for display.

use unicode_width::UnicodeWidthChar;

use crate::tokenizer::{Token, TokenKind};

/// Display columns a tab expands to.
pub const TAB_WIDTH: usize = 4;

/// One logical source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 0-based line index.
    pub index: usize,
    /// Tokens of this line, including its terminating newline token if any.
    pub tokens: Vec<Token>,
}

impl Line {
    /// 1-based number shown in the gutter.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Tokens that are drawn (everything except the newline).
    pub fn display_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.is_newline())
    }

    /// Characters in this line, newline included.
    pub fn char_count(&self) -> usize {
        self.tokens.iter().map(|t| t.text.chars().count()).sum()
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.display_tokens().map(|t| str_width(&t.text)).sum()
    }
}

/// Lines of a block plus the wrap mode they are displayed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeLayout {
    pub lines: Vec<Line>,
    pub wrap_enabled: bool,
}

/// A run of same-kind text inside a visual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// One terminal row of a laid-out line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRow<'a> {
    /// Index of the logical line this row belongs to.
    pub line: usize,
    /// False for the first row of a line; wrapped rows get no line number.
    pub continuation: bool,
    pub segments: Vec<Segment<'a>>,
}

impl<'a> VisualRow<'a> {
    fn new(line: usize, continuation: bool) -> Self {
        Self {
            line,
            continuation,
            segments: Vec::new(),
        }
    }
}

/// Splits `tokens` into lines at newline tokens.
///
/// A newline token ends the line it belongs to and begins the next, so
/// `"a\n"` is two lines (the second empty) and `""` is none.
pub fn layout(tokens: &[Token], wrap_enabled: bool) -> CodeLayout {
    let mut lines = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut after_newline = false;

    for token in tokens {
        after_newline = token.is_newline();
        current.push(token.clone());
        if after_newline {
            lines.push(Line {
                index: lines.len(),
                tokens: std::mem::take(&mut current),
            });
        }
    }
    if !current.is_empty() || after_newline {
        lines.push(Line {
            index: lines.len(),
            tokens: current,
        });
    }

    CodeLayout {
        lines,
        wrap_enabled,
    }
}

impl CodeLayout {
    /// Total number of tokens across all lines.
    pub fn token_count(&self) -> usize {
        self.lines.iter().map(|l| l.tokens.len()).sum()
    }

    /// Total number of characters across all lines.
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Line::char_count).sum()
    }

    /// Widest line, in columns.
    pub fn max_width(&self) -> usize {
        self.lines.iter().map(Line::width).max().unwrap_or(0)
    }

    /// Visual rows for every line at `width` columns.
    pub fn visual_rows(&self, width: usize) -> Vec<VisualRow<'_>> {
        self.lines
            .iter()
            .flat_map(|line| visual_rows(line, width, self.wrap_enabled))
            .collect()
    }
}

/// Breaks one line into display rows.
///
/// With wrap off (or `width == 0`) the line is a single row and overflow is
/// the renderer's business. With wrap on, rows hold at most `width`
/// columns, splitting inside tokens when needed. A character wider than
/// the whole row still gets a row of its own.
pub fn visual_rows(line: &Line, width: usize, wrap_enabled: bool) -> Vec<VisualRow<'_>> {
    let mut rows = Vec::new();
    let mut current = VisualRow::new(line.index, false);

    if !wrap_enabled || width == 0 {
        current.segments = line
            .display_tokens()
            .map(|t| Segment {
                kind: t.kind,
                text: &t.text,
            })
            .collect();
        rows.push(current);
        return rows;
    }

    let mut col = 0;
    for token in line.display_tokens() {
        let mut rest = token.text.as_str();
        while !rest.is_empty() {
            let (mut take, mut used) = split_at_width(rest, width - col);
            if take == 0 {
                if col > 0 {
                    rows.push(std::mem::replace(
                        &mut current,
                        VisualRow::new(line.index, true),
                    ));
                    col = 0;
                    continue;
                }
                // Single char wider than the row.
                take = rest.chars().next().map_or(rest.len(), char::len_utf8);
                used = width;
            }
            current.segments.push(Segment {
                kind: token.kind,
                text: &rest[..take],
            });
            col += used;
            rest = &rest[take..];
            if col >= width && !rest.is_empty() {
                rows.push(std::mem::replace(
                    &mut current,
                    VisualRow::new(line.index, true),
                ));
                col = 0;
            }
        }
    }
    rows.push(current);
    rows
}

/// Number of lines `layout` produces for `code`.
pub fn line_count(code: &str) -> usize {
    if code.is_empty() {
        0
    } else {
        code.matches('\n').count() + 1
    }
}

/// Raw text of each line `layout` produces for `code`, terminators removed.
pub fn source_lines(code: &str) -> impl Iterator<Item = &str> {
    code.split_inclusive('\n')
        .map(|l| match l.strip_suffix('\n') {
            Some(l) => l.strip_suffix('\r').unwrap_or(l),
            None => l,
        })
        .chain(code.ends_with('\n').then_some(""))
}

/// Gutter width (digits) needed to number `line_count` lines.
pub fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len()
}

/// Display width of a character, with tabs expanded.
pub fn char_width(c: char) -> usize {
    if c == '\t' {
        TAB_WIDTH
    } else {
        c.width().unwrap_or(0)
    }
}

/// Display width of a string, with tabs expanded.
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Longest prefix of `s` fitting in `columns`. Returns (bytes, columns).
fn split_at_width(s: &str, columns: usize) -> (usize, usize) {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = char_width(c);
        if used + w > columns {
            return (i, used);
        }
        used += w;
    }
    (s.len(), used)
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
