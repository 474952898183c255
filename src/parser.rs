//! Input parser: turns a file into the `SourceBlock`s to display.
//!
//! Markdown files contribute every code block they contain (fenced blocks
//! carry their info string as the language tag). Any other file becomes a
//! single block whose language comes from the file extension.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use thiserror::Error;

use crate::source::SourceBlock;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read standard input")]
    Stdin(#[source] io::Error),
}

/// Extensions treated as markdown.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd"];

/// Reads `path` (or stdin for `"-"`) and splits it into blocks.
///
/// `language` overrides the detected language for non-markdown input, and
/// forces single-block mode: `--lang markdown` shows a markdown file raw.
pub fn load(path: &str, language: Option<&str>) -> Result<Vec<SourceBlock>, InputError> {
    let text = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(InputError::Stdin)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: PathBuf::from(path),
            source,
        })?
    };

    if language.is_none() && is_markdown(path) {
        let blocks = extract_code_blocks(&text);
        tracing::info!(path, blocks = blocks.len(), "extracted markdown code blocks");
        if !blocks.is_empty() {
            return Ok(blocks);
        }
    }

    let language = language.map_or_else(|| language_for_path(path), str::to_string);
    Ok(vec![SourceBlock::new(text, language)])
}

fn is_markdown(path: &str) -> bool {
    extension(path).is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Language tag derived from a file name. The tokenizer resolves aliases,
/// so the bare extension is enough; a few well-known names are special.
pub fn language_for_path(path: &str) -> String {
    let file_name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    match file_name {
        ".bashrc" | ".zshrc" | ".profile" | "PKGBUILD" => return "bash".to_string(),
        _ => {}
    }
    extension(path).unwrap_or_default()
}

/// Collects the code blocks of a markdown document, in order.
///
/// Identical blocks get distinct keys by suffixing their ordinal.
pub fn extract_code_blocks(markdown: &str) -> Vec<SourceBlock> {
    let options =
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut blocks = Vec::new();
    // Language and buffered text of the block being read, if any.
    let mut current: Option<(String, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info_language(&info),
                    CodeBlockKind::Indented => String::new(),
                };
                current = Some((language, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, code)) = current.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, code)) = current.take() {
                    let block = SourceBlock::new(code, language);
                    let key = format!("{}#{}", block.instance_key(), blocks.len());
                    blocks.push(block.with_key(key));
                }
            }
            _ => {}
        }
    }

    blocks
}

/// First word of a fence info string: ```` ```rust,ignore ```` → `rust`.
fn info_language(info: &str) -> String {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
