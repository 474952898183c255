//! `SourceBlock`: the immutable (code, language, key) input of a code block.

use crate::tokenizer::Language;

/// Number of leading characters of the code folded into a derived key.
const KEY_PREFIX_CHARS: usize = 50;

/// Raw code plus its declared language.
///
/// Never mutated after construction; replacing a block's source means
/// building a new `SourceBlock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock {
    code: String,
    language: String,
    instance_key: String,
}

impl SourceBlock {
    /// Creates a block whose key is `"{language}-{first 50 chars}"`.
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        let code = code.into();
        let language = language.into();
        let prefix: String = code.chars().take(KEY_PREFIX_CHARS).collect();
        let instance_key = format!("{language}-{prefix}");
        Self {
            code,
            language,
            instance_key,
        }
    }

    /// Replaces the derived key, e.g. to tell identical blocks apart.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.instance_key = key.into();
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// The language tag as declared by the caller.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn instance_key(&self) -> &str {
        &self.instance_key
    }

    /// The lexer variant selected by the declared tag.
    pub fn resolved_language(&self) -> Language {
        Language::from_tag(&self.language)
    }

    /// Label shown in the block header: the declared tag, or the resolved
    /// name when no tag was given.
    pub fn display_language(&self) -> &str {
        let tag = self.language.trim();
        if tag.is_empty() {
            self.resolved_language().name()
        } else {
            tag
        }
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
