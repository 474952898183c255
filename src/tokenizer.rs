//! Tokenizer: splits source text into classified tokens for syntax coloring.
//!
//! This is a **leaf module**. It never imports from other codeink modules,
//! and the rest of the crate only sees its output vocabulary (`Token`,
//! `TokenKind`, `Language`).
//!
//! Every byte of the input ends up in exactly one token: whitespace and
//! newlines are `Plain` tokens, so concatenating token texts reproduces the
//! input. Each newline (`\n` or `\r\n`) is a token of its own and no other
//! token spans a line break, which is what the layout engine relies on.
//!
//! Lexing is a single forward pass with at most 4 bytes of lookahead.

/// Syntactic category of a token.
///
/// `Plain` is discriminant 0: the color mapper falls back to that slot.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Comment,
    Number,
    Identifier,
    Operator,
    Punctuation,
}

impl TokenKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Plain,
        TokenKind::Keyword,
        TokenKind::String,
        TokenKind::Comment,
        TokenKind::Number,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Punctuation,
    ];

    /// Position of this kind in lookup tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A classified substring of the source.
///
/// `start..end` is the byte range of `text` inside the original code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Byte length of the token.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True for the `\n` / `\r\n` tokens that terminate a line.
    pub fn is_newline(&self) -> bool {
        self.text == "\n" || self.text == "\r\n"
    }
}

/// Languages with a dedicated lexer. Anything else is `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Rust,
    Bash,
    Json,
    Html,
    Css,
    #[default]
    Plain,
}

impl Language {
    /// Resolves a free-form language tag (`"js"`, `"Python"`, `"tsx"`, ...).
    ///
    /// Unknown or empty tags resolve to `Plain`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" | "javascript" | "node" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" | "typescript" => Language::TypeScript,
            "py" | "pyw" | "python" | "python3" => Language::Python,
            "rs" | "rust" => Language::Rust,
            "sh" | "bash" | "shell" | "zsh" | "console" => Language::Bash,
            "json" | "jsonc" => Language::Json,
            "html" | "htm" | "xhtml" | "xml" | "svg" => Language::Html,
            "css" => Language::Css,
            _ => Language::Plain,
        }
    }

    /// Canonical name, used as the block header label.
    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Bash => "bash",
            Language::Json => "json",
            Language::Html => "html",
            Language::Css => "css",
            Language::Plain => "text",
        }
    }
}

/// Tokenizes `code` using the lexer selected by the `language` tag.
///
/// Deterministic, never fails, and the concatenation of the returned token
/// texts is exactly `code`. Empty input yields no tokens.
pub fn tokenize(code: &str, language: &str) -> Vec<Token> {
    tokenize_language(code, Language::from_tag(language))
}

/// Tokenizes `code` with an already-resolved [`Language`].
pub fn tokenize_language(code: &str, language: Language) -> Vec<Token> {
    let mut lexer = Lexer::new(code);
    match language {
        Language::JavaScript => lexer.lex_code(&JAVASCRIPT),
        Language::TypeScript => lexer.lex_code(&TYPESCRIPT),
        Language::Python => lexer.lex_code(&PYTHON),
        Language::Rust => lexer.lex_code(&RUST),
        Language::Bash => lexer.lex_code(&BASH),
        Language::Json => lexer.lex_code(&JSON),
        Language::Css => lexer.lex_code(&CSS),
        Language::Html => lexer.lex_markup(),
        Language::Plain => lexer.lex_plain(),
    }
    lexer.tokens
}

/// Checks that `tokens` are contiguous, in bounds, and reproduce `code`.
pub fn validate_tokens(code: &str, tokens: &[Token]) -> bool {
    let mut expected_start = 0;
    for token in tokens {
        if token.start != expected_start || token.end < token.start || token.end > code.len() {
            return false;
        }
        if code.get(token.start..token.end) != Some(token.text.as_str()) {
            return false;
        }
        expected_start = token.end;
    }
    expected_start == code.len()
}

// ── Per-language rules ──────────────────────────────────────────

/// Lexical shape of a C-like language. One static table per variant.
struct LexRules {
    keywords: &'static [&'static str],
    line_comment: Option<&'static str>,
    block_comment: Option<(&'static str, &'static str)>,
    /// Quotes that close on the same line.
    quotes: &'static [u8],
    /// Quotes whose literal may span lines (JS template strings).
    multiline_quotes: &'static [u8],
    /// `"""` / `'''` strings.
    triple_quotes: bool,
    /// `f"..."`, `rb'...'` style prefixes fold into the string token.
    string_prefixes: bool,
    /// `'a` is a lifetime, not an unterminated char literal.
    lifetimes: bool,
    /// Extra bytes allowed to start an identifier.
    word_start_extra: &'static [u8],
    /// Extra bytes allowed inside an identifier.
    word_extra: &'static [u8],
    /// `@media` style keywords.
    at_keywords: bool,
    /// `#fff` / `#667eea` color literals are numbers.
    hash_colors: bool,
}

const BASE_RULES: LexRules = LexRules {
    keywords: &[],
    line_comment: None,
    block_comment: None,
    quotes: b"\"'",
    multiline_quotes: b"",
    triple_quotes: false,
    string_prefixes: false,
    lifetimes: false,
    word_start_extra: b"",
    word_extra: b"",
    at_keywords: false,
    hash_colors: false,
};

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
    "function", "get", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
    "set", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined",
    "var", "void", "while", "with", "yield",
];

const TS_KEYWORDS: &[&str] = &[
    "abstract", "any", "as", "async", "await", "boolean", "break", "case", "catch", "class",
    "const", "continue", "debugger", "declare", "default", "delete", "do", "else", "enum",
    "export", "extends", "false", "finally", "for", "from", "function", "get", "if",
    "implements", "import", "in", "infer", "instanceof", "interface", "is", "keyof", "let",
    "namespace", "never", "new", "null", "number", "of", "private", "protected", "public",
    "readonly", "return", "satisfies", "set", "static", "string", "super", "switch", "this",
    "throw", "true", "try", "type", "typeof", "undefined", "unknown", "var", "void", "while",
    "with", "yield",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "case", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "match", "nonlocal", "not", "or", "pass", "raise",
    "return", "try", "while", "with", "yield",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

const BASH_KEYWORDS: &[&str] = &[
    "case", "declare", "do", "done", "elif", "else", "esac", "exit", "export", "fi", "for",
    "function", "if", "in", "local", "readonly", "return", "select", "shift", "source", "then",
    "time", "unset", "until", "while",
];

const CSS_KEYWORDS: &[&str] = &["auto", "important", "inherit", "initial", "none", "unset"];

const JAVASCRIPT: LexRules = LexRules {
    keywords: JS_KEYWORDS,
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    multiline_quotes: b"`",
    word_start_extra: b"$",
    word_extra: b"$",
    ..BASE_RULES
};

const TYPESCRIPT: LexRules = LexRules {
    keywords: TS_KEYWORDS,
    ..JAVASCRIPT
};

const PYTHON: LexRules = LexRules {
    keywords: PYTHON_KEYWORDS,
    line_comment: Some("#"),
    triple_quotes: true,
    string_prefixes: true,
    ..BASE_RULES
};

const RUST: LexRules = LexRules {
    keywords: RUST_KEYWORDS,
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    lifetimes: true,
    ..BASE_RULES
};

const BASH: LexRules = LexRules {
    keywords: BASH_KEYWORDS,
    line_comment: Some("#"),
    word_start_extra: b"$",
    ..BASE_RULES
};

const JSON: LexRules = LexRules {
    keywords: &["true", "false", "null"],
    quotes: b"\"",
    ..BASE_RULES
};

const CSS: LexRules = LexRules {
    keywords: CSS_KEYWORDS,
    block_comment: Some(("/*", "*/")),
    word_extra: b"-",
    at_keywords: true,
    hash_colors: true,
    ..BASE_RULES
};

fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'=' | b'!' | b'<' | b'>' | b'&' | b'|' | b'^' | b'~'
            | b'?'
    )
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn is_octal_digit(b: u8) -> bool {
    (b'0'..=b'7').contains(&b)
}

fn is_binary_digit(b: u8) -> bool {
    b == b'0' || b == b'1'
}

fn is_string_prefix(word: &str) -> bool {
    word.len() <= 2
        && word
            .bytes()
            .all(|b| matches!(b.to_ascii_lowercase(), b'f' | b'r' | b'b' | b'u'))
}

// ── Lexer ───────────────────────────────────────────────────────

/// Cursor over the source. `end` bounds the region being lexed, which is
/// narrower than the source while lexing an embedded `<script>`/`<style>`.
struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    end: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            end: src.len(),
            tokens: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        let i = self.pos + offset;
        (i < self.end).then(|| self.bytes[i])
    }

    fn starts_with(&self, pat: &[u8]) -> bool {
        self.bytes[self.pos..self.end].starts_with(pat)
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        if start < end {
            self.tokens.push(Token {
                text: self.src[start..end].to_string(),
                kind,
                start,
                end,
            });
        }
    }

    /// Byte length of the UTF-8 character at the cursor.
    fn char_len(&self) -> usize {
        self.src[self.pos..].chars().next().map_or(1, char::len_utf8)
    }

    fn newline_len(&self) -> usize {
        match self.peek(0) {
            Some(b'\n') => 1,
            Some(b'\r') if self.peek(1) == Some(b'\n') => 2,
            _ => 0,
        }
    }

    /// Position where the current line's content ends (before `\n`/`\r\n`).
    fn line_end(&self) -> usize {
        match self.bytes[self.pos..self.end].iter().position(|&b| b == b'\n') {
            Some(i) => {
                let nl = self.pos + i;
                if nl > self.pos && self.bytes[nl - 1] == b'\r' {
                    nl - 1
                } else {
                    nl
                }
            }
            None => self.end,
        }
    }

    fn lex_newline(&mut self) -> bool {
        let n = self.newline_len();
        if n == 0 {
            return false;
        }
        self.push(TokenKind::Plain, self.pos, self.pos + n);
        self.pos += n;
        true
    }

    fn lex_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            let is_space = matches!(b, b' ' | b'\t' | 0x0b | 0x0c)
                || (b == b'\r' && self.peek(1) != Some(b'\n'));
            if !is_space {
                break;
            }
            self.pos += 1;
        }
        self.push(TokenKind::Plain, start, self.pos);
        self.pos > start
    }

    /// Scans a construct that may span lines, starting at `start` with the
    /// cursor already past the opener. Emits one token per line segment with
    /// newline tokens in between. Unclosed constructs run to the region end.
    fn scan_multiline(&mut self, kind: TokenKind, start: usize, closer: &[u8], escapes: bool) {
        let mut segment = start;
        loop {
            if self.pos >= self.end {
                self.push(kind, segment, self.pos);
                return;
            }
            if self.starts_with(closer) {
                self.pos += closer.len();
                self.push(kind, segment, self.pos);
                return;
            }
            let nl = self.newline_len();
            if nl > 0 {
                self.push(kind, segment, self.pos);
                self.push(TokenKind::Plain, self.pos, self.pos + nl);
                self.pos += nl;
                segment = self.pos;
                continue;
            }
            if escapes
                && self.bytes[self.pos] == b'\\'
                && self.peek(1).is_some_and(|b| b != b'\n' && b != b'\r')
            {
                self.pos += 2;
                continue;
            }
            self.pos += 1;
        }
    }

    /// Scans a single-line quoted literal opened at the cursor. An
    /// unterminated literal ends at the end of the line.
    fn scan_quoted(&mut self, start: usize, quote: u8) {
        self.pos += 1;
        while self.pos < self.end {
            let b = self.bytes[self.pos];
            if b == b'\n' || (b == b'\r' && self.peek(1) == Some(b'\n')) {
                break;
            }
            if b == b'\\' && self.peek(1).is_some_and(|n| n != b'\n' && n != b'\r') {
                self.pos += 2;
                continue;
            }
            self.pos += 1;
            if b == quote {
                break;
            }
        }
        self.push(TokenKind::String, start, self.pos);
    }

    fn scan_digits(&mut self, radix_digit: fn(u8) -> bool) {
        while self.peek(0).is_some_and(|b| radix_digit(b) || b == b'_') {
            self.pos += 1;
        }
    }

    /// Numeric literal: radix prefixes, `_` separators, fraction, exponent,
    /// and an alphanumeric suffix (`1u32`, `10n`, `2rem`).
    fn scan_number(&mut self) {
        let start = self.pos;
        let radix: Option<fn(u8) -> bool> =
            match (self.peek(0), self.peek(1).map(|b| b.to_ascii_lowercase())) {
                (Some(b'0'), Some(b'x')) => Some(is_hex_digit),
                (Some(b'0'), Some(b'o')) => Some(is_octal_digit),
                (Some(b'0'), Some(b'b')) => Some(is_binary_digit),
                _ => None,
            };
        if let Some(is_digit) = radix {
            self.pos += 2;
            self.scan_digits(is_digit);
        } else {
            self.scan_digits(|b| b.is_ascii_digit());
            if self.peek(0) == Some(b'.') && self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
                self.scan_digits(|b| b.is_ascii_digit());
            }
            if matches!(self.peek(0), Some(b'e' | b'E')) {
                let signed = matches!(self.peek(1), Some(b'+' | b'-'));
                let digit_at = if signed { 2 } else { 1 };
                if self.peek(digit_at).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += digit_at;
                    self.scan_digits(|b| b.is_ascii_digit());
                }
            }
        }
        while self.peek(0).is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        self.push(TokenKind::Number, start, self.pos);
    }

    fn is_word_start(&self, rules: &LexRules) -> bool {
        let b = self.bytes[self.pos];
        if b.is_ascii_alphabetic() || b == b'_' || rules.word_start_extra.contains(&b) {
            return true;
        }
        !b.is_ascii() && self.src[self.pos..].chars().next().is_some_and(char::is_alphabetic)
    }

    /// Advances past an identifier body and returns its end.
    fn scan_word(&mut self, rules: &LexRules) -> usize {
        let rest = &self.src[self.pos..self.end];
        let len = rest
            .char_indices()
            .find(|&(i, c)| {
                let first = i == 0;
                let extra = c.is_ascii()
                    && (rules.word_extra.contains(&(c as u8))
                        || (first && rules.word_start_extra.contains(&(c as u8))));
                !(c.is_alphanumeric() || c == '_' || extra)
            })
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        self.pos
    }

    /// Lexes a C-like language region.
    fn lex_code(&mut self, rules: &LexRules) {
        while self.pos < self.end {
            if self.lex_newline() || self.lex_whitespace() {
                continue;
            }
            let start = self.pos;
            let b = self.bytes[start];

            if let Some(marker) = rules.line_comment {
                if self.starts_with(marker.as_bytes()) {
                    self.pos = self.line_end();
                    self.push(TokenKind::Comment, start, self.pos);
                    continue;
                }
            }
            if let Some((open, close)) = rules.block_comment {
                if self.starts_with(open.as_bytes()) {
                    self.pos += open.len();
                    self.scan_multiline(TokenKind::Comment, start, close.as_bytes(), false);
                    continue;
                }
            }
            if self.lex_string(rules, start) {
                continue;
            }
            if b.is_ascii_digit() || (b == b'.' && self.peek(1).is_some_and(|n| n.is_ascii_digit()))
            {
                self.scan_number();
                continue;
            }
            if self.is_word_start(rules) {
                let end = self.scan_word(rules);
                let word = &self.src[start..end];
                if rules.string_prefixes && is_string_prefix(word) && self.lex_string(rules, start)
                {
                    continue;
                }
                let kind = if rules.keywords.contains(&word) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                self.push(kind, start, end);
                continue;
            }
            if rules.at_keywords
                && b == b'@'
                && self.peek(1).is_some_and(|n| n.is_ascii_alphabetic())
            {
                self.pos += 1;
                let end = self.scan_word(rules);
                self.push(TokenKind::Keyword, start, end);
                continue;
            }
            if rules.hash_colors
                && b == b'#'
                && self.peek(1).is_some_and(|n| n.is_ascii_alphanumeric())
            {
                self.pos += 1;
                let end = self.scan_word(rules);
                let body = &self.src[start + 1..end];
                let is_color = matches!(body.len(), 3 | 4 | 6 | 8)
                    && body.bytes().all(|c| c.is_ascii_hexdigit());
                let kind = if is_color {
                    TokenKind::Number
                } else {
                    TokenKind::Identifier
                };
                self.push(kind, start, end);
                continue;
            }
            if is_operator_byte(b) {
                while self.peek(0).is_some_and(is_operator_byte) {
                    self.pos += 1;
                }
                self.push(TokenKind::Operator, start, self.pos);
                continue;
            }
            self.pos += self.char_len();
            self.push(TokenKind::Punctuation, start, self.pos);
        }
    }

    /// Lexes a string literal at the cursor if one starts here. `start` may
    /// precede the cursor when a prefix (`f`, `rb`) was already consumed.
    fn lex_string(&mut self, rules: &LexRules, start: usize) -> bool {
        let Some(b) = self.peek(0) else {
            return false;
        };
        if rules.triple_quotes && (self.starts_with(b"\"\"\"") || self.starts_with(b"'''")) {
            let bytes = self.bytes;
            let closer = &bytes[self.pos..self.pos + 3];
            self.pos += 3;
            self.scan_multiline(TokenKind::String, start, closer, true);
            return true;
        }
        if rules.multiline_quotes.contains(&b) {
            self.pos += 1;
            self.scan_multiline(TokenKind::String, start, &[b], true);
            return true;
        }
        if !rules.quotes.contains(&b) {
            return false;
        }
        if b == b'\'' && rules.lifetimes && start == self.pos && self.is_lifetime() {
            self.pos += 1;
            let end = self.scan_word(rules);
            self.push(TokenKind::Identifier, start, end);
            return true;
        }
        self.scan_quoted(start, b);
        true
    }

    /// `'a` / `'static`, as opposed to the char literal `'a'`.
    fn is_lifetime(&self) -> bool {
        self.peek(1).is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
            && self.peek(2) != Some(b'\'')
    }

    /// Lexes unknown languages: one `Plain` token per line plus newlines.
    fn lex_plain(&mut self) {
        while self.pos < self.end {
            if self.lex_newline() {
                continue;
            }
            let start = self.pos;
            self.pos = self.line_end().max(start + 1);
            self.push(TokenKind::Plain, start, self.pos);
        }
    }

    // ── Markup ──────────────────────────────────────────────────

    /// Lexes HTML/XML. `<script>` and `<style>` bodies are handed to the
    /// JavaScript and CSS rules.
    fn lex_markup(&mut self) {
        while self.pos < self.end {
            if self.lex_newline() {
                continue;
            }
            let start = self.pos;
            if self.starts_with(b"<!--") {
                self.pos += 4;
                self.scan_multiline(TokenKind::Comment, start, b"-->", false);
                continue;
            }
            if self.bytes[start] == b'<'
                && self
                    .peek(1)
                    .is_some_and(|b| b.is_ascii_alphabetic() || b == b'/' || b == b'!')
            {
                match self.lex_tag().as_deref() {
                    Some("script") => self.lex_embedded(&JAVASCRIPT, b"</script"),
                    Some("style") => self.lex_embedded(&CSS, b"</style"),
                    _ => {}
                }
                continue;
            }
            if self.bytes[start] == b'&' && self.lex_entity() {
                continue;
            }
            self.pos += 1;
            while let Some(b) = self.peek(0) {
                if matches!(b, b'<' | b'&' | b'\n') || (b == b'\r' && self.peek(1) == Some(b'\n'))
                {
                    break;
                }
                self.pos += 1;
            }
            // Only ASCII bytes stop the run, so `pos` is on a char boundary
            // unless the run began inside a multi-byte char.
            while !self.src.is_char_boundary(self.pos) {
                self.pos += 1;
            }
            self.push(TokenKind::Plain, start, self.pos);
        }
    }

    /// Lexes `<name attr="v">` / `</name>`. Returns the lowercased tag name
    /// when this is a closed, non-self-closing opening tag.
    fn lex_tag(&mut self) -> Option<String> {
        let start = self.pos;
        self.pos += 1;
        self.push(TokenKind::Punctuation, start, self.pos);

        let closing = self.peek(0) == Some(b'/');
        if closing {
            self.push(TokenKind::Punctuation, self.pos, self.pos + 1);
            self.pos += 1;
        }

        let name_start = self.pos;
        while self
            .peek(0)
            .is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'!' | b'_'))
        {
            self.pos += 1;
        }
        let name = self.src[name_start..self.pos].to_ascii_lowercase();
        self.push(TokenKind::Keyword, name_start, self.pos);

        let mut self_closing = false;
        while self.pos < self.end {
            if self.lex_newline() || self.lex_whitespace() {
                continue;
            }
            let attr_start = self.pos;
            match self.bytes[attr_start] {
                b'>' => {
                    self.pos += 1;
                    self.push(TokenKind::Punctuation, attr_start, self.pos);
                    return (!closing && !self_closing).then_some(name);
                }
                b'/' => {
                    self_closing = self.peek(1) == Some(b'>');
                    self.pos += 1;
                    self.push(TokenKind::Punctuation, attr_start, self.pos);
                }
                b'=' => {
                    self.pos += 1;
                    self.push(TokenKind::Operator, attr_start, self.pos);
                }
                quote @ (b'"' | b'\'') => self.scan_quoted(attr_start, quote),
                b'<' => return None,
                _ => {
                    while let Some(b) = self.peek(0) {
                        if b.is_ascii_whitespace()
                            || matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'' | b'<')
                        {
                            break;
                        }
                        self.pos += 1;
                    }
                    while !self.src.is_char_boundary(self.pos) {
                        self.pos += 1;
                    }
                    self.push(TokenKind::Identifier, attr_start, self.pos);
                }
            }
        }
        None
    }

    /// `&amp;`, `&#169;`, `&#x1F680;`. At most 10 bytes of body.
    fn lex_entity(&mut self) -> bool {
        let start = self.pos;
        let mut i = 1;
        while i <= 10 {
            match self.peek(i) {
                Some(b';') if i > 1 => {
                    self.pos += i + 1;
                    self.push(TokenKind::Number, start, self.pos);
                    return true;
                }
                Some(b) if b.is_ascii_alphanumeric() || b == b'#' => i += 1,
                _ => return false,
            }
        }
        false
    }

    /// Lexes an embedded body with `rules` up to (not including) `closer`,
    /// matched case-insensitively.
    fn lex_embedded(&mut self, rules: &LexRules, closer: &[u8]) {
        let haystack = &self.bytes[self.pos..self.end];
        let stop = haystack
            .windows(closer.len())
            .position(|w| w.eq_ignore_ascii_case(closer))
            .map_or(self.end, |i| self.pos + i);
        let outer_end = self.end;
        self.end = stop;
        self.lex_code(rules);
        self.end = outer_end;
    }
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;
