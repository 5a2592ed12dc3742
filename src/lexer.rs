use std::sync::LazyLock;

use regex::Regex;
use tracing::{trace, warn};

use crate::ast::{Token, TokenKind};

/// Signed integer or decimal with underscores only between digits.
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]+(?:_[0-9]+)*(?:\.[0-9]+(?:_[0-9]+)*)?$")
        .expect("numeric literal pattern is valid")
});

/// Tokenize a complete buffer.
///
/// Never fails: malformed input is left for the parser to reject. The result
/// always ends with exactly one `Eof` token.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,

    // Scanning state
    bracket_depth: usize,
    in_string: bool,
    in_comment: bool,
    pending: String,
    pending_line: usize,

    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            bracket_depth: 0,
            in_string: false,
            in_comment: false,
            pending: String::new(),
            pending_line: 1,
            tokens: Vec::new(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.current_char() == Some('\n') {
            self.line += 1;
        }
        self.position += 1;
    }

    fn push_char(&mut self, ch: char) {
        if self.pending.is_empty() {
            self.pending_line = self.line;
        }
        self.pending.push(ch);
    }

    fn emit(&mut self, kind: TokenKind, lexeme: &str) {
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    /// Classify and emit the accumulated lexeme, if any
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let lexeme = std::mem::take(&mut self.pending);
        let kind = classify(&lexeme);
        self.tokens.push(Token::new(kind, lexeme, self.pending_line));
    }

    /// A `.` continues the pending lexeme only when it would make a float
    fn pending_is_numeric_prefix(&self) -> bool {
        let digits = self
            .pending
            .strip_prefix(['+', '-'])
            .unwrap_or(&self.pending);
        digits.starts_with(|c: char| c.is_ascii_digit())
            && digits.chars().all(|c| c.is_ascii_digit() || c == '_')
    }

    fn scan_char(&mut self, ch: char) {
        if self.in_comment {
            if ch == '\n' {
                self.in_comment = false;
            }
            return;
        }

        if self.in_string {
            self.push_char(ch);
            if ch == '"' {
                self.in_string = false;
                self.flush();
            }
            return;
        }

        match ch {
            '[' => {
                self.flush();
                self.emit(TokenKind::LBracket, "[");
                self.bracket_depth += 1;
            }
            ']' => {
                self.flush();
                self.emit(TokenKind::RBracket, "]");
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
            }
            '=' => {
                self.flush();
                self.emit(TokenKind::Equal, "=");
            }
            ',' => {
                self.flush();
                self.emit(TokenKind::Comma, ",");
            }
            '.' if self.pending_is_numeric_prefix() => self.push_char(ch),
            '.' => {
                self.flush();
                self.emit(TokenKind::Dot, ".");
            }
            '"' => {
                self.flush();
                self.push_char(ch);
                self.in_string = true;
            }
            '#' => {
                self.flush();
                self.in_comment = true;
            }
            c if c.is_whitespace() => self.flush(),
            c => self.push_char(c),
        }
    }

    /// Run the scanner over the whole input
    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(ch) = self.current_char() {
            self.scan_char(ch);
            self.advance();
        }

        if self.in_string {
            warn!(line = self.pending_line, "unterminated string literal");
        }
        if self.bracket_depth > 0 {
            warn!(depth = self.bracket_depth, "unbalanced '[' at end of input");
        }

        self.flush();
        self.emit(TokenKind::Eof, "");
        trace!(count = self.tokens.len(), "tokenized input");
        self.tokens
    }
}

/// Decide the token kind of a flushed lexeme.
///
/// Priority: punctuation, boolean, numeric, quoted string, identifier.
pub fn classify(lexeme: &str) -> TokenKind {
    match lexeme {
        "[" => return TokenKind::LBracket,
        "]" => return TokenKind::RBracket,
        "=" => return TokenKind::Equal,
        "." => return TokenKind::Dot,
        "," => return TokenKind::Comma,
        "true" | "false" => return TokenKind::Bool,
        _ => {}
    }

    if is_numeric(lexeme) {
        if lexeme.contains('.') {
            TokenKind::Float
        } else {
            TokenKind::Number
        }
    } else if is_quoted(lexeme) {
        TokenKind::String
    } else {
        TokenKind::Identifier
    }
}

fn is_numeric(lexeme: &str) -> bool {
    NUMERIC.is_match(lexeme)
}

fn is_quoted(lexeme: &str) -> bool {
    lexeme.len() >= 2 && lexeme.starts_with('"') && lexeme.ends_with('"')
}

#[test]
fn test_classify_priority() {
    assert_eq!(classify("="), TokenKind::Equal);
    assert_eq!(classify("true"), TokenKind::Bool);
    assert_eq!(classify("-12"), TokenKind::Number);
    assert_eq!(classify("+1_000.5"), TokenKind::Float);
    assert_eq!(classify("\"x\""), TokenKind::String);
    assert_eq!(classify("name"), TokenKind::Identifier);
}

#[test]
fn test_misplaced_underscores_are_identifiers() {
    for lexeme in ["_1", "1_", "1__0", "+_1", "1._5"] {
        assert_eq!(classify(lexeme), TokenKind::Identifier, "lexeme: {}", lexeme);
    }
}

#[test]
fn test_numeric_pattern_compiles_and_matches() {
    for lexeme in ["0", "+7", "-1_000", "3.14", "1_0.0_1"] {
        assert!(is_numeric(lexeme), "lexeme: {}", lexeme);
    }
    for lexeme in ["", "+", "1.", ".5", "1e3", "0x10"] {
        assert!(!is_numeric(lexeme), "lexeme: {}", lexeme);
    }
}

#[test]
fn test_lone_quote_is_not_a_string() {
    assert_eq!(classify("\""), TokenKind::Identifier);
}

#[test]
fn test_line_numbers() {
    let tokens = tokenize("a = 1\n\nb = 2");
    let b = tokens.iter().find(|t| t.lexeme == "b").map(|t| t.line);
    assert_eq!(b, Some(3));
}
