use std::fmt;

/// Token discriminant produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Delimiters
    /// Opens a table header or an array
    ///
    /// # Examples
    /// ```text
    /// [package]
    /// ports = [80, 443]
    /// ```
    LBracket,

    /// Closes a table header or an array
    RBracket,

    /// Binds a key to a value
    ///
    /// # Examples
    /// ```text
    /// name = "gtoml"
    /// ```
    Equal,

    /// Separates a table name from a key in dotted paths
    Dot,

    /// Separates array elements (optional, repeats are skipped)
    Comma,

    // Names
    /// Bare key or table name
    ///
    /// Any lexeme that is not punctuation, a boolean, a number or a quoted string.
    ///
    /// # Examples
    /// ```text
    /// name
    /// use_small_heuristics
    /// 1__0
    /// ```
    Identifier,

    // Literals
    /// Integer literal, underscores allowed strictly between digits
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -17
    /// 1_000_000
    /// ```
    Number,

    /// Decimal literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// 1_000.25
    /// ```
    Float,

    /// Double quoted string, lexeme keeps its quotes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "item #1"
    /// ```
    String,

    /// Boolean literal
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Bool,

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Equal => "=",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Bool => "BOOL",
            TokenKind::Eof => "EOF",
        };
        f.write_str(text)
    }
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw text as it appeared in the input (string lexemes keep their quotes)
    pub lexeme: String,
    /// 1-based line the lexeme started on, 0 for synthesized tokens
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub const fn eof() -> Self {
        Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line: 0,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::Bool => write!(f, "{} `{}`", self.kind, self.lexeme),
            _ => write!(f, "{}", self.kind),
        }
    }
}
