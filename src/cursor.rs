use tracing::trace;

use crate::ast::Token;

static EOF: Token = Token::eof();

/// Forward-only view over a token sequence with a short look-back.
///
/// The position is private: the parser moves it with [`TokenStream::advance`]
/// and nothing else can reposition it. Reading past the end yields an `Eof`
/// token instead of failing.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens,
            position: 0,
        }
    }

    /// Convenience constructor running the lexer first
    pub fn from_source(input: &str) -> Self {
        TokenStream::new(crate::lexer::tokenize(input))
    }

    /// Token at the current position, not consumed
    pub fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&EOF)
    }

    /// Move forward one token and return the one that was current.
    pub fn advance(&mut self) -> &Token {
        let consumed = self.position;
        if consumed < self.tokens.len() {
            self.position += 1;
        }
        trace!(position = self.position, "cursor advanced");
        self.tokens.get(consumed).unwrap_or(&EOF)
    }

    /// The token just before the current one
    pub fn previous(&self) -> Option<&Token> {
        self.lookback(1)
    }

    /// The token `steps` positions behind the current one
    pub fn lookback(&self, steps: usize) -> Option<&Token> {
        let index = self.position.checked_sub(steps)?;
        self.tokens.get(index)
    }

    pub fn has_more(&self) -> bool {
        self.position < self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
