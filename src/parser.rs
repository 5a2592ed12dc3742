use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Document, Node, NodeId, Token, TokenKind},
    cursor::TokenStream,
};

/// Deepest array nesting the parser accepts.
pub const MAX_DEPTH: usize = 128;

/// Errors that abort a parse.
///
/// Syntax errors and numeric conversion errors are both fatal: no partial
/// document is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar required a specific token
    #[error("Expected {expected} but got {found} at line {line}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        line: usize,
    },

    /// A top-level item started with something other than a key or a header
    #[error("Unexpected token: {found} at line {line}")]
    UnexpectedStatement {
        found: TokenKind,
        lexeme: String,
        line: usize,
    },

    /// The right-hand side of `key =` is not a value
    #[error("Unexpected token for value of \"{key}\": {found} at line {line}")]
    UnexpectedValue {
        key: String,
        found: TokenKind,
        line: usize,
    },

    #[error("Unexpected token in array: {found} at line {line}")]
    UnexpectedInArray { found: TokenKind, line: usize },

    /// Integer literal outside the `i64` range
    #[error("Integer out of range: {lexeme} at line {line}")]
    IntegerOutOfRange { lexeme: String, line: usize },

    /// Decimal literal that cannot be represented exactly
    #[error("Invalid float: {lexeme} at line {line}")]
    InvalidFloat { lexeme: String, line: usize },

    /// Arrays nested deeper than [`MAX_DEPTH`]
    #[error("Arrays nested deeper than {} levels at line {line}", MAX_DEPTH)]
    NestingTooDeep { line: usize },
}

impl ParseError {
    /// `true` for numeric conversion failures, `false` for syntax errors
    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            ParseError::IntegerOutOfRange { .. } | ParseError::InvalidFloat { .. }
        )
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedStatement { line, .. }
            | ParseError::UnexpectedValue { line, .. }
            | ParseError::UnexpectedInArray { line, .. }
            | ParseError::IntegerOutOfRange { line, .. }
            | ParseError::InvalidFloat { line, .. }
            | ParseError::NestingTooDeep { line } => *line,
        }
    }
}

/// Tokenize and parse `input` in one call.
///
/// `source` labels the document in lookup errors, usually the file path.
pub fn parse(input: &str, source: &str) -> Result<Document, ParseError> {
    Parser::new(TokenStream::from_source(input), source).parse()
}

/// Recursive descent parser.
///
/// Single use: [`Parser::parse`] consumes the parser and its token stream.
pub struct Parser {
    stream: TokenStream,
    document: Document,
    depth: usize,
}

impl Parser {
    pub fn new(stream: TokenStream, source: impl Into<String>) -> Self {
        Parser {
            stream,
            document: Document::new(source),
            depth: 0,
        }
    }

    fn consume(&mut self) -> Token {
        self.stream.advance().clone()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.stream.current().is(kind)
    }

    fn expect(&self, expected: TokenKind) -> Result<(), ParseError> {
        let current = self.stream.current();
        if current.kind != expected {
            return Err(ParseError::UnexpectedToken {
                expected,
                found: current.kind,
                lexeme: current.lexeme.clone(),
                line: current.line,
            });
        }
        Ok(())
    }

    fn expect_consume(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        self.expect(expected)?;
        Ok(self.consume())
    }

    /// Parse the whole token stream into a document
    pub fn parse(mut self) -> Result<Document, ParseError> {
        loop {
            let current = self.stream.current();
            match current.kind {
                TokenKind::Eof => break,
                TokenKind::Identifier => {
                    let id = self.parse_key_value(false)?;
                    self.document.push_top_level(id);
                }
                TokenKind::LBracket => self.parse_table()?,
                found => {
                    return Err(ParseError::UnexpectedStatement {
                        found,
                        lexeme: current.lexeme.clone(),
                        line: current.line,
                    });
                }
            }
        }
        self.expect(TokenKind::Eof)?;

        debug!(
            source = self.document.source(),
            items = self.document.top_level().len(),
            nodes = self.document.node_count(),
            "parsed document"
        );
        Ok(self.document)
    }

    /// `IDENTIFIER '=' value`
    ///
    /// At the top level an array value becomes a named array node on its own;
    /// inside a table it is wrapped in a key-value like every other entry.
    fn parse_key_value(&mut self, in_table: bool) -> Result<NodeId, ParseError> {
        let key = self.expect_consume(TokenKind::Identifier)?.lexeme;
        self.expect_consume(TokenKind::Equal)?;

        if self.check(TokenKind::LBracket) {
            // key '=' '[': the key is two tokens back
            let name = self.stream.lookback(2).map(|t| t.lexeme.clone());
            let array = self.parse_array(name)?;
            if !in_table {
                return Ok(array);
            }
            return Ok(self.document.alloc(Node::KeyValue { key, value: array }));
        }

        let value = match self.parse_scalar()? {
            Some(node) => self.document.alloc(node),
            None => {
                let current = self.stream.current();
                return Err(ParseError::UnexpectedValue {
                    key,
                    found: current.kind,
                    line: current.line,
                });
            }
        };
        Ok(self.document.alloc(Node::KeyValue { key, value }))
    }

    /// Coerce the current token into a scalar node, consuming it.
    ///
    /// Returns `Ok(None)` without consuming when the token is not a scalar.
    fn parse_scalar(&mut self) -> Result<Option<Node>, ParseError> {
        let node = match self.stream.current().kind {
            TokenKind::String => {
                let token = self.consume();
                Node::String(strip_quotes(&token.lexeme).to_string())
            }
            TokenKind::Number => {
                let token = self.consume();
                Node::Integer(parse_integer(&token)?)
            }
            TokenKind::Float => {
                let token = self.consume();
                Node::Float(parse_float(&token)?)
            }
            TokenKind::Bool => {
                let token = self.consume();
                Node::Bool(token.lexeme == "true")
            }
            _ => return Ok(None),
        };
        Ok(Some(node))
    }

    /// `'[' (value (',' value)*)? ']'`, commas optional and repeatable
    fn parse_array(&mut self, name: Option<String>) -> Result<NodeId, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::NestingTooDeep {
                line: self.stream.current().line,
            });
        }
        self.expect_consume(TokenKind::LBracket)?;
        self.depth += 1;

        let mut elements = Vec::new();
        loop {
            let current = self.stream.current();
            match current.kind {
                TokenKind::RBracket => break,
                TokenKind::Comma => {
                    self.consume();
                }
                TokenKind::LBracket => elements.push(self.parse_array(None)?),
                kind => {
                    let line = current.line;
                    match self.parse_scalar()? {
                        Some(node) => elements.push(self.document.alloc(node)),
                        None => return Err(ParseError::UnexpectedInArray { found: kind, line }),
                    }
                }
            }
        }

        self.expect_consume(TokenKind::RBracket)?;
        self.depth -= 1;
        Ok(self.document.alloc(Node::Array { name, elements }))
    }

    /// `'[' IDENTIFIER ']' key_value*` or `'[' '[' IDENTIFIER ']' ']' key_value*`
    fn parse_table(&mut self) -> Result<(), ParseError> {
        self.expect_consume(TokenKind::LBracket)?;
        let explicit_array = self.check(TokenKind::LBracket);
        if explicit_array {
            self.consume();
        }

        let name = self.expect_consume(TokenKind::Identifier)?.lexeme;
        self.expect_consume(TokenKind::RBracket)?;
        if explicit_array {
            self.expect_consume(TokenKind::RBracket)?;
        }

        let mut entries = Vec::new();
        while self.check(TokenKind::Identifier) {
            entries.push(self.parse_key_value(true)?);
        }

        let table = self.document.alloc(Node::Table {
            name: name.clone(),
            entries,
        });
        self.attach_table(name, table, explicit_array);
        Ok(())
    }

    /// Place a freshly parsed table at the top level.
    ///
    /// A header repeating the name of the table (or array of tables) right
    /// before it collapses both into one named array of tables.
    fn attach_table(&mut self, name: String, table: NodeId, explicit_array: bool) {
        let previous = self.document.top_level().last().copied();

        if let Some(prev) = previous {
            match self.document.node(prev) {
                Node::Array {
                    name: Some(prev_name),
                    elements,
                } if *prev_name == name && self.document.is_array_of_tables(elements) => {
                    debug!(table = %name, "appending to array of tables");
                    if let Node::Array { elements, .. } = self.document.node_mut(prev) {
                        elements.push(table);
                    }
                    return;
                }
                Node::Table {
                    name: prev_name, ..
                } if *prev_name == name && !explicit_array => {
                    debug!(table = %name, "repeated header, collapsing into array of tables");
                    let array = self.document.alloc(Node::Array {
                        name: Some(name),
                        elements: vec![prev, table],
                    });
                    self.document.replace_last_top_level(array);
                    return;
                }
                _ => {}
            }
        }

        if explicit_array {
            debug!(table = %name, "starting array of tables");
            let array = self.document.alloc(Node::Array {
                name: Some(name),
                elements: vec![table],
            });
            self.document.push_top_level(array);
        } else {
            debug!(table = %name, "parsed table");
            self.document.push_top_level(table);
        }
    }
}

/// Remove exactly one delimiting quote from each end
fn strip_quotes(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
}

fn parse_integer(token: &Token) -> Result<i64, ParseError> {
    token
        .lexeme
        .replace('_', "")
        .parse::<i64>()
        .map_err(|_| ParseError::IntegerOutOfRange {
            lexeme: token.lexeme.clone(),
            line: token.line,
        })
}

fn parse_float(token: &Token) -> Result<Decimal, ParseError> {
    let cleaned = token.lexeme.replace('_', "");
    let unsigned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    // Literals that would need rounding are rejected
    Decimal::from_str_exact(unsigned).map_err(|_| ParseError::InvalidFloat {
            lexeme: token.lexeme.clone(),
            line: token.line,
        })
}
