pub mod ast;
pub mod cli;
pub mod cursor;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod query;
pub mod value;

pub use ast::{Document, Node, NodeId, Token, TokenKind};
pub use cursor::TokenStream;
pub use lexer::{Lexer, tokenize};
pub use output::dump;
pub use parser::{ParseError, Parser, parse};
pub use query::LookupError;
pub use value::Value;
