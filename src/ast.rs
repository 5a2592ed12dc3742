//! # gtoml - Abstract Syntax Tree
//!
//! This module defines the token and node types shared by the lexer, the
//! parser and the query engine.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Classified lexemes produced by the lexer
//! - **[nodes]** - The closed set of node kinds (scalars, arrays, tables, key-values)
//! - **[document]** - The arena that owns every node of a parsed file
//!
//! ## Quick Start
//!
//! ```text
//! title = "example"
//! ports = [8000, 8001]
//!
//! [package]
//! name = "gtoml"
//! version = "1.0"
//! ```
//!
//! parses into a top level of three nodes:
//!
//! - `KeyValue { key: "title", value: String("example") }`
//! - `Array { name: Some("ports"), elements: [Integer(8000), Integer(8001)] }`
//! - `Table { name: "package", entries: [KeyValue, KeyValue] }`
//!
//! ## Array of Tables
//!
//! Repeating a header directly after a table of the same name, or using the
//! `[[name]]` form, collapses the tables into one named array:
//!
//! ```text
//! [[bin]]
//! name = "a"
//!
//! [[bin]]
//! name = "b"
//! ```
//!
//! becomes `Array { name: Some("bin"), elements: [Table, Table] }`.
//!
//! ## Ownership
//!
//! Children are referenced by [`NodeId`] into the [`Document`] arena, never by
//! shared pointers. Once the parser hands the document out it is read-only.
pub mod document;
pub mod nodes;
pub mod tokens;

pub use document::Document;
pub use nodes::{Node, NodeId};
pub use tokens::{Token, TokenKind};
