// tests/lexer_tests.rs

use gtoml::ast::{Token, TokenKind};
use gtoml::lexer::tokenize;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

fn lexemes(input: &str) -> Vec<String> {
    tokenize(input).into_iter().map(|t| t.lexeme).collect()
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("[", TokenKind::LBracket),
        ("]", TokenKind::RBracket),
        ("=", TokenKind::Equal),
        (".", TokenKind::Dot),
        (",", TokenKind::Comma),
    ];

    for (input, expected) in test_cases {
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 2, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, expected, "Failed for input: {}", input);
        assert_eq!(tokens[0].lexeme, input);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    assert_eq!(kinds("   \n\t\r\n"), vec![TokenKind::Eof]);
}

#[test]
fn test_punctuation_splits_without_whitespace() {
    assert_eq!(
        kinds("x=1"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Eof
        ]
    );
    assert_eq!(lexemes("x=1"), vec!["x", "=", "1", ""]);
}

// ============================================================================
// Key-value lines
// ============================================================================

#[test]
fn test_string_assignment() {
    let tokens = tokenize("name = \"gtoml\"");
    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Identifier, "name", 1),
            Token::new(TokenKind::Equal, "=", 1),
            Token::new(TokenKind::String, "\"gtoml\"", 1),
            Token::new(TokenKind::Eof, "", 1),
        ]
    );
}

#[test]
fn test_string_keeps_whitespace_and_punctuation() {
    let tokens = tokenize("s = \"a b, [c] = d # e\"");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].lexeme, "\"a b, [c] = d # e\"");
    assert_eq!(tokens[3].kind, TokenKind::Eof);
}

#[test]
fn test_empty_string() {
    let tokens = tokenize("s = \"\"");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].lexeme, "\"\"");
}

#[test]
fn test_booleans() {
    assert_eq!(
        kinds("a = true\nb = false"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Bool,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Bool,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_bool_prefix_is_identifier() {
    assert_eq!(kinds("trueish")[0], TokenKind::Identifier);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numeric_classification() {
    let test_cases = vec![
        ("42", TokenKind::Number),
        ("-17", TokenKind::Number),
        ("+5", TokenKind::Number),
        ("1_000_000", TokenKind::Number),
        ("3.14", TokenKind::Float),
        ("-0.5", TokenKind::Float),
        ("+1.0", TokenKind::Float),
        ("1_000.25", TokenKind::Float),
    ];

    for (input, expected) in test_cases {
        let tokens = tokenize(input);
        assert_eq!(tokens[0].kind, expected, "Failed for input: {}", input);
        assert_eq!(tokens[0].lexeme, input, "Failed for input: {}", input);
        assert_eq!(tokens[1].kind, TokenKind::Eof, "Failed for input: {}", input);
    }
}

#[test]
fn test_bad_underscores_fall_back_to_identifier() {
    for input in ["_1", "1_", "1__0", "-_1"] {
        let tokens = tokenize(input);
        assert_eq!(tokens[0].kind, TokenKind::Identifier, "Failed for input: {}", input);
        assert_eq!(tokens[0].lexeme, input);
    }
}

#[test]
fn test_dot_after_non_number_is_punctuation() {
    assert_eq!(
        kinds("package.name"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_second_dot_splits_float() {
    assert_eq!(lexemes("1.2.3"), vec!["1.2", ".", "3", ""]);
    assert_eq!(
        kinds("1.2.3"),
        vec![
            TokenKind::Float,
            TokenKind::Dot,
            TokenKind::Number,
            TokenKind::Eof
        ]
    );
}

// ============================================================================
// Brackets
// ============================================================================

#[test]
fn test_table_header() {
    assert_eq!(
        kinds("[package]"),
        vec![
            TokenKind::LBracket,
            TokenKind::Identifier,
            TokenKind::RBracket,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_array_of_tables_header() {
    assert_eq!(lexemes("[[bin]]"), vec!["[", "[", "bin", "]", "]", ""]);
}

#[test]
fn test_array_literal() {
    assert_eq!(
        kinds("arr = [1,2, \"x\"]"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::LBracket,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::String,
            TokenKind::RBracket,
            TokenKind::Eof
        ]
    );
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_comments_are_discarded() {
    let input = "# heading comment\nkey = 1 # trailing [not] \"a string\"\n# another\nnext = 2";
    assert_eq!(lexemes(input), vec!["key", "=", "1", "next", "=", "2", ""]);
}

#[test]
fn test_comment_flushes_pending_lexeme() {
    assert_eq!(lexemes("n = 10#comment"), vec!["n", "=", "10", ""]);
}

#[test]
fn test_comment_at_end_without_newline() {
    assert_eq!(kinds("a = 1 # done"), kinds("a = 1"));
}

#[test]
fn test_hash_inside_string_is_text() {
    let tokens = tokenize("color = \"#ff0000\"");
    assert_eq!(tokens[2].lexeme, "\"#ff0000\"");
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_unterminated_string_becomes_identifier() {
    let tokens = tokenize("s = \"abc");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].lexeme, "\"abc");
    assert_eq!(tokens[3].kind, TokenKind::Eof);
}

#[test]
fn test_always_single_trailing_eof() {
    for input in ["", "a", "[", "]]]", "\"", "# only a comment"] {
        let tokens = tokenize(input);
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "Failed for input: {:?}", input);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}

#[test]
fn test_token_lines() {
    let tokens = tokenize("a = 1\n[t]\nb = \"x\"");
    let lines: Vec<(String, usize)> = tokens
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| (t.lexeme, t.line))
        .collect();
    assert_eq!(
        lines,
        vec![
            ("a".to_string(), 1),
            ("=".to_string(), 1),
            ("1".to_string(), 1),
            ("[".to_string(), 2),
            ("t".to_string(), 2),
            ("]".to_string(), 2),
            ("b".to_string(), 3),
            ("=".to_string(), 3),
            ("\"x\"".to_string(), 3),
        ]
    );
}
