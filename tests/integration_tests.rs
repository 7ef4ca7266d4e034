//! Integration tests for the end-to-end pipeline.
//!
//! These tests drive source text through tokenization and parsing via the
//! public API, and check the rendered trees and diagnostics.

use exprp::{
    ast::ast::{Node, NodeType},
    display_error,
    lexer::{
        lexer::tokenize,
        scanner::{Scanner, TokenStream},
        tokens::{Token, TokenKind},
    },
    parser::parser::{parse, parse_and_report},
    Position, Span,
};
use std::rc::Rc;

fn parse_str(source: &str) -> Result<Node, exprp::errors::errors::Error> {
    let tokens = tokenize(source.to_string(), Some("test.expr".to_string())).unwrap();
    parse(&mut TokenStream::new(tokens))
}

#[test]
fn test_parse_full_grammar() {
    let source = "if (1 + 2) * 3 ^ 2 > 10 and 1 or 0 then 2 ^ 3 ^ 2 else (if 0 then 1 else 2) + 4";
    let tree = parse_str(source).unwrap();

    assert_eq!(tree.get_node_type(), NodeType::If);
    assert_eq!(
        tree.to_string(),
        "(if (or (and (> (* (+ 1 2) (^ 3 2)) 10) 1) 0) (^ 2 (^ 3 2)) (+ (if 0 1 2) 4))"
    );
}

#[test]
fn test_parse_multiline_source() {
    let source = "if 1 > 0\nthen 2\nelse 3\n";
    let tree = parse_str(source).unwrap();

    assert_eq!(tree.to_string(), "(if (> 1 0) 2 3)");
}

#[test]
fn test_parse_and_render_long_chain() {
    let source = vec!["1"; 200_000].join("+");
    let tree = parse_str(&source).unwrap();

    assert_eq!(tree.node_count(), 399_999);

    let rendered = tree.to_string();
    assert!(rendered.starts_with("(+ (+ (+ "));
    assert!(rendered.ends_with(" 1) 1)"));
    assert_eq!(rendered.matches('+').count(), 199_999);
}

#[test]
fn test_report_then_display() {
    let source = "(1 + 2";
    let error = parse_str(source).unwrap_err();

    let mut out = Vec::new();
    display_error(&error, source, &mut out).unwrap();
    let rendered = String::from_utf8(out).unwrap();

    let mut lines = rendered.lines();
    assert_eq!(
        lines.next(),
        Some("parsing error: expected ')' (while parsing 'EOF')")
    );
    assert_eq!(lines.next(), Some("-> test.expr"));
    assert_eq!(rendered.lines().last(), Some("  | ------^"));
}

#[test]
fn test_display_error_with_tip() {
    let source = "1 > 2 > 3";
    let error = parse_str(source).unwrap_err();

    let mut out = Vec::new();
    display_error(&error, source, &mut out).unwrap();
    let rendered = String::from_utf8(out).unwrap();

    assert!(rendered.starts_with(
        "parsing error: unexpected token after the expression (while parsing '>')\nnote: "
    ));
    assert!(rendered.ends_with("  | ------^\n"));
}

#[test]
fn test_lexer_error_is_reported_like_a_parse_error() {
    let error = tokenize("1 + $".to_string(), None).unwrap_err();

    assert_eq!(
        error.to_string(),
        "parsing error: unrecognised token (while parsing '$')"
    );
}

/// A scanner that hands out tokens built by hand, with a custom end marker.
struct VecScanner {
    tokens: Vec<Token>,
    pos: usize,
}

impl VecScanner {
    fn new(kinds: &[(TokenKind, &str)]) -> Self {
        let file = Rc::new("hand".to_string());
        let tokens = kinds
            .iter()
            .enumerate()
            .map(|(i, (kind, value))| Token {
                kind: *kind,
                value: value.to_string(),
                span: Span {
                    start: Position(i as u32, Rc::clone(&file)),
                    end: Position(i as u32 + 1, Rc::clone(&file)),
                },
            })
            .collect();

        VecScanner { tokens, pos: 0 }
    }
}

impl Scanner for VecScanner {
    fn peek(&mut self) -> &Token {
        &self.tokens[self.pos]
    }

    fn next(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }
}

#[test]
fn test_parse_custom_scanner() {
    let mut scanner = VecScanner::new(&[
        (TokenKind::Number, "1"),
        (TokenKind::Plus, "+"),
        (TokenKind::Number, "2"),
        (TokenKind::EOF, "<end>"),
    ]);

    assert_eq!(parse(&mut scanner).unwrap().to_string(), "(+ 1 2)");
}

#[test]
fn test_custom_scanner_end_is_quoted_as_eof() {
    let mut scanner = VecScanner::new(&[
        (TokenKind::OpenParen, "("),
        (TokenKind::Number, "1"),
        (TokenKind::EOF, "<end>"),
    ]);
    let mut sink = Vec::new();

    let result = parse_and_report(&mut scanner, &mut sink).unwrap();

    assert!(result.is_none());
    assert_eq!(
        String::from_utf8(sink).unwrap(),
        "parsing error: expected ')' (while parsing 'EOF')\n"
    );
}

#[test]
fn test_every_failure_reports_exactly_one_line() {
    let failing = [
        "1 2",
        "1 > 2 > 3",
        "if 1 else 2",
        "if 1 then 2",
        "if 1 then 2 else",
        "(1 + 2",
        "(((1 + 2) * 3)",
        "1 + if 1 then 2 else 3",
        "+",
        "",
    ];

    for source in failing {
        let mut scanner = TokenStream::from_source(source, None).unwrap();
        let mut sink = Vec::new();

        let result = parse_and_report(&mut scanner, &mut sink).unwrap();
        let output = String::from_utf8(sink).unwrap();

        assert!(result.is_none(), "{source:?} should not parse");
        assert_eq!(output.lines().count(), 1, "{source:?} produced {output:?}");
        assert!(output.starts_with("parsing error: "));
    }
}
