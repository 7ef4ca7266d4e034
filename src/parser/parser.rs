//! Parser state and the public parse entry points.
//!
//! The [`Parser`] owns nothing but an exclusive borrow of a [`Scanner`] and
//! the current nesting depth; the grammar itself lives in
//! [`super::expr`], one function per precedence level.

use std::io::Write;

use log::debug;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        scanner::Scanner,
        tokens::{Token, TokenKind},
    },
};

use super::expr::parse_expression;

/// Default bound on nested parentheses, conditionals and exponents.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunables for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How many `Expression` entries and `^` right recursions may be active
    /// at once before the parse fails with
    /// [`ErrorImpl::NestingTooDeep`].
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The parser state threaded through every sub-parser.
pub struct Parser<'a, S: Scanner> {
    /// The token source; exclusively borrowed for the whole parse
    scanner: &'a mut S,
    /// Limits for this parse
    config: ParserConfig,
    /// Number of nesting levels currently open
    depth: usize,
}

impl<'a, S: Scanner> Parser<'a, S> {
    pub fn new(scanner: &'a mut S, config: ParserConfig) -> Self {
        Parser {
            scanner,
            config,
            depth: 0,
        }
    }

    /// Returns the next token without consuming it.
    pub fn current_token(&mut self) -> &Token {
        self.scanner.peek()
    }

    /// Returns the kind of the next token.
    pub fn current_token_kind(&mut self) -> TokenKind {
        self.scanner.peek().kind
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Token {
        self.scanner.next()
    }

    /// Consumes the next token and checks that it is of `expected_kind`.
    ///
    /// On a mismatch the consumed token is reported through `error`.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: fn(String) -> ErrorImpl,
    ) -> Result<Token, Error> {
        let token = self.advance();
        if token.kind != expected_kind {
            Err(error_at(&token, error))
        } else {
            Ok(token)
        }
    }

    /// Opens one nesting level, failing once the configured limit is reached.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= self.config.max_depth {
            let limit = self.config.max_depth;
            let token = self.current_token();
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    token: diagnostic_text(token),
                    limit,
                },
                token.span.start.clone(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn get_depth(&self) -> usize {
        self.depth
    }
}

/// The text a diagnostic quotes for `token`.
fn diagnostic_text(token: &Token) -> String {
    if token.is_eof() {
        String::from("EOF")
    } else {
        token.value.clone()
    }
}

/// Builds the error for a mismatch detected while looking at `token`.
pub fn error_at(token: &Token, error: fn(String) -> ErrorImpl) -> Error {
    Error::new(error(diagnostic_text(token)), token.span.start.clone())
}

/// Parses the whole token stream as a single expression.
///
/// Succeeds only if the expression is followed by the end of input; a
/// trailing token fails the parse and the tree built so far is dropped.
pub fn parse<S: Scanner>(scanner: &mut S) -> Result<Node, Error> {
    parse_with_config(scanner, ParserConfig::default())
}

/// [`parse`] with explicit limits.
pub fn parse_with_config<S: Scanner>(scanner: &mut S, config: ParserConfig) -> Result<Node, Error> {
    let mut parser = Parser::new(scanner, config);

    let expr = parse_expression(&mut parser);
    let expr = match expr {
        Ok(expr) => expr,
        Err(error) => {
            debug!("{}", error);
            return Err(error);
        }
    };

    let next = parser.current_token();
    if !next.is_eof() {
        let error = error_at(next, |token| ErrorImpl::UnexpectedTrailingToken { token });
        debug!("{}", error);
        return Err(error);
    }

    debug!("parsed {} node(s)", expr.node_count());
    Ok(expr)
}

/// Runs [`parse`] and writes the diagnostic line to `sink` if it fails.
///
/// At most one line is ever written per call.
pub fn parse_and_report<S: Scanner, W: Write>(
    scanner: &mut S,
    sink: &mut W,
) -> std::io::Result<Option<Node>> {
    match parse(scanner) {
        Ok(node) => Ok(Some(node)),
        Err(error) => {
            writeln!(sink, "{}", error)?;
            Ok(None)
        }
    }
}
