use std::rc::Rc;

use log::trace;

use crate::{errors::errors::Error, Position, Span};

use super::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};

/// A cursor over a token stream with one token of lookahead.
pub trait Scanner {
    /// Returns the next token without consuming it. Repeated calls without an
    /// intervening [`Scanner::next`] return the same token.
    fn peek(&mut self) -> &Token;

    /// Consumes and returns the next token. Once the stream is exhausted this
    /// keeps returning the `EOF` token.
    fn next(&mut self) -> Token;
}

/// A [`Scanner`] over an already tokenized input.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Wraps `tokens`, appending an `EOF` token if the vector does not
    /// already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::new(String::from("shell"))));

            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        TokenStream { tokens, pos: 0 }
    }

    /// Tokenizes `source` and wraps the result.
    pub fn from_source(source: &str, file: Option<String>) -> Result<Self, Error> {
        Ok(TokenStream::new(tokenize(source.to_string(), file)?))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Index of the next unconsumed token.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Scanner for TokenStream {
    fn peek(&mut self) -> &Token {
        &self.tokens[self.pos]
    }

    fn next(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !token.is_eof() {
            self.pos += 1;
        }

        trace!("consumed {}", token.debug());
        token
    }
}
