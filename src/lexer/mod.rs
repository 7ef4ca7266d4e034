//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source text using anchored regex patterns
//! - Recognition of the `if`/`then`/`else`/`or`/`and` keywords, numbers and operators
//! - Token position tracking for error reporting
//! - The [`scanner::Scanner`] cursor the parser reads tokens through

pub mod lexer;
pub mod scanner;
pub mod tokens;
