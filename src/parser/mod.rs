//! Parser module for building the expression tree.
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into a [`crate::ast::ast::Node`]. It encodes operator
//! precedence as a ladder of mutually recursive functions, one per level,
//! and handles:
//!
//! - Left-associative `or`, `and`, `+` and `*`
//! - Non-associative `>` and right-associative `^`
//! - The `if ... then ... else ...` conditional
//! - Fixed, single-line diagnostics for the first error found
//! - A configurable bound on nesting depth
//!
//! There is no error recovery: the first error aborts the parse.

pub mod expr;
pub mod parser;
