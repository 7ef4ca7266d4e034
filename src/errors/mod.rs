//! Error types and error reporting for the parser.
//!
//! This module defines the single error family produced while turning
//! source text into an AST. It includes:
//!
//! - Error structures with source position information
//! - One variant per fixed diagnostic message
//! - The `parsing error: ... (while parsing '...')` rendering
//! - Optional suggestions shown by the command line tool

pub mod errors;
