use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A parse (or lex) failure together with the position of the token that
/// triggered it.
///
/// `Display` renders the fixed one-line diagnostic:
/// `parsing error: <message> (while parsing '<token>')`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedTrailingToken { .. } => "UnexpectedTrailingToken",
            ErrorImpl::ExpectedThen { .. } => "ExpectedThen",
            ErrorImpl::ExpectedElse { .. } => "ExpectedElse",
            ErrorImpl::ExpectedCloseParen { .. } => "ExpectedCloseParen",
            ErrorImpl::ExpectedTerm { .. } => "ExpectedTerm",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    /// The text of the token the parser was looking at when it failed.
    pub fn get_token(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { token }
            | ErrorImpl::UnexpectedTrailingToken { token }
            | ErrorImpl::ExpectedThen { token }
            | ErrorImpl::ExpectedElse { token }
            | ErrorImpl::ExpectedCloseParen { token }
            | ErrorImpl::ExpectedTerm { token }
            | ErrorImpl::NestingTooDeep { token, .. } => token,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedTrailingToken { token } if token == ">" => {
                ErrorTip::Suggestion(String::from(
                    "comparisons cannot be chained, wrap the first one in parentheses",
                ))
            }
            ErrorImpl::ExpectedTerm { token } if token == "if" => ErrorTip::Suggestion(
                String::from("`if` may only start an expression, wrap it in parentheses"),
            ),
            ErrorImpl::NestingTooDeep { limit, .. } => ErrorTip::Suggestion(format!(
                "the nesting limit is {}, flatten the expression or raise the limit",
                limit
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parsing error: {} (while parsing '{}')",
            self.internal_error,
            self.get_token()
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// The message half of a diagnostic. `token` is the source text of the last
/// token examined, or `EOF` at end of input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognised token")]
    UnrecognisedToken { token: String },
    #[error("unexpected token after the expression")]
    UnexpectedTrailingToken { token: String },
    #[error("expected 'then'")]
    ExpectedThen { token: String },
    #[error("expected 'else'")]
    ExpectedElse { token: String },
    #[error("expected ')'")]
    ExpectedCloseParen { token: String },
    #[error("expected '(' or a number")]
    ExpectedTerm { token: String },
    #[error("expression nested too deeply")]
    NestingTooDeep { token: String, limit: usize },
}
