//! The precedence ladder, lowest to highest binding power:
//!
//! ```text
//! Expression ::= 'if' Or 'then' Or 'else' Or | Or
//! Or         ::= And { 'or' And }
//! And        ::= Cmp { 'and' Cmp }
//! Cmp        ::= Sum [ '>' Sum ]
//! Sum        ::= Product { '+' Product }
//! Product    ::= Expt { '*' Expt }
//! Expt       ::= Term [ '^' Expt ]
//! Term       ::= '(' Expression ')' | NUMBER
//! ```
//!
//! Each rule parses its operands with the next rule up and leaves any token it
//! does not recognise unconsumed for its caller. Subtrees built before a
//! failure are dropped on the `?` return.

use log::trace;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::{scanner::Scanner, tokens::TokenKind},
};

use super::parser::{error_at, Parser};

/// Binary node constructor, as passed to [`parse_left_assoc`].
type Fold = fn(Node, Node) -> Node;

// EXPRESSION ::= IF | OR
pub fn parse_expression<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    parser.enter_nesting()?;

    let result = if parser.current_token_kind() == TokenKind::If {
        parse_if(parser)
    } else {
        parse_or(parser)
    };

    parser.exit_nesting();
    result
}

// IF ::= 'IF' OR 'THEN' OR 'ELSE' OR
pub fn parse_if<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    parser.advance();
    let cond = parse_or(parser)?;

    parser.expect_error(TokenKind::Then, |token| ErrorImpl::ExpectedThen { token })?;
    let then = parse_or(parser)?;

    parser.expect_error(TokenKind::Else, |token| ErrorImpl::ExpectedElse { token })?;
    let otherwise = parse_or(parser)?;

    Ok(Node::if_else(cond, then, otherwise))
}

/// Parses `operand { operator operand }`, folding to the left.
fn parse_left_assoc<S: Scanner>(
    parser: &mut Parser<'_, S>,
    operator: TokenKind,
    operand: fn(&mut Parser<'_, S>) -> Result<Node, Error>,
    fold: Fold,
) -> Result<Node, Error> {
    let mut left = operand(parser)?;

    while parser.current_token_kind() == operator {
        parser.advance();
        let right = operand(parser)?;
        left = fold(left, right);
    }

    Ok(left)
}

// OR ::= AND {'OR' AND}
pub fn parse_or<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    parse_left_assoc(parser, TokenKind::Or, parse_and, Node::or)
}

// AND ::= CMP {'AND' CMP}
pub fn parse_and<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    parse_left_assoc(parser, TokenKind::And, parse_cmp, Node::and)
}

// CMP ::= SUM ['>' SUM]
pub fn parse_cmp<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    let left = parse_sum(parser)?;

    if parser.current_token_kind() != TokenKind::Greater {
        return Ok(left);
    }

    parser.advance();
    let right = parse_sum(parser)?;
    Ok(Node::cmp(left, right))
}

// SUM ::= PRODUCT {'+' PRODUCT}
pub fn parse_sum<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    parse_left_assoc(parser, TokenKind::Plus, parse_product, Node::sum)
}

// PRODUCT ::= EXPT {'*' EXPT}
pub fn parse_product<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    parse_left_assoc(parser, TokenKind::Star, parse_expt, Node::product)
}

// EXPT ::= TERM | TERM '^' EXPT
pub fn parse_expt<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    let base = parse_term(parser)?;

    if parser.current_token_kind() != TokenKind::Caret {
        return Ok(base);
    }

    parser.advance();
    parser.enter_nesting()?;
    let exponent = parse_expt(parser);
    parser.exit_nesting();

    Ok(Node::expt(base, exponent?))
}

// TERM ::= '(' EXPRESSION ')' | 'NUMBER'
pub fn parse_term<S: Scanner>(parser: &mut Parser<'_, S>) -> Result<Node, Error> {
    let next = parser.advance();

    match next.kind {
        TokenKind::OpenParen => {
            let expr = parse_expression(parser)?;
            parser.expect_error(TokenKind::CloseParen, |token| ErrorImpl::ExpectedCloseParen {
                token,
            })?;
            Ok(expr)
        }
        TokenKind::Number => {
            trace!("number {} at depth {}", next.value, parser.get_depth());
            Ok(Node::number(next.value))
        }
        _ => Err(error_at(&next, |token| ErrorImpl::ExpectedTerm { token })),
    }
}
