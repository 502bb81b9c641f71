//! Errors raised while translating a source file.
//!
//! Every error is fatal: the parser stops at the first one and no tree is
//! returned. Each variant carries the 1-based position of the token that
//! triggered it.

use crate::compiler::lexer::{Token, TokenKind};
use std::fmt;

/// What the parser was looking for when it hit an unexpected token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Kind(TokenKind),
    /// Start of a value: number, string, boolean, array, reference or object.
    Value,
    /// Start of a top-level item: `global`, an assignment or a bare block.
    Declaration,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::Value => write!(f, "value"),
            Expected::Declaration => write!(f, "declaration"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The current token does not fit the grammar. Running out of input
    /// inside an array, object or reference lands here with `found == End`.
    Syntax {
        expected: Expected,
        found: TokenKind,
        text: String,
        line: usize,
        column: usize,
    },
    UnknownConstant { name: String, line: usize, column: usize },
    NumericOverflow { literal: String, line: usize, column: usize },
    /// `0x` with no hex digits after it.
    InvalidNumber { line: usize, column: usize },
    NestingTooDeep { limit: usize, line: usize, column: usize },
    /// The document would expand to more nodes than allowed once every
    /// constant reference is written out in full.
    TooManyNodes { limit: usize, line: usize, column: usize },
}

impl TranslateError {
    pub fn syntax(expected: Expected, found: &Token) -> Self {
        TranslateError::Syntax {
            expected,
            found: found.kind,
            text: found.text.clone(),
            line: found.line,
            column: found.column,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            TranslateError::Syntax { line, .. }
            | TranslateError::UnknownConstant { line, .. }
            | TranslateError::NumericOverflow { line, .. }
            | TranslateError::InvalidNumber { line, .. }
            | TranslateError::NestingTooDeep { line, .. }
            | TranslateError::TooManyNodes { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            TranslateError::Syntax { column, .. }
            | TranslateError::UnknownConstant { column, .. }
            | TranslateError::NumericOverflow { column, .. }
            | TranslateError::InvalidNumber { column, .. }
            | TranslateError::NestingTooDeep { column, .. }
            | TranslateError::TooManyNodes { column, .. } => *column,
        }
    }

    /// True when the error was caused by running out of input.
    pub fn is_unterminated(&self) -> bool {
        matches!(self, TranslateError::Syntax { found: TokenKind::End, .. })
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: ", self.line(), self.column())?;
        match self {
            TranslateError::Syntax { expected, found: TokenKind::End, .. } => {
                write!(f, "expected {}, got END (unexpected end of input)", expected)
            }
            TranslateError::Syntax { expected, found, text, .. } => {
                write!(f, "expected {}, got {} '{}'", expected, found, text)
            }
            TranslateError::UnknownConstant { name, .. } => {
                write!(f, "unknown constant '{}'", name)
            }
            TranslateError::NumericOverflow { literal, .. } => {
                write!(f, "hex literal 0x{} does not fit in a signed 64-bit integer", literal)
            }
            TranslateError::InvalidNumber { .. } => {
                write!(f, "hex literal has no digits after '0x'")
            }
            TranslateError::NestingTooDeep { limit, .. } => {
                write!(f, "nesting deeper than {} levels", limit)
            }
            TranslateError::TooManyNodes { limit, .. } => {
                write!(f, "document expands to more than {} nodes", limit)
            }
        }
    }
}

impl std::error::Error for TranslateError {}
