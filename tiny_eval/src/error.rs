use std::fmt::Display;

use tiny_syntax::error::{LexError, ParseError};

/// Aborts the current input.
#[derive(Clone, Debug, PartialEq)]
pub enum Exception {
    Syntax(ParseError),
    Error(String),
}

impl Display for Exception {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(e) => e.fmt(f),
            Self::Error(e) => f.write_str(e),
        }
    }
}

impl From<ParseError> for Exception {
    fn from(e: ParseError) -> Self {
        Self::Syntax(e)
    }
}

/// Recoverable conditions. They are reported, never raised.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    Lex(LexError),
    DivisionByZero,
    /// `++` on a name that was never assigned.
    Undefined(String),
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => e.fmt(f),
            Self::DivisionByZero => f.write_str("Error: Division by zero"),
            Self::Undefined(name) => write!(f, "Error: {name} not defined"),
        }
    }
}

#[derive(Debug)]
pub enum ErrorMsg {
    ExpectedNumber,
    MismatchedKinds,
    Unordered,
}

impl Display for ErrorMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ExpectedNumber => "expected numeric operand",
            Self::MismatchedKinds => "cannot compare values of different kinds",
            Self::Unordered => "values of this kind cannot be ordered",
        })
    }
}

pub fn runtime_error(msg: ErrorMsg, ctx: impl Display) -> Exception {
    Exception::Error(format!("Runtime error: {}, found {}", msg, ctx))
}
