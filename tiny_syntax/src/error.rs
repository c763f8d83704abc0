use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorMsg {
    // Lex errors
    UnexpectedChar,
    // Parse errors
    UnexpectedToken,
    MissingOpeningParen,
    MissingClosingParen,
    MissingOpeningBrace,
    MissingClosingBrace,
    MissingColon,
    MissingSemicolon,
    InvalidIdent,
    InvalidCaseTag,
    EmptySwitch,
    ExpectedComparison,
    InvalidLoopBody,
    // EOF
    EndOfStream,
}

impl Display for ErrorMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::UnexpectedChar => "unexpected character",
            Self::UnexpectedToken => "unexpected token",
            Self::MissingOpeningParen => "missing opening parenthesis at",
            Self::MissingClosingParen => "missing closing parenthesis at",
            Self::MissingOpeningBrace => "missing opening brace at",
            Self::MissingClosingBrace => "missing closing brace at",
            Self::MissingColon => "missing colon at",
            Self::MissingSemicolon => "missing semicolon at",
            Self::InvalidIdent => "invalid identifier",
            Self::InvalidCaseTag => "case tag must be a number or character literal, found",
            Self::EmptySwitch => "switch needs at least one case or default clause, found",
            Self::ExpectedComparison => "expected comparison before",
            Self::InvalidLoopBody => "statement not allowed in loop body",
            Self::EndOfStream => "end of stream",
        })
    }
}

/// An illegal character. Lexing skips it and carries on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub ch: char,
    /// 0-based, displayed 1-based.
    pub line: usize,
    /// Byte offset into the source.
    pub pos: usize,
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lex error at line {}: {} '{}' at position {}",
            self.line + 1,
            ErrorMsg::UnexpectedChar,
            self.ch,
            self.pos
        )
    }
}

/// Aborts the parse of a whole input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedToken {
        msg: ErrorMsg,
        lexeme: String,
        line: usize,
    },
    EndOfStream {
        msg: ErrorMsg,
    },
}

impl ParseError {
    pub fn msg(&self) -> ErrorMsg {
        match self {
            Self::UnexpectedToken { msg, .. } | Self::EndOfStream { msg } => *msg,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { msg, lexeme, line } => {
                write!(f, "Parse error at line {}: {} {}", line + 1, msg, lexeme)
            }
            Self::EndOfStream { msg } => {
                write!(f, "Parse error: {} {}", msg, ErrorMsg::EndOfStream)
            }
        }
    }
}
