use std::fmt::Display;

use crate::ast::Literal;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

/// The enum variants are in SCREAMING_SNAKE_CASE as they technically
/// represent constants, but Rust does not allow const enum variants.
#[allow(nonstandard_style)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenKind {
    // Symbols
    LPAREN,
    RPAREN,
    LBRACE,
    RBRACE,
    COMMA,
    COLON,
    SEMICOLON,
    QUESTION,
    // Arithmetic
    MINUS,
    PLUS,
    SLASH,
    STAR,
    INCREMENT,
    // Comparisons
    BANG_EQUAL,
    EQUAL_EQUAL,
    GREATER,
    LESS,
    // Logical
    AND,
    OR,
    // Literals
    IDENT,
    STRING,
    CHAR,
    NUMBER,
    // Keywords
    CASE,
    CONSOLE,
    CONSOLE_LOG,
    DEFAULT,
    FALSE,
    SWITCH,
    TRUE,
    WHILE,
    // Miscellaneous tokens
    EQUAL,
}

impl TokenKind {
    pub fn from_char(c: char) -> Option<Self> {
        let token = match c {
            '(' => Self::LPAREN,
            ')' => Self::RPAREN,
            '{' => Self::LBRACE,
            '}' => Self::RBRACE,
            ',' => Self::COMMA,
            ':' => Self::COLON,
            ';' => Self::SEMICOLON,
            '?' => Self::QUESTION,
            '-' => Self::MINUS,
            '*' => Self::STAR,
            '/' => Self::SLASH,
            '>' => Self::GREATER,
            '<' => Self::LESS,
            _ => return None,
        };
        Some(token)
    }

    pub fn from_keyword(kw: &str) -> Option<Self> {
        let token = match kw {
            "case" => Self::CASE,
            "console" => Self::CONSOLE,
            "default" => Self::DEFAULT,
            "false" => Self::FALSE,
            "switch" => Self::SWITCH,
            "true" => Self::TRUE,
            "while" => Self::WHILE,
            _ => return None,
        };
        Some(token)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub line: usize,
    pub lexeme: String,
    /// Typed payload for literal tokens.
    pub literal: Option<Literal>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lexeme)
    }
}

impl Token {
    pub fn new(kind: TokenKind, range: TextRange, line: usize, lexeme: String) -> Self {
        Self {
            kind,
            range,
            line,
            lexeme,
            literal: None,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }
}
