use std::fmt::Display;

use crate::token::TokenKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Slash,
    Star,
    Plus,
    Minus,
    Greater,
    Less,
    BangEqual,
    EqualEqual,
}

impl Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Slash => "/",
            Self::Star => "*",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Greater => ">",
            Self::Less => "<",
            Self::BangEqual => "!=",
            Self::EqualEqual => "==",
        })
    }
}

impl BinOp {
    pub fn from_token(t: TokenKind) -> Option<Self> {
        let op = match t {
            TokenKind::SLASH => Self::Slash,
            TokenKind::STAR => Self::Star,
            TokenKind::PLUS => Self::Plus,
            TokenKind::MINUS => Self::Minus,
            TokenKind::GREATER => Self::Greater,
            TokenKind::LESS => Self::Less,
            TokenKind::BANG_EQUAL => Self::BangEqual,
            TokenKind::EQUAL_EQUAL => Self::EqualEqual,
            _ => return None,
        };
        Some(op)
    }

    /// Relational and equality operators, the only ones allowed at
    /// the top of a ternary condition.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Greater | Self::Less | Self::BangEqual | Self::EqualEqual
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::And => "&&",
            Self::Or => "||",
        })
    }
}

impl LogicalOp {
    pub fn from_token(t: TokenKind) -> Option<Self> {
        let op = match t {
            TokenKind::AND => Self::And,
            TokenKind::OR => Self::Or,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
    Char(char),
    Boolean(bool),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Char(c) => write!(f, "{c}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    Binary {
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
    },
    Logical {
        lhs: Box<Expr>,
        op: LogicalOp,
        rhs: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Group(Box<Expr>),
}

impl Expr {
    /// Looks through grouping, so `(a > b)` counts.
    pub fn is_comparison(&self) -> bool {
        match self {
            Self::Binary { op, .. } => op.is_comparison(),
            Self::Group(e) => e.is_comparison(),
            _ => false,
        }
    }
}

/// One branch of a switch. Tags are number or character literals.
#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    Case { tag: Literal, label: String },
    Default { label: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    LogStmt(Expr),
    SwitchStmt {
        subject: String,
        clauses: Vec<Clause>,
    },
    WhileStmt {
        condition: Expr,
        body: Vec<Item>,
    },
    Assignment {
        name: String,
        value: Expr,
    },
    Increment(String),
    ExprStmt(Expr),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Source {
    pub items: Vec<Item>,
}

impl Source {
    pub fn has_switch(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::SwitchStmt { .. }))
    }
}
