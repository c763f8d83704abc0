use std::fmt::Display;

use tiny_syntax::ast::Literal;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    Str(String),
    Null,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&match self {
            Self::Boolean(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Str(s) => s.clone(),
            Self::Null => "null".to_string(),
        })
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Number(n) => Self::Number(*n),
            Literal::Str(s) => Self::Str(s.clone()),
            Literal::Char(c) => Self::Str(c.to_string()),
            Literal::Boolean(b) => Self::Boolean(*b),
        }
    }
}

impl Value {
    /// Reads a switch probe typed at a prompt: integers become
    /// numbers, anything else is kept as text.
    pub fn from_probe(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(n) => Self::Number(n as f64),
            Err(_) => Self::Str(input.to_string()),
        }
    }

    pub fn to_bool(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Str(s) => !s.is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Null => "null",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe() {
        assert_eq!(Value::from_probe("2"), Value::Number(2.0));
        assert_eq!(Value::from_probe(" -7\n"), Value::Number(-7.0));
        assert_eq!(Value::from_probe("a"), Value::Str("a".to_string()));
        assert_eq!(Value::from_probe("2.5"), Value::Str("2.5".to_string()));
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.to_bool());
        assert!(!Value::Number(0.0).to_bool());
        assert!(!Value::Str(String::new()).to_bool());
        assert!(Value::Str("0".to_string()).to_bool());
        assert!(Value::Number(-1.0).to_bool());
    }

    #[test]
    fn display() {
        assert_eq!(Value::Number(14.0).to_string(), "14");
        assert_eq!(Value::Number(3.5).to_string(), "3.5");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
