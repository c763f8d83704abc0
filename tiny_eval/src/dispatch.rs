use std::fmt::Display;

use tiny_syntax::ast::{Clause, Literal};

use crate::types::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    Case { tag: Literal, label: String },
    Default { label: String },
    NoMatch,
}

impl Display for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Case { tag, label } => write!(f, "Matched case {tag}: {label}"),
            Self::Default { label } => write!(f, "Default case: {label}"),
            Self::NoMatch => f.write_str("No match"),
        }
    }
}

impl Dispatch {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Case { label, .. } | Self::Default { label } => Some(label),
            Self::NoMatch => None,
        }
    }
}

/// Scans the clauses in order. The first clause that is either a
/// matching case or a default wins, so a default placed before a
/// matching case shadows it.
pub fn dispatch(clauses: &[Clause], probe: &Value) -> Dispatch {
    clauses
        .iter()
        .find_map(|clause| match clause {
            Clause::Case { tag, label } if tag_matches(tag, probe) => Some(Dispatch::Case {
                tag: tag.clone(),
                label: label.clone(),
            }),
            Clause::Default { label } => Some(Dispatch::Default {
                label: label.clone(),
            }),
            _ => None,
        })
        .unwrap_or(Dispatch::NoMatch)
}

fn tag_matches(tag: &Literal, probe: &Value) -> bool {
    match (tag, probe) {
        (Literal::Number(t), Value::Number(p)) => t == p,
        (Literal::Char(t), Value::Str(p)) => {
            let mut chars = p.chars();
            chars.next() == Some(*t) && chars.next().is_none()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(tag: Literal, label: &str) -> Clause {
        Clause::Case {
            tag,
            label: label.to_string(),
        }
    }

    fn default(label: &str) -> Clause {
        Clause::Default {
            label: label.to_string(),
        }
    }

    #[test]
    fn matches_case_in_order() {
        let clauses = vec![
            case(Literal::Number(1.0), "A"),
            case(Literal::Char('b'), "B"),
            default("C"),
        ];
        assert_eq!(
            dispatch(&clauses, &Value::Number(1.0)),
            Dispatch::Case {
                tag: Literal::Number(1.0),
                label: "A".to_string()
            }
        );
        let matched = dispatch(&clauses, &Value::Str("b".to_string()));
        assert_eq!(matched.to_string(), "Matched case b: B");
        assert_eq!(matched.label(), Some("B"));
        assert_eq!(
            dispatch(&clauses, &Value::Number(9.0)).to_string(),
            "Default case: C"
        );
    }

    #[test]
    fn first_default_wins_over_later_case() {
        let clauses = vec![
            case(Literal::Number(1.0), "A"),
            default("B"),
            case(Literal::Number(2.0), "C"),
        ];
        assert_eq!(
            dispatch(&clauses, &Value::Number(2.0)),
            Dispatch::Default {
                label: "B".to_string()
            }
        );
    }

    #[test]
    fn no_match_without_default() {
        let clauses = vec![case(Literal::Number(1.0), "A"), case(Literal::Char('a'), "B")];
        let result = dispatch(&clauses, &Value::Number(3.0));
        assert_eq!(result, Dispatch::NoMatch);
        assert_eq!(result.to_string(), "No match");
        assert_eq!(result.label(), None);
    }

    #[test]
    fn kinds_must_agree() {
        let clauses = vec![case(Literal::Number(1.0), "A"), case(Literal::Char('a'), "B")];
        assert_eq!(
            dispatch(&clauses, &Value::Str("1".to_string())),
            Dispatch::NoMatch
        );
        assert_eq!(
            dispatch(&clauses, &Value::Str("ab".to_string())),
            Dispatch::NoMatch
        );
        assert_eq!(dispatch(&clauses, &Value::Boolean(true)), Dispatch::NoMatch);
    }
}
