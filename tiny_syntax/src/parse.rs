use std::{iter::Peekable, slice::Iter};

use crate::{
    ast::{BinOp, Clause, Expr, Item, LogicalOp, Source},
    error::{ErrorMsg, ParseError},
    token::{Token, TokenKind},
};

type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug)]
pub struct Parser<'a> {
    stream: Peekable<Iter<'a, Token>>,
}

impl<'a> Parser<'a> {
    pub fn new(stream: &'a [Token]) -> Self {
        Self {
            stream: stream.iter().peekable(),
        }
    }

    /// Parses every statement in the stream. The first error aborts
    /// the whole parse.
    pub fn parse_all(mut self) -> ParseResult<Source> {
        let mut items: Vec<Item> = Vec::default();
        while self.stream.peek().is_some() {
            items.push(self.parse_item()?);
        }
        Ok(Source { items })
    }

    pub fn parse_item(&mut self) -> ParseResult<Item> {
        let Some(&t) = self.stream.peek() else {
            return Err(Self::eof_error(ErrorMsg::UnexpectedToken));
        };
        match t.kind {
            TokenKind::CONSOLE_LOG => self.parse_log_stmt(),
            TokenKind::SWITCH => self.parse_switch_stmt(),
            TokenKind::WHILE => self.parse_while_stmt(),
            TokenKind::IDENT if self.second_is(TokenKind::EQUAL) => self.parse_assignment(),
            TokenKind::IDENT if self.second_is(TokenKind::INCREMENT) => self.parse_increment(),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_log_stmt(&mut self) -> ParseResult<Item> {
        // Consume `console.log`
        self.advance();
        self.advance_or_err(TokenKind::LPAREN, ErrorMsg::MissingOpeningParen)?;
        let expr = self.parse_expr()?;
        self.advance_or_err(TokenKind::RPAREN, ErrorMsg::MissingClosingParen)?;
        self.advance_if(|t| t.kind == TokenKind::SEMICOLON);

        Ok(Item::LogStmt(expr))
    }

    fn parse_switch_stmt(&mut self) -> ParseResult<Item> {
        // Consume the `switch` keyword
        self.advance();
        let subject = self
            .advance_or_err(TokenKind::IDENT, ErrorMsg::InvalidIdent)?
            .lexeme
            .clone();
        self.advance_or_err(TokenKind::LBRACE, ErrorMsg::MissingOpeningBrace)?;

        let mut clauses = vec![];
        while let Some(t) =
            self.advance_if(|t| matches!(t.kind, TokenKind::CASE | TokenKind::DEFAULT))
        {
            clauses.push(self.parse_clause(t.kind)?);
            // Clauses may be separated JS style
            self.advance_if(|t| matches!(t.kind, TokenKind::SEMICOLON | TokenKind::COMMA));
        }
        if clauses.is_empty() {
            return Err(self.peek_error(ErrorMsg::EmptySwitch));
        }
        self.advance_or_err(TokenKind::RBRACE, ErrorMsg::MissingClosingBrace)?;

        Ok(Item::SwitchStmt { subject, clauses })
    }

    /// Parses the rest of a clause after its `case`/`default` keyword.
    fn parse_clause(&mut self, kind: TokenKind) -> ParseResult<Clause> {
        let tag = if kind == TokenKind::CASE {
            let Some(t) = self.advance() else {
                return Err(Self::eof_error(ErrorMsg::InvalidCaseTag));
            };
            match (t.kind, &t.literal) {
                (TokenKind::NUMBER | TokenKind::CHAR, Some(lit)) => Some(lit.clone()),
                _ => return Err(Self::error(t, ErrorMsg::InvalidCaseTag)),
            }
        } else {
            None
        };
        self.advance_or_err(TokenKind::COLON, ErrorMsg::MissingColon)?;
        let label = self
            .advance_or_err(TokenKind::IDENT, ErrorMsg::InvalidIdent)?
            .lexeme
            .clone();

        Ok(match tag {
            Some(tag) => Clause::Case { tag, label },
            None => Clause::Default { label },
        })
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Item> {
        // Consume the `while` keyword
        self.advance();
        self.advance_or_err(TokenKind::LPAREN, ErrorMsg::MissingOpeningParen)?;
        let condition = self.parse_expr()?;
        self.advance_or_err(TokenKind::RPAREN, ErrorMsg::MissingClosingParen)?;
        self.advance_or_err(TokenKind::LBRACE, ErrorMsg::MissingOpeningBrace)?;

        let mut body = vec![];
        loop {
            let Some(&t) = self.stream.peek() else {
                return Err(Self::eof_error(ErrorMsg::MissingClosingBrace));
            };
            let item = match t.kind {
                TokenKind::RBRACE => break,
                TokenKind::CONSOLE_LOG => self.parse_log_stmt()?,
                TokenKind::IDENT if self.second_is(TokenKind::EQUAL) => self.parse_assignment()?,
                TokenKind::IDENT if self.second_is(TokenKind::INCREMENT) => {
                    self.parse_increment()?
                }
                _ => return Err(Self::error(t, ErrorMsg::InvalidLoopBody)),
            };
            body.push(item);
        }
        // Consume the closing brace
        self.advance();

        Ok(Item::WhileStmt { condition, body })
    }

    fn parse_assignment(&mut self) -> ParseResult<Item> {
        let name = self
            .advance_or_err(TokenKind::IDENT, ErrorMsg::InvalidIdent)?
            .lexeme
            .clone();
        // Consume the `=`
        self.advance();
        let value = self.parse_expr()?;
        self.advance_or_err(TokenKind::SEMICOLON, ErrorMsg::MissingSemicolon)?;

        Ok(Item::Assignment { name, value })
    }

    fn parse_increment(&mut self) -> ParseResult<Item> {
        let name = self
            .advance_or_err(TokenKind::IDENT, ErrorMsg::InvalidIdent)?
            .lexeme
            .clone();
        // Consume the `++`
        self.advance();
        self.advance_or_err(TokenKind::SEMICOLON, ErrorMsg::MissingSemicolon)?;

        Ok(Item::Increment(name))
    }

    fn parse_expr_stmt(&mut self) -> ParseResult<Item> {
        let expr = self.parse_expr()?;
        self.advance_if(|t| t.kind == TokenKind::SEMICOLON);
        Ok(Item::ExprStmt(expr))
    }

    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> ParseResult<Expr> {
        let condition = self.parse_logical_or()?;
        let Some(question) = self.advance_if(|t| t.kind == TokenKind::QUESTION) else {
            return Ok(condition);
        };
        if !condition.is_comparison() {
            return Err(Self::error(question, ErrorMsg::ExpectedComparison));
        }
        let then = self.parse_expr()?;
        self.advance_or_err(TokenKind::COLON, ErrorMsg::MissingColon)?;
        let otherwise = self.parse_expr()?;

        Ok(Expr::Ternary {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_logical_and()?;
        while self.advance_if(|t| t.kind == TokenKind::OR).is_some() {
            let rhs = self.parse_logical_and()?;
            lhs = Expr::Logical {
                lhs: Box::new(lhs),
                op: LogicalOp::Or,
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_eq()?;
        while self.advance_if(|t| t.kind == TokenKind::AND).is_some() {
            let rhs = self.parse_eq()?;
            lhs = Expr::Logical {
                lhs: Box::new(lhs),
                op: LogicalOp::And,
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_eq(&mut self) -> ParseResult<Expr> {
        self.parse_binary(
            &[TokenKind::EQUAL_EQUAL, TokenKind::BANG_EQUAL],
            Self::parse_cmp,
        )
    }

    fn parse_cmp(&mut self) -> ParseResult<Expr> {
        self.parse_binary(&[TokenKind::GREATER, TokenKind::LESS], Self::parse_term)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        self.parse_binary(&[TokenKind::PLUS, TokenKind::MINUS], Self::parse_factor)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        self.parse_binary(&[TokenKind::STAR, TokenKind::SLASH], Self::parse_primary)
    }

    /// One left-associative precedence level.
    fn parse_binary(
        &mut self,
        ops: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut lhs = operand(self)?;
        while let Some(op) = self
            .advance_if(|t| ops.contains(&t.kind))
            .and_then(|t| BinOp::from_token(t.kind))
        {
            let rhs = operand(self)?;
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let Some(t) = self.advance() else {
            return Err(Self::eof_error(ErrorMsg::UnexpectedToken));
        };
        match t.kind {
            TokenKind::NUMBER
            | TokenKind::STRING
            | TokenKind::CHAR
            | TokenKind::TRUE
            | TokenKind::FALSE => match &t.literal {
                Some(lit) => Ok(Expr::Literal(lit.clone())),
                None => Err(Self::error(t, ErrorMsg::UnexpectedToken)),
            },
            TokenKind::IDENT => Ok(Expr::Ident(t.lexeme.clone())),
            TokenKind::LPAREN => self.parse_group(),
            _ => Err(Self::error(t, ErrorMsg::UnexpectedToken)),
        }
    }

    fn parse_group(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_expr()?;
        self.advance_or_err(TokenKind::RPAREN, ErrorMsg::MissingClosingParen)?;
        Ok(Expr::Group(Box::new(expr)))
    }

    fn second_is(&self, kind: TokenKind) -> bool {
        self.stream
            .clone()
            .nth(1)
            .filter(|t| t.kind == kind)
            .is_some()
    }

    fn advance(&mut self) -> Option<&'a Token> {
        self.stream.next()
    }

    fn advance_if<F>(&mut self, cond: F) -> Option<&'a Token>
    where
        F: FnOnce(&Token) -> bool,
    {
        if self.stream.peek().filter(|&&t| cond(t)).is_some() {
            self.advance()
        } else {
            None
        }
    }

    fn advance_or_err(&mut self, kind: TokenKind, msg: ErrorMsg) -> ParseResult<&'a Token> {
        if let Some(&t) = self.stream.peek() {
            if t.kind == kind {
                self.advance();
                Ok(t)
            } else {
                Err(Self::error(t, msg))
            }
        } else {
            Err(Self::eof_error(msg))
        }
    }

    fn peek_error(&mut self, msg: ErrorMsg) -> ParseError {
        match self.stream.peek() {
            Some(&t) => Self::error(t, msg),
            None => Self::eof_error(msg),
        }
    }

    fn error(token: &Token, msg: ErrorMsg) -> ParseError {
        ParseError::UnexpectedToken {
            msg,
            lexeme: token.lexeme.clone(),
            line: token.line,
        }
    }

    fn eof_error(msg: ErrorMsg) -> ParseError {
        ParseError::EndOfStream { msg }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Literal, lex::Lexer};

    fn parse_test(input: &str, expected: Vec<Item>) {
        let (tokens, errors) = Lexer::new(input).lex_all();
        assert!(errors.is_empty());
        let source = Parser::new(&tokens).parse_all().unwrap();
        assert_eq!(source, Source { items: expected });
    }

    fn parse_err_test(input: &str, expected: &str) {
        let (tokens, _) = Lexer::new(input).lex_all();
        let err = Parser::new(&tokens).parse_all().unwrap_err();
        assert_eq!(err.to_string(), expected);
    }

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Number(n)))
    }

    #[test]
    fn log_stmt() {
        let expected = vec![Item::LogStmt(Expr::Binary {
            lhs: num(1.0),
            op: BinOp::Plus,
            rhs: num(2.0),
        })];
        parse_test("console.log(1+2);", expected.clone());
        parse_test("console.log(1 + 2)", expected);
    }

    #[test]
    fn precedence() {
        // 1 || 2 && 3 == 4 > 5 + 6 * 7
        let product = Expr::Binary {
            lhs: num(6.0),
            op: BinOp::Star,
            rhs: num(7.0),
        };
        let sum = Expr::Binary {
            lhs: num(5.0),
            op: BinOp::Plus,
            rhs: Box::new(product),
        };
        let cmp = Expr::Binary {
            lhs: num(4.0),
            op: BinOp::Greater,
            rhs: Box::new(sum),
        };
        let eq = Expr::Binary {
            lhs: num(3.0),
            op: BinOp::EqualEqual,
            rhs: Box::new(cmp),
        };
        let and = Expr::Logical {
            lhs: num(2.0),
            op: LogicalOp::And,
            rhs: Box::new(eq),
        };
        parse_test(
            "1 || 2 && 3 == 4 > 5 + 6 * 7",
            vec![Item::ExprStmt(Expr::Logical {
                lhs: num(1.0),
                op: LogicalOp::Or,
                rhs: Box::new(and),
            })],
        );
    }

    #[test]
    fn left_associative() {
        parse_test(
            "8 - 4 - 2",
            vec![Item::ExprStmt(Expr::Binary {
                lhs: Box::new(Expr::Binary {
                    lhs: num(8.0),
                    op: BinOp::Minus,
                    rhs: num(4.0),
                }),
                op: BinOp::Minus,
                rhs: num(2.0),
            })],
        );
    }

    #[test]
    fn ternary() {
        parse_test(
            "x > 5 ? 'a' : \"no\"",
            vec![Item::ExprStmt(Expr::Ternary {
                condition: Box::new(Expr::Binary {
                    lhs: Box::new(Expr::Ident("x".to_string())),
                    op: BinOp::Greater,
                    rhs: num(5.0),
                }),
                then: Box::new(Expr::Literal(Literal::Char('a'))),
                otherwise: Box::new(Expr::Literal(Literal::Str("no".to_string()))),
            })],
        );
    }

    #[test]
    fn grouped_ternary_condition() {
        parse_test(
            "(x > 5) ? 'a' : 'b'",
            vec![Item::ExprStmt(Expr::Ternary {
                condition: Box::new(Expr::Group(Box::new(Expr::Binary {
                    lhs: Box::new(Expr::Ident("x".to_string())),
                    op: BinOp::Greater,
                    rhs: num(5.0),
                }))),
                then: Box::new(Expr::Literal(Literal::Char('a'))),
                otherwise: Box::new(Expr::Literal(Literal::Char('b'))),
            })],
        );
        parse_err_test(
            "(x) ? 1 : 2",
            "Parse error at line 1: expected comparison before ?",
        );
    }

    #[test]
    fn switch_stmt() {
        parse_test(
            "switch x { case 1: A case 'b': B default: C }",
            vec![Item::SwitchStmt {
                subject: "x".to_string(),
                clauses: vec![
                    Clause::Case {
                        tag: Literal::Number(1.0),
                        label: "A".to_string(),
                    },
                    Clause::Case {
                        tag: Literal::Char('b'),
                        label: "B".to_string(),
                    },
                    Clause::Default {
                        label: "C".to_string(),
                    },
                ],
            }],
        );
    }

    #[test]
    fn switch_clause_separators() {
        let (tokens, _) = Lexer::new("switch v {\n case 1: A,\n default: B;\n case 2: C\n}").lex_all();
        let source = Parser::new(&tokens).parse_all().unwrap();
        let Item::SwitchStmt { clauses, .. } = &source.items[0] else {
            panic!("expected a switch statement");
        };
        assert_eq!(clauses.len(), 3);
    }

    #[test]
    fn while_stmt() {
        parse_test(
            "while (x < 12) { y = y + 2; x++; console.log(y); }",
            vec![Item::WhileStmt {
                condition: Expr::Binary {
                    lhs: Box::new(Expr::Ident("x".to_string())),
                    op: BinOp::Less,
                    rhs: num(12.0),
                },
                body: vec![
                    Item::Assignment {
                        name: "y".to_string(),
                        value: Expr::Binary {
                            lhs: Box::new(Expr::Ident("y".to_string())),
                            op: BinOp::Plus,
                            rhs: num(2.0),
                        },
                    },
                    Item::Increment("x".to_string()),
                    Item::LogStmt(Expr::Ident("y".to_string())),
                ],
            }],
        );
    }

    #[test]
    fn program() {
        parse_test(
            "x = 1; x++; x",
            vec![
                Item::Assignment {
                    name: "x".to_string(),
                    value: Expr::Literal(Literal::Number(1.0)),
                },
                Item::Increment("x".to_string()),
                Item::ExprStmt(Expr::Ident("x".to_string())),
            ],
        );
    }

    #[test]
    fn missing_closing_paren() {
        parse_err_test(
            "console.log(1 + 2;",
            "Parse error at line 1: missing closing parenthesis at ;",
        );
    }

    #[test]
    fn unexpected_end() {
        parse_err_test("1 +", "Parse error: unexpected token end of stream");
    }

    #[test]
    fn missing_semicolon() {
        parse_err_test("x = 1", "Parse error: missing semicolon at end of stream");
    }

    #[test]
    fn ternary_needs_comparison() {
        parse_err_test(
            "x ? 1 : 2",
            "Parse error at line 1: expected comparison before ?",
        );
        let (tokens, _) = Lexer::new("1 && 2 > 1 ? 1 : 2").lex_all();
        let err = Parser::new(&tokens).parse_all().unwrap_err();
        assert_eq!(err.msg(), ErrorMsg::ExpectedComparison);
    }

    #[test]
    fn empty_switch() {
        parse_err_test(
            "switch x { }",
            "Parse error at line 1: switch needs at least one case or default clause, found }",
        );
    }

    #[test]
    fn bad_case_tag() {
        parse_err_test(
            "switch x { case \"ab\": A }",
            "Parse error at line 1: case tag must be a number or character literal, found \"ab\"",
        );
    }

    #[test]
    fn loop_body_is_restricted() {
        parse_err_test(
            "while (x < 3) {\n switch x { default: A } }",
            "Parse error at line 2: statement not allowed in loop body switch",
        );
    }

    #[test]
    fn missing_closing_brace() {
        parse_err_test(
            "while (x < 3) { x++;",
            "Parse error: missing closing brace at end of stream",
        );
    }
}
