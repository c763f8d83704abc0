use crate::{
    ast::Literal,
    error::LexError,
    token::{TextRange, Token, TokenKind},
};
use std::{iter::Peekable, str::Chars};

const LOG_SUFFIX: &str = ".log";

#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    stream: Peekable<Chars<'a>>,
    line: usize,
    start: usize,
    current: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            stream: source.chars().peekable(),
            line: 0,
            start: 0,
            current: 0,
        }
    }

    /// Lexes the whole source. Illegal characters are reported and
    /// skipped, so the token list is always usable.
    pub fn lex_all(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens: Vec<Token> = Vec::default();
        let mut errors: Vec<LexError> = Vec::default();
        loop {
            match self.lex() {
                Ok(Some(t)) => tokens.push(t),
                Ok(None) => break,
                Err(e) => errors.push(e),
            }
        }
        (tokens, errors)
    }

    /// Returns the next token, `None` once the source is exhausted.
    pub fn lex(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();
        self.start = self.current;
        let Some(c) = self.advance() else {
            return Ok(None);
        };
        let token = match c {
            '=' => self.lookahead_for_token('=', TokenKind::EQUAL_EQUAL, TokenKind::EQUAL),
            '+' => self.lookahead_for_token('+', TokenKind::INCREMENT, TokenKind::PLUS),
            '!' => self.expect_pair('=', TokenKind::BANG_EQUAL, c)?,
            '&' => self.expect_pair('&', TokenKind::AND, c)?,
            '|' => self.expect_pair('|', TokenKind::OR, c)?,
            '"' | '\'' => self.lex_quoted(c)?,
            _ => {
                if let Some(t) = TokenKind::from_char(c) {
                    self.make_token(t)
                } else if c.is_ascii_alphabetic() || c == '_' {
                    self.lex_ident()
                } else if c.is_ascii_digit() {
                    self.lex_number(c)?
                } else {
                    return Err(self.error(c));
                }
            }
        };
        Ok(Some(token))
    }

    fn lex_ident(&mut self) -> Token {
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let lexeme = self.lexeme_from_range();
        if lexeme == "console" && self.source[self.current..].starts_with(LOG_SUFFIX) {
            for _ in 0..LOG_SUFFIX.len() {
                self.advance();
            }
            return self.make_token(TokenKind::CONSOLE_LOG);
        }
        match TokenKind::from_keyword(lexeme) {
            Some(TokenKind::TRUE) => self
                .make_token(TokenKind::TRUE)
                .with_literal(Literal::Boolean(true)),
            Some(TokenKind::FALSE) => self
                .make_token(TokenKind::FALSE)
                .with_literal(Literal::Boolean(false)),
            Some(t) => self.make_token(t),
            None => self.make_token(TokenKind::IDENT),
        }
    }

    fn lex_number(&mut self, first: char) -> Result<Token, LexError> {
        self.advance_while(|c| c.is_ascii_digit());
        let value = self
            .lexeme_from_range()
            .parse()
            .map_err(|_| self.error(first))?;
        Ok(self
            .make_token(TokenKind::NUMBER)
            .with_literal(Literal::Number(value)))
    }

    /// Quoted spans end at the first matching quote on the same line.
    /// A lone letter in single quotes is a character literal.
    fn lex_quoted(&mut self, quote: char) -> Result<Token, LexError> {
        let rest = &self.source[self.current..];
        let Some(end) = rest.find(|c: char| c == quote || c == '\n') else {
            return Err(self.error(quote));
        };
        if !rest[end..].starts_with(quote) {
            return Err(self.error(quote));
        }
        let content = &rest[..end];
        // Consume the content and the closing quote
        while self.current < self.start + 1 + end + quote.len_utf8() {
            self.advance();
        }

        let mut chars = content.chars();
        let token = match (quote, chars.next(), chars.next()) {
            ('\'', Some(c), None) if c.is_ascii_alphabetic() => self
                .make_token(TokenKind::CHAR)
                .with_literal(Literal::Char(c)),
            _ => self
                .make_token(TokenKind::STRING)
                .with_literal(Literal::Str(content.to_string())),
        };
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.advance_if(char::is_whitespace) {
            // If it is a newline, increment the current line count
            if c == '\n' {
                self.line += 1;
            }
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.text_range(),
            self.line,
            self.lexeme_from_range().to_string(),
        )
    }

    fn lexeme_from_range(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn text_range(&self) -> TextRange {
        TextRange {
            start: self.start,
            end: self.current,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.stream.next()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn advance_if<F>(&mut self, cond: F) -> Option<char>
    where
        F: FnOnce(char) -> bool,
    {
        if self.stream.peek().filter(|&&c| cond(c)).is_some() {
            self.advance()
        } else {
            None
        }
    }

    fn advance_while<F>(&mut self, cond: F) -> Option<usize>
    where
        F: Fn(char) -> bool,
    {
        let mut count: usize = 0;
        while self.stream.peek().filter(|&&c| cond(c)).is_some() {
            count += 1;
            self.advance();
        }
        count.ne(&0).then_some(count)
    }

    fn lookahead_for_token(
        &mut self,
        match_char: char,
        if_match: TokenKind,
        no_match: TokenKind,
    ) -> Token {
        if self.advance_if(|c| c == match_char).is_some() {
            self.make_token(if_match)
        } else {
            self.make_token(no_match)
        }
    }

    /// For operators that only exist as a two character pair. The
    /// first character alone is illegal.
    fn expect_pair(
        &mut self,
        match_char: char,
        kind: TokenKind,
        first: char,
    ) -> Result<Token, LexError> {
        if self.advance_if(|c| c == match_char).is_some() {
            Ok(self.make_token(kind))
        } else {
            Err(self.error(first))
        }
    }

    fn error(&self, ch: char) -> LexError {
        LexError {
            ch,
            line: self.line,
            pos: self.start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let (tokens, errors) = Lexer::new(input).lex_all();
        assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn console_log() {
        let (tokens, errors) = Lexer::new("console.log(1+2);").lex_all();
        assert!(errors.is_empty());
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::CONSOLE_LOG,
                TokenKind::LPAREN,
                TokenKind::NUMBER,
                TokenKind::PLUS,
                TokenKind::NUMBER,
                TokenKind::RPAREN,
                TokenKind::SEMICOLON,
            ]
        );
        assert_eq!(tokens[0].range, TextRange { start: 0, end: 11 });
        assert_eq!(tokens[2].literal, Some(Literal::Number(1.0)));
        assert_eq!(tokens[4].literal, Some(Literal::Number(2.0)));
        assert_eq!(tokens[6].range, TextRange { start: 16, end: 17 });
    }

    #[test]
    fn console_log_must_be_contiguous() {
        let (tokens, errors) = Lexer::new("console .log(1)").lex_all();
        assert_eq!(errors.iter().map(|e| e.ch).collect::<Vec<_>>(), vec!['.']);
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::CONSOLE,
                TokenKind::IDENT,
                TokenKind::LPAREN,
                TokenKind::NUMBER,
                TokenKind::RPAREN,
            ]
        );
    }

    #[test]
    fn multi_char_operators() {
        assert_eq!(
            kinds("== != && || ++ = + > <"),
            vec![
                TokenKind::EQUAL_EQUAL,
                TokenKind::BANG_EQUAL,
                TokenKind::AND,
                TokenKind::OR,
                TokenKind::INCREMENT,
                TokenKind::EQUAL,
                TokenKind::PLUS,
                TokenKind::GREATER,
                TokenKind::LESS,
            ]
        );
    }

    #[test]
    fn keywords_need_exact_match() {
        assert_eq!(
            kinds("switch switches case cases default while console trueish true"),
            vec![
                TokenKind::SWITCH,
                TokenKind::IDENT,
                TokenKind::CASE,
                TokenKind::IDENT,
                TokenKind::DEFAULT,
                TokenKind::WHILE,
                TokenKind::CONSOLE,
                TokenKind::IDENT,
                TokenKind::TRUE,
            ]
        );
    }

    #[test]
    fn strings_and_chars() {
        let (tokens, errors) = Lexer::new(r#""hi" 'there' 'a' "b" '' 'ab'"#).lex_all();
        assert!(errors.is_empty());
        let literals: Vec<_> = tokens.into_iter().map(|t| (t.kind, t.literal)).collect();
        assert_eq!(
            literals,
            vec![
                (TokenKind::STRING, Some(Literal::Str("hi".to_string()))),
                (TokenKind::STRING, Some(Literal::Str("there".to_string()))),
                (TokenKind::CHAR, Some(Literal::Char('a'))),
                (TokenKind::STRING, Some(Literal::Str("b".to_string()))),
                (TokenKind::STRING, Some(Literal::Str(String::new()))),
                (TokenKind::STRING, Some(Literal::Str("ab".to_string()))),
            ]
        );
    }

    #[test]
    fn string_is_non_greedy() {
        let (tokens, _) = Lexer::new(r#""a" + "b""#).lex_all();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].literal, Some(Literal::Str("a".to_string())));
    }

    #[test]
    fn newlines_advance_line() {
        let (tokens, _) = Lexer::new("x\n\ny\nz").lex_all();
        let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![0, 2, 3]);
    }

    #[test]
    fn illegal_char_is_skipped() {
        let (tokens, errors) = Lexer::new("console.log(@);").lex_all();
        assert_eq!(
            errors,
            vec![LexError {
                ch: '@',
                line: 0,
                pos: 12
            }]
        );
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::CONSOLE_LOG,
                TokenKind::LPAREN,
                TokenKind::RPAREN,
                TokenKind::SEMICOLON,
            ]
        );
    }

    #[test]
    fn lone_pair_characters_are_illegal() {
        let (tokens, errors) = Lexer::new("1 & 2 | 3 ! 4").lex_all();
        assert_eq!(
            errors.iter().map(|e| e.ch).collect::<Vec<_>>(),
            vec!['&', '|', '!']
        );
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn unterminated_string() {
        let (tokens, errors) = Lexer::new("\"abc\n1").lex_all();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].ch, '"');
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::IDENT, TokenKind::NUMBER]
        );
        assert_eq!(tokens[1].line, 1);
    }
}
