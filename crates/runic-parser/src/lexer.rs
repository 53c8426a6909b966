// Copyright (C) 2019-2026 The Runic Authors.
// This file is part of the Runic library.

// The Runic library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Runic library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Runic library. If not, see <https://www.gnu.org/licenses/>.

//! Turns source text into a flat token stream. One pass, no lookahead
//! beyond a handful of characters; comments and whitespace are
//! dropped rather than retained as tokens, since nothing downstream of
//! the parser needs them back (there is no lossless/formatting use
//! case here, unlike the teacher's `parser-lossless`).

use crate::token::{keyword_or_ident, SpannedToken, Token};
use runic_errors::{Diagnostic, Handler, ParserErrorKind};
use runic_span::{Position, Span};
use std::iter::Peekable;
use std::str::Chars;

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    pos: Position,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self { chars: source.chars().peekable(), pos: Position::new(1, 1, 0) }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos = self.pos.advance(c);
        Some(c)
    }

    fn eat_if(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Lexes one token starting at the current position, or `None` at
    /// end of input. Skips whitespace and comments internally so the
    /// caller never sees them.
    fn next_token(&mut self, handler: &Handler) -> Option<SpannedToken> {
        loop {
            match self.chars.peek()? {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.peek() {
                        Some('/') => {
                            self.bump();
                            self.bump();
                            while !matches!(self.chars.peek(), None | Some('\n')) {
                                self.bump();
                            }
                        }
                        Some('*') => {
                            self.bump();
                            self.bump();
                            loop {
                                match self.bump() {
                                    None => {
                                        handler.emit_err(Diagnostic::new(self.here(), ParserErrorKind::UnexpectedEof));
                                        return None;
                                    }
                                    Some('*') if self.eat_if('/') => break,
                                    Some(_) => {}
                                }
                            }
                        }
                        _ => return Some(self.lex_one(handler)),
                    }
                }
                _ => return Some(self.lex_one(handler)),
            }
        }
    }

    fn here(&self) -> Span {
        Span::new(self.pos, self.pos)
    }

    fn lex_one(&mut self, handler: &Handler) -> SpannedToken {
        let lo = self.pos;
        let token = self.lex_token_body(handler);
        let hi = self.pos;
        SpannedToken { token, span: Span::new(lo, hi) }
    }

    fn lex_token_body(&mut self, handler: &Handler) -> Token {
        let Some(c) = self.bump() else {
            return Token::Eof;
        };
        match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '{' => Token::LeftBrace,
            '}' => Token::RightBrace,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            ':' => Token::Colon,
            '.' => Token::Dot,
            '+' => Token::Plus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '?' => {
                if self.eat_if('?') {
                    Token::QuestionQuestion
                } else {
                    Token::Question
                }
            }
            '=' => {
                if self.eat_if('=') {
                    Token::Eq
                } else {
                    Token::Assign
                }
            }
            '!' => {
                if self.eat_if('=') {
                    Token::NotEq
                } else {
                    Token::Not
                }
            }
            '<' => {
                if self.eat_if('=') {
                    Token::LtEq
                } else if self.eat_if('-') {
                    Token::LeftArrow
                } else {
                    Token::Lt
                }
            }
            '>' => {
                if self.eat_if('=') {
                    Token::GtEq
                } else {
                    Token::Gt
                }
            }
            '-' => {
                if self.eat_if('>') {
                    Token::Arrow
                } else {
                    Token::Minus
                }
            }
            '&' => {
                if self.eat_if('&') {
                    Token::And
                } else {
                    handler.emit_err(Diagnostic::new(self.here(), ParserErrorKind::UnexpectedToken("&".to_owned())));
                    Token::And
                }
            }
            '|' => {
                if self.eat_if('|') {
                    Token::Or
                } else {
                    handler.emit_err(Diagnostic::new(self.here(), ParserErrorKind::UnexpectedToken("|".to_owned())));
                    Token::Or
                }
            }
            '"' => self.lex_string(handler),
            '0'..='9' => self.lex_number(c),
            c if c.is_alphabetic() || c == '_' => self.lex_ident_or_keyword(c),
            other => {
                handler.emit_err(Diagnostic::new(self.here(), ParserErrorKind::UnexpectedToken(other.to_string())));
                self.lex_token_body(handler)
            }
        }
    }

    fn lex_string(&mut self, handler: &Handler) -> Token {
        let mut s = String::new();
        loop {
            match self.bump() {
                Some('"') => return Token::StringLit(s),
                Some('\\') => match self.bump() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('"') => s.push('"'),
                    Some('\\') => s.push('\\'),
                    Some(other) => s.push(other),
                    None => {
                        handler.emit_err(Diagnostic::new(self.here(), ParserErrorKind::UnterminatedString));
                        return Token::StringLit(s);
                    }
                },
                Some(c) => s.push(c),
                None => {
                    handler.emit_err(Diagnostic::new(self.here(), ParserErrorKind::UnterminatedString));
                    return Token::StringLit(s);
                }
            }
        }
    }

    fn lex_number(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        if first == '0' && matches!(self.chars.peek(), Some('x') | Some('X')) {
            text.push(self.bump().unwrap());
            let mut digits = String::new();
            while let Some(&c) = self.chars.peek() {
                if c.is_ascii_hexdigit() {
                    digits.push(c);
                    self.bump();
                } else {
                    break;
                }
            }
            return Token::AddressLit(format!("0x{digits}"));
        }
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Token::Int(text, 10)
    }

    fn lex_ident_or_keyword(&mut self, first: char) -> Token {
        let mut ident = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        keyword_or_ident(&ident)
    }
}

/// Tokenizes `source` in full, collecting lexical errors into `handler`
/// instead of stopping at the first one — the same panic-mode posture
/// the parser itself uses at statement boundaries.
pub fn tokenize(source: &str, handler: &Handler) -> Vec<SpannedToken> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next_token(handler) {
        tokens.push(tok);
    }
    let eof_span = Span::new(lexer.pos, lexer.pos);
    tokens.push(SpannedToken { token: Token::Eof, span: eof_span });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use runic_span::create_session_if_not_set_then;

    fn toks(src: &str) -> Vec<Token> {
        create_session_if_not_set_then(|| {
            let handler = Handler::new();
            let tokens = tokenize(src, &handler);
            assert!(!handler.has_errors(), "unexpected lex errors for {src:?}");
            tokens.into_iter().map(|t| t.token).collect()
        })
    }

    #[test]
    fn lexes_a_simple_function_signature() {
        assert_eq!(
            toks("fun add(a: Int, b: Int) -> Int {"),
            vec![
                Token::Fun,
                Token::Ident(runic_span::Symbol::intern("add")),
                Token::LeftParen,
                Token::Ident(runic_span::Symbol::intern("a")),
                Token::Colon,
                Token::Int_,
                Token::Comma,
                Token::Ident(runic_span::Symbol::intern("b")),
                Token::Colon,
                Token::Int_,
                Token::RightParen,
                Token::Arrow,
                Token::Int_,
                Token::LeftBrace,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn distinguishes_move_arrow_from_less_than_and_minus() {
        assert_eq!(toks("<- < -"), vec![Token::LeftArrow, Token::Lt, Token::Minus, Token::Eof]);
    }

    #[test]
    fn skips_comments() {
        assert_eq!(toks("1 // trailing\n/* block */ 2"), vec![Token::Int("1".into(), 10), Token::Int("2".into(), 10), Token::Eof]);
    }

    #[test]
    fn lexes_as_question_as_two_tokens() {
        assert_eq!(toks("x as? Int"), vec![Token::Ident(runic_span::Symbol::intern("x")), Token::As, Token::Question, Token::Int_, Token::Eof]);
    }

    #[test]
    fn lexes_hex_address_literals() {
        assert_eq!(toks("0x1a"), vec![Token::AddressLit("0x1a".into()), Token::Eof]);
    }

    #[test]
    fn unterminated_string_is_reported_not_panicked() {
        create_session_if_not_set_then(|| {
            let handler = Handler::new();
            let _ = tokenize("\"abc", &handler);
            assert!(handler.has_errors());
        });
    }
}
