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

//! The token cursor every `parse_*` method rides on, grounded on the
//! teacher's `ParserContext`: a current/previous token pair, `bump`,
//! `check`/`eat`/`expect`, and `look_ahead`. Unlike the teacher, whose
//! `Result`-returning methods abort the whole parse on the first
//! `ParserError`, this cursor's `expect`-family methods report through
//! `handler` and return a best-effort placeholder so a caller at a
//! statement boundary can recover and keep going (spec.md's
//! error-recovery requirement for a standalone tool, rather than the
//! teacher's single-shot CLI compile).

use crate::token::{SpannedToken, Token};
use runic_ast::NodeID;
use runic_errors::{Diagnostic, Handler, ParserErrorKind};
use runic_span::{Span, Symbol};

pub struct ParserContext {
    pub(crate) handler: Handler,
    tokens: Vec<SpannedToken>,
    pos: usize,
    next_id: NodeID,
}

impl ParserContext {
    pub fn new(tokens: Vec<SpannedToken>, handler: Handler) -> Self {
        Self { handler, tokens, pos: 0, next_id: 0 }
    }

    pub fn next_id(&mut self) -> NodeID {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn token(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    pub fn span(&self) -> Span {
        self.tokens[self.pos].span
    }

    pub fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    pub fn token_index(&self) -> usize {
        self.pos
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.token(), Token::Eof)
    }

    pub fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn check(&self, token: &Token) -> bool {
        self.token() == token
    }

    pub fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn look_ahead<R>(&self, dist: usize, f: impl FnOnce(&Token) -> R) -> R {
        let idx = (self.pos + dist).min(self.tokens.len() - 1);
        f(&self.tokens[idx].token)
    }

    pub fn eat_identifier(&mut self) -> Option<runic_ast::Identifier> {
        if let Token::Ident(name) = self.token().clone() {
            let span = self.span();
            self.bump();
            Some(runic_ast::Identifier::new(name, span))
        } else {
            None
        }
    }

    pub fn expect_ident(&mut self) -> runic_ast::Identifier {
        match self.eat_identifier() {
            Some(id) => id,
            None => {
                self.unexpected("an identifier");
                runic_ast::Identifier::new(Symbol::intern("<error>"), self.span())
            }
        }
    }

    /// Eats `token`, or reports `Expected` and leaves the cursor where
    /// it was so the caller's own recovery (usually skipping to the
    /// next statement boundary) takes over.
    pub fn expect(&mut self, token: Token) {
        if !self.eat(&token) {
            let found = self.token().to_string();
            self.handler.emit_err(Diagnostic::new(self.span(), ParserErrorKind::Expected { expected: token.to_string(), found }));
        }
    }

    pub fn unexpected(&mut self, expected: &str) {
        let found = self.token().to_string();
        self.handler.emit_err(Diagnostic::new(self.span(), ParserErrorKind::Expected { expected: expected.to_owned(), found }));
    }

    /// Advances past tokens until a statement boundary (`;`) or a
    /// block delimiter (`{`/`}`) is reached, without consuming the
    /// boundary token itself when it's a brace — panic-mode recovery,
    /// spec.md §4.3 "Error strategy". The caller decides what to do
    /// with the boundary (e.g. `bump` past a `;`, or let a block
    /// parser's own `}` check fire).
    pub fn recover_to_statement_boundary(&mut self) {
        while !self.at_eof() {
            match self.token() {
                Token::Semicolon => {
                    self.bump();
                    return;
                }
                Token::RightBrace | Token::LeftBrace => return,
                _ => self.bump(),
            }
        }
    }

    /// Parses a comma-separated, paren-delimited list. `inner` is run
    /// for each element; on error it should already have emitted a
    /// diagnostic and returned a placeholder so the list stays well-formed.
    pub fn parse_paren_list<T>(&mut self, mut inner: impl FnMut(&mut Self) -> T) -> Vec<T> {
        self.expect(Token::LeftParen);
        let mut items = Vec::new();
        while !self.check(&Token::RightParen) && !self.at_eof() {
            items.push(inner(self));
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen);
        items
    }

    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.handler.into_errors()
    }
}
