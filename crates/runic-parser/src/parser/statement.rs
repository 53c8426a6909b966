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

//! Statement and block parsing. A statement-level error recovers by
//! skipping to the next `;` (or the block's closing `}`) rather than
//! aborting the whole parse, per spec.md §4.3 "Error strategy" — every
//! `parse_statement` call site is already inside a loop bounded by
//! `}`, so a dropped statement just shrinks the block instead of
//! losing the rest of the program.

use crate::context::ParserContext;
use crate::token::Token;
use runic_ast::{Access, Block, ElseClause, Expression, IfStatement, IfTest, Statement, StatementKind, VariableDeclaration, VariableKind};

impl ParserContext {
    pub fn parse_block(&mut self) -> Block {
        let lo = self.span();
        let id = self.next_id();
        self.expect(Token::LeftBrace);
        let mut statements = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            statements.push(self.parse_statement());
        }
        self.expect(Token::RightBrace);
        let span = lo.merge(self.prev_span());
        Block { statements, span, id }
    }

    pub fn parse_statement(&mut self) -> Statement {
        let lo = self.span();
        let id = self.next_id();
        let kind = match self.token() {
            Token::Return => {
                self.bump();
                let value = if self.check(&Token::Semicolon) { None } else { Some(self.parse_expression()) };
                self.expect(Token::Semicolon);
                StatementKind::Return(value)
            }
            Token::Break => {
                self.bump();
                self.expect(Token::Semicolon);
                StatementKind::Break
            }
            Token::Continue => {
                self.bump();
                self.expect(Token::Semicolon);
                StatementKind::Continue
            }
            Token::If => {
                let stmt = self.parse_if();
                let span = stmt.span;
                return Statement { kind: StatementKind::If(stmt), span, id };
            }
            Token::While => {
                self.bump();
                self.expect(Token::LeftParen);
                let test = self.parse_expression();
                self.expect(Token::RightParen);
                let body = self.parse_block();
                StatementKind::While { test, body }
            }
            Token::Let | Token::Var => {
                let decl = self.parse_variable_declaration(Access::NotSpecified);
                self.expect(Token::Semicolon);
                StatementKind::VariableDeclaration(decl)
            }
            Token::Emit => {
                self.bump();
                let event = self.expect_ident();
                let arguments = self.parse_paren_list(Self::parse_expression);
                self.expect(Token::Semicolon);
                StatementKind::Emit { event, arguments }
            }
            _ => {
                let expr = self.parse_expression();
                self.parse_expression_statement_tail(expr)
            }
        };
        let span = lo.merge(self.prev_span());
        Statement { kind, span, id }
    }

    /// Having already parsed a leading expression, decides whether
    /// this is a plain expression statement or the start of an
    /// assignment (`target = value;` / `target <- value;`).
    fn parse_expression_statement_tail(&mut self, expr: Expression) -> StatementKind {
        if self.check(&Token::Assign) || self.check(&Token::LeftArrow) {
            let is_move = self.check(&Token::LeftArrow);
            self.bump();
            let value = self.parse_expression();
            self.expect(Token::Semicolon);
            StatementKind::Assignment { target: expr, value, is_move }
        } else {
            self.expect(Token::Semicolon);
            StatementKind::Expression(expr)
        }
    }

    fn parse_if(&mut self) -> IfStatement {
        let lo = self.span();
        let id = self.next_id();
        self.expect(Token::If);
        let test = if matches!(self.token(), Token::Let | Token::Var) {
            let kind = if self.eat(&Token::Var) { VariableKind::Var } else { self.bump(); VariableKind::Let };
            let name = self.expect_ident();
            self.expect(Token::Assign);
            let value = self.parse_expression();
            IfTest::Binding { kind, name, value }
        } else {
            IfTest::Expression(self.parse_expression())
        };
        let then = self.parse_block();
        let otherwise = if self.eat(&Token::Else) {
            if self.check(&Token::If) {
                Some(ElseClause::If(Box::new(self.parse_if())))
            } else {
                Some(ElseClause::Block(self.parse_block()))
            }
        } else {
            None
        };
        let span = lo.merge(otherwise.as_ref().map(|e| match e {
            ElseClause::Block(b) => b.span,
            ElseClause::If(i) => i.span,
        }).unwrap_or(then.span));
        IfStatement { test, then, otherwise, span, id }
    }

    pub fn parse_variable_declaration(&mut self, access: Access) -> VariableDeclaration {
        let lo = self.span();
        let id = self.next_id();
        let kind = if self.eat(&Token::Let) {
            VariableKind::Let
        } else {
            self.expect(Token::Var);
            VariableKind::Var
        };
        let name = self.expect_ident();
        let annotated_type = if self.eat(&Token::Colon) { Some(self.parse_type()) } else { None };
        let is_move = if self.eat(&Token::Assign) {
            false
        } else {
            self.expect(Token::LeftArrow);
            true
        };
        let value = self.parse_expression();
        let span = lo.merge(value.span);
        VariableDeclaration { kind, access, name, annotated_type, value, is_move, span, id }
    }
}

