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

//! Expression parsing, precedence climbing from loosest to tightest:
//! ternary, `||`, `&&`, equality, relational, `??`, additive,
//! multiplicative, unary, postfix (call/member/index/`as?`), primary.
//! `??` sits between relational and additive, mirroring Swift's
//! `NilCoalescingPrecedence` (looser than addition, tighter than
//! comparison) — the closest ancestor this language has, being
//! resource-oriented in the same family as Cadence.

use crate::context::ParserContext;
use crate::token::Token;
use runic_ast::{BinaryOp, Expression, ExpressionKind, Literal, UnaryOp};

impl ParserContext {
    pub fn parse_expression(&mut self) -> Expression {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> Expression {
        let test = self.parse_or();
        if self.eat(&Token::Question) {
            let then = self.parse_expression();
            self.expect(Token::Colon);
            let otherwise = self.parse_expression();
            let span = test.span.merge(otherwise.span);
            let id = self.next_id();
            return Expression::new(ExpressionKind::Conditional { test: Box::new(test), then: Box::new(then), otherwise: Box::new(otherwise) }, span, id);
        }
        test
    }

    fn parse_or(&mut self) -> Expression {
        self.parse_left_assoc(&[(Token::Or, BinaryOp::Or)], Self::parse_and)
    }

    fn parse_and(&mut self) -> Expression {
        self.parse_left_assoc(&[(Token::And, BinaryOp::And)], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Expression {
        self.parse_left_assoc(&[(Token::Eq, BinaryOp::Eq), (Token::NotEq, BinaryOp::NotEq)], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> Expression {
        self.parse_left_assoc(
            &[(Token::Lt, BinaryOp::Lt), (Token::LtEq, BinaryOp::LtEq), (Token::Gt, BinaryOp::Gt), (Token::GtEq, BinaryOp::GtEq)],
            Self::parse_nil_coalesce,
        )
    }

    fn parse_nil_coalesce(&mut self) -> Expression {
        self.parse_left_assoc(&[(Token::QuestionQuestion, BinaryOp::NilCoalesce)], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Expression {
        self.parse_left_assoc(&[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Expression {
        self.parse_left_assoc(&[(Token::Star, BinaryOp::Mul), (Token::Slash, BinaryOp::Div), (Token::Percent, BinaryOp::Mod)], Self::parse_unary)
    }

    fn parse_left_assoc(&mut self, ops: &[(Token, BinaryOp)], mut next: impl FnMut(&mut Self) -> Expression) -> Expression {
        let mut left = next(self);
        loop {
            let Some(op) = ops.iter().find(|(tok, _)| self.check(tok)).map(|(_, op)| *op) else { break };
            self.bump();
            let right = next(self);
            let span = left.span.merge(right.span);
            let id = self.next_id();
            left = Expression::new(ExpressionKind::Binary { op, left: Box::new(left), right: Box::new(right) }, span, id);
        }
        left
    }

    fn parse_unary(&mut self) -> Expression {
        let op = match self.token() {
            Token::Not => Some(UnaryOp::Not),
            Token::Minus => Some(UnaryOp::Negate),
            _ => None,
        };
        match op {
            Some(op) => {
                let lo = self.span();
                self.bump();
                let operand = self.parse_unary();
                let span = lo.merge(operand.span);
                let id = self.next_id();
                Expression::new(ExpressionKind::Unary { op, operand: Box::new(operand) }, span, id)
            }
            None => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Expression {
        let mut pending_move = self.eat(&Token::Create);
        let mut expr = self.parse_primary();
        loop {
            expr = match self.token() {
                Token::Dot => {
                    self.bump();
                    let member = self.expect_ident();
                    let span = expr.span.merge(member.span);
                    let id = self.next_id();
                    Expression::new(ExpressionKind::Member { base: Box::new(expr), member }, span, id)
                }
                Token::LeftBracket => {
                    self.bump();
                    let index = self.parse_expression();
                    self.expect(Token::RightBracket);
                    let span = expr.span.merge(self.prev_span());
                    let id = self.next_id();
                    Expression::new(ExpressionKind::Index { base: Box::new(expr), index: Box::new(index) }, span, id)
                }
                Token::LeftParen => {
                    let arguments = self.parse_paren_list(Self::parse_expression);
                    let span = expr.span.merge(self.prev_span());
                    let id = self.next_id();
                    let is_move = std::mem::take(&mut pending_move);
                    Expression::new(ExpressionKind::Invocation { callee: Box::new(expr), arguments, is_move }, span, id)
                }
                Token::As if self.look_ahead(1, |t| *t == Token::Question) => {
                    self.bump();
                    self.bump();
                    let target = self.parse_type();
                    let span = expr.span.merge(target.span);
                    let id = self.next_id();
                    Expression::new(ExpressionKind::FailableDowncast { value: Box::new(expr), target }, span, id)
                }
                _ => break,
            };
        }
        expr
    }

    fn parse_primary(&mut self) -> Expression {
        let lo = self.span();
        let id = self.next_id();
        match self.token().clone() {
            Token::Ident(name) => {
                self.bump();
                Expression::new(ExpressionKind::Identifier(runic_ast::Identifier::new(name, lo)), lo, id)
            }
            Token::SelfKw => {
                self.bump();
                Expression::new(ExpressionKind::Identifier(runic_ast::Identifier::new(runic_span::Symbol::intern("self"), lo)), lo, id)
            }
            Token::Int(text, base) => {
                self.bump();
                Expression::new(ExpressionKind::Literal(Literal::Integer { text, base }), lo, id)
            }
            Token::StringLit(s) => {
                self.bump();
                Expression::new(ExpressionKind::Literal(Literal::String(s)), lo, id)
            }
            Token::True => {
                self.bump();
                Expression::new(ExpressionKind::Literal(Literal::Bool(true)), lo, id)
            }
            Token::False => {
                self.bump();
                Expression::new(ExpressionKind::Literal(Literal::Bool(false)), lo, id)
            }
            Token::Nil => {
                self.bump();
                Expression::new(ExpressionKind::Literal(Literal::Nil), lo, id)
            }
            Token::Before => {
                self.bump();
                self.expect(Token::LeftParen);
                let inner = self.parse_expression();
                self.expect(Token::RightParen);
                let span = lo.merge(self.prev_span());
                Expression::new(ExpressionKind::Before(Box::new(inner)), span, id)
            }
            Token::LeftParen => {
                self.bump();
                let inner = self.parse_expression();
                self.expect(Token::RightParen);
                inner
            }
            Token::LeftBracket => {
                self.bump();
                let mut elements = Vec::new();
                while !self.check(&Token::RightBracket) && !self.at_eof() {
                    elements.push(self.parse_expression());
                    if !self.eat(&Token::Comma) {
                        break;
                    }
                }
                self.expect(Token::RightBracket);
                let span = lo.merge(self.prev_span());
                Expression::new(ExpressionKind::Literal(Literal::Array(elements)), span, id)
            }
            Token::LeftBrace => {
                self.bump();
                let mut entries = Vec::new();
                while !self.check(&Token::RightBrace) && !self.at_eof() {
                    let key = self.parse_expression();
                    self.expect(Token::Colon);
                    let value = self.parse_expression();
                    entries.push((key, value));
                    if !self.eat(&Token::Comma) {
                        break;
                    }
                }
                self.expect(Token::RightBrace);
                let span = lo.merge(self.prev_span());
                Expression::new(ExpressionKind::Literal(Literal::Dictionary(entries)), span, id)
            }
            Token::Fun => {
                self.bump();
                let parameters = self.parse_parameter_list();
                let return_type = if self.eat(&Token::Arrow) { Some(self.parse_type()) } else { None };
                let body = self.parse_block();
                let span = lo.merge(body.span);
                Expression::new(ExpressionKind::FunctionLiteral { parameters, return_type, body }, span, id)
            }
            _ => {
                self.unexpected("an expression");
                self.bump();
                Expression::new(ExpressionKind::Literal(Literal::Nil), lo, id)
            }
        }
    }
}
