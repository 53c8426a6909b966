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

use crate::context::ParserContext;
use crate::token::Token;
use runic_ast::{TypeAnnotation, TypeAnnotationKind};

impl ParserContext {
    /// `base_type '?'*` — each trailing `?` wraps one more `Optional`
    /// layer around the base, spec.md §3.2.
    pub fn parse_type(&mut self) -> TypeAnnotation {
        let mut ty = self.parse_base_type();
        while self.eat(&Token::Question) {
            let id = self.next_id();
            let span = ty.span.merge(self.prev_span());
            ty = TypeAnnotation { kind: TypeAnnotationKind::Optional(Box::new(ty)), span, id };
        }
        ty
    }

    fn parse_base_type(&mut self) -> TypeAnnotation {
        let lo = self.span();
        let id = self.next_id();
        let kind = match self.token().clone() {
            Token::Bool => {
                self.bump();
                TypeAnnotationKind::Bool
            }
            Token::Int_ => {
                self.bump();
                TypeAnnotationKind::Int
            }
            Token::String_ => {
                self.bump();
                TypeAnnotationKind::String
            }
            Token::Address => {
                self.bump();
                TypeAnnotationKind::Address
            }
            Token::Void => {
                self.bump();
                TypeAnnotationKind::Void
            }
            Token::AnyStruct => {
                self.bump();
                TypeAnnotationKind::AnyStruct
            }
            Token::AnyResource => {
                self.bump();
                TypeAnnotationKind::AnyResource
            }
            Token::LeftBracket => {
                self.bump();
                let element = self.parse_type();
                let length = if self.eat(&Token::Semicolon) {
                    match self.token().clone() {
                        Token::Int(text, _) => {
                            self.bump();
                            text.parse::<u64>().ok()
                        }
                        _ => {
                            self.unexpected("an array length");
                            None
                        }
                    }
                } else {
                    None
                };
                self.expect(Token::RightBracket);
                TypeAnnotationKind::Array(Box::new(element), length)
            }
            Token::LeftBrace => {
                self.bump();
                let key = self.parse_type();
                self.expect(Token::Colon);
                let value = self.parse_type();
                self.expect(Token::RightBrace);
                TypeAnnotationKind::Dictionary(Box::new(key), Box::new(value))
            }
            Token::Ident(_) => {
                let name = self.expect_ident();
                TypeAnnotationKind::Named(name)
            }
            _ => {
                self.unexpected("a type");
                self.bump();
                TypeAnnotationKind::Void
            }
        };
        let span = lo.merge(self.prev_span());
        TypeAnnotation { kind, span, id }
    }
}
