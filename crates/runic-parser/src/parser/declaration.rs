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

//! Top-level declarations: imports, functions, composites (structures,
//! resources, contracts, events), interfaces, and the single
//! transaction entry point of a transaction program, spec.md §4.3.

use crate::context::ParserContext;
use crate::token::Token;
use runic_ast::{
    Access, CompositeDeclaration, CompositeKind, Conditions, Declaration, FieldDeclaration, FunctionDeclaration, ImportDeclaration,
    InterfaceDeclaration, InterfaceFunctionRequirement, Parameter, Program, TransactionDeclaration, VariableKind,
};

impl ParserContext {
    pub fn parse_program(&mut self) -> Program {
        let mut declarations = Vec::new();
        while !self.at_eof() {
            let before = self.token_index();
            declarations.push(self.parse_declaration());
            if self.token_index() == before {
                // No token was consumed parsing that declaration (a
                // thoroughly unrecognized leading token): force
                // progress so a malformed top-level item can't spin
                // the loop forever.
                self.recover_to_statement_boundary();
                if self.token_index() == before {
                    self.bump();
                }
            }
        }
        Program::new(declarations)
    }

    fn parse_access(&mut self) -> Access {
        if self.eat(&Token::Priv) {
            Access::Private
        } else if self.eat(&Token::Auth) {
            Access::Authorized
        } else if self.eat(&Token::Pub) {
            if self.eat(&Token::LeftParen) {
                self.expect(Token::Set);
                self.expect(Token::RightParen);
                Access::PublicSettable
            } else {
                Access::Public
            }
        } else {
            Access::NotSpecified
        }
    }

    fn parse_declaration(&mut self) -> Declaration {
        match self.token() {
            Token::Import => Declaration::Import(self.parse_import()),
            Token::Transaction => Declaration::Transaction(self.parse_transaction()),
            Token::Interface => Declaration::Interface(self.parse_interface()),
            Token::Struct | Token::Resource | Token::Contract | Token::Event => Declaration::Composite(self.parse_composite(Access::NotSpecified)),
            Token::Let | Token::Var => {
                let decl = self.parse_variable_declaration(Access::NotSpecified);
                self.expect(Token::Semicolon);
                Declaration::Variable(decl)
            }
            Token::Fun => Declaration::Function(self.parse_function(Access::NotSpecified, false)),
            Token::Priv | Token::Auth | Token::Pub => {
                let access = self.parse_access();
                match self.token() {
                    Token::Fun => Declaration::Function(self.parse_function(access, false)),
                    Token::Struct | Token::Resource | Token::Contract | Token::Event => Declaration::Composite(self.parse_composite(access)),
                    Token::Let | Token::Var => {
                        let decl = self.parse_variable_declaration(access);
                        self.expect(Token::Semicolon);
                        Declaration::Variable(decl)
                    }
                    _ => {
                        self.unexpected("a declaration");
                        Declaration::Function(self.parse_function(access, false))
                    }
                }
            }
            _ => {
                self.unexpected("a declaration");
                // Recovery happens in `parse_program`'s caller; return a
                // minimal, well-formed placeholder so the rest of the
                // type stays sound.
                Declaration::Import(ImportDeclaration { location: String::new(), names: None, span: self.span(), id: self.next_id() })
            }
        }
    }

    fn parse_import(&mut self) -> ImportDeclaration {
        let lo = self.span();
        let id = self.next_id();
        self.expect(Token::Import);
        let location = match self.token().clone() {
            Token::StringLit(s) => {
                self.bump();
                s
            }
            _ => {
                self.unexpected("an import path");
                String::new()
            }
        };
        let names = if self.eat(&Token::LeftBrace) {
            let mut names = Vec::new();
            while !self.check(&Token::RightBrace) && !self.at_eof() {
                names.push(self.expect_ident());
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
            self.expect(Token::RightBrace);
            Some(names)
        } else {
            None
        };
        self.expect(Token::Semicolon);
        let span = lo.merge(self.prev_span());
        ImportDeclaration { location, names, span, id }
    }

    pub(crate) fn parse_parameter_list(&mut self) -> Vec<Parameter> {
        self.parse_paren_list(Self::parse_parameter)
    }

    fn parse_parameter(&mut self) -> Parameter {
        let lo = self.span();
        let id = self.next_id();
        let name = self.expect_ident();
        self.expect(Token::Colon);
        let annotated_type = self.parse_type();
        let span = lo.merge(annotated_type.span);
        Parameter { name, annotated_type, span, id }
    }

    fn parse_conditions(&mut self) -> Conditions {
        let mut conditions = Conditions::default();
        if self.eat(&Token::Pre) {
            conditions.pre = self.parse_condition_block();
        }
        if self.eat(&Token::Post) {
            conditions.post = self.parse_condition_block();
        }
        conditions
    }

    fn parse_condition_block(&mut self) -> Vec<runic_ast::Condition> {
        self.expect(Token::LeftBrace);
        let mut conditions = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            let lo = self.span();
            let test = self.parse_expression();
            let message = if self.eat(&Token::Colon) { Some(self.parse_expression()) } else { None };
            self.expect(Token::Semicolon);
            let span = lo.merge(self.prev_span());
            conditions.push(runic_ast::Condition { test, message, span });
        }
        self.expect(Token::RightBrace);
        conditions
    }

    fn parse_function(&mut self, access: Access, has_self: bool) -> FunctionDeclaration {
        let lo = self.span();
        let id = self.next_id();
        self.expect(Token::Fun);
        let name = self.expect_ident();
        let parameters = self.parse_parameter_list();
        let return_type = if self.eat(&Token::Arrow) { Some(self.parse_type()) } else { None };
        let conditions = self.parse_conditions();
        let body = self.parse_block();
        let span = lo.merge(body.span);
        FunctionDeclaration { access, name, parameters, return_type, conditions, body, has_self, span, id }
    }

    fn parse_composite(&mut self, access: Access) -> CompositeDeclaration {
        let lo = self.span();
        let id = self.next_id();
        let kind = match self.token() {
            Token::Struct => CompositeKind::Structure,
            Token::Resource => CompositeKind::Resource,
            Token::Contract => CompositeKind::Contract,
            Token::Event => CompositeKind::Event,
            _ => unreachable!("parse_composite only called when one of these tokens is current"),
        };
        self.bump();
        let name = self.expect_ident();
        let conformances = if self.eat(&Token::Colon) {
            let mut names = vec![self.expect_ident()];
            while self.eat(&Token::Comma) {
                names.push(self.expect_ident());
            }
            names
        } else {
            Vec::new()
        };
        self.expect(Token::LeftBrace);
        let mut fields = Vec::new();
        let mut functions = Vec::new();
        let mut initializer = None;
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            let field_access = self.parse_access();
            match self.token() {
                Token::Fun => functions.push(self.parse_function(field_access, true)),
                Token::Ident(name) if name.as_str() == "init" => {
                    initializer = Some(self.parse_initializer(field_access));
                }
                Token::Let | Token::Var => fields.push(self.parse_field(field_access)),
                _ => {
                    self.unexpected("a field, function, or initializer");
                    self.recover_to_statement_boundary();
                }
            }
        }
        self.expect(Token::RightBrace);
        let span = lo.merge(self.prev_span());
        CompositeDeclaration { kind, access, name, conformances, fields, functions, initializer, span, id }
    }

    fn parse_field(&mut self, access: Access) -> FieldDeclaration {
        let lo = self.span();
        let id = self.next_id();
        let kind = if self.eat(&Token::Var) { VariableKind::Var } else { self.expect(Token::Let); VariableKind::Let };
        let name = self.expect_ident();
        self.expect(Token::Colon);
        let annotated_type = self.parse_type();
        self.expect(Token::Semicolon);
        let span = lo.merge(self.prev_span());
        FieldDeclaration { access, kind, name, annotated_type, span, id }
    }

    fn parse_initializer(&mut self, access: Access) -> FunctionDeclaration {
        let lo = self.span();
        let id = self.next_id();
        let name = self.expect_ident();
        let parameters = self.parse_parameter_list();
        let conditions = self.parse_conditions();
        let body = self.parse_block();
        let span = lo.merge(body.span);
        FunctionDeclaration { access, name, parameters, return_type: None, conditions, body, has_self: true, span, id }
    }

    fn parse_interface(&mut self) -> InterfaceDeclaration {
        let lo = self.span();
        let id = self.next_id();
        self.expect(Token::Interface);
        let kind = if self.eat(&Token::Resource) {
            CompositeKind::Resource
        } else if self.eat(&Token::Contract) {
            CompositeKind::Contract
        } else {
            self.eat(&Token::Struct);
            CompositeKind::Structure
        };
        let name = self.expect_ident();
        self.expect(Token::LeftBrace);
        let mut fields = Vec::new();
        let mut functions = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            let access = self.parse_access();
            match self.token() {
                Token::Fun => functions.push(self.parse_function_requirement(access)),
                Token::Let | Token::Var => fields.push(self.parse_field(access)),
                _ => {
                    self.unexpected("a field or function requirement");
                    self.recover_to_statement_boundary();
                }
            }
        }
        self.expect(Token::RightBrace);
        let span = lo.merge(self.prev_span());
        InterfaceDeclaration { kind, access: Access::NotSpecified, name, fields, functions, span, id }
    }

    fn parse_function_requirement(&mut self, access: Access) -> InterfaceFunctionRequirement {
        let lo = self.span();
        let id = self.next_id();
        self.expect(Token::Fun);
        let name = self.expect_ident();
        let parameters = self.parse_parameter_list();
        let return_type = if self.eat(&Token::Arrow) { Some(self.parse_type()) } else { None };
        self.expect(Token::Semicolon);
        let span = lo.merge(self.prev_span());
        InterfaceFunctionRequirement { access, name, parameters, return_type, span, id }
    }

    fn parse_transaction(&mut self) -> TransactionDeclaration {
        let lo = self.span();
        let id = self.next_id();
        self.expect(Token::Transaction);
        let parameters = self.parse_parameter_list();
        let conditions = self.parse_conditions();
        let body = self.parse_block();
        let span = lo.merge(body.span);
        TransactionDeclaration { parameters, conditions, body, span, id }
    }
}
