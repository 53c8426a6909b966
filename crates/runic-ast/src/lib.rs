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

//! The immutable AST produced by `runic-parser` and consumed by
//! `runic-checker`. See spec.md §3.2.

pub mod access;
pub mod decl;
pub mod expression;
pub mod node;
pub mod program;
pub mod statement;
pub mod type_annotation;

pub use access::Access;
pub use decl::{
    CompositeDeclaration, CompositeKind, Condition, Conditions, Declaration, FieldDeclaration, FunctionDeclaration,
    ImportDeclaration, InterfaceDeclaration, InterfaceFunctionRequirement, Parameter, TransactionDeclaration,
    VariableDeclaration, VariableKind,
};
pub use expression::{BinaryOp, Expression, ExpressionKind, Literal, UnaryOp};
pub use node::{Node, NodeID};
pub use program::Program;
pub use statement::{Block, ElseClause, IfStatement, IfTest, Statement, StatementKind};
pub use type_annotation::{TypeAnnotation, TypeAnnotationKind};

use runic_span::Symbol;

/// An identifier occurrence: an interned name plus its span.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identifier {
    pub name: Symbol,
    pub span: runic_span::Span,
}

impl Identifier {
    pub fn new(name: impl Into<Symbol>, span: runic_span::Span) -> Self {
        Self { name: name.into(), span }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
