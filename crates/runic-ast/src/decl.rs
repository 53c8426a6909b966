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

use crate::{simple_node_impl, statement::Block, Access, Expression, Identifier, NodeID, TypeAnnotation};
use runic_span::{Location, Span};

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VariableKind {
    Let,
    Var,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub access: Access,
    pub name: Identifier,
    pub annotated_type: Option<TypeAnnotation>,
    pub value: Expression,
    pub is_move: bool,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(VariableDeclaration);

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    pub name: Identifier,
    pub annotated_type: TypeAnnotation,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(Parameter);

/// A `pre`/`post` condition: a side-effect-free boolean expression and
/// an optional message shown on failure, spec.md §4.3.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Condition {
    pub test: Expression,
    pub message: Option<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Conditions {
    pub pre: Vec<Condition>,
    pub post: Vec<Condition>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FunctionDeclaration {
    pub access: Access,
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub conditions: Conditions,
    pub body: Block,
    /// `true` for a composite method whose first implicit parameter is
    /// `self`.
    pub has_self: bool,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(FunctionDeclaration);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CompositeKind {
    Structure,
    Resource,
    Contract,
    Event,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldDeclaration {
    pub access: Access,
    pub kind: VariableKind,
    pub name: Identifier,
    pub annotated_type: TypeAnnotation,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(FieldDeclaration);

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompositeDeclaration {
    pub kind: CompositeKind,
    pub access: Access,
    pub name: Identifier,
    pub conformances: Vec<Identifier>,
    pub fields: Vec<FieldDeclaration>,
    pub functions: Vec<FunctionDeclaration>,
    /// Present for structures/resources/contracts; absent for events
    /// (which have no user-written constructor, only a field list).
    pub initializer: Option<FunctionDeclaration>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(CompositeDeclaration);

impl CompositeDeclaration {
    pub fn type_id(&self, location: &Location) -> String {
        format!("{}.{}", location, self.name.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InterfaceFunctionRequirement {
    pub access: Access,
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(InterfaceFunctionRequirement);

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InterfaceDeclaration {
    pub kind: CompositeKind,
    pub access: Access,
    pub name: Identifier,
    pub fields: Vec<FieldDeclaration>,
    pub functions: Vec<InterfaceFunctionRequirement>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(InterfaceDeclaration);

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportDeclaration {
    pub location: String,
    pub names: Option<Vec<Identifier>>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ImportDeclaration);

/// The single entry point of a transaction program, spec.md §4.3
/// "Top-level restrictions".
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionDeclaration {
    pub parameters: Vec<Parameter>,
    pub conditions: Conditions,
    pub body: Block,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TransactionDeclaration);

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Declaration {
    Import(ImportDeclaration),
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
    Composite(CompositeDeclaration),
    Interface(InterfaceDeclaration),
    Transaction(TransactionDeclaration),
}

impl Declaration {
    pub fn span(&self) -> Span {
        match self {
            Declaration::Import(d) => d.span,
            Declaration::Variable(d) => d.span,
            Declaration::Function(d) => d.span,
            Declaration::Composite(d) => d.span,
            Declaration::Interface(d) => d.span,
            Declaration::Transaction(d) => d.span,
        }
    }
}
