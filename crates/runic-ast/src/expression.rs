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

use crate::{simple_node_impl, Identifier, NodeID, Parameter, TypeAnnotation};
use runic_span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    NilCoalesce,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnaryOp {
    Negate,
    Not,
}

/// Literal forms, spec.md §3.2. Integer literals keep their base so
/// the checker/interpreter can reject malformed-base issues raised by
/// the lexer; malformed numerics are surfaced by the parser as
/// `InvalidNumberLiteral` before this node is ever constructed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Literal {
    Integer { text: String, base: u32 },
    String(String),
    Bool(bool),
    Nil,
    Array(Vec<Expression>),
    Dictionary(Vec<(Expression, Expression)>),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExpressionKind {
    Identifier(Identifier),
    Literal(Literal),
    Binary { op: BinaryOp, left: Box<Expression>, right: Box<Expression> },
    Unary { op: UnaryOp, operand: Box<Expression> },
    Conditional { test: Box<Expression>, then: Box<Expression>, otherwise: Box<Expression> },
    Member { base: Box<Expression>, member: Identifier },
    Index { base: Box<Expression>, index: Box<Expression> },
    Invocation { callee: Box<Expression>, arguments: Vec<Expression>, is_move: bool },
    FunctionLiteral { parameters: Vec<Parameter>, return_type: Option<TypeAnnotation>, body: crate::statement::Block },
    /// `expr as? T` — spec.md §3.2 "failable downcast".
    FailableDowncast { value: Box<Expression>, target: TypeAnnotation },
    /// `before(expr)` inside a `post` condition.
    Before(Box<Expression>),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(Expression);

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span, id: NodeID) -> Self {
        Self { kind, span, id }
    }
}
