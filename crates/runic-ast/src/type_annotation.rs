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

use crate::{simple_node_impl, Identifier, NodeID};
use runic_span::Span;

/// A type as written in source, before name resolution turns it into a
/// `runic_types::Type`. Kept distinct from the resolved type the way
/// the teacher keeps `leo_ast::Type` (syntactic) separate from any
/// later-resolved representation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeAnnotationKind {
    Bool,
    Int,
    String,
    Address,
    Void,
    Optional(Box<TypeAnnotation>),
    /// `Array(element, Some(len))` for a fixed-size array, `None` for
    /// a variable-size one.
    Array(Box<TypeAnnotation>, Option<u64>),
    Dictionary(Box<TypeAnnotation>, Box<TypeAnnotation>),
    AnyStruct,
    AnyResource,
    /// A reference to a user-declared composite or interface type by
    /// name; resolved to a concrete type ID by the checker.
    Named(Identifier),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeAnnotation {
    pub kind: TypeAnnotationKind,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TypeAnnotation);
