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

//! A syntactic reading of a [`TypeAnnotationKind`] into the boxing
//! shape `runic_value::boxing` cares about: optional nesting depth and
//! the `AnyStruct`/`AnyResource` tags. Named composite types collapse
//! to `Type::Checking` here — boxing never inspects a composite's
//! identity, only whether it's an optional or an any-type, so a full
//! arena lookup would buy nothing at an evaluation site that has
//! neither a `GlobalScope` nor a resolved-type map on hand.

use indexmap::IndexMap;
use runic_ast::TypeAnnotationKind;
use runic_span::Symbol;
use runic_types::{Type, TypeArena, TypeIndex};

/// Resolves a `Named` annotation against the checker's own name table
/// (carried on `CheckedProgram::type_names`) so it lands on the same
/// `Type::Composite`/`Type::Interface` index the checker itself used —
/// not a guess, a replay of name resolution with the table it produced.
pub fn annotation_shape(kind: &TypeAnnotationKind, type_names: &IndexMap<Symbol, TypeIndex>, arena: &TypeArena) -> Type {
    match kind {
        TypeAnnotationKind::Bool => Type::Bool,
        TypeAnnotationKind::Int => Type::Int,
        TypeAnnotationKind::String => Type::String,
        TypeAnnotationKind::Address => Type::Address,
        TypeAnnotationKind::Void => Type::Void,
        TypeAnnotationKind::Optional(inner) => Type::Optional(Box::new(annotation_shape(&inner.kind, type_names, arena))),
        TypeAnnotationKind::Array(inner, len) => Type::Array(Box::new(annotation_shape(&inner.kind, type_names, arena)), *len),
        TypeAnnotationKind::Dictionary(key, value) => {
            Type::Dictionary(Box::new(annotation_shape(&key.kind, type_names, arena)), Box::new(annotation_shape(&value.kind, type_names, arena)))
        }
        TypeAnnotationKind::AnyStruct => Type::AnyStruct,
        TypeAnnotationKind::AnyResource => Type::AnyResource,
        TypeAnnotationKind::Named(id) => match type_names.get(&id.name) {
            Some(&idx) if arena.composite(idx).is_some() => Type::Composite(idx),
            Some(&idx) => Type::Interface(idx),
            None => Type::Checking,
        },
    }
}
