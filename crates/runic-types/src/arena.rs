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

use crate::ty::{FunctionSignature, Type};
use indexmap::IndexMap;
use runic_ast::CompositeKind;
use runic_span::Symbol;

/// An index into a [`TypeArena`]. Read-only after checker start-up
/// (spec.md §5 "Shared resources").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIndex(pub u32);

#[derive(Clone, Debug)]
pub struct FunctionType {
    pub access: runic_ast::Access,
    pub signature: FunctionSignature,
}

/// The full declaration behind a `Type::Composite` index: fields in
/// declaration order, methods, and the interfaces it declares
/// conformance to.
#[derive(Clone, Debug)]
pub struct CompositeType {
    pub type_id: String,
    pub kind: CompositeKind,
    pub fields: IndexMap<Symbol, Type>,
    pub functions: IndexMap<Symbol, FunctionType>,
    pub conformances: Vec<TypeIndex>,
}

#[derive(Clone, Debug)]
pub struct InterfaceType {
    pub type_id: String,
    pub kind: CompositeKind,
    pub fields: IndexMap<Symbol, (runic_ast::Access, Type)>,
    pub functions: IndexMap<Symbol, FunctionType>,
}

enum Entry {
    Composite(CompositeType),
    Interface(InterfaceType),
    /// A cyclic declaration that has not finished resolving yet.
    Checking,
}

/// Interns every user-defined composite/interface type by type ID, the
/// way spec.md §9 asks: "an arena of types keyed by type ID with
/// indirection through integer indices."
#[derive(Default)]
pub struct TypeArena {
    entries: Vec<Entry>,
    by_id: IndexMap<String, TypeIndex>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a slot for `type_id`, returning its index immediately
    /// so self-referential fields can be represented before the
    /// declaration finishes resolving (the `Checking` placeholder).
    pub fn reserve(&mut self, type_id: String) -> TypeIndex {
        if let Some(&idx) = self.by_id.get(&type_id) {
            return idx;
        }
        let idx = TypeIndex(self.entries.len() as u32);
        self.entries.push(Entry::Checking);
        self.by_id.insert(type_id, idx);
        idx
    }

    pub fn lookup(&self, type_id: &str) -> Option<TypeIndex> {
        self.by_id.get(type_id).copied()
    }

    pub fn is_checking(&self, idx: TypeIndex) -> bool {
        matches!(self.entries[idx.0 as usize], Entry::Checking)
    }

    pub fn resolve_composite(&mut self, idx: TypeIndex, composite: CompositeType) {
        self.entries[idx.0 as usize] = Entry::Composite(composite);
    }

    pub fn resolve_interface(&mut self, idx: TypeIndex, interface: InterfaceType) {
        self.entries[idx.0 as usize] = Entry::Interface(interface);
    }

    pub fn composite(&self, idx: TypeIndex) -> Option<&CompositeType> {
        match &self.entries[idx.0 as usize] {
            Entry::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub fn interface(&self, idx: TypeIndex) -> Option<&InterfaceType> {
        match &self.entries[idx.0 as usize] {
            Entry::Interface(i) => Some(i),
            _ => None,
        }
    }

    pub fn kind_of(&self, idx: TypeIndex) -> Option<CompositeKind> {
        match &self.entries[idx.0 as usize] {
            Entry::Composite(c) => Some(c.kind),
            Entry::Interface(i) => Some(i.kind),
            Entry::Checking => None,
        }
    }

    pub fn type_id_of(&self, idx: TypeIndex) -> Option<&str> {
        match &self.entries[idx.0 as usize] {
            Entry::Composite(c) => Some(&c.type_id),
            Entry::Interface(i) => Some(&i.type_id),
            Entry::Checking => None,
        }
    }

    /// A human-readable rendering of `ty`, resolving composite/interface
    /// indices to their type IDs (`Type`'s own `Display` cannot do this
    /// since it has no arena access).
    pub fn display(&self, ty: &Type) -> String {
        match ty {
            Type::Optional(inner) => format!("{}?", self.display(inner)),
            Type::Array(inner, Some(n)) => format!("[{}; {n}]", self.display(inner)),
            Type::Array(inner, None) => format!("[{}]", self.display(inner)),
            Type::Dictionary(k, v) => format!("{{{}: {}}}", self.display(k), self.display(v)),
            Type::Composite(idx) | Type::Interface(idx) => {
                self.type_id_of(*idx).map(|s| s.to_owned()).unwrap_or_else(|| "<unresolved>".to_owned())
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_is_idempotent_for_cyclic_declarations() {
        let mut arena = TypeArena::new();
        let idx1 = arena.reserve("0x1.Node".to_owned());
        assert!(arena.is_checking(idx1));
        let idx2 = arena.reserve("0x1.Node".to_owned());
        assert_eq!(idx1, idx2);

        arena.resolve_composite(
            idx1,
            CompositeType {
                type_id: "0x1.Node".to_owned(),
                kind: CompositeKind::Resource,
                fields: IndexMap::new(),
                functions: IndexMap::new(),
                conformances: Vec::new(),
            },
        );
        assert!(!arena.is_checking(idx1));
    }
}
