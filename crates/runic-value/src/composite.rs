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

use indexmap::IndexMap;
use runic_span::{Location, Symbol};
use runic_types::TypeIndex;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Value;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// The identity-bearing data behind a [`Value::Composite`]. Spec.md §9
/// "Composite identity": a generation counter assigned at construction
/// makes equality an identity comparison, not a structural one.
#[derive(Debug)]
pub struct CompositeData {
    pub type_index: TypeIndex,
    pub type_id: String,
    /// Field values. Kept behind an `Rc` so a `copy` of a structure can
    /// reuse the same field snapshot (spec.md §3.4 "Identity and
    /// ownership") instead of deep-cloning immediately; the first
    /// mutation after a copy triggers copy-on-write via `Rc::make_mut`.
    pub fields: Rc<IndexMap<Symbol, Value>>,
    pub owner: Option<Location>,
    pub generation: u64,
}

impl CompositeData {
    pub fn new(type_index: TypeIndex, type_id: String, fields: IndexMap<Symbol, Value>) -> Self {
        Self { type_index, type_id, fields: Rc::new(fields), owner: None, generation: next_generation() }
    }

    /// A shallow copy that reuses the existing field snapshot and
    /// assigns a fresh identity, per spec.md §3.4.
    pub fn copy_shell(&self) -> Self {
        Self {
            type_index: self.type_index,
            type_id: self.type_id.clone(),
            fields: Rc::clone(&self.fields),
            owner: None,
            generation: next_generation(),
        }
    }

    pub fn get_field(&self, name: &Symbol) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set_field(&mut self, name: Symbol, value: Value) {
        Rc::make_mut(&mut self.fields).insert(name, value);
    }
}

/// Identity equality: same generation implies same type ID by
/// construction, but both are compared per spec.md §9's wording.
impl PartialEq for CompositeData {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && self.type_id == other.type_id
    }
}
impl Eq for CompositeData {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_structurally_equal_composites_are_distinct() {
        let mut fields = IndexMap::new();
        fields.insert(Symbol::intern("n"), Value::Bool(true));
        let a = CompositeData::new(TypeIndex(0), "0x1.C".to_owned(), fields.clone());
        let b = CompositeData::new(TypeIndex(0), "0x1.C".to_owned(), fields);
        assert_ne!(a, b);
    }

    #[test]
    fn copy_shell_reuses_the_field_snapshot() {
        let mut fields = IndexMap::new();
        fields.insert(Symbol::intern("n"), Value::Bool(true));
        let a = CompositeData::new(TypeIndex(0), "0x1.C".to_owned(), fields);
        let b = a.copy_shell();
        assert!(Rc::ptr_eq(&a.fields, &b.fields));
        assert_ne!(a.generation, b.generation);
    }
}
