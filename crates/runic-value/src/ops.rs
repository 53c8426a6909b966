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

//! `equal`, `copy`, `set_owner`, and `destroy`, spec.md §4.4.

use crate::{CompositeData, Value};
use runic_span::Location;
use runic_types::{Type, TypeArena};
use std::cell::RefCell;
use std::rc::Rc;

/// Identity equality for composites, structural for everything else —
/// the default `==` the interpreter uses for the `==`/`!=` operators.
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Void, Value::Void) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Address(x), Value::Address(y)) => x == y,
        (Value::Optional(x), Value::Optional(y)) => match (x, y) {
            (None, None) => true,
            (Some(x), Some(y)) => equal(x, y),
            _ => false,
        },
        (Value::Array(x), Value::Array(y)) => x.len() == y.len() && x.iter().zip(y).all(|(a, b)| equal(a, b)),
        (Value::Dictionary(x), Value::Dictionary(y)) => {
            x.len() == y.len() && x.iter().all(|(k, v)| y.get(k).is_some_and(|v2| equal(v, v2)))
        }
        (Value::Composite(x), Value::Composite(y)) => *x.borrow() == *y.borrow(),
        // Open question resolved per spec.md §9: AnyStruct/AnyResource
        // equality when the inner values share a type is structural
        // equality of the inner value.
        (Value::Any(tx, x), Value::Any(ty, y)) => tx == ty && equal(x, y),
        _ => false,
    }
}

/// Structural equality, used by composite-keyed dictionary lookup
/// (permitted only when the key type is structurally comparable,
/// spec.md §9 "Composite identity").
pub fn structural_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Composite(x), Value::Composite(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.type_id == y.type_id && x.fields.len() == y.fields.len() && x.fields.iter().all(|(k, v)| y.fields.get(k).is_some_and(|v2| equal(v, v2)))
        }
        _ => equal(a, b),
    }
}

/// `copy(v)`: deep clone for structures, forbidden for resources. The
/// checker guarantees `copy` is never reached for a resource-typed
/// value, so this asserts rather than returning a runtime error.
pub fn copy_value(v: &Value, ty: &Type, arena: &TypeArena) -> Value {
    assert!(!arena.is_resource(ty), "copy of a resource value ({ty}) should have been rejected by the checker");
    match v {
        Value::Composite(rc) => Value::Composite(Rc::new(RefCell::new(rc.borrow().copy_shell()))),
        Value::Optional(Some(inner)) => {
            let inner_ty = match ty {
                Type::Optional(t) => t.as_ref(),
                other => other,
            };
            Value::some(copy_value(inner, inner_ty, arena))
        }
        Value::Array(items) => {
            let elem_ty = match ty {
                Type::Array(t, _) => t.as_ref(),
                other => other,
            };
            Value::Array(items.iter().map(|v| copy_value(v, elem_ty, arena)).collect())
        }
        Value::Dictionary(map) => {
            let value_ty = match ty {
                Type::Dictionary(_, v) => v.as_ref(),
                other => other,
            };
            Value::Dictionary(map.iter().map(|(k, v)| (k.clone(), copy_value(v, value_ty, arena))).collect())
        }
        other => other.clone(),
    }
}

/// `set_owner(v, owner)`: stamps the owner on a composite and, since
/// storing a composite stores the values it transitively owns,
/// recurses into containers and nested composites.
pub fn set_owner(v: &Value, owner: Option<Location>) {
    match v {
        Value::Composite(rc) => {
            rc.borrow_mut().owner = owner.clone();
            for field in rc.borrow().fields.values() {
                set_owner(field, owner.clone());
            }
        }
        Value::Optional(Some(inner)) => set_owner(inner, owner),
        Value::Array(items) => items.iter().for_each(|v| set_owner(v, owner.clone())),
        Value::Dictionary(map) => map.values().for_each(|v| set_owner(v, owner.clone())),
        _ => {}
    }
}

/// `destroy(v)`: only applicable to resources; recursively destroys
/// nested resources. Plain Rust ownership already reclaims memory on
/// drop — this function exists to make the recursive consumption an
/// explicit, checkable operation rather than an implicit `Drop` impl
/// the checker cannot see.
pub fn destroy(v: CompositeData) {
    for (_, field) in Rc::try_unwrap(v.fields).unwrap_or_else(|rc| (*rc).clone()) {
        destroy_value(field);
    }
}

fn destroy_value(v: Value) {
    match v {
        Value::Composite(rc) => match Rc::try_unwrap(rc) {
            Ok(cell) => destroy(cell.into_inner()),
            Err(rc) => destroy((*rc.borrow()).shallow_clone_for_destroy()),
        },
        Value::Optional(Some(inner)) => destroy_value(*inner),
        Value::Array(items) => items.into_iter().for_each(destroy_value),
        Value::Dictionary(map) => map.into_values().for_each(destroy_value),
        _ => {}
    }
}

impl CompositeData {
    fn shallow_clone_for_destroy(&self) -> CompositeData {
        CompositeData {
            type_index: self.type_index,
            type_id: self.type_id.clone(),
            fields: Rc::clone(&self.fields),
            owner: self.owner.clone(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use num_bigint::BigInt;
    use runic_span::Symbol;
    use runic_types::TypeIndex;

    #[test]
    fn equal_is_structural_for_primitives() {
        assert!(equal(&Value::Int(BigInt::from(1)), &Value::Int(BigInt::from(1))));
        assert!(!equal(&Value::Bool(true), &Value::Bool(false)));
    }

    #[test]
    fn equal_is_identity_for_composites() {
        let mut fields = IndexMap::new();
        fields.insert(Symbol::intern("x"), Value::Bool(true));
        let a = Value::Composite(Rc::new(RefCell::new(CompositeData::new(TypeIndex(0), "0x1.C".into(), fields.clone()))));
        let b = Value::Composite(Rc::new(RefCell::new(CompositeData::new(TypeIndex(0), "0x1.C".into(), fields))));
        assert!(!equal(&a, &b));
        assert!(structural_equal(&a, &b));
    }

    #[test]
    #[should_panic]
    fn copy_of_a_resource_panics_as_a_checker_invariant() {
        let arena = TypeArena::new();
        let v = Value::Bool(true);
        let _ = copy_value(&v, &Type::AnyResource, &arena);
    }
}
