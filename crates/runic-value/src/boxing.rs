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

//! Optional- and any-boxing, spec.md §4.4.

use crate::Value;
use runic_types::Type;

fn optional_depth(t: &Type) -> u32 {
    match t {
        Type::Optional(inner) => 1 + optional_depth(inner),
        _ => 0,
    }
}

/// `box_optional(v, from_t, to_t)`: wraps `v` in as many `Some(...)`
/// layers as `to_t` has more optional nesting than `from_t`. A `Nil`
/// value stays `Nil` regardless of how many layers are requested —
/// the "collapsing" rule of spec.md §4.4.
pub fn box_optional(v: Value, from_t: &Type, to_t: &Type) -> Value {
    let added_layers = optional_depth(to_t).saturating_sub(optional_depth(from_t));
    box_optional_by(v, added_layers)
}

fn box_optional_by(v: Value, added_layers: u32) -> Value {
    if added_layers == 0 || v.is_nil() {
        return v;
    }
    let mut result = v;
    for _ in 0..added_layers {
        result = Value::some(result);
    }
    result
}

/// `box_any(v, from_t, to_t)`: records the runtime type alongside the
/// value so a failable downcast can recover it without ambient
/// information. A no-op if `v` is already any-boxed.
pub fn box_any(v: Value, from_t: &Type) -> Value {
    match v {
        Value::Any(..) => v,
        other => Value::Any(from_t.clone(), Box::new(other)),
    }
}

/// `convert_and_box(v, from_t, to_t)`: applies optional boxing, then
/// any-boxing, recursing through matching optional layers so the two
/// compose correctly on expressions like `let x: AnyStruct? = 1`.
pub fn convert_and_box(v: Value, from_t: &Type, to_t: &Type) -> Value {
    match to_t {
        Type::Optional(to_inner) => match from_t {
            Type::Optional(from_inner) => match v {
                Value::Optional(Some(inner)) => Value::some(convert_and_box(*inner, from_inner, to_inner)),
                Value::Optional(None) => Value::nil(),
                other => other,
            },
            _ => Value::some(convert_and_box(v, from_t, to_inner)),
        },
        Type::AnyStruct | Type::AnyResource => box_any(v, from_t),
        _ => v,
    }
}

/// A failable downcast, spec.md §3.2/§8 scenario 5: `Some(inner)` if
/// the any-boxed runtime type equals `target`, `Nil` otherwise.
pub fn downcast(v: Value, target: &Type) -> Value {
    match v {
        Value::Any(runtime_type, inner) if &runtime_type == target => Value::some(*inner),
        _ => Value::nil(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn boxing_t_to_optional_t_yields_some() {
        let v = Value::Int(BigInt::from(3));
        let boxed = box_optional(v, &Type::Int, &Type::Optional(Box::new(Type::Int)));
        assert!(matches!(boxed, Value::Optional(Some(_))));
    }

    #[test]
    fn boxing_optional_to_itself_is_identity() {
        let v = Value::some(Value::Bool(true));
        let t = Type::Optional(Box::new(Type::Bool));
        let boxed = box_optional(v.clone(), &t, &t);
        assert!(matches!(boxed, Value::Optional(Some(inner)) if matches!(*inner, Value::Bool(true))));
        let _ = v;
    }

    #[test]
    fn boxing_optional_into_deeper_optional_collapses_nil() {
        let from = Type::Optional(Box::new(Type::Int));
        let to = Type::Optional(Box::new(from.clone()));
        let nil = Value::nil();
        let boxed = box_optional(nil, &from, &to);
        assert!(boxed.is_nil());

        let some = Value::some(Value::Int(BigInt::from(1)));
        let boxed_some = box_optional(some, &from, &to);
        match boxed_some {
            Value::Optional(Some(inner)) => assert!(matches!(*inner, Value::Optional(Some(_)))),
            _ => panic!("expected Some(Some(_))"),
        }
    }

    #[test]
    fn convert_and_box_is_identity_for_same_type() {
        let v = Value::Int(BigInt::from(7));
        let boxed = convert_and_box(v.clone(), &Type::Int, &Type::Int);
        assert!(matches!(boxed, Value::Int(_)));
    }

    #[test]
    fn convert_and_box_wraps_non_optional_into_optional() {
        let v = Value::Int(BigInt::from(7));
        let boxed = convert_and_box(v, &Type::Int, &Type::Optional(Box::new(Type::Int)));
        assert!(matches!(boxed, Value::Optional(Some(_))));
    }

    #[test]
    fn downcast_recovers_the_matching_runtime_type() {
        let boxed = box_any(Value::Int(BigInt::from(1)), &Type::Int);
        let ok = downcast(boxed.clone(), &Type::Int);
        assert!(matches!(ok, Value::Optional(Some(_))));
        let bad = downcast(boxed, &Type::Bool);
        assert!(bad.is_nil());
    }
}
