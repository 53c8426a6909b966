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

//! Built-ins injected into every program, spec.md §2's "standard
//! library" budget line. A fixed menu of names dispatched by string,
//! the same posture as the teacher's `core_function` module, but
//! covering the much smaller surface this language actually names:
//! `panic`, `assert`, numeric/string conversions, and a handful of
//! `Array`/`Dictionary` methods. Not every name here is reachable from
//! every call site — free functions are looked up by identifier, the
//! rest by member name on a receiver of the matching type — that
//! wiring lives in `runic-interpreter`, which treats this crate as a
//! name table to consult only after its own registry comes up empty.

use num_bigint::BigInt;
use runic_errors::{Diagnostic, RuntimeErrorKind, RuntimeResult};
use runic_span::Span;
use runic_value::{Key, Value};

/// The result of a built-in call: the value it produced, and — for a
/// method that mutates its receiver, like `Array.append` — the
/// receiver's new value, which the caller is responsible for writing
/// back the same way an ordinary assignment would.
pub struct Outcome {
    pub result: Value,
    pub receiver: Option<Value>,
}

impl Outcome {
    fn value(result: Value) -> Self {
        Self { result, receiver: None }
    }

    fn mutate(result: Value, receiver: Value) -> Self {
        Self { result, receiver: Some(receiver) }
    }
}

/// Looks up a free built-in function by name. Returns `Ok(None)` for a
/// name this crate doesn't recognize, so the interpreter can fall
/// through to its own "no such function" error with the name intact.
pub fn call_function(name: &str, mut arguments: Vec<Value>, span: Span) -> RuntimeResult<Option<Outcome>> {
    let outcome = match name {
        "panic" => {
            let message = expect_string(arguments.pop(), span)?;
            return Err(Diagnostic::new(span, RuntimeErrorKind::Panic(message)));
        }
        "assert" if arguments.len() == 1 => {
            let cond = expect_bool(arguments.pop(), span)?;
            if !cond {
                return Err(Diagnostic::new(span, RuntimeErrorKind::Panic("assertion failed".to_owned())));
            }
            Outcome::value(Value::Void)
        }
        "assert" if arguments.len() == 2 => {
            let message = expect_string(arguments.pop(), span)?;
            let cond = expect_bool(arguments.pop(), span)?;
            if !cond {
                return Err(Diagnostic::new(span, RuntimeErrorKind::Panic(message)));
            }
            Outcome::value(Value::Void)
        }
        "Int.toString" => Outcome::value(Value::String(expect_int(arguments.pop(), span)?.to_string())),
        "String.toInt" => {
            let s = expect_string(arguments.pop(), span)?;
            Outcome::value(Value::Optional(s.trim().parse::<BigInt>().ok().map(|n| Box::new(Value::Int(n)))))
        }
        _ => return Ok(None),
    };
    Ok(Some(outcome))
}

/// Looks up a built-in method by name against a receiver already known
/// to be an `Array` or `Dictionary`. Returns `Ok(None)` for a name this
/// crate doesn't recognize (a composite method, say) so the
/// interpreter can keep looking.
pub fn call_method(receiver: Value, name: &str, mut arguments: Vec<Value>, span: Span) -> RuntimeResult<Option<Outcome>> {
    let outcome = match (&receiver, name) {
        (Value::Array(_), "append") => {
            let Value::Array(mut items) = receiver else { unreachable!() };
            items.push(arguments.pop().ok_or_else(|| missing_argument(span))?);
            Outcome::mutate(Value::Void, Value::Array(items))
        }
        (Value::Array(_), "remove") => {
            let Value::Array(mut items) = receiver else { unreachable!() };
            let index = expect_index(arguments.pop(), span)?;
            if index >= items.len() {
                return Err(Diagnostic::new(span, RuntimeErrorKind::IndexOutOfRange { index: index.to_string(), length: items.len() }));
            }
            let removed = items.remove(index);
            Outcome::mutate(removed, Value::Array(items))
        }
        (Value::Array(items), "contains") => {
            let needle = arguments.pop().ok_or_else(|| missing_argument(span))?;
            Outcome::value(Value::Bool(items.iter().any(|item| runic_value::ops::equal(item, &needle))))
        }
        (Value::Array(items), "length") => Outcome::value(Value::Int(BigInt::from(items.len()))),
        (Value::Dictionary(map), "containsKey") => {
            let key = to_key(arguments.pop(), span)?;
            Outcome::value(Value::Bool(map.contains_key(&key)))
        }
        (Value::Dictionary(_), "remove") => {
            let Value::Dictionary(mut map) = receiver else { unreachable!() };
            let key = to_key(arguments.pop(), span)?;
            let removed = map.shift_remove(&key);
            Outcome::mutate(Value::Optional(removed.map(Box::new)), Value::Dictionary(map))
        }
        (Value::Dictionary(map), "keys") => Outcome::value(Value::Array(map.keys().map(key_to_value).collect())),
        (Value::Dictionary(map), "values") => Outcome::value(Value::Array(map.values().cloned().collect())),
        _ => return Ok(None),
    };
    Ok(Some(outcome))
}

fn key_to_value(key: &Key) -> Value {
    match key {
        Key::Bool(b) => Value::Bool(*b),
        Key::Int(n) => Value::Int(n.clone()),
        Key::String(s) => Value::String(s.clone()),
        Key::Address(a) => Value::Address(a.clone()),
    }
}

fn to_key(value: Option<Value>, span: Span) -> RuntimeResult<Key> {
    match value {
        Some(Value::Bool(b)) => Ok(Key::Bool(b)),
        Some(Value::Int(n)) => Ok(Key::Int(n)),
        Some(Value::String(s)) => Ok(Key::String(s)),
        Some(Value::Address(a)) => Ok(Key::Address(a)),
        _ => Err(missing_argument(span)),
    }
}

fn expect_string(value: Option<Value>, span: Span) -> RuntimeResult<String> {
    match value {
        Some(Value::String(s)) => Ok(s),
        _ => Err(missing_argument(span)),
    }
}

fn expect_bool(value: Option<Value>, span: Span) -> RuntimeResult<bool> {
    match value {
        Some(Value::Bool(b)) => Ok(b),
        _ => Err(missing_argument(span)),
    }
}

fn expect_int(value: Option<Value>, span: Span) -> RuntimeResult<BigInt> {
    match value {
        Some(Value::Int(n)) => Ok(n),
        _ => Err(missing_argument(span)),
    }
}

fn expect_index(value: Option<Value>, span: Span) -> RuntimeResult<usize> {
    use num_traits::ToPrimitive;
    expect_int(value, span)?.to_usize().ok_or_else(|| missing_argument(span))
}

fn missing_argument(span: Span) -> Diagnostic {
    Diagnostic::new(span, RuntimeErrorKind::Unreachable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_with_a_false_condition_panics_with_the_given_message() {
        runic_span::create_session_if_not_set_then(|| {
            let span = Span::dummy();
            let err = call_function("assert", vec![Value::Bool(false), Value::String("nope".to_owned())], span).unwrap_err();
            assert_eq!(err.message.to_string(), "nope");
        });
    }

    #[test]
    fn array_append_returns_the_grown_array_as_the_new_receiver() {
        let outcome = call_method(Value::Array(vec![Value::Int(BigInt::from(1))]), "append", vec![Value::Int(BigInt::from(2))], Span::dummy())
            .unwrap()
            .unwrap();
        assert!(matches!(outcome.receiver, Some(Value::Array(items)) if items.len() == 2));
    }

    #[test]
    fn dictionary_contains_key_does_not_consume_the_receiver() {
        let mut map = indexmap::IndexMap::new();
        map.insert(Key::String("a".to_owned()), Value::Int(BigInt::from(1)));
        let outcome = call_method(Value::Dictionary(map), "containsKey", vec![Value::String("a".to_owned())], Span::dummy()).unwrap().unwrap();
        assert!(matches!(outcome.result, Value::Bool(true)));
        assert!(outcome.receiver.is_none());
    }
}
