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

//! Storage serialization, spec.md §6: a self-describing format that
//! round-trips every value not containing a host reference (storage
//! references and functions are excluded by construction — they never
//! appear in a field written to storage).

use crate::{CompositeData, Key, Value};
use indexmap::IndexMap;
use num_bigint::BigInt;
use runic_span::{Location, Symbol};
use runic_types::TypeArena;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

#[derive(Serialize, Deserialize)]
enum EncodedKey {
    Bool(bool),
    Int(String),
    String(String),
    Address([u8; 20]),
}

#[derive(Serialize, Deserialize)]
enum EncodedValue {
    Void,
    Bool(bool),
    /// Decimal text, to avoid precision loss on an arbitrary-precision
    /// integer round-tripping through a numeric JSON field.
    Int(String),
    String(String),
    Address([u8; 20]),
    Optional(Option<Box<EncodedValue>>),
    Array(Vec<EncodedValue>),
    Dictionary(Vec<(EncodedKey, EncodedValue)>),
    Composite { type_id: String, owner: Option<[u8; 20]>, fields: Vec<(String, EncodedValue)> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingError(pub String);

impl std::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for EncodingError {}

fn encode_key(key: &Key) -> EncodedKey {
    match key {
        Key::Bool(b) => EncodedKey::Bool(*b),
        Key::Int(i) => EncodedKey::Int(i.to_string()),
        Key::String(s) => EncodedKey::String(s.clone()),
        Key::Address(Location::Address(a)) => EncodedKey::Address(a.0),
        Key::Address(other) => EncodedKey::String(format!("{other}")),
    }
}

fn decode_key(key: EncodedKey) -> Result<Key, EncodingError> {
    Ok(match key {
        EncodedKey::Bool(b) => Key::Bool(b),
        EncodedKey::Int(s) => Key::Int(BigInt::from_str(&s).map_err(|e| EncodingError(e.to_string()))?),
        EncodedKey::String(s) => Key::String(s),
        EncodedKey::Address(bytes) => Key::Address(Location::Address(runic_span::location::Address::new(bytes))),
    })
}

fn encode_value(value: &Value) -> Result<EncodedValue, EncodingError> {
    Ok(match value {
        Value::Void => EncodedValue::Void,
        Value::Bool(b) => EncodedValue::Bool(*b),
        Value::Int(i) => EncodedValue::Int(i.to_string()),
        Value::String(s) => EncodedValue::String(s.clone()),
        Value::Address(Location::Address(a)) => EncodedValue::Address(a.0),
        Value::Address(other) => return Err(EncodingError(format!("cannot encode a non-account address location {other}"))),
        Value::Optional(inner) => EncodedValue::Optional(match inner {
            Some(v) => Some(Box::new(encode_value(v)?)),
            None => None,
        }),
        Value::Array(items) => EncodedValue::Array(items.iter().map(encode_value).collect::<Result<_, _>>()?),
        Value::Dictionary(map) => EncodedValue::Dictionary(
            map.iter().map(|(k, v)| Ok((encode_key(k), encode_value(v)?))).collect::<Result<_, EncodingError>>()?,
        ),
        Value::Composite(rc) => {
            let data = rc.borrow();
            let owner = match &data.owner {
                Some(Location::Address(a)) => Some(a.0),
                Some(_) | None => None,
            };
            let fields = data
                .fields
                .iter()
                .map(|(name, v)| Ok((name.to_string(), encode_value(v)?)))
                .collect::<Result<_, EncodingError>>()?;
            EncodedValue::Composite { type_id: data.type_id.clone(), owner, fields }
        }
        Value::Function(_) => return Err(EncodingError("function values cannot be stored".to_owned())),
        Value::StorageReference(_) => return Err(EncodingError("storage references cannot be stored".to_owned())),
        Value::Any(_, inner) => encode_value(inner)?,
    })
}

fn decode_value(value: EncodedValue, arena: &TypeArena) -> Result<Value, EncodingError> {
    Ok(match value {
        EncodedValue::Void => Value::Void,
        EncodedValue::Bool(b) => Value::Bool(b),
        EncodedValue::Int(s) => Value::Int(BigInt::from_str(&s).map_err(|e| EncodingError(e.to_string()))?),
        EncodedValue::String(s) => Value::String(s),
        EncodedValue::Address(bytes) => Value::Address(Location::Address(runic_span::location::Address::new(bytes))),
        EncodedValue::Optional(inner) => {
            Value::Optional(match inner { Some(v) => Some(Box::new(decode_value(*v, arena)?)), None => None })
        }
        EncodedValue::Array(items) => Value::Array(items.into_iter().map(|v| decode_value(v, arena)).collect::<Result<_, _>>()?),
        EncodedValue::Dictionary(entries) => {
            let mut map = IndexMap::new();
            for (k, v) in entries {
                map.insert(decode_key(k)?, decode_value(v, arena)?);
            }
            Value::Dictionary(map)
        }
        EncodedValue::Composite { type_id, owner, fields } => {
            let type_index = arena
                .lookup(&type_id)
                .ok_or_else(|| EncodingError(format!("unknown type `{type_id}` while decoding stored value")))?;
            let mut field_map = IndexMap::new();
            for (name, v) in fields {
                field_map.insert(Symbol::intern(&name), decode_value(v, arena)?);
            }
            let mut data = CompositeData::new(type_index, type_id, field_map);
            data.owner = owner.map(|bytes| Location::Address(runic_span::location::Address::new(bytes)));
            Value::Composite(Rc::new(RefCell::new(data)))
        }
    })
}

/// Serializes `value` to the self-describing wire format, spec.md §6.
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodingError> {
    let encoded = encode_value(value)?;
    serde_json::to_vec(&encoded).map_err(|e| EncodingError(e.to_string()))
}

/// Deserializes bytes produced by [`encode`] back into a value,
/// resolving composite type IDs against `arena`.
pub fn decode(bytes: &[u8], arena: &TypeArena) -> Result<Value, EncodingError> {
    let encoded: EncodedValue = serde_json::from_slice(bytes).map_err(|e| EncodingError(e.to_string()))?;
    decode_value(encoded, arena)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use runic_span::create_session_if_not_set_then;

    #[test]
    fn round_trips_primitives() {
        let values = vec![
            Value::Bool(true),
            Value::Int(BigInt::from(-42)),
            Value::String("hello".to_owned()),
            Value::nil(),
            Value::some(Value::Int(BigInt::from(7))),
            Value::Array(vec![Value::Bool(false), Value::Bool(true)]),
        ];
        let arena = TypeArena::new();
        for v in values {
            let bytes = encode(&v).unwrap();
            let decoded = decode(&bytes, &arena).unwrap();
            assert!(crate::ops::equal(&v, &decoded));
        }
    }

    #[test]
    fn round_trips_a_composite_through_a_resolved_type_id() {
        create_session_if_not_set_then(|| {
            let mut arena = TypeArena::new();
            let idx = arena.reserve("0x1.Counter".to_owned());
            arena.resolve_composite(
                idx,
                runic_types::CompositeType {
                    type_id: "0x1.Counter".to_owned(),
                    kind: runic_ast::CompositeKind::Structure,
                    fields: IndexMap::new(),
                    functions: IndexMap::new(),
                    conformances: Vec::new(),
                },
            );
            let mut fields = IndexMap::new();
            fields.insert(Symbol::intern("n"), Value::Int(BigInt::from(5)));
            let composite = Value::Composite(Rc::new(RefCell::new(CompositeData::new(idx, "0x1.Counter".to_owned(), fields))));
            let bytes = encode(&composite).unwrap();
            let decoded = decode(&bytes, &arena).unwrap();
            assert!(crate::ops::structural_equal(&composite, &decoded));
        });
    }
}
