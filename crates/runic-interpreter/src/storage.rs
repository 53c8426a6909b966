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

//! The per-execution storage cache, spec.md §5 "Storage model": a
//! read takes ownership of the stored value (the slot is empty until
//! something is written back to it), writes are buffered, and
//! `flush` is the only thing that ever touches the host — in key
//! order, so a crash mid-flush is at least deterministic. An execution
//! that returns an error never calls `flush`, which is the entire
//! rollback mechanism.

use runic_errors::{Diagnostic, RuntimeErrorKind};
use runic_span::{Location, Span};
use runic_types::TypeArena;
use runic_value::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// The raw key/value operations a host exposes for account storage.
/// Kept separate from the richer host-integration trait (spec.md §6)
/// so the interpreter never needs to know about accounts, signers, or
/// code deployment — only bytes in, bytes out.
pub trait StorageBackend {
    fn read_storage(&self, owner: &Location, key: &str) -> Option<Vec<u8>>;
    fn write_storage(&self, owner: &Location, key: &str, value: Option<Vec<u8>>);
}

type StorageKey = (Location, String);

pub struct StorageCache<'h> {
    host: &'h dyn StorageBackend,
    consumed: RefCell<BTreeMap<StorageKey, ()>>,
    writes: RefCell<BTreeMap<StorageKey, Option<Value>>>,
}

impl<'h> StorageCache<'h> {
    pub fn new(host: &'h dyn StorageBackend) -> Self {
        Self { host, consumed: RefCell::new(BTreeMap::new()), writes: RefCell::new(BTreeMap::new()) }
    }

    /// Reads `key` out of `owner`'s storage, taking ownership: a
    /// second read of the same key before a write-back sees an empty
    /// slot, exactly like a resource `move`.
    pub fn read(&self, owner: &Location, key: &str, arena: &TypeArena, span: Span) -> Result<Option<Value>, Diagnostic> {
        let cache_key = (owner.clone(), key.to_owned());
        if let Some(pending) = self.writes.borrow_mut().remove(&cache_key) {
            return Ok(pending);
        }
        if self.consumed.borrow().contains_key(&cache_key) {
            return Ok(None);
        }
        self.consumed.borrow_mut().insert(cache_key, ());
        match self.host.read_storage(owner, key) {
            None => Ok(None),
            Some(bytes) => {
                runic_value::decode(&bytes, arena).map(Some).map_err(|e| Diagnostic::new(span, RuntimeErrorKind::DecodingFailure(e.to_string())))
            }
        }
    }

    /// Buffers a write; nothing reaches the host until [`flush`].
    pub fn write(&self, owner: &Location, key: &str, value: Option<Value>) {
        self.writes.borrow_mut().insert((owner.clone(), key.to_owned()), value);
    }

    /// Commits every buffered write to the host, in key order. Must
    /// only be called after an execution has fully succeeded.
    pub fn flush(&self, span: Span) -> Result<(), Diagnostic> {
        let writes = std::mem::take(&mut *self.writes.borrow_mut());
        for ((owner, key), value) in writes {
            let bytes = match &value {
                Some(v) => Some(runic_value::encode(v).map_err(|e| Diagnostic::new(span, RuntimeErrorKind::DecodingFailure(e.to_string())))?),
                None => None,
            };
            self.host.write_storage(&owner, &key, bytes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;
    use std::collections::BTreeMap as StdBTreeMap;

    struct MemoryHost(StdRefCell<StdBTreeMap<(Location, String), Vec<u8>>>);

    impl StorageBackend for MemoryHost {
        fn read_storage(&self, owner: &Location, key: &str) -> Option<Vec<u8>> {
            self.0.borrow().get(&(owner.clone(), key.to_owned())).cloned()
        }
        fn write_storage(&self, owner: &Location, key: &str, value: Option<Vec<u8>>) {
            let mut map = self.0.borrow_mut();
            match value {
                Some(bytes) => {
                    map.insert((owner.clone(), key.to_owned()), bytes);
                }
                None => {
                    map.remove(&(owner.clone(), key.to_owned()));
                }
            }
        }
    }

    #[test]
    fn a_read_then_a_second_read_of_the_same_key_sees_nothing() {
        runic_span::create_session_if_not_set_then(|| {
            let host = MemoryHost(StdRefCell::new(StdBTreeMap::new()));
            let arena = TypeArena::new();
            let owner = Location::String("0x1".to_owned());
            host.write_storage(&owner, "balance", Some(runic_value::encode(&Value::Int(num_bigint::BigInt::from(10))).unwrap()));
            let cache = StorageCache::new(&host);
            let first = cache.read(&owner, "balance", &arena, Span::dummy()).unwrap();
            assert!(first.is_some());
            let second = cache.read(&owner, "balance", &arena, Span::dummy()).unwrap();
            assert!(second.is_none());
        });
    }

    #[test]
    fn flush_writes_back_in_key_order_and_rollback_is_just_not_flushing() {
        runic_span::create_session_if_not_set_then(|| {
            let host = MemoryHost(StdRefCell::new(StdBTreeMap::new()));
            let owner = Location::String("0x1".to_owned());
            let cache = StorageCache::new(&host);
            cache.write(&owner, "b", Some(Value::Int(num_bigint::BigInt::from(2))));
            cache.write(&owner, "a", Some(Value::Int(num_bigint::BigInt::from(1))));
            cache.flush(Span::dummy()).unwrap();
            assert!(host.read_storage(&owner, "a").is_some());
            assert!(host.read_storage(&owner, "b").is_some());

            let cache2 = StorageCache::new(&host);
            cache2.write(&owner, "a", None);
            // never flushed: rollback.
            drop(cache2);
            assert!(host.read_storage(&owner, "a").is_some());
        });
    }
}
