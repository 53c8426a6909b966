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

//! An interned-string identifier, scoped to a thread-local session the
//! way `leo_span::Symbol` is scoped to a `scoped_tls` session, so that
//! independent checker/interpreter runs (e.g. parallel tests) do not
//! share an interner.

use fxhash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;

#[derive(Default)]
struct Interner {
    strings: Vec<String>,
    names: FxHashMap<String, Symbol>,
}

impl Interner {
    fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.names.get(s) {
            return sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.to_owned());
        self.names.insert(s.to_owned(), sym);
        sym
    }

    fn resolve(&self, sym: Symbol) -> String {
        self.strings[sym.0 as usize].clone()
    }
}

struct Session {
    interner: RefCell<Interner>,
}

scoped_tls::scoped_thread_local!(static SESSION: Session);

/// Runs `f` inside a fresh interning session if one is not already
/// active on this thread, otherwise reuses the active one. Every
/// top-level parse/check/execute entry point wraps its work in this.
pub fn create_session_if_not_set_then<R>(f: impl FnOnce() -> R) -> R {
    if SESSION.is_set() {
        f()
    } else {
        let session = Session { interner: RefCell::new(Interner::default()) };
        SESSION.set(&session, f)
    }
}

/// An interned identifier. Cheap to copy and compare; resolves back to
/// its text only when displayed or serialized.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Symbol {
        if SESSION.is_set() {
            SESSION.with(|session| session.interner.borrow_mut().intern(s))
        } else {
            // No active session (e.g. a doctest): fall back to a private
            // one-off session so callers never observe a panic.
            create_session_if_not_set_then(|| Symbol::intern(s))
        }
    }

    pub fn as_str(&self) -> String {
        if SESSION.is_set() {
            SESSION.with(|session| session.interner.borrow().resolve(*self))
        } else {
            create_session_if_not_set_then(|| self.as_str())
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(&s)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Symbol::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        create_session_if_not_set_then(|| {
            let a = Symbol::intern("foo");
            let b = Symbol::intern("foo");
            let c = Symbol::intern("bar");
            assert_eq!(a, b);
            assert_ne!(a, c);
            assert_eq!(a.as_str(), "foo");
        });
    }
}
