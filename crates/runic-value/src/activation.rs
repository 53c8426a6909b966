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

use crate::Value;
use runic_span::Symbol;

/// The lexical environment threaded through evaluation, spec.md §4.5
/// and §9 "Activation closures": a persistent mapping implemented as a
/// hash-array-mapped trie (`im::HashMap`) so closures capture by
/// sharing rather than by copying, and extending it produces a new
/// handle in O(log n) rather than cloning the whole map.
#[derive(Clone, Debug, Default)]
pub struct Activation {
    bindings: im::HashMap<Symbol, Value>,
}

impl Activation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &Symbol) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns a new activation with `name` bound to `value`, sharing
    /// structure with `self` rather than copying it.
    pub fn extend(&self, name: Symbol, value: Value) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.insert(name, value);
        Self { bindings }
    }

    /// In-place rebind, used for `var` assignment where the binding
    /// already exists in this activation's own frame.
    pub fn set(&mut self, name: Symbol, value: Value) {
        self.bindings.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use runic_span::create_session_if_not_set_then;

    #[test]
    fn extend_does_not_mutate_the_original() {
        create_session_if_not_set_then(|| {
            let base = Activation::new();
            let x = Symbol::intern("x");
            let extended = base.extend(x, Value::Int(BigInt::from(1)));
            assert!(base.get(&x).is_none());
            assert!(extended.get(&x).is_some());
        });
    }
}
