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

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 20-byte account address.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Where a program originated. Forms part of the identity of every
/// user-defined type: two composites with the same name but different
/// locations are distinct types.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    Address(Address),
    Transaction([u8; 32]),
    Script([u8; 32]),
    /// A free-form location used by imports resolved from source paths
    /// and by standalone test programs.
    String(String),
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Address(a) => write!(f, "account.{a:?}"),
            Location::Transaction(h) => write!(f, "tx.{}", hex(h)),
            Location::Script(h) => write!(f, "script.{}", hex(h)),
            Location::String(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl Location {
    /// The prefix used when stamping an emitted event's qualified
    /// identifier, per spec.md §4.5.
    pub fn qualifier(&self) -> String {
        match self {
            Location::Address(a) => format!("account.{a:?}"),
            Location::Transaction(h) => format!("tx.{}", hex(h)),
            Location::Script(h) => format!("script.{}", hex(h)),
            Location::String(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_compare_structurally() {
        let a1 = Location::Address(Address::new([1; 20]));
        let a2 = Location::Address(Address::new([1; 20]));
        let a3 = Location::Address(Address::new([2; 20]));
        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
    }
}
