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

use crate::Declaration;

/// An ordered sequence of top-level declarations, spec.md §3.2.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn transactions(&self) -> impl Iterator<Item = &crate::TransactionDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Transaction(t) => Some(t),
            _ => None,
        })
    }

    pub fn composites(&self) -> impl Iterator<Item = &crate::CompositeDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Composite(c) => Some(c),
            _ => None,
        })
    }
}
