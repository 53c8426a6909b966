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

//! The output of checking, spec.md §4.3 "Outputs": the original AST
//! plus the tables the interpreter needs, so it never has to repeat
//! name resolution or type inference at run time.

use indexmap::IndexMap;
use runic_ast::{NodeID, Program};
use runic_span::Symbol;
use runic_types::{Type, TypeArena, TypeIndex};

/// A fully checked program: the AST unchanged, the resolved type
/// arena, a map from every expression node to its inferred type, and
/// the top-level name table the interpreter needs to resolve a
/// `Named` type annotation (e.g. a failable downcast's target type)
/// without repeating name resolution.
pub struct CheckedProgram {
    pub program: Program,
    pub arena: TypeArena,
    pub expression_types: IndexMap<NodeID, Type>,
    pub type_names: IndexMap<Symbol, TypeIndex>,
}

impl CheckedProgram {
    pub fn new(program: Program, arena: TypeArena, expression_types: IndexMap<NodeID, Type>, type_names: IndexMap<Symbol, TypeIndex>) -> Self {
        Self { program, arena, expression_types, type_names }
    }

    pub fn type_of(&self, node: NodeID) -> Option<&Type> {
        self.expression_types.get(&node)
    }
}
