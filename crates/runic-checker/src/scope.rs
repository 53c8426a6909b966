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

//! Value scope and type scope, spec.md §4.3 "Name resolution": two
//! independent scoping regimes, each with lexical, shadow-at-
//! function-boundary-only lookup.

use indexmap::IndexMap;
use runic_ast::VariableKind;
use runic_errors::Handler;
use runic_span::Symbol;
use runic_types::{Type, TypeArena, TypeIndex};
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct VariableBinding {
    pub ty: Type,
    pub kind: VariableKind,
    pub moved: bool,
    pub declared_with_move: bool,
}

/// The value scope of a single function body: one frame per nested
/// block, searched innermost-first. Unlike block lifetime, *shadowing*
/// is checked against every frame in the stack (spec.md §4.3:
/// "outer-scope shadowing permitted at function boundaries only"), so
/// a new `LocalScope` is created per function rather than per block.
#[derive(Default)]
pub struct LocalScope {
    frames: Vec<IndexMap<Symbol, VariableBinding>>,
}

impl LocalScope {
    pub fn new() -> Self {
        Self { frames: vec![IndexMap::new()] }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(IndexMap::new());
    }

    pub fn pop_frame(&mut self) -> IndexMap<Symbol, VariableBinding> {
        self.frames.pop().expect("pop_frame without a matching push_frame")
    }

    pub fn is_declared(&self, name: &Symbol) -> bool {
        self.frames.iter().any(|f| f.contains_key(name))
    }

    pub fn declare(&mut self, name: Symbol, binding: VariableBinding) -> Result<(), ()> {
        if self.is_declared(&name) {
            return Err(());
        }
        self.frames.last_mut().expect("at least one frame").insert(name, binding);
        Ok(())
    }

    pub fn lookup(&self, name: &Symbol) -> Option<&VariableBinding> {
        self.frames.iter().rev().find_map(|f| f.get(name))
    }

    pub fn lookup_mut(&mut self, name: &Symbol) -> Option<&mut VariableBinding> {
        self.frames.iter_mut().rev().find_map(|f| f.get_mut(name))
    }

    /// The bindings still alive in the innermost frame — used at block
    /// end to detect resource loss (spec.md §4.3 rule 3).
    pub fn innermost_frame(&self) -> &IndexMap<Symbol, VariableBinding> {
        self.frames.last().expect("at least one frame")
    }
}

/// Global, program-wide declarations: the type scope (composites,
/// interfaces) and the value scope of top-level functions.
#[derive(Default)]
pub struct GlobalScope {
    pub type_names: IndexMap<Symbol, TypeIndex>,
    pub functions: IndexMap<Symbol, Rc<runic_ast::FunctionDeclaration>>,
    pub composite_decls: IndexMap<Symbol, Rc<runic_ast::CompositeDeclaration>>,
    pub interface_decls: IndexMap<Symbol, Rc<runic_ast::InterfaceDeclaration>>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The state threaded through every expression/statement check: the
/// type arena (mutated only during declaration resolution, read-only
/// afterwards), the global tables, the diagnostic sink, and — inside
/// a composite method body — the type of `self`.
pub struct Ctx<'a> {
    pub arena: &'a mut TypeArena,
    pub globals: &'a GlobalScope,
    pub handler: &'a Handler,
    pub self_type: Option<Type>,
}
