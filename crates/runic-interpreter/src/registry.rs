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

//! Maps the declarations of a checked program to callable
//! [`ClosureBody`] values, keyed the way the checker's `TypeArena` keys
//! composite types: by type ID string and member name. The checker
//! proves names resolve; this just gives the evaluator O(1) access to
//! the bodies it already proved exist.

use indexmap::IndexMap;
use runic_ast::{CompositeDeclaration, Declaration, Program};
use runic_span::{Location, Symbol};
use runic_value::ClosureBody;
use std::rc::Rc;

#[derive(Default)]
pub struct FunctionRegistry {
    pub top_level: IndexMap<Symbol, Rc<ClosureBody>>,
    pub methods: IndexMap<String, IndexMap<Symbol, Rc<ClosureBody>>>,
    pub initializers: IndexMap<String, Rc<ClosureBody>>,
    pub composites: IndexMap<String, Rc<CompositeDeclaration>>,
    /// The location each type ID in `composites` was registered at —
    /// a contract's declaring account, needed to find its storage slot
    /// when some other program refers to it by bare name rather than
    /// constructing it (spec.md §8 "contract deployment and load").
    locations: IndexMap<String, Location>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every top-level function and every composite's methods
    /// and initializer declared at `location`.
    pub fn register(&mut self, program: &Program, location: &Location) {
        for declaration in &program.declarations {
            match declaration {
                Declaration::Function(function) => {
                    self.top_level.insert(function.name.name, Rc::new(ClosureBody::from(function)));
                }
                Declaration::Composite(composite) => {
                    let type_id = composite.type_id(location);
                    let mut methods = IndexMap::new();
                    for function in &composite.functions {
                        methods.insert(function.name.name, Rc::new(ClosureBody::from(function)));
                    }
                    self.methods.insert(type_id.clone(), methods);
                    if let Some(initializer) = &composite.initializer {
                        self.initializers.insert(type_id.clone(), Rc::new(ClosureBody::from(initializer)));
                    }
                    self.locations.insert(type_id.clone(), location.clone());
                    self.composites.insert(type_id, Rc::new(composite.clone()));
                }
                _ => {}
            }
        }
    }

    pub fn top_level_function(&self, name: &Symbol) -> Option<Rc<ClosureBody>> {
        self.top_level.get(name).cloned()
    }

    pub fn method(&self, type_id: &str, name: &Symbol) -> Option<Rc<ClosureBody>> {
        self.methods.get(type_id)?.get(name).cloned()
    }

    pub fn initializer(&self, type_id: &str) -> Option<Rc<ClosureBody>> {
        self.initializers.get(type_id).cloned()
    }

    pub fn composite(&self, type_id: &str) -> Option<&Rc<CompositeDeclaration>> {
        self.composites.get(type_id)
    }

    /// Finds a registered composite by its bare name regardless of
    /// which location declared it, mirroring how the checker's
    /// `GlobalScope` resolves type names across a flattened import
    /// tree without regard to location. Used when a bare identifier
    /// names a composite declared somewhere other than the currently
    /// executing program's own location.
    pub fn composite_by_name(&self, name: Symbol) -> Option<(&str, &Rc<CompositeDeclaration>)> {
        self.composites.iter().find(|(_, composite)| composite.name.name == name).map(|(type_id, composite)| (type_id.as_str(), composite))
    }

    /// The location a registered type ID was declared at.
    pub fn location_of(&self, type_id: &str) -> Option<&Location> {
        self.locations.get(type_id)
    }
}
