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

use crate::{Activation, CompositeData};
use indexmap::IndexMap;
use num_bigint::BigInt;
use runic_ast::{Block, Conditions, FunctionDeclaration, Parameter, TypeAnnotation};
use runic_span::Location;
use runic_types::Type;
use std::cell::RefCell;
use std::rc::Rc;

/// A hashable key for [`Value::Dictionary`]: spec.md §3.3 restricts
/// dictionary keys to hashable primitives and addresses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Bool(bool),
    Int(BigInt),
    String(String),
    Address(Location),
}

/// The callable shape shared by a named function/method and a function
/// literal, so a [`Closure`] doesn't care which produced it.
#[derive(Debug, Clone)]
pub struct ClosureBody {
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: Block,
    pub has_self: bool,
    pub conditions: Conditions,
}

impl From<&FunctionDeclaration> for ClosureBody {
    fn from(function: &FunctionDeclaration) -> Self {
        Self {
            parameters: function.parameters.clone(),
            return_type: function.return_type.clone(),
            body: function.body.clone(),
            has_self: function.has_self,
            conditions: function.conditions.clone(),
        }
    }
}

/// A closure value: the function body it wraps, plus the activation it
/// captured at the point of its literal, spec.md §3.4.
#[derive(Debug)]
pub struct Closure {
    pub body: Rc<ClosureBody>,
    pub captured: Activation,
}

/// A borrowed handle to a composite in account storage, spec.md §3.4.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageReference {
    pub owner: Location,
    pub controller: Location,
    pub key: String,
}

/// Runtime values, spec.md §3.4.
#[derive(Clone, Debug)]
pub enum Value {
    Void,
    Bool(bool),
    Int(BigInt),
    String(String),
    Address(Location),
    Optional(Option<Box<Value>>),
    Array(Vec<Value>),
    Dictionary(IndexMap<Key, Value>),
    Composite(Rc<RefCell<CompositeData>>),
    Function(Rc<Closure>),
    StorageReference(StorageReference),
    /// The any-boxed form produced by `box_any`/`convert_and_box`: the
    /// runtime type is recorded alongside the inner value so a failable
    /// downcast can recover it, spec.md §4.4.
    Any(Type, Box<Value>),
}

impl Value {
    pub fn nil() -> Value {
        Value::Optional(None)
    }

    pub fn some(v: Value) -> Value {
        Value::Optional(Some(Box::new(v)))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Optional(None))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}
