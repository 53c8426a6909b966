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

use crate::arena::TypeIndex;
use std::fmt;

/// A type, spec.md §3.3. Composite and interface types carry only an
/// arena index; their field/method lists live in the `TypeArena`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Int,
    String,
    Address,
    Void,
    /// The bottom type; subtype of everything, per spec.md §4.2.
    Never,
    Optional(Box<Type>),
    /// `Array(element, None)` is variable-size; `Array(element, Some(n))`
    /// is fixed-size of length `n` (length is part of identity).
    Array(Box<Type>, Option<u64>),
    Dictionary(Box<Type>, Box<Type>),
    Function(Box<FunctionSignature>),
    Composite(TypeIndex),
    Interface(TypeIndex),
    AnyStruct,
    AnyResource,
    /// Placeholder used while a cyclic declaration is still being
    /// resolved; never observed outside the checker.
    Checking,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub parameters: Vec<Type>,
    pub return_type: Type,
    pub has_self: bool,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "Bool"),
            Type::Int => write!(f, "Int"),
            Type::String => write!(f, "String"),
            Type::Address => write!(f, "Address"),
            Type::Void => write!(f, "Void"),
            Type::Never => write!(f, "Never"),
            Type::Optional(t) => write!(f, "{t}?"),
            Type::Array(t, Some(n)) => write!(f, "[{t}; {n}]"),
            Type::Array(t, None) => write!(f, "[{t}]"),
            Type::Dictionary(k, v) => write!(f, "{{{k}: {v}}}"),
            Type::Function(sig) => write!(
                f,
                "fun({}): {}",
                sig.parameters.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", "),
                sig.return_type
            ),
            Type::Composite(idx) | Type::Interface(idx) => write!(f, "<type#{}>", idx.0),
            Type::AnyStruct => write!(f, "AnyStruct"),
            Type::AnyResource => write!(f, "AnyResource"),
            Type::Checking => write!(f, "<checking>"),
        }
    }
}

impl Type {
    pub fn optional_never() -> Type {
        Type::Optional(Box::new(Type::Never))
    }
}
