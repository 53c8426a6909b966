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

//! The type model (`sema::types` of spec.md §2/§4.2). Named types are
//! interned into a [`TypeArena`] keyed by type ID, with `Type::Composite`
//! and `Type::Interface` holding only an integer index into it — the
//! arena-of-types-with-a-`Checking`-placeholder design spec.md §9 calls
//! for, so that a resource holding an optional of its own type never
//! requires constructing an infinite `Type` value.

pub mod arena;
pub mod subtyping;
pub mod ty;

pub use arena::{CompositeType, FunctionType, InterfaceType, TypeArena, TypeIndex};
pub use ty::{FunctionSignature, Type};
