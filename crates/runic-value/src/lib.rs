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

//! The runtime value model of spec.md §3.4: primitives, containers,
//! identity-bearing composites, closures, and storage references, plus
//! the operations of spec.md §4.4 (`equal`, `copy`, `set_owner`,
//! `destroy`, `box_optional`, `box_any`, `convert_and_box`).
//!
//! `Activation` — the persistent closure environment of spec.md §4.5 —
//! lives here rather than in `runic-interpreter`: a [`Value::Function`]
//! must capture one, and putting it in the interpreter crate would
//! make `runic-value` depend on `runic-interpreter` while
//! `runic-interpreter` also depends on `runic-value`. See DESIGN.md.

pub mod activation;
pub mod boxing;
pub mod composite;
pub mod encoding;
pub mod ops;
pub mod value;

pub use activation::Activation;
pub use composite::CompositeData;
pub use encoding::{decode, encode, EncodingError};
pub use value::{Closure, ClosureBody, Key, StorageReference, Value};
