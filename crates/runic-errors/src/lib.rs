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

//! The error taxonomy of spec.md §7: one kind enum per subsystem, a
//! common `Diagnostic` envelope, and a `Handler` that accumulates
//! parse/check diagnostics instead of aborting on the first one.

pub mod diagnostic;
pub mod handler;
pub mod kinds;

pub use diagnostic::Diagnostic;
pub use handler::Handler;
pub use kinds::{CheckerErrorKind, ParserErrorKind, RuntimeErrorKind};

/// The result type used by runtime operations, which abort eagerly
/// (spec.md §7 "Propagation") rather than accumulating.
pub type RuntimeResult<T> = Result<T, Diagnostic>;
