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

//! Name resolution, type checking, move/resource analysis, conformance
//! checking, and condition validation, spec.md §4.3.

pub mod checked_program;
pub mod checker;
pub mod conditions;
pub mod expr_check;
pub mod import_resolver;
pub mod scope;
pub mod stmt_check;
pub mod type_resolver;

pub use checked_program::CheckedProgram;
pub use checker::{check_program, check_script_program, check_transaction_program};
pub use import_resolver::ImportResolver;
