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

use runic_errors::Diagnostic;

/// Everything a [`crate::Runtime`] operation can fail with. `Check`
/// covers both parse and type-check failures — neither runs any user
/// code, so the host never needs to tell them apart to decide whether
/// storage was touched. `Runtime` is a single diagnostic raised while
/// interpreting; per spec.md §4.6, nothing that operation wrote is
/// ever flushed to the host.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExecutionError {
    #[error("{} diagnostic(s) reported before execution", .0.len())]
    Check(Vec<Diagnostic>),
    #[error("{0}")]
    Runtime(Diagnostic),
}
