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

use runic_ast::Program;

/// A callback producing a parsed program for a given import location,
/// spec.md §4.3 "Inputs".
pub trait ImportResolver {
    fn resolve(&self, location: &str) -> Result<Program, String>;
}

/// An import resolver with nothing to resolve, for standalone scripts
/// and tests with no imports.
pub struct NoImports;

impl ImportResolver for NoImports {
    fn resolve(&self, location: &str) -> Result<Program, String> {
        Err(format!("no import resolver configured: cannot resolve `{location}`"))
    }
}
