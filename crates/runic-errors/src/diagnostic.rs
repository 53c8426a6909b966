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

use runic_span::Span;
use std::fmt;

/// A kind-agnostic diagnostic envelope: a primary position, optional
/// secondary positions, an optional identifier, and a message. Per
/// spec.md §6 "Error payloads".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub primary: Span,
    pub secondary: Vec<Span>,
    pub identifier: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(primary: Span, message: impl fmt::Display) -> Self {
        Self { primary, secondary: Vec::new(), identifier: None, message: message.to_string() }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_secondary(mut self, span: Span) -> Self {
        self.secondary.push(span);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.primary, self.message)
    }
}

impl std::error::Error for Diagnostic {}
