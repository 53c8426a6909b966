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

use crate::Diagnostic;
use std::cell::RefCell;

/// Accumulates diagnostics across a parse or check pass instead of
/// aborting on the first one (spec.md §4.3 "Error strategy", §7
/// "Propagation"). Cloned handles share the same buffer, mirroring the
/// teacher's `leo_errors::emitter::Handler`, which is `Clone` and
/// passed by value through every pass.
#[derive(Clone, Default)]
pub struct Handler {
    errors: std::rc::Rc<RefCell<Vec<Diagnostic>>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_err(&self, diagnostic: Diagnostic) {
        tracing::debug!(message = %diagnostic.message, "diagnostic emitted");
        self.errors.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.borrow().is_empty()
    }

    pub fn into_errors(self) -> Vec<Diagnostic> {
        match std::rc::Rc::try_unwrap(self.errors) {
            Ok(cell) => cell.into_inner(),
            Err(rc) => rc.borrow().clone(),
        }
    }

    /// Returns `Ok(value)` if nothing was emitted, otherwise the
    /// accumulated list. Used at the boundary of a pass to turn the
    /// accumulator into the `Result` the caller expects.
    pub fn finish<T>(self, value: T) -> Result<T, Vec<Diagnostic>> {
        if self.has_errors() {
            Err(self.into_errors())
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runic_span::Span;

    #[test]
    fn accumulates_rather_than_aborting() {
        let handler = Handler::new();
        handler.emit_err(Diagnostic::new(Span::dummy(), "first"));
        handler.emit_err(Diagnostic::new(Span::dummy(), "second"));
        assert!(handler.has_errors());
        let errors = handler.into_errors();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn finish_is_ok_when_nothing_was_emitted() {
        let handler = Handler::new();
        assert_eq!(handler.finish(42), Ok(42));
    }
}
