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

//! Event emission, spec.md §4.5: events accumulate in memory during
//! execution and are only handed to the host once the whole execution
//! has committed — a runtime error drops every event emitted so far,
//! the same way storage writes are dropped.

use runic_span::Symbol;
use runic_value::Value;

/// One emitted event: its qualified identifier (spec.md §4.5,
/// `Location::qualifier` plus the event's declared name) and its
/// field values in declaration order.
#[derive(Clone, Debug)]
pub struct Event {
    pub qualified_id: String,
    pub fields: Vec<(Symbol, Value)>,
}

/// An append-only buffer of events emitted during one execution.
#[derive(Default)]
pub struct EventLog {
    events: std::cell::RefCell<Vec<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// Hands the accumulated events to the caller; called only when an
    /// execution fully succeeds. Dropping the log without calling this
    /// (on a runtime error) is how events are rolled back.
    pub fn into_events(self) -> Vec<Event> {
        self.events.into_inner()
    }
}
