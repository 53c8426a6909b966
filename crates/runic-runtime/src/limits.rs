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

//! Host-configurable execution limits, spec.md §5 "Cancellation and
//! timeouts": the core does not schedule or time anything out on its
//! own, but a host wrapping the trampoline step needs somewhere to
//! plug its own budget in.

/// Caps threaded into an [`Interpreter`](runic_interpreter::eval::Interpreter)
/// for a single execution.
#[derive(Clone, Copy, Debug)]
pub struct ExecutionLimits {
    /// Upper bound on the number of statements a single execution may
    /// run, fed directly to `Interpreter::with_step_budget`.
    pub max_steps: u64,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self { max_steps: 1_000_000 }
    }
}
