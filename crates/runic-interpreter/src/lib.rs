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

//! A tree-walking interpreter for checked Runic programs, spec.md §4
//! "Execution semantics" onward: takes a checked program and a
//! storage-backed host, runs function bodies and transactions against
//! it, and hands back the events a run emitted. Type checking has
//! already happened by the time anything here runs; this crate trusts
//! the checker's proofs and only guards what it can't prove statically.

pub mod contract;
pub mod events;
pub mod eval;
pub mod invocation;
pub mod registry;
pub mod shape;
pub mod storage;
pub mod trampoline;

pub use contract::{construct, deploy as deploy_contract, load as load_contract, put as put_contract, storage_key as contract_storage_key};
pub use events::{Event, EventLog};
pub use eval::{eval_block, eval_expression, Flow, Interpreter};
pub use invocation::{check_post, check_pre, invoke};
pub use registry::FunctionRegistry;
pub use storage::{StorageBackend, StorageCache};
pub use trampoline::Bounce;
