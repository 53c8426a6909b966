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

//! Runic: a resource-oriented smart-contract language core — lexer and
//! parser, static checker, tree-walking interpreter, and a host
//! integration layer tying the three together. This crate is a thin
//! facade over the workspace's member crates; most consumers only
//! need what's re-exported here.
//!
//! A host embeds the language by implementing
//! [`HostInterface`](runic_runtime::HostInterface) over its own
//! storage and account model, then driving it through [`Runtime`]:
//!
//! ```no_run
//! use runic::{ExecutionLimits, Runtime, TestHost};
//! use runic_span::Location;
//!
//! let host = TestHost::new();
//! let runtime = Runtime::new(&host, ExecutionLimits::default());
//! let outcome = runtime
//!     .execute_script("let x: Bool? = true;", Location::String("script".to_owned()))
//!     .expect("script should run");
//! ```

pub use runic_ast as ast;
pub use runic_checker as checker;
pub use runic_errors as errors;
pub use runic_interpreter as interpreter;
pub use runic_parser as parser;
pub use runic_runtime as runtime;
pub use runic_span as span;
pub use runic_stdlib as stdlib;
pub use runic_types as types;
pub use runic_value as value;

pub use runic_checker::CheckedProgram;
pub use runic_errors::Diagnostic;
pub use runic_parser::parse;
pub use runic_runtime::{ExecutionError, ExecutionLimits, HostInterface, Runtime, ScriptOutcome, TestHost, TransactionOutcome};
pub use runic_span::Location;
pub use runic_value::Value;
