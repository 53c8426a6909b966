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

//! The runtime driver, spec.md §4.6: `parse_and_check_program`,
//! `execute_script`, and `execute_transaction`. Each operation
//! constructs a fresh storage cache, resolves imports through the
//! host, parses, checks, and — for the two executing operations —
//! interprets. Successful completion flushes the storage cache and
//! hands back whatever events were emitted; any error discards both.

use crate::error::ExecutionError;
use crate::host::{HostImportResolver, HostInterface};
use crate::limits::ExecutionLimits;
use runic_ast::{Block, CompositeKind, Declaration, Program, Statement, StatementKind};
use runic_checker::{check_program, check_script_program, check_transaction_program, CheckedProgram};
use runic_errors::Handler;
use runic_interpreter::{check_post, check_pre, contract, eval_block, Event, EventLog, FunctionRegistry, Interpreter, StorageCache};
use runic_span::{create_session_if_not_set_then, Location, Span, Symbol};
use runic_value::{Activation, Value};
use tracing::instrument;

/// What a script hands back: its result value (the last top-level
/// variable's binding once the script finishes, or `Value::Void` if
/// it declared none) and the events it emitted.
#[derive(Debug)]
pub struct ScriptOutcome {
    pub result: Value,
    pub events: Vec<Event>,
}

/// What a transaction hands back. A transaction has no result value
/// of its own — only whatever it logged through `emit`.
#[derive(Debug)]
pub struct TransactionOutcome {
    pub events: Vec<Event>,
}

/// Drives checked programs against a host. Holds nothing but a
/// borrowed host and a set of execution limits, so a single host can
/// back any number of independent runtimes (or the same one reused
/// across many operations, since every operation builds its own
/// storage cache and event log).
pub struct Runtime<'h, H: HostInterface> {
    host: &'h H,
    limits: ExecutionLimits,
}

impl<'h, H: HostInterface> Runtime<'h, H> {
    pub fn new(host: &'h H, limits: ExecutionLimits) -> Self {
        Self { host, limits }
    }

    /// Parses and checks a unit of account code without running
    /// anything — the path a host uses to validate a contract before
    /// `update_account_code` writes it.
    #[instrument(skip_all)]
    pub fn parse_and_check_program(&self, source: &str, location: Location) -> Result<CheckedProgram, ExecutionError> {
        create_session_if_not_set_then(|| {
            let program = runic_parser::parse(source).map_err(ExecutionError::Check)?;
            let resolver = HostImportResolver::new(self.host);
            check_program(Handler::new(), program, location, &resolver).map_err(ExecutionError::Check)
        })
    }

    /// Checks and deploys a single contract: runs its initializer
    /// with `arguments` and writes the resulting instance into
    /// `location`'s storage under the contract's fixed storage key
    /// (spec.md §8 scenario 3). A code unit declaring more than one
    /// contract is rejected by the same `check_program` gate
    /// `parse_and_check_program` uses, surfaced here as
    /// `ExecutionError::Check`.
    #[instrument(skip_all)]
    pub fn deploy_program(&self, source: &str, location: Location, arguments: Vec<Value>) -> Result<Vec<Event>, ExecutionError> {
        create_session_if_not_set_then(|| {
            let checked = self.parse_and_check_program(source, location.clone())?;
            let declaration = checked.program.composites().find(|c| c.kind == CompositeKind::Contract).expect("check_program guarantees exactly one contract");
            let type_index = *checked.type_names.get(&declaration.name.name).expect("registered by check_program");

            let mut registry = FunctionRegistry::new();
            registry.register(&checked.program, &location);
            let storage = StorageCache::new(self.host);
            let events = EventLog::new();
            let interpreter =
                Interpreter::new(&registry, &storage, &events, &checked.arena, &checked.type_names, &location).with_step_budget(self.limits.max_steps);

            contract::deploy(&interpreter, declaration, type_index, &location, arguments, declaration.span).map_err(ExecutionError::Runtime)?;

            storage.flush(declaration.span).map_err(ExecutionError::Runtime)?;
            Ok(events.into_events())
        })
    }

    /// Runs a script: a flat top-level declaration sequence containing
    /// no `transaction` (spec.md §4.3, §8 scenario 1).
    #[instrument(skip_all)]
    pub fn execute_script(&self, source: &str, location: Location) -> Result<ScriptOutcome, ExecutionError> {
        create_session_if_not_set_then(|| {
            let program = runic_parser::parse(source).map_err(ExecutionError::Check)?;
            let resolver = HostImportResolver::new(self.host);
            let checked = check_script_program(Handler::new(), program, location.clone(), &resolver).map_err(ExecutionError::Check)?;

            let mut registry = FunctionRegistry::new();
            registry.register(&checked.program, &location);
            let storage = StorageCache::new(self.host);
            let events = EventLog::new();
            let interpreter =
                Interpreter::new(&registry, &storage, &events, &checked.arena, &checked.type_names, &location).with_step_budget(self.limits.max_steps);

            let (block, last_name) = top_level_variable_block(&checked.program);
            let mut activation = Activation::new();
            eval_block(&interpreter, &mut activation, None, &block).map_err(ExecutionError::Runtime)?;
            let result = last_name.and_then(|name| activation.get(&name).cloned()).unwrap_or(Value::Void);

            storage.flush(block.span).map_err(ExecutionError::Runtime)?;
            Ok(ScriptOutcome { result, events: events.into_events() })
        })
    }

    /// Runs a transaction: binds the host's signing accounts to the
    /// entry point's `Address`-typed parameters in order, checks any
    /// `pre`/`post` conditions around the body, and runs it (spec.md
    /// §8 scenarios 4 and 6).
    #[instrument(skip_all)]
    pub fn execute_transaction(&self, source: &str, location: Location) -> Result<TransactionOutcome, ExecutionError> {
        create_session_if_not_set_then(|| {
            let signers = self.host.get_signing_accounts();
            let program = runic_parser::parse(source).map_err(ExecutionError::Check)?;
            let resolver = HostImportResolver::new(self.host);
            let checked = check_transaction_program(Handler::new(), program, location.clone(), &resolver, signers.len()).map_err(ExecutionError::Check)?;
            let transaction = checked.program.transactions().next().expect("check_transaction_program guarantees exactly one");

            let mut registry = FunctionRegistry::new();
            registry.register(&checked.program, &location);
            let storage = StorageCache::new(self.host);
            let events = EventLog::new();
            let interpreter =
                Interpreter::new(&registry, &storage, &events, &checked.arena, &checked.type_names, &location).with_step_budget(self.limits.max_steps);

            let mut activation = Activation::new();
            for (parameter, signer) in transaction.parameters.iter().zip(&signers) {
                activation = activation.extend(parameter.name.name, Value::Address(signer.clone()));
            }

            let has_conditions = !transaction.conditions.pre.is_empty() || !transaction.conditions.post.is_empty();
            let pre_snapshot = has_conditions.then(|| activation.clone());
            if let Some(snapshot) = &pre_snapshot {
                check_pre(&interpreter, &transaction.conditions, snapshot).map_err(ExecutionError::Runtime)?;
            }

            eval_block(&interpreter, &mut activation, None, &transaction.body).map_err(ExecutionError::Runtime)?;

            if let Some(snapshot) = &pre_snapshot {
                check_post(&interpreter, &transaction.conditions, snapshot, None).map_err(ExecutionError::Runtime)?;
            }

            storage.flush(transaction.span).map_err(ExecutionError::Runtime)?;
            Ok(TransactionOutcome { events: events.into_events() })
        })
    }
}

/// Wraps a checked program's top-level `let`/`var` declarations in a
/// synthetic block so script evaluation can run them through
/// `eval_block` verbatim, the same trick `check_script_program` uses
/// for `check_block`. Returns the name of the last declaration, if
/// any — the script's result binding.
fn top_level_variable_block(program: &Program) -> (Block, Option<Symbol>) {
    let mut last_name = None;
    let statements: Vec<Statement> = program
        .declarations
        .iter()
        .filter_map(|declaration| match declaration {
            Declaration::Variable(variable) => {
                last_name = Some(variable.name.name);
                Some(Statement { kind: StatementKind::VariableDeclaration(variable.clone()), span: variable.span, id: variable.id })
            }
            _ => None,
        })
        .collect();
    let span = statements.last().map(|s| s.span).unwrap_or_else(Span::dummy);
    (Block { statements, span, id: 0 }, last_name)
}
