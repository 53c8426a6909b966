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

//! Composite construction and contract storage-backed loading,
//! spec.md §6 "Contracts" and the `create` construction expression
//! (spec.md §8, end-to-end scenario 2): [`construct`] is the one place
//! that actually builds a fresh composite instance and runs its
//! initializer, shared by a plain `create R(...)` expression (no
//! owner, no storage write — the value is just handed back) and
//! contract deployment (owner set, result written to a fixed storage
//! key on the declaring account). A contract lives under that
//! well-known key for the lifetime of the account.

use crate::eval::Interpreter;
use indexmap::IndexMap;
use runic_ast::CompositeDeclaration;
use runic_errors::RuntimeResult;
use runic_errors::{Diagnostic, RuntimeErrorKind};
use runic_span::{Location, Span};
use runic_value::{Activation, CompositeData, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// The storage key a contract's single instance is kept under on its
/// declaring account.
pub fn storage_key(declaration: &CompositeDeclaration) -> String {
    format!("contract.{}", declaration.name.name)
}

/// Builds an empty field shell for `declaration` and runs its
/// initializer against it, if it has one — the initializer is what
/// actually populates every field, the same way any other composite's
/// `self.field = ...` assignment does. Returns the resulting
/// `Value::Composite` directly; it is up to the caller whether that
/// value gets written to storage (a contract's does, at `owner`) or
/// just handed back as an expression result (a plain `create R()`
/// does not touch storage at all, so `owner` is `None`).
pub fn construct(
    interp: &Interpreter,
    declaration: &CompositeDeclaration,
    type_id: &str,
    type_index: runic_types::TypeIndex,
    owner: Option<&Location>,
    arguments: Vec<Value>,
    span: Span,
) -> RuntimeResult<Value> {
    let mut shell = CompositeData::new(type_index, type_id.to_string(), IndexMap::new());
    shell.owner = owner.cloned();
    let instance = Value::Composite(Rc::new(RefCell::new(shell)));

    if let Some(initializer_body) = interp.registry.initializer(type_id) {
        let captured = Activation::new().extend(runic_span::Symbol::intern("self"), instance.clone());
        crate::invocation::invoke(interp, &initializer_body, captured, arguments, span)?;
    }

    Ok(instance)
}

/// Builds a contract's instance via [`construct`] and writes it to
/// `owner`'s storage under its fixed key. Called once, at deployment;
/// a second deployment of the same contract name on the same account
/// is a host-level decision, not this function's.
pub fn deploy(
    interp: &Interpreter,
    declaration: &CompositeDeclaration,
    type_index: runic_types::TypeIndex,
    owner: &Location,
    arguments: Vec<Value>,
    span: Span,
) -> RuntimeResult<()> {
    let type_id = declaration.type_id(owner);
    let instance = construct(interp, declaration, &type_id, type_index, Some(owner), arguments, span)?;
    interp.storage.write(owner, &storage_key(declaration), Some(instance));
    Ok(())
}

/// Loads a deployed contract's instance out of `owner`'s storage for
/// the duration of a call into it. Like any other storage read this
/// takes the slot, so the caller must write the (possibly mutated)
/// instance back with [`put`] before the execution ends, including on
/// every path — a contract method never gets to "forget" to save its
/// own state.
pub fn load(interp: &Interpreter, declaration: &CompositeDeclaration, owner: &Location, span: Span) -> RuntimeResult<Value> {
    let key = storage_key(declaration);
    match interp.storage.read(owner, &key, interp.arena, span)? {
        Some(value) => Ok(value),
        None => Err(Diagnostic::new(span, RuntimeErrorKind::MissingContract)),
    }
}

/// Writes a contract instance back to its slot after a call into it
/// completes, mirroring [`load`]'s take.
pub fn put(interp: &Interpreter, declaration: &CompositeDeclaration, owner: &Location, instance: Value) {
    interp.storage.write(owner, &storage_key(declaration), Some(instance));
}
