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

//! The checker driver, spec.md §4.3: resolves imports, registers
//! types, checks every body, validates the top-level restrictions that
//! distinguish account code from a transaction program, and turns
//! accumulated diagnostics into a `Result`.

use crate::checked_program::CheckedProgram;
use crate::conditions::check_conditions;
use crate::import_resolver::ImportResolver;
use crate::scope::{Ctx, GlobalScope, LocalScope, VariableBinding};
use crate::stmt_check::check_block;
use crate::type_resolver::{reserve_declarations, resolve_declarations, resolve_type_annotation};
use indexmap::IndexMap;
use runic_ast::{Block, CompositeKind, Declaration, Program, Statement, StatementKind, TypeAnnotationKind};
use runic_errors::{CheckerErrorKind, Diagnostic, Handler, RuntimeErrorKind};
use runic_span::Location;
use runic_types::TypeArena;
use tracing::instrument;

/// Merges a program's own declarations with those pulled in through
/// its `import` statements. Each imported module is resolved at its
/// own location so two modules that each declare a type of the same
/// bare name don't collide in the arena.
fn flatten_imports(program: &Program, resolver: &dyn ImportResolver, handler: &Handler) -> Vec<(Location, Program)> {
    let mut units = Vec::new();
    for declaration in &program.declarations {
        if let Declaration::Import(import) = declaration {
            match resolver.resolve(&import.location) {
                Ok(imported) => {
                    let import_location = Location::String(import.location.clone());
                    units.extend(flatten_imports(&imported, resolver, handler));
                    units.push((import_location, imported));
                }
                Err(message) => handler.emit_err(Diagnostic::new(import.span, CheckerErrorKind::NotDeclared(message))),
            }
        }
    }
    units
}

fn register_and_resolve_types(units: &[(Location, Program)], local: &Program, local_location: &Location, arena: &mut TypeArena, globals: &mut GlobalScope, handler: &Handler) {
    for (location, program) in units {
        reserve_declarations(program, location, arena, globals);
    }
    reserve_declarations(local, local_location, arena, globals);
    for (_, program) in units {
        resolve_declarations(program, globals, arena, handler);
    }
    resolve_declarations(local, globals, arena, handler);
}

fn check_conformances(globals: &GlobalScope, arena: &TypeArena, handler: &Handler) {
    for composite_decl in globals.composite_decls.values() {
        let idx = *globals.type_names.get(&composite_decl.name.name).expect("registered");
        let composite = match arena.composite(idx) {
            Some(c) => c,
            None => continue,
        };
        for conformance_idx in &composite.conformances {
            if let Err(reason) = arena.conforms(composite, *conformance_idx) {
                let interface_name = arena.type_id_of(*conformance_idx).unwrap_or("<unknown>").to_owned();
                handler.emit_err(Diagnostic::new(
                    composite_decl.span,
                    CheckerErrorKind::InvalidConformance { composite: composite.type_id.clone(), interface: interface_name, reason },
                ));
            }
        }
    }
}

fn check_function_bodies(globals: &GlobalScope, arena: &mut TypeArena, handler: &Handler, expression_types: &mut IndexMap<u32, runic_types::Type>) {
    for function in globals.functions.values() {
        let return_type = function.return_type.as_ref().map(|t| resolve_type_annotation(t, &globals.type_names, handler)).unwrap_or(runic_types::Type::Void);
        let mut ctx = Ctx { arena: &mut *arena, globals, handler, self_type: None };
        let mut locals = LocalScope::new();
        for parameter in &function.parameters {
            let ty = resolve_type_annotation(&parameter.annotated_type, &ctx.globals.type_names, ctx.handler);
            let _ = locals.declare(parameter.name.name, VariableBinding { ty, kind: runic_ast::VariableKind::Let, moved: false, declared_with_move: false });
        }
        check_conditions(&mut ctx, &mut locals, expression_types, &function.conditions, &return_type);
        check_block(&mut ctx, &mut locals, expression_types, &function.body, &return_type);
    }

    for composite_decl in globals.composite_decls.values() {
        let self_idx = *globals.type_names.get(&composite_decl.name.name).expect("registered");
        let self_type = runic_types::Type::Composite(self_idx);
        let functions_and_initializer = composite_decl.functions.iter().chain(composite_decl.initializer.iter());
        for function in functions_and_initializer {
            let return_type = function.return_type.as_ref().map(|t| resolve_type_annotation(t, &globals.type_names, handler)).unwrap_or(runic_types::Type::Void);
            let mut ctx = Ctx { arena: &mut *arena, globals, handler, self_type: Some(self_type.clone()) };
            let mut locals = LocalScope::new();
            if function.has_self {
                let _ = locals.declare(
                    runic_span::Symbol::intern("self"),
                    VariableBinding { ty: self_type.clone(), kind: runic_ast::VariableKind::Let, moved: false, declared_with_move: false },
                );
            }
            for parameter in &function.parameters {
                let ty = resolve_type_annotation(&parameter.annotated_type, &ctx.globals.type_names, ctx.handler);
                let _ = locals.declare(parameter.name.name, VariableBinding { ty, kind: runic_ast::VariableKind::Let, moved: false, declared_with_move: false });
            }
            check_conditions(&mut ctx, &mut locals, expression_types, &function.conditions, &return_type);
            check_block(&mut ctx, &mut locals, expression_types, &function.body, &return_type);
        }
    }
}

/// Checks a unit of account code: only `import`, contract, and
/// contract-interface declarations may appear at the top level, and at
/// most one contract may be declared (spec.md §4.3 "Top-level
/// restrictions").
#[instrument(skip_all)]
pub fn check_program(handler: Handler, program: Program, location: Location, resolver: &dyn ImportResolver) -> Result<CheckedProgram, Vec<Diagnostic>> {
    let mut contract_count = 0usize;
    for declaration in &program.declarations {
        match declaration {
            Declaration::Import(_) => {}
            Declaration::Composite(c) if c.kind == CompositeKind::Contract => contract_count += 1,
            Declaration::Interface(i) if i.kind == CompositeKind::Contract => {}
            other => handler.emit_err(Diagnostic::new(other.span(), CheckerErrorKind::InvalidTopLevelDeclaration)),
        }
    }
    if contract_count > 1 {
        handler.emit_err(Diagnostic::new(runic_span::Span::dummy(), RuntimeErrorKind::MultipleContractsDeclared(contract_count)));
    }
    if contract_count == 0 {
        handler.emit_err(Diagnostic::new(runic_span::Span::dummy(), CheckerErrorKind::MissingEntryPoint));
    }

    let units = flatten_imports(&program, resolver, &handler);
    let mut arena = TypeArena::new();
    let mut globals = GlobalScope::new();
    register_and_resolve_types(&units, &program, &location, &mut arena, &mut globals, &handler);
    check_conformances(&globals, &arena, &handler);
    let mut expression_types = IndexMap::new();
    check_function_bodies(&globals, &mut arena, &handler, &mut expression_types);

    let type_names = globals.type_names.clone();
    handler.finish(CheckedProgram::new(program, arena, expression_types, type_names))
}

/// Checks a transaction program: exactly one `transaction` declaration,
/// whose parameters must all be `Address`-typed signers and whose count
/// must match the number of signers the host will supply (spec.md §4.3).
#[instrument(skip_all)]
pub fn check_transaction_program(handler: Handler, program: Program, location: Location, resolver: &dyn ImportResolver, signer_count: usize) -> Result<CheckedProgram, Vec<Diagnostic>> {
    let transactions: Vec<_> = program.transactions().collect();
    if transactions.len() != 1 {
        handler.emit_err(Diagnostic::new(runic_span::Span::dummy(), CheckerErrorKind::InvalidTransactionCount(transactions.len())));
    }

    let units = flatten_imports(&program, resolver, &handler);
    let mut arena = TypeArena::new();
    let mut globals = GlobalScope::new();
    register_and_resolve_types(&units, &program, &location, &mut arena, &mut globals, &handler);
    check_conformances(&globals, &arena, &handler);
    let mut expression_types = IndexMap::new();
    check_function_bodies(&globals, &mut arena, &handler, &mut expression_types);

    if let Some(transaction) = transactions.first() {
        if transaction.parameters.len() != signer_count {
            handler.emit_err(Diagnostic::new(
                transaction.span,
                CheckerErrorKind::InvalidTransactionParameterCount { declared: transaction.parameters.len(), signers: signer_count },
            ));
        }
        for parameter in &transaction.parameters {
            let is_signer = matches!(&parameter.annotated_type.kind, TypeAnnotationKind::Address);
            if !is_signer {
                handler.emit_err(Diagnostic::new(parameter.span, CheckerErrorKind::InvalidTransactionParameter(format!("{:?}", parameter.annotated_type.kind))));
            }
        }

        let mut ctx = Ctx { arena: &mut arena, globals: &globals, handler: &handler, self_type: None };
        let mut locals = LocalScope::new();
        for parameter in &transaction.parameters {
            let ty = resolve_type_annotation(&parameter.annotated_type, &ctx.globals.type_names, ctx.handler);
            let _ = locals.declare(parameter.name.name, VariableBinding { ty, kind: runic_ast::VariableKind::Let, moved: false, declared_with_move: false });
        }
        check_conditions(&mut ctx, &mut locals, &mut expression_types, &transaction.conditions, &runic_types::Type::Void);
        check_block(&mut ctx, &mut locals, &mut expression_types, &transaction.body, &runic_types::Type::Void);
    }

    let type_names = globals.type_names.clone();
    handler.finish(CheckedProgram::new(program, arena, expression_types, type_names))
}

/// Checks a script: top-level `import`, function, composite, interface,
/// and variable declarations with no `transaction` among them (spec.md
/// §4.3, §8 scenario 1 — a bare `let x: Bool? = true` is a complete
/// script on its own, with no designated entry function). The top-level
/// `let`/`var` declarations are checked by wrapping them in a synthetic
/// block and running them through the same `check_block` an ordinary
/// function body goes through, rather than duplicating its move and
/// resource-loss analysis here.
#[instrument(skip_all)]
pub fn check_script_program(handler: Handler, program: Program, location: Location, resolver: &dyn ImportResolver) -> Result<CheckedProgram, Vec<Diagnostic>> {
    for declaration in &program.declarations {
        if let Declaration::Transaction(_) = declaration {
            handler.emit_err(Diagnostic::new(declaration.span(), CheckerErrorKind::InvalidTopLevelDeclaration));
        }
    }

    let units = flatten_imports(&program, resolver, &handler);
    let mut arena = TypeArena::new();
    let mut globals = GlobalScope::new();
    register_and_resolve_types(&units, &program, &location, &mut arena, &mut globals, &handler);
    check_conformances(&globals, &arena, &handler);
    let mut expression_types = IndexMap::new();
    check_function_bodies(&globals, &mut arena, &handler, &mut expression_types);

    let top_level_variables: Vec<Statement> = program
        .declarations
        .iter()
        .filter_map(|declaration| match declaration {
            Declaration::Variable(variable) => {
                Some(Statement { kind: StatementKind::VariableDeclaration(variable.clone()), span: variable.span, id: variable.id })
            }
            _ => None,
        })
        .collect();
    let script_block = Block { statements: top_level_variables, span: runic_span::Span::dummy(), id: 0 };
    let mut ctx = Ctx { arena: &mut arena, globals: &globals, handler: &handler, self_type: None };
    let mut locals = LocalScope::new();
    check_block(&mut ctx, &mut locals, &mut expression_types, &script_block, &runic_types::Type::Void);

    let type_names = globals.type_names.clone();
    handler.finish(CheckedProgram::new(program, arena, expression_types, type_names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import_resolver::NoImports;
    use runic_ast::{Access, CompositeDeclaration, Identifier};
    use runic_span::{create_session_if_not_set_then, Span};

    fn empty_block() -> runic_ast::Block {
        runic_ast::Block { statements: Vec::new(), span: Span::dummy(), id: 0 }
    }

    #[test]
    fn account_code_with_no_contract_is_missing_an_entry_point() {
        create_session_if_not_set_then(|| {
            let program = Program { declarations: Vec::new() };
            let handler = Handler::new();
            let result = check_program(handler, program, Location::String("0x1".to_owned()), &NoImports);
            let errors = result.expect_err("expected diagnostics");
            assert!(errors.iter().any(|d| d.message.contains("entry point")));
        });
    }

    #[test]
    fn a_single_contract_with_no_body_checks_cleanly() {
        create_session_if_not_set_then(|| {
            let span = Span::dummy();
            let composite = CompositeDeclaration {
                kind: CompositeKind::Contract,
                access: Access::Public,
                name: Identifier::new("Vault", span),
                conformances: Vec::new(),
                fields: Vec::new(),
                functions: Vec::new(),
                initializer: None,
                span,
                id: 0,
            };
            let program = Program { declarations: vec![Declaration::Composite(composite)] };
            let handler = Handler::new();
            let result = check_program(handler, program, Location::String("0x1".to_owned()), &NoImports);
            assert!(result.is_ok());
        });
    }

    #[test]
    fn transaction_parameter_count_must_match_signer_count() {
        create_session_if_not_set_then(|| {
            let span = Span::dummy();
            let transaction = runic_ast::TransactionDeclaration {
                parameters: Vec::new(),
                conditions: runic_ast::Conditions::default(),
                body: empty_block(),
                span,
                id: 0,
            };
            let program = Program { declarations: vec![Declaration::Transaction(transaction)] };
            let handler = Handler::new();
            let result = check_transaction_program(handler, program, Location::String("0x1".to_owned()), &NoImports, 1);
            let errors = result.expect_err("expected a signer-count mismatch");
            assert!(errors.iter().any(|d| d.message.contains("signing accounts")));
        });
    }

    #[test]
    fn a_bare_top_level_let_checks_as_a_script() {
        create_session_if_not_set_then(|| {
            let span = Span::dummy();
            let variable = runic_ast::VariableDeclaration {
                kind: runic_ast::VariableKind::Let,
                access: Access::NotSpecified,
                name: Identifier::new("x", span),
                annotated_type: Some(runic_ast::TypeAnnotation { kind: runic_ast::TypeAnnotationKind::Bool, span, id: 0 }),
                value: runic_ast::Expression { kind: runic_ast::ExpressionKind::Literal(runic_ast::Literal::Bool(true)), span, id: 1 },
                is_move: false,
                span,
                id: 2,
            };
            let program = Program { declarations: vec![Declaration::Variable(variable)] };
            let handler = Handler::new();
            let result = check_script_program(handler, program, Location::String("0x1".to_owned()), &NoImports);
            assert!(result.is_ok());
        });
    }

    #[test]
    fn a_script_cannot_contain_a_transaction() {
        create_session_if_not_set_then(|| {
            let span = Span::dummy();
            let transaction = runic_ast::TransactionDeclaration {
                parameters: Vec::new(),
                conditions: runic_ast::Conditions::default(),
                body: empty_block(),
                span,
                id: 0,
            };
            let program = Program { declarations: vec![Declaration::Transaction(transaction)] };
            let handler = Handler::new();
            let result = check_script_program(handler, program, Location::String("0x1".to_owned()), &NoImports);
            let errors = result.expect_err("expected a top-level restriction violation");
            assert!(errors.iter().any(|d| d.message.contains("top level")));
        });
    }
}
