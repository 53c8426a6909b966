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

//! Statement checking, including the move/resource-loss analysis of
//! spec.md §4.3 rule 3: every resource binding still alive at the end
//! of a block, and not returned or reassigned, is a `ResourceLoss`
//! error.

use crate::expr_check::check_expression;
use crate::scope::{Ctx, LocalScope, VariableBinding};
use crate::type_resolver::resolve_type_annotation;
use indexmap::IndexMap;
use runic_ast::{Block, ElseClause, IfStatement, IfTest, Statement, StatementKind};
use runic_errors::{CheckerErrorKind, Diagnostic};
use runic_types::Type;

/// Checks a function/transaction/function-literal body: pushes a fresh
/// frame, checks every statement, and flags resources still alive when
/// the frame closes.
pub fn check_block(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, block: &Block, expected_return: &Type) {
    locals.push_frame();
    for statement in &block.statements {
        check_statement(ctx, locals, expression_types, statement, expected_return);
    }
    let frame = locals.pop_frame();
    for (name, binding) in frame {
        if !binding.moved && ctx.arena.is_resource(&binding.ty) {
            ctx.handler.emit_err(Diagnostic::new(block.span, CheckerErrorKind::ResourceLoss(name.to_string())));
        }
    }
}

fn check_statement(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, statement: &Statement, expected_return: &Type) {
    match &statement.kind {
        StatementKind::Return(value) => {
            let actual = match value {
                Some(expr) => check_expression(ctx, locals, expression_types, expr),
                None => Type::Void,
            };
            if !ctx.arena.is_subtype(&actual, expected_return) {
                ctx.handler.emit_err(Diagnostic::new(
                    statement.span,
                    CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(expected_return), found: ctx.arena.display(&actual) },
                ));
            }
        }
        StatementKind::Break | StatementKind::Continue => {}
        StatementKind::If(if_statement) => check_if(ctx, locals, expression_types, if_statement, expected_return),
        StatementKind::While { test, body } => {
            let test_ty = check_expression(ctx, locals, expression_types, test);
            if !ctx.arena.is_equal(&test_ty, &Type::Bool) {
                ctx.handler.emit_err(Diagnostic::new(test.span, CheckerErrorKind::TypeMismatch { expected: "Bool".to_owned(), found: ctx.arena.display(&test_ty) }));
            }
            check_block(ctx, locals, expression_types, body, expected_return);
        }
        StatementKind::VariableDeclaration(declaration) => {
            let value_ty = check_expression(ctx, locals, expression_types, &declaration.value);
            let declared_ty = match &declaration.annotated_type {
                Some(annotation) => {
                    let annotated = resolve_type_annotation(annotation, &ctx.globals.type_names, ctx.handler);
                    if !ctx.arena.is_subtype(&value_ty, &annotated) {
                        ctx.handler.emit_err(Diagnostic::new(
                            declaration.value.span,
                            CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(&annotated), found: ctx.arena.display(&value_ty) },
                        ));
                    }
                    annotated
                }
                None => value_ty,
            };
            if ctx.arena.is_resource(&declared_ty) && !declaration.is_move {
                ctx.handler.emit_err(Diagnostic::new(declaration.value.span, CheckerErrorKind::InvalidMove(ctx.arena.display(&declared_ty))));
            }
            if locals.declare(
                declaration.name.name,
                VariableBinding { ty: declared_ty, kind: declaration.kind, moved: false, declared_with_move: declaration.is_move },
            )
            .is_err()
            {
                ctx.handler.emit_err(Diagnostic::new(declaration.name.span, CheckerErrorKind::Redeclaration(declaration.name.name.to_string())));
            }
        }
        StatementKind::Assignment { target, value, is_move } => {
            let target_ty = check_expression(ctx, locals, expression_types, target);
            let value_ty = check_expression(ctx, locals, expression_types, value);
            if ctx.arena.is_resource(&target_ty) && !is_move {
                ctx.handler.emit_err(Diagnostic::new(value.span, CheckerErrorKind::InvalidMove(ctx.arena.display(&target_ty))));
            }
            if !ctx.arena.is_subtype(&value_ty, &target_ty) {
                ctx.handler.emit_err(Diagnostic::new(
                    value.span,
                    CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(&target_ty), found: ctx.arena.display(&value_ty) },
                ));
            }
            if let runic_ast::ExpressionKind::Identifier(identifier) = &target.kind {
                if let Some(binding) = locals.lookup(&identifier.name) {
                    if binding.kind == runic_ast::VariableKind::Let {
                        ctx.handler.emit_err(Diagnostic::new(target.span, CheckerErrorKind::InvalidAccess(identifier.name.to_string())));
                    }
                }
                if let Some(binding) = locals.lookup_mut(&identifier.name) {
                    binding.moved = false;
                }
            }
        }
        StatementKind::Expression(expr) => {
            check_expression(ctx, locals, expression_types, expr);
        }
        StatementKind::Emit { event, arguments } => {
            let event_idx = ctx.globals.type_names.get(&event.name).copied();
            match event_idx.and_then(|idx| ctx.arena.composite(idx)) {
                Some(composite) => {
                    if arguments.len() != composite.fields.len() {
                        ctx.handler.emit_err(Diagnostic::new(
                            statement.span,
                            CheckerErrorKind::TypeMismatch {
                                expected: format!("{} argument(s)", composite.fields.len()),
                                found: format!("{} argument(s)", arguments.len()),
                            },
                        ));
                    }
                    let field_types: Vec<Type> = composite.fields.values().cloned().collect();
                    for (argument, field_ty) in arguments.iter().zip(&field_types) {
                        let argument_ty = check_expression(ctx, locals, expression_types, argument);
                        if !ctx.arena.is_subtype(&argument_ty, field_ty) {
                            ctx.handler.emit_err(Diagnostic::new(
                                argument.span,
                                CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(field_ty), found: ctx.arena.display(&argument_ty) },
                            ));
                        }
                    }
                }
                None => {
                    ctx.handler.emit_err(Diagnostic::new(event.span, CheckerErrorKind::NotDeclared(event.name.to_string())));
                    for argument in arguments {
                        check_expression(ctx, locals, expression_types, argument);
                    }
                }
            }
        }
    }
}

fn check_if(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, if_statement: &IfStatement, expected_return: &Type) {
    match &if_statement.test {
        IfTest::Expression(test) => {
            let test_ty = check_expression(ctx, locals, expression_types, test);
            if !ctx.arena.is_equal(&test_ty, &Type::Bool) {
                ctx.handler.emit_err(Diagnostic::new(test.span, CheckerErrorKind::TypeMismatch { expected: "Bool".to_owned(), found: ctx.arena.display(&test_ty) }));
            }
            check_block(ctx, locals, expression_types, &if_statement.then, expected_return);
        }
        IfTest::Binding { kind, name, value } => {
            // The bound name is in scope for `then` only, spec.md §3.2.
            let value_ty = check_expression(ctx, locals, expression_types, value);
            let bound_ty = ctx.arena.unbox_optional(&value_ty);
            if !matches!(value_ty, Type::Optional(_)) {
                ctx.handler.emit_err(Diagnostic::new(
                    value.span,
                    CheckerErrorKind::TypeMismatch { expected: format!("{}?", ctx.arena.display(&bound_ty)), found: ctx.arena.display(&value_ty) },
                ));
            }
            locals.push_frame();
            let _ = locals.declare(name.name, VariableBinding { ty: bound_ty, kind: *kind, moved: false, declared_with_move: false });
            check_block(ctx, locals, expression_types, &if_statement.then, expected_return);
            let frame = locals.pop_frame();
            for (bound_name, binding) in frame {
                if !binding.moved && ctx.arena.is_resource(&binding.ty) {
                    ctx.handler.emit_err(Diagnostic::new(if_statement.span, CheckerErrorKind::ResourceLoss(bound_name.to_string())));
                }
            }
        }
    }
    match &if_statement.otherwise {
        Some(ElseClause::Block(block)) => check_block(ctx, locals, expression_types, block, expected_return),
        Some(ElseClause::If(nested)) => check_if(ctx, locals, expression_types, nested, expected_return),
        None => {}
    }
}
