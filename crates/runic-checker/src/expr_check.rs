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

//! Expression type checking and move analysis, spec.md §4.3.

use crate::scope::{Ctx, LocalScope, VariableBinding};
use crate::type_resolver::resolve_type_annotation;
use indexmap::IndexMap;
use runic_ast::{BinaryOp, CompositeKind, Expression, ExpressionKind, Literal, Node, UnaryOp};
use runic_errors::{CheckerErrorKind, Diagnostic};
use runic_span::Symbol;
use runic_types::Type;

/// A bare name that isn't a local falls back to a deployed contract's
/// type: `C.n` reads a field off the contract named `C`, the same way
/// a local variable's member would, spec.md §8 scenario "contract
/// deployment and load". Structs and resources aren't resolved this
/// way — without a `create`, there's no instance to name.
fn contract_type(ctx: &Ctx, name: Symbol) -> Option<Type> {
    let declaration = ctx.globals.composite_decls.get(&name)?;
    if declaration.kind != CompositeKind::Contract {
        return None;
    }
    let index = ctx.globals.type_names.get(&name)?;
    Some(Type::Composite(*index))
}

/// Checks `expr`, records its inferred type in `expression_types`, and
/// returns it. Move/resource errors are reported but do not stop
/// traversal (spec.md §4.3 "Error strategy").
pub fn check_expression(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, expr: &Expression) -> Type {
    let ty = check_expression_kind(ctx, locals, expression_types, expr);
    expression_types.insert(expr.id(), ty.clone());
    ty
}

fn check_expression_kind(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, expr: &Expression) -> Type {
    match &expr.kind {
        ExpressionKind::Identifier(identifier) => match locals.lookup(&identifier.name) {
            Some(binding) if binding.moved => {
                ctx.handler.emit_err(Diagnostic::new(expr.span, CheckerErrorKind::ResourceUseAfterMove(identifier.name.to_string())));
                Type::Checking
            }
            Some(binding) => binding.ty.clone(),
            None => match contract_type(ctx, identifier.name) {
                Some(ty) => ty,
                None => {
                    ctx.handler.emit_err(Diagnostic::new(expr.span, CheckerErrorKind::NotDeclared(identifier.name.to_string())));
                    Type::Checking
                }
            },
        },
        ExpressionKind::Literal(literal) => check_literal(ctx, locals, expression_types, literal, expr.span),
        ExpressionKind::Binary { op, left, right } => check_binary(ctx, locals, expression_types, *op, left, right, expr.span),
        ExpressionKind::Unary { op, operand } => {
            let operand_ty = check_expression(ctx, locals, expression_types, operand);
            match op {
                UnaryOp::Negate => expect(ctx, operand.span, &operand_ty, &Type::Int),
                UnaryOp::Not => expect(ctx, operand.span, &operand_ty, &Type::Bool),
            }
        }
        ExpressionKind::Conditional { test, then, otherwise } => {
            let test_ty = check_expression(ctx, locals, expression_types, test);
            expect(ctx, test.span, &test_ty, &Type::Bool);
            let then_ty = check_expression(ctx, locals, expression_types, then);
            let else_ty = check_expression(ctx, locals, expression_types, otherwise);
            ctx.arena.common_supertype(&then_ty, &else_ty).unwrap_or_else(|| {
                ctx.handler.emit_err(Diagnostic::new(
                    expr.span,
                    CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(&then_ty), found: ctx.arena.display(&else_ty) },
                ));
                Type::Checking
            })
        }
        ExpressionKind::Member { base, member } => check_member(ctx, locals, expression_types, base, member, expr.span),
        ExpressionKind::Index { base, index } => check_index(ctx, locals, expression_types, base, index, expr.span),
        ExpressionKind::Invocation { callee, arguments, is_move } => check_invocation(ctx, locals, expression_types, callee, arguments, *is_move, expr.span),
        ExpressionKind::FunctionLiteral { parameters, return_type, body } => {
            let signature = runic_types::FunctionSignature {
                parameters: parameters.iter().map(|p| resolve_type_annotation(&p.annotated_type, &ctx.globals.type_names, ctx.handler)).collect(),
                return_type: return_type.as_ref().map(|t| resolve_type_annotation(t, &ctx.globals.type_names, ctx.handler)).unwrap_or(Type::Void),
                has_self: false,
            };
            let mut inner = LocalScope::new();
            for (param, param_ty) in parameters.iter().zip(&signature.parameters) {
                let _ = inner.declare(
                    param.name.name,
                    VariableBinding { ty: param_ty.clone(), kind: runic_ast::VariableKind::Let, moved: false, declared_with_move: false },
                );
            }
            crate::stmt_check::check_block(ctx, &mut inner, expression_types, body, &signature.return_type);
            Type::Function(Box::new(signature))
        }
        ExpressionKind::FailableDowncast { value, target } => {
            check_expression(ctx, locals, expression_types, value);
            Type::Optional(Box::new(resolve_type_annotation(target, &ctx.globals.type_names, ctx.handler)))
        }
        ExpressionKind::Before(inner) => check_expression(ctx, locals, expression_types, inner),
    }
}

fn check_literal(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, literal: &Literal, span: runic_span::Span) -> Type {
    match literal {
        Literal::Integer { .. } => Type::Int,
        Literal::String(_) => Type::String,
        Literal::Bool(_) => Type::Bool,
        Literal::Nil => Type::optional_never(),
        Literal::Array(elements) => {
            if elements.is_empty() {
                return Type::Array(Box::new(Type::Never), None);
            }
            let mut acc = check_expression(ctx, locals, expression_types, &elements[0]);
            for element in &elements[1..] {
                let element_ty = check_expression(ctx, locals, expression_types, element);
                acc = ctx.arena.common_supertype(&acc, &element_ty).unwrap_or_else(|| {
                    ctx.handler.emit_err(Diagnostic::new(
                        element.span,
                        CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(&acc), found: ctx.arena.display(&element_ty) },
                    ));
                    acc.clone()
                });
            }
            Type::Array(Box::new(acc), None)
        }
        Literal::Dictionary(entries) => {
            if entries.is_empty() {
                return Type::Dictionary(Box::new(Type::Never), Box::new(Type::Never));
            }
            let mut key_acc = None;
            let mut value_acc = None;
            for (key, value) in entries {
                let key_ty = check_expression(ctx, locals, expression_types, key);
                if !ctx.arena.is_hashable(&key_ty) {
                    ctx.handler.emit_err(Diagnostic::new(
                        key.span,
                        CheckerErrorKind::TypeMismatch { expected: "a hashable type".to_owned(), found: ctx.arena.display(&key_ty) },
                    ));
                }
                let value_ty = check_expression(ctx, locals, expression_types, value);
                key_acc = Some(match key_acc {
                    None => key_ty,
                    Some(prev) => ctx.arena.common_supertype(&prev, &key_ty).unwrap_or(prev),
                });
                value_acc = Some(match value_acc {
                    None => value_ty,
                    Some(prev) => ctx.arena.common_supertype(&prev, &value_ty).unwrap_or(prev),
                });
            }
            let _ = span;
            Type::Dictionary(Box::new(key_acc.unwrap()), Box::new(value_acc.unwrap()))
        }
    }
}

fn check_binary(
    ctx: &mut Ctx,
    locals: &mut LocalScope,
    expression_types: &mut IndexMap<u32, Type>,
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    span: runic_span::Span,
) -> Type {
    let left_ty = check_expression(ctx, locals, expression_types, left);
    let right_ty = check_expression(ctx, locals, expression_types, right);
    match op {
        BinaryOp::And | BinaryOp::Or => {
            expect(ctx, left.span, &left_ty, &Type::Bool);
            expect(ctx, right.span, &right_ty, &Type::Bool);
            Type::Bool
        }
        BinaryOp::Eq | BinaryOp::NotEq => {
            if ctx.arena.common_supertype(&left_ty, &right_ty).is_none() {
                ctx.handler.emit_err(Diagnostic::new(
                    span,
                    CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(&left_ty), found: ctx.arena.display(&right_ty) },
                ));
            }
            Type::Bool
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            expect(ctx, left.span, &left_ty, &Type::Int);
            expect(ctx, right.span, &right_ty, &Type::Int);
            Type::Bool
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            expect(ctx, left.span, &left_ty, &Type::Int);
            expect(ctx, right.span, &right_ty, &Type::Int);
            Type::Int
        }
        BinaryOp::NilCoalesce => {
            let inner = ctx.arena.unbox_optional(&left_ty);
            if !matches!(left_ty, Type::Optional(_)) {
                ctx.handler.emit_err(Diagnostic::new(
                    left.span,
                    CheckerErrorKind::TypeMismatch { expected: format!("{}?", ctx.arena.display(&inner)), found: ctx.arena.display(&left_ty) },
                ));
            }
            ctx.arena.common_supertype(&inner, &right_ty).unwrap_or(inner)
        }
    }
}

fn check_member(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, base: &Expression, member: &runic_ast::Identifier, span: runic_span::Span) -> Type {
    let base_ty = check_expression(ctx, locals, expression_types, base);
    let idx = match base_ty {
        Type::Composite(idx) => idx,
        _ => {
            ctx.handler.emit_err(Diagnostic::new(base.span, CheckerErrorKind::TypeMismatch { expected: "a composite value".to_owned(), found: ctx.arena.display(&base_ty) }));
            return Type::Checking;
        }
    };
    if let Some(composite) = ctx.arena.composite(idx) {
        if let Some(field_ty) = composite.fields.get(&member.name) {
            return field_ty.clone();
        }
        if let Some(function) = composite.functions.get(&member.name) {
            return Type::Function(Box::new(function.signature.clone()));
        }
    }
    ctx.handler.emit_err(Diagnostic::new(span, CheckerErrorKind::NotDeclared(member.name.to_string())));
    Type::Checking
}

fn check_index(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, base: &Expression, index: &Expression, span: runic_span::Span) -> Type {
    let base_ty = check_expression(ctx, locals, expression_types, base);
    let index_ty = check_expression(ctx, locals, expression_types, index);
    match base_ty {
        Type::Array(elem, _) => {
            expect(ctx, index.span, &index_ty, &Type::Int);
            *elem
        }
        Type::Dictionary(key, value) => {
            expect(ctx, index.span, &index_ty, &key);
            Type::Optional(value)
        }
        other => {
            ctx.handler.emit_err(Diagnostic::new(span, CheckerErrorKind::TypeMismatch { expected: "an array or dictionary".to_owned(), found: ctx.arena.display(&other) }));
            Type::Checking
        }
    }
}

fn check_invocation(
    ctx: &mut Ctx,
    locals: &mut LocalScope,
    expression_types: &mut IndexMap<u32, Type>,
    callee: &Expression,
    arguments: &[Expression],
    is_move: bool,
    span: runic_span::Span,
) -> Type {
    let callee_ty = if let ExpressionKind::Identifier(identifier) = &callee.kind {
        if locals.lookup(&identifier.name).is_none() {
            if let Some(function) = ctx.globals.functions.get(&identifier.name) {
                let parameters = function.parameters.iter().map(|p| resolve_type_annotation(&p.annotated_type, &ctx.globals.type_names, ctx.handler)).collect();
                let return_type = function.return_type.as_ref().map(|t| resolve_type_annotation(t, &ctx.globals.type_names, ctx.handler)).unwrap_or(Type::Void);
                expression_types.insert(callee.id(), Type::Checking);
                Type::Function(Box::new(runic_types::FunctionSignature { parameters, return_type, has_self: false }))
            } else if let Some(composite) = ctx.globals.composite_decls.get(&identifier.name).cloned() {
                let parameters = composite
                    .initializer
                    .as_ref()
                    .map(|initializer| initializer.parameters.iter().map(|p| resolve_type_annotation(&p.annotated_type, &ctx.globals.type_names, ctx.handler)).collect())
                    .unwrap_or_default();
                let type_index = *ctx.globals.type_names.get(&identifier.name).expect("composite_decls and type_names are populated together");
                expression_types.insert(callee.id(), Type::Checking);
                Type::Function(Box::new(runic_types::FunctionSignature { parameters, return_type: Type::Composite(type_index), has_self: false }))
            } else {
                ctx.handler.emit_err(Diagnostic::new(callee.span, CheckerErrorKind::NotDeclared(identifier.name.to_string())));
                Type::Checking
            }
        } else {
            check_expression(ctx, locals, expression_types, callee)
        }
    } else {
        check_expression(ctx, locals, expression_types, callee)
    };

    let signature = match callee_ty {
        Type::Function(sig) => *sig,
        Type::Checking => {
            for argument in arguments {
                check_expression(ctx, locals, expression_types, argument);
            }
            return Type::Checking;
        }
        other => {
            ctx.handler.emit_err(Diagnostic::new(callee.span, CheckerErrorKind::TypeMismatch { expected: "a function".to_owned(), found: ctx.arena.display(&other) }));
            for argument in arguments {
                check_expression(ctx, locals, expression_types, argument);
            }
            return Type::Checking;
        }
    };

    if signature.parameters.len() != arguments.len() {
        ctx.handler.emit_err(Diagnostic::new(
            span,
            CheckerErrorKind::TypeMismatch { expected: format!("{} argument(s)", signature.parameters.len()), found: format!("{} argument(s)", arguments.len()) },
        ));
    }
    for (argument, expected_ty) in arguments.iter().zip(&signature.parameters) {
        let arg_ty = check_expression(ctx, locals, expression_types, argument);
        let is_resource = ctx.arena.is_resource(expected_ty);
        if is_resource && !is_move {
            ctx.handler.emit_err(Diagnostic::new(argument.span, CheckerErrorKind::InvalidMove(ctx.arena.display(expected_ty))));
        }
        if is_resource {
            if let ExpressionKind::Identifier(identifier) = &argument.kind {
                if let Some(binding) = locals.lookup_mut(&identifier.name) {
                    binding.moved = true;
                }
            }
        }
        if !ctx.arena.is_subtype(&arg_ty, expected_ty) {
            ctx.handler.emit_err(Diagnostic::new(
                argument.span,
                CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(expected_ty), found: ctx.arena.display(&arg_ty) },
            ));
        }
    }
    signature.return_type
}

fn expect(ctx: &mut Ctx, span: runic_span::Span, actual: &Type, expected: &Type) -> Type {
    if !ctx.arena.is_subtype(actual, expected) && !ctx.arena.is_equal(actual, expected) {
        ctx.handler.emit_err(Diagnostic::new(span, CheckerErrorKind::TypeMismatch { expected: ctx.arena.display(expected), found: ctx.arena.display(actual) }));
    }
    expected.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use runic_ast::Identifier;
    use runic_errors::Handler;
    use runic_span::{create_session_if_not_set_then, Span};
    use runic_types::TypeArena;

    fn lit(kind: Literal, span: Span) -> Expression {
        Expression { kind: ExpressionKind::Literal(kind), span, id: 0 }
    }

    #[test]
    fn integer_plus_integer_is_integer() {
        create_session_if_not_set_then(|| {
            let mut arena = TypeArena::new();
            let globals = crate::scope::GlobalScope::new();
            let handler = Handler::new();
            let mut ctx = Ctx { arena: &mut arena, globals: &globals, handler: &handler, self_type: None };
            let mut locals = LocalScope::new();
            let mut types = IndexMap::new();
            let span = Span::dummy();
            let expr = Expression {
                kind: ExpressionKind::Binary {
                    op: BinaryOp::Add,
                    left: Box::new(lit(Literal::Integer { text: "1".into(), base: 10 }, span)),
                    right: Box::new(lit(Literal::Integer { text: "2".into(), base: 10 }, span)),
                },
                span,
                id: 1,
            };
            let ty = check_expression(&mut ctx, &mut locals, &mut types, &expr);
            assert_eq!(ty, Type::Int);
            assert!(!handler.has_errors());
        });
    }

    #[test]
    fn using_a_moved_binding_is_reported() {
        create_session_if_not_set_then(|| {
            let mut arena = TypeArena::new();
            let globals = crate::scope::GlobalScope::new();
            let handler = Handler::new();
            let mut ctx = Ctx { arena: &mut arena, globals: &globals, handler: &handler, self_type: None };
            let mut locals = LocalScope::new();
            let name = runic_span::Symbol::intern("r");
            locals
                .declare(name, VariableBinding { ty: Type::AnyResource, kind: runic_ast::VariableKind::Let, moved: true, declared_with_move: true })
                .unwrap();
            let mut types = IndexMap::new();
            let span = Span::dummy();
            let expr = Expression { kind: ExpressionKind::Identifier(Identifier::new("r", span)), span, id: 2 };
            let ty = check_expression(&mut ctx, &mut locals, &mut types, &expr);
            assert_eq!(ty, Type::Checking);
            assert!(handler.has_errors());
        });
    }
}
