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

//! Pre/post-condition validation, spec.md §4.3: every condition's test
//! must be `Bool`, side-effect free, and (for `post`) may reference
//! `before(expr)` and the implicit `result` binding; `pre` conditions
//! may not reference either.

use crate::expr_check::check_expression;
use crate::scope::{Ctx, LocalScope, VariableBinding};
use indexmap::IndexMap;
use runic_ast::{Conditions, Expression, ExpressionKind, VariableKind};
use runic_errors::{CheckerErrorKind, Diagnostic};
use runic_span::Symbol;
use runic_types::Type;

/// Returns `false` (and emits `ImpureCondition`) the first time it
/// finds a construct that could have a side effect: an invocation (we
/// have no purity annotation to trust) or a nested function literal
/// (closures may capture and mutate outer state).
fn check_purity(handler: &runic_errors::Handler, expr: &Expression, allow_before: bool) -> bool {
    match &expr.kind {
        ExpressionKind::Invocation { .. } => {
            handler.emit_err(Diagnostic::new(expr.span, CheckerErrorKind::ImpureCondition("function calls are not permitted".to_owned())));
            false
        }
        ExpressionKind::FunctionLiteral { .. } => {
            handler.emit_err(Diagnostic::new(expr.span, CheckerErrorKind::ImpureCondition("closures are not permitted".to_owned())));
            false
        }
        ExpressionKind::Before(inner) => {
            if !allow_before {
                handler.emit_err(Diagnostic::new(expr.span, CheckerErrorKind::ImpureCondition("`before` is only permitted in post-conditions".to_owned())));
                return false;
            }
            check_purity(handler, inner, false)
        }
        ExpressionKind::Identifier(_) | ExpressionKind::Literal(_) => true,
        ExpressionKind::Binary { left, right, .. } => check_purity(handler, left, allow_before) && check_purity(handler, right, allow_before),
        ExpressionKind::Unary { operand, .. } => check_purity(handler, operand, allow_before),
        ExpressionKind::Conditional { test, then, otherwise } => {
            check_purity(handler, test, allow_before) && check_purity(handler, then, allow_before) && check_purity(handler, otherwise, allow_before)
        }
        ExpressionKind::Member { base, .. } => check_purity(handler, base, allow_before),
        ExpressionKind::Index { base, index } => check_purity(handler, base, allow_before) && check_purity(handler, index, allow_before),
        ExpressionKind::FailableDowncast { value, .. } => check_purity(handler, value, allow_before),
    }
}

fn check_one(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, condition: &runic_ast::Condition, allow_before: bool) {
    check_purity(ctx.handler, &condition.test, allow_before);
    let test_ty = check_expression(ctx, locals, expression_types, &condition.test);
    if !ctx.arena.is_equal(&test_ty, &Type::Bool) {
        ctx.handler.emit_err(Diagnostic::new(condition.test.span, CheckerErrorKind::TypeMismatch { expected: "Bool".to_owned(), found: ctx.arena.display(&test_ty) }));
    }
    if let Some(message) = &condition.message {
        check_purity(ctx.handler, message, allow_before);
        let message_ty = check_expression(ctx, locals, expression_types, message);
        if !ctx.arena.is_equal(&message_ty, &Type::String) {
            ctx.handler.emit_err(Diagnostic::new(message.span, CheckerErrorKind::TypeMismatch { expected: "String".to_owned(), found: ctx.arena.display(&message_ty) }));
        }
    }
}

/// Checks every `pre` and `post` condition of a function/transaction.
/// `return_type` binds the implicit `result` identifier inside `post`
/// (skipped when the function returns `Void`, per spec.md §4.3).
pub fn check_conditions(ctx: &mut Ctx, locals: &mut LocalScope, expression_types: &mut IndexMap<u32, Type>, conditions: &Conditions, return_type: &Type) {
    for condition in &conditions.pre {
        check_one(ctx, locals, expression_types, condition, false);
    }
    if conditions.post.is_empty() {
        return;
    }
    locals.push_frame();
    if !matches!(return_type, Type::Void) {
        let _ = locals.declare(Symbol::intern("result"), VariableBinding { ty: return_type.clone(), kind: VariableKind::Let, moved: false, declared_with_move: false });
    }
    for condition in &conditions.post {
        check_one(ctx, locals, expression_types, condition, true);
    }
    locals.pop_frame();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::GlobalScope;
    use runic_ast::Condition;
    use runic_errors::Handler;
    use runic_span::{create_session_if_not_set_then, Span};
    use runic_types::TypeArena;

    #[test]
    fn invocation_in_a_condition_is_impure() {
        create_session_if_not_set_then(|| {
            let mut arena = TypeArena::new();
            let globals = GlobalScope::new();
            let handler = Handler::new();
            let mut ctx = Ctx { arena: &mut arena, globals: &globals, handler: &handler, self_type: None };
            let mut locals = LocalScope::new();
            let mut types = IndexMap::new();
            let span = Span::dummy();
            let call = Expression {
                kind: ExpressionKind::Invocation {
                    callee: Box::new(Expression { kind: ExpressionKind::Identifier(runic_ast::Identifier::new("f", span)), span, id: 0 }),
                    arguments: Vec::new(),
                    is_move: false,
                },
                span,
                id: 1,
            };
            let conditions = Conditions { pre: vec![Condition { test: call, message: None, span }], post: Vec::new() };
            check_conditions(&mut ctx, &mut locals, &mut types, &conditions, &Type::Void);
            assert!(handler.has_errors());
        });
    }

    #[test]
    fn result_is_bound_inside_post_conditions() {
        create_session_if_not_set_then(|| {
            let mut arena = TypeArena::new();
            let globals = GlobalScope::new();
            let handler = Handler::new();
            let mut ctx = Ctx { arena: &mut arena, globals: &globals, handler: &handler, self_type: None };
            let mut locals = LocalScope::new();
            let mut types = IndexMap::new();
            let span = Span::dummy();
            let test = Expression {
                kind: ExpressionKind::Binary {
                    op: runic_ast::BinaryOp::Eq,
                    left: Box::new(Expression { kind: ExpressionKind::Identifier(runic_ast::Identifier::new("result", span)), span, id: 0 }),
                    right: Box::new(Expression { kind: ExpressionKind::Literal(runic_ast::Literal::Integer { text: "1".into(), base: 10 }), span, id: 1 }),
                },
                span,
                id: 2,
            };
            let conditions = Conditions { pre: Vec::new(), post: vec![Condition { test, message: None, span }] };
            check_conditions(&mut ctx, &mut locals, &mut types, &conditions, &Type::Int);
            assert!(!handler.has_errors());
        });
    }
}
