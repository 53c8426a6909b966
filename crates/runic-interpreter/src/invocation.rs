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

//! Function invocation, spec.md §4.3/§4.5: binds arguments into the
//! closure's captured activation, checks `pre`/`post` conditions, and
//! runs the body. A call in tail position — the body's last statement
//! is `return <call>`, the idiomatic shape of an accumulator-style
//! recursive function — bounces back to [`Bounce::run`]'s loop instead
//! of recursing on the host stack; any other nested call recurses
//! normally, bounded by [`Interpreter::enter_call`]'s budget.

use crate::eval::{eval_statement, resolve_callable, Flow, Interpreter};
use crate::trampoline::Bounce;
use runic_ast::{ExpressionKind, Statement, StatementKind};
use runic_errors::{Diagnostic, RuntimeErrorKind, RuntimeResult};
use runic_span::{Span, Symbol};
use runic_value::{Activation, ClosureBody, Value};
use std::rc::Rc;

/// Invokes `body` with `arguments` bound on top of `captured`. Checks
/// `pre`/`post` conditions around the call (a `post` condition may
/// reference the pre-call state through `before(...)`), then runs the
/// body, bouncing through the trampoline for tail calls.
pub fn invoke(interp: &Interpreter, body: &Rc<ClosureBody>, captured: Activation, arguments: Vec<Value>, span: Span) -> RuntimeResult<Value> {
    interp.enter_call(span)?;
    let has_conditions = !body.conditions.pre.is_empty() || !body.conditions.post.is_empty();
    let pre_snapshot = has_conditions.then(|| bind_parameters(captured.clone(), body, arguments.clone()));
    if let Some(snapshot) = &pre_snapshot {
        if let Err(err) = check_pre(interp, &body.conditions, snapshot) {
            interp.exit_call();
            return Err(err);
        }
    }

    let result = invoke_bounced(interp, Rc::clone(body), captured, arguments, span).run();
    interp.exit_call();
    let result = result?;

    if let Some(snapshot) = &pre_snapshot {
        check_post(interp, &body.conditions, snapshot, Some(&result))?;
    }
    Ok(result)
}

fn bind_parameters(captured: Activation, body: &ClosureBody, arguments: Vec<Value>) -> Activation {
    let mut activation = captured;
    for (parameter, argument) in body.parameters.iter().zip(arguments) {
        activation = activation.extend(parameter.name.name, argument);
    }
    activation
}

fn invoke_bounced<'f>(interp: &'f Interpreter, body: Rc<ClosureBody>, captured: Activation, arguments: Vec<Value>, span: Span) -> Bounce<'f, RuntimeResult<Value>> {
    let mut activation = bind_parameters(captured, &body, arguments);

    let statements = &body.body.statements;
    let Some((last, rest)) = statements.split_last() else {
        return Bounce::Done(Ok(Value::Void));
    };

    for statement in rest {
        match eval_statement(interp, &mut activation, None, statement) {
            Ok(Flow::Normal) => {}
            Ok(Flow::Return(value)) => return Bounce::Done(Ok(value)),
            Ok(Flow::Break) | Ok(Flow::Continue) => return Bounce::Done(Err(not_a_loop(statement.span))),
            Err(err) => return Bounce::Done(Err(err)),
        }
    }

    match tail_call(interp, &mut activation, last, span) {
        Some(bounce) => bounce,
        None => match eval_statement(interp, &mut activation, None, last) {
            Ok(Flow::Return(value)) => Bounce::Done(Ok(value)),
            Ok(Flow::Normal) => Bounce::Done(Ok(Value::Void)),
            Ok(Flow::Break) | Ok(Flow::Continue) => Bounce::Done(Err(not_a_loop(last.span))),
            Err(err) => Bounce::Done(Err(err)),
        },
    }
}

/// If `statement` is `return <call>`, evaluates the call's arguments
/// and callee eagerly but defers the call itself to the next
/// trampoline step instead of recursing.
fn tail_call<'f>(interp: &'f Interpreter, activation: &mut Activation, statement: &Statement, span: Span) -> Option<Bounce<'f, RuntimeResult<Value>>> {
    let StatementKind::Return(Some(expr)) = &statement.kind else { return None };
    let ExpressionKind::Invocation { callee, arguments, .. } = &expr.kind else { return None };

    let mut argument_values = Vec::with_capacity(arguments.len());
    for argument in arguments {
        match crate::eval::eval_expression(interp, activation, None, argument) {
            Ok(v) => argument_values.push(v),
            Err(e) => return Some(Bounce::Done(Err(e))),
        }
    }
    let (next_body, next_captured) = match resolve_callable(interp, activation, None, callee, expr.span) {
        Ok(pair) => pair,
        Err(e) => return Some(Bounce::Done(Err(e))),
    };
    Some(Bounce::More(Box::new(move || invoke_bounced(interp, next_body, next_captured, argument_values, span))))
}

fn not_a_loop(span: Span) -> Diagnostic {
    Diagnostic::new(span, RuntimeErrorKind::Unreachable)
}

/// Checks every `pre` condition against the call's activation, after
/// arguments are bound but before the body runs. Exposed beyond
/// function invocation since a transaction's own `pre`/`post` clauses
/// (spec.md §4.3) share the exact same `Conditions` shape and need the
/// identical check, without a `ClosureBody` to invoke through.
pub fn check_pre(interp: &Interpreter, conditions: &runic_ast::Conditions, activation: &Activation) -> RuntimeResult<()> {
    let mut pre = activation.clone();
    for condition in &conditions.pre {
        let ok = crate::eval::eval_expression(interp, &mut pre, None, &condition.test)?.as_bool().unwrap_or(false);
        if !ok {
            return Err(Diagnostic::new(condition.span, RuntimeErrorKind::PreConditionFailed(condition_message(interp, &mut pre, condition)?)));
        }
    }
    Ok(())
}

/// Checks every `post` condition once the call (including any tail
/// hops) has returned, with `result` bound when the function returns a
/// value. `before(...)` sub-expressions are evaluated against
/// `pre_activation`, the snapshot taken before the body ran.
pub fn check_post(interp: &Interpreter, conditions: &runic_ast::Conditions, pre_activation: &Activation, result: Option<&Value>) -> RuntimeResult<()> {
    if conditions.post.is_empty() {
        return Ok(());
    }
    let mut post = pre_activation.clone();
    if let Some(value) = result {
        post = post.extend(Symbol::intern("result"), value.clone());
    }
    for condition in &conditions.post {
        let ok = crate::eval::eval_expression(interp, &mut post, Some(pre_activation), &condition.test)?.as_bool().unwrap_or(false);
        if !ok {
            return Err(Diagnostic::new(condition.span, RuntimeErrorKind::PostConditionFailed(condition_message(interp, &mut post, condition)?)));
        }
    }
    Ok(())
}

fn condition_message(interp: &Interpreter, activation: &mut Activation, condition: &runic_ast::Condition) -> RuntimeResult<Option<String>> {
    match &condition.message {
        None => Ok(None),
        Some(expr) => match crate::eval::eval_expression(interp, activation, None, expr)? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        },
    }
}
