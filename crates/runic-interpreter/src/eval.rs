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

//! Statement and expression evaluation, spec.md §4.4/§4.5. Types have
//! already been checked; this module trusts the checker's proofs and
//! only guards against the things it cannot prove statically —
//! arithmetic overflow, division by zero, and out-of-range indices.

use crate::registry::FunctionRegistry;
use crate::storage::StorageCache;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use runic_ast::{BinaryOp, Block, CompositeKind, ElseClause, Expression, ExpressionKind, IfStatement, IfTest, Literal, Statement, StatementKind, UnaryOp};
use runic_errors::{Diagnostic, RuntimeErrorKind, RuntimeResult};
use runic_span::{Location, Span, Symbol};
use runic_types::{TypeArena, TypeIndex};
use runic_value::{Activation, Closure, ClosureBody, Key, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// How a statement or block finished, spec.md §4.4 "Control flow".
pub enum Flow {
    Normal,
    Return(Value),
    Break,
    Continue,
}

/// Non-tail call nesting is bounded rather than left to overflow the
/// host stack; a program that needs deeper non-tail recursion hits
/// [`RuntimeErrorKind::BudgetExceeded`] instead of crashing the host.
const MAX_CALL_DEPTH: u32 = 4096;

pub struct Interpreter<'a, 'h> {
    pub registry: &'a FunctionRegistry,
    pub storage: &'a StorageCache<'h>,
    pub events: &'a crate::events::EventLog,
    pub arena: &'a TypeArena,
    pub type_names: &'a indexmap::IndexMap<Symbol, TypeIndex>,
    /// The location of the program currently executing — an account
    /// address, transaction hash, or script hash. Used to qualify
    /// emitted events (spec.md §4.5) and to resolve a bare composite
    /// name at a construction site to its registry type ID.
    pub location: &'a Location,
    call_depth: RefCell<u32>,
    step_budget: RefCell<u64>,
}

impl<'a, 'h> Interpreter<'a, 'h> {
    pub fn new(
        registry: &'a FunctionRegistry,
        storage: &'a StorageCache<'h>,
        events: &'a crate::events::EventLog,
        arena: &'a TypeArena,
        type_names: &'a indexmap::IndexMap<Symbol, TypeIndex>,
        location: &'a Location,
    ) -> Self {
        Self { registry, storage, events, arena, type_names, location, call_depth: RefCell::new(0), step_budget: RefCell::new(u64::MAX) }
    }

    /// The type ID a bare composite name resolves to when declared at
    /// this interpreter's own location, matching how
    /// [`crate::registry::FunctionRegistry::register`] keyed it.
    pub(crate) fn type_id_for(&self, name: Symbol) -> String {
        format!("{}.{}", self.location, name)
    }

    /// Bounds the total number of statements this interpreter will
    /// execute across the whole run, the "host is free to impose a
    /// computational budget" clause of spec.md §5. A tail-recursive
    /// loop that never grows the host stack still burns this budget
    /// one statement at a time, so it terminates either way.
    pub fn with_step_budget(self, steps: u64) -> Self {
        Self { step_budget: RefCell::new(steps), ..self }
    }

    pub(crate) fn enter_call(&self, span: Span) -> RuntimeResult<()> {
        let mut depth = self.call_depth.borrow_mut();
        if *depth >= MAX_CALL_DEPTH {
            return Err(Diagnostic::new(span, RuntimeErrorKind::BudgetExceeded));
        }
        *depth += 1;
        Ok(())
    }

    pub(crate) fn exit_call(&self) {
        *self.call_depth.borrow_mut() -= 1;
    }

    pub(crate) fn tick(&self, span: Span) -> RuntimeResult<()> {
        let mut budget = self.step_budget.borrow_mut();
        if *budget == 0 {
            return Err(Diagnostic::new(span, RuntimeErrorKind::BudgetExceeded));
        }
        *budget -= 1;
        Ok(())
    }
}

pub fn eval_block(interp: &Interpreter, activation: &mut Activation, before: Option<&Activation>, block: &Block) -> RuntimeResult<Flow> {
    for statement in &block.statements {
        match eval_statement(interp, activation, before, statement)? {
            Flow::Normal => {}
            flow => return Ok(flow),
        }
    }
    Ok(Flow::Normal)
}

pub(crate) fn eval_statement(interp: &Interpreter, activation: &mut Activation, before: Option<&Activation>, stmt: &Statement) -> RuntimeResult<Flow> {
    interp.tick(stmt.span)?;
    match &stmt.kind {
        StatementKind::Return(value) => {
            let v = match value {
                Some(expr) => eval_expression(interp, activation, before, expr)?,
                None => Value::Void,
            };
            Ok(Flow::Return(v))
        }
        StatementKind::Break => Ok(Flow::Break),
        StatementKind::Continue => Ok(Flow::Continue),
        StatementKind::If(if_stmt) => eval_if(interp, activation, before, if_stmt),
        StatementKind::While { test, body } => {
            loop {
                let test_value = eval_expression(interp, activation, before, test)?;
                if !test_value.as_bool().unwrap_or(false) {
                    break;
                }
                match eval_block(interp, activation, before, body)? {
                    Flow::Break => break,
                    Flow::Continue | Flow::Normal => {}
                    flow @ Flow::Return(_) => return Ok(flow),
                }
            }
            Ok(Flow::Normal)
        }
        StatementKind::VariableDeclaration(decl) => {
            let value = eval_expression(interp, activation, before, &decl.value)?;
            *activation = activation.extend(decl.name.name, value);
            Ok(Flow::Normal)
        }
        StatementKind::Assignment { target, value, .. } => {
            let v = eval_expression(interp, activation, before, value)?;
            assign(interp, activation, before, target, v)?;
            Ok(Flow::Normal)
        }
        StatementKind::Expression(expr) => {
            eval_expression(interp, activation, before, expr)?;
            Ok(Flow::Normal)
        }
        StatementKind::Emit { event, arguments } => {
            let mut values = Vec::with_capacity(arguments.len());
            for argument in arguments {
                values.push(eval_expression(interp, activation, before, argument)?);
            }
            let type_id = interp.type_id_for(event.name);
            let field_names: Vec<Symbol> =
                interp.registry.composite(&type_id).map(|composite| composite.fields.iter().map(|f| f.name.name).collect()).unwrap_or_default();
            let named: Vec<(Symbol, Value)> = values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (field_names.get(i).copied().unwrap_or_else(|| Symbol::intern(&i.to_string())), v))
                .collect();
            let qualified_id = format!("{}.{}", interp.location.qualifier(), event.name);
            interp.events.emit(crate::events::Event { qualified_id, fields: named });
            Ok(Flow::Normal)
        }
    }
}

fn eval_if(interp: &Interpreter, activation: &mut Activation, before: Option<&Activation>, if_stmt: &IfStatement) -> RuntimeResult<Flow> {
    match &if_stmt.test {
        IfTest::Expression(test) => {
            let value = eval_expression(interp, activation, before, test)?;
            if value.as_bool().unwrap_or(false) {
                eval_block(interp, activation, before, &if_stmt.then)
            } else {
                eval_else(interp, activation, before, &if_stmt.otherwise)
            }
        }
        IfTest::Binding { name, value, .. } => {
            let bound = eval_expression(interp, activation, before, value)?;
            match bound {
                Value::Optional(Some(inner)) => {
                    let mut inner_activation = activation.extend(name.name, *inner);
                    let flow = eval_block(interp, &mut inner_activation, before, &if_stmt.then)?;
                    Ok(flow)
                }
                _ => eval_else(interp, activation, before, &if_stmt.otherwise),
            }
        }
    }
}

fn eval_else(interp: &Interpreter, activation: &mut Activation, before: Option<&Activation>, otherwise: &Option<ElseClause>) -> RuntimeResult<Flow> {
    match otherwise {
        None => Ok(Flow::Normal),
        Some(ElseClause::Block(block)) => eval_block(interp, activation, before, block),
        Some(ElseClause::If(nested)) => eval_if(interp, activation, before, nested),
    }
}

pub fn eval_expression(interp: &Interpreter, activation: &mut Activation, before: Option<&Activation>, expr: &Expression) -> RuntimeResult<Value> {
    match &expr.kind {
        ExpressionKind::Identifier(identifier) => match activation.get(&identifier.name) {
            Some(value) => Ok(value.clone()),
            None => eval_contract_reference(interp, identifier.name, expr.span),
        },
        ExpressionKind::Literal(literal) => eval_literal(interp, activation, before, literal),
        ExpressionKind::Binary { op, left, right } => eval_binary(interp, activation, before, *op, left, right, expr.span),
        ExpressionKind::Unary { op, operand } => {
            let value = eval_expression(interp, activation, before, operand)?;
            match op {
                UnaryOp::Negate => match value {
                    Value::Int(n) => Ok(Value::Int(-n)),
                    _ => Err(unreachable(expr.span)),
                },
                UnaryOp::Not => match value {
                    Value::Bool(b) => Ok(Value::Bool(!b)),
                    _ => Err(unreachable(expr.span)),
                },
            }
        }
        ExpressionKind::Conditional { test, then, otherwise } => {
            let test_value = eval_expression(interp, activation, before, test)?;
            if test_value.as_bool().unwrap_or(false) {
                eval_expression(interp, activation, before, then)
            } else {
                eval_expression(interp, activation, before, otherwise)
            }
        }
        ExpressionKind::Member { base, member } => {
            let base_value = eval_expression(interp, activation, before, base)?;
            eval_member(interp, &base_value, &member.name, expr.span)
        }
        ExpressionKind::Index { base, index } => {
            let base_value = eval_expression(interp, activation, before, base)?;
            let index_value = eval_expression(interp, activation, before, index)?;
            eval_index(&base_value, &index_value, expr.span)
        }
        ExpressionKind::Invocation { callee, arguments, .. } => {
            let mut argument_values = Vec::with_capacity(arguments.len());
            for argument in arguments {
                argument_values.push(eval_expression(interp, activation, before, argument)?);
            }
            if let ExpressionKind::Member { base, member } = &callee.kind {
                let base_value = eval_expression(interp, activation, before, base)?;
                if matches!(base_value, Value::Array(_) | Value::Dictionary(_)) {
                    return eval_builtin_method(interp, activation, before, base, base_value, &member.name, argument_values, expr.span);
                }
                let callable = eval_member(interp, &base_value, &member.name, expr.span)?;
                return match callable {
                    Value::Function(closure) => crate::invocation::invoke(interp, &closure.body, closure.captured.clone(), argument_values, expr.span),
                    _ => Err(unreachable(expr.span)),
                };
            }
            eval_invocation(interp, activation, before, callee, argument_values, expr.span)
        }
        ExpressionKind::FunctionLiteral { parameters, body, .. } => Ok(Value::Function(Rc::new(Closure {
            body: Rc::new(ClosureBody {
                parameters: parameters.clone(),
                return_type: None,
                body: body.clone(),
                has_self: false,
                conditions: runic_ast::Conditions::default(),
            }),
            captured: activation.clone(),
        }))),
        ExpressionKind::FailableDowncast { value, target } => {
            let v = eval_expression(interp, activation, before, value)?;
            let target_ty = crate::shape::annotation_shape(&target.kind, interp.type_names, interp.arena);
            Ok(runic_value::boxing::downcast(v, &target_ty))
        }
        ExpressionKind::Before(inner) => {
            let pre = before.expect("checker guarantees `before` only appears inside post-conditions");
            let mut pre_activation = pre.clone();
            eval_expression(interp, &mut pre_activation, None, inner)
        }
    }
}

fn eval_literal(interp: &Interpreter, activation: &mut Activation, before: Option<&Activation>, literal: &Literal) -> RuntimeResult<Value> {
    match literal {
        Literal::Integer { text, base } => {
            let parsed = BigInt::parse_bytes(text.as_bytes(), *base).expect("lexer guarantees a valid numeral");
            Ok(Value::Int(parsed))
        }
        Literal::String(s) => Ok(Value::String(s.clone())),
        Literal::Bool(b) => Ok(Value::Bool(*b)),
        Literal::Nil => Ok(Value::nil()),
        Literal::Array(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(eval_expression(interp, activation, before, element)?);
            }
            Ok(Value::Array(values))
        }
        Literal::Dictionary(entries) => {
            let mut map = indexmap::IndexMap::new();
            for (key_expr, value_expr) in entries {
                let key_value = eval_expression(interp, activation, before, key_expr)?;
                let value_value = eval_expression(interp, activation, before, value_expr)?;
                map.insert(to_key(&key_value, key_expr.span)?, value_value);
            }
            Ok(Value::Dictionary(map))
        }
    }
}

fn eval_binary(
    interp: &Interpreter,
    activation: &mut Activation,
    before: Option<&Activation>,
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    span: Span,
) -> RuntimeResult<Value> {
    // Short-circuit before evaluating the right operand.
    if matches!(op, BinaryOp::And) {
        let l = eval_expression(interp, activation, before, left)?;
        if !l.as_bool().unwrap_or(false) {
            return Ok(Value::Bool(false));
        }
        return eval_expression(interp, activation, before, right);
    }
    if matches!(op, BinaryOp::Or) {
        let l = eval_expression(interp, activation, before, left)?;
        if l.as_bool().unwrap_or(false) {
            return Ok(Value::Bool(true));
        }
        return eval_expression(interp, activation, before, right);
    }
    if matches!(op, BinaryOp::NilCoalesce) {
        let l = eval_expression(interp, activation, before, left)?;
        return match l {
            Value::Optional(Some(inner)) => Ok(*inner),
            Value::Optional(None) => eval_expression(interp, activation, before, right),
            _ => Err(unreachable(span)),
        };
    }

    let left_value = eval_expression(interp, activation, before, left)?;
    let right_value = eval_expression(interp, activation, before, right)?;
    match op {
        BinaryOp::Eq => Ok(Value::Bool(runic_value::ops::equal(&left_value, &right_value))),
        BinaryOp::NotEq => Ok(Value::Bool(!runic_value::ops::equal(&left_value, &right_value))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let (Value::Int(l), Value::Int(r)) = (&left_value, &right_value) else { return Err(unreachable(span)) };
            Ok(Value::Bool(match op {
                BinaryOp::Lt => l < r,
                BinaryOp::LtEq => l <= r,
                BinaryOp::Gt => l > r,
                BinaryOp::GtEq => l >= r,
                _ => unreachable!(),
            }))
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            let (Value::Int(l), Value::Int(r)) = (&left_value, &right_value) else { return Err(unreachable(span)) };
            eval_arithmetic(op, l, r, span)
        }
        BinaryOp::And | BinaryOp::Or | BinaryOp::NilCoalesce => unreachable!("handled above"),
    }
}

/// `Int` is unbounded in representation but bounded in value to the
/// signed 64-bit range, spec.md §3.3; arithmetic that would leave that
/// range is an overflow rather than silently widening.
fn eval_arithmetic(op: BinaryOp, l: &BigInt, r: &BigInt, span: Span) -> RuntimeResult<Value> {
    let result = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => {
            if r == &BigInt::from(0) {
                return Err(Diagnostic::new(span, RuntimeErrorKind::DivisionByZero));
            }
            l / r
        }
        BinaryOp::Mod => {
            if r == &BigInt::from(0) {
                return Err(Diagnostic::new(span, RuntimeErrorKind::DivisionByZero));
            }
            l % r
        }
        _ => unreachable!("only arithmetic ops reach here"),
    };
    if result < BigInt::from(i64::MIN) || result > BigInt::from(i64::MAX) {
        return Err(Diagnostic::new(span, RuntimeErrorKind::IntegerOverflow));
    }
    Ok(Value::Int(result))
}

fn eval_member(interp: &Interpreter, base: &Value, member: &Symbol, span: Span) -> RuntimeResult<Value> {
    match base {
        Value::Composite(rc) => {
            let data = rc.borrow();
            if let Some(field) = data.get_field(member) {
                return Ok(field.clone());
            }
            if let Some(closure_body) = interp.registry.method(&data.type_id, member) {
                return Ok(Value::Function(Rc::new(Closure { body: closure_body, captured: Activation::new().extend(Symbol::intern("self"), base.clone()) })));
            }
            Err(unreachable(span))
        }
        _ => Err(unreachable(span)),
    }
}

fn eval_index(base: &Value, index: &Value, span: Span) -> RuntimeResult<Value> {
    match base {
        Value::Array(items) => {
            let i = as_index(index, span)?;
            items.get(i).cloned().ok_or_else(|| Diagnostic::new(span, RuntimeErrorKind::IndexOutOfRange { index: i.to_string(), length: items.len() }))
        }
        Value::Dictionary(map) => {
            let key = to_key(index, span)?;
            Ok(Value::Optional(map.get(&key).cloned().map(Box::new)))
        }
        _ => Err(unreachable(span)),
    }
}

/// A bare identifier that isn't bound in the current activation and
/// isn't a top-level function names a deployed contract instead — the
/// checker only lets a plain identifier through as `Type::Composite`
/// for a contract, so `C` in `C.n` resolves by loading it out of its
/// declaring account's storage (spec.md §8 "contract deployment and
/// load"), the same slot [`crate::contract::deploy`] wrote to.
fn eval_contract_reference(interp: &Interpreter, name: Symbol, span: Span) -> RuntimeResult<Value> {
    let Some((type_id, composite)) = interp.registry.composite_by_name(name) else {
        return Ok(Value::Void);
    };
    if composite.kind != CompositeKind::Contract {
        return Ok(Value::Void);
    }
    let owner = interp.registry.location_of(type_id).ok_or_else(|| unreachable(span))?;
    crate::contract::load(interp, composite, owner, span)
}

/// Resolves a call's callee to the closure body it names and the
/// activation it was captured with, per the same lookup order the
/// checker uses (a local binding shadows a top-level function of the
/// same name).
pub(crate) fn resolve_callable(interp: &Interpreter, activation: &mut Activation, before: Option<&Activation>, callee: &Expression, span: Span) -> RuntimeResult<(Rc<ClosureBody>, Activation)> {
    if let ExpressionKind::Identifier(identifier) = &callee.kind {
        if activation.get(&identifier.name).is_none() {
            let body = interp.registry.top_level_function(&identifier.name).ok_or_else(|| unreachable(span))?;
            return Ok((body, Activation::new()));
        }
    }
    match eval_expression(interp, activation, before, callee)? {
        Value::Function(closure) => Ok((Rc::clone(&closure.body), closure.captured.clone())),
        _ => Err(unreachable(span)),
    }
}

fn eval_invocation(
    interp: &Interpreter,
    activation: &mut Activation,
    before: Option<&Activation>,
    callee: &Expression,
    arguments: Vec<Value>,
    span: Span,
) -> RuntimeResult<Value> {
    if let ExpressionKind::Identifier(identifier) = &callee.kind {
        if activation.get(&identifier.name).is_none() && interp.registry.top_level_function(&identifier.name).is_none() {
            let local_type_id = interp.type_id_for(identifier.name);
            let found = interp.registry.composite(&local_type_id).map(|c| (local_type_id.as_str(), c)).or_else(|| interp.registry.composite_by_name(identifier.name));
            if let Some((type_id, composite)) = found {
                let type_index = *interp.type_names.get(&identifier.name).ok_or_else(|| unreachable(span))?;
                return crate::contract::construct(interp, composite, type_id, type_index, None, arguments, span);
            }
            let name = identifier.name.as_str();
            return match runic_stdlib::call_function(&name, arguments, span)? {
                Some(outcome) => Ok(outcome.result),
                None => Err(unreachable(span)),
            };
        }
    }
    let (body, captured) = resolve_callable(interp, activation, before, callee, span)?;
    crate::invocation::invoke(interp, &body, captured, arguments, span)
}

/// `base.method(args)` where `base` is an `Array` or `Dictionary`: the
/// checker proves such a call only names a built-in, so this is tried
/// before, not after, composite method dispatch. A mutating built-in
/// (`append`, `remove`) hands back its new receiver, which is written
/// back to `base` exactly like an ordinary assignment.
#[allow(clippy::too_many_arguments)]
fn eval_builtin_method(
    interp: &Interpreter,
    activation: &mut Activation,
    before: Option<&Activation>,
    base: &Expression,
    base_value: Value,
    member: &Symbol,
    arguments: Vec<Value>,
    span: Span,
) -> RuntimeResult<Value> {
    let name = member.as_str();
    match runic_stdlib::call_method(base_value, &name, arguments, span)? {
        Some(outcome) => {
            if let Some(receiver) = outcome.receiver {
                assign(interp, activation, before, base, receiver)?;
            }
            Ok(outcome.result)
        }
        None => Err(unreachable(span)),
    }
}

fn assign(interp: &Interpreter, activation: &mut Activation, before: Option<&Activation>, target: &Expression, value: Value) -> RuntimeResult<()> {
    match &target.kind {
        ExpressionKind::Identifier(identifier) => {
            *activation = activation.extend(identifier.name, value);
            Ok(())
        }
        ExpressionKind::Member { base, member } => {
            let base_value = eval_expression(interp, activation, before, base)?;
            match base_value {
                Value::Composite(rc) => {
                    rc.borrow_mut().set_field(member.name, value);
                    Ok(())
                }
                _ => Err(unreachable(target.span)),
            }
        }
        ExpressionKind::Index { base, index } => {
            let index_value = eval_expression(interp, activation, before, index)?;
            let mut container = eval_expression(interp, activation, before, base)?;
            match &mut container {
                Value::Array(items) => {
                    let i = as_index(&index_value, index.span)?;
                    if i >= items.len() {
                        return Err(Diagnostic::new(target.span, RuntimeErrorKind::IndexOutOfRange { index: i.to_string(), length: items.len() }));
                    }
                    items[i] = value;
                }
                Value::Dictionary(map) => {
                    let key = to_key(&index_value, index.span)?;
                    map.insert(key, value);
                }
                _ => return Err(unreachable(target.span)),
            }
            assign(interp, activation, before, base, container)
        }
        _ => Err(unreachable(target.span)),
    }
}

fn to_key(value: &Value, span: Span) -> RuntimeResult<Key> {
    match value {
        Value::Bool(b) => Ok(Key::Bool(*b)),
        Value::Int(n) => Ok(Key::Int(n.clone())),
        Value::String(s) => Ok(Key::String(s.clone())),
        Value::Address(a) => Ok(Key::Address(a.clone())),
        _ => Err(unreachable(span)),
    }
}

fn as_index(value: &Value, span: Span) -> RuntimeResult<usize> {
    match value {
        Value::Int(n) => n.to_usize().ok_or_else(|| Diagnostic::new(span, RuntimeErrorKind::IndexOutOfRange { index: n.to_string(), length: 0 })),
        _ => Err(unreachable(span)),
    }
}

fn unreachable(span: Span) -> Diagnostic {
    Diagnostic::new(span, RuntimeErrorKind::Unreachable)
}
