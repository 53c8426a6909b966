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

use thiserror::Error;

/// *Parse* errors, spec.md §7.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorKind {
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("malformed numeric literal: `{0}`")]
    InvalidNumberLiteral(String),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expected {expected}, found `{found}`")]
    Expected { expected: String, found: String },
}

/// *Check* errors, spec.md §7: name, type, and structural sub-taxonomies
/// are flattened into one enum with descriptive variants, the way the
/// teacher's `leo-errors` groups many concerns behind one `create_messages!`
/// family per pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckerErrorKind {
    // -- name resolution --
    #[error("`{0}` is not declared")]
    NotDeclared(String),
    #[error("`{0}` is already declared in this scope")]
    Redeclaration(String),
    #[error("cannot access `{0}`: insufficient access level")]
    InvalidAccess(String),

    // -- type checking --
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },
    #[error("type `{0}` is not permitted as an event parameter type")]
    InvalidEventParameterType(String),
    #[error("expression of resource type `{0}` must be moved with the move marker")]
    InvalidMove(String),
    #[error("resource of type `{0}` is not consumed on every path before the end of its scope")]
    ResourceLoss(String),
    #[error("resource binding `{0}` used after it was moved")]
    ResourceUseAfterMove(String),
    #[error("`{composite}` does not conform to interface `{interface}`: {reason}")]
    InvalidConformance { composite: String, interface: String, reason: String },
    #[error("condition expressions must be side-effect free: {0}")]
    ImpureCondition(String),

    // -- structural --
    #[error("only imports, contracts, and contract-interfaces may appear at the top level of account code")]
    InvalidTopLevelDeclaration,
    #[error("a transaction program must declare exactly one transaction, found {0}")]
    InvalidTransactionCount(usize),
    #[error("transaction entry point parameters must all be of type Account, found `{0}`")]
    InvalidTransactionParameter(String),
    #[error("transaction entry point parameter count ({declared}) does not match the number of signing accounts ({signers})")]
    InvalidTransactionParameterCount { declared: usize, signers: usize },
    #[error("program has no entry point")]
    MissingEntryPoint,
}

/// *Runtime* errors, spec.md §7: arithmetic, invariant, storage, host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("pre-condition failed{}", .0.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    PreConditionFailed(Option<String>),
    #[error("post-condition failed{}", .0.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    PostConditionFailed(Option<String>),
    #[error("unreachable code executed")]
    Unreachable,
    #[error("array index {index} out of range for length {length}")]
    IndexOutOfRange { index: String, length: usize },
    #[error("failed to decode stored value: {0}")]
    DecodingFailure(String),
    #[error("no contract is deployed at this address")]
    MissingContract,
    #[error("a code unit may declare at most one contract, found {0}")]
    MultipleContractsDeclared(usize),
    #[error("host error: {0}")]
    Host(String),
    #[error("execution exceeded its computation budget")]
    BudgetExceeded,
    #[error("{0}")]
    Panic(String),
}
