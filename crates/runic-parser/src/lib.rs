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

//! Turns Runic source text into a `runic_ast::Program`, spec.md §4.1
//! "Parser adapter": a hand-written lexer feeding a recursive-descent
//! parser, collecting every `ParserErrorKind` it hits into a `Handler`
//! instead of aborting at the first one — a standalone tool's user
//! wants every syntax error in one pass, not one-at-a-time.

pub mod context;
pub mod lexer;
mod parser;
pub mod token;

pub use context::ParserContext;

use runic_errors::{Diagnostic, Handler};
use runic_span::create_session_if_not_set_then;

/// Parses `source` into a `Program`. Runs inside its own interning
/// session if the caller hasn't already started one (tests and
/// one-off tools), so a `Symbol` produced here is always resolvable.
pub fn parse(source: &str) -> Result<runic_ast::Program, Vec<Diagnostic>> {
    create_session_if_not_set_then(|| {
        let handler = Handler::new();
        let tokens = lexer::tokenize(source, &handler);
        let mut ctx = ParserContext::new(tokens, handler.clone());
        let program = ctx.parse_program();
        handler.finish(program)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_function() {
        let program = parse("fun add(a: Int, b: Int) -> Int { return a + b; }").unwrap();
        assert_eq!(program.declarations.len(), 1);
        match &program.declarations[0] {
            runic_ast::Declaration::Function(f) => {
                assert_eq!(f.name.name.as_str(), "add");
                assert_eq!(f.parameters.len(), 2);
            }
            other => panic!("expected a function declaration, got {other:?}"),
        }
    }

    #[test]
    fn parses_resource_declaration_with_initializer_and_move() {
        let source = r#"
            resource R {
                var amount: Int;
                init(amount: Int) {
                    self.amount = amount;
                }
            }
            fun f() {
                let r <- create R(10);
                return;
            }
        "#;
        let program = parse(source).unwrap();
        let resource = program.composites().next().expect("resource declaration");
        assert!(resource.initializer.is_some());
        assert_eq!(resource.fields.len(), 1);
    }

    #[test]
    fn parses_create_expression_as_a_move_invocation() {
        let program = parse("fun f() { let r <- create R(); return; }").unwrap();
        let Some(runic_ast::Declaration::Function(f)) = program.declarations.first() else { panic!("expected function") };
        let runic_ast::StatementKind::VariableDeclaration(decl) = &f.body.statements[0].kind else { panic!("expected variable declaration") };
        assert!(decl.is_move);
        match &decl.value.kind {
            runic_ast::ExpressionKind::Invocation { is_move, arguments, .. } => {
                assert!(*is_move);
                assert!(arguments.is_empty());
            }
            other => panic!("expected an invocation, got {other:?}"),
        }
    }

    #[test]
    fn collects_multiple_errors_instead_of_stopping_at_the_first(
    ) {
        let result = parse("fun f( { return; } fun g(a: ) { return; }");
        let errors = result.unwrap_err();
        assert!(errors.len() >= 2);
    }

    #[test]
    fn parses_pre_and_post_conditions() {
        let source = "fun withdraw(amount: Int) -> Int pre { amount > 0: \"must be positive\"; } post { result >= 0; } { return amount; }";
        let program = parse(source).unwrap();
        let runic_ast::Declaration::Function(f) = &program.declarations[0] else { panic!("expected function") };
        assert_eq!(f.conditions.pre.len(), 1);
        assert_eq!(f.conditions.post.len(), 1);
    }

    #[test]
    fn parses_failable_downcast() {
        let program = parse("fun f(x: AnyStruct) { let r = x as? Int; return; }").unwrap();
        let runic_ast::Declaration::Function(f) = &program.declarations[0] else { panic!("expected function") };
        let runic_ast::StatementKind::VariableDeclaration(decl) = &f.body.statements[0].kind else { panic!("expected variable declaration") };
        match &decl.value.kind {
            runic_ast::ExpressionKind::FailableDowncast { .. } => {}
            other => panic!("expected a failable downcast, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_transaction_entry_point() {
        let program = parse("transaction(signer: Address) { emit Done(); }").unwrap();
        assert_eq!(program.transactions().count(), 1);
    }
}
