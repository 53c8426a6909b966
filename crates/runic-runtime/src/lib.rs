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

//! Host integration, spec.md §4.6/§6: wires a host's storage, account,
//! and import operations to the checker and interpreter, and exposes
//! the three operations a host actually calls — `parse_and_check_program`,
//! `execute_script`, and `execute_transaction` — through [`Runtime`].

pub mod error;
pub mod host;
pub mod limits;
pub mod runtime;
pub mod test_host;

pub use error::ExecutionError;
pub use host::{HostImportResolver, HostInterface};
pub use limits::ExecutionLimits;
pub use runtime::{Runtime, ScriptOutcome, TransactionOutcome};
pub use test_host::TestHost;

#[cfg(test)]
mod tests {
    use super::*;
    use runic_interpreter::StorageBackend;
    use runic_span::location::Address;
    use runic_span::{create_session_if_not_set_then, Location};
    use runic_value::Value;

    fn address(byte: u8) -> Location {
        Location::Address(Address::new([byte; 20]))
    }

    #[test]
    fn a_bare_top_level_let_evaluates_to_its_boxed_value() {
        create_session_if_not_set_then(|| {
            let host = TestHost::new();
            let runtime = Runtime::new(&host, ExecutionLimits::default());
            let outcome = runtime.execute_script("let x: Bool? = true;", Location::String("script".to_owned())).expect("script should run");
            match outcome.result {
                Value::Optional(Some(inner)) => assert!(matches!(*inner, Value::Bool(true))),
                other => panic!("expected Some(true), got {other:?}"),
            }
        });
    }

    #[test]
    fn a_resource_never_moved_out_of_a_function_is_resource_loss() {
        create_session_if_not_set_then(|| {
            let host = TestHost::new();
            let runtime = Runtime::new(&host, ExecutionLimits::default());
            let source = "resource R {} fun f() { let r <- create R(); }";
            let err = runtime.execute_script(source, Location::String("script".to_owned())).expect_err("resource loss should be reported");
            match err {
                ExecutionError::Check(diagnostics) => assert!(diagnostics.iter().any(|d| d.message.contains("resource"))),
                ExecutionError::Runtime(_) => panic!("expected a check-time resource-loss diagnostic"),
            }
        });
    }

    #[test]
    fn deploying_a_contract_then_loading_it_from_a_script_reads_back_its_field() {
        create_session_if_not_set_then(|| {
            let host = TestHost::new();
            let runtime = Runtime::new(&host, ExecutionLimits::default());
            let owner = address(1);
            let source = "contract C { pub let n: Int; init() { self.n = 7; } }";
            runtime.deploy_program(source, owner.clone(), Vec::new()).expect("deployment should succeed");

            let script = "let v = C.n;";
            let outcome = runtime.execute_script(script, Location::String("script".to_owned())).expect("script should run");
            match outcome.result {
                Value::Int(n) => assert_eq!(n.to_string(), "7"),
                other => panic!("expected Int(7), got {other:?}"),
            }
        });
    }

    #[test]
    fn deploying_two_contracts_in_one_unit_is_rejected() {
        create_session_if_not_set_then(|| {
            let host = TestHost::new();
            let runtime = Runtime::new(&host, ExecutionLimits::default());
            let source = "contract A { init() {} } contract B { init() {} }";
            let err = runtime.deploy_program(source, address(1), Vec::new()).expect_err("two contracts in one unit should be rejected");
            match err {
                ExecutionError::Check(diagnostics) => assert!(diagnostics.iter().any(|d| d.message.contains("at most one contract"))),
                ExecutionError::Runtime(_) => panic!("expected a check-time diagnostic"),
            }
        });
    }

    #[test]
    fn a_failed_post_condition_leaves_the_hosts_storage_untouched() {
        create_session_if_not_set_then(|| {
            let host = TestHost::new();
            let signer = address(1);
            host.set_signers(vec![signer.clone()]);
            let runtime = Runtime::new(&host, ExecutionLimits::default());
            let deploy_source = "contract C { pub(set) var k: Int; init() { self.k = 5; } }";
            runtime.deploy_program(deploy_source, signer.clone(), Vec::new()).expect("deployment should succeed");

            let transaction_source = "transaction(signer: Address) post { C.k == 6; } { C.k = 6; }";
            let before = host.read_storage(&signer, "contract.C");
            let result = runtime.execute_transaction(transaction_source, Location::String("tx".to_owned()));
            assert!(result.is_err());
            assert_eq!(host.read_storage(&signer, "contract.C"), before);
        });
    }

    #[test]
    fn a_failable_downcast_boxes_a_match_and_nils_a_mismatch() {
        create_session_if_not_set_then(|| {
            let host = TestHost::new();
            let runtime = Runtime::new(&host, ExecutionLimits::default());
            let source = "let a: AnyStruct = 1; let b = a as? Int; let c = a as? Bool;";
            let outcome = runtime.execute_script(source, Location::String("script".to_owned())).expect("script should run");
            match outcome.result {
                Value::Optional(None) => {}
                other => panic!("expected the last binding `c` to be Nil, got {other:?}"),
            }
        });
    }

    #[test]
    fn transaction_arity_mismatch_is_rejected_before_any_code_runs() {
        create_session_if_not_set_then(|| {
            let host = TestHost::new();
            host.set_signers(vec![address(1)]);
            let runtime = Runtime::new(&host, ExecutionLimits::default());
            let source = "transaction(a: Address, b: Address) {}";
            let err = runtime.execute_transaction(source, Location::String("tx".to_owned())).expect_err("arity mismatch should be rejected");
            match err {
                ExecutionError::Check(diagnostics) => assert!(diagnostics.iter().any(|d| d.message.contains("signing accounts"))),
                ExecutionError::Runtime(_) => panic!("expected a check-time arity diagnostic"),
            }
        });
    }
}
