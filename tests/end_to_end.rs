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

//! End-to-end scenarios driven entirely through the public facade
//! (`runic::{Runtime, TestHost, ExecutionLimits}`), unlike
//! `runic-runtime`'s own unit tests, which exercise the same
//! scenarios against its internal types directly.

use runic::interpreter::StorageBackend;
use runic::runtime::ExecutionError;
use runic::span::create_session_if_not_set_then;
use runic::span::location::Address;
use runic::value::Value;
use runic::{ExecutionLimits, Location, Runtime, TestHost};

fn address(byte: u8) -> Location {
    Location::Address(Address::new([byte; 20]))
}

#[test]
fn boxing_a_literal_into_an_optional_yields_some() {
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
fn a_resource_dropped_without_being_moved_is_resource_loss() {
    create_session_if_not_set_then(|| {
        let host = TestHost::new();
        let runtime = Runtime::new(&host, ExecutionLimits::default());
        let source = "resource R {} fun f() { let r <- create R(); }";
        let err = runtime.execute_script(source, Location::String("script".to_owned())).expect_err("resource loss should be reported");
        match err {
            ExecutionError::Check(diagnostics) => assert!(diagnostics.iter().any(|d| d.message.contains("resource"))),
            ExecutionError::Runtime(_) => panic!("expected a check-time diagnostic"),
        }
    });
}

#[test]
fn a_deployed_contracts_field_is_readable_from_a_later_script_and_a_second_deployment_is_rejected() {
    create_session_if_not_set_then(|| {
        let host = TestHost::new();
        let runtime = Runtime::new(&host, ExecutionLimits::default());
        let owner = address(1);
        let source = "contract C { pub let n: Int; init() { self.n = 7; } }";
        runtime.deploy_program(source, owner, Vec::new()).expect("deployment should succeed");

        let outcome = runtime.execute_script("let v = C.n;", Location::String("script".to_owned())).expect("script should run");
        match outcome.result {
            Value::Int(n) => assert_eq!(n.to_string(), "7"),
            other => panic!("expected Int(7), got {other:?}"),
        }

        let two_contracts = "contract A { init() {} } contract B { init() {} }";
        let err = runtime.deploy_program(two_contracts, address(2), Vec::new()).expect_err("a code unit declaring two contracts should be rejected");
        match err {
            ExecutionError::Check(diagnostics) => assert!(diagnostics.iter().any(|d| d.message.contains("at most one contract"))),
            ExecutionError::Runtime(_) => panic!("expected a check-time diagnostic"),
        }
    });
}

#[test]
fn a_failed_post_condition_rolls_storage_back() {
    create_session_if_not_set_then(|| {
        let host = TestHost::new();
        let signer = address(1);
        host.set_signers(vec![signer.clone()]);
        let runtime = Runtime::new(&host, ExecutionLimits::default());

        let deploy_source = "contract C { pub(set) var k: Int; init() { self.k = 5; } }";
        runtime.deploy_program(deploy_source, signer.clone(), Vec::new()).expect("deployment should succeed");

        let before = host.read_storage(&signer, "contract.C");
        let transaction_source = "transaction(signer: Address) post { C.k == 6; } { C.k = 6; }";
        let result = runtime.execute_transaction(transaction_source, Location::String("tx".to_owned()));

        assert!(result.is_err());
        assert_eq!(host.read_storage(&signer, "contract.C"), before);
    });
}

#[test]
fn a_failable_downcast_boxes_a_matching_type_and_nils_a_mismatch() {
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
fn a_transaction_parameter_count_mismatch_is_rejected_before_any_code_runs() {
    create_session_if_not_set_then(|| {
        let host = TestHost::new();
        host.set_signers(vec![address(1)]);
        let runtime = Runtime::new(&host, ExecutionLimits::default());
        let source = "transaction(a: Address, b: Address) {}";
        let err = runtime.execute_transaction(source, Location::String("tx".to_owned())).expect_err("arity mismatch should be rejected");
        match err {
            ExecutionError::Check(diagnostics) => assert!(diagnostics.iter().any(|d| d.message.contains("signing accounts"))),
            ExecutionError::Runtime(_) => panic!("expected a check-time diagnostic"),
        }
    });
}
