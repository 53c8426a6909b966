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

//! The host-embedding contract, spec.md §6 "External interfaces".
//! Storage reads and writes are inherited from
//! [`StorageBackend`](runic_interpreter::storage::StorageBackend)
//! rather than repeated here, since the interpreter itself is only
//! ever handed that narrower trait — it has no business knowing about
//! accounts, signers, or code deployment.

use runic_ast::Program;
use runic_checker::ImportResolver;
use runic_interpreter::{Event, StorageBackend};
use runic_span::Location;

/// The operations the core consumes from its embedding host. Account
/// creation is deliberately split from code deployment — spec.md §9's
/// "Open questions" notes the source shows both a combined and a
/// split shape across its history and recommends the split form as
/// strictly more composable, matching this driver's own deployment
/// path (`Runtime::deploy_program` checks and deploys separately from
/// `create_account`).
pub trait HostInterface: StorageBackend {
    /// Fetches the source text at an import location.
    fn resolve_import(&self, location: &str) -> Result<String, String>;

    /// Creates a new account with the given public keys and no code.
    fn create_account(&self, public_keys: Vec<Vec<u8>>) -> Location;

    fn add_account_key(&self, address: &Location, public_key: Vec<u8>);

    /// Removes and returns the key at `index`, or `None` if the
    /// account has no key at that index.
    fn remove_account_key(&self, address: &Location, index: usize) -> Option<Vec<u8>>;

    fn update_account_code(&self, address: &Location, code: String, check_permission: bool) -> Result<(), String>;

    /// The accounts that signed the transaction currently executing,
    /// in parameter order — `Runtime::execute_transaction` binds these
    /// to the entry point's `Address`-typed parameters one for one.
    fn get_signing_accounts(&self) -> Vec<Location>;

    fn log(&self, message: &str);

    fn emit_event(&self, event: &Event);

    /// An advisory static check of `code` before deployment; `None`
    /// means the host doesn't implement one.
    fn check_code(&self, code: &str) -> Option<bool> {
        let _ = code;
        None
    }
}

/// Adapts a host's raw-source `resolve_import` into the checker's
/// `Program`-returning [`ImportResolver`], parsing a fetched import
/// the same way the top-level program itself is parsed.
pub struct HostImportResolver<'h, H: HostInterface> {
    host: &'h H,
}

impl<'h, H: HostInterface> HostImportResolver<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }
}

impl<'h, H: HostInterface> ImportResolver for HostImportResolver<'h, H> {
    fn resolve(&self, location: &str) -> Result<Program, String> {
        let source = self.host.resolve_import(location)?;
        runic_parser::parse(&source).map_err(|diagnostics| diagnostics.iter().map(|d| d.message.clone()).collect::<Vec<_>>().join("; "))
    }
}
