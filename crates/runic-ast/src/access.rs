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

/// The access qualifier on a declaration, totally ordered by
/// permissiveness per spec.md §3.2 (derived `Ord` follows declaration
/// order below, least to most permissive).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Access {
    #[default]
    NotSpecified,
    Private,
    Authorized,
    Public,
    PublicSettable,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Access::NotSpecified => "",
            Access::Private => "priv",
            Access::Authorized => "auth",
            Access::Public => "pub",
            Access::PublicSettable => "pub(set)",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_permissiveness() {
        assert!(Access::NotSpecified < Access::Private);
        assert!(Access::Private < Access::Authorized);
        assert!(Access::Authorized < Access::Public);
        assert!(Access::Public < Access::PublicSettable);
    }
}
