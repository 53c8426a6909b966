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

use runic_span::Span;

/// A node ID, assigned by the parser adapter in traversal order.
pub type NodeID = u32;

/// Every AST node carries a span and an ID.
pub trait Node {
    fn span(&self) -> Span;
    fn id(&self) -> NodeID;
}

/// Implements [`Node`] for a struct with `span: Span` and `id: NodeID`
/// fields, mirroring the teacher's `simple_node_impl!` macro.
#[macro_export]
macro_rules! simple_node_impl {
    ($ty:ty) => {
        impl $crate::Node for $ty {
            fn span(&self) -> runic_span::Span {
                self.span
            }

            fn id(&self) -> $crate::NodeID {
                self.id
            }
        }
    };
}
