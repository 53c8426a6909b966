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

use crate::{CompositeType, Type, TypeArena};
use runic_ast::CompositeKind;

/// Operations on the type lattice, spec.md §4.2.
impl TypeArena {
    /// `is_subtype(a, b)`.
    pub fn is_subtype(&self, a: &Type, b: &Type) -> bool {
        if self.is_equal(a, b) {
            return true;
        }
        match (a, b) {
            (Type::Never, _) => true,
            (_, Type::AnyStruct) => !self.is_resource(a),
            (_, Type::AnyResource) => self.is_resource(a),
            (Type::Optional(a_inner), Type::Optional(b_inner)) => self.is_subtype(a_inner, b_inner),
            (_, Type::Optional(b_inner)) => self.is_subtype(a, b_inner),
            (Type::Array(a_elem, Some(_)), Type::Array(b_elem, None)) => self.is_equal(a_elem, b_elem),
            (Type::Array(a_elem, a_n), Type::Array(b_elem, b_n)) => a_n == b_n && self.is_equal(a_elem, b_elem),
            (Type::Composite(a_idx), Type::Interface(b_idx)) => match self.composite(*a_idx) {
                Some(c) => c.conformances.contains(b_idx),
                None => false,
            },
            _ => false,
        }
    }

    /// `is_equal(a, b)`: nominal equality for named types, structural
    /// for everything else.
    pub fn is_equal(&self, a: &Type, b: &Type) -> bool {
        a == b
    }

    /// `resource?(t)`: a type is a resource type iff its kind is
    /// Resource, it is `AnyResource`, or it is a compound type
    /// containing a resource component.
    pub fn is_resource(&self, t: &Type) -> bool {
        match t {
            Type::AnyResource => true,
            Type::Optional(inner) => self.is_resource(inner),
            Type::Array(inner, _) => self.is_resource(inner),
            Type::Dictionary(_, v) => self.is_resource(v),
            Type::Composite(idx) => matches!(self.kind_of(*idx), Some(CompositeKind::Resource)),
            _ => false,
        }
    }

    /// `hashable?(t)`: primitives and addresses, per spec.md §4.2.
    pub fn is_hashable(&self, t: &Type) -> bool {
        matches!(t, Type::Bool | Type::Int | Type::String | Type::Address)
    }

    /// `unbox_optional(t)`: strips exactly one optional layer.
    pub fn unbox_optional(&self, t: &Type) -> Type {
        match t {
            Type::Optional(inner) => (**inner).clone(),
            other => other.clone(),
        }
    }

    /// `common_supertype(a, b)`: the least upper bound over the
    /// built-in lattice, used for array/dictionary literal inference.
    pub fn common_supertype(&self, a: &Type, b: &Type) -> Option<Type> {
        if self.is_equal(a, b) {
            return Some(a.clone());
        }
        if self.is_subtype(a, b) {
            return Some(b.clone());
        }
        if self.is_subtype(b, a) {
            return Some(a.clone());
        }
        match (a, b) {
            (Type::Optional(a_inner), Type::Optional(b_inner)) => {
                self.common_supertype(a_inner, b_inner).map(|t| Type::Optional(Box::new(t)))
            }
            (Type::Optional(a_inner), _) => self.common_supertype(a_inner, b).map(|t| Type::Optional(Box::new(t))),
            (_, Type::Optional(b_inner)) => self.common_supertype(a, b_inner).map(|t| Type::Optional(Box::new(t))),
            _ => {
                let a_res = self.is_resource(a);
                let b_res = self.is_resource(b);
                if a_res == b_res {
                    Some(if a_res { Type::AnyResource } else { Type::AnyStruct })
                } else {
                    // AnyStruct and AnyResource are disjoint: spec.md §4.2.
                    None
                }
            }
        }
    }

    /// Checks whether `composite` conforms to `interface`, spec.md §4.3:
    /// every required field and function exists with a compatible
    /// signature and access at least as permissive as required.
    pub fn conforms(&self, composite: &CompositeType, interface_idx: crate::TypeIndex) -> Result<(), String> {
        let interface = self.interface(interface_idx).ok_or_else(|| "interface not resolved".to_owned())?;
        if composite.kind != interface.kind {
            return Err(format!("composite kind {:?} does not match interface kind {:?}", composite.kind, interface.kind));
        }
        for (name, (required_access, required_type)) in &interface.fields {
            match composite.fields.get(name) {
                Some(field_type) if self.is_equal(field_type, required_type) => {}
                Some(_) => return Err(format!("field `{name}` has an incompatible type")),
                None => return Err(format!("missing required field `{name}`")),
            }
            let _ = required_access;
        }
        for (name, required) in &interface.functions {
            match composite.functions.get(name) {
                Some(provided) if provided.access >= required.access && self.signatures_compatible(&provided.signature, &required.signature) => {}
                Some(_) => return Err(format!("function `{name}` has an incompatible signature or access")),
                None => return Err(format!("missing required function `{name}`")),
            }
        }
        Ok(())
    }

    fn signatures_compatible(&self, a: &crate::ty::FunctionSignature, b: &crate::ty::FunctionSignature) -> bool {
        a.parameters.len() == b.parameters.len()
            && a.parameters.iter().zip(&b.parameters).all(|(x, y)| self.is_equal(x, y))
            && self.is_equal(&a.return_type, &b.return_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_is_subtype_of_everything() {
        let arena = TypeArena::new();
        assert!(arena.is_subtype(&Type::Never, &Type::Int));
        assert!(arena.is_subtype(&Type::Never, &Type::Optional(Box::new(Type::Bool))));
    }

    #[test]
    fn optional_boxing_is_transitive_subtyping() {
        let arena = TypeArena::new();
        assert!(arena.is_subtype(&Type::Int, &Type::Optional(Box::new(Type::Int))));
        assert!(!arena.is_subtype(&Type::Optional(Box::new(Type::Int)), &Type::Int));
    }

    #[test]
    fn any_struct_and_any_resource_are_disjoint() {
        let arena = TypeArena::new();
        assert!(!arena.is_subtype(&Type::AnyStruct, &Type::AnyResource));
        assert!(!arena.is_subtype(&Type::AnyResource, &Type::AnyStruct));
        assert_eq!(arena.common_supertype(&Type::AnyStruct, &Type::AnyResource), None);
    }

    #[test]
    fn fixed_size_array_is_subtype_of_unsized_array() {
        let arena = TypeArena::new();
        let fixed = Type::Array(Box::new(Type::Int), Some(3));
        let unsized_ = Type::Array(Box::new(Type::Int), None);
        assert!(arena.is_subtype(&fixed, &unsized_));
        assert!(!arena.is_subtype(&unsized_, &fixed));
    }

    #[test]
    fn hashable_is_limited_to_primitives_and_addresses() {
        let arena = TypeArena::new();
        assert!(arena.is_hashable(&Type::Int));
        assert!(arena.is_hashable(&Type::Address));
        assert!(!arena.is_hashable(&Type::Array(Box::new(Type::Int), None)));
    }

    #[test]
    fn unbox_optional_strips_one_layer() {
        let arena = TypeArena::new();
        let nested = Type::Optional(Box::new(Type::Optional(Box::new(Type::Int))));
        assert_eq!(arena.unbox_optional(&nested), Type::Optional(Box::new(Type::Int)));
    }
}
