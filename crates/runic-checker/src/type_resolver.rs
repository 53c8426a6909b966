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

//! Resolves syntactic `TypeAnnotation`s into `runic_types::Type`, and
//! registers top-level composite/interface declarations into the
//! `TypeArena` in two passes so cyclic declarations resolve correctly
//! (spec.md §4.2 "reserve before resolve").

use crate::scope::GlobalScope;
use indexmap::IndexMap;
use runic_ast::{CompositeDeclaration, Declaration, FunctionDeclaration, InterfaceDeclaration, Program, TypeAnnotation, TypeAnnotationKind};
use runic_errors::{CheckerErrorKind, Diagnostic, Handler};
use runic_span::{Location, Symbol};
use runic_types::{CompositeType, FunctionSignature, FunctionType, InterfaceType, TypeArena};

/// Resolves a syntactic type annotation against the set of names
/// currently known to the global type scope. Unknown names are
/// reported through `handler` and resolved to `Type::Checking`, which
/// lets checking continue over the rest of the program instead of
/// aborting (spec.md §4.3 "Error strategy").
pub fn resolve_type_annotation(annotation: &TypeAnnotation, type_names: &IndexMap<Symbol, runic_types::TypeIndex>, handler: &Handler) -> runic_types::Type {
    use runic_types::Type;
    match &annotation.kind {
        TypeAnnotationKind::Bool => Type::Bool,
        TypeAnnotationKind::Int => Type::Int,
        TypeAnnotationKind::String => Type::String,
        TypeAnnotationKind::Address => Type::Address,
        TypeAnnotationKind::Void => Type::Void,
        TypeAnnotationKind::AnyStruct => Type::AnyStruct,
        TypeAnnotationKind::AnyResource => Type::AnyResource,
        TypeAnnotationKind::Optional(inner) => Type::Optional(Box::new(resolve_type_annotation(inner, type_names, handler))),
        TypeAnnotationKind::Array(inner, len) => Type::Array(Box::new(resolve_type_annotation(inner, type_names, handler)), *len),
        TypeAnnotationKind::Dictionary(key, value) => Type::Dictionary(
            Box::new(resolve_type_annotation(key, type_names, handler)),
            Box::new(resolve_type_annotation(value, type_names, handler)),
        ),
        TypeAnnotationKind::Named(identifier) => match type_names.get(&identifier.name) {
            Some(&idx) => Type::Composite(idx),
            None => {
                handler.emit_err(Diagnostic::new(identifier.span, CheckerErrorKind::NotDeclared(identifier.name.to_string())));
                Type::Checking
            }
        },
    }
}

fn signature_of(function: &FunctionDeclaration, type_names: &IndexMap<Symbol, runic_types::TypeIndex>, handler: &Handler) -> FunctionSignature {
    FunctionSignature {
        parameters: function.parameters.iter().map(|p| resolve_type_annotation(&p.annotated_type, type_names, handler)).collect(),
        return_type: function
            .return_type
            .as_ref()
            .map(|t| resolve_type_annotation(t, type_names, handler))
            .unwrap_or(runic_types::Type::Void),
        has_self: function.has_self,
    }
}

/// Pass 1: reserves an arena slot for every top-level composite and
/// interface declaration, so forward and cyclic references to a type
/// name resolve to the right index before any field is inspected.
pub fn reserve_declarations(program: &Program, location: &Location, arena: &mut TypeArena, globals: &mut GlobalScope) {
    for declaration in &program.declarations {
        match declaration {
            Declaration::Composite(composite) => {
                let type_id = composite.type_id(location);
                let idx = arena.reserve(type_id);
                globals.type_names.insert(composite.name.name, idx);
                globals.composite_decls.insert(composite.name.name, std::rc::Rc::new(composite.clone()));
            }
            Declaration::Interface(interface) => {
                let type_id = format!("{}.{}", location, interface.name.name);
                let idx = arena.reserve(type_id);
                globals.type_names.insert(interface.name.name, idx);
                globals.interface_decls.insert(interface.name.name, std::rc::Rc::new(interface.clone()));
            }
            Declaration::Function(function) => {
                globals.functions.insert(function.name.name, std::rc::Rc::new(function.clone()));
            }
            _ => {}
        }
    }
}

fn resolve_composite(composite: &CompositeDeclaration, globals: &GlobalScope, arena: &mut TypeArena, handler: &Handler) {
    let idx = *globals.type_names.get(&composite.name.name).expect("reserved in pass 1");
    let type_id = arena.type_id_of(idx).expect("reserved in pass 1").to_owned();
    let mut fields = IndexMap::new();
    for field in &composite.fields {
        fields.insert(field.name.name, resolve_type_annotation(&field.annotated_type, &globals.type_names, handler));
    }
    let mut functions = IndexMap::new();
    for function in &composite.functions {
        functions.insert(
            function.name.name,
            FunctionType { access: function.access, signature: signature_of(function, &globals.type_names, handler) },
        );
    }
    let mut conformances = Vec::new();
    for name in &composite.conformances {
        match globals.type_names.get(&name.name) {
            Some(&iface_idx) => conformances.push(iface_idx),
            None => handler.emit_err(Diagnostic::new(name.span, CheckerErrorKind::NotDeclared(name.name.to_string()))),
        }
    }
    arena.resolve_composite(idx, CompositeType { type_id, kind: composite.kind, fields, functions, conformances });
}

fn resolve_interface(interface: &InterfaceDeclaration, globals: &GlobalScope, arena: &mut TypeArena, handler: &Handler) {
    let idx = *globals.type_names.get(&interface.name.name).expect("reserved in pass 1");
    let type_id = arena.type_id_of(idx).expect("reserved in pass 1").to_owned();
    let mut fields = IndexMap::new();
    for field in &interface.fields {
        fields.insert(field.name.name, (field.access, resolve_type_annotation(&field.annotated_type, &globals.type_names, handler)));
    }
    let mut functions = IndexMap::new();
    for requirement in &interface.functions {
        let signature = FunctionSignature {
            parameters: requirement.parameters.iter().map(|p| resolve_type_annotation(&p.annotated_type, &globals.type_names, handler)).collect(),
            return_type: requirement
                .return_type
                .as_ref()
                .map(|t| resolve_type_annotation(t, &globals.type_names, handler))
                .unwrap_or(runic_types::Type::Void),
            has_self: true,
        };
        functions.insert(requirement.name.name, FunctionType { access: requirement.access, signature });
    }
    arena.resolve_interface(idx, InterfaceType { type_id, kind: interface.kind, fields, functions });
}

/// Pass 2: fills in every reserved slot's fields, methods, and
/// conformance list, now that every type name in the program resolves
/// to a valid index.
pub fn resolve_declarations(program: &Program, globals: &GlobalScope, arena: &mut TypeArena, handler: &Handler) {
    for declaration in &program.declarations {
        match declaration {
            Declaration::Composite(composite) => resolve_composite(composite, globals, arena, handler),
            Declaration::Interface(interface) => resolve_interface(interface, globals, arena, handler),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runic_ast::{Access, CompositeKind};
    use runic_span::{create_session_if_not_set_then, Span};

    fn dummy_annotation(kind: TypeAnnotationKind) -> TypeAnnotation {
        TypeAnnotation { kind, span: Span::dummy(), id: 0 }
    }

    #[test]
    fn resolves_nested_optional_array_without_touching_the_arena() {
        create_session_if_not_set_then(|| {
            let handler = Handler::new();
            let type_names = IndexMap::new();
            let annotation = dummy_annotation(TypeAnnotationKind::Optional(Box::new(dummy_annotation(TypeAnnotationKind::Array(
                Box::new(dummy_annotation(TypeAnnotationKind::Int)),
                None,
            )))));
            let ty = resolve_type_annotation(&annotation, &type_names, &handler);
            assert_eq!(ty, runic_types::Type::Optional(Box::new(runic_types::Type::Array(Box::new(runic_types::Type::Int), None))));
            assert!(!handler.has_errors());
        });
    }

    #[test]
    fn unknown_named_type_is_reported_and_resolves_to_checking() {
        create_session_if_not_set_then(|| {
            let handler = Handler::new();
            let type_names = IndexMap::new();
            let identifier = runic_ast::Identifier::new("Unknown", Span::dummy());
            let annotation = dummy_annotation(TypeAnnotationKind::Named(identifier));
            let ty = resolve_type_annotation(&annotation, &type_names, &handler);
            assert_eq!(ty, runic_types::Type::Checking);
            assert!(handler.has_errors());
        });
    }

    #[test]
    fn reserve_then_resolve_handles_a_self_referential_optional_field() {
        create_session_if_not_set_then(|| {
            let location = Location::String("0x1".to_owned());
            let span = Span::dummy();
            let node_name = runic_ast::Identifier::new("Node", span);
            let field = runic_ast::FieldDeclaration {
                access: Access::Public,
                kind: runic_ast::VariableKind::Var,
                name: runic_ast::Identifier::new("next", span),
                annotated_type: dummy_annotation(TypeAnnotationKind::Optional(Box::new(dummy_annotation(TypeAnnotationKind::Named(node_name.clone()))))),
                span,
                id: 0,
            };
            let composite = CompositeDeclaration {
                kind: CompositeKind::Resource,
                access: Access::Public,
                name: node_name,
                conformances: Vec::new(),
                fields: vec![field],
                functions: Vec::new(),
                initializer: None,
                span,
                id: 0,
            };
            let program = Program { declarations: vec![Declaration::Composite(composite)] };
            let mut arena = TypeArena::new();
            let mut globals = GlobalScope::new();
            reserve_declarations(&program, &location, &mut arena, &mut globals);
            let handler = Handler::new();
            resolve_declarations(&program, &globals, &mut arena, &handler);
            assert!(!handler.has_errors());
            let idx = globals.type_names[&Symbol::intern("Node")];
            let node = arena.composite(idx).unwrap();
            assert_eq!(node.fields[&Symbol::intern("next")], runic_types::Type::Optional(Box::new(runic_types::Type::Composite(idx))));
        });
    }
}
