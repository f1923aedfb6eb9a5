//! Type and name formatting for diagnostics and debugging.

#![allow(clippy::format_push_string)] // Debug formatting prioritizes clarity over allocation

use super::Context;
use crate::{
    ArraySizeModifier, Cvr, DeclId, DeclarationName, NestedNameId, NestedNameSpecifier,
    QualType, Qualifiers, TypeKind, VectorFlavor,
};

impl Context {
    /// Format a type as C-like source text, e.g. `const int *`.
    pub fn format_type(&self, ty: QualType) -> String {
        let mut buf = String::new();
        self.format_type_into(ty, &mut buf);
        buf
    }

    /// Format a type into an existing string buffer.
    pub fn format_type_into(&self, ty: QualType, buf: &mut String) {
        if ty.is_null() {
            buf.push_str("<null type>");
            return;
        }
        push_qualifiers(ty.quals, buf);

        match self.type_kind(ty.ty) {
            TypeKind::Builtin(kind) => buf.push_str(kind.spelling()),
            TypeKind::Complex(element) => {
                buf.push_str("_Complex ");
                self.format_type_into(*element, buf);
            }
            TypeKind::Pointer(pointee) => {
                self.format_type_into(*pointee, buf);
                buf.push_str(" *");
            }
            TypeKind::BlockPointer(pointee) => {
                self.format_type_into(*pointee, buf);
                buf.push_str(" ^");
            }
            TypeKind::LValueReference(pointee) => {
                self.format_type_into(*pointee, buf);
                buf.push_str(" &");
            }
            TypeKind::RValueReference(pointee) => {
                self.format_type_into(*pointee, buf);
                buf.push_str(" &&");
            }
            TypeKind::MemberPointer { pointee, class } => {
                self.format_type_into(*pointee, buf);
                buf.push(' ');
                self.format_type_into(QualType::unqualified(*class), buf);
                buf.push_str("::*");
            }
            TypeKind::ConstantArray { shape, size } => {
                self.format_type_into(shape.element, buf);
                buf.push_str(&format!(" [{size}]"));
            }
            TypeKind::IncompleteArray(shape) => {
                self.format_type_into(shape.element, buf);
                buf.push_str(" []");
            }
            TypeKind::VariableArray { shape, .. } => {
                self.format_type_into(shape.element, buf);
                buf.push_str(match shape.size_modifier {
                    ArraySizeModifier::Star => " [*]",
                    ArraySizeModifier::Normal | ArraySizeModifier::Static => " [<vla>]",
                });
            }
            TypeKind::DependentSizedArray { shape, .. } => {
                self.format_type_into(shape.element, buf);
                buf.push_str(" [<dependent>]");
            }
            TypeKind::Vector {
                element,
                len,
                flavor,
            } => {
                if *flavor != VectorFlavor::Generic {
                    buf.push_str("__vector ");
                }
                self.format_type_into(*element, buf);
                buf.push_str(&format!(" __attribute__((vector_size({len})))"));
            }
            TypeKind::ExtVector { element, len } => {
                self.format_type_into(*element, buf);
                buf.push_str(&format!(" __attribute__((ext_vector_type({len})))"));
            }
            TypeKind::DependentSizedExtVector { element, .. } => {
                self.format_type_into(*element, buf);
                buf.push_str(" __attribute__((ext_vector_type(<dependent>)))");
            }
            TypeKind::FunctionNoProto { result, .. } => {
                self.format_type_into(*result, buf);
                buf.push_str(" ()");
            }
            TypeKind::FunctionProto(proto) => {
                self.format_type_into(proto.result, buf);
                buf.push_str(" (");
                for (i, param) in proto.params.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_type_into(*param, buf);
                }
                if proto.variadic {
                    buf.push_str(if proto.params.is_empty() { "..." } else { ", ..." });
                } else if proto.params.is_empty() && !self.lang.cplusplus {
                    buf.push_str("void");
                }
                buf.push(')');
                if !proto.method_quals.is_empty() {
                    buf.push(' ');
                    push_cvr(proto.method_quals, buf);
                    buf.pop();
                }
            }
            TypeKind::Typedef(decl) | TypeKind::UnresolvedUsing(decl) => {
                self.format_decl_name_into(*decl, buf);
            }
            TypeKind::TypeOfExpr(_) => buf.push_str("typeof(<expr>)"),
            TypeKind::TypeOf(inner) => {
                buf.push_str("typeof(");
                self.format_type_into(*inner, buf);
                buf.push(')');
            }
            TypeKind::Decltype(_) | TypeKind::DependentDecltype(_) => {
                buf.push_str("decltype(<expr>)");
            }
            TypeKind::Record(decl) | TypeKind::Enum(decl) => {
                self.format_decl_name_into(*decl, buf);
            }
            TypeKind::Elaborated { underlying, tag } => {
                buf.push_str(tag.keyword());
                buf.push(' ');
                self.format_type_into(*underlying, buf);
            }
            TypeKind::QualifiedName { qualifier, named } => {
                self.format_nested_name_into(*qualifier, buf);
                self.format_type_into(*named, buf);
            }
            TypeKind::Typename { qualifier, name } => {
                buf.push_str("typename ");
                self.format_nested_name_into(*qualifier, buf);
                buf.push_str(self.ident_str(*name));
            }
            TypeKind::TemplateTypeParm {
                depth, index, name, ..
            } => {
                if name.is_empty() {
                    buf.push_str(&format!("type-parameter-{depth}-{index}"));
                } else {
                    buf.push_str(self.ident_str(*name));
                }
            }
            TypeKind::SubstTemplateTypeParm { replacement, .. } => {
                self.format_type_into(*replacement, buf);
            }
            TypeKind::TemplateSpecialization { template, args } => {
                buf.push_str(self.ident_str(*template));
                buf.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_type_into(*arg, buf);
                }
                buf.push('>');
            }
            TypeKind::ObjCInterface { decl, protocols } => {
                self.format_decl_name_into(*decl, buf);
                self.format_protocols_into(protocols, buf);
            }
            TypeKind::ObjCObjectPointer { pointee, protocols } => {
                self.format_type_into(*pointee, buf);
                self.format_protocols_into(protocols, buf);
                buf.push_str(" *");
            }
        }
    }

    /// Format a declaration name, e.g. `x`, `~S`, `operator+`.
    pub fn format_name(&self, name: DeclarationName) -> String {
        match name {
            DeclarationName::Empty => String::new(),
            DeclarationName::Identifier(ident) => self.ident_str(ident).to_owned(),
            DeclarationName::ObjCSelector(sel) => {
                let data = self.selector_data(sel);
                if data.num_args == 0 {
                    return data
                        .pieces
                        .first()
                        .map_or_else(String::new, |piece| self.ident_str(*piece).to_owned());
                }
                let mut buf = String::new();
                for piece in &*data.pieces {
                    buf.push_str(self.ident_str(*piece));
                    buf.push(':');
                }
                buf
            }
            DeclarationName::CxxConstructor(ty) => self.format_type(ty),
            DeclarationName::CxxDestructor(ty) => format!("~{}", self.format_type(ty)),
            DeclarationName::CxxConversionFunction(ty) => {
                format!("operator {}", self.format_type(ty))
            }
            DeclarationName::CxxOperator(op) => format!("operator{}", op.spelling()),
            DeclarationName::CxxLiteralOperator(ident) => {
                format!("operator \"\" {}", self.ident_str(ident))
            }
            DeclarationName::CxxUsingDirective => "<using-directive>".to_owned(),
        }
    }

    fn format_decl_name_into(&self, decl: DeclId, buf: &mut String) {
        let name = self.decl(decl).name;
        if name.is_empty() {
            buf.push_str("<anonymous>");
        } else {
            buf.push_str(&self.format_name(name));
        }
    }

    fn format_nested_name_into(&self, id: NestedNameId, buf: &mut String) {
        let prefix = match self.nested_name_specifier(id) {
            NestedNameSpecifier::Global => None,
            NestedNameSpecifier::Namespace { prefix, .. }
            | NestedNameSpecifier::Type { prefix, .. }
            | NestedNameSpecifier::Identifier { prefix, .. } => prefix,
        };
        if let Some(prefix) = prefix {
            self.format_nested_name_into(prefix, buf);
        }
        match self.nested_name_specifier(id) {
            NestedNameSpecifier::Global => {}
            NestedNameSpecifier::Namespace { namespace, .. } => {
                self.format_decl_name_into(namespace, buf);
            }
            NestedNameSpecifier::Type { ty, .. } => {
                self.format_type_into(QualType::unqualified(ty), buf);
            }
            NestedNameSpecifier::Identifier { name, .. } => buf.push_str(self.ident_str(name)),
        }
        buf.push_str("::");
    }

    fn format_protocols_into(&self, protocols: &[DeclId], buf: &mut String) {
        if protocols.is_empty() {
            return;
        }
        buf.push('<');
        for (i, protocol) in protocols.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            self.format_decl_name_into(*protocol, buf);
        }
        buf.push('>');
    }
}

fn push_qualifiers(quals: Qualifiers, buf: &mut String) {
    push_cvr(quals.cvr, buf);
    if quals.address_space != 0 {
        buf.push_str(&format!("__attribute__((address_space({}))) ", quals.address_space));
    }
}

/// Push `const volatile restrict ` for the set bits, each followed by a space.
fn push_cvr(cvr: Cvr, buf: &mut String) {
    if cvr.contains(Cvr::CONST) {
        buf.push_str("const ");
    }
    if cvr.contains(Cvr::VOLATILE) {
        buf.push_str("volatile ");
    }
    if cvr.contains(Cvr::RESTRICT) {
        buf.push_str("restrict ");
    }
}
