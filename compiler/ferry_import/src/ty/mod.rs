//! Type translation.
//!
//! One rule per [`TypeKind`]. Composite rules import every child first and
//! only then ask the target context for the composite node, so a failing
//! child never leaves a half-built composite behind. Memoization is on the
//! unqualified node; qualifiers ride along outside the map.

use ferry_ast::{
    ArrayShape, BuiltinKind, DeclId, Dialect, ExceptionSpec, FunctionProto, QualType, TypeId,
    TypeKind,
};

use crate::stack::ensure_sufficient_stack;
use crate::{ImportError, ImportHooks, ImportResult, Importer};

impl<H: ImportHooks> Importer<'_, H> {
    /// Import a possibly-qualified type.
    ///
    /// The null type imports to itself. Otherwise the unqualified node is
    /// looked up in (or added to) the identity map and the source
    /// qualifiers are re-applied on top of the result.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = ?from_ty.ty))]
    pub fn import_type(&mut self, from_ty: QualType) -> ImportResult<QualType> {
        if from_ty.is_null() {
            return Ok(QualType::NULL);
        }

        let base = match self.imported.type_of(from_ty.ty) {
            Some(to) => to,
            None => {
                let to = ensure_sufficient_stack(|| self.import_type_node(from_ty.ty))?;
                self.imported.insert_type(from_ty.ty, to);
                to
            }
        };
        Ok(QualType::new(base, from_ty.quals))
    }

    fn import_type_node(&mut self, id: TypeId) -> ImportResult<TypeId> {
        let from = self.from;
        let kind = from.type_kind(id);
        match kind {
            TypeKind::Builtin(builtin) => self.import_builtin(*builtin),

            TypeKind::Complex(element) => {
                let element = self.import_type(*element)?;
                Ok(self.to.complex_type(element))
            }
            TypeKind::Pointer(pointee) => {
                let pointee = self.import_type(*pointee)?;
                Ok(self.to.pointer_type(pointee))
            }
            TypeKind::BlockPointer(pointee) => {
                self.require_dialect("block pointer", Dialect::Blocks)?;
                let pointee = self.import_type(*pointee)?;
                Ok(self.to.block_pointer_type(pointee))
            }
            TypeKind::LValueReference(pointee) => {
                self.require_dialect("lvalue reference", Dialect::CPlusPlus)?;
                let pointee = self.import_type(*pointee)?;
                Ok(self.to.lvalue_reference_type(pointee))
            }
            TypeKind::RValueReference(pointee) => {
                self.require_dialect("rvalue reference", Dialect::CPlusPlus0x)?;
                let pointee = self.import_type(*pointee)?;
                Ok(self.to.rvalue_reference_type(pointee))
            }
            TypeKind::MemberPointer { pointee, class } => {
                self.require_dialect("member pointer", Dialect::CPlusPlus)?;
                let pointee = self.import_type(*pointee)?;
                let class = self.import_type(QualType::unqualified(*class))?;
                Ok(self.to.member_pointer_type(pointee, class.ty))
            }

            TypeKind::ConstantArray { shape, size } => {
                let shape = self.import_array_shape(shape)?;
                Ok(self.to.constant_array_type(shape, *size))
            }
            TypeKind::IncompleteArray(shape) => {
                let shape = self.import_array_shape(shape)?;
                Ok(self.to.incomplete_array_type(shape))
            }
            TypeKind::VariableArray {
                shape,
                size,
                brackets,
            } => {
                let shape = self.import_array_shape(shape)?;
                let size = self.import_expr(*size)?;
                let brackets = self.import_source_range(*brackets);
                Ok(self.to.variable_array_type(shape, size, brackets))
            }

            TypeKind::Vector {
                element,
                len,
                flavor,
            } => {
                let element = self.import_type(*element)?;
                Ok(self.to.vector_type(element, *len, *flavor))
            }
            TypeKind::ExtVector { element, len } => {
                let element = self.import_type(*element)?;
                Ok(self.to.ext_vector_type(element, *len))
            }

            TypeKind::FunctionNoProto { result, ext } => {
                let result = self.import_type(*result)?;
                Ok(self.to.function_no_proto_type(result, *ext))
            }
            TypeKind::FunctionProto(proto) => {
                let proto = self.import_function_proto(proto)?;
                Ok(self.to.function_type(proto))
            }

            TypeKind::Typedef(decl) => {
                let decl = self.import_decl(*decl)?;
                Ok(self.to.typedef_type(decl))
            }
            TypeKind::TypeOfExpr(expr) => {
                let expr = self.import_expr(*expr)?;
                Ok(self.to.typeof_expr_type(expr))
            }
            TypeKind::TypeOf(underlying) => {
                let underlying = self.import_type(*underlying)?;
                Ok(self.to.typeof_type(underlying))
            }
            TypeKind::Decltype(expr) => {
                self.require_dialect("decltype", Dialect::CPlusPlus0x)?;
                let expr = self.import_expr(*expr)?;
                Ok(self.to.decltype_type(expr))
            }

            TypeKind::Record(decl) => {
                let decl = self.import_decl(*decl)?;
                Ok(self.to.record_type(decl))
            }
            TypeKind::Enum(decl) => {
                let decl = self.import_decl(*decl)?;
                Ok(self.to.enum_type(decl))
            }
            TypeKind::Elaborated { underlying, tag } => {
                let underlying = self.import_type(*underlying)?;
                Ok(self.to.elaborated_type(underlying, *tag))
            }
            TypeKind::QualifiedName { qualifier, named } => {
                let qualifier = self.import_nested_name_specifier(*qualifier)?;
                let named = self.import_type(*named)?;
                Ok(self.to.qualified_name_type(qualifier, named))
            }

            TypeKind::ObjCInterface { decl, protocols } => {
                self.require_dialect("Objective-C interface type", Dialect::ObjC)?;
                let decl = self.import_decl(*decl)?;
                let protocols = self.import_protocols(protocols)?;
                Ok(self.to.objc_interface_type(decl, protocols))
            }
            TypeKind::ObjCObjectPointer { pointee, protocols } => {
                self.require_dialect("Objective-C object pointer", Dialect::ObjC)?;
                let pointee = self.import_type(*pointee)?;
                let protocols = self.import_protocols(protocols)?;
                Ok(self.to.objc_object_pointer_type(pointee, protocols))
            }

            TypeKind::DependentSizedArray { .. }
            | TypeKind::DependentSizedExtVector { .. }
            | TypeKind::DependentDecltype(_)
            | TypeKind::Typename { .. }
            | TypeKind::TemplateTypeParm { .. }
            | TypeKind::SubstTemplateTypeParm { .. }
            | TypeKind::TemplateSpecialization { .. }
            | TypeKind::UnresolvedUsing(_) => {
                tracing::trace!(class = %kind.class(), "refusing dependent type");
                Err(ImportError::UnsupportedType(kind.class()))
            }
        }
    }

    /// Builtins map one to one, except plain `char` when the two contexts
    /// disagree on its signedness.
    fn import_builtin(&self, kind: BuiltinKind) -> ImportResult<TypeId> {
        let to_kind = match kind {
            BuiltinKind::Char => {
                let from_signed = self.from.lang().char_is_signed;
                let to_signed = self.to.lang().char_is_signed;
                match (from_signed, to_signed) {
                    (false, true) => BuiltinKind::UChar,
                    (true, false) => BuiltinKind::SChar,
                    _ => BuiltinKind::Char,
                }
            }
            BuiltinKind::WChar | BuiltinKind::Char16 | BuiltinKind::Char32 => {
                self.require_dialect(kind.spelling(), Dialect::CPlusPlus)?;
                kind
            }
            BuiltinKind::NullPtr | BuiltinKind::UndeducedAuto => {
                self.require_dialect(kind.spelling(), Dialect::CPlusPlus0x)?;
                kind
            }
            BuiltinKind::ObjCId | BuiltinKind::ObjCClass | BuiltinKind::ObjCSel => {
                self.require_dialect(kind.spelling(), Dialect::ObjC)?;
                kind
            }
            _ => kind,
        };
        Ok(self.to.builtin_type(to_kind))
    }

    fn import_array_shape(&mut self, shape: &ArrayShape) -> ImportResult<ArrayShape> {
        let element = self.import_type(shape.element)?;
        Ok(shape.with_element(element))
    }

    fn import_function_proto(&mut self, proto: &FunctionProto) -> ImportResult<FunctionProto> {
        let result = self.import_type(proto.result)?;
        let params = proto
            .params
            .iter()
            .map(|&param| self.import_type(param))
            .collect::<ImportResult<Vec<_>>>()?;
        let exception_types = proto
            .exceptions
            .types
            .iter()
            .map(|&ty| self.import_type(ty))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok(FunctionProto {
            result,
            params: params.into_boxed_slice(),
            variadic: proto.variadic,
            method_quals: proto.method_quals,
            exceptions: ExceptionSpec {
                has_spec: proto.exceptions.has_spec,
                has_any: proto.exceptions.has_any,
                types: exception_types.into_boxed_slice(),
            },
            ext: proto.ext,
        })
    }

    /// Import an Objective-C protocol qualifier list; any failure fails the
    /// whole list.
    fn import_protocols(&mut self, protocols: &[DeclId]) -> ImportResult<Vec<DeclId>> {
        protocols
            .iter()
            .map(|&protocol| self.import_decl(protocol))
            .collect()
    }
}
