//! Recursive resolution of type handles into [`Type`] descriptors.

use crate::ast::context::AstContext;
use crate::ast::ty::{QualType, RecordDecl, TemplateArg, TyKind};
use crate::descriptor::{Template, Type};

/// Resolves a compiler type handle into a flat [`Type`] descriptor.
///
/// Resolution strips pointer and reference layers one at a time,
/// accumulating the indirection count and reference flags, then classifies
/// the first non-indirect type it reaches. Deterministic and side-effect
/// free: resolving the same handle twice yields structurally equal trees.
pub struct TypeResolver;

impl TypeResolver {
    /// Resolve a type into a fresh descriptor.
    pub fn resolve(qt: &QualType, ctx: &AstContext) -> Type {
        let mut ty = Type::default();
        Self::resolve_into(&mut ty, qt, ctx);
        ty
    }

    /// Resolve a type into an existing descriptor (used for the recursive
    /// descent, and by [`process_function_parameter`] to populate the type
    /// embedded in an argument).
    ///
    /// [`process_function_parameter`]: crate::parameter::process_function_parameter
    pub fn resolve_into(target: &mut Type, qt: &QualType, ctx: &AstContext) {
        // First entry only: capture the original spelling before anything
        // is stripped.
        if target.full_name.is_empty() {
            target.full_name = ctx.fully_qualified_name(qt);
        }

        match &*qt.kind {
            TyKind::Pointer(pointee) => {
                target.pointer += 1;
                return Self::resolve_into(target, pointee, ctx);
            }
            TyKind::LValueReference(pointee) => {
                target.is_reference = true;
                target.pointer += 1;
                return Self::resolve_into(target, pointee, ctx);
            }
            TyKind::RValueReference(pointee) => {
                target.is_reference = true;
                target.is_move = true;
                target.pointer += 1;
                return Self::resolve_into(target, pointee, ctx);
            }
            _ => {}
        }

        if let Some(id) = qt.as_record() {
            target.templ = handle_template(ctx.record(id), ctx);
        }

        // Not a reference or pointer.
        target.is_const = qt.is_const_qualified();
        target.is_void = qt.is_void_type();
        target.is_builtin = qt.is_builtin_type();
        target.base_name = ctx.fully_qualified_name(&qt.unqualified());
    }
}

/// Build the [`Template`] descriptor for a specialized record, or `None`
/// for plain records and for specializations carrying any non-type
/// argument. A single non-type argument discards the whole descriptor
/// rather than emitting a partial one.
fn handle_template(record: &RecordDecl, ctx: &AstContext) -> Option<Template> {
    let spec = record.specialization.as_ref()?;

    let mut templ = Template {
        base_name: record.name.to_string(),
        full_name: ctx.record_full_name(record),
        arguments: Vec::with_capacity(spec.args.len()),
    };

    for arg in &spec.args {
        // Sanity check, ignore the whole template otherwise.
        let TemplateArg::Type(qt) = arg else {
            return None;
        };
        templ.arguments.push(TypeResolver::resolve(qt, ctx));
    }

    Some(templ)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ty::BuiltinKind;

    #[test]
    fn plain_builtin() {
        let ctx = AstContext::new();
        let ty = TypeResolver::resolve(&QualType::builtin(BuiltinKind::Int), &ctx);
        assert_eq!(ty.full_name, "int");
        assert_eq!(ty.base_name, "int");
        assert_eq!(ty.pointer, 0);
        assert!(!ty.is_reference);
        assert!(!ty.is_const);
        assert!(ty.is_builtin);
        assert!(!ty.is_void);
        assert!(ty.templ.is_none());
    }

    #[test]
    fn const_lvalue_reference() {
        let mut ctx = AstContext::new();
        let foo = ctx.add_record(RecordDecl::plain("Foo"));
        let qt = QualType::record(foo).with_const().lvalue_ref_to();

        let ty = TypeResolver::resolve(&qt, &ctx);
        assert_eq!(ty.full_name, "const Foo &");
        assert_eq!(ty.base_name, "Foo");
        assert_eq!(ty.pointer, 1);
        assert!(ty.is_reference);
        assert!(!ty.is_move);
        assert!(ty.is_const);
        assert!(!ty.is_builtin);
    }

    #[test]
    fn rvalue_reference_sets_move() {
        let mut ctx = AstContext::new();
        let foo = ctx.add_record(RecordDecl::plain("Foo"));
        let ty = TypeResolver::resolve(&QualType::record(foo).rvalue_ref_to(), &ctx);
        assert!(ty.is_reference);
        assert!(ty.is_move);
        assert_eq!(ty.pointer, 1);
    }

    #[test]
    fn void_classification() {
        let ctx = AstContext::new();
        let ty = TypeResolver::resolve(&QualType::builtin(BuiltinKind::Void), &ctx);
        assert!(ty.is_void);
        assert!(ty.is_builtin);
    }

    #[test]
    fn unknown_type_degrades_to_empty_fields() {
        let ctx = AstContext::new();
        let ty = TypeResolver::resolve(&QualType::new(TyKind::Unknown), &ctx);
        assert_eq!(ty.full_name, "");
        assert_eq!(ty.base_name, "");
        assert_eq!(ty.pointer, 0);
        assert!(!ty.is_builtin);
        assert!(ty.templ.is_none());
    }

    #[test]
    fn template_arguments_resolve_in_order() {
        let mut ctx = AstContext::new();
        let pair = ctx.add_record(RecordDecl::specialized(
            "std::pair",
            vec![
                TemplateArg::Type(QualType::builtin(BuiltinKind::Int)),
                TemplateArg::Type(QualType::builtin(BuiltinKind::Double)),
            ],
        ));

        let ty = TypeResolver::resolve(&QualType::record(pair), &ctx);
        let templ = ty.templ.expect("template descriptor");
        assert_eq!(templ.base_name, "std::pair");
        assert_eq!(templ.full_name, "std::pair<int, double>");
        assert_eq!(templ.arguments.len(), 2);
        assert_eq!(templ.arguments[0].base_name, "int");
        assert_eq!(templ.arguments[1].base_name, "double");
    }

    #[test]
    fn non_type_argument_discards_whole_template() {
        let mut ctx = AstContext::new();
        let arr = ctx.add_record(RecordDecl::specialized(
            "std::array",
            vec![
                TemplateArg::Type(QualType::builtin(BuiltinKind::Int)),
                TemplateArg::Integral(4),
            ],
        ));

        let ty = TypeResolver::resolve(&QualType::record(arr), &ctx);
        assert!(ty.templ.is_none());
        // The spelling still carries the arguments.
        assert_eq!(ty.base_name, "std::array<int, 4>");
    }
}
