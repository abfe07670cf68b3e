//! Integration tests for type resolution.

use cxx_reflect::{
    AstContext, BuiltinKind, QualType, RecordDecl, TemplateArg, TypeResolver,
};

#[test]
fn builtin_identity_properties() {
    let ctx = AstContext::new();
    for kind in [
        BuiltinKind::Bool,
        BuiltinKind::Char,
        BuiltinKind::Int,
        BuiltinKind::UInt,
        BuiltinKind::Long,
        BuiltinKind::Float,
        BuiltinKind::Double,
    ] {
        let ty = TypeResolver::resolve(&QualType::builtin(kind), &ctx);
        assert_eq!(ty.pointer, 0, "{kind:?}");
        assert!(!ty.is_reference);
        assert!(!ty.is_const);
        assert!(ty.is_builtin);
        assert_eq!(ty.base_name, ty.full_name);
    }
}

#[test]
fn indirection_depth_counts_layers() {
    let ctx = AstContext::new();
    let direct = TypeResolver::resolve(&QualType::builtin(BuiltinKind::Int), &ctx);

    let mut qt = QualType::builtin(BuiltinKind::Int);
    for depth in 1..=5u32 {
        qt = qt.pointer_to();
        let ty = TypeResolver::resolve(&qt, &ctx);
        assert_eq!(ty.pointer, depth);
        assert_eq!(ty.base_name, direct.base_name);
        assert!(!ty.is_reference);
    }
    // The outermost spelling keeps all the stars.
    let ty = TypeResolver::resolve(&qt, &ctx);
    assert_eq!(ty.full_name, "int *****");
}

#[test]
fn reference_over_pointer_accumulates() {
    let mut ctx = AstContext::new();
    let foo = ctx.add_record(RecordDecl::plain("ns::Foo"));
    // ns::Foo *&
    let qt = QualType::record(foo).pointer_to().lvalue_ref_to();

    let ty = TypeResolver::resolve(&qt, &ctx);
    assert_eq!(ty.pointer, 2);
    assert!(ty.is_reference);
    assert!(!ty.is_move);
    assert_eq!(ty.full_name, "ns::Foo *&");
    assert_eq!(ty.base_name, "ns::Foo");
}

#[test]
fn const_applies_to_innermost_type_only() {
    let mut ctx = AstContext::new();
    let foo = ctx.add_record(RecordDecl::plain("Foo"));

    // const Foo &: const is seen on the innermost type.
    let qt = QualType::record(foo).with_const().lvalue_ref_to();
    let ty = TypeResolver::resolve(&qt, &ctx);
    assert!(ty.is_const);
    assert!(ty.is_reference);

    // Foo *const: const sits on the pointer layer, not the innermost type.
    let qt = QualType::record(foo).pointer_to().with_const();
    let ty = TypeResolver::resolve(&qt, &ctx);
    assert!(!ty.is_const);
    assert_eq!(ty.full_name, "Foo *const");
    assert_eq!(ty.base_name, "Foo");
}

#[test]
fn rvalue_reference_implies_reference() {
    let mut ctx = AstContext::new();
    let foo = ctx.add_record(RecordDecl::plain("Foo"));
    let ty = TypeResolver::resolve(&QualType::record(foo).rvalue_ref_to(), &ctx);
    assert!(ty.is_reference);
    assert!(ty.is_move);
    assert_eq!(ty.full_name, "Foo &&");
}

#[test]
fn template_of_plain_types_resolves_arguments() {
    let mut ctx = AstContext::new();
    let a = ctx.add_record(RecordDecl::plain("A"));
    let b = ctx.add_record(RecordDecl::plain("B"));
    let tmpl = ctx.add_record(RecordDecl::specialized(
        "Tmpl",
        vec![
            TemplateArg::Type(QualType::record(a)),
            TemplateArg::Type(QualType::record(b)),
        ],
    ));

    let ty = TypeResolver::resolve(&QualType::record(tmpl), &ctx);
    let templ = ty.templ.expect("template descriptor");
    assert_eq!(templ.base_name, "Tmpl");
    assert_eq!(templ.full_name, "Tmpl<A, B>");

    // Arguments resolve exactly as the types would on their own, in order.
    let expected_a = TypeResolver::resolve(&QualType::record(a), &ctx);
    let expected_b = TypeResolver::resolve(&QualType::record(b), &ctx);
    assert_eq!(templ.arguments, vec![expected_a, expected_b]);
}

#[test]
fn template_argument_with_indirection_resolves_recursively() {
    let mut ctx = AstContext::new();
    let inner = ctx.add_record(RecordDecl::plain("Item"));
    let vec = ctx.add_record(RecordDecl::specialized(
        "std::vector",
        vec![TemplateArg::Type(QualType::record(inner).pointer_to())],
    ));

    let ty = TypeResolver::resolve(&QualType::record(vec).with_const().lvalue_ref_to(), &ctx);
    assert_eq!(ty.full_name, "const std::vector<Item *> &");
    assert_eq!(ty.base_name, "std::vector<Item *>");
    assert!(ty.is_const);

    let templ = ty.templ.expect("template descriptor");
    assert_eq!(templ.arguments.len(), 1);
    assert_eq!(templ.arguments[0].pointer, 1);
    assert_eq!(templ.arguments[0].base_name, "Item");
}

#[test]
fn non_type_argument_omits_template_entirely() {
    let mut ctx = AstContext::new();
    let a = ctx.add_record(RecordDecl::plain("A"));
    let tmpl = ctx.add_record(RecordDecl::specialized(
        "Tmpl",
        vec![
            TemplateArg::Type(QualType::record(a)),
            TemplateArg::Integral(7),
        ],
    ));

    let ty = TypeResolver::resolve(&QualType::record(tmpl), &ctx);
    assert!(ty.templ.is_none(), "no partial template descriptor");
}

#[test]
fn resolution_is_idempotent() {
    let mut ctx = AstContext::new();
    let item = ctx.add_record(RecordDecl::plain("Item"));
    let vec = ctx.add_record(RecordDecl::specialized(
        "std::vector",
        vec![TemplateArg::Type(QualType::record(item))],
    ));
    let qt = QualType::record(vec).with_const().lvalue_ref_to();

    let first = TypeResolver::resolve(&qt, &ctx);
    let second = TypeResolver::resolve(&qt, &ctx);
    assert_eq!(first, second);
}

#[test]
fn type_descriptor_serializes_flat() {
    let mut ctx = AstContext::new();
    let foo = ctx.add_record(RecordDecl::plain("ns::Foo"));
    let ty = TypeResolver::resolve(&QualType::record(foo).with_const().lvalue_ref_to(), &ctx);

    let json = serde_json::to_value(&ty).unwrap();
    assert_eq!(json["fullName"], "const ns::Foo &");
    assert_eq!(json["baseName"], "ns::Foo");
    assert_eq!(json["pointer"], 1);
    assert_eq!(json["isReference"], true);
    assert_eq!(json["isConst"], true);
    assert_eq!(json["isBuiltin"], false);
}
