//! Per-parameter entry point for the traversal.

use crate::ast::context::AstContext;
use crate::ast::ty::ParmVarDecl;
use crate::default_value::extract_default;
use crate::descriptor::Argument;
use crate::resolver::TypeResolver;

/// Build the full [`Argument`] descriptor for one function parameter:
/// resolve its static type, then attempt default-value extraction if the
/// declaration has a default argument.
pub fn process_function_parameter(decl: &ParmVarDecl, ctx: &AstContext) -> Argument {
    let mut arg = Argument::default();

    TypeResolver::resolve_into(&mut arg.ty, &decl.ty, ctx);
    arg.name = decl.name.clone();
    arg.has_default = decl.has_default_arg();

    // If the parameter has a default value, try to figure it out. Can fail
    // if e.g. the expression has side effects (like calling another
    // method). Works for constant expressions though, like `true` or
    // `3 + 5`.
    if let Some(expr) = &decl.default_arg {
        arg.value = extract_default(&decl.ty, ctx, expr);
    }

    arg
}
