//! Best-effort recovery of literal default-argument values.
//!
//! Strictly ordered, first success wins:
//!
//! 1. Constant evaluation ([`ConstEvaluator`]). A clean result is
//!    interpreted against the parameter's static type. A tainted result
//!    (side effects, undefined behavior) rejects the value outright.
//! 2. Only when the evaluator flatly rejects the expression: structural
//!    destructuring to recover string-class construction from a literal,
//!    which is not a core-constant expression (`std::string("x")`) but is
//!    the most common non-scalar default in practice.
//!
//! Every failure is silent: the argument keeps `has_default` and simply
//! carries no value.

use lazy_static::lazy_static;
use rustc_hash::FxHashSet;

use crate::ast::context::{AstContext, RecordId};
use crate::ast::expr::Expr;
use crate::ast::ty::QualType;
use crate::const_eval::{ConstEvaluator, ConstValue, EvalError};
use crate::descriptor::Value;

lazy_static! {
    /// Qualified names of classes whose construction from a string literal
    /// is read back as a plain string value. Extending supported string
    /// classes means extending this table.
    static ref STRING_CLASSES: FxHashSet<&'static str> = {
        let mut set = FxHashSet::default();
        set.insert("std::__cxx11::basic_string");
        set.insert("std::basic_string");
        set.insert("QString");
        set
    };
}

/// Try to recover a literal value for a parameter's default argument.
///
/// `ty` is the parameter's static type exactly as declared (indirection
/// included); a successfully evaluated constant is interpreted against it.
pub fn extract_default(ty: &QualType, ctx: &AstContext, expr: &Expr) -> Option<Value> {
    match ConstEvaluator::new().evaluate_as_rvalue(expr) {
        // Failed to evaluate - try to unpack the expression as written.
        Err(EvalError::NotConstant) => string_literal_from_expression(expr, ctx),
        // Don't accept if there are side effects or undefined behavior.
        Ok(result) if result.has_side_effects || result.has_undefined_behavior => None,
        Ok(result) => interpret_constant(&result.value, ty),
    }
}

/// Interpret an evaluated constant according to the parameter's static
/// type. The type is checked unstripped, so a reference-typed parameter
/// matches nothing here and the value is dropped.
fn interpret_constant(value: &ConstValue, ty: &QualType) -> Option<Value> {
    if ty.is_pointer_type() {
        // For a pointer type, just store whether it was null.
        Some(Value::Bool(value.is_null_pointer()))
    } else if ty.is_boolean_type() {
        value.as_bool().map(Value::Bool)
    } else if ty.is_integer_type() {
        // Everything integral goes through a sign-extended 64-bit
        // intermediate, reinterpreted for unsigned source types.
        let wide = value.as_ext_value()?;
        if ty.is_signed_integer_type() {
            Some(Value::Int(wide))
        } else {
            Some(Value::UInt(wide as u64))
        }
    } else if ty.is_floating_type() {
        value.as_float().map(Value::Float)
    } else {
        None
    }
}

/// Unwrap transparent wrappers until a string literal or a string-class
/// construction is found.
fn string_literal_from_expression(expr: &Expr, ctx: &AstContext) -> Option<Value> {
    match expr {
        Expr::MaterializeTemporary(sub) | Expr::BindTemporary(sub) | Expr::Cast(sub) => {
            string_literal_from_expression(sub, ctx)
        }
        Expr::Construct { record, args } => try_read_string_constructor(*record, args, ctx),
        // We found it!
        Expr::StringLiteral(text) => Some(Value::String(text.clone())),
        // Failed to destructure.
        _ => None,
    }
}

fn try_read_string_constructor(record: RecordId, args: &[Expr], ctx: &AstContext) -> Option<Value> {
    if !describes_string_class(ctx, record) {
        return None;
    }

    // The constructor call needs to have no or a single argument.
    match args {
        // This is an empty string!
        [] => Some(Value::String(String::new())),
        [single] => string_literal_from_expression(single, ctx),
        // No rules for more than one argument.
        _ => None,
    }
}

fn describes_string_class(ctx: &AstContext, record: RecordId) -> bool {
    STRING_CLASSES.contains(ctx.record(record).name.to_string().as_str())
}
