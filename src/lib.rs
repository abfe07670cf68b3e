//! Descriptor extraction for C++ declarations.
//!
//! This crate turns a compiler's internal representation of a C++ type or
//! function parameter into a flat, serializable descriptor model for binding
//! generators and reflection tooling. Two pure components do the work:
//!
//! - [`TypeResolver`] unwraps a possibly-qualified, possibly-indirect,
//!   possibly-templated type into a [`Type`] descriptor (pointer depth,
//!   constness, template instantiation arguments, fully qualified names).
//! - Default-value extraction ([`extract_default`]) recovers a literal
//!   [`Value`] for a parameter's default argument: constant evaluation
//!   first, then structural destructuring of string-literal construction.
//!
//! The source traversal that discovers declarations is an external
//! collaborator. It builds the input handles ([`QualType`], [`Expr`],
//! [`ParmVarDecl`]) inside an [`AstContext`] and calls
//! [`process_function_parameter`] once per parameter; the returned
//! [`Argument`] tree is owned by the caller and ready for serialization.

pub mod ast;
pub mod const_eval;
pub mod default_value;
pub mod descriptor;
pub mod parameter;
pub mod qualified_name;
pub mod resolver;

pub use ast::context::{AstContext, RecordId};
pub use ast::expr::{BinaryOp, Expr, UnaryOp};
pub use ast::ty::{
    BuiltinKind, ParmVarDecl, QualType, Qualifiers, RecordDecl, TemplateArg,
    TemplateSpecialization, TyKind,
};
pub use const_eval::{ConstEvaluator, ConstValue, EvalError, EvalResult};
pub use default_value::extract_default;
pub use descriptor::{Argument, Template, Type, Value};
pub use parameter::process_function_parameter;
pub use qualified_name::QualifiedName;
pub use resolver::TypeResolver;
