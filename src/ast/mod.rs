//! Input-side model of compiler-internal handles.
//!
//! The external traversal constructs these values (types, record
//! declarations, default-argument expressions) and hands them to the
//! resolver and extractor by reference. This crate only reads them and
//! returns owned descriptor trees; it never retains a handle after a call
//! returns.

pub mod context;
pub mod expr;
pub mod ty;
