//! Type handles: qualified types, builtin kinds, record declarations.
//!
//! A [`QualType`] pairs one level of CV-qualification with a [`TyKind`].
//! Indirect kinds (pointer, reference) own their pointee `QualType`, so a
//! declarator like `const Foo *&` is a small tree walked innermost-out by
//! the resolver. Record types refer into an [`AstContext`] by id; the
//! context owns the declarations.
//!
//! [`AstContext`]: super::context::AstContext

use bitflags::bitflags;

use super::context::RecordId;
use super::expr::Expr;
use crate::qualified_name::QualifiedName;

bitflags! {
    /// CV-qualifiers attached to one level of a declarator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Qualifiers: u8 {
        const CONST    = 1 << 0;
        const VOLATILE = 1 << 1;
        const RESTRICT = 1 << 2;
    }
}

/// Built-in (fundamental) C++ types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Void,
    Bool,
    Char,
    SChar,
    UChar,
    WChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    LongDouble,
}

impl BuiltinKind {
    /// Canonical spelling of this builtin type.
    pub const fn spelling(self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Char => "char",
            BuiltinKind::SChar => "signed char",
            BuiltinKind::UChar => "unsigned char",
            BuiltinKind::WChar => "wchar_t",
            BuiltinKind::Short => "short",
            BuiltinKind::UShort => "unsigned short",
            BuiltinKind::Int => "int",
            BuiltinKind::UInt => "unsigned int",
            BuiltinKind::Long => "long",
            BuiltinKind::ULong => "unsigned long",
            BuiltinKind::LongLong => "long long",
            BuiltinKind::ULongLong => "unsigned long long",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::LongDouble => "long double",
        }
    }

    /// Whether this is an integral type. Includes `bool` and the character
    /// types, as the C++ type system does.
    pub const fn is_integer(self) -> bool {
        !matches!(
            self,
            BuiltinKind::Void | BuiltinKind::Float | BuiltinKind::Double | BuiltinKind::LongDouble
        )
    }

    /// Whether this is a signed integral type. Plain `char` and `wchar_t`
    /// follow the common Itanium-target convention and count as signed.
    pub const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            BuiltinKind::Char
                | BuiltinKind::SChar
                | BuiltinKind::WChar
                | BuiltinKind::Short
                | BuiltinKind::Int
                | BuiltinKind::Long
                | BuiltinKind::LongLong
        )
    }

    /// Whether this is a floating-point type.
    pub const fn is_floating(self) -> bool {
        matches!(
            self,
            BuiltinKind::Float | BuiltinKind::Double | BuiltinKind::LongDouble
        )
    }
}

/// Shape of a type at one level of the declarator.
#[derive(Debug, Clone, PartialEq)]
pub enum TyKind {
    /// A fundamental type (`int`, `bool`, `double`, ...).
    Builtin(BuiltinKind),
    /// Pointer to the contained type.
    Pointer(QualType),
    /// Lvalue reference to the contained type.
    LValueReference(QualType),
    /// Rvalue reference to the contained type.
    RValueReference(QualType),
    /// A class/struct type declared in the context.
    Record(RecordId),
    /// A type the traversal could not classify. Spells as nothing; the
    /// resolver degrades to a descriptor with empty fields.
    Unknown,
}

/// A type with its top-level qualifiers; the handle the traversal passes in.
#[derive(Debug, Clone, PartialEq)]
pub struct QualType {
    pub quals: Qualifiers,
    pub kind: Box<TyKind>,
}

impl QualType {
    pub fn new(kind: TyKind) -> Self {
        Self {
            quals: Qualifiers::empty(),
            kind: Box::new(kind),
        }
    }

    /// An unqualified builtin type.
    pub fn builtin(kind: BuiltinKind) -> Self {
        Self::new(TyKind::Builtin(kind))
    }

    /// An unqualified record type.
    pub fn record(id: RecordId) -> Self {
        Self::new(TyKind::Record(id))
    }

    /// Add `const` to this level of the type.
    pub fn with_const(mut self) -> Self {
        self.quals |= Qualifiers::CONST;
        self
    }

    /// Wrap this type in a pointer (`T` becomes `T *`).
    pub fn pointer_to(self) -> Self {
        Self::new(TyKind::Pointer(self))
    }

    /// Wrap this type in an lvalue reference (`T` becomes `T &`).
    pub fn lvalue_ref_to(self) -> Self {
        Self::new(TyKind::LValueReference(self))
    }

    /// Wrap this type in an rvalue reference (`T` becomes `T &&`).
    pub fn rvalue_ref_to(self) -> Self {
        Self::new(TyKind::RValueReference(self))
    }

    /// The same type with the qualifiers of this level removed.
    pub fn unqualified(&self) -> Self {
        Self {
            quals: Qualifiers::empty(),
            kind: self.kind.clone(),
        }
    }

    pub fn is_const_qualified(&self) -> bool {
        self.quals.contains(Qualifiers::CONST)
    }

    pub fn is_pointer_type(&self) -> bool {
        matches!(*self.kind, TyKind::Pointer(_))
    }

    pub fn is_reference_type(&self) -> bool {
        matches!(
            *self.kind,
            TyKind::LValueReference(_) | TyKind::RValueReference(_)
        )
    }

    pub fn is_rvalue_reference_type(&self) -> bool {
        matches!(*self.kind, TyKind::RValueReference(_))
    }

    pub fn is_void_type(&self) -> bool {
        matches!(*self.kind, TyKind::Builtin(BuiltinKind::Void))
    }

    pub fn is_builtin_type(&self) -> bool {
        matches!(*self.kind, TyKind::Builtin(_))
    }

    pub fn is_boolean_type(&self) -> bool {
        matches!(*self.kind, TyKind::Builtin(BuiltinKind::Bool))
    }

    pub fn is_integer_type(&self) -> bool {
        matches!(*self.kind, TyKind::Builtin(b) if b.is_integer())
    }

    pub fn is_signed_integer_type(&self) -> bool {
        matches!(*self.kind, TyKind::Builtin(b) if b.is_signed_integer())
    }

    pub fn is_floating_type(&self) -> bool {
        matches!(*self.kind, TyKind::Builtin(b) if b.is_floating())
    }

    /// The type this pointer or reference points at, if any.
    pub fn pointee(&self) -> Option<&QualType> {
        match &*self.kind {
            TyKind::Pointer(p) | TyKind::LValueReference(p) | TyKind::RValueReference(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<RecordId> {
        match *self.kind {
            TyKind::Record(id) => Some(id),
            _ => None,
        }
    }
}

/// One instantiation argument of a class-template specialization.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateArg {
    /// A type argument (`std::vector<int>` carries one of these).
    Type(QualType),
    /// A non-type (integral constant) argument (`std::array<int, 4>`).
    Integral(i64),
    /// A template-template argument.
    Template(QualifiedName),
    /// An expanded parameter pack.
    Pack(Vec<TemplateArg>),
}

/// Instantiation arguments of a class-template specialization, in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSpecialization {
    pub args: Vec<TemplateArg>,
}

impl TemplateSpecialization {
    pub fn new(args: Vec<TemplateArg>) -> Self {
        Self { args }
    }
}

/// A class/struct declaration known to the context.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    /// Qualified name of the record, without template arguments.
    pub name: QualifiedName,
    /// Present when this record is a class-template specialization.
    pub specialization: Option<TemplateSpecialization>,
}

impl RecordDecl {
    /// A plain (non-template) record.
    pub fn plain(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            specialization: None,
        }
    }

    /// A class-template specialization with the given instantiation
    /// arguments.
    pub fn specialized(name: impl Into<QualifiedName>, args: Vec<TemplateArg>) -> Self {
        Self {
            name: name.into(),
            specialization: Some(TemplateSpecialization::new(args)),
        }
    }
}

/// A function parameter declaration as handed over by the traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct ParmVarDecl {
    /// Qualified name of the parameter as spelled in the declaration.
    pub name: String,
    /// The parameter's static type.
    pub ty: QualType,
    /// The default-argument expression, if the declaration has one.
    pub default_arg: Option<Expr>,
}

impl ParmVarDecl {
    pub fn new(name: impl Into<String>, ty: QualType) -> Self {
        Self {
            name: name.into(),
            ty,
            default_arg: None,
        }
    }

    pub fn with_default(name: impl Into<String>, ty: QualType, expr: Expr) -> Self {
        Self {
            name: name.into(),
            ty,
            default_arg: Some(expr),
        }
    }

    pub fn has_default_arg(&self) -> bool {
        self.default_arg.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_classification() {
        assert!(BuiltinKind::Bool.is_integer());
        assert!(BuiltinKind::Char.is_integer());
        assert!(!BuiltinKind::Bool.is_signed_integer());
        assert!(BuiltinKind::Int.is_signed_integer());
        assert!(!BuiltinKind::UInt.is_signed_integer());
        assert!(!BuiltinKind::Double.is_integer());
        assert!(BuiltinKind::Double.is_floating());
        assert!(!BuiltinKind::Void.is_integer());
    }

    #[test]
    fn qual_type_shape_queries() {
        let int = QualType::builtin(BuiltinKind::Int);
        assert!(int.is_builtin_type());
        assert!(int.is_integer_type());
        assert!(!int.is_pointer_type());

        let ptr = QualType::builtin(BuiltinKind::Int).pointer_to();
        assert!(ptr.is_pointer_type());
        assert!(!ptr.is_integer_type());
        assert_eq!(
            ptr.pointee(),
            Some(&QualType::builtin(BuiltinKind::Int))
        );

        let rref = QualType::builtin(BuiltinKind::Int).rvalue_ref_to();
        assert!(rref.is_reference_type());
        assert!(rref.is_rvalue_reference_type());
    }

    #[test]
    fn unqualified_strips_this_level_only() {
        let t = QualType::builtin(BuiltinKind::Int).with_const();
        assert!(t.is_const_qualified());
        assert!(!t.unqualified().is_const_qualified());
    }
}
