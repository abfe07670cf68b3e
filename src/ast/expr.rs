//! Default-argument expression nodes.
//!
//! This is a closed set: the literals and operators the constant evaluator
//! understands, the opaque shapes it must reject (`Call`, `DeclRef`), and
//! the transparent wrappers the string destructuring sees through
//! (temporary materialization, temporary binding, casts). Anything a real
//! frontend produces outside this set maps to one of the opaque shapes.

use super::context::RecordId;

/// Unary operators that can appear in a constant default argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `+x`
    Plus,
    /// `!x`
    LogicalNot,
    /// `~x`
    BitwiseNot,
}

/// Binary operators that can appear in a constant default argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    LogicalAnd,
    LogicalOr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A default-argument expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Signed integer literal (`42`).
    IntLiteral(i64),
    /// Unsigned integer literal (`42u`).
    UIntLiteral(u64),
    /// Floating-point literal (`1.5`).
    FloatLiteral(f64),
    /// `true` / `false`.
    BoolLiteral(bool),
    /// String literal (`"hi"`).
    StringLiteral(String),
    /// `nullptr` (or a null pointer constant).
    NullPtr,
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Parenthesized sub-expression.
    Paren(Box<Expr>),
    /// `cond ? then_expr : else_expr`
    Conditional {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// `lhs, rhs` - the left operand's value is discarded.
    Comma {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Assignment. Never a constant expression by itself; inside a comma
    /// operand it is an evaluable, discarded side effect.
    Assign {
        target: String,
        value: Box<Expr>,
    },
    /// A function call. Never a constant expression here.
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    /// Reference to some declaration. Never a constant expression here.
    DeclRef(String),
    /// Constructor call on a record type.
    Construct {
        record: RecordId,
        args: Vec<Expr>,
    },
    /// Transparent wrapper: temporary materialization.
    MaterializeTemporary(Box<Expr>),
    /// Transparent wrapper: temporary binding.
    BindTemporary(Box<Expr>),
    /// Transparent wrapper: implicit or explicit cast. Holds the
    /// sub-expression as written, not the converted value.
    Cast(Box<Expr>),
}

impl Expr {
    pub fn string(text: impl Into<String>) -> Self {
        Expr::StringLiteral(text.into())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn conditional(cond: Expr, then_expr: Expr, else_expr: Expr) -> Self {
        Expr::Conditional {
            cond: Box::new(cond),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }

    pub fn comma(lhs: Expr, rhs: Expr) -> Self {
        Expr::Comma {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Expr::Assign {
            target: target.into(),
            value: Box::new(value),
        }
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn construct(record: RecordId, args: Vec<Expr>) -> Self {
        Expr::Construct { record, args }
    }

    pub fn materialize(sub: Expr) -> Self {
        Expr::MaterializeTemporary(Box::new(sub))
    }

    pub fn bind_temporary(sub: Expr) -> Self {
        Expr::BindTemporary(Box::new(sub))
    }

    pub fn cast(sub: Expr) -> Self {
        Expr::Cast(Box::new(sub))
    }
}
