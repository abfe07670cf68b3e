//! Constant evaluation of default-argument expressions.
//!
//! This is the first stage of default-value extraction: the evaluator
//! computes the value of an expression at compile time when it can, and
//! flatly rejects it with [`EvalError::NotConstant`] when it cannot (a
//! call, a reference to another declaration, a constructor). Alongside the
//! value it reports taint: discarded side effects and undefined behavior
//! encountered during evaluation. The extractor treats a tainted success
//! as unusable.
//!
//! # Supported Expressions
//!
//! - Literals: integers, floats, booleans, `nullptr`; string literals
//!   decay to a non-null pointer constant
//! - Binary operations: arithmetic, bitwise, logical, comparison
//! - Unary operations: negation, plus, logical not, bitwise not
//! - Parenthesized expressions and transparent wrappers
//! - Conditionals (only the chosen branch is evaluated)
//! - The comma operator (a discarded assignment is a recorded side effect)

use thiserror::Error;

use crate::ast::expr::{BinaryOp, Expr, UnaryOp};

/// A compile-time constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    /// Boolean value
    Bool(bool),
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value
    UInt(u64),
    /// Floating-point value (f64 for precision)
    Float(f64),
    /// Pointer constant; only nullness is tracked
    Pointer { is_null: bool },
}

impl ConstValue {
    /// The value as a sign-extended 64-bit integer, the intermediate every
    /// integral result goes through. Unsigned values are reinterpreted
    /// bitwise; floats truncate.
    pub fn as_ext_value(&self) -> Option<i64> {
        match self {
            ConstValue::Int(v) => Some(*v),
            ConstValue::UInt(v) => Some(*v as i64),
            ConstValue::Bool(v) => Some(i64::from(*v)),
            ConstValue::Float(v) => Some(*v as i64),
            ConstValue::Pointer { .. } => None,
        }
    }

    /// The value reinterpreted as 64 unsigned bits.
    pub fn as_uint_bits(&self) -> Option<u64> {
        self.as_ext_value().map(|v| v as u64)
    }

    /// Try to convert this value to an f64.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConstValue::Int(v) => Some(*v as f64),
            ConstValue::UInt(v) => Some(*v as f64),
            ConstValue::Float(v) => Some(*v),
            ConstValue::Bool(_) | ConstValue::Pointer { .. } => None,
        }
    }

    /// Try to convert this value to a bool. Pointers do not convert here;
    /// use [`truthiness`](Self::truthiness) for contextual conversion.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConstValue::Bool(v) => Some(*v),
            ConstValue::Int(v) => Some(*v != 0),
            ConstValue::UInt(v) => Some(*v != 0),
            ConstValue::Float(v) => Some(*v != 0.0),
            ConstValue::Pointer { .. } => None,
        }
    }

    /// Contextual conversion to bool, as in a condition or logical
    /// operand. Pointers are truthy when non-null.
    pub fn truthiness(&self) -> bool {
        match self {
            ConstValue::Bool(v) => *v,
            ConstValue::Int(v) => *v != 0,
            ConstValue::UInt(v) => *v != 0,
            ConstValue::Float(v) => *v != 0.0,
            ConstValue::Pointer { is_null } => !is_null,
        }
    }

    /// Whether this is the null pointer constant.
    pub fn is_null_pointer(&self) -> bool {
        matches!(self, ConstValue::Pointer { is_null: true })
    }
}

/// Successful evaluation: the value plus taint observed along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub value: ConstValue,
    /// A side effect was discarded during evaluation (e.g. an assignment
    /// in a comma operand).
    pub has_side_effects: bool,
    /// Undefined behavior was encountered (e.g. signed overflow); the
    /// value is whatever wrapping produced.
    pub has_undefined_behavior: bool,
}

/// Flat rejection: the expression is not a constant expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("not a constant expression")]
    NotConstant,
}

/// Constant expression evaluator.
///
/// One evaluator per expression; [`evaluate_as_rvalue`] consumes it and
/// packages the accumulated taint with the value.
///
/// [`evaluate_as_rvalue`]: Self::evaluate_as_rvalue
#[derive(Debug, Default)]
pub struct ConstEvaluator {
    side_effects: bool,
    undefined_behavior: bool,
}

/// A pair of operands brought to their common arithmetic type.
enum NumPair {
    Float(f64, f64),
    UInt(u64, u64),
    Int(i64, i64),
}

impl ConstEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate an expression as a compile-time constant rvalue.
    pub fn evaluate_as_rvalue(mut self, expr: &Expr) -> Result<EvalResult, EvalError> {
        let value = self.eval(expr)?;
        Ok(EvalResult {
            value,
            has_side_effects: self.side_effects,
            has_undefined_behavior: self.undefined_behavior,
        })
    }

    fn eval(&mut self, expr: &Expr) -> Result<ConstValue, EvalError> {
        match expr {
            Expr::IntLiteral(v) => Ok(ConstValue::Int(*v)),
            Expr::UIntLiteral(v) => Ok(ConstValue::UInt(*v)),
            Expr::FloatLiteral(v) => Ok(ConstValue::Float(*v)),
            Expr::BoolLiteral(v) => Ok(ConstValue::Bool(*v)),
            // Array-to-pointer decay: a string literal is a non-null
            // pointer constant.
            Expr::StringLiteral(_) => Ok(ConstValue::Pointer { is_null: false }),
            Expr::NullPtr => Ok(ConstValue::Pointer { is_null: true }),
            Expr::Paren(sub)
            | Expr::MaterializeTemporary(sub)
            | Expr::BindTemporary(sub)
            | Expr::Cast(sub) => self.eval(sub),
            Expr::Unary { op, operand } => self.eval_unary(*op, operand),
            Expr::Binary { op, lhs, rhs } => self.eval_binary(*op, lhs, rhs),
            Expr::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                if self.eval(cond)?.truthiness() {
                    self.eval(then_expr)
                } else {
                    self.eval(else_expr)
                }
            }
            Expr::Comma { lhs, rhs } => self.eval_comma(lhs, rhs),
            // These cannot be constant expressions.
            Expr::Assign { .. } | Expr::Call { .. } | Expr::DeclRef(_) | Expr::Construct { .. } => {
                Err(EvalError::NotConstant)
            }
        }
    }

    fn eval_comma(&mut self, lhs: &Expr, rhs: &Expr) -> Result<ConstValue, EvalError> {
        // The left operand's value is discarded. A discarded assignment is
        // an evaluable side effect; anything else non-constant poisons the
        // whole expression.
        match lhs {
            Expr::Assign { value, .. } => {
                self.eval(value)?;
                self.side_effects = true;
            }
            other => {
                self.eval(other)?;
            }
        }
        self.eval(rhs)
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: &Expr) -> Result<ConstValue, EvalError> {
        let value = self.eval(operand)?;

        match op {
            UnaryOp::Neg => match value {
                ConstValue::Int(v) => {
                    let (neg, overflow) = v.overflowing_neg();
                    if overflow {
                        self.undefined_behavior = true;
                    }
                    Ok(ConstValue::Int(neg))
                }
                ConstValue::UInt(v) => Ok(ConstValue::UInt(v.wrapping_neg())),
                ConstValue::Float(v) => Ok(ConstValue::Float(-v)),
                _ => Err(EvalError::NotConstant),
            },
            UnaryOp::Plus => match value {
                ConstValue::Int(_) | ConstValue::UInt(_) | ConstValue::Float(_) => Ok(value),
                _ => Err(EvalError::NotConstant),
            },
            UnaryOp::LogicalNot => Ok(ConstValue::Bool(!value.truthiness())),
            UnaryOp::BitwiseNot => match value {
                ConstValue::Int(v) => Ok(ConstValue::Int(!v)),
                ConstValue::UInt(v) => Ok(ConstValue::UInt(!v)),
                _ => Err(EvalError::NotConstant),
            },
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<ConstValue, EvalError> {
        // Logical operators short-circuit; only the left operand is
        // unconditionally evaluated.
        match op {
            BinaryOp::LogicalAnd => {
                if !self.eval(lhs)?.truthiness() {
                    return Ok(ConstValue::Bool(false));
                }
                return Ok(ConstValue::Bool(self.eval(rhs)?.truthiness()));
            }
            BinaryOp::LogicalOr => {
                if self.eval(lhs)?.truthiness() {
                    return Ok(ConstValue::Bool(true));
                }
                return Ok(ConstValue::Bool(self.eval(rhs)?.truthiness()));
            }
            _ => {}
        }

        let left = self.eval(lhs)?;
        let right = self.eval(rhs)?;

        // Null-pointer comparisons.
        if let (ConstValue::Pointer { is_null: l }, ConstValue::Pointer { is_null: r }) =
            (&left, &right)
        {
            return match op {
                BinaryOp::Eq => Ok(ConstValue::Bool(l == r)),
                BinaryOp::Ne => Ok(ConstValue::Bool(l != r)),
                _ => Err(EvalError::NotConstant),
            };
        }

        match op {
            BinaryOp::Add => self.eval_arith(&left, &right, |s, p| s.arith_add(p)),
            BinaryOp::Sub => self.eval_arith(&left, &right, |s, p| s.arith_sub(p)),
            BinaryOp::Mul => self.eval_arith(&left, &right, |s, p| s.arith_mul(p)),
            BinaryOp::Div => self.eval_div(&left, &right),
            BinaryOp::Rem => self.eval_rem(&left, &right),
            BinaryOp::BitAnd => self.eval_bitwise(&left, &right, |l, r| l & r),
            BinaryOp::BitOr => self.eval_bitwise(&left, &right, |l, r| l | r),
            BinaryOp::BitXor => self.eval_bitwise(&left, &right, |l, r| l ^ r),
            BinaryOp::Shl => self.eval_shift(&left, &right, true),
            BinaryOp::Shr => self.eval_shift(&left, &right, false),
            BinaryOp::Eq => self.eval_compare(&left, &right, |o| o == std::cmp::Ordering::Equal),
            BinaryOp::Ne => self.eval_compare(&left, &right, |o| o != std::cmp::Ordering::Equal),
            BinaryOp::Lt => self.eval_compare(&left, &right, |o| o == std::cmp::Ordering::Less),
            BinaryOp::Le => self.eval_compare(&left, &right, |o| o != std::cmp::Ordering::Greater),
            BinaryOp::Gt => self.eval_compare(&left, &right, |o| o == std::cmp::Ordering::Greater),
            BinaryOp::Ge => self.eval_compare(&left, &right, |o| o != std::cmp::Ordering::Less),
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr => unreachable!("handled above"),
        }
    }

    /// Bring two operands to their common arithmetic type, C++-style:
    /// float wins, then unsigned, then signed 64-bit.
    fn numeric_pair(left: &ConstValue, right: &ConstValue) -> Result<NumPair, EvalError> {
        let pair = match (left, right) {
            (ConstValue::Float(_), _) | (_, ConstValue::Float(_)) => NumPair::Float(
                left.as_float().ok_or(EvalError::NotConstant)?,
                right.as_float().ok_or(EvalError::NotConstant)?,
            ),
            (ConstValue::UInt(_), _) | (_, ConstValue::UInt(_)) => NumPair::UInt(
                left.as_uint_bits().ok_or(EvalError::NotConstant)?,
                right.as_uint_bits().ok_or(EvalError::NotConstant)?,
            ),
            _ => NumPair::Int(
                left.as_ext_value().ok_or(EvalError::NotConstant)?,
                right.as_ext_value().ok_or(EvalError::NotConstant)?,
            ),
        };
        Ok(pair)
    }

    fn eval_arith(
        &mut self,
        left: &ConstValue,
        right: &ConstValue,
        op: impl Fn(&mut Self, NumPair) -> ConstValue,
    ) -> Result<ConstValue, EvalError> {
        let pair = Self::numeric_pair(left, right)?;
        Ok(op(self, pair))
    }

    fn arith_add(&mut self, pair: NumPair) -> ConstValue {
        match pair {
            NumPair::Float(l, r) => ConstValue::Float(l + r),
            // Unsigned arithmetic wraps by definition.
            NumPair::UInt(l, r) => ConstValue::UInt(l.wrapping_add(r)),
            NumPair::Int(l, r) => self.checked_signed(l.checked_add(r), || l.wrapping_add(r)),
        }
    }

    fn arith_sub(&mut self, pair: NumPair) -> ConstValue {
        match pair {
            NumPair::Float(l, r) => ConstValue::Float(l - r),
            NumPair::UInt(l, r) => ConstValue::UInt(l.wrapping_sub(r)),
            NumPair::Int(l, r) => self.checked_signed(l.checked_sub(r), || l.wrapping_sub(r)),
        }
    }

    fn arith_mul(&mut self, pair: NumPair) -> ConstValue {
        match pair {
            NumPair::Float(l, r) => ConstValue::Float(l * r),
            NumPair::UInt(l, r) => ConstValue::UInt(l.wrapping_mul(r)),
            NumPair::Int(l, r) => self.checked_signed(l.checked_mul(r), || l.wrapping_mul(r)),
        }
    }

    /// Signed overflow is undefined behavior: keep the wrapped value and
    /// record the taint.
    fn checked_signed(&mut self, checked: Option<i64>, wrapped: impl Fn() -> i64) -> ConstValue {
        match checked {
            Some(v) => ConstValue::Int(v),
            None => {
                self.undefined_behavior = true;
                ConstValue::Int(wrapped())
            }
        }
    }

    fn eval_div(&mut self, left: &ConstValue, right: &ConstValue) -> Result<ConstValue, EvalError> {
        match Self::numeric_pair(left, right)? {
            NumPair::Float(l, r) => Ok(ConstValue::Float(l / r)),
            NumPair::UInt(l, r) => {
                if r == 0 {
                    return Err(EvalError::NotConstant);
                }
                Ok(ConstValue::UInt(l / r))
            }
            NumPair::Int(l, r) => {
                if r == 0 {
                    return Err(EvalError::NotConstant);
                }
                Ok(self.checked_signed(l.checked_div(r), || l.wrapping_div(r)))
            }
        }
    }

    fn eval_rem(&mut self, left: &ConstValue, right: &ConstValue) -> Result<ConstValue, EvalError> {
        match Self::numeric_pair(left, right)? {
            // `%` is not defined for floating operands.
            NumPair::Float(..) => Err(EvalError::NotConstant),
            NumPair::UInt(l, r) => {
                if r == 0 {
                    return Err(EvalError::NotConstant);
                }
                Ok(ConstValue::UInt(l % r))
            }
            NumPair::Int(l, r) => {
                if r == 0 {
                    return Err(EvalError::NotConstant);
                }
                Ok(self.checked_signed(l.checked_rem(r), || l.wrapping_rem(r)))
            }
        }
    }

    fn eval_bitwise(
        &mut self,
        left: &ConstValue,
        right: &ConstValue,
        op: impl Fn(u64, u64) -> u64,
    ) -> Result<ConstValue, EvalError> {
        match Self::numeric_pair(left, right)? {
            NumPair::Float(..) => Err(EvalError::NotConstant),
            NumPair::UInt(l, r) => Ok(ConstValue::UInt(op(l, r))),
            NumPair::Int(l, r) => Ok(ConstValue::Int(op(l as u64, r as u64) as i64)),
        }
    }

    fn eval_shift(
        &mut self,
        left: &ConstValue,
        right: &ConstValue,
        is_left_shift: bool,
    ) -> Result<ConstValue, EvalError> {
        let amount = right.as_ext_value().ok_or(EvalError::NotConstant)?;
        // An out-of-range shift count is undefined behavior; the count is
        // masked like hardware would.
        if !(0..64).contains(&amount) {
            self.undefined_behavior = true;
        }
        let amount = (amount as u32) & 63;

        match left {
            ConstValue::Int(v) => Ok(ConstValue::Int(if is_left_shift {
                v.wrapping_shl(amount)
            } else {
                v.wrapping_shr(amount)
            })),
            ConstValue::UInt(v) => Ok(ConstValue::UInt(if is_left_shift {
                v.wrapping_shl(amount)
            } else {
                v.wrapping_shr(amount)
            })),
            ConstValue::Bool(v) => Ok(ConstValue::Int(if is_left_shift {
                i64::from(*v).wrapping_shl(amount)
            } else {
                i64::from(*v).wrapping_shr(amount)
            })),
            _ => Err(EvalError::NotConstant),
        }
    }

    fn eval_compare(
        &mut self,
        left: &ConstValue,
        right: &ConstValue,
        accept: impl Fn(std::cmp::Ordering) -> bool,
    ) -> Result<ConstValue, EvalError> {
        let ordering = match Self::numeric_pair(left, right)? {
            NumPair::Float(l, r) => l.partial_cmp(&r).ok_or(EvalError::NotConstant)?,
            NumPair::UInt(l, r) => l.cmp(&r),
            NumPair::Int(l, r) => l.cmp(&r),
        };
        Ok(ConstValue::Bool(accept(ordering)))
    }
}
