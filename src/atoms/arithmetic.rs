//! Arithmetic atoms and operator overloading.
//!
//! Operators are thin sugar over the builder functions below:
//! - `+`, `-`, `*` build addition, subtraction and multiplication
//! - `/` builds truncating integer division (MiniZinc `div`)
//! - `%` builds `mod`
//! - unary `-` builds negation
//!
//! Division by a literal zero is caught eagerly by `floor_div` and `modulo`,
//! and at render time for trees built with operators.

use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::sync::Arc;

use crate::error::{Result, ZincError};
use crate::expr::{BinaryOp, Expr, UnaryOp};

// ============================================================================
// Operator overloading for Expr
// ============================================================================

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait<Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        // A single integer impl keeps unsuffixed literals inferable.
        binary_operator!(@scalar $trait, $method, $op, i64);
        binary_operator!(@scalar $trait, $method, $op, f64);
    };
    (@scalar $trait:ident, $method:ident, $op:expr, $t:ty) => {
        impl $trait<$t> for Expr {
            type Output = Expr;

            fn $method(self, rhs: $t) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<$t> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: $t) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<Expr> for $t {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<&Expr> for $t {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }
    };
}

binary_operator!(Add, add, BinaryOp::Add);
binary_operator!(Sub, sub, BinaryOp::Sub);
binary_operator!(Mul, mul, BinaryOp::Mul);
binary_operator!(Div, div, BinaryOp::FloorDiv);
binary_operator!(Rem, rem, BinaryOp::Mod);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(UnaryOp::Neg, self)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(UnaryOp::Neg, self)
    }
}

// ============================================================================
// Arithmetic atom functions
// ============================================================================

/// Addition: a + b.
pub fn add(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Add, a, b)
}

/// Subtraction: a - b.
pub fn sub(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Sub, a, b)
}

/// Multiplication: a * b.
pub fn mul(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Mul, a, b)
}

/// Float division: a / b.
pub fn true_div(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::TrueDiv, a, b)
}

/// Truncating integer division: a div b.
pub fn floor_div(a: impl Into<Expr>, b: impl Into<Expr>) -> Result<Expr> {
    let b = b.into();
    if b.is_zero() {
        return Err(ZincError::DivisionByZero);
    }
    Ok(Expr::binary(BinaryOp::FloorDiv, a, b))
}

/// Remainder: a mod b.
pub fn modulo(a: impl Into<Expr>, b: impl Into<Expr>) -> Result<Expr> {
    let b = b.into();
    if b.is_zero() {
        return Err(ZincError::DivisionByZero);
    }
    Ok(Expr::binary(BinaryOp::Mod, a, b))
}

/// Power: pow(base, exponent). A modulus is not supported.
pub fn pow(base: impl Into<Expr>, exponent: impl Into<Expr>, modulus: Option<Expr>) -> Result<Expr> {
    if modulus.is_some() {
        return Err(ZincError::ModuloUnsupported);
    }
    Ok(Expr::Pow(Arc::new(base.into()), Arc::new(exponent.into())))
}

/// Absolute value.
pub fn abs(a: impl Into<Expr>) -> Expr {
    Expr::unary(UnaryOp::Abs, a)
}

/// Negation: -a.
pub fn neg(a: impl Into<Expr>) -> Expr {
    Expr::unary(UnaryOp::Neg, a)
}

impl Expr {
    /// Power: pow(self, exponent).
    pub fn pow(&self, exponent: impl Into<Expr>) -> Expr {
        Expr::Pow(Arc::new(self.clone()), Arc::new(exponent.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::ConstraintExt;
    use crate::expr::{par, var, Domain};

    #[test]
    fn test_operators_build_nodes() {
        let x = var(Domain::Int);
        assert!(matches!(&x + 1, Expr::Binary(BinaryOp::Add, _, _)));
        assert!(matches!(1 - &x, Expr::Binary(BinaryOp::Sub, _, _)));
        assert!(matches!(&x * &x, Expr::Binary(BinaryOp::Mul, _, _)));
        assert!(matches!(&x / 2, Expr::Binary(BinaryOp::FloorDiv, _, _)));
        assert!(matches!(&x % 2, Expr::Binary(BinaryOp::Mod, _, _)));
        assert!(matches!(-&x, Expr::Unary(UnaryOp::Neg, _)));
        assert!(matches!(2.5 * x, Expr::Binary(BinaryOp::Mul, _, _)));
    }

    #[test]
    fn test_unsuffixed_literals_chain() {
        let x = var(0..10);
        let c = (&x + 1).equals(2);
        assert!(matches!(c, Expr::Binary(BinaryOp::Eq, _, _)));
        let d = (3 * &x - 1).lt(&x / 2);
        assert!(matches!(d, Expr::Binary(BinaryOp::Lt, _, _)));
    }

    #[test]
    fn test_division_by_zero() {
        let x = var(Domain::Int);
        assert!(matches!(floor_div(&x, 0), Err(ZincError::DivisionByZero)));
        assert!(matches!(modulo(&x, par(0)), Err(ZincError::DivisionByZero)));
        assert!(floor_div(&x, 3).is_ok());
        let err = modulo(&x, 0).unwrap_err();
        assert_eq!(err.to_string(), "right part of expression can't be 0");
    }

    #[test]
    fn test_pow_modulus() {
        let x = var(Domain::Int);
        assert!(pow(&x, 2, None).is_ok());
        let err = pow(&x, 2, Some(Expr::from(5))).unwrap_err();
        assert_eq!(err.to_string(), "modulo is not supported");
    }
}
