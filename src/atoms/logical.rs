//! Comparisons and logical connectives.
//!
//! Comparisons build constraint-typed nodes. Connectives (`&`, `|`, `^`, `!`,
//! `implies`) combine constraints; operands that are not constraints are
//! reported when the tree is type checked.

use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::expr::{BinaryOp, Expr, UnaryOp};

// ============================================================================
// Operator overloading
// ============================================================================

macro_rules! logical_operator {
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
    };
}

logical_operator!(BitAnd, bitand, BinaryOp::And);
logical_operator!(BitOr, bitor, BinaryOp::Or);
logical_operator!(BitXor, bitxor, BinaryOp::Xor);

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::unary(UnaryOp::Not, self)
    }
}

impl Not for &Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::unary(UnaryOp::Not, self)
    }
}

// ============================================================================
// Logical atom functions
// ============================================================================

/// Conjunction: a /\ b.
pub fn and(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::And, a, b)
}

/// Disjunction: a \/ b.
pub fn or(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Or, a, b)
}

/// Exclusive or: a xor b.
pub fn xor(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Xor, a, b)
}

/// Negation: not a.
pub fn not(a: impl Into<Expr>) -> Expr {
    Expr::unary(UnaryOp::Not, a)
}

/// Implication: a -> b.
pub fn implies(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Implies, a, b)
}

/// Membership: elem in set.
pub fn contains(set: impl Into<Expr>, elem: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::In, elem, set)
}

/// Extension trait for building comparisons and implications from expressions.
pub trait ConstraintExt {
    /// Equality constraint: self == rhs.
    fn equals(&self, rhs: impl Into<Expr>) -> Expr;

    /// Inequality constraint: self != rhs.
    fn not_equals(&self, rhs: impl Into<Expr>) -> Expr;

    /// Constraint: self < rhs.
    fn lt(&self, rhs: impl Into<Expr>) -> Expr;

    /// Constraint: self <= rhs.
    fn le(&self, rhs: impl Into<Expr>) -> Expr;

    /// Constraint: self > rhs.
    fn gt(&self, rhs: impl Into<Expr>) -> Expr;

    /// Constraint: self >= rhs.
    fn ge(&self, rhs: impl Into<Expr>) -> Expr;

    /// Constraint: self -> rhs.
    fn implies(&self, rhs: impl Into<Expr>) -> Expr;

    /// Constraint: self in set.
    fn is_in(&self, set: impl Into<Expr>) -> Expr;
}

impl ConstraintExt for Expr {
    fn equals(&self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Eq, self, rhs)
    }

    fn not_equals(&self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Ne, self, rhs)
    }

    fn lt(&self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Lt, self, rhs)
    }

    fn le(&self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Le, self, rhs)
    }

    fn gt(&self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Gt, self, rhs)
    }

    fn ge(&self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Ge, self, rhs)
    }

    fn implies(&self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Implies, self, rhs)
    }

    fn is_in(&self, set: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::In, self, set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZincError;
    use crate::expr::{set_literal, var, Domain};
    use crate::types::ElemType;

    #[test]
    fn test_comparisons_are_constraints() {
        let x = var(0..10);
        for c in [x.equals(3), x.not_equals(3), x.lt(3), x.le(3), x.gt(3), x.ge(3)] {
            assert_eq!(c.elem_type().unwrap(), ElemType::Bool);
        }
    }

    #[test]
    fn test_connective_operators() {
        let x = var(0..10);
        let c = x.gt(1) & x.lt(5);
        assert!(matches!(c, Expr::Binary(BinaryOp::And, _, _)));
        let d = x.gt(1) | !x.lt(5);
        assert!(matches!(d, Expr::Binary(BinaryOp::Or, _, _)));
        assert_eq!(d.elem_type().unwrap(), ElemType::Bool);
        let e = x.gt(1) ^ x.lt(5);
        assert!(matches!(e, Expr::Binary(BinaryOp::Xor, _, _)));
    }

    #[test]
    fn test_connective_on_number() {
        let x = var(Domain::Int);
        let bad = &x | x.gt(0);
        assert!(matches!(
            bad.elem_type(),
            Err(ZincError::NotAConstraint { op: "\\/", .. })
        ));
        let bad = implies(x.gt(0), &x);
        assert!(matches!(
            bad.elem_type(),
            Err(ZincError::NotAConstraint { op: "->", .. })
        ));
    }

    #[test]
    fn test_membership() {
        let x = var(0..10);
        let s = set_literal([1, 2]).unwrap();
        let c = contains(&s, &x);
        assert!(matches!(c, Expr::Binary(BinaryOp::In, _, _)));
        assert_eq!(x.is_in(s).elem_type().unwrap(), ElemType::Bool);
    }
}
