//! Element types and type inference.
//!
//! Every expression has an element type: the type of its value for scalars,
//! the type of its members for collections. Constraints are `Bool`-typed.

mod inference;

use std::fmt;

use crate::error::{Result, ZincError};
use crate::expr::EnumType;

/// Element type of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElemType {
    Int,
    Float,
    /// Constraint-typed.
    Bool,
    Enum(EnumType),
}

impl ElemType {
    /// Check if this is a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ElemType::Int | ElemType::Float)
    }
}

impl fmt::Display for ElemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElemType::Int => f.write_str("int"),
            ElemType::Float => f.write_str("float"),
            ElemType::Bool => f.write_str("bool"),
            ElemType::Enum(e) => f.write_str(e.name()),
        }
    }
}

/// Result type of binary arithmetic.
///
/// Float if either operand is float, otherwise int. Booleans have no
/// arithmetic meaning and enumeration values need an explicit conversion, so
/// both are rejected.
pub fn widen(left: &ElemType, right: &ElemType) -> Result<ElemType> {
    match (left, right) {
        (ElemType::Bool, _) | (_, ElemType::Bool) => Err(ZincError::AmbiguousType {
            left: left.to_string(),
            right: right.to_string(),
        }),
        (ElemType::Enum(e), _) | (_, ElemType::Enum(e)) => Err(ZincError::UnsupportedType {
            found: e.name().to_string(),
            context: "arithmetic",
        }),
        (ElemType::Float, _) | (_, ElemType::Float) => Ok(ElemType::Float),
        _ => Ok(ElemType::Int),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen() {
        assert_eq!(widen(&ElemType::Int, &ElemType::Int).unwrap(), ElemType::Int);
        assert_eq!(widen(&ElemType::Int, &ElemType::Float).unwrap(), ElemType::Float);
        assert_eq!(widen(&ElemType::Float, &ElemType::Int).unwrap(), ElemType::Float);
    }

    #[test]
    fn test_widen_enum_is_rejected() {
        let color = EnumType::new("Color", ["Red"]).unwrap();
        let err = widen(&ElemType::Enum(color), &ElemType::Int).unwrap_err();
        assert_eq!(err.to_string(), "type Color is not supported for arithmetic");
    }

    #[test]
    fn test_widen_bool_is_ambiguous() {
        let err = widen(&ElemType::Bool, &ElemType::Int).unwrap_err();
        assert_eq!(
            err.to_string(),
            "can't combine bool and int in an arithmetic expression"
        );
    }
}
