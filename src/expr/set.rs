//! Set creation.
//!
//! Sets hold integers or enumeration values. Parameter sets are concrete and
//! non-empty; variable sets range over a domain.

use super::domain::{Domain, Range};
use super::expression::{Expr, ExprId, Literal, SetData, SetKind, SetValues};
use crate::error::{Result, ZincError};
use crate::types::ElemType;

fn check_values(values: &[Literal]) -> Result<()> {
    let first = values.first().ok_or(ZincError::EmptyCollection("set"))?;
    let ty = first.elem_type();
    if !matches!(ty, ElemType::Int | ElemType::Enum(_)) {
        return Err(ZincError::UnsupportedType {
            found: ty.to_string(),
            context: "set",
        });
    }
    if let Some(other) = values.iter().find(|v| v.elem_type() != ty) {
        return Err(ZincError::MixedTypes {
            expected: ty.to_string(),
            found: other.elem_type().to_string(),
        });
    }
    Ok(())
}

/// Create a set variable over an int, integer range or enum domain.
pub fn set_var(domain: impl Into<Domain>) -> Result<Expr> {
    let domain = domain.into();
    let supported = match &domain {
        Domain::Int | Domain::Enum(_) => true,
        Domain::Range(r) => r.elem_type()? == ElemType::Int,
        Domain::Float | Domain::Bool => false,
    };
    if !supported {
        let found = match &domain {
            Domain::Bool => "bool",
            _ => "float",
        };
        return Err(ZincError::UnsupportedType {
            found: found.into(),
            context: "set",
        });
    }
    Ok(Expr::Set(SetData {
        id: ExprId::new(),
        kind: SetKind::Var(domain),
    }))
}

/// Create a parameter set from concrete int or enum values.
pub fn set_par<I, T>(values: I) -> Result<Expr>
where
    I: IntoIterator<Item = T>,
    T: Into<Literal>,
{
    let values: Vec<Literal> = values.into_iter().map(Into::into).collect();
    check_values(&values)?;
    Ok(Expr::Set(SetData {
        id: ExprId::new(),
        kind: SetKind::Par(SetValues::Values(values)),
    }))
}

/// Create a parameter set holding every integer of `range`.
pub fn set_par_range(range: std::ops::Range<i64>) -> Result<Expr> {
    Range::from(range.clone()).check()?;
    Ok(Expr::Set(SetData {
        id: ExprId::new(),
        kind: SetKind::Par(SetValues::Range {
            start: range.start,
            stop: range.end,
        }),
    }))
}

/// Create an unnamed set rendered inline, such as `{1, 2}`.
pub fn set_literal<I, T>(values: I) -> Result<Expr>
where
    I: IntoIterator<Item = T>,
    T: Into<Literal>,
{
    let values: Vec<Literal> = values.into_iter().map(Into::into).collect();
    check_values(&values)?;
    Ok(Expr::SetLiteral(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::EnumType;

    #[test]
    fn test_set_var_domains() {
        assert!(set_var(0..5).is_ok());
        assert!(set_var(Domain::Int).is_ok());
        let color = EnumType::new("Color", ["Red"]).unwrap();
        assert!(set_var(&color).is_ok());
        assert!(matches!(
            set_var(Domain::Float),
            Err(ZincError::UnsupportedType { context: "set", .. })
        ));
        assert!(matches!(
            set_var(1.0..2.0),
            Err(ZincError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_set_par() {
        assert!(set_par([1, 3, 5]).is_ok());
        assert!(matches!(
            set_par(Vec::<i64>::new()),
            Err(ZincError::EmptyCollection("set"))
        ));
        assert!(matches!(
            set_par([1.5, 2.5]),
            Err(ZincError::UnsupportedType { .. })
        ));
        assert!(set_par_range(0..10).is_ok());
        assert!(set_par_range(3..3).is_err());
    }
}
