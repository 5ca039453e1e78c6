//! Variable and parameter creation.

use std::sync::Arc;

use super::domain::Domain;
use super::expression::{Expr, ExprId, Literal, ParamValue, ParameterData, VariableData};
use crate::error::{Result, ZincError};
use crate::types::ElemType;

/// Create a decision variable over a domain.
///
/// # Examples
///
/// ```
/// use zincrust::expr::{var, Domain};
///
/// let x = var(Domain::Int);
/// let a = var(0..100);     // var 0..99
/// let r = var(1.3..10.0);  // var 1.3..10.0
/// ```
pub fn var(domain: impl Into<Domain>) -> Expr {
    Expr::Variable(VariableData {
        id: ExprId::new(),
        domain: domain.into(),
        value: None,
    })
}

/// Create a variable that is an alias of a derived operation.
///
/// The variable is declared in the model and constrained to equal `value`, so
/// the computed quantity is reported as a named output.
pub fn var_of(value: impl Into<Expr>) -> Result<Expr> {
    let value = value.into();
    let domain = bound_domain(&value)?;
    Ok(Expr::Variable(VariableData {
        id: ExprId::new(),
        domain,
        value: Some(Arc::new(value)),
    }))
}

/// Create a parameter holding a concrete value.
pub fn par(value: impl Into<Literal>) -> Expr {
    Expr::Parameter(ParameterData {
        id: ExprId::new(),
        value: ParamValue::Literal(value.into()),
    })
}

/// Create a derived parameter bound to an operation over other parameters.
pub fn par_of(value: impl Into<Expr>) -> Result<Expr> {
    let value = value.into();
    bound_domain(&value)?;
    if !value.is_fixed() {
        return Err(ZincError::VariableInParameter(value.describe()));
    }
    Ok(Expr::Parameter(ParameterData {
        id: ExprId::new(),
        value: ParamValue::Derived(Arc::new(value)),
    }))
}

/// Domain of a variable bound to `value`; binding to anything but an operation
/// is rejected.
pub(crate) fn bound_domain(value: &Expr) -> Result<Domain> {
    if !value.is_operation() {
        return Err(ZincError::InvalidBinding(value.describe()));
    }
    Ok(match value.elem_type()? {
        ElemType::Int => Domain::Int,
        ElemType::Float => Domain::Float,
        ElemType::Bool => Domain::Bool,
        ElemType::Enum(e) => Domain::Enum(e),
    })
}
