//! Reductions over collections: sum, product, count, forall, exists, min, max.
//!
//! Each reduction comes in two forms:
//! - a call form over a whole collection, `sum(&a)`
//! - a generator form, `sum_with(over(0..n), |i| ...)`, where the closure
//!   receives iterator variables and returns the body
//!
//! Generators bind fresh iterator variables whose element type is the element
//! type of the iterated domain. Float ranges can't be iterated.

use std::sync::Arc;

use crate::error::{Result, ZincError};
use crate::expr::{Expr, ExprId, Generator, IterVar, ReduceOp, ReduceSource, Reduction};
use crate::types::ElemType;

/// An iteration domain for a generator.
#[derive(Debug, Clone)]
pub struct Over {
    domain: Expr,
}

/// Iterate over a range, array, array view, set, enumeration or sequence.
///
/// # Examples
///
/// ```
/// use zincrust::prelude::*;
///
/// let a = array_var(0..10, 4).unwrap();
/// let total = sum_with(over(0..4), |i| a.at(&i).unwrap() * 2).unwrap();
/// ```
pub fn over(domain: impl Into<Expr>) -> Over {
    Over {
        domain: domain.into(),
    }
}

impl Over {
    fn bind(self) -> Result<(Generator, Expr)> {
        let domain = self.domain;
        let iterable = match &domain {
            Expr::Seq(items) if items.is_empty() => {
                return Err(ZincError::EmptyCollection("sequence"));
            }
            Expr::Range(_) => {
                if domain.elem_type()? == ElemType::Float {
                    return Err(ZincError::FloatIteration);
                }
                true
            }
            other => other.is_collection(),
        };
        if !iterable {
            return Err(ZincError::UnsupportedType {
                found: domain.describe(),
                context: "iteration",
            });
        }
        let var = IterVar {
            id: ExprId::new(),
            ty: domain.elem_type()?,
        };
        let iter = Expr::Iter(var.clone());
        Ok((
            Generator {
                var,
                domain: Arc::new(domain),
            },
            iter,
        ))
    }
}

/// One or more generators, nested left to right.
pub trait IntoGenerators {
    /// Iterator variables handed to the body closure.
    type Vars;

    fn into_generators(self) -> Result<(Vec<Generator>, Self::Vars)>;
}

impl IntoGenerators for Over {
    type Vars = Expr;

    fn into_generators(self) -> Result<(Vec<Generator>, Expr)> {
        let (g, i) = self.bind()?;
        Ok((vec![g], i))
    }
}

impl IntoGenerators for (Over, Over) {
    type Vars = (Expr, Expr);

    fn into_generators(self) -> Result<(Vec<Generator>, (Expr, Expr))> {
        let (g0, i) = self.0.bind()?;
        let (g1, j) = self.1.bind()?;
        Ok((vec![g0, g1], (i, j)))
    }
}

impl IntoGenerators for (Over, Over, Over) {
    type Vars = (Expr, Expr, Expr);

    fn into_generators(self) -> Result<(Vec<Generator>, (Expr, Expr, Expr))> {
        let (g0, i) = self.0.bind()?;
        let (g1, j) = self.1.bind()?;
        let (g2, k) = self.2.bind()?;
        Ok((vec![g0, g1, g2], (i, j, k)))
    }
}

/// Result of a generator body closure.
pub trait Body {
    fn into_body(self) -> Result<Expr>;
}

impl Body for Expr {
    fn into_body(self) -> Result<Expr> {
        Ok(self)
    }
}

impl Body for Result<Expr> {
    fn into_body(self) -> Result<Expr> {
        self
    }
}

fn call(op: ReduceOp, args: Vec<Expr>) -> Result<Expr> {
    if let Some(first) = args.first() {
        if !first.is_collection() {
            return Err(ZincError::UnsupportedType {
                found: first.describe(),
                context: op.name(),
            });
        }
    }
    let reduction = Expr::Reduce(Reduction {
        op,
        source: ReduceSource::Call(args.into_iter().map(Arc::new).collect()),
    });
    reduction.elem_type()?;
    Ok(reduction)
}

fn generate<G, B>(op: ReduceOp, generators: G, body: impl FnOnce(G::Vars) -> B) -> Result<Expr>
where
    G: IntoGenerators,
    B: Body,
{
    let (generators, vars) = generators.into_generators()?;
    let body = body(vars).into_body()?;
    let reduction = Expr::Reduce(Reduction {
        op,
        source: ReduceSource::Generator {
            generators,
            body: Arc::new(body),
        },
    });
    reduction.elem_type()?;
    Ok(reduction)
}

/// Sum of the elements of a collection.
pub fn sum(seq: impl Into<Expr>) -> Result<Expr> {
    call(ReduceOp::Sum, vec![seq.into()])
}

/// Sum of `body` over the generators.
pub fn sum_with<G: IntoGenerators, B: Body>(
    generators: G,
    body: impl FnOnce(G::Vars) -> B,
) -> Result<Expr> {
    generate(ReduceOp::Sum, generators, body)
}

/// Product of the elements of a collection.
pub fn product(seq: impl Into<Expr>) -> Result<Expr> {
    call(ReduceOp::Product, vec![seq.into()])
}

/// Product of `body` over the generators.
pub fn product_with<G: IntoGenerators, B: Body>(
    generators: G,
    body: impl FnOnce(G::Vars) -> B,
) -> Result<Expr> {
    generate(ReduceOp::Product, generators, body)
}

/// Number of occurrences of `value` in a collection.
pub fn count(seq: impl Into<Expr>, value: impl Into<Expr>) -> Result<Expr> {
    call(ReduceOp::Count, vec![seq.into(), value.into()])
}

/// Number of generator bindings for which the constraint `body` holds.
pub fn count_with<G: IntoGenerators, B: Body>(
    generators: G,
    body: impl FnOnce(G::Vars) -> B,
) -> Result<Expr> {
    generate(ReduceOp::Count, generators, body)
}

/// Conjunction of a collection of constraints.
pub fn forall(seq: impl Into<Expr>) -> Result<Expr> {
    call(ReduceOp::Forall, vec![seq.into()])
}

/// Conjunction of `body` over the generators.
pub fn forall_with<G: IntoGenerators, B: Body>(
    generators: G,
    body: impl FnOnce(G::Vars) -> B,
) -> Result<Expr> {
    generate(ReduceOp::Forall, generators, body)
}

/// Disjunction of a collection of constraints.
pub fn exists(seq: impl Into<Expr>) -> Result<Expr> {
    call(ReduceOp::Exists, vec![seq.into()])
}

/// Disjunction of `body` over the generators.
pub fn exists_with<G: IntoGenerators, B: Body>(
    generators: G,
    body: impl FnOnce(G::Vars) -> B,
) -> Result<Expr> {
    generate(ReduceOp::Exists, generators, body)
}

/// Smallest element of a collection.
pub fn min(seq: impl Into<Expr>) -> Result<Expr> {
    call(ReduceOp::Min, vec![seq.into()])
}

/// Smallest value of `body` over the generators.
pub fn min_with<G: IntoGenerators, B: Body>(
    generators: G,
    body: impl FnOnce(G::Vars) -> B,
) -> Result<Expr> {
    generate(ReduceOp::Min, generators, body)
}

/// Largest element of a collection.
pub fn max(seq: impl Into<Expr>) -> Result<Expr> {
    call(ReduceOp::Max, vec![seq.into()])
}

/// Largest value of `body` over the generators.
pub fn max_with<G: IntoGenerators, B: Body>(
    generators: G,
    body: impl FnOnce(G::Vars) -> B,
) -> Result<Expr> {
    generate(ReduceOp::Max, generators, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::ConstraintExt;
    use crate::expr::{array_par, array_var, seq, var, Domain, EnumType};

    #[test]
    fn test_call_form() {
        let a = array_var(0..5, (2, 3)).unwrap();
        let s = sum(&a).unwrap();
        assert!(matches!(
            &s,
            Expr::Reduce(Reduction {
                op: ReduceOp::Sum,
                source: ReduceSource::Call(_)
            })
        ));
        assert_eq!(count(&a, 1).unwrap().elem_type().unwrap(), ElemType::Int);
    }

    #[test]
    fn test_call_form_needs_collection() {
        let x = var(Domain::Int);
        assert!(matches!(
            sum(&x),
            Err(ZincError::UnsupportedType { context: "sum", .. })
        ));
    }

    #[test]
    fn test_generator_types() {
        let color = EnumType::new("Color", ["Red", "Green"]).unwrap();
        let r = forall_with(over(&color), |c| {
            if let Expr::Iter(it) = &c {
                assert_eq!(it.ty, ElemType::Enum(color.clone()));
            }
            c.not_equals(color.value("Red").unwrap())
        })
        .unwrap();
        assert_eq!(r.elem_type().unwrap(), ElemType::Bool);
    }

    #[test]
    fn test_nested_generators() {
        let a = array_var(0..5, (3, 3)).unwrap();
        let s = sum_with((over(0..3), over(0..3)), |(i, j)| a.at((i, j))).unwrap();
        match s {
            Expr::Reduce(Reduction {
                source: ReduceSource::Generator { generators, .. },
                ..
            }) => assert_eq!(generators.len(), 2),
            _ => panic!("Expected generator reduction"),
        }
    }

    #[test]
    fn test_float_range_iteration() {
        let err = sum_with(over(1.0..3.0), |i| i).unwrap_err();
        assert_eq!(err.to_string(), "float ranges are not supported as argument");
    }

    #[test]
    fn test_empty_sequence() {
        assert!(matches!(
            sum_with(over(seq(Vec::<Expr>::new())), |i| i),
            Err(ZincError::EmptyCollection("sequence"))
        ));
    }

    #[test]
    fn test_forall_requires_constraints() {
        let a = array_par(vec![1, 2, 3]).unwrap();
        assert!(matches!(
            forall_with(over(&a), |x| x),
            Err(ZincError::NotAConstraint { op: "forall", .. })
        ));
        assert!(matches!(
            count_with(over(&a), |x| x),
            Err(ZincError::NotAConstraint { op: "count", .. })
        ));
    }

    #[test]
    fn test_min_over_bools() {
        let b = array_var(Domain::Bool, 3).unwrap();
        assert!(matches!(min(&b), Err(ZincError::AmbiguousType { .. })));
    }
}
