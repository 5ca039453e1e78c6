//! Global constraints from the MiniZinc library.
//!
//! Each global records its kind and arguments; the renderer adds the matching
//! include. Sequence arguments must be non-empty collections.

use std::sync::Arc;

use crate::error::{Result, ZincError};
use crate::expr::{Expr, GlobalConstraint, GlobalKind, SetKind};

fn sequence_arg(arg: Expr) -> Result<Expr> {
    match &arg {
        Expr::Seq(items) if items.is_empty() => Err(ZincError::EmptyCollection("sequence")),
        other if !other.is_collection() => Err(ZincError::UnsupportedType {
            found: other.describe(),
            context: "global constraint",
        }),
        _ => Ok(arg),
    }
}

fn global(kind: GlobalKind, args: Vec<Expr>) -> Result<Expr> {
    let constraint = Expr::Global(GlobalConstraint {
        kind,
        args: args.into_iter().map(Arc::new).collect(),
    });
    constraint.elem_type()?;
    Ok(constraint)
}

/// Every element of the collection takes a different value.
pub fn alldifferent(seq: impl Into<Expr>) -> Result<Expr> {
    AllDifferent::new(seq).build()
}

/// Builder for all-different with exceptions.
///
/// # Examples
///
/// ```
/// use zincrust::prelude::*;
///
/// let a = array_var(0..5, 4).unwrap();
/// let c = AllDifferent::new(&a).except_0().build().unwrap();
/// let d = AllDifferent::new(&a)
///     .except(set_literal([1, 2]).unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AllDifferent {
    seq: Expr,
    except_0: bool,
    except: Option<Expr>,
}

impl AllDifferent {
    pub fn new(seq: impl Into<Expr>) -> Self {
        AllDifferent {
            seq: seq.into(),
            except_0: false,
            except: None,
        }
    }

    /// Zeros may repeat.
    pub fn except_0(mut self) -> Self {
        self.except_0 = true;
        self
    }

    /// Values of the parameter set `values` may repeat.
    pub fn except(mut self, values: impl Into<Expr>) -> Self {
        self.except = Some(values.into());
        self
    }

    pub fn build(self) -> Result<Expr> {
        let seq = sequence_arg(self.seq)?;
        match (self.except_0, self.except) {
            (true, Some(_)) => Err(ZincError::ConflictingOptions("except_0", "except")),
            (true, None) => global(GlobalKind::AllDifferentExcept0, vec![seq]),
            (false, None) => global(GlobalKind::AllDifferent, vec![seq]),
            (false, Some(values)) => {
                match &values {
                    Expr::Set(s) if matches!(s.kind, SetKind::Var(_)) => {
                        return Err(ZincError::VarSetNotAllowed);
                    }
                    Expr::Set(_) | Expr::SetLiteral(_) => {}
                    other => {
                        return Err(ZincError::UnsupportedType {
                            found: other.describe(),
                            context: "alldifferent_except",
                        });
                    }
                }
                global(GlobalKind::AllDifferentExcept, vec![seq, values])
            }
        }
    }
}

/// Every element of the collection takes the same value.
pub fn all_equal(seq: impl Into<Expr>) -> Result<Expr> {
    global(GlobalKind::AllEqual, vec![sequence_arg(seq.into())?])
}

/// Number of distinct values in the collection.
pub fn ndistinct(seq: impl Into<Expr>) -> Result<Expr> {
    global(GlobalKind::NValue, vec![sequence_arg(seq.into())?])
}

/// The successor array forms a single Hamiltonian circuit.
pub fn circuit(seq: impl Into<Expr>) -> Result<Expr> {
    global(GlobalKind::Circuit, vec![sequence_arg(seq.into())?])
}

/// The collection is in non-decreasing order.
pub fn increasing(seq: impl Into<Expr>) -> Result<Expr> {
    global(GlobalKind::Increasing, vec![sequence_arg(seq.into())?])
}

/// The collection is in strictly increasing order.
pub fn strictly_increasing(seq: impl Into<Expr>) -> Result<Expr> {
    global(GlobalKind::StrictlyIncreasing, vec![sequence_arg(seq.into())?])
}

/// The collection is in non-increasing order.
pub fn decreasing(seq: impl Into<Expr>) -> Result<Expr> {
    global(GlobalKind::Decreasing, vec![sequence_arg(seq.into())?])
}

/// The collection is in strictly decreasing order.
pub fn strictly_decreasing(seq: impl Into<Expr>) -> Result<Expr> {
    global(GlobalKind::StrictlyDecreasing, vec![sequence_arg(seq.into())?])
}

/// Tasks with the given start times, durations and resource requirements
/// never use more than `limit` at any one time.
pub fn cumulative(
    start_times: impl Into<Expr>,
    durations: impl Into<Expr>,
    requirements: impl Into<Expr>,
    limit: impl Into<Expr>,
) -> Result<Expr> {
    let limit = limit.into();
    if limit.is_collection() {
        return Err(ZincError::UnsupportedType {
            found: limit.describe(),
            context: "cumulative limit",
        });
    }
    global(
        GlobalKind::Cumulative,
        vec![
            sequence_arg(start_times.into())?,
            sequence_arg(durations.into())?,
            sequence_arg(requirements.into())?,
            limit,
        ],
    )
}

/// Tasks with the given start times and durations don't overlap. Tasks of
/// zero duration may run at any time.
pub fn disjunctive(start_times: impl Into<Expr>, durations: impl Into<Expr>) -> Result<Expr> {
    global(
        GlobalKind::Disjunctive,
        vec![sequence_arg(start_times.into())?, sequence_arg(durations.into())?],
    )
}

/// Like [`disjunctive`], but zero-duration tasks can't run inside others.
pub fn disjunctive_strict(
    start_times: impl Into<Expr>,
    durations: impl Into<Expr>,
) -> Result<Expr> {
    global(
        GlobalKind::DisjunctiveStrict,
        vec![sequence_arg(start_times.into())?, sequence_arg(durations.into())?],
    )
}

/// The tuple `x` is one of the rows of the two-dimensional array `t`.
pub fn table(x: impl Into<Expr>, t: impl Into<Expr>) -> Result<Expr> {
    let t = sequence_arg(t.into())?;
    if let Expr::Array(a) = &t {
        if a.shape.ndim() != 2 {
            return Err(ZincError::UnsupportedType {
                found: t.describe(),
                context: "table, which expects a 2-d array",
            });
        }
    }
    global(GlobalKind::Table, vec![sequence_arg(x.into())?, t])
}
