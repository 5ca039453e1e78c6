//! Expression types and creation utilities.
//!
//! This module provides the core expression types for building models:
//! - `Expr` - The main expression enum representing all values
//! - `Domain`, `Range`, `EnumType` - Domains of decision variables
//! - `Shape` - Shape information for arrays
//! - Variables and parameters via `var()`, `var_of()`, `par()`, `par_of()`
//! - Arrays via `array_var()` and `array_par()`, views via `Expr::at()`
//! - Sets via `set_var()`, `set_par()` and `set_literal()`

pub mod array;
pub mod domain;
pub mod expression;
pub mod set;
pub mod shape;
pub mod variable;
pub mod view;

// Re-export main types
pub use array::{array_par, array_var, infer_shape, Nested};
pub use domain::{range, Domain, EnumType, EnumValue, Range};
pub use expression::{
    seq, ArrayData, ArrayKind, BinaryOp, Expr, ExprId, GlobalConstraint, GlobalKind, Generator,
    IterVar, Literal, ParamValue, ParameterData, Pos, ReduceOp, ReduceSource, Reduction, SetData,
    SetKind, SetValues, UnaryOp, VariableData, ViewData,
};
pub use set::{set_literal, set_par, set_par_range, set_var};
pub use shape::Shape;
pub use variable::{par, par_of, var, var_of};
pub use view::{IntoPositions, Position};
