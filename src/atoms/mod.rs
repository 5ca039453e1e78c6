//! Atom functions for building expressions.
//!
//! Atoms are the building blocks of models. They include:
//!
//! - **Arithmetic atoms**: add, sub, mul, divisions, pow, abs, plus operator sugar
//! - **Logical atoms**: comparisons, connectives, membership
//! - **Reductions**: sum, product, count, forall, exists, min, max
//! - **Global constraints**: alldifferent, circuit, cumulative, table, etc.

pub mod arithmetic;
pub mod globals;
pub mod logical;
pub mod reductions;

pub use arithmetic::{abs, add, floor_div, modulo, mul, neg, pow, sub, true_div};
pub use globals::{
    all_equal, alldifferent, circuit, cumulative, decreasing, disjunctive, disjunctive_strict,
    increasing, ndistinct, strictly_decreasing, strictly_increasing, table, AllDifferent,
};
pub use logical::{and, contains, implies, not, or, xor, ConstraintExt};
pub use reductions::{
    count, count_with, exists, exists_with, forall, forall_with, max, max_with, min, min_with,
    over, product, product_with, sum, sum_with, Body, IntoGenerators, Over,
};
