//! # zincrust
//!
//! Build constraint models in Rust and compile them to MiniZinc.
//!
//! zincrust provides typed expressions for decision variables, parameters,
//! arrays and sets, checks element types as models are built, and generates
//! MiniZinc source together with the JSON data for its parameters.
//!
//! ## Quick Start
//!
//! ```
//! use zincrust::prelude::*;
//!
//! let n: i64 = 4;
//! let queens = array_var(0..n, n as usize).unwrap();
//! let model = Model::satisfy()
//!     .declare("q", &queens)
//!     .subject_to([
//!         alldifferent(&queens).unwrap(),
//!         forall_with((over(0..n), over(0..n)), |(i, j)| -> Result<Expr> {
//!             let qi = queens.at(&i)?;
//!             let qj = queens.at(&j)?;
//!             Ok(i.lt(&j).implies((&qi + &i).not_equals(&qj + &j)))
//!         })
//!         .unwrap(),
//!     ])
//!     .build();
//!
//! let source = model.compile().unwrap();
//! assert!(source.starts_with("include \"alldifferent.mzn\";"));
//! ```
//!
//! Solving needs the `minizinc` executable:
//!
//! ```no_run
//! # use zincrust::prelude::*;
//! # let model = Model::satisfy().build();
//! let solution = model.solve(&MiniZinc, &Settings::from_env())?;
//! if let Some(best) = solution.best() {
//!     println!("{best:?}");
//! }
//! # Ok::<(), ZincError>(())
//! ```
//!
//! ## Building Blocks
//!
//! - Scalars: `var`, `par`, and `var_of`/`par_of` for derived values
//! - Collections: `array_var`, `array_par`, `set_var`, `set_par`,
//!   `set_literal`, `seq`, ranges and enumerations
//! - Views: `Expr::at` indexes and slices arrays, `Expr::size` queries an extent
//! - Operators: `+`, `-`, `*`, `/` (integer division), `%`, `&`, `|`, `^`, `!`
//! - Comparisons and membership: the `ConstraintExt` trait
//! - Reductions: `sum`, `product`, `count`, `forall`, `exists`, `min`, `max`,
//!   each with a generator form such as `sum_with(over(0..n), |i| ...)`
//! - Global constraints: `alldifferent`, `circuit`, `cumulative`, `table`, ...
//!
//! ## Architecture
//!
//! - **Expression trees** built using the `Expr` enum with `Arc` sharing
//! - **Type inference** on construction, so invalid models fail early
//! - **IR** naming the model's entities and registering enumerations
//! - **Code generation** collecting flags that decide which globals to include
//! - **Backends** running the generated source; `MiniZinc` drives the executable

pub mod atoms;
pub mod compile;
pub mod error;
pub mod expr;
pub mod model;
pub mod solver;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```
/// use zincrust::prelude::*;
/// ```
pub mod prelude {
    // Expression types
    pub use crate::expr::{
        array_par, array_var, par, par_of, range, seq, set_literal, set_par, set_par_range,
        set_var, var, var_of, Domain, EnumType, EnumValue, Expr, ExprId, Position, Range, Shape,
    };

    // Types
    pub use crate::types::ElemType;

    // Atoms
    pub use crate::atoms::{
        abs, add, all_equal, alldifferent, and, circuit, contains, count, count_with, cumulative,
        decreasing, disjunctive, disjunctive_strict, exists, exists_with, floor_div, forall,
        forall_with, implies, increasing, max, max_with, min, min_with, modulo, mul, ndistinct,
        neg, not, or, over, pow, product, product_with, strictly_decreasing, strictly_increasing,
        sub, sum, sum_with, table, true_div, xor, AllDifferent, ConstraintExt,
    };

    // Model
    pub use crate::model::{Model, ModelBuilder, Objective};

    // Solver
    pub use crate::solver::{Assignment, Backend, MiniZinc, RawSolution, Settings, SolveStatus};

    // Errors
    pub use crate::error::{Result, ZincError};
}

// Re-export main types at crate root
pub use error::{Result, ZincError};
pub use model::Model;
pub use solver::{RawSolution, SolveStatus};
