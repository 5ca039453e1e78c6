//! Model definition, compilation and solving API.
//!
//! A `Model` holds:
//! - named attributes (variables, parameters, arrays, sets, derived values)
//! - a list of constraints
//! - an objective (satisfy, minimize or maximize)
//!
//! Use the builder pattern to construct models:
//! ```ignore
//! let model = Model::minimize(cost)
//!     .declare("x", x)
//!     .subject_to([constraint1, constraint2])
//!     .build();
//! let source = model.compile()?;
//! ```

use std::sync::OnceLock;

use tracing::debug;

use crate::compile::{render, Flags, Ir};
use crate::error::Result;
use crate::expr::Expr;
use crate::solver::{Backend, RawSolution, Settings};

/// What the solver should do with the model.
#[derive(Debug, Clone)]
pub enum Objective {
    /// Find any assignment satisfying the constraints.
    Satisfy,
    /// Minimize the expression.
    Minimize(Expr),
    /// Maximize the expression.
    Maximize(Expr),
}

impl Objective {
    /// Get the expression being optimized, if any.
    pub fn expr(&self) -> Option<&Expr> {
        match self {
            Objective::Satisfy => None,
            Objective::Minimize(e) | Objective::Maximize(e) => Some(e),
        }
    }
}

#[derive(Debug, Clone)]
struct Compiled {
    ir: Ir,
    source: String,
    flags: Flags,
}

/// A constraint model.
#[derive(Debug, Clone)]
pub struct Model {
    attributes: Vec<(String, Expr)>,
    constraints: Vec<Expr>,
    objective: Objective,
    compiled: OnceLock<Compiled>,
}

impl Model {
    /// Create a satisfaction model.
    pub fn satisfy() -> ModelBuilder {
        ModelBuilder::new(Objective::Satisfy)
    }

    /// Create a minimization model.
    pub fn minimize(expr: impl Into<Expr>) -> ModelBuilder {
        ModelBuilder::new(Objective::Minimize(expr.into()))
    }

    /// Create a maximization model.
    pub fn maximize(expr: impl Into<Expr>) -> ModelBuilder {
        ModelBuilder::new(Objective::Maximize(expr.into()))
    }

    /// Named attributes in definition order.
    pub fn attributes(&self) -> &[(String, Expr)] {
        &self.attributes
    }

    pub fn constraints(&self) -> &[Expr] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    fn compiled(&self) -> Result<&Compiled> {
        if let Some(compiled) = self.compiled.get() {
            debug!("reusing compiled model");
            return Ok(compiled);
        }
        let ir = Ir::build(&self.attributes, &self.constraints, &self.objective)?;
        let (source, flags) = render(&ir)?;
        debug!(lines = source.lines().count(), "compiled model");
        Ok(self.compiled.get_or_init(|| Compiled { ir, source, flags }))
    }

    /// Generate the MiniZinc source of the model.
    ///
    /// The result is cached; later calls return the same text.
    pub fn compile(&self) -> Result<&str> {
        Ok(&self.compiled()?.source)
    }

    /// The intermediate representation the source was generated from.
    pub fn ir(&self) -> Result<&Ir> {
        Ok(&self.compiled()?.ir)
    }

    /// Flags raised while generating the source.
    pub fn flags(&self) -> Result<&Flags> {
        Ok(&self.compiled()?.flags)
    }

    /// Compile the model and hand it to `backend` together with the values
    /// of its parameters.
    pub fn solve<B: Backend + ?Sized>(&self, backend: &B, settings: &Settings) -> Result<RawSolution> {
        let compiled = self.compiled()?;
        backend.solve(&compiled.source, &compiled.ir.bindings(), settings)
    }
}

/// Builder for constructing models.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    attributes: Vec<(String, Expr)>,
    constraints: Vec<Expr>,
    objective: Objective,
}

impl ModelBuilder {
    fn new(objective: Objective) -> Self {
        ModelBuilder {
            attributes: Vec::new(),
            constraints: Vec::new(),
            objective,
        }
    }

    /// Add a named attribute. Names are checked when the model is compiled.
    pub fn declare(mut self, name: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add constraints to the model.
    pub fn subject_to(mut self, constraints: impl IntoIterator<Item = Expr>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Add a single constraint.
    pub fn constraint(mut self, c: impl Into<Expr>) -> Self {
        self.constraints.push(c.into());
        self
    }

    /// Build the model.
    pub fn build(self) -> Model {
        Model {
            attributes: self.attributes,
            constraints: self.constraints,
            objective: self.objective,
            compiled: OnceLock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{alldifferent, sum, ConstraintExt};
    use crate::error::ZincError;
    use crate::expr::{array_var, var};

    #[test]
    fn test_model_builder() {
        let x = var(0..10);
        let model = Model::minimize(&x)
            .declare("x", &x)
            .constraint(x.gt(2))
            .build();
        assert_eq!(model.attributes().len(), 1);
        assert_eq!(model.constraints().len(), 1);
        assert!(matches!(model.objective(), Objective::Minimize(_)));
        assert_eq!(
            model.compile().unwrap(),
            "var 0..9: x;\nconstraint (x > 2);\nsolve minimize x;"
        );
    }

    #[test]
    fn test_compile_is_cached() {
        let a = array_var(0..5, 5).unwrap();
        let model = Model::satisfy()
            .declare("a", &a)
            .subject_to([alldifferent(&a).unwrap()])
            .build();
        let first = model.compile().unwrap();
        let second = model.compile().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(model.ir().unwrap().vars().len(), 1);
        assert!(model.flags().unwrap().contains(crate::compile::Flag::AllDifferent));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let model = Model::satisfy().declare("var", var(0..3)).build();
        assert!(matches!(model.compile(), Err(ZincError::InvalidName(..))));
        assert!(matches!(model.compile(), Err(ZincError::InvalidName(..))));
    }

    #[test]
    fn test_maximize_sum() {
        let a = array_var(0..5, 3).unwrap();
        let model = Model::maximize(sum(&a).unwrap()).declare("a", &a).build();
        assert_eq!(
            model.compile().unwrap(),
            "array[0..2] of var 0..4: a;\nsolve maximize sum(a);"
        );
    }
}
