//! Error types for zincrust.

use thiserror::Error;

/// Error type for zincrust operations.
///
/// Domain errors are raised while a tree is built or rendered; configuration
/// errors are raised while a model is compiled. Either kind aborts the whole
/// compilation.
#[derive(Debug, Error)]
pub enum ZincError {
    /// A range or slice was given a step other than 1.
    #[error("step other than 1 isn't supported, but it is {0}")]
    UnsupportedStep(String),

    /// A range or slice with concrete bounds is empty.
    #[error("start({start}) should be smaller than stop({stop})")]
    InvalidRange { start: String, stop: String },

    /// A negative literal was used as an index or slice bound.
    #[error("Negative indexes are not supported for now, but {0} was specified")]
    NegativeIndex(i64),

    /// A literal index is outside of a statically known dimension.
    #[error("index {index} is out of bounds for dimension {dim} with size {extent}")]
    IndexOutOfBounds { index: i64, dim: usize, extent: usize },

    /// More positions than dimensions were given.
    #[error("the array has {ndim} dimensions, but {given} indexes were specified")]
    TooManyIndices { ndim: usize, given: usize },

    /// Something other than a declared array was indexed, sliced or iterated.
    #[error("{0} can't be used as an array here")]
    NotAnArray(String),

    /// Array elements of different types.
    #[error("All elements of the array should be the same type, but {expected} and {found} were found")]
    MixedTypes { expected: String, found: String },

    /// Sub-arrays of different length at the same nesting level.
    #[error(
        "Subarrays of different length are not supported, length of all subarrays at level {level} should be {expected}, but one has {found}"
    )]
    RaggedArray {
        level: usize,
        expected: usize,
        found: usize,
    },

    /// Empty array, set or sequence.
    #[error("empty {0} is not supported")]
    EmptyCollection(&'static str),

    /// Shape with no dimensions or a zero extent.
    #[error("invalid shape {0}, every dimension should have a positive extent")]
    InvalidShape(String),

    /// Floor division or modulo by a literal or bound zero.
    #[error("right part of expression can't be 0")]
    DivisionByZero,

    /// Power with a modulus argument.
    #[error("modulo is not supported")]
    ModuloUnsupported,

    /// Element type not supported in this position.
    #[error("type {found} is not supported for {context}")]
    UnsupportedType { found: String, context: &'static str },

    /// Variable set where only parameter sets are accepted.
    #[error("MiniZinc doesn't support set of var as `except` argument")]
    VarSetNotAllowed,

    /// Mutually exclusive options supplied together.
    #[error("Arguments `{0}` and `{1}` can't be set at the same time")]
    ConflictingOptions(&'static str, &'static str),

    /// Arithmetic over operand types with no defined widening.
    #[error("can't combine {left} and {right} in an arithmetic expression")]
    AmbiguousType { left: String, right: String },

    /// Logical operator applied to a non-constraint node.
    #[error("`{op}` expects constraint operands, but got {found}")]
    NotAConstraint { op: &'static str, found: String },

    /// Iteration over a float range.
    #[error("float ranges are not supported as argument")]
    FloatIteration,

    /// Variable or parameter bound to something other than an operation.
    #[error("Can not bind a value to {0}, only derived operations can be bound")]
    InvalidBinding(String),

    /// Derived parameter whose value depends on decision variables.
    #[error("a derived parameter can't depend on decision variables, but {0} does")]
    VariableInParameter(String),

    /// Float literal without a MiniZinc spelling.
    #[error("float value {0} is not supported, only finite floats can be used")]
    NonFiniteFloat(f64),

    /// Two attributes with the same name.
    #[error("attribute `{0}` was declared twice")]
    DuplicateName(String),

    /// Attribute name is not a valid MiniZinc identifier.
    #[error("`{0}` can't be used as a name: {1}")]
    InvalidName(String, &'static str),

    /// A node was rendered before the IR assigned it a name.
    #[error("{0} was referenced before a name was assigned")]
    Unnamed(String),

    /// Objective can't be optimized.
    #[error("invalid objective: {0}")]
    InvalidObjective(String),

    /// External solver failure.
    #[error("Solver error: {0}")]
    SolverError(String),

    /// I/O failure while talking to the solver.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed data or solver output.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for zincrust operations.
pub type Result<T> = std::result::Result<T, ZincError>;
