//! Core expression types for zincrust.
//!
//! The `Expr` enum represents every value a model can contain: leaves
//! (literals, variables, parameters, arrays, sets), projections (array views,
//! ranges, sequences) and derived operations. Expressions form an immutable DAG
//! using `Arc` for sharing; identity of named leaves is carried by `ExprId`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{Domain, EnumType, EnumValue, Range};
use super::shape::Shape;
use crate::error::{Result, ZincError};
use crate::types::ElemType;

/// Unique identifier for named expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u64);

impl ExprId {
    /// Generate a new unique ID.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        ExprId(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::new()
    }
}

/// A concrete scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Enum(EnumValue),
}

impl Literal {
    /// Element type of the literal.
    pub fn elem_type(&self) -> ElemType {
        match self {
            Literal::Int(_) => ElemType::Int,
            Literal::Float(_) => ElemType::Float,
            Literal::Bool(_) => ElemType::Bool,
            Literal::Enum(v) => ElemType::Enum(v.ty().clone()),
        }
    }

    /// Reject values MiniZinc has no literal for (NaN and infinities).
    pub fn check(&self) -> Result<()> {
        match self {
            Literal::Float(v) if !v.is_finite() => Err(ZincError::NonFiniteFloat(*v)),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            // Debug keeps the decimal point for whole numbers ("1.0").
            Literal::Float(v) => write!(f, "{v:?}"),
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Enum(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(v.into())
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<EnumValue> for Literal {
    fn from(v: EnumValue) -> Self {
        Literal::Enum(v)
    }
}

impl From<&EnumValue> for Literal {
    fn from(v: &EnumValue) -> Self {
        Literal::Enum(v.clone())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Abs,
}

/// Binary operators, rendered infix as `(l <symbol> r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Float division, `/`.
    TrueDiv,
    /// Truncating integer division, `div`.
    FloorDiv,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Xor,
    Implies,
    In,
}

impl BinaryOp {
    /// MiniZinc symbol of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::TrueDiv => "/",
            BinaryOp::FloorDiv => "div",
            BinaryOp::Mod => "mod",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "/\\",
            BinaryOp::Or => "\\/",
            BinaryOp::Xor => "xor",
            BinaryOp::Implies => "->",
            BinaryOp::In => "in",
        }
    }

    /// Check if this is an arithmetic operator.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Mul
                | BinaryOp::TrueDiv
                | BinaryOp::FloorDiv
                | BinaryOp::Mod
        )
    }

    /// Check if this is a logical connective over constraints.
    pub fn is_logical(&self) -> bool {
        matches!(
            self,
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor | BinaryOp::Implies
        )
    }
}

/// Reductions over a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    Sum,
    Product,
    Count,
    Forall,
    Exists,
    Min,
    Max,
}

impl ReduceOp {
    /// MiniZinc function name.
    pub fn name(&self) -> &'static str {
        match self {
            ReduceOp::Sum => "sum",
            ReduceOp::Product => "product",
            ReduceOp::Count => "count",
            ReduceOp::Forall => "forall",
            ReduceOp::Exists => "exists",
            ReduceOp::Min => "min",
            ReduceOp::Max => "max",
        }
    }
}

/// Global constraints from the MiniZinc library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKind {
    AllDifferent,
    AllDifferentExcept0,
    AllDifferentExcept,
    AllEqual,
    NValue,
    Circuit,
    Increasing,
    StrictlyIncreasing,
    Decreasing,
    StrictlyDecreasing,
    Cumulative,
    Disjunctive,
    DisjunctiveStrict,
    Table,
}

impl GlobalKind {
    /// MiniZinc predicate or function name.
    pub fn name(&self) -> &'static str {
        match self {
            GlobalKind::AllDifferent => "alldifferent",
            GlobalKind::AllDifferentExcept0 => "alldifferent_except_0",
            GlobalKind::AllDifferentExcept => "alldifferent_except",
            GlobalKind::AllEqual => "all_equal",
            GlobalKind::NValue => "nvalue",
            GlobalKind::Circuit => "circuit",
            GlobalKind::Increasing => "increasing",
            GlobalKind::StrictlyIncreasing => "strictly_increasing",
            GlobalKind::Decreasing => "decreasing",
            GlobalKind::StrictlyDecreasing => "strictly_decreasing",
            GlobalKind::Cumulative => "cumulative",
            GlobalKind::Disjunctive => "disjunctive",
            GlobalKind::DisjunctiveStrict => "disjunctive_strict",
            GlobalKind::Table => "table",
        }
    }

    /// Whether multi-dimensional array arguments are passed through `array1d`.
    pub fn flattens_args(&self) -> bool {
        !matches!(self, GlobalKind::Circuit | GlobalKind::Table)
    }
}

/// Data for a decision variable.
#[derive(Debug, Clone)]
pub struct VariableData {
    /// Unique identifier.
    pub id: ExprId,
    /// Domain of the variable.
    pub domain: Domain,
    /// Operation the variable is an alias of.
    pub value: Option<Arc<Expr>>,
}

/// Value held by a parameter.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// Concrete value, passed to the solver as data.
    Literal(Literal),
    /// Derived parameter bound to an operation.
    Derived(Arc<Expr>),
}

/// Data for a parameter.
#[derive(Debug, Clone)]
pub struct ParameterData {
    pub id: ExprId,
    pub value: ParamValue,
}

/// Contents of an array.
#[derive(Debug, Clone)]
pub enum ArrayKind {
    /// Array of decision variables over one domain.
    Var(Domain),
    /// Array of parameters, values flattened in row-major order.
    Par(Vec<Literal>),
}

/// Data for a rectangular array.
#[derive(Debug, Clone)]
pub struct ArrayData {
    pub id: ExprId,
    pub kind: ArrayKind,
    pub shape: Shape,
}

/// Concrete members of a parameter set.
#[derive(Debug, Clone)]
pub enum SetValues {
    /// Explicit int or enum values.
    Values(Vec<Literal>),
    /// Integer range `start..stop`.
    Range { start: i64, stop: i64 },
}

/// Contents of a set.
#[derive(Debug, Clone)]
pub enum SetKind {
    /// Set variable over a domain.
    Var(Domain),
    /// Parameter set.
    Par(SetValues),
}

/// Data for a set.
#[derive(Debug, Clone)]
pub struct SetData {
    pub id: ExprId,
    pub kind: SetKind,
}

/// One normalized position of an array view.
#[derive(Debug, Clone)]
pub enum Pos {
    /// Single index.
    Index(Arc<Expr>),
    /// Half-open slice with unit step.
    Slice { start: Arc<Expr>, stop: Arc<Expr> },
}

impl Pos {
    /// Check if this position is a slice.
    pub fn is_slice(&self) -> bool {
        matches!(self, Pos::Slice { .. })
    }
}

/// Data for an array view: one position per array dimension.
#[derive(Debug, Clone)]
pub struct ViewData {
    /// The viewed array, always an `Expr::Array`.
    pub array: Arc<Expr>,
    pub positions: Vec<Pos>,
}

impl ViewData {
    /// Number of sliced dimensions.
    pub fn slice_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_slice()).count()
    }
}

/// Iterator variable bound by a generator.
#[derive(Debug, Clone)]
pub struct IterVar {
    pub id: ExprId,
    pub ty: ElemType,
}

/// `<var> in <domain>` inside a reduction.
#[derive(Debug, Clone)]
pub struct Generator {
    pub var: IterVar,
    pub domain: Arc<Expr>,
}

/// Operands of a reduction.
#[derive(Debug, Clone)]
pub enum ReduceSource {
    /// Direct call over whole collections, `sum(a)`.
    Call(Vec<Arc<Expr>>),
    /// Generator call, `sum(i in 0..4)(body)`.
    Generator {
        generators: Vec<Generator>,
        body: Arc<Expr>,
    },
}

/// A reduction node.
#[derive(Debug, Clone)]
pub struct Reduction {
    pub op: ReduceOp,
    pub source: ReduceSource,
}

/// A global constraint call.
#[derive(Debug, Clone)]
pub struct GlobalConstraint {
    pub kind: GlobalKind,
    pub args: Vec<Arc<Expr>>,
}

/// The core expression type.
///
/// All expressions are immutable and use `Arc` for cheap sharing. Named leaves
/// (variables, parameters, arrays, sets) keep their `ExprId` when cloned, so a
/// clone refers to the same model entity.
#[derive(Debug, Clone)]
pub enum Expr {
    // ========== Leaf nodes ==========
    /// A literal value.
    Literal(Literal),
    /// A decision variable.
    Variable(VariableData),
    /// A parameter.
    Parameter(ParameterData),
    /// An array of variables or parameters.
    Array(ArrayData),
    /// A variable or parameter set.
    Set(SetData),
    /// An unnamed parameter set, rendered inline.
    SetLiteral(Vec<Literal>),

    // ========== Collections ==========
    /// Indexing or slicing of an array.
    View(ViewData),
    /// A range used as a value or iteration domain.
    Range(Range),
    /// A host sequence, rendered as `[a, b, c]`.
    Seq(Vec<Arc<Expr>>),
    /// An enumeration type used as a collection of its values.
    EnumDomain(EnumType),
    /// Iterator variable of an enclosing reduction.
    Iter(IterVar),

    // ========== Operations ==========
    /// Unary operation.
    Unary(UnaryOp, Arc<Expr>),
    /// Binary operation.
    Binary(BinaryOp, Arc<Expr>, Arc<Expr>),
    /// Power: pow(base, exponent).
    Pow(Arc<Expr>, Arc<Expr>),
    /// Extent of dimension `dim` of an array, computed by the solver.
    Size(Arc<Expr>, usize),
    /// Reduction over a collection.
    Reduce(Reduction),
    /// Global constraint.
    Global(GlobalConstraint),
}

impl Expr {
    /// Build a unary operation node.
    pub fn unary(op: UnaryOp, operand: impl Into<Expr>) -> Expr {
        Expr::Unary(op, Arc::new(operand.into()))
    }

    /// Build a binary operation node.
    pub fn binary(op: BinaryOp, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::Binary(op, Arc::new(lhs.into()), Arc::new(rhs.into()))
    }

    /// Get the unique ID if this is a named leaf.
    pub fn id(&self) -> Option<ExprId> {
        match self {
            Expr::Variable(v) => Some(v.id),
            Expr::Parameter(p) => Some(p.id),
            Expr::Array(a) => Some(a.id),
            Expr::Set(s) => Some(s.id),
            _ => None,
        }
    }

    /// Integer value known before solving: an int literal or a parameter bound
    /// to one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Expr::Literal(Literal::Int(v)) => Some(*v),
            Expr::Parameter(ParameterData {
                value: ParamValue::Literal(Literal::Int(v)),
                ..
            }) => Some(*v),
            _ => None,
        }
    }

    /// Check if this is a literal zero or a parameter bound to zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Expr::Literal(Literal::Int(0)) => true,
            Expr::Literal(Literal::Float(v)) => *v == 0.0,
            Expr::Parameter(ParameterData {
                value: ParamValue::Literal(lit),
                ..
            }) => matches!(lit, Literal::Int(0)) || *lit == Literal::Float(0.0),
            _ => false,
        }
    }

    /// Check if this is a derived operation, i.e. something a variable can be
    /// bound to. Element access counts, slices do not.
    pub fn is_operation(&self) -> bool {
        match self {
            Expr::Unary(..)
            | Expr::Binary(..)
            | Expr::Pow(..)
            | Expr::Size(..)
            | Expr::Reduce(_)
            | Expr::Global(_) => true,
            Expr::View(view) => view.slice_count() == 0,
            _ => false,
        }
    }

    /// Check if this expression denotes a collection rather than a scalar.
    pub fn is_collection(&self) -> bool {
        match self {
            Expr::Array(_)
            | Expr::Set(_)
            | Expr::SetLiteral(_)
            | Expr::Range(_)
            | Expr::Seq(_)
            | Expr::EnumDomain(_) => true,
            Expr::View(view) => view.slice_count() > 0,
            _ => false,
        }
    }

    /// Check if the value is known before solving: no decision variable,
    /// variable array or variable set is reachable from it.
    pub fn is_fixed(&self) -> bool {
        match self {
            Expr::Literal(_)
            | Expr::SetLiteral(_)
            | Expr::EnumDomain(_)
            | Expr::Iter(_)
            | Expr::Size(..) => true,
            Expr::Variable(_) => false,
            Expr::Parameter(p) => match &p.value {
                ParamValue::Literal(_) => true,
                ParamValue::Derived(value) => value.is_fixed(),
            },
            Expr::Array(a) => matches!(a.kind, ArrayKind::Par(_)),
            Expr::Set(s) => matches!(s.kind, SetKind::Par(_)),
            Expr::View(view) => {
                view.array.is_fixed()
                    && view.positions.iter().all(|p| match p {
                        Pos::Index(i) => i.is_fixed(),
                        Pos::Slice { start, stop } => start.is_fixed() && stop.is_fixed(),
                    })
            }
            Expr::Range(r) => r.start().is_fixed() && r.stop().is_fixed(),
            Expr::Seq(items) => items.iter().all(|i| i.is_fixed()),
            Expr::Unary(_, a) => a.is_fixed(),
            Expr::Binary(_, a, b) | Expr::Pow(a, b) => a.is_fixed() && b.is_fixed(),
            Expr::Reduce(r) => match &r.source {
                ReduceSource::Call(args) => args.iter().all(|a| a.is_fixed()),
                ReduceSource::Generator { generators, body } => {
                    generators.iter().all(|g| g.domain.is_fixed()) && body.is_fixed()
                }
            },
            Expr::Global(g) => g.args.iter().all(|a| a.is_fixed()),
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Expr::Literal(l) => format!("literal {l}"),
            Expr::Variable(v) => format!("variable #{}", v.id.raw()),
            Expr::Parameter(p) => format!("parameter #{}", p.id.raw()),
            Expr::Array(a) => format!("array #{} of shape {}", a.id.raw(), a.shape),
            Expr::Set(s) => format!("set #{}", s.id.raw()),
            Expr::SetLiteral(_) => "set literal".into(),
            Expr::View(_) => "array view".into(),
            Expr::Range(_) => "range".into(),
            Expr::Seq(_) => "sequence".into(),
            Expr::EnumDomain(e) => format!("enum {}", e.name()),
            Expr::Iter(_) => "iterator".into(),
            Expr::Unary(op, _) => format!("{op:?} operation"),
            Expr::Binary(op, _, _) => format!("`{}` operation", op.symbol()),
            Expr::Pow(_, _) => "pow operation".into(),
            Expr::Size(_, _) => "size query".into(),
            Expr::Reduce(r) => format!("{} reduction", r.op.name()),
            Expr::Global(g) => format!("{} constraint", g.kind.name()),
        }
    }
}

// Convenient From implementations for automatic conversion
impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Literal(Literal::Int(value))
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Literal(Literal::Int(value.into()))
    }
}

impl From<usize> for Expr {
    fn from(value: usize) -> Self {
        Expr::Literal(Literal::Int(value as i64))
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Literal(Literal::Float(value))
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Literal(Literal::Bool(value))
    }
}

impl From<EnumValue> for Expr {
    fn from(value: EnumValue) -> Self {
        Expr::Literal(Literal::Enum(value))
    }
}

impl From<&EnumValue> for Expr {
    fn from(value: &EnumValue) -> Self {
        Expr::Literal(Literal::Enum(value.clone()))
    }
}

impl From<EnumType> for Expr {
    fn from(value: EnumType) -> Self {
        Expr::EnumDomain(value)
    }
}

impl From<&EnumType> for Expr {
    fn from(value: &EnumType) -> Self {
        Expr::EnumDomain(value.clone())
    }
}

impl From<Range> for Expr {
    fn from(value: Range) -> Self {
        Expr::Range(value)
    }
}

impl From<std::ops::Range<i64>> for Expr {
    fn from(value: std::ops::Range<i64>) -> Self {
        Expr::Range(value.into())
    }
}

impl From<std::ops::Range<i32>> for Expr {
    fn from(value: std::ops::Range<i32>) -> Self {
        Expr::Range(value.into())
    }
}

impl From<std::ops::Range<f64>> for Expr {
    fn from(value: std::ops::Range<f64>) -> Self {
        Expr::Range(value.into())
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

/// Build a host sequence, rendered as `[a, b, c]`.
pub fn seq<I, T>(items: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    Expr::Seq(items.into_iter().map(|e| Arc::new(e.into())).collect())
}
