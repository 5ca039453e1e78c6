//! MiniZinc code generation from the IR.
//!
//! Output order is fixed:
//! 1. include lines required by the flags raised below
//! 2. enumeration declarations
//! 3. parameter declarations
//! 4. variable declarations, each followed by its induced equality constraint
//! 5. explicit constraints
//! 6. the solve line

use itertools::Itertools;
use tracing::trace;

use super::flags::{Flag, Flags};
use super::ir::Ir;
use crate::error::{Result, ZincError};
use crate::expr::{
    ArrayData, ArrayKind, BinaryOp, Domain, Expr, ExprId, Literal, ParamValue, Pos, Range,
    ReduceOp, ReduceSource, Reduction, SetKind, SetValues, UnaryOp, ViewData,
};
use crate::model::Objective;
use crate::types::ElemType;

/// Iterator names by nesting depth.
const ITER_NAMES: [&str; 6] = ["i", "j", "k", "l", "m", "n"];

/// Render the IR as MiniZinc source. Returns the source and the raised flags.
pub fn render(ir: &Ir) -> Result<(String, Flags)> {
    let mut r = Renderer {
        ir,
        flags: Flags::new(),
        scopes: Vec::new(),
    };
    let mut lines = Vec::new();

    for e in ir.enums() {
        lines.push(format!(
            "enum {} = {{{}}};",
            e.name(),
            e.variants().iter().join(", ")
        ));
    }
    for (name, expr) in ir.pars() {
        lines.push(r.declaration(name, expr)?);
    }
    for (name, expr) in ir.vars() {
        lines.push(r.declaration(name, expr)?);
        if let Expr::Variable(v) = expr {
            if let Some(value) = &v.value {
                lines.push(format!("constraint ({name} == {});", r.expr(value)?));
            }
        }
    }
    for c in ir.constraints() {
        lines.push(format!("constraint {};", r.expr(c)?));
    }
    lines.push(match ir.objective() {
        Objective::Satisfy => "solve satisfy;".to_string(),
        Objective::Minimize(e) => format!("solve minimize {};", r.expr(e)?),
        Objective::Maximize(e) => format!("solve maximize {};", r.expr(e)?),
    });

    let mut source = r.flags.include_lines();
    source.append(&mut lines);
    for line in &source {
        trace!(%line, "rendered");
    }
    Ok((source.join("\n"), r.flags))
}

struct Renderer<'a> {
    ir: &'a Ir,
    flags: Flags,
    /// Iterator variables in scope, innermost last.
    scopes: Vec<(ExprId, String)>,
}

impl Renderer<'_> {
    fn name(&self, e: &Expr) -> Result<&str> {
        e.id()
            .and_then(|id| self.ir.name_of(id))
            .ok_or_else(|| ZincError::Unnamed(e.describe()))
    }

    fn declaration(&mut self, name: &str, e: &Expr) -> Result<String> {
        match e {
            Expr::Variable(v) => Ok(format!("var {}: {name};", self.domain(&v.domain)?)),
            Expr::Parameter(p) => match &p.value {
                ParamValue::Literal(l) => Ok(format!("{}: {name};", self.elem_type(&l.elem_type()))),
                ParamValue::Derived(value) => {
                    let ty = self.elem_type(&value.elem_type()?);
                    Ok(format!("{ty}: {name} = {};", self.expr(value)?))
                }
            },
            Expr::Array(a) => {
                let elem = match &a.kind {
                    ArrayKind::Var(d) => format!("var {}", self.domain(d)?),
                    ArrayKind::Par(_) => self.elem_type(&e.elem_type()?),
                };
                Ok(format!("array[{}] of {elem}: {name};", a.shape.index_sets()))
            }
            Expr::Set(s) => match &s.kind {
                SetKind::Var(d) => Ok(format!("var set of {}: {name};", self.domain(d)?)),
                SetKind::Par(SetValues::Range { start, stop }) => {
                    Ok(format!("set of {start}..{}: {name};", stop - 1))
                }
                SetKind::Par(SetValues::Values(_)) => {
                    Ok(format!("set of {}: {name};", self.elem_type(&e.elem_type()?)))
                }
            },
            other => Err(ZincError::UnsupportedType {
                found: other.describe(),
                context: "declaration",
            }),
        }
    }

    fn elem_type(&mut self, ty: &ElemType) -> String {
        if *ty == ElemType::Float {
            self.flags.insert(Flag::FloatUsed);
        }
        ty.to_string()
    }

    fn domain(&mut self, d: &Domain) -> Result<String> {
        match d {
            Domain::Int => Ok("int".into()),
            Domain::Float => {
                self.flags.insert(Flag::FloatUsed);
                Ok("float".into())
            }
            Domain::Bool => Ok("bool".into()),
            Domain::Range(r) => self.range(r),
            Domain::Enum(e) => Ok(e.name().to_string()),
        }
    }

    /// `start..stop-1` for integer ranges, `start..stop` for float ranges.
    fn range(&mut self, r: &Range) -> Result<String> {
        r.check()?;
        if r.elem_type()? == ElemType::Float {
            self.flags.insert(Flag::FloatUsed);
            return Ok(format!("{}..{}", self.expr(r.start())?, self.expr(r.stop())?));
        }
        self.int_range(r.start(), r.stop())
    }

    fn int_range(&mut self, start: &Expr, stop: &Expr) -> Result<String> {
        let last = match stop.as_literal_int() {
            Some(v) => (v - 1).to_string(),
            None => format!("({} - 1)", self.expr(stop)?),
        };
        Ok(format!("{}..{last}", self.expr(start)?))
    }

    fn expr(&mut self, e: &Expr) -> Result<String> {
        match e {
            Expr::Literal(l) => {
                l.check()?;
                if matches!(l, Literal::Float(_)) {
                    self.flags.insert(Flag::FloatUsed);
                }
                Ok(l.to_string())
            }
            Expr::Variable(_) | Expr::Parameter(_) | Expr::Array(_) | Expr::Set(_) => {
                Ok(self.name(e)?.to_string())
            }
            Expr::SetLiteral(values) => {
                values.iter().try_for_each(Literal::check)?;
                Ok(format!("{{{}}}", values.iter().join(", ")))
            }
            Expr::View(view) => self.view(view),
            Expr::Range(r) => self.range(r),
            Expr::Seq(items) => {
                let items = items.iter().map(|i| self.expr(i)).collect::<Result<Vec<_>>>()?;
                Ok(format!("[{}]", items.join(", ")))
            }
            Expr::EnumDomain(ty) => Ok(ty.name().to_string()),
            Expr::Iter(it) => self
                .scopes
                .iter()
                .rev()
                .find(|(id, _)| *id == it.id)
                .map(|(_, name)| name.clone())
                .ok_or_else(|| ZincError::Unnamed(e.describe())),
            Expr::Unary(op, operand) => {
                let operand = self.expr(operand)?;
                Ok(match op {
                    UnaryOp::Not => format!("(not {operand})"),
                    UnaryOp::Neg => format!("(-{operand})"),
                    UnaryOp::Abs => format!("abs({operand})"),
                })
            }
            Expr::Binary(op, lhs, rhs) => {
                if matches!(op, BinaryOp::FloorDiv | BinaryOp::Mod) && rhs.is_zero() {
                    return Err(ZincError::DivisionByZero);
                }
                let lhs = self.expr(lhs)?;
                let rhs = self.expr(rhs)?;
                Ok(format!("({lhs} {} {rhs})", op.symbol()))
            }
            Expr::Pow(base, exponent) => {
                let base = self.expr(base)?;
                let exponent = self.expr(exponent)?;
                Ok(format!("pow({base}, {exponent})"))
            }
            Expr::Size(array, dim) => self.size(array, *dim),
            Expr::Reduce(r) => self.reduction(r),
            Expr::Global(g) => {
                self.flags.insert(g.kind);
                let flatten = g.kind.flattens_args();
                let args = g
                    .args
                    .iter()
                    .map(|a| self.arg(a, flatten))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("{}({})", g.kind.name(), args.join(", ")))
            }
        }
    }

    /// Render an argument, passing arrays and multi-dimensional views through
    /// `array1d` when `flatten` is set. Views with a single slice are 1-d
    /// already.
    fn arg(&mut self, e: &Expr, flatten: bool) -> Result<String> {
        let s = self.expr(e)?;
        let is_array = match e {
            Expr::Array(_) => true,
            Expr::View(v) => v.slice_count() > 1,
            _ => false,
        };
        Ok(if flatten && is_array {
            format!("array1d({s})")
        } else {
            s
        })
    }

    fn size(&mut self, array: &Expr, dim: usize) -> Result<String> {
        let name = self.name(array)?;
        let ndim = match array {
            Expr::Array(a) => a.shape.ndim(),
            other => return Err(ZincError::NotAnArray(other.describe())),
        };
        Ok(if ndim > 1 {
            format!("(max(index_set_{}of{ndim}({name})) + 1)", dim + 1)
        } else {
            format!("(max(index_set({name})) + 1)")
        })
    }

    fn view(&mut self, view: &ViewData) -> Result<String> {
        let name = self.name(&view.array)?.to_string();
        let ndim = match view.array.as_ref() {
            Expr::Array(ArrayData { shape, .. }) => shape.ndim(),
            other => return Err(ZincError::NotAnArray(other.describe())),
        };
        let sliced = view.slice_count();
        if sliced == 0 {
            let indexes = view
                .positions
                .iter()
                .filter_map(|p| match p {
                    Pos::Index(i) => Some(i),
                    Pos::Slice { .. } => None,
                })
                .map(|i| self.expr(i))
                .collect::<Result<Vec<_>>>()?;
            return Ok(format!("{name}[{}]", indexes.join(", ")));
        }

        let mut ranges = Vec::with_capacity(ndim);
        let mut index_sets = Vec::with_capacity(ndim);
        let mut sliced_index_sets = Vec::with_capacity(sliced);
        for p in &view.positions {
            match p {
                Pos::Index(i) => {
                    let i = self.expr(i)?;
                    ranges.push(format!("{i}..{i}"));
                    index_sets.push("0..0".to_string());
                }
                Pos::Slice { start, stop } => {
                    ranges.push(self.int_range(start, stop)?);
                    let len = match (start.as_literal_int(), stop.as_literal_int()) {
                        (Some(a), Some(b)) => Expr::from(b - a),
                        (Some(0), None) => stop.as_ref().clone(),
                        _ => Expr::binary(BinaryOp::Sub, stop.as_ref(), start.as_ref()),
                    };
                    let index_set = self.int_range(&Expr::from(0), &len)?;
                    index_sets.push(index_set.clone());
                    sliced_index_sets.push(index_set);
                }
            }
        }
        let slice = format!(
            "slice_{ndim}d({name}, [{}], {})",
            ranges.join(", "),
            index_sets.join(", ")
        );
        Ok(if sliced == ndim {
            slice
        } else if sliced == 1 {
            format!("array1d({slice})")
        } else {
            format!("array{sliced}d({}, {slice})", sliced_index_sets.join(", "))
        })
    }

    fn reduction(&mut self, r: &Reduction) -> Result<String> {
        match &r.source {
            ReduceSource::Call(args) => {
                let flatten = r.op == ReduceOp::Count;
                let args = args
                    .iter()
                    .map(|a| self.arg(a, flatten))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("{}({})", r.op.name(), args.join(", ")))
            }
            ReduceSource::Generator { generators, body } => {
                let depth = self.scopes.len();
                let mut heads = Vec::with_capacity(generators.len());
                for g in generators {
                    let domain = self.expr(&g.domain)?;
                    let name = self.iter_name();
                    heads.push(format!("{name} in {domain}"));
                    self.scopes.push((g.var.id, name));
                }
                let body = self.expr(body);
                self.scopes.truncate(depth);
                let body = body?;
                let heads = heads.join(", ");
                Ok(match r.op {
                    ReduceOp::Min | ReduceOp::Max => {
                        format!("{}([{body} | {heads}])", r.op.name())
                    }
                    _ => format!("{}({heads})({body})", r.op.name()),
                })
            }
        }
    }

    /// Name for the next iterator: `i`, `j`, ... by depth, avoiding model names.
    fn iter_name(&self) -> String {
        let depth = self.scopes.len();
        let mut name = match ITER_NAMES.get(depth) {
            Some(n) => n.to_string(),
            None => format!("i{depth}"),
        };
        while self.ir.is_taken(&name) || self.scopes.iter().any(|(_, n)| *n == name) {
            name.push('_');
        }
        name
    }
}

impl Expr {
    /// Integer value of an int literal.
    fn as_literal_int(&self) -> Option<i64> {
        match self {
            Expr::Literal(Literal::Int(v)) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{alldifferent, forall_with, over, sum, sum_with, ConstraintExt};
    use crate::expr::{array_par, array_var, par, par_of, var, EnumType};

    fn compile(attributes: Vec<(&str, Expr)>, constraints: Vec<Expr>, objective: Objective) -> String {
        let attributes: Vec<_> = attributes
            .into_iter()
            .map(|(n, e)| (n.to_string(), e))
            .collect();
        let ir = Ir::build(&attributes, &constraints, &objective).unwrap();
        render(&ir).unwrap().0
    }

    #[test]
    fn test_range_declaration() {
        let a = var(0..100);
        assert_eq!(
            compile(vec![("a", a)], vec![], Objective::Satisfy),
            "var 0..99: a;\nsolve satisfy;"
        );
    }

    #[test]
    fn test_float_range_sets_flag() {
        let attributes = vec![("r".to_string(), var(1.3..10.0))];
        let ir = Ir::build(&attributes, &[], &Objective::Satisfy).unwrap();
        let (source, flags) = render(&ir).unwrap();
        assert_eq!(source, "var 1.3..10.0: r;\nsolve satisfy;");
        assert!(flags.contains(Flag::FloatUsed));
    }

    #[test]
    fn test_enum_declaration() {
        let color = EnumType::new("Color", ["Red", "Green"]).unwrap();
        let c = var(&color);
        let source = compile(
            vec![("c", c.clone())],
            vec![c.not_equals(color.value("Red").unwrap())],
            Objective::Satisfy,
        );
        assert_eq!(
            source,
            "enum Color = {Red, Green};\nvar Color: c;\nconstraint (c != Red);\nsolve satisfy;"
        );
    }

    #[test]
    fn test_induced_constraint() {
        let a = array_var(0..10, 3).unwrap();
        let source = compile(
            vec![("a", a.clone()), ("s", sum(&a).unwrap())],
            vec![],
            Objective::Satisfy,
        );
        assert!(source.contains("var int: s;\nconstraint (s == sum(a));"));
    }

    #[test]
    fn test_unnamed_reference() {
        let x = var(0..10);
        let attributes = vec![("x".to_string(), x.clone())];
        let stray = var(0..10);
        let ir = Ir::build(&attributes, &[x.lt(&stray)], &Objective::Satisfy).unwrap();
        assert!(matches!(render(&ir), Err(ZincError::Unnamed(_))));
    }

    #[test]
    fn test_derived_parameter() {
        let n = par(4);
        let m = par_of(&n * 2).unwrap();
        let source = compile(vec![("n", n), ("m", m)], vec![], Objective::Satisfy);
        assert_eq!(source, "int: n;\nint: m = (n * 2);\nsolve satisfy;");
    }

    #[test]
    fn test_division_by_zero_at_render() {
        let x = var(0..10);
        let attributes = vec![("x".to_string(), x.clone())];
        let ir = Ir::build(&attributes, &[(&x / 0).equals(1)], &Objective::Satisfy).unwrap();
        assert!(matches!(render(&ir), Err(ZincError::DivisionByZero)));
    }

    #[test]
    fn test_iterator_names() {
        let a = array_var(0..5, (2, 2)).unwrap();
        let c = forall_with((over(0..2), over(0..2)), |(i, j)| {
            a.at((&i, &j)).map(|e| e.ge(&i))
        })
        .unwrap();
        let source = compile(vec![("a", a.clone())], vec![c], Objective::Satisfy);
        assert!(source.contains("constraint forall(i in 0..1, j in 0..1)((a[i, j] >= i));"));
    }

    #[test]
    fn test_iterator_avoids_model_names() {
        let i = var(0..5);
        let s = sum_with(over(0..3), |k| &k * &i).unwrap();
        let source = compile(vec![("i", i.clone())], vec![s.gt(0)], Objective::Satisfy);
        assert!(source.contains("sum(i_ in 0..2)((i_ * i))"));
    }

    #[test]
    fn test_min_generator_form() {
        let a = array_par(vec![3, 1, 2]).unwrap();
        let m = crate::atoms::min_with(over(0..3), |i| a.at(i)).unwrap();
        let source = compile(vec![("a", a.clone()), ("m", m)], vec![], Objective::Satisfy);
        assert!(source.contains("constraint (m == min([a[i] | i in 0..2]));"));
    }

    #[test]
    fn test_global_include() {
        let a = array_var(0..5, (2, 2)).unwrap();
        let source = compile(
            vec![("a", a.clone())],
            vec![alldifferent(&a).unwrap(), alldifferent(a.at(0).unwrap()).unwrap()],
            Objective::Satisfy,
        );
        assert_eq!(source.matches("include \"alldifferent.mzn\";").count(), 1);
        assert!(source.starts_with("include \"alldifferent.mzn\";\n"));
        assert!(source.contains("constraint alldifferent(array1d(a));"));
    }
}
