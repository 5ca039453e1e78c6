//! Intermediate representation of a model.
//!
//! The IR is built once per model from its attributes, constraints and
//! objective:
//! - every attribute holding a variable, parameter, array or set names it
//! - attributes holding a derived operation are wrapped as bound variables
//! - enumeration types reachable from the model are registered once
//!
//! Names live in a separate table keyed by `ExprId`; expression nodes are never
//! mutated.

use std::collections::{HashMap, HashSet};

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{Result, ZincError};
use crate::expr::{
    var_of, ArrayData, ArrayKind, Domain, EnumType, Expr, ExprId, Literal, ParamValue,
    ParameterData, Pos, ReduceSource, SetKind, SetValues,
};
use crate::model::Objective;
use crate::types::ElemType;

/// Words that can't be used as identifiers in MiniZinc.
const RESERVED: &[&str] = &[
    "ann", "annotation", "any", "array", "bool", "case", "constraint", "diff", "div", "else",
    "elseif", "endif", "enum", "false", "float", "function", "if", "in", "include", "int",
    "intersect", "let", "list", "maximize", "minimize", "mod", "not", "of", "op", "opt",
    "output", "par", "predicate", "record", "satisfy", "set", "solve", "string", "subset",
    "superset", "symdiff", "test", "then", "true", "tuple", "type", "union", "var", "where",
    "xor",
];

/// Check that `name` can be used as an identifier in the generated source.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid {
        return Err(ZincError::InvalidName(
            name.to_string(),
            "identifiers start with a letter followed by letters, digits or underscores",
        ));
    }
    if RESERVED.contains(&name) {
        return Err(ZincError::InvalidName(name.to_string(), "it is a reserved word"));
    }
    Ok(())
}

/// Named entities, constraints and objective of a model.
#[derive(Debug, Clone)]
pub struct Ir {
    names: HashMap<ExprId, String>,
    vars: Vec<(String, Expr)>,
    pars: Vec<(String, Expr)>,
    enums: Vec<EnumType>,
    constraints: Vec<Expr>,
    objective: Objective,
}

impl Ir {
    /// Build the IR from attributes in definition order.
    pub fn build(
        attributes: &[(String, Expr)],
        constraints: &[Expr],
        objective: &Objective,
    ) -> Result<Ir> {
        let mut ir = Ir {
            names: HashMap::new(),
            vars: Vec::new(),
            pars: Vec::new(),
            enums: Vec::new(),
            constraints: constraints.to_vec(),
            objective: objective.clone(),
        };
        for c in &ir.constraints {
            check_constraint(c)?;
        }
        let mut attribute_names = HashSet::new();

        for (name, expr) in attributes {
            validate_name(name)?;
            if !attribute_names.insert(name.as_str()) {
                return Err(ZincError::DuplicateName(name.clone()));
            }
            let expr = if expr.is_operation() {
                debug!(name = %name, "exposing derived operation as a bound variable");
                var_of(expr)?
            } else {
                expr.clone()
            };
            let Some(id) = expr.id() else {
                debug!(name = %name, kind = %expr.describe(), "skipping attribute");
                continue;
            };
            if let Some(first) = ir.names.get(&id) {
                debug!(name = %name, first = %first, "already named, skipping alias");
                continue;
            }
            ir.names.insert(id, name.clone());
            if let Expr::Parameter(ParameterData {
                value: ParamValue::Literal(l),
                ..
            }) = &expr
            {
                l.check()?;
            }
            if is_parameter(&expr) {
                ir.pars.push((name.clone(), expr));
            } else {
                ir.vars.push((name.clone(), expr));
            }
        }

        let mut seen = HashSet::new();
        let roots = ir
            .pars
            .iter()
            .chain(&ir.vars)
            .map(|(_, e)| e)
            .chain(&ir.constraints)
            .chain(ir.objective.expr());
        let mut enums = Vec::new();
        for e in roots {
            collect_enums(e, &mut seen, &mut enums);
        }
        for e in &enums {
            validate_name(e.name())?;
            for variant in e.variants() {
                validate_name(variant)?;
            }
        }
        ir.enums = enums;

        check_objective(&ir.objective)?;
        debug!(
            vars = ir.vars.len(),
            pars = ir.pars.len(),
            enums = ir.enums.len(),
            constraints = ir.constraints.len(),
            "built IR"
        );
        Ok(ir)
    }

    /// Name assigned to a named leaf.
    pub fn name_of(&self, id: ExprId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Check if `name` is used by an attribute or an enumeration.
    pub fn is_taken(&self, name: &str) -> bool {
        self.names.values().any(|n| n == name)
            || self
                .enums
                .iter()
                .any(|e| e.name() == name || e.variants().iter().any(|v| v == name))
    }

    /// Decision variables, arrays and sets of variables in definition order.
    pub fn vars(&self) -> &[(String, Expr)] {
        &self.vars
    }

    /// Parameters, parameter arrays and parameter sets in definition order.
    pub fn pars(&self) -> &[(String, Expr)] {
        &self.pars
    }

    /// Enumeration types in discovery order.
    pub fn enums(&self) -> &[EnumType] {
        &self.enums
    }

    pub fn constraints(&self) -> &[Expr] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// JSON data object with the values of literal parameters.
    ///
    /// Derived parameters are computed by the solver and left out.
    pub fn bindings(&self) -> Map<String, Value> {
        let mut data = Map::new();
        for (name, expr) in &self.pars {
            let value = match expr {
                Expr::Parameter(p) => match &p.value {
                    ParamValue::Literal(l) => literal_json(l),
                    ParamValue::Derived(_) => continue,
                },
                Expr::Array(a) => match &a.kind {
                    ArrayKind::Par(values) => array_json(a, values),
                    ArrayKind::Var(_) => continue,
                },
                Expr::Set(s) => match &s.kind {
                    SetKind::Par(SetValues::Values(values)) => {
                        json!({ "set": values.iter().map(literal_json).collect::<Vec<_>>() })
                    }
                    SetKind::Par(SetValues::Range { start, stop }) => {
                        json!({ "set": [[start, stop - 1]] })
                    }
                    SetKind::Var(_) => continue,
                },
                _ => continue,
            };
            data.insert(name.clone(), value);
        }
        data
    }
}

fn is_parameter(expr: &Expr) -> bool {
    match expr {
        Expr::Parameter(_) => true,
        Expr::Array(a) => matches!(a.kind, ArrayKind::Par(_)),
        Expr::Set(s) => matches!(s.kind, SetKind::Par(_)),
        _ => false,
    }
}

fn check_constraint(c: &Expr) -> Result<()> {
    if c.is_collection() || c.elem_type()? != ElemType::Bool {
        return Err(ZincError::NotAConstraint {
            op: "constraint",
            found: c.describe(),
        });
    }
    Ok(())
}

fn check_objective(objective: &Objective) -> Result<()> {
    let Some(e) = objective.expr() else {
        return Ok(());
    };
    if e.is_collection() {
        return Err(ZincError::InvalidObjective(e.describe()));
    }
    match e.elem_type()? {
        ElemType::Int | ElemType::Float => Ok(()),
        other => Err(ZincError::InvalidObjective(format!(
            "{} of type {other}",
            e.describe()
        ))),
    }
}

fn literal_json(l: &Literal) -> Value {
    match l {
        Literal::Int(v) => json!(v),
        Literal::Float(v) => json!(v),
        Literal::Bool(v) => json!(v),
        Literal::Enum(v) => json!({ "e": v.name() }),
    }
}

fn array_json(array: &ArrayData, values: &[Literal]) -> Value {
    fn nest(dims: &[usize], values: &[Literal]) -> Value {
        match dims.split_first() {
            Some((_, rest)) if !rest.is_empty() => {
                let stride: usize = rest.iter().product();
                Value::Array(values.chunks(stride).map(|c| nest(rest, c)).collect())
            }
            _ => Value::Array(values.iter().map(literal_json).collect()),
        }
    }
    nest(array.shape.dims(), values)
}

fn register(e: &EnumType, seen: &mut HashSet<String>, out: &mut Vec<EnumType>) {
    if seen.insert(e.name().to_string()) {
        out.push(e.clone());
    }
}

fn domain_enums(d: &Domain, seen: &mut HashSet<String>, out: &mut Vec<EnumType>) {
    if let Domain::Enum(e) = d {
        register(e, seen, out);
    }
}

fn literal_enums(l: &Literal, seen: &mut HashSet<String>, out: &mut Vec<EnumType>) {
    if let Literal::Enum(v) = l {
        register(v.ty(), seen, out);
    }
}

/// Register every enumeration type reachable from `e`.
fn collect_enums(e: &Expr, seen: &mut HashSet<String>, out: &mut Vec<EnumType>) {
    match e {
        Expr::Literal(l) => literal_enums(l, seen, out),
        Expr::Variable(v) => {
            domain_enums(&v.domain, seen, out);
            if let Some(value) = &v.value {
                collect_enums(value, seen, out);
            }
        }
        Expr::Parameter(p) => match &p.value {
            ParamValue::Literal(l) => literal_enums(l, seen, out),
            ParamValue::Derived(value) => collect_enums(value, seen, out),
        },
        Expr::Array(a) => match &a.kind {
            ArrayKind::Var(d) => domain_enums(d, seen, out),
            ArrayKind::Par(values) => values.iter().for_each(|l| literal_enums(l, seen, out)),
        },
        Expr::Set(s) => match &s.kind {
            SetKind::Var(d) => domain_enums(d, seen, out),
            SetKind::Par(SetValues::Values(values)) => {
                values.iter().for_each(|l| literal_enums(l, seen, out))
            }
            SetKind::Par(SetValues::Range { .. }) => {}
        },
        Expr::SetLiteral(values) => values.iter().for_each(|l| literal_enums(l, seen, out)),
        Expr::View(view) => {
            collect_enums(&view.array, seen, out);
            for p in &view.positions {
                match p {
                    Pos::Index(i) => collect_enums(i, seen, out),
                    Pos::Slice { start, stop } => {
                        collect_enums(start, seen, out);
                        collect_enums(stop, seen, out);
                    }
                }
            }
        }
        Expr::Range(r) => {
            collect_enums(r.start(), seen, out);
            collect_enums(r.stop(), seen, out);
        }
        Expr::Seq(items) => items.iter().for_each(|i| collect_enums(i, seen, out)),
        Expr::EnumDomain(ty) => register(ty, seen, out),
        Expr::Iter(it) => {
            if let ElemType::Enum(ty) = &it.ty {
                register(ty, seen, out);
            }
        }
        Expr::Unary(_, a) | Expr::Size(a, _) => collect_enums(a, seen, out),
        Expr::Binary(_, a, b) | Expr::Pow(a, b) => {
            collect_enums(a, seen, out);
            collect_enums(b, seen, out);
        }
        Expr::Reduce(r) => match &r.source {
            ReduceSource::Call(args) => args.iter().for_each(|a| collect_enums(a, seen, out)),
            ReduceSource::Generator { generators, body } => {
                for g in generators {
                    collect_enums(&g.domain, seen, out);
                }
                collect_enums(body, seen, out);
            }
        },
        Expr::Global(g) => g.args.iter().for_each(|a| collect_enums(a, seen, out)),
    }
}
