//! Solve tests against the `minizinc` executable.
//!
//! These run only with `cargo test -- --ignored` and a MiniZinc installation.
//! `MINIZINC_EXECUTABLE` and `MINIZINC_SOLVER` select the executable and
//! solver.

use serde_json::{json, Value};
use zincrust::prelude::*;

/// A test case definition
struct TestCase {
    name: &'static str,
    /// Builds the model and returns it with the attribute to check and its
    /// expected value.
    build: fn() -> Result<(Model, &'static str, Value)>,
}

fn grid() -> Result<Expr> {
    array_par(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
}

fn cube() -> Result<Expr> {
    array_par(vec![vec![vec![1, 2], vec![3, 4]], vec![vec![5, 6], vec![7, 8]]])
}

fn product_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "row_slice",
            build: || {
                // a[0, 1..2] = [2]
                let a = grid()?;
                let p = product(a.at((0, Position::slice(1, 2)))?)?;
                Ok((Model::satisfy().declare("a", &a).declare("p", p).build(), "p", json!(2)))
            },
        },
        TestCase {
            name: "lower_right_block",
            build: || {
                // a[2.., 1..] = [[8, 9]]
                let a = grid()?;
                let p = product(a.at((2.., 1..))?)?;
                Ok((Model::satisfy().declare("a", &a).declare("p", p).build(), "p", json!(72)))
            },
        },
        TestCase {
            name: "corner",
            build: || {
                // a[2.., 2..] = [[9]]
                let a = grid()?;
                let p = product(a.at((2.., 2..))?)?;
                Ok((Model::satisfy().declare("a", &a).declare("p", p).build(), "p", json!(9)))
            },
        },
        TestCase {
            name: "whole_cube",
            build: || {
                let b = cube()?;
                let p = product(&b)?;
                Ok((Model::satisfy().declare("b", &b).declare("p", p).build(), "p", json!(40320)))
            },
        },
        TestCase {
            name: "cube_reshape",
            build: || {
                // b[.., 1.., ..] = [[[3, 4]], [[7, 8]]]
                let b = cube()?;
                let p = product(b.at((.., 1.., ..))?)?;
                Ok((Model::satisfy().declare("b", &b).declare("p", p).build(), "p", json!(672)))
            },
        },
        TestCase {
            name: "generator_sum",
            build: || {
                // sum of the diagonal
                let a = grid()?;
                let s = sum_with(over(0..3), |i| a.at((&i, &i)))?;
                Ok((Model::satisfy().declare("a", &a).declare("s", s).build(), "s", json!(15)))
            },
        },
    ]
}

fn settings() -> Settings {
    Settings::from_env()
}

#[test]
#[ignore = "requires the minizinc executable"]
fn test_products() {
    for case in product_cases() {
        let (model, name, expected) = (case.build)().expect("Should build");
        let solution = model
            .solve(&MiniZinc, &settings())
            .unwrap_or_else(|e| panic!("{}: {e}", case.name));
        let best = solution.best().unwrap_or_else(|| panic!("{}: no solution", case.name));
        assert_eq!(best.get(name), Some(&expected), "{}", case.name);
    }
}

#[test]
#[ignore = "requires the minizinc executable"]
fn test_stable_marriage() {
    let rank_women = array_par([
        [1, 2, 4, 3, 5],
        [3, 5, 1, 2, 4],
        [5, 4, 2, 1, 3],
        [1, 3, 5, 4, 2],
        [4, 2, 3, 5, 1],
    ])
    .unwrap();
    let rank_men = array_par([
        [5, 1, 2, 4, 3],
        [4, 1, 3, 2, 5],
        [5, 3, 2, 4, 1],
        [1, 5, 4, 3, 2],
        [4, 3, 2, 1, 5],
    ])
    .unwrap();
    let n: i64 = 5;
    let husband = array_var(0..n, 5).unwrap();
    let wife = array_var(0..n, 5).unwrap();
    let model = Model::satisfy()
        .declare("rank_women", &rank_women)
        .declare("rank_men", &rank_men)
        .declare("husband", &husband)
        .declare("wife", &wife)
        .subject_to([
            forall_with(over(0..n), |m| -> Result<Expr> {
                Ok(husband.at(wife.at(&m)?)?.equals(&m))
            })
            .unwrap(),
            forall_with(over(0..n), |w| -> Result<Expr> {
                Ok(wife.at(husband.at(&w)?)?.equals(&w))
            })
            .unwrap(),
            forall_with((over(0..n), over(0..n)), |(m, o)| -> Result<Expr> {
                Ok(implies(
                    rank_men.at((&m, &o))?.lt(rank_men.at((&m, wife.at(&m)?))?),
                    rank_women.at((&o, husband.at(&o)?))?.lt(rank_women.at((&o, &m))?),
                ))
            })
            .unwrap(),
            forall_with((over(0..n), over(0..n)), |(w, o)| -> Result<Expr> {
                Ok(implies(
                    rank_women.at((&w, &o))?.lt(rank_women.at((&w, husband.at(&w)?))?),
                    rank_men.at((&o, wife.at(&o)?))?.lt(rank_men.at((&o, &w))?),
                ))
            })
            .unwrap(),
        ])
        .build();

    let solution = model.solve(&MiniZinc, &settings()).expect("Should solve");
    assert!(solution.is_satisfied());
    let best = solution.best().unwrap();
    assert_eq!(best.get("husband"), Some(&json!([3, 0, 1, 4, 2])));
    assert_eq!(best.get("wife"), Some(&json!([1, 2, 4, 0, 3])));
}

/// `a < x < b` with all solutions requested.
fn between(a: i64, b: i64, domain: std::ops::Range<i64>) -> RawSolution {
    let lo = par(a);
    let hi = par(b);
    let x = var(domain);
    let model = Model::satisfy()
        .declare("a", &lo)
        .declare("b", &hi)
        .declare("x", &x)
        .subject_to([lo.lt(&x), x.lt(&hi)])
        .build();
    model
        .solve(&MiniZinc, &settings().with_all_solutions(true))
        .expect("Should solve")
}

#[test]
#[ignore = "requires the minizinc executable"]
fn test_parameter_bounds() {
    let wide = between(200, 503, 0..1000);
    assert_eq!(wide.status, SolveStatus::Complete);
    assert!(wide.solutions.len() > 1);

    let narrow = between(99, 105, -100..101);
    assert_eq!(narrow.status, SolveStatus::Complete);
    assert_eq!(narrow.solutions.len(), 1);
    assert_eq!(narrow.solutions[0].get("x"), Some(&json!(100)));
}

#[test]
#[ignore = "requires the minizinc executable"]
fn test_unsatisfiable() {
    let x = var(0..5);
    let model = Model::satisfy()
        .declare("x", &x)
        .subject_to([x.gt(3), x.lt(2)])
        .build();
    let solution = model.solve(&MiniZinc, &settings()).expect("Should solve");
    assert_eq!(solution.status, SolveStatus::Unsatisfiable);
    assert!(solution.best().is_none());
}

#[test]
#[ignore = "requires the minizinc executable"]
fn test_optimization() {
    let a = array_var(0..10, 3).unwrap();
    let model = Model::maximize(sum(&a).unwrap())
        .declare("a", &a)
        .subject_to([alldifferent(&a).unwrap(), a.at(0).unwrap().lt(5)])
        .build();
    let solution = model.solve(&MiniZinc, &settings()).expect("Should solve");
    assert_eq!(solution.status, SolveStatus::Complete);
    let best = solution.best().unwrap();
    let values: Vec<i64> = serde_json::from_value(best["a"].clone()).unwrap();
    assert_eq!(values.iter().sum::<i64>(), 4 + 9 + 8);
}

#[test]
#[ignore = "requires the minizinc executable"]
fn test_enum_output() {
    let color = EnumType::new("Color", ["Red", "Green"]).unwrap();
    let c = var(&color);
    let model = Model::satisfy()
        .declare("c", &c)
        .constraint(c.not_equals(color.value("Red").unwrap()))
        .build();
    let solution = model.solve(&MiniZinc, &settings()).expect("Should solve");
    assert_eq!(solution.best().unwrap().get("c"), Some(&json!({ "e": "Green" })));
}
