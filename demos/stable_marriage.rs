//! Stable Marriage Example
//!
//! Pairs n men with n women so that no man and woman would both rather be
//! with each other than with their partners. Rankings come in as matrices;
//! a lower rank is preferred.
//!
//! Set `RUST_LOG=zincrust=debug` to see the compiler and solver logs.

use nalgebra::DMatrix;
use tracing_subscriber::EnvFilter;
use zincrust::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Stable Marriage ===\n");

    #[rustfmt::skip]
    let rank_women = DMatrix::from_row_slice(5, 5, &[
        1, 2, 4, 3, 5,
        3, 5, 1, 2, 4,
        5, 4, 2, 1, 3,
        1, 3, 5, 4, 2,
        4, 2, 3, 5, 1,
    ]);
    #[rustfmt::skip]
    let rank_men = DMatrix::from_row_slice(5, 5, &[
        5, 1, 2, 4, 3,
        4, 1, 3, 2, 5,
        5, 3, 2, 4, 1,
        1, 5, 4, 3, 2,
        4, 3, 2, 1, 5,
    ]);
    let n = rank_women.nrows() as i64;

    let rank_women = array_par(&rank_women)?;
    let rank_men = array_par(&rank_men)?;
    let husband = array_var(0..n, n as usize)?;
    let wife = array_var(0..n, n as usize)?;

    let model = Model::satisfy()
        .declare("rank_women", &rank_women)
        .declare("rank_men", &rank_men)
        .declare("husband", &husband)
        .declare("wife", &wife)
        .subject_to([
            // assignment
            forall_with(over(0..n), |m| -> Result<Expr> {
                Ok(husband.at(wife.at(&m)?)?.equals(&m))
            })?,
            forall_with(over(0..n), |w| -> Result<Expr> {
                Ok(wife.at(husband.at(&w)?)?.equals(&w))
            })?,
            // ranking
            forall_with((over(0..n), over(0..n)), |(m, o)| -> Result<Expr> {
                Ok(implies(
                    rank_men.at((&m, &o))?.lt(rank_men.at((&m, wife.at(&m)?))?),
                    rank_women.at((&o, husband.at(&o)?))?.lt(rank_women.at((&o, &m))?),
                ))
            })?,
            forall_with((over(0..n), over(0..n)), |(w, o)| -> Result<Expr> {
                Ok(implies(
                    rank_women.at((&w, &o))?.lt(rank_women.at((&w, husband.at(&w)?))?),
                    rank_men.at((&o, wife.at(&o)?))?.lt(rank_men.at((&o, &w))?),
                ))
            })?,
        ])
        .build();

    println!("Generated model:\n{}\n", model.compile()?);

    println!("Solving...");
    let solution = model.solve(&MiniZinc, &Settings::from_env())?;
    println!("  Status: {:?}", solution.status);
    if let Some(best) = solution.best() {
        println!("  husband = {}", best["husband"]);
        println!("  wife    = {}", best["wife"]);
    }
    Ok(())
}
