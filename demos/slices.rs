//! Array Slicing Example
//!
//! Products over slices of a 3 x 3 grid and a 2 x 2 x 2 cube. Each product is
//! declared as a named attribute, so the solver reports its value.

use tracing_subscriber::EnvFilter;
use zincrust::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Array Slices ===\n");

    let grid = array_par(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])?;
    let cube = array_par(vec![
        vec![vec![1, 2], vec![3, 4]],
        vec![vec![5, 6], vec![7, 8]],
    ])?;

    let slices = [
        ("row", "grid[0, 1..2]", product(grid.at((0, Position::slice(1, 2)))?)?),
        ("block", "grid[2.., 1..]", product(grid.at((2.., 1..))?)?),
        ("corner", "grid[2.., 2..]", product(grid.at((2.., 2..))?)?),
        ("whole", "cube", product(&cube)?),
        ("middle", "cube[.., 1.., ..]", product(cube.at((.., 1.., ..))?)?),
    ];

    let mut builder = Model::satisfy().declare("grid", &grid).declare("cube", &cube);
    for (name, _, product) in &slices {
        builder = builder.declare(*name, product);
    }
    let model = builder.build();

    println!("Generated model:\n{}\n", model.compile()?);
    println!("Data: {}\n", serde_json::Value::Object(model.ir()?.bindings()));

    println!("Solving...");
    let solution = model.solve(&MiniZinc, &Settings::from_env())?;
    println!("  Status: {:?}", solution.status);
    if let Some(best) = solution.best() {
        for (name, text, _) in &slices {
            println!("  product({text}) = {}", best[*name]);
        }
    }
    Ok(())
}
