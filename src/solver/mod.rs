//! Solver interface for zincrust.
//!
//! This module provides:
//! - The `Backend` trait that runs generated source with parameter data
//! - `MiniZinc`, a backend driving the `minizinc` executable
//! - `RawSolution`, the parsed solution stream

pub mod minizinc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ZincError};

pub use self::minizinc::{MiniZinc, Settings};

/// One solution: output names mapped to their values.
pub type Assignment = Map<String, Value>;

/// Something that can solve generated MiniZinc source.
pub trait Backend {
    /// Solve `source` with the parameter values in `bindings`.
    fn solve(
        &self,
        source: &str,
        bindings: &Map<String, Value>,
        settings: &Settings,
    ) -> Result<RawSolution>;
}

/// Outcome of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// At least one solution was found; the search was not completed.
    Satisfied,
    /// The search was completed: all solutions were found, or the last one
    /// is optimal.
    Complete,
    /// Problem is unsatisfiable.
    Unsatisfiable,
    /// Problem is unbounded.
    Unbounded,
    /// Unknown status.
    Unknown,
}

/// Solutions as reported by the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSolution {
    pub status: SolveStatus,
    /// Solutions in the order they were found.
    pub solutions: Vec<Assignment>,
}

const SOLUTION_SEPARATOR: &str = "----------";
const SEARCH_COMPLETE: &str = "==========";

impl RawSolution {
    /// Parse the output stream of `minizinc --output-mode json`.
    ///
    /// Keys starting with `_` (such as `_objective`) are dropped.
    pub fn parse(stdout: &str) -> Result<RawSolution> {
        let mut status = SolveStatus::Unknown;
        let mut solutions = Vec::new();
        let mut block = String::new();

        for line in stdout.lines() {
            let line = line.trim();
            match line {
                SOLUTION_SEPARATOR => {
                    let mut assignment: Assignment = serde_json::from_str(&block)?;
                    assignment.retain(|name, _| !name.starts_with('_'));
                    solutions.push(assignment);
                    block.clear();
                    status = SolveStatus::Satisfied;
                }
                SEARCH_COMPLETE => status = SolveStatus::Complete,
                "=====UNSATISFIABLE=====" => status = SolveStatus::Unsatisfiable,
                "=====UNBOUNDED=====" => status = SolveStatus::Unbounded,
                "=====UNSATorUNBOUNDED=====" | "=====UNKNOWN=====" => {
                    status = SolveStatus::Unknown
                }
                "=====ERROR=====" => {
                    return Err(ZincError::SolverError(
                        "the solver reported an error".into(),
                    ))
                }
                _ if line.starts_with('%') || line.is_empty() => {}
                _ => {
                    block.push_str(line);
                    block.push('\n');
                }
            }
        }
        Ok(RawSolution { status, solutions })
    }

    /// The last solution found, the best one for optimization problems.
    pub fn best(&self) -> Option<&Assignment> {
        self.solutions.last()
    }

    /// Check if at least one solution was found.
    pub fn is_satisfied(&self) -> bool {
        !self.solutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_solutions() {
        let out = "{\n  \"x\" : 1,\n  \"_objective\" : 1\n}\n----------\n{\n  \"x\" : 2\n}\n----------\n==========\n";
        let raw = RawSolution::parse(out).unwrap();
        assert_eq!(raw.status, SolveStatus::Complete);
        assert_eq!(raw.solutions.len(), 2);
        assert_eq!(raw.solutions[0].get("x"), Some(&json!(1)));
        assert!(raw.solutions[0].get("_objective").is_none());
        assert_eq!(raw.best().unwrap().get("x"), Some(&json!(2)));
    }

    #[test]
    fn test_parse_partial_search() {
        let raw = RawSolution::parse("{\"a\": [1, 2]}\n----------\n").unwrap();
        assert_eq!(raw.status, SolveStatus::Satisfied);
        assert!(raw.is_satisfied());
    }

    #[test]
    fn test_parse_unsatisfiable() {
        let raw = RawSolution::parse("=====UNSATISFIABLE=====\n").unwrap();
        assert_eq!(raw.status, SolveStatus::Unsatisfiable);
        assert!(raw.best().is_none());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            RawSolution::parse("=====ERROR=====\n"),
            Err(ZincError::SolverError(_))
        ));
        assert!(matches!(
            RawSolution::parse("{not json\n----------\n"),
            Err(ZincError::Json(_))
        ));
    }

    #[test]
    fn test_comments_are_skipped() {
        let raw = RawSolution::parse("% time elapsed: 0.01 s\n{\"x\": 3}\n----------\n").unwrap();
        assert_eq!(raw.solutions.len(), 1);
    }
}
