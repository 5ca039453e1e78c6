//! `minizinc` executable integration.
//!
//! The model and its parameter data are written to temporary files and the
//! executable is run with `--output-mode json`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{Backend, RawSolution};
use crate::error::{Result, ZincError};

/// Solver settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path to the `minizinc` executable.
    pub executable: PathBuf,
    /// Solver tag, such as `gecode` or `chuffed`.
    pub solver: String,
    /// Report all solutions, or all intermediate solutions when optimizing.
    pub all_solutions: bool,
    /// Time limit for the whole run.
    pub time_limit: Option<Duration>,
    /// Number of parallel solver threads.
    pub processes: Option<usize>,
    /// Random seed for the solver.
    pub random_seed: Option<u64>,
    /// Optimisation level of the flattener (0 to 5).
    pub optimisation_level: Option<u8>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            executable: PathBuf::from("minizinc"),
            solver: "gecode".into(),
            all_solutions: false,
            time_limit: None,
            processes: None,
            random_seed: None,
            optimisation_level: None,
        }
    }
}

impl Settings {
    /// Default settings, with the executable and solver overridden by
    /// `MINIZINC_EXECUTABLE` and `MINIZINC_SOLVER` when set.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        if let Ok(executable) = env::var("MINIZINC_EXECUTABLE") {
            settings.executable = executable.into();
        }
        if let Ok(solver) = env::var("MINIZINC_SOLVER") {
            settings.solver = solver;
        }
        settings
    }

    pub fn with_solver(mut self, solver: impl Into<String>) -> Self {
        self.solver = solver.into();
        self
    }

    pub fn with_all_solutions(mut self, all_solutions: bool) -> Self {
        self.all_solutions = all_solutions;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_processes(mut self, processes: usize) -> Self {
        self.processes = Some(processes);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_optimisation_level(mut self, level: u8) -> Self {
        self.optimisation_level = Some(level);
        self
    }

    /// Command line arguments, without the model and data files.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--solver".to_string(),
            self.solver.clone(),
            "--output-mode".to_string(),
            "json".to_string(),
        ];
        if self.all_solutions {
            args.push("-a".into());
        }
        if let Some(limit) = self.time_limit {
            args.push("--time-limit".into());
            args.push(limit.as_millis().to_string());
        }
        if let Some(p) = self.processes {
            args.push("-p".into());
            args.push(p.to_string());
        }
        if let Some(seed) = self.random_seed {
            args.push("-r".into());
            args.push(seed.to_string());
        }
        if let Some(level) = self.optimisation_level {
            args.push(format!("-O{level}"));
        }
        args
    }
}

/// Backend running the `minizinc` executable as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniZinc;

impl Backend for MiniZinc {
    fn solve(
        &self,
        source: &str,
        bindings: &Map<String, Value>,
        settings: &Settings,
    ) -> Result<RawSolution> {
        let dir = tempfile::tempdir()?;
        let model_path = dir.path().join("model.mzn");
        fs::write(&model_path, source)?;

        let mut command = Command::new(&settings.executable);
        command.args(settings.args()).arg(&model_path);
        if !bindings.is_empty() {
            let data_path = dir.path().join("data.json");
            fs::write(&data_path, serde_json::to_string(bindings)?)?;
            command.arg(&data_path);
        }

        debug!(?command, "running minizinc");
        let output = command.output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            warn!(status = %output.status, %stderr, "minizinc failed");
            return Err(ZincError::SolverError(stderr.trim().to_string()));
        }
        if !stderr.trim().is_empty() {
            warn!(%stderr, "minizinc wrote to stderr");
        }
        let solution = RawSolution::parse(&stdout)?;
        debug!(
            status = ?solution.status,
            solutions = solution.solutions.len(),
            "minizinc finished"
        );
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let settings = Settings::default();
        assert_eq!(
            settings.args(),
            ["--solver", "gecode", "--output-mode", "json"]
        );
    }

    #[test]
    fn test_all_args() {
        let settings = Settings::default()
            .with_solver("chuffed")
            .with_all_solutions(true)
            .with_time_limit(Duration::from_secs(2))
            .with_processes(4)
            .with_random_seed(7)
            .with_optimisation_level(2);
        assert_eq!(
            settings.args(),
            [
                "--solver",
                "chuffed",
                "--output-mode",
                "json",
                "-a",
                "--time-limit",
                "2000",
                "-p",
                "4",
                "-r",
                "7",
                "-O2"
            ]
        );
    }

    #[test]
    fn test_missing_executable() {
        let settings = Settings {
            executable: PathBuf::from("/nonexistent/minizinc"),
            ..Settings::default()
        };
        let result = MiniZinc.solve("solve satisfy;", &Map::new(), &settings);
        assert!(matches!(result, Err(ZincError::Io(_))));
    }
}
