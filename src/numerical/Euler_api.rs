//! Euler's method for a single first order ODE dy/dx = f(x, y)
//!
//! Pipeline: the right-hand side is parsed and classified, the forward Euler sweep produces
//! the approximation, a Dormand-Prince solution sampled at the same x-coordinates serves as
//! the reference and the ledger pairs both and computes the errors.
//! # Example
//! ```
//! use emode::numerical::Euler_api::solve;
//! let ledger = solve("dy/dx = y", 0.0, 1.0, 0.1, 1.0).unwrap();
//! assert_eq!(ledger.len(), 11);
//! let last = ledger.records()[10];
//! assert!((last.actual.value().unwrap() - 1.1f64.powi(10)).abs() < 1e-9);
//! ```
//! # Task file
//! ```text
//! problem
//!   equation: dy/dx = x + y
//!   x0: 0
//!   y0: 1
//!   step: 0.1
//!   x_end: 1.0
//! output
//!   table: true
//!   csv: result.csv
//!   plot: emode.png
//!   loglevel: info
//! ```
use crate::Utils::logger::{
    init_logger, log_file_name, parse_loglevel, save_ledger_to_csv, save_ledger_to_file,
};
use crate::Utils::plots::plot_ledger;
use crate::Utils::task_parser::{DocumentMap, Value, parse_document_as, template_from};
use crate::numerical::Euler::classifier::ClassifiedRhs;
use crate::numerical::Euler::errors::EulerError;
use crate::numerical::Euler::ledger::Ledger;
use crate::numerical::Euler::reference_solver::{DormandPrince45, ReferenceSolver};
use crate::numerical::Euler::stepper::{ForwardEuler, number_of_steps};
use log::info;
use rayon::prelude::*;
use std::fs;
use std::time::Instant;

/// upper bound on the number of Euler steps of one run
pub const MAX_STEPS: usize = 10_000_000;

const PROBLEM_KEYS: [&str; 5] = ["equation", "x0", "y0", "step", "x_end"];
const OUTPUT_KEYS: [&str; 5] = ["table", "csv", "plot", "loglevel", "log_file"];

/// Initial value problem dy/dx = f(x, y), y(x0) = y0 on [x0, x_end] with a fixed step.
#[derive(Debug, Clone, PartialEq)]
pub struct EulerProblem {
    pub equation: String,
    pub x0: f64,
    pub y0: f64,
    pub step: f64,
    pub x_end: f64,
}

impl EulerProblem {
    pub fn new(equation: &str, x0: f64, y0: f64, step: f64, x_end: f64) -> EulerProblem {
        EulerProblem {
            equation: equation.to_string(),
            x0,
            y0,
            step,
            x_end,
        }
    }

    /// Checks the numeric inputs and returns the number of Euler steps. More than `MAX_STEPS`
    /// steps is a configuration error.
    pub fn validate(&self) -> Result<usize, EulerError> {
        for (name, value) in [
            ("x0", self.x0),
            ("y0", self.y0),
            ("step", self.step),
            ("target_x", self.x_end),
        ] {
            if !value.is_finite() {
                return Err(EulerError::Configuration(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        if self.step <= 0.0 {
            return Err(EulerError::Configuration(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.x_end <= self.x0 {
            return Err(EulerError::Configuration(format!(
                "target_x ({}) must be greater than x0 ({})",
                self.x_end, self.x0
            )));
        }
        let n_steps = number_of_steps(self.x0, self.x_end, self.step).max(1);
        if n_steps > MAX_STEPS {
            return Err(EulerError::Configuration(format!(
                "{} steps requested, at most {} are allowed",
                n_steps, MAX_STEPS
            )));
        }
        Ok(n_steps)
    }

    /// Euler approximation compared against the Dormand-Prince reference.
    pub fn solve(&self) -> Result<Ledger, EulerError> {
        self.solve_with(&DormandPrince45::default())
    }

    pub fn solve_with(&self, reference: &dyn ReferenceSolver) -> Result<Ledger, EulerError> {
        let n_steps = self.validate()?;
        let rhs = ClassifiedRhs::from_ode(&self.equation)?;
        let f = rhs.bind();

        let mut euler = ForwardEuler::new(&*f);
        euler.set_initial(self.x0, self.y0, self.step);
        let sweep = euler.sweep(n_steps);

        let xs = sweep.xs();
        let x_last = euler.x;
        let trajectory = reference.integrate(&*f, (self.x0, x_last), self.y0, &xs);
        Ok(sweep.with_reference(&trajectory))
    }
}

/// Solves dy/dx = `expression` from (x0, y0) to `target_x` with fixed `step`.
///
/// `EulerError::Configuration` when `step <= 0`, `target_x <= x0`, an input is not finite or
/// the run would take more than `MAX_STEPS` steps. `EulerError::Parse` when the expression
/// cannot be parsed or classified.
pub fn solve(
    expression: &str,
    x0: f64,
    y0: f64,
    step: f64,
    target_x: f64,
) -> Result<Ledger, EulerError> {
    EulerProblem::new(expression, x0, y0, step, target_x).solve()
}

pub fn solve_with_reference(
    expression: &str,
    x0: f64,
    y0: f64,
    step: f64,
    target_x: f64,
    reference: &dyn ReferenceSolver,
) -> Result<Ledger, EulerError> {
    EulerProblem::new(expression, x0, y0, step, target_x).solve_with(reference)
}

/// Independent problems solved in parallel, results in input order.
pub fn solve_many(problems: &[EulerProblem]) -> Vec<Result<Ledger, EulerError>> {
    problems.par_iter().map(|problem| problem.solve()).collect()
}

fn single_value<'a>(doc: &'a DocumentMap, section: &str, key: &str) -> Option<&'a Value> {
    doc.get(section)?.get(key)?.as_ref()?.first()
}

fn required_value<'a>(doc: &'a DocumentMap, key: &str) -> Result<&'a Value, EulerError> {
    single_value(doc, "problem", key).ok_or_else(|| {
        EulerError::Configuration(format!(
            "task document: key '{}' is missing in section 'problem'",
            key
        ))
    })
}

fn required_float(doc: &DocumentMap, key: &str) -> Result<f64, EulerError> {
    let value = required_value(doc, key)?;
    value.as_float().ok_or_else(|| {
        EulerError::Configuration(format!(
            "task document: '{}' must be a number, got '{}'",
            key, value
        ))
    })
}

fn optional_bool(doc: &DocumentMap, key: &str, default: bool) -> Result<bool, EulerError> {
    match single_value(doc, "output", key) {
        None => Ok(default),
        Some(value) => value.as_boolean().ok_or_else(|| {
            EulerError::Configuration(format!(
                "task document: '{}' must be true or false, got '{}'",
                key, value
            ))
        }),
    }
}

/// Euler run configured from code or from a task document, with output options.
#[derive(Debug, Clone)]
pub struct EulerTask {
    pub problem: EulerProblem,
    /// off, error, warn, info, debug or trace; `None` means info
    pub loglevel: Option<String>,
    /// also write the log into log_<date>_<time>.txt
    pub log_file: bool,
    /// print the ledger table after solving
    pub table: bool,
    pub csv_path: Option<String>,
    pub plot_path: Option<String>,
    result: Option<Ledger>,
}

impl EulerTask {
    pub fn new(problem: EulerProblem) -> EulerTask {
        EulerTask {
            problem,
            loglevel: Some("info".to_string()),
            log_file: false,
            table: true,
            csv_path: None,
            plot_path: None,
            result: None,
        }
    }

    pub fn set_loglevel(&mut self, loglevel: Option<String>) {
        self.loglevel = loglevel;
    }

    pub fn set_table(&mut self, table: bool) {
        self.table = table;
    }

    pub fn set_csv_path(&mut self, csv_path: Option<String>) {
        self.csv_path = csv_path;
    }

    pub fn set_plot_path(&mut self, plot_path: Option<String>) {
        self.plot_path = plot_path;
    }

    pub fn from_task_document(text: &str) -> Result<EulerTask, EulerError> {
        let template = template_from(&[("problem", &PROBLEM_KEYS[..]), ("output", &OUTPUT_KEYS[..])]);
        let doc = parse_document_as(text, Some(&template)).map_err(EulerError::Configuration)?;

        let equation = required_value(&doc, "equation")?.to_string_value();
        let problem = EulerProblem::new(
            &equation,
            required_float(&doc, "x0")?,
            required_float(&doc, "y0")?,
            required_float(&doc, "step")?,
            required_float(&doc, "x_end")?,
        );
        let mut task = EulerTask::new(problem);
        task.table = optional_bool(&doc, "table", true)?;
        task.log_file = optional_bool(&doc, "log_file", false)?;
        task.csv_path = single_value(&doc, "output", "csv").map(Value::to_string_value);
        task.plot_path = single_value(&doc, "output", "plot").map(Value::to_string_value);
        if let Some(level) = single_value(&doc, "output", "loglevel") {
            let level = level.to_string_value();
            parse_loglevel(&level)?;
            task.loglevel = Some(level);
        }
        Ok(task)
    }

    pub fn from_task_file(path: &str) -> Result<EulerTask, EulerError> {
        let text = fs::read_to_string(path)?;
        EulerTask::from_task_document(&text)
    }

    /// one-line summary of the problem, used as plot title
    pub fn params_to_string(&self) -> String {
        let p = &self.problem;
        format!(
            "Expr: {} | y0: {} | x∈[{}, {}] Δx={}",
            p.equation, p.y0, p.x0, p.x_end, p.step
        )
    }

    fn solver(&mut self) -> Result<&Ledger, EulerError> {
        let start = Instant::now();
        let ledger = self.problem.solve()?;
        info!(
            "Euler's method finished in {} ms, {} records",
            start.elapsed().as_millis(),
            ledger.len()
        );
        Ok(self.result.insert(ledger))
    }

    /// Sets up logging according to `loglevel` and solves the problem.
    pub fn solve(&mut self) -> Result<&Ledger, EulerError> {
        let level = parse_loglevel(self.loglevel.as_deref().unwrap_or("info"))?;
        let log_file = if self.log_file {
            Some(log_file_name())
        } else {
            None
        };
        init_logger(level, log_file.as_deref());
        info!("Euler's method started: {}", self.params_to_string());
        self.solver()
    }

    pub fn get_result(&self) -> Option<&Ledger> {
        self.result.as_ref()
    }

    fn solved(&self) -> Result<&Ledger, EulerError> {
        self.result.as_ref().ok_or_else(|| {
            EulerError::Configuration("no result yet: the task has not been solved".to_string())
        })
    }

    /// csv for *.csv file names, tab separated text otherwise
    pub fn save_result(&self, filename: &str) -> Result<(), EulerError> {
        let ledger = self.solved()?;
        if filename.to_lowercase().ends_with(".csv") {
            save_ledger_to_csv(ledger, filename)?;
        } else {
            save_ledger_to_file(ledger, filename)?;
        }
        info!("result saved into {}", filename);
        Ok(())
    }

    pub fn plot_result(&self, filename: &str) -> Result<(), EulerError> {
        let ledger = self.solved()?;
        plot_ledger(ledger, &self.params_to_string(), filename)?;
        info!("result plotted into {}", filename);
        Ok(())
    }

    /// Solves and produces every output the task asks for.
    pub fn run(&mut self) -> Result<(), EulerError> {
        self.solve()?;
        if self.table {
            let ledger = self.solved()?;
            println!("{}", self.params_to_string());
            println!("{}", ledger.to_table());
        }
        if let Some(path) = self.csv_path.clone() {
            self.save_result(&path)?;
        }
        if let Some(path) = self.plot_path.clone() {
            self.plot_result(&path)?;
        }
        Ok(())
    }
}
