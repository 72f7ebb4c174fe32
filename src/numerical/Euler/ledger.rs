//! Result ledger and error accountant.
//!
//! The Euler sweep produces one `StepRecord` per x-coordinate with only `x` and `actual`
//! filled in. `Ledger::with_reference` pairs every record with the reference sample
//! closest in x and computes the absolute and relative errors, producing a new ledger.
use log::info;
use nalgebra::DVector;
use std::fmt;
use tabled::{builder::Builder, settings::Style};

/// A ledger value that may be missing for two distinct reasons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Value(f64),
    /// the computation was attempted and failed (non-finite slope, no reference solution)
    Unavailable,
    /// the quantity is undefined, e.g. relative error against a zero reference
    NotApplicable,
}

impl Cell {
    /// `Value` for finite numbers, `Unavailable` otherwise
    pub fn from_f64(value: f64) -> Cell {
        if value.is_finite() {
            Cell::Value(value)
        } else {
            Cell::Unavailable
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Cell::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Cell::Value(_))
    }

    /// full precision, used for csv files
    pub fn to_plain_string(&self) -> String {
        match self {
            Cell::Value(v) => v.to_string(),
            Cell::Unavailable => "DNE".to_string(),
            Cell::NotApplicable => "N/A".to_string(),
        }
    }
}

/// rounded to 6 decimals, used for tables
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cell::Value(v) => write!(f, "{:.6}", v),
            Cell::Unavailable => write!(f, "DNE"),
            Cell::NotApplicable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub x: f64,
    /// reference solution
    pub expected: Cell,
    /// Euler approximation
    pub actual: Cell,
    pub abs_error: Cell,
    pub rel_error: Cell,
}

impl StepRecord {
    /// record as emitted by the sweep: reference not known yet
    pub fn approximation(x: f64, actual: Option<f64>) -> StepRecord {
        StepRecord {
            x,
            expected: Cell::Unavailable,
            actual: actual.map_or(Cell::Unavailable, Cell::Value),
            abs_error: Cell::NotApplicable,
            rel_error: Cell::NotApplicable,
        }
    }
}

/// Reference solution sampled at `x`. Empty when the reference solver failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub x: DVector<f64>,
    pub y: DVector<f64>,
}

impl Trajectory {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Trajectory {
        Trajectory {
            x: DVector::from_vec(x),
            y: DVector::from_vec(y),
        }
    }

    pub fn empty() -> Trajectory {
        Trajectory::new(Vec::new(), Vec::new())
    }

    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// y of the sample with the smallest |x_ref - x|; on a tie the earlier sample wins.
    /// Samples are ascending in x, so the lookup is a binary search.
    pub fn nearest(&self, x: f64) -> Option<f64> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        let xs = &self.x.as_slice()[..n];
        // first sample with x_ref >= x
        let i = xs.partition_point(|&x_ref| x_ref < x);
        let take_left = i == n || (i > 0 && x - xs[i - 1] <= xs[i] - x);
        let j = if take_left {
            // first of a run of equal x_ref
            xs.partition_point(|&x_ref| x_ref < xs[i - 1])
        } else {
            i
        };
        Some(self.y[j])
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// absolute and relative error of one record
fn error_cells(actual: Cell, expected: Cell) -> (Cell, Cell) {
    match (actual.value(), expected.value()) {
        (Some(actual), Some(expected)) => {
            let abs_error = (expected - actual).abs();
            let rel_error = if expected != 0.0 {
                Cell::from_f64(abs_error / expected.abs())
            } else {
                Cell::NotApplicable
            };
            (Cell::from_f64(abs_error), rel_error)
        }
        _ => (Cell::NotApplicable, Cell::NotApplicable),
    }
}

/// Ordered records of one run, index 0 is the initial point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ledger {
    records: Vec<StepRecord>,
}

impl Ledger {
    pub fn from_records(records: Vec<StepRecord>) -> Ledger {
        Ledger { records }
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.records.iter()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.x).collect()
    }

    /// Error accountant: a new ledger where every record carries the nearest reference value
    /// and the resulting errors. An empty reference leaves every `expected` unavailable.
    pub fn with_reference(&self, reference: &Trajectory) -> Ledger {
        let records = self
            .records
            .iter()
            .map(|record| {
                let expected = reference
                    .nearest(record.x)
                    .map_or(Cell::Unavailable, Cell::from_f64);
                let (abs_error, rel_error) = error_cells(record.actual, expected);
                StepRecord {
                    x: record.x,
                    expected,
                    actual: record.actual,
                    abs_error,
                    rel_error,
                }
            })
            .collect();
        let ledger = Ledger { records };
        info!(
            "ledger assembled: {} records, {} failed steps, max abs error {:?}",
            ledger.len(),
            ledger.failed_steps(),
            ledger.max_abs_error()
        );
        ledger
    }

    /// number of records whose approximation is unavailable
    pub fn failed_steps(&self) -> usize {
        self.records.iter().filter(|r| !r.actual.is_value()).count()
    }

    pub fn max_abs_error(&self) -> Option<f64> {
        self.records
            .iter()
            .filter_map(|r| r.abs_error.value())
            .max_by(|a, b| a.total_cmp(b))
    }

    /// available Euler points, in order
    pub fn approximation_points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.actual.value().map(|y| (r.x, y)))
            .collect()
    }

    /// available reference points, in order
    pub fn reference_points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.expected.value().map(|y| (r.x, y)))
            .collect()
    }

    /// Rows of strings `[x, expected, actual, abs_error, rel_error]`, values rounded to 6 decimals.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|r| {
                vec![
                    format!("{:.6}", r.x),
                    r.expected.to_string(),
                    r.actual.to_string(),
                    r.abs_error.to_string(),
                    r.rel_error.to_string(),
                ]
            })
            .collect()
    }

    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["x", "Expected y", "Actual y", "Abs Error", "Rel Error"]);
        for row in self.to_rows() {
            builder.push_record(row);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
