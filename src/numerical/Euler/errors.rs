use crate::symbolic::parse_expr::ParseError;
use std::fmt;

/// Fatal errors of an Euler run. Step failures and reference solver failures are not
/// errors: they are recorded in the ledger as `Cell::Unavailable` and the run goes on.
#[derive(Debug, Clone, PartialEq)]
pub enum EulerError {
    /// invalid numeric input, rejected before any computation
    Configuration(String),
    /// the expression cannot be parsed or classified
    Parse(ParseError),
    /// writing a table, csv file or plot failed
    Io(String),
}

impl fmt::Display for EulerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EulerError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            EulerError::Parse(err) => write!(f, "Parse error: {}", err),
            EulerError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for EulerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EulerError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for EulerError {
    fn from(err: ParseError) -> Self {
        EulerError::Parse(err)
    }
}

impl From<std::io::Error> for EulerError {
    fn from(err: std::io::Error) -> Self {
        EulerError::Io(err.to_string())
    }
}

impl From<csv::Error> for EulerError {
    fn from(err: csv::Error) -> Self {
        EulerError::Io(err.to_string())
    }
}
