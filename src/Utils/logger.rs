use crate::numerical::Euler::errors::EulerError;
use crate::numerical::Euler::ledger::Ledger;
use chrono::Local;
use csv::Writer;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io::Write;

pub const LEDGER_HEADERS: [&str; 5] = ["x", "expected", "actual", "abs_error", "rel_error"];

/// "off"/"none", "error", "warn", "info", "debug", "trace" into a `LevelFilter`
pub fn parse_loglevel(level: &str) -> Result<LevelFilter, EulerError> {
    match level.trim().to_lowercase().as_str() {
        "off" | "none" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(EulerError::Configuration(format!(
            "loglevel must be off, error, warn, info, debug or trace, got '{}'",
            other
        ))),
    }
}

/// default log file name: log_<date>_<time>.txt
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Terminal logger plus optional file logger. A logger that is already installed is kept.
pub fn init_logger(level: LevelFilter, log_file: Option<&str>) {
    if level == LevelFilter::Off {
        return;
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if let Some(logger) = log_file.and_then(|filename| file_logger(level, filename)) {
        loggers.push(logger);
    }
    let _ = CombinedLogger::init(loggers);
}

/// File logger writing to `filename`. When the file cannot be created the reason goes
/// to stderr and logging continues on the terminal only.
pub fn file_logger(level: LevelFilter, filename: &str) -> Option<Box<dyn SharedLogger>> {
    match File::create(filename) {
        Ok(file) => Some(WriteLogger::new(level, Config::default(), file)),
        Err(err) => {
            eprintln!("could not create log file {}: {}", filename, err);
            None
        }
    }
}

/// tab separated text file with the same columns as the csv output
pub fn save_ledger_to_file(ledger: &Ledger, filename: &str) -> Result<(), EulerError> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}", LEDGER_HEADERS.join("\t"))?;
    for record in ledger.iter() {
        let row = [
            record.x.to_string(),
            record.expected.to_plain_string(),
            record.actual.to_plain_string(),
            record.abs_error.to_plain_string(),
            record.rel_error.to_plain_string(),
        ];
        writeln!(file, "{}", row.join("\t"))?;
    }
    Ok(())
}

pub fn save_ledger_to_csv(ledger: &Ledger, filename: &str) -> Result<(), EulerError> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(LEDGER_HEADERS)?;
    for record in ledger.iter() {
        writer.write_record([
            record.x.to_string(),
            record.expected.to_plain_string(),
            record.actual.to_plain_string(),
            record.abs_error.to_plain_string(),
            record.rel_error.to_plain_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::Euler::ledger::{StepRecord, Trajectory};
    use std::fs;
    use tempfile::tempdir;

    fn sample_ledger() -> Ledger {
        Ledger::from_records(vec![
            StepRecord::approximation(0.0, Some(1.0)),
            StepRecord::approximation(0.5, None),
        ])
        .with_reference(&Trajectory::new(vec![0.0, 0.5], vec![1.0, 1.5]))
    }

    #[test]
    fn test_save_ledger_to_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        save_ledger_to_csv(&sample_ledger(), path.to_str().unwrap()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "x,expected,actual,abs_error,rel_error");
        assert_eq!(lines[1], "0,1,1,0,0");
        assert_eq!(lines[2], "0.5,1.5,DNE,N/A,N/A");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_save_ledger_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.txt");
        save_ledger_to_file(&sample_ledger(), path.to_str().unwrap()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next(),
            Some("x\texpected\tactual\tabs_error\trel_error")
        );
        assert_eq!(content.lines().nth(2), Some("0.5\t1.5\tDNE\tN/A\tN/A"));
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("ledger.csv");
        let res = save_ledger_to_csv(&sample_ledger(), path.to_str().unwrap());
        assert!(matches!(res, Err(EulerError::Io(_))));
    }

    #[test]
    fn test_file_logger() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        assert!(file_logger(LevelFilter::Info, path.to_str().unwrap()).is_some());
        assert!(path.exists());
        let missing = dir.path().join("missing").join("log.txt");
        assert!(file_logger(LevelFilter::Info, missing.to_str().unwrap()).is_none());
        assert!(!missing.exists());
    }

    #[test]
    fn test_parse_loglevel() {
        assert_eq!(parse_loglevel("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_loglevel("none").unwrap(), LevelFilter::Off);
        assert!(matches!(
            parse_loglevel("loud"),
            Err(EulerError::Configuration(_))
        ));
    }
}
