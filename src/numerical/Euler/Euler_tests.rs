#[cfg(test)]
mod tests {
    use crate::numerical::Euler::errors::EulerError;
    use crate::numerical::Euler::ledger::Cell;
    use crate::numerical::Euler::reference_solver::NoReference;
    use crate::numerical::Euler_api::{solve, solve_with_reference};
    use crate::symbolic::parse_expr::ParseError;
    use approx::assert_relative_eq;

    #[test]
    fn test_ledger_length() {
        // (x0, step, target_x, expected number of records)
        let cases = [
            (0.0, 0.1, 1.0, 11),
            (0.0, 0.3, 1.0, 5),
            (0.0, 0.1, 0.95, 11),
            (-1.0, 0.5, 1.0, 5),
            (2.0, 0.25, 3.0, 5),
            (0.0, 2.0, 1.0, 2),
            // 0.07/0.01 rounds up to 7.000000000000001, the ceiling keeps the extra step
            (0.0, 0.01, 0.07, 9),
        ];
        for (x0, step, target_x, len) in cases {
            let ledger = solve("x - y", x0, 1.0, step, target_x).unwrap();
            assert_eq!(ledger.len(), len, "x0 = {}, step = {}", x0, step);
        }
    }

    #[test]
    fn test_initial_record_is_exact() {
        let ledger = solve("dy/dx = sin(x) * y", 0.3, 1.7, 0.1, 1.0).unwrap();
        let first = ledger.records()[0];
        assert_eq!(first.x, 0.3);
        assert_eq!(first.actual, Cell::Value(1.7));
        assert_eq!(first.expected, Cell::Value(1.7));
        assert_eq!(first.abs_error, Cell::Value(0.0));
        assert_eq!(first.rel_error, Cell::Value(0.0));
    }

    #[test]
    fn test_x_coordinates() {
        let ledger = solve("x*y", 0.5, 1.0, 0.07, 2.0).unwrap();
        for (i, record) in ledger.iter().enumerate() {
            assert_eq!(record.x, 0.5 + i as f64 * 0.07);
        }
    }

    #[test]
    fn test_constant_rhs() {
        let ledger = solve("3", 0.0, 2.0, 0.25, 2.0).unwrap();
        assert_eq!(ledger.len(), 9);
        for (i, record) in ledger.iter().enumerate() {
            let expected = 2.0 + i as f64 * 0.25 * 3.0;
            assert_relative_eq!(record.actual.value().unwrap(), expected, epsilon = 1e-9);
            // a straight line is integrated exactly by both methods
            assert_relative_eq!(record.expected.value().unwrap(), expected, epsilon = 1e-9);
            assert!(record.abs_error.value().unwrap() < 1e-9);
        }
    }

    #[test]
    fn test_exponential_growth() {
        let ledger = solve("dy/dx = y", 0.0, 1.0, 0.1, 1.0).unwrap();
        assert_eq!(ledger.len(), 11);
        let last = ledger.records()[10];
        assert_relative_eq!(last.x, 1.0);
        assert_relative_eq!(last.actual.value().unwrap(), 1.1f64.powi(10), epsilon = 1e-9);
        assert_relative_eq!(
            last.expected.value().unwrap(),
            std::f64::consts::E,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            last.abs_error.value().unwrap(),
            std::f64::consts::E - 1.1f64.powi(10),
            epsilon = 1e-6
        );
        assert_eq!(ledger.failed_steps(), 0);
    }

    #[test]
    fn test_fine_step_keeps_reference() {
        // more records than the reference step budget
        let ledger = solve("y", 0.0, 1.0, 5e-6, 1.0).unwrap();
        assert!(ledger.len() >= 200_001);
        assert!(ledger.iter().all(|r| r.expected.is_value()));
        let last = ledger.records()[ledger.len() - 1];
        assert_relative_eq!(last.expected.value().unwrap(), last.x.exp(), epsilon = 1e-6);
        assert!(last.abs_error.value().unwrap() < 1e-4);
    }

    #[test]
    fn test_x_only_rhs() {
        // y = x^2, Euler gives h^2 * i(i-1)
        let ledger = solve("2*x", 0.0, 0.0, 0.1, 1.0).unwrap();
        let last = ledger.records()[10];
        assert_relative_eq!(last.actual.value().unwrap(), 0.9, epsilon = 1e-9);
        assert_relative_eq!(last.expected.value().unwrap(), 1.0, epsilon = 1e-8);
        assert_relative_eq!(last.abs_error.value().unwrap(), 0.1, epsilon = 1e-8);
        assert_relative_eq!(last.rel_error.value().unwrap(), 0.1, epsilon = 1e-8);
        // reference is zero at x0
        assert_eq!(ledger.records()[0].rel_error, Cell::NotApplicable);
    }

    #[test]
    fn test_singular_slope_at_start() {
        let ledger = solve("1/x", 0.0, 1.0, 0.1, 0.5).unwrap();
        let records = ledger.records();
        assert_eq!(records.len(), 6);
        assert_eq!(records[1].actual, Cell::Unavailable);
        assert_relative_eq!(records[1].x, 0.1);
        assert_relative_eq!(records[2].actual.value().unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(ledger.failed_steps(), 1);
        // the reference cannot start at a singularity either
        assert!(records.iter().all(|r| r.expected == Cell::Unavailable));
        assert!(records.iter().all(|r| r.abs_error == Cell::NotApplicable));
    }

    #[test]
    fn test_singular_slope_in_y() {
        let ledger = solve("dy/dx = 1/y", 0.0, 0.0, 0.1, 1.0).unwrap();
        assert_eq!(ledger.len(), 11);
        assert_eq!(ledger.records()[0].actual, Cell::Value(0.0));
        assert!(ledger.records()[1..]
            .iter()
            .all(|r| r.actual == Cell::Unavailable));
        assert_eq!(ledger.failed_steps(), 10);
    }

    #[test]
    fn test_zero_reference_has_no_relative_error() {
        let ledger = solve("0", 0.0, 0.0, 0.1, 1.0).unwrap();
        for record in &ledger {
            assert_eq!(record.actual, Cell::Value(0.0));
            assert_eq!(record.expected, Cell::Value(0.0));
            assert_eq!(record.abs_error, Cell::Value(0.0));
            assert_eq!(record.rel_error, Cell::NotApplicable);
        }
    }

    #[test]
    fn test_reference_failure_keeps_approximation() {
        // not real for x in (0.05, 0.15), but real on the Euler grid x = 0.2*i
        let ledger = solve("cos(10*pi*x)^0.5", 0.0, 0.0, 0.2, 1.0).unwrap();
        assert_eq!(ledger.len(), 6);
        for (i, record) in ledger.iter().enumerate() {
            assert_relative_eq!(record.actual.value().unwrap(), 0.2 * i as f64, epsilon = 1e-9);
            assert_eq!(record.expected, Cell::Unavailable);
            assert_eq!(record.abs_error, Cell::NotApplicable);
            assert_eq!(record.rel_error, Cell::NotApplicable);
        }
        assert_eq!(ledger.max_abs_error(), None);
    }

    #[test]
    fn test_without_reference() {
        let ledger = solve_with_reference("x + y", 0.0, 1.0, 0.1, 1.0, &NoReference).unwrap();
        assert_eq!(ledger.len(), 11);
        assert!(ledger.iter().all(|r| r.actual.is_value()));
        assert!(ledger.iter().all(|r| r.expected == Cell::Unavailable));
        assert!(ledger.reference_points().is_empty());
    }

    #[test]
    fn test_latex_input() {
        let plain = solve("x*y + 1", 0.0, 1.0, 0.1, 1.0).unwrap();
        let latex = solve("\\frac{dy}{dx} = x \\cdot y + 1", 0.0, 1.0, 0.1, 1.0).unwrap();
        assert_eq!(plain, latex);
    }

    #[test]
    fn test_configuration_errors() {
        let cases = [
            (0.0, 1.0, 0.0, 1.0),
            (0.0, 1.0, -0.1, 1.0),
            (1.0, 1.0, 0.1, 1.0),
            (1.0, 1.0, 0.1, 0.5),
            (f64::NAN, 1.0, 0.1, 1.0),
            (0.0, f64::NAN, 0.1, 1.0),
            (0.0, 1.0, 0.1, f64::INFINITY),
            // 10^12 steps, more than MAX_STEPS
            (0.0, 1.0, 1e-12, 1.0),
        ];
        for (x0, y0, step, target_x) in cases {
            assert!(matches!(
                solve("y", x0, y0, step, target_x),
                Err(EulerError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            solve("dy/dx = ", 0.0, 1.0, 0.1, 1.0),
            Err(EulerError::Parse(ParseError::Empty))
        );
        assert!(matches!(
            solve("sin(x", 0.0, 1.0, 0.1, 1.0),
            Err(EulerError::Parse(ParseError::UnbalancedBrackets(_)))
        ));
        assert!(matches!(
            solve("z + x", 0.0, 1.0, 0.1, 1.0),
            Err(EulerError::Parse(ParseError::UnknownVariable(_)))
        ));
        assert!(matches!(
            solve("y = x", 0.0, 1.0, 0.1, 1.0),
            Err(EulerError::Parse(ParseError::NotAnOde(_)))
        ));
    }

    #[test]
    fn test_table_output() {
        let ledger = solve("1/x", 0.0, 1.0, 0.5, 1.0).unwrap();
        let table = ledger.to_table();
        assert!(table.contains("Expected y"));
        assert!(table.contains("DNE"));
        assert!(table.contains("N/A"));
        assert!(table.contains("1.000000"));
    }
}
