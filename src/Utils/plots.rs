use crate::numerical::Euler::errors::EulerError;
use crate::numerical::Euler::ledger::Ledger;
use plotters::prelude::*;

fn plot_error<E: std::fmt::Display>(err: E) -> EulerError {
    EulerError::Io(format!("plotting failed: {}", err))
}

/// Splits the Euler points into runs of consecutive available values, so that a failed
/// step leaves a gap in the line instead of joining its neighbours.
pub fn approximation_segments(ledger: &Ledger) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for record in ledger.iter() {
        match record.actual.value() {
            Some(y) => current.push((record.x, y)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Axis ranges covering every available value with 5% padding. `None` if there is nothing to draw.
pub fn plot_bounds(ledger: &Ledger) -> Option<((f64, f64), (f64, f64))> {
    let points: Vec<(f64, f64)> = ledger
        .approximation_points()
        .into_iter()
        .chain(ledger.reference_points())
        .collect();
    if points.is_empty() {
        return None;
    }
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in &points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    let pad = |min: f64, max: f64| {
        let width = max - min;
        if width < 1e-12 {
            (min - 1.0, max + 1.0)
        } else {
            (min - 0.05 * width, max + 0.05 * width)
        }
    };
    Some((pad(x_min, x_max), pad(y_min, y_max)))
}

/// Euler approximation (line with circle markers) and reference solution (line) into a PNG.
pub fn plot_ledger(ledger: &Ledger, title: &str, filename: &str) -> Result<(), EulerError> {
    let ((x_min, x_max), (y_min, y_max)) = plot_bounds(ledger)
        .ok_or_else(|| EulerError::Io("nothing to plot: no available values".to_string()))?;

    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .draw()
        .map_err(plot_error)?;

    let reference = ledger.reference_points();
    if !reference.is_empty() {
        chart
            .draw_series(LineSeries::new(reference, &RED))
            .map_err(plot_error)?
            .label("Reference solution")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    }

    for segment in approximation_segments(ledger) {
        chart
            .draw_series(LineSeries::new(segment, &BLUE))
            .map_err(plot_error)?;
    }
    chart
        .draw_series(
            ledger
                .approximation_points()
                .into_iter()
                .map(|point| Circle::new(point, 3, BLUE.filled())),
        )
        .map_err(plot_error)?
        .label("Euler's Method approximation")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)?;
    root_area.present().map_err(plot_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::Euler::ledger::{StepRecord, Trajectory};

    fn ledger_with_gap() -> Ledger {
        Ledger::from_records(vec![
            StepRecord::approximation(0.0, Some(1.0)),
            StepRecord::approximation(0.1, Some(2.0)),
            StepRecord::approximation(0.2, None),
            StepRecord::approximation(0.3, Some(3.0)),
        ])
    }

    #[test]
    fn test_segments_break_at_failed_steps() {
        let segments = approximation_segments(&ledger_with_gap());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(0.0, 1.0), (0.1, 2.0)]);
        assert_eq!(segments[1], vec![(0.3, 3.0)]);
    }

    #[test]
    fn test_plot_bounds() {
        let ledger = ledger_with_gap().with_reference(&Trajectory::new(
            vec![0.0, 0.1, 0.2, 0.3],
            vec![1.0, 2.0, 5.0, 3.0],
        ));
        let ((x_min, x_max), (y_min, y_max)) = plot_bounds(&ledger).unwrap();
        assert!(x_min < 0.0 && x_max > 0.3);
        assert!(y_min < 1.0 && y_max > 5.0);

        let flat = Ledger::from_records(vec![StepRecord::approximation(0.0, Some(2.0))]);
        assert_eq!(plot_bounds(&flat), Some(((-1.0, 1.0), (1.0, 3.0))));

        let nothing = Ledger::from_records(vec![StepRecord::approximation(0.0, None)]);
        assert_eq!(plot_bounds(&nothing), None);
    }
}
