use crate::numerical::Euler::ledger::{Ledger, StepRecord};
use log::{debug, warn};

/// ceil((target_x - x0)/step). The last x may overshoot target_x, it is not clamped.
pub fn number_of_steps(x0: f64, target_x: f64, step: f64) -> usize {
    ((target_x - x0) / step).ceil() as usize
}

/// Fixed-step forward Euler: y_{i+1} = y_i + h*f(x_i, y_i).
///
/// A step whose slope (or resulting y) is not finite leaves y unchanged and is reported as
/// unavailable; x still advances, so the next step is attempted from the last good y.
pub struct ForwardEuler<'a> {
    f: &'a dyn Fn(f64, f64) -> f64,
    x0: f64,
    pub x: f64,
    pub y: f64,
    h: f64,
    i: usize,
}

impl<'a> ForwardEuler<'a> {
    pub fn new(f: &'a dyn Fn(f64, f64) -> f64) -> ForwardEuler<'a> {
        ForwardEuler {
            f,
            x0: 0.0,
            x: 0.0,
            y: 0.0,
            h: 0.1,
            i: 0,
        }
    }

    pub fn set_initial(&mut self, x0: f64, y0: f64, h: f64) {
        self.x0 = x0;
        self.x = x0;
        self.y = y0;
        self.h = h;
        self.i = 0;
    }

    /// One Euler step. Returns the new y, or `None` when the step failed.
    pub fn _step_impl(&mut self) -> Option<f64> {
        let slope = (self.f)(self.x, self.y);
        let y_next = self.y + self.h * slope;
        self.i += 1;
        // x_i is recomputed from x0 so that rounding errors do not accumulate
        let x_next = self.x0 + self.i as f64 * self.h;
        let result = if slope.is_finite() && y_next.is_finite() {
            self.y = y_next;
            Some(y_next)
        } else {
            warn!(
                "step {}: slope f({}, {}) = {} is not finite, value at x = {} is unavailable",
                self.i, self.x, self.y, slope, x_next
            );
            None
        };
        self.x = x_next;
        result
    }

    /// Runs `n_steps` steps and returns the n_steps + 1 records, starting with (x0, y0).
    pub fn sweep(&mut self, n_steps: usize) -> Ledger {
        let mut records = Vec::with_capacity(n_steps + 1);
        records.push(StepRecord::approximation(self.x, Some(self.y)));
        for _ in 0..n_steps {
            let y = self._step_impl();
            records.push(StepRecord::approximation(self.x, y));
        }
        debug!(
            "Euler sweep finished: {} steps, last point x = {}, y = {}",
            n_steps, self.x, self.y
        );
        Ledger::from_records(records)
    }
}
