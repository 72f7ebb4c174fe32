//! Reference solution used to measure the error of the Euler approximation.
//!
//! `DormandPrince45` is an adaptive embedded Runge-Kutta 5(4) method with local
//! extrapolation (the DOPRI5 tableau). It integrates from the first evaluation point and
//! clamps its step so that it lands exactly on every requested x.
//!
//! A reference solver never fails loudly: whatever goes wrong (a non-finite stage value,
//! step size underflow, step budget exhausted) is logged and an empty trajectory is returned.
use crate::numerical::Euler::ledger::Trajectory;
use itertools::Itertools;
use log::{debug, warn};

pub trait ReferenceSolver {
    /// Solves y' = f(x, y), y(x_span.0) = y0 and samples the solution at `eval_points`
    /// (ascending, inside `x_span`). Returns an empty trajectory on any failure.
    fn integrate(
        &self,
        f: &dyn Fn(f64, f64) -> f64,
        x_span: (f64, f64),
        y0: f64,
        eval_points: &[f64],
    ) -> Trajectory;
}

/// Reference that is never available. The ledger then carries only the approximation.
pub struct NoReference;

impl ReferenceSolver for NoReference {
    fn integrate(
        &self,
        _f: &dyn Fn(f64, f64) -> f64,
        _x_span: (f64, f64),
        _y0: f64,
        _eval_points: &[f64],
    ) -> Trajectory {
        Trajectory::empty()
    }
}

// Butcher tableau of Dormand & Prince (1980)
const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];
const A: [[f64; 6]; 7] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];
/// 5th order weights (the last row of A, the 7th stage is FSAL)
const B: [f64; 7] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];
/// difference between the 5th and the embedded 4th order weights
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DormandPrince45 {
    pub rtol: f64,
    pub atol: f64,
    /// budget of adaptive steps; accepted landings on evaluation points are not counted
    pub max_steps: usize,
    /// initial step, by default 1/100 of the integration span
    pub first_step: Option<f64>,
}

impl Default for DormandPrince45 {
    fn default() -> Self {
        DormandPrince45 {
            rtol: 1e-8,
            atol: 1e-10,
            max_steps: 100_000,
            first_step: None,
        }
    }
}

/// one attempted step: 5th order solution, local error estimate
struct StepAttempt {
    y_new: f64,
    error: f64,
}

impl DormandPrince45 {
    pub fn new(rtol: f64, atol: f64, max_steps: usize) -> Self {
        DormandPrince45 {
            rtol,
            atol,
            max_steps,
            first_step: None,
        }
    }

    fn _step_impl(
        f: &dyn Fn(f64, f64) -> f64,
        x: f64,
        y: f64,
        h: f64,
    ) -> Result<StepAttempt, String> {
        let mut k = [0.0; 7];
        for i in 0..7 {
            let y_stage = y + h * A[i].iter().zip(k.iter()).map(|(a, k)| a * k).sum::<f64>();
            let x_stage = x + C[i] * h;
            k[i] = f(x_stage, y_stage);
            if !k[i].is_finite() {
                return Err(format!(
                    "non-finite right-hand side f({}, {}) = {}",
                    x_stage, y_stage, k[i]
                ));
            }
        }
        let y_new = y + h * B.iter().zip(k.iter()).map(|(b, k)| b * k).sum::<f64>();
        let error = h * E.iter().zip(k.iter()).map(|(e, k)| e * k).sum::<f64>();
        Ok(StepAttempt { y_new, error })
    }

    fn try_integrate(
        &self,
        f: &dyn Fn(f64, f64) -> f64,
        x_span: (f64, f64),
        y0: f64,
        eval_points: &[f64],
    ) -> Result<Trajectory, String> {
        let (x0, x_end) = x_span;
        let span = x_end - x0;
        if !(span > 0.0) || !y0.is_finite() {
            return Err(format!("invalid initial value problem: span {:?}, y0 = {}", x_span, y0));
        }
        if eval_points.iter().tuple_windows().any(|(a, b)| b < a)
            || eval_points
                .iter()
                .any(|&p| p < x0 - 1e-12 * span || p > x_end + 1e-12 * span)
        {
            return Err("evaluation points must be ascending and inside the span".to_string());
        }
        let h_min = 1e-12 * span;
        let mut h = self.first_step.unwrap_or(0.01 * span);
        let mut x = x0;
        let mut y = y0;
        // adaptive steps count against the budget, accepted landings on eval points do not
        let mut adaptive_steps = 0;
        let mut landings = 0;
        let mut ys = Vec::with_capacity(eval_points.len());

        for &target in eval_points {
            while target - x > h_min {
                let landing = h >= target - x;
                let h_try = if landing { target - x } else { h };
                let attempt = Self::_step_impl(f, x, y, h_try)?;
                let scale = self.atol + self.rtol * y.abs().max(attempt.y_new.abs());
                let error_norm = (attempt.error / scale).abs();
                let factor = if error_norm == 0.0 {
                    MAX_FACTOR
                } else {
                    (SAFETY * error_norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
                };
                let accepted = error_norm <= 1.0;
                if landing && accepted {
                    landings += 1;
                } else {
                    adaptive_steps += 1;
                    if adaptive_steps > self.max_steps {
                        return Err(format!(
                            "step budget of {} exhausted at x = {}",
                            self.max_steps, x
                        ));
                    }
                }
                if accepted {
                    x = if landing { target } else { x + h_try };
                    y = attempt.y_new;
                    // a step shortened to land on a point does not limit the next one
                    h = if landing { h.max(h_try * factor) } else { h_try * factor };
                } else {
                    h = h_try * factor.min(1.0);
                    if h < h_min {
                        return Err(format!("step size underflow at x = {}", x));
                    }
                }
            }
            ys.push(y);
        }
        debug!(
            "reference solution computed in {} adaptive steps and {} landings",
            adaptive_steps, landings
        );
        Ok(Trajectory::new(eval_points.to_vec(), ys))
    }
}

impl ReferenceSolver for DormandPrince45 {
    fn integrate(
        &self,
        f: &dyn Fn(f64, f64) -> f64,
        x_span: (f64, f64),
        y0: f64,
        eval_points: &[f64],
    ) -> Trajectory {
        match self.try_integrate(f, x_span, y0, eval_points) {
            Ok(trajectory) => trajectory,
            Err(msg) => {
                warn!("reference solution is not available: {}", msg);
                Trajectory::empty()
            }
        }
    }
}
