use crate::numerical::Euler::classifier::ClassifiedRhs;
use crate::numerical::Euler::reference_solver::NoReference;
use crate::numerical::Euler_api::{EulerProblem, EulerTask, solve, solve_many, solve_with_reference};

pub fn euler_examples(example: usize) {
    match example {
        0 => {
            // the shortest way: expression, x0, y0, step, target x
            match solve("dy/dx = y", 0.0, 1.0, 0.1, 1.0) {
                Ok(ledger) => println!("{}", ledger.to_table()),
                Err(e) => println!("{}", e),
            }
        }
        1 => {
            // LaTeX input, result saved and plotted
            let problem = EulerProblem::new("\\frac{dy}{dx} = \\sin{x} \\cdot y", 0.0, 1.0, 0.05, 3.0);
            let mut task = EulerTask::new(problem);
            task.set_csv_path(Some("euler_sin.csv".to_string()));
            task.set_plot_path(Some("euler_sin.png".to_string()));
            if let Err(e) = task.run() {
                println!("{}", e);
            }
        }
        2 => {
            // the slope is infinite at x = 0: the first step is unavailable, the rest goes on
            match solve("1/x", 0.0, 1.0, 0.25, 2.0) {
                Ok(ledger) => {
                    println!("{}", ledger.to_table());
                    println!("failed steps: {}", ledger.failed_steps());
                }
                Err(e) => println!("{}", e),
            }
        }
        3 => {
            // no reference: only the approximation
            match solve_with_reference("x^2 - y", 0.0, 1.0, 0.1, 1.0, &NoReference) {
                Ok(ledger) => println!("{}", ledger.to_table()),
                Err(e) => println!("{}", e),
            }
        }
        4 => {
            // classification of right-hand sides
            for text in ["x + y", "exp(x)", "y'=y^2", "2*pi"] {
                match ClassifiedRhs::from_ode(text) {
                    Ok(rhs) => println!("{:<10} -> {} ({})", text, rhs.signature(), rhs.expr()),
                    Err(e) => println!("{:<10} -> {}", text, e),
                }
            }
        }
        5 => {
            // convergence: the error at x = 1 halves with the step
            let problems: Vec<EulerProblem> = [0.1, 0.05, 0.025, 0.0125]
                .iter()
                .map(|&h| EulerProblem::new("y", 0.0, 1.0, h, 1.0))
                .collect();
            for (problem, result) in problems.iter().zip(solve_many(&problems)) {
                match result {
                    Ok(ledger) => println!(
                        "step {:<8} error at x = 1: {:?}",
                        problem.step,
                        ledger.records().last().and_then(|r| r.abs_error.value())
                    ),
                    Err(e) => println!("{}", e),
                }
            }
        }
        _ => {
            println!("no such example: {}", example);
        }
    }
}
