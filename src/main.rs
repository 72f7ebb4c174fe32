#![allow(non_snake_case)]
use emode::Examples::euler_examples::euler_examples;
use emode::numerical::Euler_api::EulerTask;
use std::env;
use std::process::ExitCode;

/// `emode <task file>` solves the task, `emode` alone runs the examples
fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    match args.get(1) {
        Some(path) => {
            let result = EulerTask::from_task_file(path).and_then(|mut task| task.run());
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            let example = 0;
            euler_examples(example);
            ExitCode::SUCCESS
        }
    }
}
