/// right-hand side classification: signature and evaluator of matching arity
pub mod classifier;
/// fatal error types of a run
pub mod errors;
/// step records, reference trajectory and the error accountant
pub mod ledger;
/// adaptive Dormand-Prince reference solution
pub mod reference_solver;
/// fixed-step forward Euler sweep
pub mod stepper;

mod Euler_tests;
