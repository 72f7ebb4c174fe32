/// Euler's method building blocks: classifier, stepper, reference solver, ledger
///  Example
/// ```
/// use emode::numerical::Euler::classifier::{ClassifiedRhs, Signature};
/// use emode::numerical::Euler::stepper::ForwardEuler;
/// let rhs = ClassifiedRhs::from_ode("dy/dx = 2*x").unwrap();
/// assert_eq!(rhs.signature(), Signature::XOnly);
/// let f = rhs.bind();
/// let mut euler = ForwardEuler::new(&*f);
/// euler.set_initial(0.0, 0.0, 0.5);
/// let ledger = euler.sweep(2);
/// assert_eq!(ledger.len(), 3);
/// ```
pub mod Euler;
/// solve(), EulerProblem and the task file driven EulerTask
pub mod Euler_api;
