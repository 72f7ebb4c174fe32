//! examples of usage of emode
/// Euler's method examples
pub mod euler_examples;
