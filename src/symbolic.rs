#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use emode::symbolic::symbolic_engine::Expr;
/// let input = "x^2.3*ln(x+y+y^2.6)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let parsed_function = parsed_expression.lambdify(&["x", "y"]).unwrap();
/// println!("{}, Rust function: {}  \n", input, parsed_function(&[1.0, 2.0]));
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree every right-hand side is parsed into
/// 2) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use emode::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_ode("dy/dx = exp(x) + ln(y)").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// // return vec of all arguments
/// let all = parsed_expression.all_arguments_are_variables();
/// assert_eq!(all, vec!["x".to_string(), "y".to_string()]);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// turns a symbolic expression into a thread-safe Rust closure
pub mod symbolic_lambdify;
/// rewrites math notation (`dy/dx = 2x`, `\frac{x}{y}`, `e^{-x}`) into plain infix syntax
pub mod latex_input;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions mainly for bracket parsing and proceeding
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
