use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

/// compiled expression: arguments are passed in the order of the `vars` slice given to `lambdify`
pub type LambdifiedFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

fn unary(inner: LambdifiedFn, op: fn(f64) -> f64) -> LambdifiedFn {
    Box::new(move |args| op(inner(args)))
}

fn binary(lhs: LambdifiedFn, rhs: LambdifiedFn, op: fn(f64, f64) -> f64) -> LambdifiedFn {
    Box::new(move |args| op(lhs(args), rhs(args)))
}

impl Expr {
    /// LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions
    ///
    /// Recursive structure mirrors the expression tree, no runtime parsing or interpretation.
    /// A variable that is not listed in `vars` is reported as `ParseError::UnknownVariable`.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify(&["x"]).unwrap();
    /// assert_eq!(func(&[3.0]), 9.0);
    /// ```
    pub fn lambdify(&self, vars: &[&str]) -> Result<LambdifiedFn, ParseError> {
        let compiled: LambdifiedFn = match self {
            Expr::Var(name) => {
                let index = vars
                    .iter()
                    .position(|&x| x == name)
                    .ok_or_else(|| ParseError::UnknownVariable(name.clone()))?;
                Box::new(move |args| args[index])
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => binary(lhs.lambdify(vars)?, rhs.lambdify(vars)?, |a, b| a + b),
            Expr::Sub(lhs, rhs) => binary(lhs.lambdify(vars)?, rhs.lambdify(vars)?, |a, b| a - b),
            Expr::Mul(lhs, rhs) => binary(lhs.lambdify(vars)?, rhs.lambdify(vars)?, |a, b| a * b),
            Expr::Div(lhs, rhs) => binary(lhs.lambdify(vars)?, rhs.lambdify(vars)?, |a, b| a / b),
            Expr::Pow(b, e) => binary(b.lambdify(vars)?, e.lambdify(vars)?, f64::powf),
            Expr::Exp(e) => unary(e.lambdify(vars)?, f64::exp),
            Expr::Ln(e) => unary(e.lambdify(vars)?, f64::ln),
            Expr::sin(e) => unary(e.lambdify(vars)?, f64::sin),
            Expr::cos(e) => unary(e.lambdify(vars)?, f64::cos),
            Expr::tg(e) => unary(e.lambdify(vars)?, f64::tan),
            Expr::ctg(e) => unary(e.lambdify(vars)?, |v| 1.0 / v.tan()),
            Expr::arcsin(e) => unary(e.lambdify(vars)?, f64::asin),
            Expr::arccos(e) => unary(e.lambdify(vars)?, f64::acos),
            Expr::arctg(e) => unary(e.lambdify(vars)?, f64::atan),
            Expr::arcctg(e) => unary(e.lambdify(vars)?, |v| PI / 2.0 - v.atan()),
        };
        Ok(compiled)
    } // end of lambdify

    /// Evaluates an expression without variables.
    pub fn eval_const(&self) -> Result<f64, ParseError> {
        let f = self.lambdify(&[])?;
        Ok(f(&[]))
    }
}
