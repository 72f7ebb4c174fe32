//! Function classifier: decides which of `x`, `y` the right-hand side f(x, y) depends on and
//! compiles it into a closure of the matching arity.
//!
//! | variables | signature | evaluator            |
//! |-----------|-----------|----------------------|
//! | x and y   | `XY`      | `Fn(f64, f64) -> f64` |
//! | x only    | `XOnly`   | `Fn(f64) -> f64`      |
//! | y only    | `YOnly`   | `Fn(f64) -> f64`      |
//! | none      | `Const`   | `Fn() -> f64`         |
//!
//! The identifiers `e` and `pi` are constants, every other identifier is an error.
use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use log::info;
use std::f64::consts::{E, PI};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Signature {
    #[strum(serialize = "XY")]
    XY,
    #[strum(serialize = "X_ONLY")]
    XOnly,
    #[strum(serialize = "Y_ONLY")]
    YOnly,
    #[strum(serialize = "CONST")]
    Const,
}

/// Evaluator with exactly the arity of the signature.
pub enum Evaluator {
    XY(Box<dyn Fn(f64, f64) -> f64 + Send + Sync>),
    XOnly(Box<dyn Fn(f64) -> f64 + Send + Sync>),
    YOnly(Box<dyn Fn(f64) -> f64 + Send + Sync>),
    Const(Box<dyn Fn() -> f64 + Send + Sync>),
}

impl Evaluator {
    pub fn signature(&self) -> Signature {
        match self {
            Evaluator::XY(_) => Signature::XY,
            Evaluator::XOnly(_) => Signature::XOnly,
            Evaluator::YOnly(_) => Signature::YOnly,
            Evaluator::Const(_) => Signature::Const,
        }
    }
}

/// Right-hand side after classification.
pub struct ClassifiedRhs {
    expr: Expr,
    evaluator: Evaluator,
}

impl ClassifiedRhs {
    /// Classifies an already parsed expression.
    pub fn classify(expr: &Expr) -> Result<Self, ParseError> {
        let expr = expr.set_variable("e", E).set_variable("pi", PI);
        let vars = expr.all_arguments_are_variables();
        if let Some(unknown) = vars.iter().find(|v| v.as_str() != "x" && v.as_str() != "y") {
            return Err(ParseError::UnknownVariable(unknown.clone()));
        }
        let has_x = expr.contains_variable("x");
        let has_y = expr.contains_variable("y");

        let evaluator = match (has_x, has_y) {
            (true, true) => {
                let f = expr.lambdify(&["x", "y"])?;
                Evaluator::XY(Box::new(move |x, y| f(&[x, y])))
            }
            (true, false) => {
                let f = expr.lambdify(&["x"])?;
                Evaluator::XOnly(Box::new(move |x| f(&[x])))
            }
            (false, true) => {
                let f = expr.lambdify(&["y"])?;
                Evaluator::YOnly(Box::new(move |y| f(&[y])))
            }
            (false, false) => {
                let value = expr.eval_const()?;
                if !value.is_finite() {
                    return Err(ParseError::NotReal(expr.to_string()));
                }
                Evaluator::Const(Box::new(move || value))
            }
        };
        info!(
            "right-hand side {} classified as {}",
            expr,
            evaluator.signature()
        );
        Ok(ClassifiedRhs { expr, evaluator })
    }

    /// Parses math-notation input (`dy/dx = x + y`, `\frac{x}{y}`) and classifies it.
    pub fn from_ode(text: &str) -> Result<Self, ParseError> {
        let expr = Expr::parse_ode(text)?;
        Self::classify(&expr)
    }

    pub fn signature(&self) -> Signature {
        self.evaluator.signature()
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// expression with `e` and `pi` already substituted
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Binds the evaluator to the uniform `(x, y)` calling convention. The signature is
    /// matched here, once, so the step loop never branches on it.
    pub fn bind(&self) -> Box<dyn Fn(f64, f64) -> f64 + Send + Sync + '_> {
        match &self.evaluator {
            Evaluator::XY(f) => Box::new(move |x, y| f(x, y)),
            Evaluator::XOnly(f) => Box::new(move |x, _| f(x)),
            Evaluator::YOnly(f) => Box::new(move |_, y| f(y)),
            Evaluator::Const(f) => {
                let value = f();
                Box::new(move |_, _| value)
            }
        }
    }
}
