//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use emode::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("x^2.3*ln(x+y+y^2.6)").unwrap();
//! let f = parsed_expression.lambdify(&["x", "y"]).unwrap();
//! assert!(f(&[1.0, 2.0]).is_finite());
//! ```
use crate::symbolic::latex_input::normalize;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    brackets_are_balanced, find_char_positions_outside_brackets, find_pair_to_this_bracket,
    find_rightmost_operator_outside_brackets,
};
use log::trace;
use std::fmt;
//                  search recursion diagram
//                "y^2+exp(x)+ln(x)/y-x^2.3"        |
//                |       left  | right             |
//                |_________________________________|
//                |   split by rightmost + or -     |
//                |_________________________________|
//                | y^2+exp(x)+ln(x)/y | x^2.3      |
//                |       |            |   |        |
//                |______\|/___________|__\|/_______|
//                |  split by +   | split by ^      |
//                |_______________|_________________|
//                  etc...

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Empty,
    UnbalancedBrackets(String),
    InvalidToken(String),
    UnknownVariable(String),
    NotAnOde(String),
    NotReal(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Empty expression"),
            ParseError::UnbalancedBrackets(input) => {
                write!(f, "Unbalanced brackets in expression: {}", input)
            }
            ParseError::InvalidToken(token) => write!(f, "Invalid token: {}", token),
            ParseError::UnknownVariable(var) => write!(
                f,
                "Expression cannot be classified: unknown variable '{}' (only x and y are allowed)",
                var
            ),
            ParseError::NotAnOde(input) => write!(
                f,
                "Input is not a first-order ODE of the form dy/dx = f(x, y): {}",
                input
            ),
            ParseError::NotReal(input) => {
                write!(f, "Constant expression is not a finite real number: {}", input)
            }
        }
    }
}

impl std::error::Error for ParseError {}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_number(input: &str) -> bool {
    input.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

fn apply_function(name: &str, arg: Expr) -> Result<Expr, ParseError> {
    let expr = match name {
        "exp" => Expr::Exp(arg.boxed()),
        "ln" | "log" => Expr::Ln(arg.boxed()),
        "sin" => Expr::sin(arg.boxed()),
        "cos" => Expr::cos(arg.boxed()),
        "tg" | "tan" => Expr::tg(arg.boxed()),
        "ctg" | "cot" => Expr::ctg(arg.boxed()),
        "arcsin" | "asin" => Expr::arcsin(arg.boxed()),
        "arccos" | "acos" => Expr::arccos(arg.boxed()),
        "arctg" | "atan" | "arctan" => Expr::arctg(arg.boxed()),
        "arcctg" | "acot" | "arccot" => Expr::arcctg(arg.boxed()),
        "sqrt" => arg.pow(Expr::Const(0.5)),
        _ => {
            return Err(ParseError::InvalidToken(format!(
                "unknown function '{}'",
                name
            )));
        }
    };
    Ok(expr)
}

fn binary(op: char, left: Expr, right: Expr) -> Expr {
    match op {
        '+' => left + right,
        '-' => left - right,
        '*' => left * right,
        _ => left / right,
    }
}

/// Parses a plain infix expression (`x^2 + sin(y)/3`) into an `Expr` tree.
///
/// Precedence, from the loosest: binary `+ -` (left associative, split at the rightmost),
/// `* /` (split at the rightmost), unary minus, `^` (right associative, split at the
/// first), then function calls, bracketed groups, numbers and identifiers.
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    if !brackets_are_balanced(input) {
        return Err(ParseError::UnbalancedBrackets(input.to_string()));
    }
    parse_node(input)
}

fn parse_node(input: &str) -> Result<Expr, ParseError> {
    let input = input.trim();
    trace!("parsing node: {}", input);
    if input.is_empty() {
        return Err(ParseError::InvalidToken(
            "missing operand".to_string(),
        ));
    }

    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['+', '-']) {
        let left = parse_node(&input[..pos])?;
        let right = parse_node(&input[pos + 1..])?;
        return Ok(binary(op, left, right));
    }

    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = parse_node(&input[..pos])?;
        let right = parse_node(&input[pos + 1..])?;
        return Ok(binary(op, left, right));
    }

    if let Some(rest) = input.strip_prefix('-') {
        return Ok(-parse_node(rest)?);
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_node(rest);
    }

    if let Some(pos) = find_char_positions_outside_brackets(input, '^') {
        let base = parse_node(&input[..pos])?;
        let exponent = parse_node(&input[pos + 1..])?;
        return Ok(base.pow(exponent));
    }

    if let Some(open) = input.find('(') {
        if input.ends_with(')') && find_pair_to_this_bracket(input, open) == Some(input.len() - 1)
        {
            let inner = parse_node(&input[open + 1..input.len() - 1])?;
            let name = input[..open].trim();
            if name.is_empty() {
                return Ok(inner);
            }
            return apply_function(name, inner);
        }
        return Err(ParseError::InvalidToken(input.to_string()));
    }

    if is_number(input) {
        return input
            .parse::<f64>()
            .map(Expr::Const)
            .map_err(|_| ParseError::InvalidToken(input.to_string()));
    }

    if is_identifier(input) {
        return Ok(Expr::Var(input.to_string()));
    }

    Err(ParseError::InvalidToken(input.to_string()))
}

impl Expr {
    /// Parses a plain infix expression, see `parse_expression_func`.
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        parse_expression_func(input)
    }

    /// Parses the right-hand side of an ODE written in math notation: a leading `dy/dx =`
    /// (or `y' =`, `\frac{dy}{dx} =`) is removed and LaTeX commands are rewritten before parsing.
    pub fn parse_ode(text: &str) -> Result<Expr, ParseError> {
        let plain = normalize(text)?;
        trace!("normalized input '{}' into '{}'", text, plain);
        parse_expression_func(&plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    #[test]
    fn test_parse_addition_is_left_associative() {
        let parsed = parse_expression_func("x - y + 2").unwrap();
        let expected = (var("x") - var("y")) + Expr::Const(2.0);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_precedence() {
        let parsed = parse_expression_func("x + y*2").unwrap();
        let expected = var("x") + var("y") * Expr::Const(2.0);
        assert_eq!(parsed, expected);

        let parsed = parse_expression_func("x/y/2").unwrap();
        let expected = (var("x") / var("y")) / Expr::Const(2.0);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_power_is_right_associative() {
        let parsed = parse_expression_func("x^2^3").unwrap();
        let expected = var("x").pow(Expr::Const(2.0).pow(Expr::Const(3.0)));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_unary_minus() {
        let parsed = parse_expression_func("-x^2").unwrap();
        assert_eq!(parsed, -(var("x").pow(Expr::Const(2.0))));

        let parsed = parse_expression_func("2*-y").unwrap();
        assert_eq!(parsed, Expr::Const(2.0) * -var("y"));

        let parsed = parse_expression_func("x^-1").unwrap();
        assert_eq!(parsed, var("x").pow(-Expr::Const(1.0)));
    }

    #[test]
    fn test_parse_functions() {
        let parsed = parse_expression_func("exp(x) + ln(y)").unwrap();
        assert_eq!(parsed, var("x").exp() + var("y").ln());

        let parsed = parse_expression_func("sqrt(x)").unwrap();
        assert_eq!(parsed, var("x").pow(Expr::Const(0.5)));

        let parsed = parse_expression_func("tan(x*(y+1))").unwrap();
        assert_eq!(
            parsed,
            Expr::tg((var("x") * (var("y") + Expr::Const(1.0))).boxed())
        );
    }

    #[test]
    fn test_parse_scientific_notation() {
        let parsed = parse_expression_func("1e-3*x").unwrap();
        assert_eq!(parsed, Expr::Const(1e-3) * var("x"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_expression_func("  "), Err(ParseError::Empty));
        assert!(matches!(
            parse_expression_func("(x+y"),
            Err(ParseError::UnbalancedBrackets(_))
        ));
        assert!(matches!(
            parse_expression_func("x+"),
            Err(ParseError::InvalidToken(_))
        ));
        assert!(matches!(
            parse_expression_func("foo(x)"),
            Err(ParseError::InvalidToken(_))
        ));
        assert!(matches!(
            parse_expression_func("x$y"),
            Err(ParseError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_parse_ode_strips_derivative() {
        let parsed = Expr::parse_ode("dy/dx = x + y").unwrap();
        assert_eq!(parsed, var("x") + var("y"));
        let parsed = Expr::parse_ode("y' = 2x").unwrap();
        assert_eq!(parsed, Expr::Const(2.0) * var("x"));
    }
}
