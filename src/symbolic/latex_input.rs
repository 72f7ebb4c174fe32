//! Math-notation front door of the parser.
//!
//! Users type ODEs the way they write them on paper or in LaTeX: `dy/dx = 2x`,
//! `y' = \frac{x}{y}`, `\frac{dy}{dx} = e^{-x}\cdot\sin(x)`. `normalize` turns such input
//! into the plain infix syntax understood by `parse_expression_func` (`(x)/(y)`,
//! `e^(-x)*sin(x)`), leaving only the right-hand side f(x, y).
use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::utils::find_closing;
use regex::Regex;

fn regex_error(err: regex::Error) -> ParseError {
    ParseError::InvalidToken(err.to_string())
}

/// true for the usual spellings of the first derivative of y with respect to x
fn is_derivative(side: &str) -> bool {
    let compact: String = side
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\\' | '{' | '}'))
        .collect();
    matches!(
        compact.as_str(),
        "dy/dx"
            | "dydx"
            | "fracdydx"
            | "dy(x)/dx"
            | "fracdy(x)dx"
            | "fracddxy"
            | "fracddxy(x)"
            | "y'"
            | "y'(x)"
    )
}

/// Keeps the right-hand side of `dy/dx = f(x, y)` (the derivative may stand on either side).
/// Input without `=` is taken to be f(x, y) itself.
fn strip_derivative(text: &str) -> Result<&str, ParseError> {
    let sides: Vec<&str> = text.split('=').collect();
    match sides.as_slice() {
        [rhs] => Ok(rhs),
        [lhs, rhs] if is_derivative(lhs) => Ok(rhs),
        [lhs, rhs] if is_derivative(rhs) => Ok(lhs),
        _ => Err(ParseError::NotAnOde(text.to_string())),
    }
}

/// Reads a `{...}` group starting at byte `start` (leading whitespace allowed).
/// Returns the group content and the byte position right after the closing brace.
fn brace_group(s: &str, start: usize) -> Result<(String, usize), ParseError> {
    let skipped = s[start..].len() - s[start..].trim_start().len();
    let open = start + skipped;
    let close = find_closing(s, open, '{', '}').ok_or_else(|| {
        ParseError::InvalidToken(format!("expected {{...}} group in '{}'", s))
    })?;
    Ok((s[open + 1..close].to_string(), close + 1))
}

/// `\frac{a}{b}` -> `(a)/(b)`, innermost groups are handled on later passes
fn expand_fractions(s: &str) -> Result<String, ParseError> {
    let mut s = s.replace("\\dfrac", "\\frac").replace("\\tfrac", "\\frac");
    while let Some(pos) = s.find("\\frac") {
        let (numerator, after_num) = brace_group(&s, pos + "\\frac".len())?;
        let (denominator, after_den) = brace_group(&s, after_num)?;
        s = format!(
            "{}({})/({}){}",
            &s[..pos],
            numerator,
            denominator,
            &s[after_den..]
        );
    }
    Ok(s)
}

/// `\sqrt{a}` -> `(a)^(0.5)`, `\sqrt[n]{a}` -> `(a)^(1/(n))`
fn expand_roots(s: &str) -> Result<String, ParseError> {
    let mut s = s.to_string();
    while let Some(pos) = s.find("\\sqrt") {
        let after_name = pos + "\\sqrt".len();
        let (degree, body_start) = if s[after_name..].trim_start().starts_with('[') {
            let skipped = s[after_name..].len() - s[after_name..].trim_start().len();
            let open = after_name + skipped;
            let close = find_closing(&s, open, '[', ']').ok_or_else(|| {
                ParseError::InvalidToken(format!("unclosed root degree in '{}'", s))
            })?;
            (Some(s[open + 1..close].to_string()), close + 1)
        } else {
            (None, after_name)
        };
        let (radicand, after) = brace_group(&s, body_start)?;
        let power = match degree {
            Some(n) => format!("(1/({}))", n),
            None => "(0.5)".to_string(),
        };
        s = format!("{}({})^{}{}", &s[..pos], radicand, power, &s[after..]);
    }
    Ok(s)
}

/// `\sin` -> `sin`, `\pi` -> `pi`; LaTeX spacing commands are dropped
fn strip_commands(s: &str) -> Result<String, ParseError> {
    let spacing = Regex::new(r"\\[,;:! ]").map_err(regex_error)?;
    let command = Regex::new(r"\\([A-Za-z]+)").map_err(regex_error)?;
    let s = spacing.replace_all(s, "");
    Ok(command.replace_all(&s, "$1").into_owned())
}

fn rewrite_latex(s: &str) -> Result<String, ParseError> {
    let s = s
        .replace("\\left", "")
        .replace("\\right", "")
        .replace("\\cdot", "*")
        .replace("\\times", "*")
        .replace("\\div", "/")
        .replace(['·', '×'], "*")
        .replace('÷', "/")
        .replace('−', "-");
    let s = expand_fractions(&s)?;
    let s = expand_roots(&s)?;
    let s = strip_commands(&s)?;
    Ok(s.replace(['{', '['], "(")
        .replace(['}', ']'], ")")
        .replace("**", "^"))
}

/// `e` followed by a digit or a signed digit continues a number written as `1e-3`
fn exponent_follows(chars: &[char], i: usize) -> bool {
    match chars.get(i + 1) {
        Some(c) if c.is_ascii_digit() => true,
        Some('+') | Some('-') => chars.get(i + 2).is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// true when the alphanumeric token ending right before `i` starts with a digit
fn token_is_numeric(chars: &[char], i: usize) -> bool {
    let mut j = i;
    while j > 0 && (chars[j - 1].is_ascii_alphanumeric() || chars[j - 1] == '.') {
        j -= 1;
    }
    chars[j].is_ascii_digit() || chars[j] == '.'
}

fn needs_multiplication(chars: &[char], i: usize) -> bool {
    let prev = chars[i - 1];
    let cur = chars[i];
    if prev == ')' {
        return cur.is_ascii_alphanumeric() || cur == '(' || cur == '.';
    }
    if prev.is_ascii_digit() || prev == '.' {
        if !(cur.is_ascii_alphabetic() || cur == '(') || !token_is_numeric(chars, i) {
            return false;
        }
        return !(matches!(cur, 'e' | 'E') && exponent_follows(chars, i));
    }
    false
}

/// `2x` -> `2*x`, `3(x+1)` -> `3*(x+1)`, `(x+1)(y-1)` -> `(x+1)*(y-1)`
fn insert_implicit_multiplication(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && needs_multiplication(&chars, i) {
            out.push('*');
        }
        out.push(c);
    }
    out
}

const FUNCTION_NAMES: [&str; 20] = [
    "exp", "ln", "log", "sin", "cos", "tg", "tan", "ctg", "cot", "arcsin", "asin", "arccos",
    "acos", "arctg", "atan", "arctan", "arcctg", "acot", "arccot", "sqrt",
];

fn ends_with_function_name(s: &str) -> bool {
    let name_start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    FUNCTION_NAMES.contains(&&s[name_start..])
}

/// Removes whitespace. A gap between two operands means multiplication (`pi x` -> `pi*x`),
/// a gap after a function name means application (`sin x` -> `sin(x)`).
fn collapse_whitespace(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_whitespace() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        i = j;
        let (Some(before), Some(&after)) = (out.chars().last(), chars.get(j)) else {
            continue;
        };
        let left_operand = before.is_ascii_alphanumeric() || before == ')' || before == '.';
        let right_operand = after.is_ascii_alphanumeric() || after == '(' || after == '.';
        if !(left_operand && right_operand) {
            continue;
        }
        if ends_with_function_name(&out) {
            if after.is_ascii_alphanumeric() {
                out.push('(');
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.') {
                    out.push(chars[i]);
                    i += 1;
                }
                out.push(')');
            }
        } else {
            out.push('*');
        }
    }
    out
}

/// Turns a math-notation ODE into the plain right-hand side expression.
pub fn normalize(text: &str) -> Result<String, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let rhs = strip_derivative(text)?;
    let rewritten = rewrite_latex(rhs)?;
    let compact = collapse_whitespace(&rewritten);
    if compact.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(insert_implicit_multiplication(&compact))
}
