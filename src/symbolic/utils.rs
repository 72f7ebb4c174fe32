// the collection of utility functions mainly for bracket parsing and proceeding

/// true when every `(` has its `)` and no `)` closes before it is opened
pub fn brackets_are_balanced(s: &str) -> bool {
    let mut depth: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// byte position of the bracket closing the one opened at byte position `start`
pub fn find_pair_to_this_bracket(input: &str, start: usize) -> Option<usize> {
    find_closing(input, start, '(', ')')
}

/// generic version of `find_pair_to_this_bracket` for any pair of delimiters, e.g. `{` `}`
pub fn find_closing(input: &str, start: usize, open: char, close: char) -> Option<usize> {
    if !input[start..].starts_with(open) {
        return None;
    }
    let mut depth = 0;
    for (i, c) in input[start..].char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(start + i);
            }
        }
    }
    None
}

/// first byte position of `target_char` at bracket depth zero
pub fn find_char_positions_outside_brackets(input: &str, target_char: char) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && c == target_char => return Some(i),
            _ => {}
        }
    }
    None
}

/// A `+`/`-` is a sign (not a binary operator) when nothing stands before it, when it follows
/// another operator or an opening bracket, or when it is the exponent sign of a number like `1e-3`.
fn is_sign(input: &str, pos: usize) -> bool {
    let before = input[..pos].trim_end();
    let Some(prev) = before.chars().last() else {
        return true;
    };
    if matches!(prev, '+' | '-' | '*' | '/' | '^' | '(') {
        return true;
    }
    if matches!(prev, 'e' | 'E') {
        // the token ending with `e` is a number mantissa only if it starts with a digit
        let token_start = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '.')
            .last()
            .map(|(i, _)| i)
            .unwrap_or(before.len());
        let token = &before[token_start..];
        let mantissa = &token[..token.len() - 1];
        return !mantissa.is_empty()
            && mantissa.chars().all(|c| c.is_ascii_digit() || c == '.')
            && mantissa.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    }
    false
}

/// Rightmost occurrence of one of `operators` at bracket depth zero. Signs (unary `+`/`-`
/// and exponent signs) are skipped so that only binary operators split an expression.
pub fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let mut depth = 0;
    let mut last_op = None;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && operators.contains(&c) => {
                if (c == '+' || c == '-') && is_sign(input, i) {
                    continue;
                }
                last_op = Some((i, c));
            }
            _ => {}
        }
    }
    last_op
}
