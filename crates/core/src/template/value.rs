//! Value expressions (`operand | filter: arg, arg`) and literal classification.

use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::model::{FilterCall, Token, ValueExpression};

const KEYWORD_LITERALS: &[&str] = &["true", "false", "nil", "null", "empty", "blank"];

/// Whether `token` is a constant value rather than a variable reference.
///
/// Literals are quoted strings, numbers (`3`, `-2`, `1.5`, `1.`, `.5`), the
/// keyword constants (`true`, `false`, `nil`, `null`, `empty`, `blank`, in any
/// case) and ranges such as `(1..5)`.
pub fn is_literal(token: &str) -> bool {
    let token = token.trim();
    is_quoted(token)
        || is_number(token)
        || KEYWORD_LITERALS.iter().any(|keyword| keyword.eq_ignore_ascii_case(token))
        || is_range(token)
}

fn is_quoted(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 2
        && matches!(bytes[0], b'"' | b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
}

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_number(token: &str) -> bool {
    if let Some(fraction) = token.strip_prefix('.') {
        return all_digits(fraction);
    }
    let digits = token.strip_prefix('-').unwrap_or(token);
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    all_digits(whole) && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn is_range(token: &str) -> bool {
    token.starts_with('(') && token.ends_with(')') && token.contains("..")
}

/// Variable references: `name`, `2nd_fee`, `name.prop`, `rows[0]`, `map["key"]`, `ok?`.
fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() || first == '_' || first == '[' => {}
        _ => return false,
    }
    chars.all(is_identifier_char)
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || "_-.[]?'\"".contains(c)
}

/// The value token an operand starts with, e.g. `y` in `y + z`.
fn leading_token(operand: &str) -> &str {
    let end = match operand.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            operand[1..].find(quote).map_or(operand.len(), |idx| idx + 2)
        }
        Some('(') => operand.find(')').map_or(operand.len(), |idx| idx + 1),
        _ => operand.find(|c: char| !is_identifier_char(c)).unwrap_or(operand.len()),
    };
    &operand[..end]
}

pub(crate) fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Parse the right-hand side of an assignment.
pub fn parse_value(expression: &str, line: usize) -> ParseResult<ValueExpression> {
    let invalid = |reason: &str| ParseError::InvalidExpression {
        line,
        expression: expression.to_string(),
        reason: reason.to_string(),
    };

    let segments =
        split_outside_quotes(expression, '|').ok_or_else(|| invalid("unterminated string"))?;
    let (initial, filters) = segments.split_first().ok_or_else(|| invalid("missing operand"))?;

    let initial = initial.trim();
    if initial.is_empty() {
        return Err(invalid("missing operand"));
    }
    // Text after the first value token (`y + z`) is ignored, as Liquid does.
    let initial = match classify(initial) {
        Some(token) => token,
        None => {
            let lead = leading_token(initial);
            let token =
                classify(lead).ok_or_else(|| invalid("operand is not a literal or identifier"))?;
            debug!(line, operand = initial, kept = lead, "ignoring trailing operand text");
            token
        }
    };

    let filters = filters
        .iter()
        .map(|segment| parse_filter(segment.trim()).map_err(|reason| invalid(reason)))
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(ValueExpression { initial, filters })
}

fn parse_filter(segment: &str) -> Result<FilterCall, &'static str> {
    if segment.is_empty() {
        return Err("empty filter");
    }
    let (name, args) = match find_outside_quotes(segment, ':') {
        Some(idx) => (segment[..idx].trim(), Some(&segment[idx + 1..])),
        None => (segment, None),
    };
    if !is_plain_name(name) {
        return Err("invalid filter name");
    }

    let mut tokens = Vec::new();
    if let Some(args) = args {
        for arg in split_outside_quotes(args, ',').ok_or("unterminated string")? {
            let arg = arg.trim();
            // `key: value` named arguments contribute their value.
            let value = match find_outside_quotes(arg, ':') {
                Some(idx) => arg[idx + 1..].trim(),
                None => arg,
            };
            if value.is_empty() {
                return Err("empty filter argument");
            }
            tokens.push(classify(value).ok_or("filter argument is not a literal or identifier")?);
        }
    }

    Ok(FilterCall { name: name.to_string(), args: tokens })
}

fn classify(text: &str) -> Option<Token> {
    if is_literal(text) {
        Some(Token::Literal(text.to_string()))
    } else if is_identifier(text) {
        Some(Token::Identifier(text.to_string()))
    } else {
        None
    }
}

fn find_outside_quotes(text: &str, needle: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == needle => return Some(idx),
            None => {}
        }
    }
    None
}

/// Split on `separator`, ignoring separators inside quotes. `None` on an unterminated quote.
fn split_outside_quotes(text: &str, separator: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == separator => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            None => {}
        }
    }
    if quote.is_some() {
        return None;
    }
    parts.push(&text[start..]);
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_literals() {
        for literal in [
            "1", "-2", "100.00", "1.", ".5", "'x'", "\"a | b\"", "true", "TRUE", "False", "Nil",
            "empty", "(1..5)",
        ] {
            assert!(is_literal(literal), "{literal} should be a literal");
        }
        for identifier in ["a", "seats.count", "rows[0]", "2nd_fee", "-x", "-.5", "truthy"] {
            assert!(!is_literal(identifier), "{identifier} should not be a literal");
        }
    }

    #[test]
    fn pipes_inside_strings_do_not_split_filters() {
        let value = parse_value("a | append: \"x | y\", b", 1).unwrap();
        assert_eq!(value.filters.len(), 1);
        assert_eq!(
            value.filters[0].args,
            vec![Token::Literal("\"x | y\"".into()), Token::Identifier("b".into())]
        );
    }

    #[test]
    fn named_arguments_contribute_their_value() {
        let value = parse_value("price | money: currency: code", 1).unwrap();
        assert_eq!(value.filters[0].name, "money");
        assert_eq!(value.filters[0].args, vec![Token::Identifier("code".into())]);
    }

    #[test]
    fn operand_keeps_its_leading_token() {
        let value = parse_value("y + z | times: 2", 1).unwrap();
        assert_eq!(value.initial, Token::Identifier("y".into()));
        assert_eq!(value.filters[0].args, vec![Token::Literal("2".into())]);

        let value = parse_value("'a' + b", 1).unwrap();
        assert_eq!(value.initial, Token::Literal("'a'".into()));
    }

    #[test]
    fn identifiers_may_start_with_a_digit() {
        let value = parse_value("2nd_fee | plus: .5", 1).unwrap();
        assert_eq!(value.initial, Token::Identifier("2nd_fee".into()));
        assert_eq!(value.filters[0].args, vec![Token::Literal(".5".into())]);
    }

    #[test]
    fn rejects_malformed_expressions() {
        for bad in ["", " | times: 2", "+ b", "a | ", "a | times: 'x", "a | times: 2,"] {
            assert!(
                matches!(parse_value(bad, 3), Err(ParseError::InvalidExpression { line: 3, .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
