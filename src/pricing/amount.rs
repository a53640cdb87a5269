//! Amount parsing for numeric form fields.
//!
//! Every numeric field the dashboard submits (size, rate, taxes, paid amount)
//! goes through [`parse_amount`] before it reaches any calculation. Invalid
//! or missing input is treated as zero, never as an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Parse free-text input into a non-negative amount.
///
/// Empty, missing and non-numeric input yields zero. A leading numeric prefix
/// is accepted (`"1200abc"` parses as `1200`), exponent notation is honoured
/// (`"1.2e3"` parses as `1200`) and negative values clamp to zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use buildercon_web::pricing::parse_amount;
///
/// assert_eq!(parse_amount(Some("1200")), dec!(1200));
/// assert_eq!(parse_amount(Some("abc")), dec!(0));
/// assert_eq!(parse_amount(None), dec!(0));
/// ```
pub fn parse_amount(input: Option<&str>) -> Decimal {
    let Some(text) = input else {
        return Decimal::ZERO;
    };

    let (negative, digits) = numeric_prefix(text.trim());
    if negative || digits.is_empty() {
        return Decimal::ZERO;
    }

    let digits = if digits.starts_with('.') {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let parsed = if digits.contains(['e', 'E']) {
        Decimal::from_scientific(&digits)
    } else {
        Decimal::from_str(&digits)
    };

    parsed
        .map(|value| value.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

/// Split off the sign and return the longest `digits[.digits][e[+-]digits]` prefix.
fn numeric_prefix(text: &str) -> (bool, &str) {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in body.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    if !seen_digit {
        return (negative, "");
    }
    (negative, &body[..end + exponent_len(&body[end..])])
}

/// Length of a complete `e[+-]digits` suffix at the start of `rest`, else 0.
fn exponent_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = bytes[1 + sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        0
    } else {
        1 + sign + digits
    }
}

/// Convert a loosely-typed JSON value (string, number or null) into an amount.
pub fn amount_from_value(value: &Value) -> Decimal {
    match value {
        Value::String(s) => parse_amount(Some(s.as_str())),
        Value::Number(n) => {
            let amount = if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                n.as_f64()
                    .and_then(|f| Decimal::try_from(f).ok())
                    .unwrap_or(Decimal::ZERO)
            };
            amount.max(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

/// Serde adapter: deserialize a form field into an amount, zero when absent.
///
/// Use together with `#[serde(default)]` so a missing key also yields zero.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(amount_from_value).unwrap_or(Decimal::ZERO))
}

/// Serde adapter for fields where "not supplied" matters (null or blank).
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(other) => Some(amount_from_value(&other)),
    })
}
