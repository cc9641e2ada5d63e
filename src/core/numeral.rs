use serde::{Deserialize, Serialize};

/// Myanmar digits zero through nine, indexed by their value
const MYANMAR_DIGITS: [char; 10] = ['၀', '၁', '၂', '၃', '၄', '၅', '၆', '၇', '၈', '၉'];

/// Roll number as submitted by a client: text in either numeral system, or a JSON number
///
/// Integral JSON numbers land in `Integer` so they stay exact; `Number` only
/// sees fractional or out-of-range values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RollNumberInput {
    Text(String),
    Integer(i64),
    Number(f64),
    Other(serde_json::Value),
}

impl From<&str> for RollNumberInput {
    fn from(value: &str) -> Self {
        RollNumberInput::Text(value.to_string())
    }
}

impl From<i64> for RollNumberInput {
    fn from(value: i64) -> Self {
        RollNumberInput::Integer(value)
    }
}

/// Resolve a submitted roll number to the integer used as a lookup key
///
/// Never fails: input that cannot be read as an integer resolves to 0.
pub fn normalize_roll_number(input: &RollNumberInput) -> i64 {
    match input {
        RollNumberInput::Text(text) => normalize_roll_text(text),
        RollNumberInput::Integer(n) => *n,
        RollNumberInput::Number(n) => truncate_number(*n),
        RollNumberInput::Other(_) => 0,
    }
}

/// Truncate toward zero; values that are not finite or fall outside i64 resolve to 0
fn truncate_number(n: f64) -> i64 {
    let truncated = n.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        truncated as i64
    } else {
        0
    }
}

/// Replace Myanmar digits with ASCII digits, then read the leading integer
pub fn normalize_roll_text(text: &str) -> i64 {
    parse_int_prefix(&to_ascii_digits(text))
}

/// Map each Myanmar digit to its ASCII equivalent, leaving every other character as is
pub fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match MYANMAR_DIGITS.iter().position(|&d| d == c) {
            Some(value) => char::from(b'0' + value as u8),
            None => c,
        })
        .collect()
}

/// Parse the leading base-10 integer of `text`, ignoring anything after the digits
///
/// Leading whitespace and a single sign are accepted. Returns 0 when no digits
/// are present or the value does not fit in an i64.
pub fn parse_int_prefix(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    match rest[..end].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_myanmar_digits_convert() {
        assert_eq!(normalize_roll_text("၁၂၃"), 123);
        assert_eq!(normalize_roll_text("၀၉၈၇၆၅၄"), 987654);
    }

    #[test]
    fn test_ascii_digits_untouched() {
        assert_eq!(normalize_roll_text("123"), 123);
        assert_eq!(normalize_roll_text("007"), 7);
    }

    #[test]
    fn test_mixed_scripts() {
        assert_eq!(normalize_roll_text("1၂3"), 123);
        assert_eq!(to_ascii_digits("A-၄၅"), "A-45");
    }

    #[test]
    fn test_unparseable_text_is_zero() {
        assert_eq!(normalize_roll_text(""), 0);
        assert_eq!(normalize_roll_text("   "), 0);
        assert_eq!(normalize_roll_text("abc"), 0);
        assert_eq!(normalize_roll_text("-"), 0);
        assert_eq!(normalize_roll_text("99999999999999999999999"), 0);
    }

    #[test]
    fn test_integer_prefix_semantics() {
        assert_eq!(normalize_roll_text("  42"), 42);
        assert_eq!(normalize_roll_text("42abc"), 42);
        assert_eq!(normalize_roll_text("၄၂ ၁"), 42);
        assert_eq!(normalize_roll_text("-15"), -15);
        assert_eq!(normalize_roll_text("+15"), 15);
    }

    #[test]
    fn test_numeric_input() {
        assert_eq!(normalize_roll_number(&RollNumberInput::from(512)), 512);
        assert_eq!(normalize_roll_number(&RollNumberInput::Number(12.9)), 12);
        assert_eq!(normalize_roll_number(&RollNumberInput::Number(f64::NAN)), 0);
        assert_eq!(normalize_roll_number(&RollNumberInput::Number(f64::INFINITY)), 0);
    }

    #[test]
    fn test_deserialize_any_json_value() {
        let text: RollNumberInput = serde_json::from_str(r#""၁၀၁""#).unwrap();
        let number: RollNumberInput = serde_json::from_str("101").unwrap();
        let other: RollNumberInput = serde_json::from_str("true").unwrap();
        let null: RollNumberInput = serde_json::from_str("null").unwrap();

        assert_eq!(normalize_roll_number(&text), 101);
        assert_eq!(normalize_roll_number(&number), 101);
        assert_eq!(normalize_roll_number(&other), 0);
        assert_eq!(normalize_roll_number(&null), 0);
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let above_f64_precision = (1i64 << 53) + 1;
        let input: RollNumberInput = serde_json::from_str(&above_f64_precision.to_string()).unwrap();

        assert_eq!(input, RollNumberInput::Integer(above_f64_precision));
        assert_eq!(normalize_roll_number(&input), above_f64_precision);

        let max: RollNumberInput = serde_json::from_str(&i64::MAX.to_string()).unwrap();
        assert_eq!(normalize_roll_number(&max), i64::MAX);
    }

    #[test]
    fn test_out_of_range_numbers_are_zero() {
        let huge: RollNumberInput = serde_json::from_str("1e30").unwrap();
        assert_eq!(normalize_roll_number(&huge), 0);
        assert_eq!(normalize_roll_number(&RollNumberInput::Number(-1e300)), 0);

        let fractional: RollNumberInput = serde_json::from_str("-7.8").unwrap();
        assert_eq!(normalize_roll_number(&fractional), -7);
    }
}
