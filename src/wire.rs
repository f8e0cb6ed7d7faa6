//! Number formatting shared by the request payload and the CSV export.
//!
//! The scoring service and downstream spreadsheets expect numbers shaped the
//! way a browser prints them: integral values carry no fractional part, and
//! plain decimal notation is used unless the magnitude is below `1e-6` or at
//! least `1e21`.

use serde::Serializer;
use serde_json::Number;

/// Integers up to this magnitude are exactly representable in an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn as_safe_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}

/// Render a JSON number the way `JSON.stringify` does.
pub(crate) fn format_number(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => format_float(value),
        _ => number.to_string(),
    }
}

/// Shortest round-trip digits laid out with the browser's notation rules.
fn format_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;
    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if n > 0 { "+" } else { "-" };
        let exp = (n - 1).abs();
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{exp}")
        } else {
            format!("{lead}.{rest}e{exp_sign}{exp}")
        }
    };
    format!("{sign}{body}")
}

pub(crate) fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match as_safe_integer(*value) {
        Some(int) => serializer.serialize_i64(int),
        None => serializer.serialize_f64(*value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(serde::Serialize)]
    struct Wrapped(#[serde(serialize_with = "serialize_number")] f64);

    fn number_value(value: f64) -> Value {
        serde_json::to_value(Wrapped(value)).unwrap()
    }

    #[test]
    fn integral_floats_lose_fraction() {
        assert_eq!(number_value(12.0), Value::from(12));
        assert_eq!(number_value(-0.0), Value::from(0));
        let n = Number::from_f64(500000.0).unwrap();
        assert_eq!(format_number(&n), "500000");
    }

    #[test]
    fn fractional_values_keep_shortest_form() {
        assert_eq!(number_value(0.15).to_string(), "0.15");
        let n = Number::from_f64(0.734).unwrap();
        assert_eq!(format_number(&n), "0.734");
        assert_eq!(format_number(&Number::from(7u64)), "7");
    }

    fn float_text(value: f64) -> String {
        format_number(&Number::from_f64(value).unwrap())
    }

    #[test]
    fn small_values_stay_decimal_down_to_one_millionth() {
        assert_eq!(float_text(0.000001), "0.000001");
        assert_eq!(float_text(0.0000015), "0.0000015");
        assert_eq!(float_text(1e-7), "1e-7");
        assert_eq!(float_text(-2.5e-8), "-2.5e-8");
    }

    #[test]
    fn large_values_switch_to_exponent_at_1e21() {
        assert_eq!(float_text(1e20), "100000000000000000000");
        assert_eq!(float_text(1e21), "1e+21");
        assert_eq!(float_text(1.5e300), "1.5e+300");
        assert_eq!(float_text(-123.456), "-123.456");
        assert_eq!(float_text(-0.0), "0");
    }
}
