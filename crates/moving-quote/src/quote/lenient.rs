//! Tolerant field decoders for form-sourced requests.
//!
//! Numeric fields accept numbers or numeric strings. Anything malformed decodes to the
//! field's zero value instead of failing the whole request.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-negative integer; fractions truncate, negatives and garbage become 0.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(to_f64(&value)
        .filter(|number| *number >= 0.0)
        .map(|number| number.trunc().min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

/// Signed currency amount.
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(exact) = to_i64(&value) {
        return Ok(exact);
    }
    Ok(to_f64(&value)
        .map(|number| number.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
        .unwrap_or(0))
}

/// Non-negative decimal measure such as tonnage.
pub(crate) fn measure<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(to_f64(&value).filter(|number| *number >= 0.0).unwrap_or(0.0))
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "on"
        ),
        _ => false,
    })
}

/// Free text that may arrive as a number, e.g. a floor entered as `5` instead of `"5"`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Number(number) => number
            .as_i64()
            .map(|whole| whole.to_string())
            .unwrap_or_else(|| number.to_string()),
        _ => String::new(),
    })
}

fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn to_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "super::count")]
        count: u32,
        #[serde(default, deserialize_with = "super::amount")]
        amount: i64,
        #[serde(default, deserialize_with = "super::measure")]
        measure: f64,
        #[serde(default, deserialize_with = "super::flag")]
        flag: bool,
        #[serde(default, deserialize_with = "super::text")]
        text: String,
    }

    fn decode(json: &str) -> Fields {
        serde_json::from_str(json).expect("fields decode")
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let parsed = decode(
            r#"{"count": "4", "amount": "-25000", "measure": "1.5", "flag": "yes"}"#,
        );
        assert_eq!(parsed.count, 4);
        assert_eq!(parsed.amount, -25_000);
        assert_eq!(parsed.measure, 1.5);
        assert!(parsed.flag);
    }

    #[test]
    fn malformed_values_fall_back_to_zero() {
        let parsed = decode(
            r#"{"count": "two", "amount": [], "measure": "heavy", "flag": "maybe"}"#,
        );
        assert_eq!(parsed.count, 0);
        assert_eq!(parsed.amount, 0);
        assert_eq!(parsed.measure, 0.0);
        assert!(!parsed.flag);
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let parsed = decode(r#"{"count": -3, "measure": -1.0}"#);
        assert_eq!(parsed.count, 0);
        assert_eq!(parsed.measure, 0.0);
    }

    #[test]
    fn missing_and_null_fields_use_defaults() {
        let parsed = decode(r#"{"count": null}"#);
        assert_eq!(parsed.count, 0);
        assert_eq!(parsed.amount, 0);
        assert!(!parsed.flag);
    }

    #[test]
    fn fractional_counts_truncate() {
        assert_eq!(decode(r#"{"count": 2.9}"#).count, 2);
        assert_eq!(decode(r#"{"amount": "1200.7"}"#).amount, 1200);
    }

    #[test]
    fn text_accepts_numbers_and_ignores_other_shapes() {
        assert_eq!(decode(r#"{"text": 5}"#).text, "5");
        assert_eq!(decode(r#"{"text": -2}"#).text, "-2");
        assert_eq!(decode(r#"{"text": " 7 "}"#).text, " 7 ");
        assert_eq!(decode(r#"{"text": true}"#).text, "");
        assert_eq!(decode(r#"{"text": null}"#).text, "");
    }
}
