//! Plugin result types.
//!
//! A plugin returns either one series or a labeled collection of series.
//! The JSON accepted on the wire is:
//!
//! ```text
//! [1.5, 2.0, 3.25]                         flat series of values
//! [[1700000000000, 1.5], [..., 2.0]]       flat series of [timestamp, value]
//! {"data": {"cpu": [...], "mem": [...]}}   labeled series
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ShapeError;

/// An ordered sequence of sample values.
pub type Series = Vec<f64>;

/// Series keyed by label. Labels iterate in sorted order.
pub type LabeledSeries = BTreeMap<String, Series>;

/// Everything a plugin can hand back.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginResult {
    Flat(Series),
    Labeled(LabeledSeries),
}

/// One sample as it appears on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSample {
    Value(f64),
    Point(f64, f64),
}

impl RawSample {
    fn value(self) -> f64 {
        match self {
            RawSample::Value(v) => v,
            RawSample::Point(_, v) => v,
        }
    }
}

impl PluginResult {
    /// Classify a decoded JSON document.
    pub fn from_json(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Array(_) => parse_series(value, None).map(PluginResult::Flat),
            Value::Object(mut object) => match object.remove("data") {
                Some(Value::Object(data)) => {
                    let mut labeled = LabeledSeries::new();
                    for (label, series) in data {
                        let series = parse_series(series, Some(&label))?;
                        labeled.insert(label, series);
                    }
                    Ok(PluginResult::Labeled(labeled))
                }
                Some(other) => Err(ShapeError(format!(
                    "\"data\" must be an object of series, found {}",
                    kind(&other)
                ))),
                None => Err(ShapeError(
                    "expected an array of samples or an object with a \"data\" field".to_string(),
                )),
            },
            other => Err(ShapeError(format!(
                "expected an array of samples or an object with a \"data\" field, found {}",
                kind(&other)
            ))),
        }
    }

    /// Total number of samples across all series.
    pub fn sample_count(&self) -> usize {
        match self {
            PluginResult::Flat(series) => series.len(),
            PluginResult::Labeled(labeled) => labeled.values().map(Vec::len).sum(),
        }
    }
}

fn parse_series(value: Value, label: Option<&str>) -> Result<Series, ShapeError> {
    let samples: Vec<RawSample> = serde_json::from_value(value).map_err(|e| {
        let context = match label {
            Some(label) => format!("series '{}'", label),
            None => "series".to_string(),
        };
        ShapeError(format!(
            "{} must contain numbers or [timestamp, value] pairs ({})",
            context, e
        ))
    })?;
    Ok(samples.into_iter().map(RawSample::value).collect())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_values() {
        let result = PluginResult::from_json(json!([1, 2.5, 3])).unwrap();
        assert_eq!(result, PluginResult::Flat(vec![1.0, 2.5, 3.0]));
        assert_eq!(result.sample_count(), 3);
    }

    #[test]
    fn test_flat_points_use_second_element() {
        let result =
            PluginResult::from_json(json!([[1700000000000i64, 4], [1700000030000i64, 6]]))
                .unwrap();
        assert_eq!(result, PluginResult::Flat(vec![4.0, 6.0]));
    }

    #[test]
    fn test_labeled() {
        let result = PluginResult::from_json(json!({
            "data": { "b": [10, 20], "a": [[0, 1], [30, 2]] }
        }))
        .unwrap();

        let PluginResult::Labeled(labeled) = result else {
            panic!("expected labeled result");
        };
        let labels: Vec<_> = labeled.keys().cloned().collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert_eq!(labeled["a"], vec![1.0, 2.0]);
        assert_eq!(labeled["b"], vec![10.0, 20.0]);
    }

    #[test]
    fn test_rejects_unknown_shapes() {
        let err = PluginResult::from_json(json!("hello")).unwrap_err();
        assert!(err.0.contains("found a string"));

        let err = PluginResult::from_json(json!({ "values": [1, 2] })).unwrap_err();
        assert!(err.0.contains("\"data\""));

        let err = PluginResult::from_json(json!({ "data": [1, 2] })).unwrap_err();
        assert!(err.0.contains("found an array"));

        let err = PluginResult::from_json(json!({ "data": { "cpu": "x" } })).unwrap_err();
        assert!(err.0.contains("series 'cpu'"));

        assert!(PluginResult::from_json(json!([1, "two"])).is_err());
        assert!(PluginResult::from_json(json!([[1, 2, 3]])).is_err());
    }
}
