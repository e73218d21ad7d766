//! Rendering of summaries for standard output.
//!
//! Rendering is pure: these functions return lines/strings and the binary
//! decides where to write them.

use crate::data::SeriesSummary;

/// Output format for the final report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Format one summary as `"<label>: Min: <min> Max: <max> Mean: <mean>"`.
///
/// The label segment is left out for unlabeled summaries.
pub fn format_summary(summary: &SeriesSummary) -> String {
    let stats = format!(
        "Min: {} Max: {} Mean: {}",
        summary.min, summary.max, summary.mean
    );
    match &summary.label {
        Some(label) => format!("{}: {}", label, stats),
        None => stats,
    }
}

/// One text line per summary, in the given order.
pub fn render_text(summaries: &[SeriesSummary]) -> Vec<String> {
    summaries.iter().map(format_summary).collect()
}

/// The summaries as a pretty-printed JSON array.
pub fn render_json(summaries: &[SeriesSummary]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summaries)
}

/// Render in the requested format as a list of output lines.
pub fn render(summaries: &[SeriesSummary], format: Format) -> serde_json::Result<Vec<String>> {
    match format {
        Format::Text => Ok(render_text(summaries)),
        Format::Json => render_json(summaries).map(|json| vec![json]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(label: Option<&str>, min: f64, max: f64, mean: f64) -> SeriesSummary {
        SeriesSummary {
            label: label.map(String::from),
            min,
            max,
            mean,
        }
    }

    #[test]
    fn test_unlabeled_line() {
        assert_eq!(
            format_summary(&summary(None, 1.0, 5.0, 3.0)),
            "Min: 1 Max: 5 Mean: 3"
        );
    }

    #[test]
    fn test_labeled_lines_keep_order() {
        let lines = render_text(&[
            summary(Some("a"), 1.0, 3.0, 2.0),
            summary(Some("b"), 10.0, 30.0, 20.0),
        ]);
        assert_eq!(
            lines,
            vec!["a: Min: 1 Max: 3 Mean: 2", "b: Min: 10 Max: 30 Mean: 20"]
        );
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(
            format_summary(&summary(Some("load"), -0.5, 2.25, 0.875)),
            "load: Min: -0.5 Max: 2.25 Mean: 0.875"
        );
    }

    #[test]
    fn test_json() {
        let json = render_json(&[
            summary(None, 1.0, 30.0, 11.0),
            summary(Some("a"), 1.0, 3.0, 2.0),
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "min": 1.0, "max": 30.0, "mean": 11.0 },
                { "label": "a", "min": 1.0, "max": 3.0, "mean": 2.0 }
            ])
        );

        let lines = render(&[summary(None, 1.0, 1.0, 1.0)], Format::Json).unwrap();
        assert_eq!(lines.len(), 1);
    }
}
