use crate::metric::{MetricStatus, OptimalRange};

pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Position of `value` between the gauge endpoints, in percent.
///
/// Not clamped: values outside `[min, max]` produce figures below 0 or above 100.
/// A range with `max <= min` is not guarded against.
pub fn calculate_percentage(value: Option<f64>, min: f64, max: f64) -> f64 {
    match value {
        Some(value) => (value - min) / (max - min) * 100.0,
        None => 0.0,
    }
}

/// Width of the filled part of the bar. This is the only place the percentage is clamped.
pub fn bar_width(percentage: f64) -> f64 {
    percentage.clamp(0.0, 100.0)
}

pub fn display_value(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.1}"),
        None => LOADING_PLACEHOLDER.to_string(),
    }
}

/// Everything a metric card shows, derived from its inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct CardDisplay {
    pub value_text: String,
    /// Unit next to the value; hidden while the value is missing.
    pub unit_text: Option<String>,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub percentage: f64,
    pub min_label: String,
    pub range_label: String,
    pub max_label: String,
}

impl CardDisplay {
    pub fn new(
        value: Option<f64>,
        unit: &str,
        status: MetricStatus,
        min: f64,
        max: f64,
        optimalRange: OptimalRange,
    ) -> Self {
        Self {
            value_text: display_value(value),
            unit_text: value.map(|_| unit.to_string()),
            status_label: status.label(),
            status_class: status.css_class(),
            percentage: calculate_percentage(value, min, max),
            min_label: format!("{min}{unit}"),
            range_label: format!(
                "Rentang Optimal: {}-{}{unit}",
                optimalRange.min, optimalRange.max
            ),
            max_label: format!("{max}{unit}"),
        }
    }

    pub fn bar_width(&self) -> f64 {
        bar_width(self.percentage)
    }
}
