use compost_types::{CardDisplay, MetricStatus, OptimalRange};
use leptos::prelude::*;

use crate::components::progress_bar::ProgressBar;

/// Card for a single sensor metric: icon, title, current value, status badge and a
/// progress bar between the gauge endpoints.
#[component]
pub fn MetricCard(
    title: String,
    /// Latest reading, `None` until the feed delivers one
    value: Option<f64>,
    unit: String,
    status: MetricStatus,
    min: f64,
    max: f64,
    optimal_range: OptimalRange,
    description: String,
    /// Glyph shown in the card header
    icon: String,
    /// Style selector added to the card class, e.g. "temperature"
    kind: String,
) -> impl IntoView {
    let card = CardDisplay::new(value, &unit, status, min, max, optimal_range);
    let barWidth = card.bar_width();

    view! {
        <div class=format!("sensor-card {kind}")>
            <div class="sensor-header">
                <div class="sensor-icon">{icon}</div>
                <div class="sensor-info">
                    <h3>{title}</h3>
                    <p>{description}</p>
                </div>
            </div>

            <div class="sensor-value">
                <span class="value">{card.value_text}</span>
                {card.unit_text.map(|u| view! { <span class="unit">{u}</span> })}
                <div class=format!("status {}", card.status_class)>{card.status_label}</div>
            </div>

            <ProgressBar
                min_label=card.min_label
                range_label=card.range_label
                max_label=card.max_label
                width=barWidth
            />
        </div>
    }
}
