use leptos::prelude::*;

/// Horizontal bar with labels for both endpoints and the target band.
///
/// `width` is the fill in percent and is expected to be clamped already.
#[component]
pub fn ProgressBar(
    /// Left label, the gauge minimum with its unit
    min_label: String,
    /// Centre label describing the optimal range
    range_label: String,
    /// Right label, the gauge maximum with its unit
    max_label: String,
    /// Filled share of the bar, 0 to 100
    width: f64,
) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-label">
                <span>{min_label}</span>
                <span>{range_label}</span>
                <span>{max_label}</span>
            </div>
            <div
                class="progress-bar"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=format!("{width:.0}")
            >
                <div class="progress-fill" style=format!("width: {width}%")></div>
            </div>
        </div>
    }
}
