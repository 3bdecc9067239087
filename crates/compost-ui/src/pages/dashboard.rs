use compost_feed::DashboardState;
use leptos::prelude::*;

use crate::components::metric_card::MetricCard;

#[component]
pub fn DashboardPage() -> impl IntoView {
    // Holds the dashboard state; the feed controller replaces it on every change.
    #[allow(unused_variables)]
    let (dashboard, setDashboard) = signal(DashboardState::new());

    #[cfg(feature = "hydrate")]
    {
        use compost_feed::Dashboard;
        use wasm_bindgen_futures::spawn_local;

        use crate::feed::EventSourceStore;

        let controller = Dashboard::new(EventSourceStore);
        controller.on_change(move |state: &DashboardState| setDashboard.set(state.clone()));

        let stored = StoredValue::new_local(controller.clone());
        spawn_local(async move {
            controller.start().await;
            if !controller.phase().is_ready() {
                leptos::logging::error!("realtime store unavailable, staying in offline mode");
            }
        });

        on_cleanup(move || stored.with_value(|controller| controller.teardown()));
    }

    // Effects only run in the browser, so the server never renders its own clock.
    let (mounted, setMounted) = signal(false);
    Effect::new(move |_| setMounted.set(true));

    let isReady = move || dashboard.with(DashboardState::is_ready);

    view! {
        <div class="dashboard-header">
            <h1>"\u{1F331} Kompos Monitoring System"</h1>
            <p class="subtitle">"Monitor kondisi kompos Anda secara real-time"</p>
            <Show when=move || !isReady()>
                <div class="connecting">"Menghubungkan ke database..."</div>
            </Show>
        </div>

        <div class="dashboard-grid">
            {move || {
                dashboard
                    .with(|state| {
                        state
                            .readings
                            .iter()
                            .map(|reading| {
                                let config = reading.key().config();
                                view! {
                                    <MetricCard
                                        title=config.title.to_string()
                                        value=reading.value()
                                        unit=reading.unit().to_string()
                                        status=reading.status()
                                        min=reading.min()
                                        max=reading.max()
                                        optimal_range=reading.optimal_range()
                                        description=reading.description().to_string()
                                        icon=config.icon.to_string()
                                        kind=reading.key().as_str().to_string()
                                    />
                                }
                            })
                            .collect_view()
                    })
            }}
        </div>

        <div class="last-update">
            {move || dashboard.with(|state| footer_line(mounted.get(), state))}
        </div>
    }
}

/// Footer text, withheld until the page has mounted in the browser.
fn footer_line(mounted: bool, state: &DashboardState) -> Option<String> {
    mounted.then(|| state.footer_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_waits_for_mount() {
        let state = DashboardState::new();
        assert_eq!(footer_line(false, &state), None);

        let footer = footer_line(true, &state).unwrap();
        assert!(footer.starts_with("Terakhir diperbarui: "));
        assert!(footer.ends_with(" (Offline Mode)"));
    }
}
