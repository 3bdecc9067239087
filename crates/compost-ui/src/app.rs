use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::pages::dashboard::DashboardPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="id">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/compost-console.css" />
        <Title text="Kompos Monitoring System" />
        <Router>
            <main class="main-content">
                <Routes fallback=|| view! { <p>"Halaman tidak ditemukan."</p> }.into_any()>
                    <Route path=StaticSegment("") view=DashboardPage />
                </Routes>
            </main>
        </Router>
    }
}
