//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Safe Street"</h1>
            <p class="subtitle">"Road damage detection from a single photo"</p>
        </header>
    }
}
