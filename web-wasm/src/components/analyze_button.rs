//! 解析ボタン

use leptos::prelude::*;

#[component]
pub fn AnalyzeButton<F>(
    can_analyze: Signal<bool>,
    is_loading: Signal<bool>,
    on_analyze: F,
) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    view! {
        <button
            class="btn btn-primary analyze-button"
            disabled=move || !can_analyze.get()
            on:click=move |_| on_analyze()
        >
            <Show
                when=move || is_loading.get()
                fallback=|| view! { "Analyze Image" }
            >
                <span class="loader"></span>
                "Analyzing Image..."
            </Show>
        </button>
    }
}
