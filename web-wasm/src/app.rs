//! メインアプリケーションコンポーネント
//!
//! 画面状態は共通の `ViewState` をそのまま保持し、操作はすべて `dispatch` を通す。

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use safe_street_common::media::is_image_mime;
use safe_street_common::{analyze, Alert, ApiConfig, Effect, Event, PickedImage, ReportView, ViewState};
use web_sys::{File, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Url};

use crate::api::{js_error_message, BlobImageSource, FetchTransport};
use crate::components::{
    analyze_button::AnalyzeButton,
    header::Header,
    preview::ImagePreview,
    result_card::{ResultCard, RESULT_CARD_ID},
    upload_area::UploadArea,
};

/// 結果カードが描画されるまでの待ち（ms）
const REVEAL_DELAY_MS: u32 = 100;

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(ViewState::Empty);
    let api = StoredValue::new(ApiConfig::from_build_env());

    let is_loading = Signal::derive(move || state.get().is_loading());
    let can_analyze = Signal::derive(move || state.get().can_analyze());

    let on_file = move |file: File| match picked_from_file(&file) {
        Ok(image) => dispatch(state, api, Event::Pick(image)),
        Err(alert) => show_alert(&alert),
    };
    let on_remove = move || dispatch(state, api, Event::Remove);
    let on_analyze = move || dispatch(state, api, Event::Analyze);
    let on_reset = move || dispatch(state, api, Event::Reset);

    view! {
        <div class="container">
            <Header />

            <main class="card">
                {move || {
                    let current = state.get();
                    match current.image().cloned() {
                        None => view! { <UploadArea on_file=on_file /> }.into_any(),
                        Some(image) => view! {
                            <ImagePreview
                                image=image
                                show_remove=current.result().is_none()
                                is_loading=is_loading
                                on_remove=on_remove
                            />
                        }.into_any(),
                    }
                }}

                <Show when=move || state.get().result().is_none()>
                    <AnalyzeButton
                        can_analyze=can_analyze
                        is_loading=is_loading
                        on_analyze=on_analyze
                    />
                </Show>
            </main>

            {move || state.get().result().map(|result| view! {
                <ResultCard report=ReportView::from(result) on_reset=on_reset />
            })}
        </div>
    }
}

/// イベントを適用し、アラート表示と副作用を実行する
fn dispatch(state: RwSignal<ViewState>, api: StoredValue<ApiConfig>, event: Event) {
    let previous = state.get_untracked();
    let transition = previous.clone().apply(event);
    release_object_url(&previous, &transition.state);
    state.set(transition.state);

    if let Some(alert) = &transition.alert {
        show_alert(alert);
    }
    if let Some(effect) = transition.effect {
        run_effect(state, api, effect);
    }
}

fn run_effect(state: RwSignal<ViewState>, api: StoredValue<ApiConfig>, effect: Effect) {
    match effect {
        Effect::Upload(image) => spawn_local(async move {
            let config = api.get_value();
            gloo::console::log!("Sending request to:", config.analyze_url());
            let event = match analyze(&image, &BlobImageSource, &FetchTransport, &config).await {
                Ok(result) => Event::Succeeded(result),
                Err(err) => {
                    gloo::console::error!("Upload error:", err.to_string());
                    Event::Failed(err)
                }
            };
            dispatch(state, api, event);
        }),
        Effect::ScrollToTop => scroll_to_top(),
        Effect::RevealResult => Timeout::new(REVEAL_DELAY_MS, reveal_result).forget(),
    }
}

/// 画像以外を拒否し、オブジェクトURLを作って選択画像にする
fn picked_from_file(file: &File) -> Result<PickedImage, Alert> {
    let mime_type = file.type_();
    accept_mime(&mime_type)?;
    let uri = Url::create_object_url_with_blob(file).map_err(|e| Alert::pick_failed(js_error_message(&e)))?;
    Ok(PickedImage::new(file.name(), uri, mime_type))
}

pub fn accept_mime(mime_type: &str) -> Result<(), Alert> {
    if is_image_mime(mime_type) {
        Ok(())
    } else {
        Err(Alert::unsupported_file())
    }
}

/// 差し替え・削除された画像のオブジェクトURLを解放
fn release_object_url(previous: &ViewState, next: &ViewState) {
    let Some(old) = previous.image() else {
        return;
    };
    if next.image().map(|image| image.uri.as_str()) != Some(old.uri.as_str()) {
        let _ = Url::revoke_object_url(&old.uri);
    }
}

fn show_alert(alert: &Alert) {
    gloo::dialogs::alert(&alert.to_plain_text());
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        let opts = ScrollToOptions::new();
        opts.set_top(0.0);
        opts.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&opts);
    }
}

fn reveal_result() {
    let card = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(RESULT_CARD_ID));
    if let Some(card) = card {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Start);
        card.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_image_mime() {
        assert!(accept_mime("image/jpeg").is_ok());
        assert!(accept_mime("image/png").is_ok());
        assert_eq!(accept_mime("application/pdf"), Err(Alert::unsupported_file()));
        assert_eq!(accept_mime(""), Err(Alert::unsupported_file()));
    }
}
