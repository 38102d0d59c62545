//! 選択画像のプレビュー

use leptos::prelude::*;
use safe_street_common::PickedImage;

/// 解析結果の表示中は削除ボタンを出さない（`show_remove = false`）
#[component]
pub fn ImagePreview<F>(
    image: PickedImage,
    show_remove: bool,
    is_loading: Signal<bool>,
    on_remove: F,
) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    view! {
        <div class="preview">
            <img src=image.uri.clone() alt=image.name.clone() class="preview-image" />
            {show_remove.then(|| view! {
                <button
                    class="remove-button"
                    title="Remove image"
                    disabled=move || is_loading.get()
                    on:click=move |_| on_remove()
                >
                    "×"
                </button>
            })}
            <p class="file-name">{image.name}</p>
        </div>
    }
}
