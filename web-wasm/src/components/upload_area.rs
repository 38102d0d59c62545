//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップまたはクリックで1枚だけ選択する

use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(on_file: F) -> impl IntoView
where
    F: Fn(File) + Clone + Send + Sync + 'static,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file(file);
        }
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    view! {
        <div
            class=move || drop_zone_class(is_dragover.get())
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon">"📷"</div>
            <p>"Click to upload or drag and drop"</p>
            <p class="text-muted">"Road photos: JPEG, PNG, WebP"</p>
        </div>
        // ドロップ領域の外に置く（click の伝播で再度開かないように）
        <input
            type="file"
            accept="image/*"
            class="hidden-input"
            node_ref=input_ref
            on:change=on_change
        />
    }
}

pub fn drop_zone_class(is_dragover: bool) -> String {
    let mut classes = vec!["upload-area"];
    if is_dragover {
        classes.push("dragover");
    }
    classes.join(" ")
}
