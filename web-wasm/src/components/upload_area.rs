//! アップロードエリアコンポーネント

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, FileList};

#[component]
pub fn UploadArea<F>(disabled: Signal<bool>, on_files: F) -> impl IntoView
where
    F: Fn(FileList) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_files = on_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if disabled.get() {
                return;
            }

            if let Some(dt) = ev.data_transfer() {
                if let Some(files) = dt.files() {
                    on_files(files);
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled.get() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = {
        let on_files = on_files.clone();
        move |_| {
            if disabled.get() {
                return;
            }

            // ファイル選択ダイアログを開く
            let document = web_sys::window().unwrap().document().unwrap();
            let input: web_sys::HtmlInputElement = document
                .create_element("input")
                .unwrap()
                .dyn_into()
                .unwrap();
            input.set_type("file");
            input.set_accept("image/jpeg,image/png");

            let picker = input.clone();
            let on_files = on_files.clone();
            let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
                if let Some(files) = picker.files() {
                    on_files(files);
                }
            }) as Box<dyn FnMut(_)>);

            input.set_onchange(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
            input.click();
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if disabled.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <Show
                when=move || !disabled.get()
                fallback=|| view! {
                    <div class="upload-icon">"⚙"</div>
                    <p>"Webhook endpoints are not configured"</p>
                    <p class="text-muted">"Set METER_AI_UPLOAD_URL and METER_AI_SUBMIT_URL at build time"</p>
                }
            >
                <div class="upload-icon">"📷"</div>
                <p>{move || if is_dragover.get() {
                    "Drop the image here"
                } else {
                    "Drag & drop an image here, or click to select"
                }}</p>
                <p class="text-muted">"Supports: JPG, JPEG, PNG"</p>
            </Show>
        </div>
    }
}
