//! 解析中プログレスバーコンポーネント

use leptos::prelude::*;

#[component]
pub fn UploadProgress(progress: Signal<u8>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", progress.get())
                />
            </div>
            <p class="progress-text text-muted">
                {move || if progress.get() >= 100 {
                    "Processing image..."
                } else {
                    "Uploading..."
                }}
            </p>
        </div>
    }
}
