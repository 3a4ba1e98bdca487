//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Water Meter Reading"</h1>
            <p class="text-muted">"Take a clear photo of your water meter"</p>
        </header>
    }
}
