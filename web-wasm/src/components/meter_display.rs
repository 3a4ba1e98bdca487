//! 検出値表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn MeterDisplay(reading: Signal<String>) -> impl IntoView {
    view! {
        <div class="meter-display">
            <span class="meter-icon">"✓"</span>
            <div>
                <p class="meter-caption">"Detected Reading"</p>
                <p class="meter-value">{move || reading.get()}</p>
            </div>
        </div>
    }
}
