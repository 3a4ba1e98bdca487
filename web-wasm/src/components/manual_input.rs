//! 手入力コンポーネント
//!
//! 数字のみの検針値入力。送信可否は呼び出し側（セッション）の判定に従う。

use leptos::prelude::*;

#[component]
pub fn ManualInput<FC, FS>(
    value: Signal<String>,
    /// 直接手入力か（falseなら自動読み取り値の訂正）
    is_direct_entry: Signal<bool>,
    can_submit: Signal<bool>,
    is_submitting: Signal<bool>,
    on_change: FC,
    on_submit: FS,
) -> impl IntoView
where
    FC: Fn(String) + 'static + Clone + Send + Sync,
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="manual-input">
            <p class="text-center">
                {move || if is_direct_entry.get() {
                    "Enter your meter reading:"
                } else {
                    "Please enter the correct reading:"
                }}
            </p>
            <div class="button-row">
                <input
                    type="number"
                    inputmode="numeric"
                    pattern="[0-9]*"
                    placeholder="Enter reading"
                    prop:value=move || value.get()
                    on:input=move |ev| {
                        on_change(event_target_value(&ev));
                    }
                />
                <button
                    class="btn btn-primary btn-small"
                    disabled=move || !can_submit.get() || is_submitting.get()
                    on:click={
                        let on_submit = on_submit.clone();
                        move |_| on_submit(())
                    }
                >
                    {move || if is_submitting.get() { "Submitting..." } else { "Submit" }}
                </button>
            </div>
        </div>
    }
}
