//! 読み取り値確認ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn VerificationButtons<F>(on_verify: F) -> impl IntoView
where
    F: Fn(bool) + 'static + Clone + Send + Sync,
{
    let on_yes = {
        let on_verify = on_verify.clone();
        move |_| on_verify(true)
    };
    let on_no = {
        let on_verify = on_verify.clone();
        move |_| on_verify(false)
    };

    view! {
        <div class="verification">
            <p class="text-center">"Is this reading correct?"</p>
            <div class="button-row centered">
                <button class="btn btn-secondary" on:click=on_yes>
                    "👍 Yes"
                </button>
                <button class="btn btn-secondary" on:click=on_no>
                    "👎 No"
                </button>
            </div>
        </div>
    }
}
