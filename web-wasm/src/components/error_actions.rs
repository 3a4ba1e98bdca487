//! 送信失敗時のアクションコンポーネント

use leptos::prelude::*;

#[component]
pub fn ErrorActions<FR, FS>(
    is_submitting: Signal<bool>,
    on_retry: FR,
    on_start_over: FS,
) -> impl IntoView
where
    FR: Fn(()) + 'static + Clone + Send + Sync,
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="error-actions">
            <p class="text-center status-error">"Failed to submit reading"</p>
            <div class="button-row">
                <button
                    class="btn btn-secondary"
                    disabled=move || is_submitting.get()
                    on:click={
                        let on_retry = on_retry.clone();
                        move |_| on_retry(())
                    }
                >
                    "Try Again"
                </button>
                <button
                    class="btn btn-primary"
                    on:click={
                        let on_start_over = on_start_over.clone();
                        move |_| on_start_over(())
                    }
                >
                    "Start Over"
                </button>
            </div>
        </div>
    }
}
