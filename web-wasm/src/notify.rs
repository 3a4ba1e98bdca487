//! 通知シンク（トースト）
//!
//! プロセス全体の一時的な通知を受け取る注入可能なハンドル。
//! グローバル状態にはせず、コントローラへ明示的に渡す。

use gloo::timers::callback::Timeout;
use leptos::prelude::*;

/// トーストの自動消去までのミリ秒
const DISMISS_MILLIS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
        }
    }
}

/// 1件の通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    id: u64,
}

/// 通知シンク
#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<Toast>>,
    next_id: StoredValue<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
        }
    }

    pub fn current_toast(&self) -> RwSignal<Option<Toast>> {
        self.current
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_id.with_value(|id| *id) + 1;
        self.next_id.set_value(id);

        self.current.set(Some(Toast {
            kind,
            title: kind.title().to_string(),
            message,
            id,
        }));

        // 後続の通知に上書きされていなければ自動消去
        let current = self.current;
        Timeout::new(DISMISS_MILLIS, move || {
            current.update(|toast| {
                if toast.as_ref().map(|t| t.id) == Some(id) {
                    *toast = None;
                }
            });
        })
        .forget();
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

/// トースト表示コンポーネント
#[component]
pub fn ToastHost(notifier: Notifier) -> impl IntoView {
    let toast = notifier.current_toast();

    view! {
        <Show when=move || toast.get().is_some()>
            {move || {
                toast
                    .get()
                    .map(|t| {
                        view! {
                            <div
                                class=format!("toast {}", t.kind.as_class())
                                on:click=move |_| notifier.dismiss()
                            >
                                <p class="toast-title">{t.title.clone()}</p>
                                <p class="toast-message">{t.message.clone()}</p>
                            </div>
                        }
                    })
            }}
        </Show>
    }
}
