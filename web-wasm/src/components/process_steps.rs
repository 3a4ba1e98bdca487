//! ステップインジケータコンポーネント
//!
//! Upload -> Confirm -> Submit の3段階を表示する。

use leptos::prelude::*;

const STEPS: [(u8, &str); 3] = [(1, "Upload"), (2, "Confirm"), (3, "Submit")];

#[component]
pub fn ProcessSteps(current_step: Signal<u8>) -> impl IntoView {
    view! {
        <div class="process-steps">
            {STEPS
                .iter()
                .map(|&(number, label)| {
                    let circle_class = move || {
                        if current_step.get() >= number {
                            "step-circle active"
                        } else {
                            "step-circle"
                        }
                    };
                    let label_class = move || {
                        if current_step.get() >= number {
                            "step-label active"
                        } else {
                            "step-label"
                        }
                    };
                    view! {
                        <div class="step">
                            <div class=circle_class>{number}</div>
                            <span class=label_class>{label}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
