//! 読み取り結果カードコンポーネント
//!
//! 検出値の表示・確認、手入力、送信、送信結果までをまとめた
//! フロー後半のビュー。状態は持たず、すべてコントローラ経由。

use leptos::prelude::*;
use meter_ai_common::{Phase, Verification};

use super::error_actions::ErrorActions;
use super::manual_input::ManualInput;
use super::meter_display::MeterDisplay;
use super::verification_buttons::VerificationButtons;

#[component]
pub fn MeterResult<FV, FM, FS, FR>(
    phase: Signal<Phase>,
    detected_reading: Signal<Option<String>>,
    verification: Signal<Verification>,
    manual_reading: Signal<String>,
    manual_valid: Signal<bool>,
    on_verify: FV,
    on_manual_change: FM,
    on_submit: FS,
    on_reset: FR,
) -> impl IntoView
where
    FV: Fn(bool) + 'static + Clone + Send + Sync,
    FM: Fn(String) + 'static + Clone + Send + Sync,
    FS: Fn(()) + 'static + Clone + Send + Sync,
    FR: Fn(()) + 'static + Clone + Send + Sync,
{
    let is_submitting = Signal::derive(move || phase.get() == Phase::Submitting);
    let is_automatic = move || verification.get() == Verification::Confirmed;

    let show_display = move || detected_reading.get().is_some();
    let show_verification = move || phase.get() == Phase::ReadingAvailable;
    let show_confirmed_note = move || {
        is_automatic() && matches!(phase.get(), Phase::Confirmed | Phase::Submitting)
    };
    let show_rejected_note = move || {
        verification.get() == Verification::Rejected
            && matches!(phase.get(), Phase::ManualEntry | Phase::Submitting)
    };
    let show_manual_input = move || {
        phase.get() == Phase::ManualEntry
            || (phase.get() == Phase::Submitting && !is_automatic())
    };
    let show_submit_button = move || {
        is_automatic() && matches!(phase.get(), Phase::Confirmed | Phase::Submitting)
    };
    let is_direct_entry = Signal::derive(move || detected_reading.get().is_none());
    let reading_text =
        Signal::derive(move || detected_reading.get().unwrap_or_default());

    let submit_from_button = {
        let on_submit = on_submit.clone();
        move |_| on_submit(())
    };
    let reset_from_button = {
        let on_reset = on_reset.clone();
        move |_| on_reset(())
    };

    let on_submit_manual = on_submit.clone();
    let on_submit_retry = on_submit.clone();

    view! {
        <div class="result-card">
            <Show when=show_display>
                <MeterDisplay reading=reading_text />
            </Show>

            <Show when=show_verification>
                <VerificationButtons on_verify=on_verify.clone() />
            </Show>

            <Show when=show_confirmed_note>
                <p class="text-center status-ok">"Reading confirmed ✓"</p>
            </Show>

            <Show when=show_rejected_note>
                <p class="text-center status-error">"Reading marked as incorrect ✗"</p>
            </Show>

            <Show when=show_manual_input>
                <ManualInput
                    value=manual_reading
                    is_direct_entry=is_direct_entry
                    can_submit=manual_valid
                    is_submitting=is_submitting
                    on_change=on_manual_change.clone()
                    on_submit=on_submit_manual.clone()
                />
            </Show>

            <Show when=show_submit_button>
                <button
                    class="btn btn-primary btn-block"
                    disabled=move || is_submitting.get()
                    on:click=submit_from_button.clone()
                >
                    {move || if is_submitting.get() { "Submitting..." } else { "Submit Reading" }}
                </button>
            </Show>

            <Show when=move || phase.get() == Phase::SubmitFailed>
                <ErrorActions
                    is_submitting=is_submitting
                    on_retry=on_submit_retry.clone()
                    on_start_over=on_reset.clone()
                />
            </Show>

            <Show when=move || phase.get() == Phase::Submitted>
                <div class="submitted">
                    <p class="text-center status-ok">"Reading submitted successfully ✓"</p>
                    <button class="btn btn-primary btn-block" on:click=reset_from_button.clone()>
                        "Start Over"
                    </button>
                </div>
            </Show>
        </div>
    }
}
