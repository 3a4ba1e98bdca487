//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use meter_ai_common::{Phase, Verification};

use crate::components::{
    header::Header, meter_result::MeterResult, process_steps::ProcessSteps,
    upload_area::UploadArea, upload_progress::UploadProgress,
};
use crate::config::Endpoints;
use crate::controller::UploadController;
use crate::notify::{Notifier, ToastHost};

#[component]
pub fn App() -> impl IntoView {
    let notifier = Notifier::new();
    let endpoints = Endpoints::from_build_env();
    let configured = endpoints.is_configured();
    let controller = UploadController::new(endpoints, notifier);

    let session = controller.session();
    let phase = Signal::derive(move || session.with(|s| s.phase()));
    let current_step = Signal::derive(move || session.with(|s| s.current_step()));
    let detected_reading =
        Signal::derive(move || session.with(|s| s.detected_reading().map(str::to_string)));
    let verification = Signal::derive(move || session.with(|s| s.verification()));
    let manual_reading =
        Signal::derive(move || session.with(|s| s.manual_reading().to_string()));
    let manual_valid = Signal::derive(move || session.with(|s| s.manual_reading_valid()));
    let preview_url = controller.preview_url();
    let progress = controller.progress_value();

    let area_disabled = Signal::derive(move || !configured);
    let is_analyzing = move || phase.get() == Phase::Analyzing;

    // 手入力モード中は画像まわりを隠す（自動読み取り確定後は表示を保つ）
    let hide_upload_section = move || {
        session.with(|s| match s.phase() {
            Phase::ManualEntry => true,
            Phase::Submitting | Phase::Submitted | Phase::SubmitFailed => {
                s.verification() != Verification::Confirmed
            }
            _ => false,
        })
    };

    let show_result = move || {
        matches!(
            phase.get(),
            Phase::ReadingAvailable
                | Phase::Confirmed
                | Phase::ManualEntry
                | Phase::Submitting
                | Phase::Submitted
                | Phase::SubmitFailed
        )
    };

    // 解析失敗後の復帰ブロック（別写真で再試行 or 手入力へ）
    let show_recovery = move || {
        session.with(|s| s.phase() == Phase::ImageSelected && s.error().is_some())
    };

    // Clear / Process Image の操作列
    let show_actions = move || {
        session.with(|s| {
            matches!(
                s.phase(),
                Phase::ImageSelected | Phase::Analyzing | Phase::ReadingAvailable
            ) && s.error().is_none()
        })
    };

    view! {
        <div class="container">
            <div class="card">
                <Header />

                <ProcessSteps current_step=current_step />

                <Show when=move || !hide_upload_section()>
                    <Show
                        when=move || preview_url.get().is_some()
                        fallback=move || view! {
                            <UploadArea
                                disabled=area_disabled
                                on_files=move |files| controller.select_files(files)
                            />
                        }
                    >
                        <div class="preview">
                            <img
                                src=move || preview_url.get().unwrap_or_default()
                                alt="Selected meter"
                            />
                        </div>
                    </Show>

                    <Show when=is_analyzing>
                        <UploadProgress progress=progress />
                    </Show>
                </Show>

                <Show when=show_result>
                    <MeterResult
                        phase=phase
                        detected_reading=detected_reading
                        verification=verification
                        manual_reading=manual_reading
                        manual_valid=manual_valid
                        on_verify=move |verified| controller.confirm(verified)
                        on_manual_change=move |text| controller.set_manual_reading(text)
                        on_submit=move |_| controller.submit()
                        on_reset=move |_| controller.reset()
                    />
                </Show>

                <Show when=show_recovery>
                    <div class="recovery">
                        <p class="text-center text-muted">
                            "Would you like to try again with another photo or enter the reading manually?"
                        </p>
                        <div class="button-row">
                            <button
                                class="btn btn-secondary"
                                on:click=move |_| controller.reset()
                            >
                                "Try Another Photo"
                            </button>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| controller.enter_manual_mode()
                            >
                                "Enter Manually"
                            </button>
                        </div>
                    </div>
                </Show>

                <Show when=show_actions>
                    <div class="button-row">
                        <button
                            class="btn btn-secondary"
                            on:click=move |_| controller.reset()
                        >
                            "Clear"
                        </button>
                        <button
                            class="btn btn-primary"
                            disabled=is_analyzing
                            on:click=move |_| controller.analyze()
                        >
                            {move || if is_analyzing() { "Processing..." } else { "Process Image" }}
                        </button>
                    </div>
                </Show>
            </div>

            <ToastHost notifier=notifier />
        </div>
    }
}
