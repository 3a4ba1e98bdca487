//! アップロード/確認/送信コントローラ
//!
//! 共有の MeterSession をLeptosシグナルに載せ、ビューから呼ばれる
//! 操作をまとめて提供する。ビュー側は状態を一切持たない。
//!
//! 画像バイナリとプレビューURL・進捗タイマーはこのレイヤが所有し、
//! 差し替え・リセット時に必ず解放する。古いリクエストの結果は
//! セッションのエポック照合で捨てられる。

use gloo::timers::callback::Interval;
use leptos::prelude::*;
use meter_ai_common::progress::TICK_MILLIS;
use meter_ai_common::{AnalysisProgress, Error, MeterSession, RequestToken, Result};
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, FileList, Url};

use crate::api::webhook;
use crate::config::Endpoints;
use crate::notify::Notifier;

#[derive(Clone, Copy)]
pub struct UploadController {
    endpoints: StoredValue<Endpoints>,
    session: RwSignal<MeterSession>,
    preview_url: RwSignal<Option<String>>,
    progress: RwSignal<AnalysisProgress>,
    selected_file: StoredValue<Option<File>, LocalStorage>,
    ticker: StoredValue<Option<Interval>, LocalStorage>,
    notifier: Notifier,
}

impl UploadController {
    pub fn new(endpoints: Endpoints, notifier: Notifier) -> Self {
        Self {
            endpoints: StoredValue::new(endpoints),
            session: RwSignal::new(MeterSession::new()),
            preview_url: RwSignal::new(None),
            progress: RwSignal::new(AnalysisProgress::new()),
            selected_file: StoredValue::new_local(None),
            ticker: StoredValue::new_local(None),
            notifier,
        }
    }

    pub fn session(&self) -> RwSignal<MeterSession> {
        self.session
    }

    pub fn preview_url(&self) -> RwSignal<Option<String>> {
        self.preview_url
    }

    /// 解析中プログレス（0〜100）
    pub fn progress_value(&self) -> Signal<u8> {
        let progress = self.progress;
        Signal::derive(move || progress.with(|p| p.value()))
    }

    /// ドロップ・ファイル選択の入口（1ファイルのみ受け付ける）
    pub fn select_files(&self, files: FileList) {
        match files.length() {
            0 => {}
            1 => {
                if let Some(file) = files.get(0) {
                    self.select_file(file);
                }
            }
            _ => self
                .notifier
                .error("Please select a single image file"),
        }
    }

    /// 画像を選択する（JPEG/PNG以外は通知して棄却）
    pub fn select_file(&self, file: File) {
        let name = file.name();
        let content_type = file.type_();

        let result = self.session.write().select_image(&name, &content_type);
        match result {
            Ok(()) => {
                // 進行中の解析があればタイマーを止める（結果はエポックで棄却される）
                self.stop_ticker();
                self.progress.update(|p| p.reset());
                self.replace_preview(Some(&file));
                self.selected_file.set_value(Some(file));
            }
            Err(error) => self.notifier.error(error.user_message()),
        }
    }

    /// 解析を介さず手入力モードへ
    pub fn enter_manual_mode(&self) {
        let _ = self.session.write().enter_manual_mode();
    }

    /// 選択済み画像を解析Webhookへ送る
    pub fn analyze(&self) {
        let token = match self.session.write().begin_analysis() {
            Ok(token) => token,
            // ボタン側で無効化しているため通常は到達しない
            Err(_) => return,
        };

        let Some(file) = self.selected_file.with_value(|f| f.clone()) else {
            self.session
                .write()
                .complete_analysis(token, Err(Error::State("image data missing")));
            return;
        };

        self.start_ticker();

        let controller = *self;
        let url = self.endpoints.with_value(|e| e.upload_url.clone());
        spawn_local(async move {
            let outcome = webhook::analyze_image(&url, &file).await;
            controller.finish_analysis(token, outcome);
        });
    }

    fn finish_analysis(&self, token: RequestToken, outcome: Result<String>) {
        let failure = outcome.as_ref().err().cloned();
        let applied = self.session.write().complete_analysis(token, outcome);

        // 古いリクエストの結果なら、進捗は現行セッションのものなので触らない
        // （リセット・差し替え側が既にタイマーを止めている）
        if !applied {
            return;
        }

        // 成功・失敗いずれでもタイマーを止め、100%へスナップしてからゼロに戻す
        self.stop_ticker();
        self.progress.update(|p| p.complete());
        self.progress.update(|p| p.reset());

        if let Some(error) = failure {
            self.notifier.error(error.user_message());
        }
    }

    /// 自動読み取り値の確認（true: 確定 / false: 手入力へ）
    pub fn confirm(&self, verified: bool) {
        let _ = self.session.write().confirm_reading(verified);
    }

    pub fn set_manual_reading(&self, text: String) {
        self.session.write().set_manual_reading(&text);
    }

    /// 確定した検針値を送信Webhookへ送る
    pub fn submit(&self) {
        let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
        let begun = self.session.write().begin_submission(&timestamp);
        let (token, payload) = match begun {
            Ok(begun) => begun,
            // 連打・無効状態はここで握りつぶす（2重送信ガード）
            Err(_) => return,
        };

        let controller = *self;
        let url = self.endpoints.with_value(|e| e.submit_url.clone());
        spawn_local(async move {
            let outcome = webhook::submit_reading(&url, &payload).await;
            let failure = outcome.as_ref().err().cloned();
            let applied = controller.session.write().complete_submission(token, outcome);
            if applied {
                match failure {
                    None => controller.notifier.success("Reading submitted successfully"),
                    Some(error) => controller.notifier.error(error.user_message()),
                }
            }
        });
    }

    /// セッションを破棄して最初からやり直す
    pub fn reset(&self) {
        self.stop_ticker();
        self.progress.update(|p| p.reset());
        self.replace_preview(None);
        self.selected_file.set_value(None);
        self.session.write().reset();
    }

    /// プレビューURLを差し替える（旧URLは必ず解放する）
    fn replace_preview(&self, file: Option<&File>) {
        if let Some(old) = self.preview_url.get_untracked() {
            let _ = Url::revoke_object_url(&old);
        }
        let next = file.and_then(|f| Url::create_object_url_with_blob(f).ok());
        self.preview_url.set(next);
    }

    fn start_ticker(&self) {
        self.progress.update(|p| p.reset());
        let progress = self.progress;
        let interval = Interval::new(TICK_MILLIS, move || {
            progress.update(|p| p.tick());
        });
        // 旧タイマーはdropでキャンセルされる
        self.ticker.set_value(Some(interval));
    }

    fn stop_ticker(&self) {
        self.ticker.set_value(None);
    }
}
