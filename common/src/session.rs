//! 検針セッションの状態機械
//!
//! 画像取得 -> 解析 -> 確認 -> 送信 の1回分の試行を表す。
//! 非同期処理は持たず、呼び出し側（WebのコントローラやCLI）が
//! begin_* / complete_* の対でリクエスト前後の遷移を駆動する。

use crate::error::{Error, Result};
use crate::types::{is_accepted_image_type, SubmitPayload};

/// フローの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    ImageSelected,
    Analyzing,
    ReadingAvailable,
    Confirmed,
    ManualEntry,
    Submitting,
    Submitted,
    SubmitFailed,
}

/// 自動読み取り値に対する確認結果
///
/// 送信時にどちらの値を採用するかはこの結果だけで決まる。
/// Confirmed -> 自動読み取り値、それ以外 -> 手入力値。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verification {
    #[default]
    Unset,
    Confirmed,
    Rejected,
}

/// 選択された画像のメタデータ
///
/// バイナリ本体とプレビューURLは呼び出し側レイヤが所有する。
/// プレビューは差し替え・リセット前に解放すること。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub file_name: String,
    pub content_type: String,
}

/// 非同期リクエストの完了照合用トークン
///
/// リセットや画像差し替え後に届いた古いレスポンスを弾くため、
/// 発行時点のエポックを持ち回る。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    epoch: u64,
}

/// 1回の検針試行のインメモリ状態
#[derive(Debug, Clone, Default)]
pub struct MeterSession {
    phase: Phase,
    image: Option<ImageInfo>,
    detected_reading: Option<String>,
    verification: Verification,
    manual_reading: String,
    error: Option<Error>,
    epoch: u64,
}

impl MeterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    pub fn detected_reading(&self) -> Option<&str> {
        self.detected_reading.as_deref()
    }

    pub fn manual_reading(&self) -> &str {
        &self.manual_reading
    }

    pub fn verification(&self) -> Verification {
        self.verification
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// 解析または送信のリクエストが未完了か
    pub fn is_request_in_flight(&self) -> bool {
        matches!(self.phase(), Phase::Analyzing | Phase::Submitting)
    }

    /// 画像を選択する
    ///
    /// JPEG/PNG以外は棄却。成功すると前回の読み取り値・確認結果・
    /// 手入力・エラーを全て破棄し、エポックを進めて ImageSelected へ。
    pub fn select_image(&mut self, file_name: &str, content_type: &str) -> Result<()> {
        if !is_accepted_image_type(content_type) {
            return Err(Error::Selection(file_name.to_string()));
        }

        self.epoch += 1;
        self.image = Some(ImageInfo {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
        });
        self.detected_reading = None;
        self.verification = Verification::Unset;
        self.manual_reading.clear();
        self.error = None;
        self.phase = Phase::ImageSelected;
        Ok(())
    }

    /// 解析を介さず手入力モードへ入る
    ///
    /// Idle / ImageSelected（解析失敗後を含む）から有効。
    pub fn enter_manual_mode(&mut self) -> Result<()> {
        match self.phase() {
            Phase::Idle | Phase::ImageSelected => {
                self.manual_reading.clear();
                self.error = None;
                self.phase = Phase::ManualEntry;
                Ok(())
            }
            _ => Err(Error::State("manual entry is not available here")),
        }
    }

    /// 解析リクエストの開始
    ///
    /// 画像選択済みかつリクエスト未発行のときだけ有効。
    /// ReadingAvailable からの再解析も許す（前回の読み取り値は破棄）。
    pub fn begin_analysis(&mut self) -> Result<RequestToken> {
        if !matches!(self.phase(), Phase::ImageSelected | Phase::ReadingAvailable) {
            return Err(Error::State("analysis requires a selected image"));
        }
        if self.image.is_none() {
            return Err(Error::State("no image selected"));
        }

        self.detected_reading = None;
        self.verification = Verification::Unset;
        self.error = None;
        self.phase = Phase::Analyzing;
        Ok(RequestToken { epoch: self.epoch })
    }

    /// 解析リクエストの完了
    ///
    /// トークンが古い（リセット・差し替え後）の場合は何もせず false。
    /// 成功で ReadingAvailable、失敗でエラーを記録して ImageSelected へ戻る。
    pub fn complete_analysis(&mut self, token: RequestToken, outcome: Result<String>) -> bool {
        if token.epoch != self.epoch || self.phase() != Phase::Analyzing {
            return false;
        }

        match outcome {
            Ok(reading) => {
                self.detected_reading = Some(reading);
                self.error = None;
                self.phase = Phase::ReadingAvailable;
            }
            Err(error) => {
                self.detected_reading = None;
                self.error = Some(error);
                self.phase = Phase::ImageSelected;
            }
        }
        true
    }

    /// 自動読み取り値の確認
    ///
    /// ReadingAvailable でのみ有効。trueで確定、falseで手入力へ。
    pub fn confirm_reading(&mut self, verified: bool) -> Result<()> {
        if self.phase() != Phase::ReadingAvailable {
            return Err(Error::State("no reading to confirm"));
        }

        if verified {
            self.verification = Verification::Confirmed;
            self.phase = Phase::Confirmed;
        } else {
            self.verification = Verification::Rejected;
            self.manual_reading.clear();
            self.phase = Phase::ManualEntry;
        }
        Ok(())
    }

    /// 手入力値の更新（自由入力。検証は送信時）
    pub fn set_manual_reading(&mut self, text: &str) {
        self.manual_reading = text.to_string();
    }

    /// 手入力値が送信可能か（トリム後に空でなく、数字のみ）
    pub fn manual_reading_valid(&self) -> bool {
        let trimmed = self.manual_reading.trim();
        !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
    }

    /// 送信可能な状態か
    pub fn is_ready_to_submit(&self) -> bool {
        match self.phase() {
            Phase::Confirmed => true,
            Phase::ManualEntry => self.manual_reading_valid(),
            _ => false,
        }
    }

    /// 送信リクエストの開始
    ///
    /// Confirmed / ManualEntry（有効な手入力あり）/ SubmitFailed（再試行）
    /// から有効。確認結果に従って自動・手入力のどちらか一方だけを
    /// 採用したペイロードを返す。
    pub fn begin_submission(&mut self, timestamp: &str) -> Result<(RequestToken, SubmitPayload)> {
        match self.phase() {
            Phase::Confirmed | Phase::SubmitFailed => {}
            Phase::ManualEntry => {
                if !self.manual_reading_valid() {
                    return Err(Error::State("manual reading required"));
                }
            }
            Phase::Submitting => {
                return Err(Error::State("submission already in flight"));
            }
            _ => return Err(Error::State("nothing to submit")),
        }

        let is_automatic = self.verification == Verification::Confirmed;
        let reading = if is_automatic {
            self.detected_reading
                .clone()
                .ok_or(Error::State("no detected reading"))?
        } else {
            self.manual_reading.trim().to_string()
        };

        self.error = None;
        self.phase = Phase::Submitting;
        Ok((
            RequestToken { epoch: self.epoch },
            SubmitPayload {
                reading,
                is_automatic_reading: is_automatic,
                timestamp: timestamp.to_string(),
            },
        ))
    }

    /// 送信リクエストの完了
    ///
    /// 失敗時は入力値を保持したまま SubmitFailed へ遷移し、
    /// 同一ペイロードでの再試行を可能にする。
    pub fn complete_submission(&mut self, token: RequestToken, outcome: Result<()>) -> bool {
        if token.epoch != self.epoch || self.phase() != Phase::Submitting {
            return false;
        }

        match outcome {
            Ok(()) => {
                self.error = None;
                self.phase = Phase::Submitted;
            }
            Err(error) => {
                self.error = Some(error);
                self.phase = Phase::SubmitFailed;
            }
        }
        true
    }

    /// セッションを初期状態へ戻す
    ///
    /// エポックを進めるため、以降に届く旧リクエストの結果は無視される。
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self::default();
        self.epoch = epoch;
    }

    /// ステップインジケータ用の現在ステップ（1〜3）
    pub fn current_step(&self) -> u8 {
        if self.is_ready_to_submit()
            || matches!(
                self.phase(),
                Phase::Submitting | Phase::Submitted | Phase::SubmitFailed
            )
        {
            3
        } else if self.detected_reading.is_some() || self.phase() == Phase::ManualEntry {
            2
        } else {
            1
        }
    }
}
