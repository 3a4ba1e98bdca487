//! 解析レスポンスパーサー
//!
//! 画像解析WebhookのレスポンスボディからReading値を取り出す。
//! Content-Typeに関わらずボディ文字列をJSONとして解釈する。

use crate::error::{Error, Result};
use crate::types::AnalysisResponse;

/// 読み取り値が検出できなかった場合の定型メッセージ
pub const NO_READING_DETECTED: &str = "No meter reading detected in the image";

/// 解析レスポンスを解釈して検針値を取り出す
///
/// 解釈の優先順位:
/// 1. ボディがJSONとして解釈できない -> AnalysisFormat
/// 2. `error` あり -> AnalysisSemantic(error)
/// 3. `Reading` あり -> 文字列化した値を返す
/// 4. `message` あり -> AnalysisSemantic(message)
/// 5. いずれもなし -> AnalysisSemantic(NO_READING_DETECTED)
///
/// JSONではあるがオブジェクトでないボディ（配列など）はフィールドなしとして
/// 扱い、5.の読み取りなし失敗になる。
///
/// # Arguments
/// * `body` - レスポンスボディ文字列
///
/// # Returns
/// * `Ok(String)` - 検針値
/// * `Err` - 上記いずれかの失敗
pub fn parse_analysis_response(body: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(body.trim()).map_err(|_| Error::AnalysisFormat)?;

    // オブジェクト以外はフィールドを持たないレスポンスとして扱う
    let response: AnalysisResponse = serde_json::from_value(value).unwrap_or_default();

    if let Some(error) = response.error {
        return Err(Error::AnalysisSemantic(error));
    }

    match response.reading {
        Some(reading) => Ok(reading.as_reading()),
        None => match response.message {
            Some(message) => Err(Error::AnalysisSemantic(message)),
            None => Err(Error::AnalysisSemantic(NO_READING_DETECTED.to_string())),
        },
    }
}
