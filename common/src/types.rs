//! Webhook連携の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - AnalysisResponse: 画像解析エンドポイントのレスポンス
//! - SubmitPayload: 送信エンドポイントへのリクエストボディ

use serde::{Deserialize, Serialize};

/// 受け付ける画像MIMEタイプ
pub const ACCEPTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// MIMEタイプが受け付け対象か
pub fn is_accepted_image_type(content_type: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&content_type)
}

/// 拡張子からMIMEタイプを推定（CLI用）
pub fn mime_for_file_name(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// 解析エンドポイントが返す読み取り値
///
/// 文字列と数値の両方が観測されているため、untaggedで受けて
/// 文字列化して扱う（先頭ゼロ保持のため以降は常に文字列）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Text(String),
    Number(serde_json::Number),
}

impl ReadingValue {
    /// 検針値の文字列表現
    pub fn as_reading(&self) -> String {
        match self {
            ReadingValue::Text(s) => s.clone(),
            ReadingValue::Number(n) => n.to_string(),
        }
    }
}

/// 画像解析エンドポイントのレスポンス
///
/// `Reading`/`error`/`message` はいずれも省略されうる。
/// 解釈の優先順位は parser::parse_analysis_response を参照。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "Reading")]
    pub reading: Option<ReadingValue>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// 送信エンドポイントへのリクエストボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    /// 検針値（先頭ゼロ保持のため文字列）
    pub reading: String,

    /// 自動読み取り値か手入力値か
    pub is_automatic_reading: bool,

    /// ISO-8601形式のタイムスタンプ
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // 画像タイプ判定テスト
    // =============================================

    #[test]
    fn test_accepted_image_types() {
        assert!(is_accepted_image_type("image/jpeg"));
        assert!(is_accepted_image_type("image/png"));
        assert!(!is_accepted_image_type("image/gif"));
        assert!(!is_accepted_image_type("application/pdf"));
    }

    #[test]
    fn test_mime_for_file_name() {
        assert_eq!(mime_for_file_name("meter.jpg"), Some("image/jpeg"));
        assert_eq!(mime_for_file_name("meter.JPEG"), Some("image/jpeg"));
        assert_eq!(mime_for_file_name("meter.png"), Some("image/png"));
        assert_eq!(mime_for_file_name("meter.gif"), None);
        assert_eq!(mime_for_file_name("meter"), None);
    }

    // =============================================
    // ReadingValue テスト
    // =============================================

    #[test]
    fn test_reading_value_from_number() {
        let value: ReadingValue = serde_json::from_str("12345").expect("deserialize failed");
        assert_eq!(value.as_reading(), "12345");
    }

    #[test]
    fn test_reading_value_from_string_keeps_leading_zeros() {
        let value: ReadingValue = serde_json::from_str("\"00123\"").expect("deserialize failed");
        assert_eq!(value.as_reading(), "00123");
    }

    // =============================================
    // SubmitPayload シリアライズテスト
    // =============================================

    #[test]
    fn test_submit_payload_serialize_camel_case() {
        let payload = SubmitPayload {
            reading: "00123".to_string(),
            is_automatic_reading: true,
            timestamp: "2026-08-08T12:00:00Z".to_string(),
        };

        let json = serde_json::to_string(&payload).expect("serialize failed");
        assert!(json.contains("\"reading\":\"00123\""));
        assert!(json.contains("\"isAutomaticReading\":true"));
        assert!(json.contains("\"timestamp\":\"2026-08-08T12:00:00Z\""));
    }

    #[test]
    fn test_analysis_response_deserialize() {
        let json = r#"{"Reading": "04521", "message": "ok"}"#;
        let response: AnalysisResponse = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(response.reading.map(|r| r.as_reading()), Some("04521".to_string()));
        assert_eq!(response.message.as_deref(), Some("ok"));
        assert!(response.error.is_none());
    }
}
