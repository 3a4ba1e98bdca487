use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeterAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("WebhookのURLが設定されていません。`meter-ai config --set-upload-url URL --set-submit-url URL` で設定してください")]
    MissingEndpoint,

    #[error("検針値が不正です: 数字のみで入力してください")]
    InvalidReading,

    #[error("{0}")]
    Flow(#[from] meter_ai_common::Error),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("対話入力エラー: {0}")]
    Dialog(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, MeterAiError>;
