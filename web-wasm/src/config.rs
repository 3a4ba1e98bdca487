//! Webhookエンドポイント設定
//!
//! ビルド時の環境変数で注入する。未設定のままビルドした場合は
//! アップロードエリアが無効化され、設定を促す表示になる。

/// 2つのWebhookエンドポイント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// 画像解析Webhook
    pub upload_url: String,
    /// 検針値送信Webhook
    pub submit_url: String,
}

impl Endpoints {
    /// ビルド時環境変数から読み込む
    pub fn from_build_env() -> Self {
        Self {
            upload_url: option_env!("METER_AI_UPLOAD_URL").unwrap_or("").to_string(),
            submit_url: option_env!("METER_AI_SUBMIT_URL").unwrap_or("").to_string(),
        }
    }

    /// 両方のエンドポイントが設定済みか
    pub fn is_configured(&self) -> bool {
        !self.upload_url.trim().is_empty() && !self.submit_url.trim().is_empty()
    }
}
