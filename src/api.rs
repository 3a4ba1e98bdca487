//! Webhook呼び出し（ネイティブ側）
//!
//! エラーはフロー共通の型で返し、セッションの complete_* にそのまま渡せる
//! ようにしている。

use meter_ai_common::{parse_analysis_response, Error as FlowError, SubmitPayload};
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;

pub struct WebhookClient {
    client: reqwest::Client,
    upload_url: String,
    submit_url: String,
}

impl WebhookClient {
    pub fn new(config: &Config) -> Result<Self> {
        let upload_url = config.upload_url()?;
        let submit_url = config.submit_url()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            upload_url,
            submit_url,
        })
    }

    /// 画像を解析Webhookへアップロードして検針値を取得する
    ///
    /// multipartフィールド: `file`（バイナリ）, `filename`, `contentType`
    pub async fn analyze_image(
        &self,
        file_name: &str,
        content_type: &'static str,
        bytes: Vec<u8>,
    ) -> std::result::Result<String, FlowError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| FlowError::Network(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("filename", file_name.to_string())
            .text("contentType", content_type);

        let response = self
            .client
            .post(&self.upload_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlowError::AnalysisHttp(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        parse_analysis_response(&body)
    }

    /// 確定した検針値を送信Webhookへ送る
    pub async fn submit_reading(
        &self,
        payload: &SubmitPayload,
    ) -> std::result::Result<(), FlowError> {
        let response = self
            .client
            .post(&self.submit_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlowError::SubmissionHttp(status.as_u16()));
        }
        Ok(())
    }
}
