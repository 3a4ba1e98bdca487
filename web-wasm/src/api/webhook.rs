//! Webhook呼び出し（fetch）
//!
//! 画像解析: multipart POST、レスポンスボディは共通パーサーで解釈する。
//! 送信: JSON POST、ステータスのみ確認する。

use meter_ai_common::{parse_analysis_response, Error, Result, SubmitPayload};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

fn network_error(value: JsValue) -> Error {
    let text = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Network(text)
}

/// fetchを実行してステータスとボディ文字列を返す
async fn fetch_text(request: &Request) -> Result<(bool, u16, String)> {
    let window = web_sys::window().ok_or_else(|| Error::Network("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(network_error)?;
    let resp: Response = resp_value.dyn_into().map_err(network_error)?;

    let ok = resp.ok();
    let status = resp.status();
    let text_value = JsFuture::from(resp.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;
    let body = text_value.as_string().unwrap_or_default();
    Ok((ok, status, body))
}

/// 画像解析Webhookを呼び出して検針値を取得する
///
/// multipartフィールド: `file`（バイナリ）, `filename`, `contentType`
pub async fn analyze_image(url: &str, file: &File) -> Result<String> {
    let form = FormData::new().map_err(network_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(network_error)?;
    form.append_with_str("filename", &file.name())
        .map_err(network_error)?;
    form.append_with_str("contentType", &file.type_())
        .map_err(network_error)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;
    // Content-Typeはブラウザがboundary付きで設定する
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(network_error)?;

    let (ok, status, body) = fetch_text(&request).await?;
    if !ok {
        return Err(Error::AnalysisHttp(status));
    }

    parse_analysis_response(&body)
}

/// 検針値送信Webhookを呼び出す
pub async fn submit_reading(url: &str, payload: &SubmitPayload) -> Result<()> {
    let body = serde_json::to_string(payload).map_err(|e| Error::Network(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(network_error)?;

    let (ok, status, _) = fetch_text(&request).await?;
    if !ok {
        return Err(Error::SubmissionHttp(status));
    }
    Ok(())
}
