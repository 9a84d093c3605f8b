//! 検証エンドポイントへのfetch
//!
//! AbortControllerで応答待ちに期限を設ける。

use crate::local_store::js_message;
use doc_verify_common::protocol::{multipart_text_fields, MULTIPART_FILE_FIELD};
use doc_verify_common::{
    parse_response, AnalysisError, AnalysisRequest, AnalysisResult, Analyzer, ClientConfig,
    JsonPayload, RequestFormat,
};
use gloo::timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response,
};

#[derive(Debug, Clone)]
pub struct FetchAnalyzer {
    config: ClientConfig,
}

impl FetchAnalyzer {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn timeout_millis(&self) -> u32 {
        timeout_millis(self.config.timeout_seconds)
    }
}

/// 秒 → ミリ秒（u32に収まらない値は切り詰め）
fn timeout_millis(seconds: u64) -> u32 {
    seconds.saturating_mul(1000).min(u32::MAX as u64) as u32
}

fn encoding_error(value: JsValue) -> AnalysisError {
    AnalysisError::Encoding(js_message(&value))
}

fn transport_error(value: JsValue) -> AnalysisError {
    AnalysisError::Transport(js_message(&value))
}

/// file + prompt のフォームデータ
fn multipart_body(request: &AnalysisRequest) -> Result<FormData, AnalysisError> {
    let fields = multipart_text_fields(request)?;

    let bytes = js_sys::Uint8Array::from(request.file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&request.file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(encoding_error)?;

    let form = FormData::new().map_err(encoding_error)?;
    form.append_with_blob_and_filename(MULTIPART_FILE_FIELD, &blob, &request.file.name)
        .map_err(encoding_error)?;
    for (name, value) in fields {
        form.append_with_str(name, &value).map_err(encoding_error)?;
    }
    Ok(form)
}

impl Analyzer for FetchAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let (body, content_type): (JsValue, Option<&str>) = match self.config.request_format {
            RequestFormat::Json => {
                let json = JsonPayload::from_request(request)?.to_json()?;
                (JsValue::from_str(&json), Some("application/json"))
            }
            // Content-Typeはブラウザがboundary付きで設定する
            RequestFormat::Multipart => (multipart_body(request)?.into(), None),
        };

        let controller = AbortController::new().map_err(transport_error)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&body);
        opts.set_signal(Some(&controller.signal()));

        let http_request =
            Request::new_with_str_and_init(&self.config.endpoint, &opts).map_err(transport_error)?;
        let headers = http_request.headers();
        if let Some(content_type) = content_type {
            headers
                .set("Content-Type", content_type)
                .map_err(transport_error)?;
        }
        if let Some(key) = self.config.api_key() {
            headers
                .set(&self.config.api_key_header, key)
                .map_err(transport_error)?;
        }

        let window = web_sys::window()
            .ok_or_else(|| AnalysisError::Transport("window がありません".to_string()))?;

        let timed_out = Rc::new(Cell::new(false));
        let deadline = {
            let timed_out = timed_out.clone();
            let controller = controller.clone();
            Timeout::new(self.timeout_millis(), move || {
                timed_out.set(true);
                controller.abort();
            })
        };
        let seconds = self.config.timeout_seconds;
        let map_fetch_error = |value: JsValue| {
            if timed_out.get() {
                AnalysisError::Timeout(seconds)
            } else {
                transport_error(value)
            }
        };

        let resp_value = JsFuture::from(window.fetch_with_request(&http_request))
            .await
            .map_err(map_fetch_error)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| AnalysisError::Transport("Responseを取得できません".to_string()))?;

        let status = resp.status();
        if !resp.ok() {
            drop(deadline);
            return Err(AnalysisError::Request { status });
        }

        let text = JsFuture::from(resp.text().map_err(transport_error)?)
            .await
            .map_err(map_fetch_error)?;
        drop(deadline);

        let body = text.as_string().unwrap_or_default();
        parse_response(status, &body)
    }
}
