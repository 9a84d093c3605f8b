//! 検証エンドポイントとの送受信形式
//!
//! - JSON: `{ imageBase64, mimeType, prompt?, name?, nationalId? }`
//! - Multipart: `file`（バイナリ）+ `prompt`（任意）
//!
//! Multipartには本人情報のフィールドがないため、氏名・識別番号は
//! プロンプトへ説明文として連結して送る。

use crate::error::AnalysisError;
use crate::request::AnalysisRequest;
use crate::types::AnalysisResult;
use serde::Serialize;

pub const MULTIPART_FILE_FIELD: &str = "file";
pub const MULTIPART_PROMPT_FIELD: &str = "prompt";

/// JSON形式のリクエストボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPayload {
    pub image_base64: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
}

impl JsonPayload {
    pub fn from_request(request: &AnalysisRequest) -> Result<Self, AnalysisError> {
        request.ensure_sendable()?;
        Ok(Self {
            image_base64: request.file.to_base64(),
            mime_type: request.file.mime_type.clone(),
            prompt: request.prompt.clone(),
            name: request.name.clone(),
            national_id: request.national_id.clone(),
        })
    }

    pub fn to_json(&self) -> Result<String, AnalysisError> {
        serde_json::to_string(self).map_err(|e| AnalysisError::Encoding(e.to_string()))
    }
}

/// Multipart形式のテキストフィールド（ファイル以外）
pub fn multipart_text_fields(
    request: &AnalysisRequest,
) -> Result<Vec<(&'static str, String)>, AnalysisError> {
    request.ensure_sendable()?;
    Ok(request
        .prompt_with_identity()
        .map(|prompt| vec![(MULTIPART_PROMPT_FIELD, prompt)])
        .unwrap_or_default())
}

/// レスポンスを解釈する
///
/// 2xx以外は本文を見ずに `Request { status }`。
pub fn parse_response(status: u16, body: &str) -> Result<AnalysisResult, AnalysisError> {
    if !(200..300).contains(&status) {
        return Err(AnalysisError::Request { status });
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    AnalysisResult::from_value(value)
}
