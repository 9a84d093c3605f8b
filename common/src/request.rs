//! 解析リクエストの組み立て
//!
//! 選択ファイルと任意の文脈（プロンプト・氏名・識別番号）をまとめる。
//! 送信形式ごとのボディは `protocol` を参照。

use crate::error::AnalysisError;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 選択されたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Data URLから復元する（ブラウザのFileReader結果など）
    pub fn from_data_url(name: impl Into<String>, data_url: &str) -> Result<Self, AnalysisError> {
        let (mime_type, bytes) = decode_data_url(data_url)?;
        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == "application/pdf"
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// "12.3 KB" 形式
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.bytes.len() as f64 / 1024.0)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// 画像のみプレビュー用Data URLを返す
    pub fn preview_data_url(&self) -> Option<String> {
        if !self.is_image() || self.bytes.is_empty() {
            return None;
        }
        Some(format!("data:{};base64,{}", self.mime_type, self.to_base64()))
    }
}

/// Data URLからBase64データ部分を抽出
///
/// `"data:image/jpeg;base64,/9j/4AAQ..."` → `"/9j/4AAQ..."`
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出
pub fn extract_mime_type_from_data_url(data_url: &str) -> Option<&str> {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split([';', ',']).next())
        .filter(|m| !m.is_empty())
}

/// Data URLを (MIMEタイプ, バイト列) に復号
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), AnalysisError> {
    let mime_type = extract_mime_type_from_data_url(data_url)
        .ok_or_else(|| AnalysisError::Encoding("Data URLではありません".to_string()))?;
    let data = extract_base64_from_data_url(data_url)
        .ok_or_else(|| AnalysisError::Encoding("Base64データがありません".to_string()))?;
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| AnalysisError::Encoding(e.to_string()))?;
    Ok((mime_type.to_string(), bytes))
}

/// 前後の空白を除き、空なら None
pub fn non_empty_trimmed(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 1回分の解析リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file: SelectedFile,
    pub prompt: Option<String>,
    pub name: Option<String>,
    pub national_id: Option<String>,
}

impl AnalysisRequest {
    pub fn new(file: SelectedFile, prompt: &str, name: &str, national_id: &str) -> Self {
        Self {
            file,
            prompt: non_empty_trimmed(prompt),
            name: non_empty_trimmed(name),
            national_id: non_empty_trimmed(national_id),
        }
    }

    /// 送信前の検査（空ファイル・MIMEタイプなしは送らない）
    pub fn ensure_sendable(&self) -> Result<(), AnalysisError> {
        if self.file.bytes.is_empty() {
            return Err(AnalysisError::Encoding(format!(
                "{} は空のファイルです",
                self.file.name
            )));
        }
        if self.file.mime_type.trim().is_empty() {
            return Err(AnalysisError::Encoding(format!(
                "{} のファイル形式を判別できません",
                self.file.name
            )));
        }
        Ok(())
    }

    /// 利用者が申告した本人情報の説明文
    pub fn identity_clause(&self) -> Option<String> {
        let claims: Vec<String> = [
            self.name.as_ref().map(|n| format!("name \"{}\"", n)),
            self.national_id.as_ref().map(|id| format!("national ID (CPF) \"{}\"", id)),
        ]
        .into_iter()
        .flatten()
        .collect();

        if claims.is_empty() {
            return None;
        }
        Some(format!(
            "The user states that the document holder has {}. Check whether the document is consistent with these claims.",
            claims.join(" and ")
        ))
    }

    /// プロンプトに本人情報の説明文を連結したもの
    pub fn prompt_with_identity(&self) -> Option<String> {
        match (self.prompt.as_deref(), self.identity_clause()) {
            (Some(prompt), Some(clause)) => Some(format!("{}\n\n{}", prompt, clause)),
            (Some(prompt), None) => Some(prompt.to_string()),
            (None, clause) => clause,
        }
    }
}
