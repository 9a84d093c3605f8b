//! 検証サーバー接続設定
//!
//! エンドポイントURLとAPIキーは外部から渡される不透明な文字列として扱う。
//! CLIは設定ファイル+環境変数、Webはビルド時の環境変数から組み立てる。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/v1/analisar-upload";
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// リクエストボディの形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestFormat {
    /// `{ imageBase64, mimeType, prompt?, name?, nationalId? }`
    #[default]
    Json,
    /// `file` + `prompt` のフォームデータ
    Multipart,
}

impl RequestFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestFormat::Json => "json",
            RequestFormat::Multipart => "multipart",
        }
    }
}

impl fmt::Display for RequestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(RequestFormat::Json),
            "multipart" | "form" => Ok(RequestFormat::Multipart),
            other => Err(Error::Config(format!("不明なリクエスト形式: {}", other))),
        }
    }
}

/// Analysis Clientの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub api_key_header: String,
    pub timeout_seconds: u64,
    pub request_format: RequestFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            request_format: RequestFormat::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_format(mut self, format: RequestFormat) -> Self {
        self.request_format = format;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// 空白のみのキーは未設定扱い
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(Error::Config("エンドポイントが未設定です".into()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "エンドポイントはhttp(s)のURLである必要があります: {}",
                endpoint
            )));
        }
        if self.api_key_header.trim().is_empty() {
            return Err(Error::Config("APIキーのヘッダ名が空です".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::Config("タイムアウトは1秒以上にしてください".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_key_header, "x-api-key");
        assert_eq!(config.request_format, RequestFormat::Json);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("ftp://example.com").validate().is_err());
        assert!(ClientConfig::new("https://verify.example.com/v1").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig::default().with_timeout_seconds(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = ClientConfig::default().with_api_key("   ");
        assert_eq!(config.api_key(), None);

        let config = ClientConfig::default().with_api_key(" secret ");
        assert_eq!(config.api_key(), Some("secret"));
    }

    #[test]
    fn test_request_format_parse() {
        assert_eq!("JSON".parse::<RequestFormat>().unwrap(), RequestFormat::Json);
        assert_eq!("multipart".parse::<RequestFormat>().unwrap(), RequestFormat::Multipart);
        assert!("xml".parse::<RequestFormat>().is_err());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let json = r#"{ "endpoint": "https://verify.example.com", "request_format": "multipart" }"#;
        let config: ClientConfig = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(config.endpoint, "https://verify.example.com");
        assert_eq!(config.request_format, RequestFormat::Multipart);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }
}
