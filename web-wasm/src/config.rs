//! ビルド時の環境変数から接続設定を組み立てる
//!
//! `DOC_VERIFY_ENDPOINT` / `DOC_VERIFY_API_KEY` / `DOC_VERIFY_FORMAT` / `DOC_VERIFY_TIMEOUT`

use doc_verify_common::ClientConfig;

pub fn build_config() -> ClientConfig {
    config_from(
        option_env!("DOC_VERIFY_ENDPOINT"),
        option_env!("DOC_VERIFY_API_KEY"),
        option_env!("DOC_VERIFY_FORMAT"),
        option_env!("DOC_VERIFY_TIMEOUT"),
    )
}

fn config_from(
    endpoint: Option<&str>,
    api_key: Option<&str>,
    format: Option<&str>,
    timeout: Option<&str>,
) -> ClientConfig {
    let mut config = ClientConfig::default();

    if let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) {
        config.endpoint = endpoint.to_string();
    }
    if let Some(key) = api_key {
        config.api_key = Some(key.to_string());
    }
    if let Some(format) = format {
        // 不明な形式は既定のまま
        if let Ok(format) = format.parse() {
            config.request_format = format;
        }
    }
    if let Some(seconds) = timeout.and_then(|t| t.trim().parse::<u64>().ok()) {
        if seconds > 0 {
            config.timeout_seconds = seconds;
        }
    }

    config
}
