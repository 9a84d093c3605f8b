use crate::error::{DocVerifyError, Result};
use doc_verify_common::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENDPOINT_ENV: &str = "DOC_VERIFY_ENDPOINT";
pub const API_KEY_ENV: &str = "DOC_VERIFY_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub client: ClientConfig,
    /// 履歴の保存先（未指定ならデータディレクトリ）
    pub history_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 読み込み（内容が壊れていれば警告して既定値）
    pub fn load_or_default() -> Result<Self> {
        Ok(Self::load_or_default_from(&Self::config_path()?))
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DocVerifyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("doc-verify").join("config.json"))
    }

    /// 接続設定（環境変数を優先）
    pub fn client_config(&self) -> ClientConfig {
        let mut client = self.client.clone();
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                client.endpoint = endpoint.trim().to_string();
            }
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                client.api_key = Some(key);
            }
        }
        client
    }

    pub fn history_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.history_dir {
            return Ok(dir.clone());
        }
        let data = dirs::data_dir()
            .ok_or_else(|| DocVerifyError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("doc-verify"))
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.client.api_key = Some(key);
        self.save()
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        let candidate = ClientConfig {
            endpoint: endpoint.clone(),
            ..self.client.clone()
        };
        candidate
            .validate()
            .map_err(|e| DocVerifyError::Config(e.to_string()))?;
        self.client.endpoint = endpoint;
        self.save()
    }
}
