//! 解析履歴の永続化
//!
//! 履歴はキーバリューストアの1キーにJSON配列として保存する。
//! 読み込み失敗は「履歴なし」、保存失敗は警告ログのみで呼び出し側へは返さない。

use crate::error::{Error, Result, StoreError};
use crate::types::HistoryEntry;
use std::collections::{HashMap, HashSet};

/// 履歴の保存キー
pub const HISTORY_KEY: &str = "doc-analyzer-history";

/// 永続ストアの抽象（ブラウザのlocalStorage、ファイル、メモリ）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> std::result::Result<(), StoreError>;
}

/// メモリ上のストア
///
/// `quota` を指定すると、超える値の書き込みは失敗する（容量超過の再現用）。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StoreError::Write(format!(
                    "quota exceeded ({} > {} bytes)",
                    value.len(),
                    quota
                )));
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> std::result::Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// 履歴の読み書き
#[derive(Debug, Clone)]
pub struct HistoryStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 履歴を読み込む（失敗・破損時は空）
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.try_load() {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "history unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// 履歴を読み込む（エラーを返す版）
    pub fn try_load(&self) -> Result<Vec<HistoryEntry>> {
        let raw = self
            .store
            .get(&self.key)
            .map_err(|e| Error::PersistenceRead(e.to_string()))?;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        let entries: Vec<HistoryEntry> =
            serde_json::from_str(&raw).map_err(|e| Error::PersistenceRead(e.to_string()))?;

        // IDの重複は先勝ち
        let mut seen = HashSet::new();
        let total = entries.len();
        let history: Vec<HistoryEntry> = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.id.clone()))
            .collect();
        if history.len() != total {
            tracing::warn!(dropped = total - history.len(), "dropped history entries with duplicate ids");
        }

        Ok(history)
    }

    /// 履歴を保存する（失敗時は警告のみ、既存の保存内容は変更しない）
    pub fn save(&mut self, history: &[HistoryEntry]) {
        if let Err(e) = self.try_save(history) {
            tracing::warn!(key = %self.key, error = %e, "could not save history");
        }
    }

    /// 履歴を保存する（エラーを返す版）
    ///
    /// `preview` はシリアライズ対象外なので保存されない。
    pub fn try_save(&mut self, history: &[HistoryEntry]) -> Result<()> {
        let json =
            serde_json::to_string(history).map_err(|e| Error::PersistenceWrite(e.to_string()))?;
        self.store
            .set(&self.key, &json)
            .map_err(|e| Error::PersistenceWrite(e.to_string()))
    }

    /// 保存キーごと削除
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "could not clear history");
        }
    }
}
