//! ブラウザのlocalStorageを永続ストアとして使う

use doc_verify_common::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage`（呼び出しごとに取得する）
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("window がありません".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage がありません".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Read(js_message(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // 容量超過（QuotaExceededError）もここで返る
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write(js_message(&e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Write(js_message(&e)))
    }
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use doc_verify_common::{HistoryStore, Orchestrator};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TEST_KEY: &str = "doc-verify-wasm-test";

    #[wasm_bindgen_test]
    fn wasm_local_store_round_trip() {
        let mut store = LocalStore;
        store.set(TEST_KEY, "[]").expect("set failed");
        assert_eq!(store.get(TEST_KEY).expect("get failed"), Some("[]".to_string()));

        store.remove(TEST_KEY).expect("remove failed");
        assert_eq!(store.get(TEST_KEY).expect("get failed"), None);
    }

    #[wasm_bindgen_test]
    fn wasm_corrupted_history_loads_empty() {
        let mut store = LocalStore;
        store.set(TEST_KEY, "{not json").expect("set failed");

        let orchestrator = Orchestrator::new(HistoryStore::with_key(LocalStore, TEST_KEY));
        assert!(orchestrator.history().is_empty());

        store.remove(TEST_KEY).expect("remove failed");
    }
}
