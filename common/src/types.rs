//! 解析結果・履歴の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - AnalysisResult: 検証サーバーが返す判定
//! - HistoryEntry: 1回分の解析（入力・判定・表示用メタデータ）

use crate::error::AnalysisError;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 既知フィールドの値の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Bool,
    Text,
    Number,
    TextList,
}

impl FieldKind {
    /// `null` は「値なし」として常に受け入れる
    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (FieldKind::Bool, Value::Bool(_)) => true,
            (FieldKind::Text, Value::String(_)) => true,
            (FieldKind::Number, Value::Number(_)) => true,
            (FieldKind::TextList, Value::Array(items)) => items.iter().all(Value::is_string),
            _ => false,
        }
    }
}

/// (フィールド名, 旧名, 型)
const FIELDS: [(&str, &str, FieldKind); 7] = [
    ("isValid", "ehValido", FieldKind::Bool),
    ("documentType", "tipoDocumento", FieldKind::Text),
    ("confidence", "confianca", FieldKind::Number),
    ("reason", "motivo", FieldKind::Text),
    ("likelyAuthentic", "autenticidadeProvavel", FieldKind::Bool),
    ("suspicionScore", "scoreSuspeito", FieldKind::Number),
    ("attentionPoints", "pontosDeAtencao", FieldKind::TextList),
];

/// 検証サーバーの判定
///
/// サーバー側のスキーマは保証されていないため、受け取ったJSONオブジェクトを
/// そのまま保持し、既知フィールドはアクセサで読む。表示・保存時は受信した
/// 内容（数値表現や `null` を含む）を変えずに書き戻す。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult {
    fields: Map<String, Value>,
}

impl AnalysisResult {
    pub const KNOWN_FIELDS: [&'static str; 7] = [
        "isValid",
        "documentType",
        "confidence",
        "reason",
        "likelyAuthentic",
        "suspicionScore",
        "attentionPoints",
    ];

    /// レスポンスJSONを境界で検証して取り込む
    ///
    /// オブジェクト以外、または既知フィールドの型違いは `InvalidResponse`。
    pub fn from_value(value: Value) -> Result<Self, AnalysisError> {
        let Value::Object(fields) = value else {
            return Err(AnalysisError::InvalidResponse(
                "JSON object not found".to_string(),
            ));
        };

        for (name, legacy, kind) in FIELDS {
            for key in [name, legacy] {
                if let Some(value) = fields.get(key) {
                    if !kind.accepts(value) {
                        return Err(AnalysisError::InvalidResponse(format!(
                            "invalid type for field `{}`: {}",
                            key, value
                        )));
                    }
                }
            }
        }

        let result = Self { fields };

        let unexpected = result.unexpected_fields();
        if !unexpected.is_empty() {
            tracing::warn!(fields = ?unexpected, "analysis result has unexpected fields");
        }
        let missing = result.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(fields = ?missing, "analysis result is missing fields");
        }

        Ok(result)
    }

    /// 既知フィールドの値（旧名も見る）
    fn field(&self, name: &str) -> Option<&Value> {
        FIELDS
            .iter()
            .find(|(known, _, _)| *known == name)
            .and_then(|(known, legacy, _)| self.fields.get(*known).or_else(|| self.fields.get(*legacy)))
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn is_valid(&self) -> Option<bool> {
        self.field("isValid").and_then(Value::as_bool)
    }

    pub fn document_type(&self) -> Option<&str> {
        self.text("documentType")
    }

    pub fn confidence(&self) -> Option<f64> {
        self.field("confidence").and_then(Value::as_f64)
    }

    pub fn reason(&self) -> Option<&str> {
        self.text("reason")
    }

    pub fn likely_authentic(&self) -> Option<bool> {
        self.field("likelyAuthentic").and_then(Value::as_bool)
    }

    pub fn suspicion_score(&self) -> Option<f64> {
        self.field("suspicionScore").and_then(Value::as_f64)
    }

    pub fn attention_points(&self) -> Option<Vec<&str>> {
        self.field("attentionPoints")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
    }

    /// 受信したままのJSONオブジェクト
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// スキーマにないフィールド名
    pub fn unexpected_fields(&self) -> Vec<&str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|key| {
                !FIELDS
                    .iter()
                    .any(|(name, legacy, _)| key == name || key == legacy)
            })
            .collect()
    }

    /// 欠けている既知フィールド名（`null` は存在扱い）
    pub fn missing_fields(&self) -> Vec<&'static str> {
        FIELDS
            .iter()
            .filter(|(name, legacy, _)| {
                !self.fields.contains_key(*name) && !self.fields.contains_key(*legacy)
            })
            .map(|(name, _, _)| *name)
            .collect()
    }

    /// 表示用の整形済みJSON
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// 解析履歴の1件
///
/// `preview` はセッション中のメモリ上にだけ存在し、永続化されない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub file_name: String,
    pub timestamp: DateTime<Utc>,
    pub result: AnalysisResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    #[serde(default, alias = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, alias = "cpf", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,

    /// 画像のData URL（画像アップロード時のみ）
    #[serde(skip)]
    pub preview: Option<String>,
}

impl HistoryEntry {
    /// 送信時刻（ローカル時刻 HH:MM:SS）
    pub fn local_time_label(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }

    /// 氏名・ID・プロンプトのいずれかがあるか
    pub fn has_context(&self) -> bool {
        self.prompt.is_some() || self.name.is_some() || self.national_id.is_some()
    }
}
