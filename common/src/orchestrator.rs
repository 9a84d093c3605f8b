//! 解析フローの制御
//!
//! 送信ごとの状態遷移: `Idle → Submitting → {成功, 失敗} → Idle`
//!
//! ブラウザではリクエスト中に状態を借用し続けられないため、
//! `begin_submit` と `complete` に分けて呼べるようにしている。
//! CLIやテストでは `submit` でまとめて実行する。

use crate::error::AnalysisError;
use crate::form::FormState;
use crate::request::AnalysisRequest;
use crate::store::{HistoryStore, KeyValueStore};
use crate::types::{AnalysisResult, HistoryEntry};
use chrono::Utc;
use uuid::Uuid;

/// 検証サーバーへの問い合わせ
#[allow(async_fn_in_trait)]
pub trait Analyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// 送信中の1件（送信時点の入力を保持）
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub request: AnalysisRequest,
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// ファイル未選択または解析中
    Skipped,
    Succeeded(HistoryEntry),
    Failed(AnalysisError),
}

pub struct Orchestrator<S> {
    history: Vec<HistoryEntry>,
    error: Option<String>,
    phase: Phase,
    store: HistoryStore<S>,
}

impl<S: KeyValueStore> Orchestrator<S> {
    /// 保存済みの履歴を読み込んで開始
    pub fn new(store: HistoryStore<S>) -> Self {
        let history = store.load();
        tracing::debug!(entries = history.len(), "history loaded");
        Self {
            history,
            error: None,
            phase: Phase::Idle,
            store,
        }
    }

    /// 新しい順
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }

    /// 送信開始
    ///
    /// ファイル未選択・解析中なら何もせず None。
    pub fn begin_submit(&mut self, form: &FormState) -> Option<PendingSubmission> {
        if self.is_submitting() {
            return None;
        }
        let request = form.to_request()?;

        self.phase = Phase::Submitting;
        self.error = None;
        tracing::info!(file = %request.file.name, mime = %request.file.mime_type, "submitting document");

        Some(PendingSubmission {
            request,
            preview: form.preview().map(str::to_string),
        })
    }

    /// 送信完了
    ///
    /// 成功なら履歴の先頭に追加して保存、失敗ならメッセージを保持する。
    /// どちらの場合も Idle に戻る。
    pub fn complete(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> SubmitOutcome {
        self.phase = Phase::Idle;

        match outcome {
            Ok(result) => {
                let PendingSubmission { request, preview } = pending;
                let entry = HistoryEntry {
                    id: self.fresh_id(),
                    file_name: request.file.name,
                    timestamp: Utc::now(),
                    result,
                    prompt: request.prompt,
                    name: request.name,
                    national_id: request.national_id,
                    preview,
                };
                tracing::info!(id = %entry.id, file = %entry.file_name, "analysis completed");

                self.error = None;
                self.history.insert(0, entry.clone());
                self.store.save(&self.history);
                SubmitOutcome::Succeeded(entry)
            }
            Err(e) => {
                tracing::warn!(file = %pending.request.file.name, error = %e, "analysis failed");
                self.fail(&e);
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// 送信とは別に起きた失敗（ファイル読み込みなど）を記録
    ///
    /// フェーズは変えない。送信中の場合は `complete` まで `Submitting` のまま。
    pub fn fail(&mut self, error: &AnalysisError) {
        self.error = Some(error.to_string());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// 送信から完了までを一括で実行
    pub async fn submit<A: Analyzer>(&mut self, analyzer: &A, form: &FormState) -> SubmitOutcome {
        let Some(pending) = self.begin_submit(form) else {
            return SubmitOutcome::Skipped;
        };
        let outcome = analyzer.analyze(&pending.request).await;
        self.complete(pending, outcome)
    }

    /// 履歴をメモリと保存先の両方から消す
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.store.clear();
        tracing::info!("history cleared");
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.history.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }
}
