//! アップロードフォームの状態
//!
//! ファイル選択・プレビュー・プロンプト・本人情報を保持し、
//! 送信可否を判定する。描画は各フロントエンド側。

use crate::national_id::format_national_id;
use crate::orchestrator::Phase;
use crate::request::{AnalysisRequest, SelectedFile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    file: Option<SelectedFile>,
    preview: Option<String>,
    pub prompt: String,
    pub name: String,
    national_id: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを選択する
    ///
    /// 画像ならプレビューを作り、それ以外はプレビューを消す。
    /// プレビューが作れない場合も未設定のまま続行する。
    pub fn select_file(&mut self, file: SelectedFile) {
        self.preview = if file.is_image() {
            file.preview_data_url()
        } else {
            None
        };
        self.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.file = None;
        self.preview = None;
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 入力値をマスク整形して保持し、整形後の値を返す
    pub fn set_national_id(&mut self, raw: &str) -> &str {
        self.national_id = format_national_id(raw);
        &self.national_id
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    /// ファイル未選択・解析中は送信不可
    pub fn can_submit(&self, phase: Phase) -> bool {
        self.file.is_some() && phase == Phase::Idle
    }

    /// 現在の入力からリクエストを作る（ファイル未選択なら None）
    pub fn to_request(&self) -> Option<AnalysisRequest> {
        self.file.as_ref().map(|file| {
            AnalysisRequest::new(file.clone(), &self.prompt, &self.name, &self.national_id)
        })
    }
}
