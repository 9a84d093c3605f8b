//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("履歴の読み込みに失敗: {0}")]
    PersistenceRead(String),

    #[error("履歴の保存に失敗: {0}")]
    PersistenceWrite(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 解析リクエストの失敗種別
///
/// `Display` はそのまま送信ボタン付近に表示するメッセージになる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// レスポンスを受け取れなかった
    #[error("通信エラー: {0}")]
    Transport(String),

    /// 2xx以外のステータス
    #[error("エラー {status}: 解析サーバーがリクエストを拒否しました")]
    Request { status: u16 },

    /// ファイルの読み込み・エンコード失敗
    #[error("ファイルを読み込めません: {0}")]
    Encoding(String),

    #[error("タイムアウトしました（{0}秒）")]
    Timeout(u64),

    /// 2xxだがAnalysisResultとして解釈できない
    #[error("不正なレスポンス: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    /// HTTPステータス（Requestの場合のみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Request { status } => Some(*status),
            _ => None,
        }
    }
}

/// キーバリューストアのバックエンドエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("ストレージが利用できません: {0}")]
    Unavailable(String),

    #[error("読み込みエラー: {0}")]
    Read(String),

    #[error("書き込みエラー: {0}")]
    Write(String),
}
