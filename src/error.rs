use doc_verify_common::AnalysisError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocVerifyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です（画像またはPDFのみ）: {0}")]
    UnsupportedFile(String),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("履歴エラー: {0}")]
    History(#[from] doc_verify_common::Error),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    HttpClient(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocVerifyError>;
