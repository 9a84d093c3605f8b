//! Document Verify Common Library
//!
//! CLIとWeb(WASM)で共有される型・履歴ストア・解析フロー

pub mod config;
pub mod error;
pub mod form;
pub mod national_id;
pub mod orchestrator;
pub mod protocol;
pub mod request;
pub mod store;
pub mod types;

pub use config::{ClientConfig, RequestFormat};
pub use error::{AnalysisError, Error, Result, StoreError};
pub use form::FormState;
pub use national_id::format_national_id;
pub use orchestrator::{Analyzer, Orchestrator, PendingSubmission, Phase, SubmitOutcome};
pub use protocol::{parse_response, JsonPayload};
pub use request::{AnalysisRequest, SelectedFile};
pub use store::{HistoryStore, KeyValueStore, MemoryStore, HISTORY_KEY};
pub use types::{AnalysisResult, HistoryEntry};
