use clap::{Parser, Subcommand, ValueEnum};
use doc_verify_common::RequestFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doc-verify")]
#[command(about = "身分証明書（画像/PDF）をAI検証サーバーで解析する", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 書類を解析して履歴に追加
    Analyze {
        /// 書類ファイル（画像またはPDF）
        #[arg(required = true)]
        file: PathBuf,

        /// 追加の指示（任意）
        #[arg(short, long)]
        prompt: Option<String>,

        /// 氏名（任意）
        #[arg(short, long)]
        name: Option<String>,

        /// CPF（任意、数字以外は無視）
        #[arg(long, alias = "cpf")]
        national_id: Option<String>,

        /// リクエスト形式 (json/multipart)
        #[arg(short, long)]
        format: Option<PayloadFormat>,

        /// エンドポイントURL（設定より優先）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// タイムアウト秒数
        #[arg(short, long)]
        timeout: Option<u64>,

        /// 判定JSONのみ出力
        #[arg(long)]
        json: bool,
    },

    /// 解析履歴の表示・削除
    History {
        /// 履歴を削除
        #[arg(long)]
        clear: bool,

        /// 保存先の情報を表示
        #[arg(long)]
        info: bool,
    },

    /// 設定
    Config {
        /// エンドポイントURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },

    /// CPFを 000.000.000-00 形式に整形
    FormatId {
        #[arg(required = true)]
        raw: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PayloadFormat {
    Json,
    Multipart,
}

impl From<PayloadFormat> for RequestFormat {
    fn from(format: PayloadFormat) -> Self {
        match format {
            PayloadFormat::Json => RequestFormat::Json,
            PayloadFormat::Multipart => RequestFormat::Multipart,
        }
    }
}
