use clap::Parser;
use doc_verify::{cli, client, config, document, error, store, view};
use cli::{Cli, Commands};
use config::Config;
use doc_verify_common::{format_national_id, FormState, HistoryStore, Orchestrator, SubmitOutcome};
use error::{DocVerifyError, Result};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn history_store(config: &Config) -> Result<HistoryStore<store::FileStore>> {
    Ok(HistoryStore::new(store::FileStore::new(config.history_dir()?)))
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze { file, prompt, name, national_id, format, endpoint, timeout, json } => {
            let config = Config::load()?;
            let mut client_config = config.client_config();
            if let Some(format) = format {
                client_config.request_format = format.into();
            }
            if let Some(endpoint) = endpoint {
                client_config.endpoint = endpoint;
            }
            if let Some(timeout) = timeout {
                client_config.timeout_seconds = timeout;
            }
            let analyzer = client::HttpAnalyzer::new(client_config)?;

            let mut form = FormState::new();
            form.select_file(document::load_document(&file)?);
            form.set_prompt(prompt.unwrap_or_default());
            form.set_name(name.unwrap_or_default());
            form.set_national_id(national_id.as_deref().unwrap_or_default());

            if !json {
                println!("🔍 {} を解析中...", file.display());
            }

            let mut orchestrator = Orchestrator::new(history_store(&config)?);
            match orchestrator.submit(&analyzer, &form).await {
                SubmitOutcome::Succeeded(entry) => {
                    if json {
                        println!("{}", entry.result.to_pretty_json());
                    } else {
                        print!("{}", view::render_entry(&entry));
                        println!("\n✅ 解析完了（履歴 {}件）", orchestrator.history().len());
                    }
                }
                SubmitOutcome::Failed(e) => return Err(e.into()),
                SubmitOutcome::Skipped => {
                    return Err(DocVerifyError::Config("ファイルが選択されていません".into()));
                }
            }
        }

        Commands::History { clear, info } => {
            let config = Config::load()?;
            let history_store = history_store(&config)?;
            let path = history_store.store().path_for(history_store.key());

            if info {
                println!("履歴情報:");
                println!("  パス: {}", path.display());
                match history_store.try_load() {
                    Ok(entries) => println!("  件数: {}", entries.len()),
                    Err(e) => println!("  読み込みエラー: {}", e),
                }
                if let Ok(meta) = std::fs::metadata(&path) {
                    println!("  サイズ: {} bytes", meta.len());
                }
            }

            let mut orchestrator = Orchestrator::new(history_store);
            if clear {
                orchestrator.clear_history();
                println!("✔ 履歴を削除しました");
            } else if !info {
                let text = view::render_history(orchestrator.history());
                if text.is_empty() {
                    println!("履歴はありません");
                } else {
                    print!("{}", text);
                }
            }
        }

        Commands::Config { set_endpoint, set_api_key, show } => {
            // 書き込み時は壊れた設定ファイルを上書きできるようにする
            let mut config = if set_endpoint.is_some() || set_api_key.is_some() {
                Config::load_or_default()?
            } else {
                Config::load()?
            };

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                let client = config.client_config();
                println!("設定:");
                println!("  エンドポイント: {}", client.endpoint);
                println!("  リクエスト形式: {}", client.request_format);
                println!("  タイムアウト: {}秒", client.timeout_seconds);
                println!("  APIキー: {}", if client.api_key().is_some() { "設定済み" } else { "未設定" });
                println!("  履歴: {}", config.history_dir()?.display());
            }
        }

        Commands::FormatId { raw } => {
            println!("{}", format_national_id(&raw));
        }
    }

    Ok(())
}
