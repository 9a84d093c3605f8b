//! CLIの起動テスト（設定ファイルが壊れている場合）

use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn doc_verify(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_doc-verify"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local").join("share"))
        .env_remove("DOC_VERIFY_ENDPOINT")
        .env_remove("DOC_VERIFY_API_KEY")
        .output()
        .expect("Failed to run doc-verify")
}

fn write_broken_config(home: &Path) -> std::path::PathBuf {
    let dir = home.join(".config").join("doc-verify");
    std::fs::create_dir_all(&dir).expect("Failed to create config dir");
    let path = dir.join("config.json");
    std::fs::write(&path, "{ not json").expect("Failed to write config");
    path
}

/// 設定を使わないコマンドは壊れた設定の影響を受けない
#[test]
fn test_format_id_ignores_broken_config() {
    let home = tempdir().expect("Failed to create temp dir");
    write_broken_config(home.path());

    let output = doc_verify(home.path(), &["format-id", "12345678901"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "123.456.789-01");
}

/// エンドポイント設定で壊れた設定ファイルを修復できる
#[test]
fn test_set_endpoint_repairs_broken_config() {
    let home = tempdir().expect("Failed to create temp dir");
    let path = write_broken_config(home.path());

    let output = doc_verify(
        home.path(),
        &["config", "--set-endpoint", "https://verify.example.com/v1/analyze"],
    );
    assert!(output.status.success());

    let content = std::fs::read_to_string(&path).expect("Failed to read config");
    let value: serde_json::Value = serde_json::from_str(&content).expect("設定がJSONではない");
    assert_eq!(value["endpoint"], "https://verify.example.com/v1/analyze");
}

/// 設定を読むコマンドは壊れた設定をエラーとして報告する
#[test]
fn test_show_reports_broken_config() {
    let home = tempdir().expect("Failed to create temp dir");
    write_broken_config(home.path());

    let output = doc_verify(home.path(), &["config", "--show"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("❌"));
}
