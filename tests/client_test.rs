//! HTTPクライアントテスト
//!
//! モックサーバーに対する送信形式・エラー分類を検証

use doc_verify::client::HttpAnalyzer;
use doc_verify_common::{
    AnalysisError, AnalysisRequest, Analyzer, ClientConfig, RequestFormat, SelectedFile,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn verdict() -> serde_json::Value {
    json!({
        "isValid": true,
        "documentType": "RG",
        "confidence": 0.95,
        "reason": "ok",
        "likelyAuthentic": true,
        "suspicionScore": 0.02,
        "attentionPoints": []
    })
}

fn jpeg_request(prompt: &str, name: &str, national_id: &str) -> AnalysisRequest {
    let file = SelectedFile::new("doc.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
    AnalysisRequest::new(file, prompt, name, national_id)
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(format!("{}/v1/analyze", server.uri()))
}

/// JSON形式: Base64と本人情報を個別フィールドで送る
#[tokio::test]
async fn test_json_request_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "imageBase64": "/9j/4A==",
            "mimeType": "image/jpeg",
            "name": "João",
            "nationalId": "123.456.789-01"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(verdict()))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = HttpAnalyzer::new(config_for(&server)).expect("クライアント作成失敗");
    let result = analyzer
        .analyze(&jpeg_request("", " João ", "123.456.789-01"))
        .await
        .expect("解析失敗");

    assert_eq!(result.document_type(), Some("RG"));
    assert_eq!(serde_json::to_value(&result).unwrap(), verdict());
}

/// APIキーはヘッダで送る
#[tokio::test]
async fn test_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-api-key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verdict()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_api_key("secret-key");
    let analyzer = HttpAnalyzer::new(config).unwrap();
    assert!(analyzer.analyze(&jpeg_request("", "", "")).await.is_ok());
}

/// Multipart形式: file + prompt（本人情報はプロンプトに連結）
#[tokio::test]
async fn test_multipart_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"file\"; filename=\"doc.jpg\""))
        .and(body_string_contains("name=\"prompt\""))
        .and(body_string_contains("foque na foto"))
        .and(body_string_contains("Maria"))
        .and(body_string_contains("fake-jpeg-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verdict()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_format(RequestFormat::Multipart);
    let analyzer = HttpAnalyzer::new(config).unwrap();
    // 本文を文字列として照合するためASCIIの中身にする
    let file = SelectedFile::new("doc.jpg", "image/jpeg", b"fake-jpeg-bytes".to_vec());
    let result = analyzer
        .analyze(&AnalysisRequest::new(file, "foque na foto", "Maria", ""))
        .await
        .expect("解析失敗");
    assert_eq!(result.is_valid(), Some(true));
}

/// 2xx以外はステータス付きのエラー
#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let analyzer = HttpAnalyzer::new(config_for(&server)).unwrap();
    let err = analyzer.analyze(&jpeg_request("", "", "")).await.unwrap_err();

    assert_eq!(err, AnalysisError::Request { status: 500 });
    assert!(err.to_string().contains("500"));
}

/// 2xxでもJSONでなければ不正なレスポンス
#[tokio::test]
async fn test_success_with_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let analyzer = HttpAnalyzer::new(config_for(&server)).unwrap();
    let err = analyzer.analyze(&jpeg_request("", "", "")).await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidResponse(_)));
}

/// 応答が遅すぎる場合はタイムアウト
#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(verdict())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout_seconds(1);
    let analyzer = HttpAnalyzer::new(config).unwrap();
    let err = analyzer.analyze(&jpeg_request("", "", "")).await.unwrap_err();
    assert_eq!(err, AnalysisError::Timeout(1));
}

/// 接続できない場合は通信エラー
#[tokio::test]
async fn test_connection_refused() {
    let analyzer = HttpAnalyzer::new(ClientConfig::new("http://127.0.0.1:1/v1/analyze")).unwrap();
    let err = analyzer.analyze(&jpeg_request("", "", "")).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Transport(_)));
}

/// 空ファイルは送信しない
#[tokio::test]
async fn test_empty_file_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verdict()))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = HttpAnalyzer::new(config_for(&server)).unwrap();
    let empty = SelectedFile::new("empty.pdf", "application/pdf", vec![]);
    let err = analyzer
        .analyze(&AnalysisRequest::new(empty, "", "", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Encoding(_)));
}

/// 不正な設定ではクライアントを作らない
#[test]
fn test_invalid_config_rejected() {
    assert!(HttpAnalyzer::new(ClientConfig::new("not a url")).is_err());
}
