//! 解析履歴のテキスト表示

use chrono::Local;
use doc_verify_common::HistoryEntry;

/// 履歴一覧（空なら空文字列）
pub fn render_history(history: &[HistoryEntry]) -> String {
    if history.is_empty() {
        return String::new();
    }

    let mut out = format!("履歴 — {}件\n", history.len());
    for entry in history {
        out.push('\n');
        out.push_str(&render_entry(entry));
    }
    out
}

/// 1件分の表示
pub fn render_entry(entry: &HistoryEntry) -> String {
    let mark = match entry.result.is_valid() {
        Some(true) => "●",
        Some(false) => "✖",
        None => "?",
    };
    let time = entry
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");

    let mut lines = vec![format!("{} {}  ({})", mark, entry.file_name, time)];

    // 書類
    lines.push(match &entry.preview {
        Some(preview) => format!("  書類: 画像プレビューあり ({} bytes)", preview.len()),
        None => format!("  書類: 📄 {}", entry.file_name),
    });

    // 文脈
    let context = [
        ("氏名", &entry.name),
        ("CPF", &entry.national_id),
        ("プロンプト", &entry.prompt),
    ];
    for (label, value) in context {
        if let Some(value) = value {
            lines.push(format!("  {}: {}", label, value));
        }
    }
    if !entry.has_context() {
        lines.push("  追加の文脈なし".to_string());
    }

    // APIレスポンス
    lines.push("  APIレスポンス:".to_string());
    lines.extend(
        entry
            .result
            .to_pretty_json()
            .lines()
            .map(|line| format!("    {}", line)),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use doc_verify_common::AnalysisResult;
    use serde_json::json;

    fn entry() -> HistoryEntry {
        HistoryEntry {
            id: "1".to_string(),
            file_name: "rg.pdf".to_string(),
            timestamp: Utc::now(),
            result: AnalysisResult::from_value(json!({
                "isValid": false,
                "reason": "foto colada"
            }))
            .unwrap(),
            prompt: None,
            name: None,
            national_id: None,
            preview: None,
        }
    }

    #[test]
    fn test_empty_history_renders_nothing() {
        assert_eq!(render_history(&[]), "");
    }

    #[test]
    fn test_render_without_context() {
        let text = render_history(&[entry()]);
        assert!(text.starts_with("履歴 — 1件"));
        assert!(text.contains("✖ rg.pdf"));
        assert!(text.contains("📄 rg.pdf"));
        assert!(text.contains("追加の文脈なし"));
        assert!(text.contains("\"reason\": \"foto colada\""));
    }

    #[test]
    fn test_render_with_context() {
        let mut e = entry();
        e.name = Some("Ana".to_string());
        e.national_id = Some("123.456.789-01".to_string());
        e.prompt = Some("verifique a assinatura".to_string());
        e.preview = Some("data:image/png;base64,AAAA".to_string());

        let text = render_entry(&e);
        assert!(text.contains("氏名: Ana"));
        assert!(text.contains("CPF: 123.456.789-01"));
        assert!(text.contains("プロンプト: verifique a assinatura"));
        assert!(text.contains("画像プレビューあり"));
        assert!(!text.contains("追加の文脈なし"));
    }

    #[test]
    fn test_render_layout_and_response_as_received() {
        let mut e = entry();
        e.result = AnalysisResult::from_value(json!({
            "isValid": true,
            "suspicionScore": 0,
            "reason": null
        }))
        .unwrap();
        e.name = Some("Ana".to_string());

        let text = render_entry(&e);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("● rg.pdf  ("));
        assert_eq!(lines[1], "  書類: 📄 rg.pdf");
        assert_eq!(lines[2], "  氏名: Ana");
        assert_eq!(lines[3], "  APIレスポンス:");
        assert_eq!(lines[4], "    {");
        assert_eq!(lines[5], "      \"isValid\": true,");
        assert_eq!(lines[6], "      \"suspicionScore\": 0,");
        assert_eq!(lines[7], "      \"reason\": null");
        assert_eq!(lines[8], "    }");
        assert!(text.ends_with("}\n"));
    }
}
