//! 解析対象ファイルの読み込み
//!
//! ブラウザのファイル選択 (`accept="image/*,application/pdf"`) に相当し、
//! 画像とPDF以外の拡張子は受け付けない。

use crate::error::{DocVerifyError, Result};
use doc_verify_common::SelectedFile;
use std::path::Path;

const MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("heic", "image/heic"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("pdf", "application/pdf"),
];

/// 拡張子からMIMEタイプを判定（大文字小文字は区別しない）
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

pub fn load_document(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(DocVerifyError::FileNotFound(path.display().to_string()));
    }

    let mime_type = mime_type_for(path)
        .ok_or_else(|| DocVerifyError::UnsupportedFile(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tracing::debug!(file = %name, mime = mime_type, size = bytes.len(), "document loaded");
    Ok(SelectedFile::new(name, mime_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_mime_type_for_known_extensions() {
        assert_eq!(mime_type_for(Path::new("rg.JPG")), Some("image/jpeg"));
        assert_eq!(mime_type_for(Path::new("cnh.png")), Some("image/png"));
        assert_eq!(mime_type_for(Path::new("scan.Pdf")), Some("application/pdf"));
        assert_eq!(mime_type_for(Path::new("notes.txt")), None);
        assert_eq!(mime_type_for(Path::new("no_extension")), None);
    }

    #[test]
    fn test_load_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let file = load_document(&path).unwrap();
        assert_eq!(file.name, "doc.jpg");
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(file.bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_load_missing_document() {
        let err = load_document(Path::new("/nonexistent/doc.jpg")).unwrap_err();
        assert!(matches!(err, DocVerifyError::FileNotFound(_)));
    }

    #[test]
    fn test_load_unsupported_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{}").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, DocVerifyError::UnsupportedFile(_)));
    }
}
