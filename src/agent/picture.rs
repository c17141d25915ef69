//! Local image upload → embeddable `data:` URI.

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;

use super::draft::AgentDraft;

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Encode raw bytes as a base64 data URI.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, b64)
}

impl AgentDraft {
    /// Read an image file and store it inline as the agent picture.
    /// The draft is left untouched when the file cannot be read.
    pub fn load_picture(&mut self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        self.picture = to_data_uri(mime_for(path), &bytes);
        tracing::info!(
            "[draft] picture loaded from {} ({} bytes)",
            path.display(),
            bytes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::draft::DEFAULT_PICTURE;
    use std::io::Write;

    #[test]
    fn test_data_uri_encoding() {
        assert_eq!(to_data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_load_picture_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".PNG")
            .tempfile()
            .expect("tempfile");
        file.write_all(b"abc").expect("write");

        let mut draft = AgentDraft::default();
        draft.load_picture(file.path()).expect("load");
        assert_eq!(draft.picture, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_load_picture_unknown_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".bin")
            .tempfile()
            .expect("tempfile");
        file.write_all(&[0xff]).expect("write");

        let mut draft = AgentDraft::default();
        draft.load_picture(file.path()).expect("load");
        assert!(draft.picture.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_missing_file_keeps_picture() {
        let mut draft = AgentDraft::default();
        let err = draft.load_picture(Path::new("/definitely/not/here.png"));
        assert!(err.is_err());
        assert_eq!(draft.picture, DEFAULT_PICTURE);
    }
}
