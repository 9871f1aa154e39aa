//! Data-URL encoding for image payloads.
//!
//! Images travel through the crate as data URLs (`data:<mime>;base64,<payload>`)
//! so the same string can be rendered by a consumer and unpacked for the API.

use crate::error::{Result, ToonifyError};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;

/// Assumed when an input data URL has no parseable MIME prefix.
pub const DEFAULT_INPUT_MIME: &str = "image/jpeg";
/// Assumed when a generated image part declares no MIME type.
pub const DEFAULT_OUTPUT_MIME: &str = "image/png";

/// Upload cap, matching the 5 MB limit enforced at intake.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Builds a data URL from raw image bytes and a MIME type.
pub fn to_data_url(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Extracts the MIME type from a `data:image/...;base64,` prefix.
///
/// Falls back to [`DEFAULT_INPUT_MIME`] when the input is not a well-formed
/// image data URL. The fallback is a documented heuristic, not an error.
pub fn mime_type_of(data_url: &str) -> &str {
    match split_data_url(data_url) {
        Some((mime_type, _)) => mime_type,
        None => DEFAULT_INPUT_MIME,
    }
}

/// Removes the `data:image/...;base64,` prefix, leaving the raw base64 payload.
///
/// Inputs without the prefix are returned unchanged, so the call is idempotent.
pub fn strip_prefix(data_url: &str) -> &str {
    match split_data_url(data_url) {
        Some((_, payload)) => payload,
        None => data_url,
    }
}

/// Reads an image file and encodes it as a data URL.
///
/// Performs the intake checks the caller is responsible for: the file must be
/// an `image/*` type (sniffed from magic bytes, file extension as fallback)
/// and at most [`MAX_UPLOAD_BYTES`] long.
pub async fn encode_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ToonifyError::EncodingFailure(format!("{}: {}", path.display(), e)))?;
    if metadata.len() > MAX_UPLOAD_BYTES {
        return Err(ToonifyError::FileTooLarge {
            size: metadata.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ToonifyError::EncodingFailure(format!("{}: {}", path.display(), e)))?;

    let mime_type = sniff_mime(&bytes)
        .or_else(|| mime_from_extension(path))
        .ok_or_else(|| ToonifyError::InvalidFileType(path.display().to_string()))?;

    Ok(to_data_url(&bytes, mime_type))
}

/// Splits a data URL into `(mime_type, payload)`, accepting only `image/<word>`
/// MIME types per the `data:(image/\w+);base64,` shape.
fn split_data_url(data_url: &str) -> Option<(&str, &str)> {
    let rest = data_url.strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;
    let subtype = mime_type.strip_prefix("image/")?;
    if subtype.is_empty()
        || !subtype
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        return None;
    }
    Some((mime_type, payload))
}

/// Detects the image MIME type from magic bytes.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    // WebP: RIFF....WEBP
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    // GIF: GIF87a / GIF89a
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    None
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    match path
        .extension()?
        .to_str()?
        .to_ascii_lowercase()
        .as_str()
    {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_data_url() {
        assert_eq!(
            to_data_url(b"hello", "image/png"),
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_strip_prefix_round_trips_encode() {
        let bytes = b"\x89PNG\r\n\x1a\nrest-of-image";
        let data_url = to_data_url(bytes, "image/png");
        assert_eq!(strip_prefix(&data_url), STANDARD.encode(bytes));
    }

    #[test]
    fn test_mime_type_of_parses_prefix() {
        assert_eq!(mime_type_of("data:image/jpeg;base64,abcd"), "image/jpeg");
        assert_eq!(mime_type_of("data:image/webp;base64,abcd"), "image/webp");
    }

    #[test]
    fn test_mime_type_of_falls_back_to_jpeg() {
        assert_eq!(mime_type_of("not-a-data-url"), DEFAULT_INPUT_MIME);
        assert_eq!(mime_type_of("data:text/plain;base64,abcd"), DEFAULT_INPUT_MIME);
        assert_eq!(mime_type_of(""), DEFAULT_INPUT_MIME);
    }

    #[test]
    fn test_strip_prefix_removes_data_url_header() {
        assert_eq!(strip_prefix("data:image/png;base64,XYZ"), "XYZ");
    }

    #[test]
    fn test_strip_prefix_is_a_no_op_without_prefix() {
        assert_eq!(strip_prefix("XYZ"), "XYZ");
        assert_eq!(strip_prefix("data:text/plain;base64,XYZ"), "data:text/plain;base64,XYZ");
    }

    #[test]
    fn test_strip_prefix_is_idempotent() {
        let stripped = strip_prefix("data:image/jpeg;base64,abc123");
        assert_eq!(strip_prefix(stripped), stripped);
    }

    #[test]
    fn test_sniff_mime_known_formats() {
        assert_eq!(
            sniff_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0]),
            Some("image/png")
        );
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"GIF89a\x00\x00"), Some("image/gif"));
        assert_eq!(sniff_mime(b"plain text"), None);
    }

    #[tokio::test]
    async fn test_encode_file_reads_and_encodes() {
        let dir = std::env::temp_dir();
        let path = dir.join("toonify_encode_test.png");
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
        std::fs::write(&path, bytes).unwrap();

        let data_url = encode_file(&path).await.unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));
        assert_eq!(strip_prefix(&data_url), STANDARD.encode(bytes));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_encode_file_rejects_non_image() {
        let dir = std::env::temp_dir();
        let path = dir.join("toonify_encode_test.txt");
        std::fs::write(&path, b"just some text").unwrap();

        let err = encode_file(&path).await.unwrap_err();
        assert!(matches!(err, ToonifyError::InvalidFileType(_)));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_encode_file_rejects_oversized_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("toonify_encode_test_oversized.png");
        std::fs::write(&path, vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize]).unwrap();

        let err = encode_file(&path).await.unwrap_err();
        match err {
            ToonifyError::FileTooLarge { size, limit } => {
                assert_eq!(size, MAX_UPLOAD_BYTES + 1);
                assert_eq!(limit, MAX_UPLOAD_BYTES);
            }
            other => panic!("expected FileTooLarge, got {:?}", other),
        }

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_encode_file_missing_file_is_encoding_failure() {
        let err = encode_file("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, ToonifyError::EncodingFailure(_)));
    }
}
