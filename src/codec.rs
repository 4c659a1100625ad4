//! Upload-side image handling: format detection and file decoding.

use crate::error::{MogError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image formats accepted for upload and expected from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Attempts to detect format from a MIME type string.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// A user-selected photo, encoded and ready to send.
///
/// Created by [`read_image`]; owned by the controller, never mutated in
/// place, only replaced on a new upload or dropped on reset.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Base64-encoded image bytes (no data-URL prefix).
    pub data: String,
    /// Declared media type of the selected file, e.g. `image/png`.
    pub mime_type: String,
}

impl UploadedImage {
    /// Returns the image as a data URL, as a rendering layer would embed it.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Returns the media type a file's extension declares, if any.
///
/// Broader than [`ImageFormat`]: the upload side accepts any declared
/// `image/*` type, while `ImageFormat` only covers what the service is
/// expected to return.
fn declared_media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    match ext.to_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "avif" => Some("image/avif"),
        "heic" => Some("image/heic"),
        "txt" => Some("text/plain"),
        "pdf" => Some("application/pdf"),
        "mp4" => Some("video/mp4"),
        _ => None,
    }
}

/// Reads a user-selected file into an [`UploadedImage`].
///
/// The file's declared media type (from its extension) must begin with
/// `image/`; anything else is rejected with [`MogError::InvalidInput`]
/// before touching the file system. Read failures surface as
/// [`MogError::Read`].
pub async fn read_image(path: impl AsRef<Path>) -> Result<UploadedImage> {
    let path = path.as_ref();

    let mime_type = declared_media_type(path)
        .filter(|m| m.starts_with("image/"))
        .ok_or_else(|| MogError::InvalidInput(path.display().to_string()))?;

    let bytes = tokio::fs::read(path).await?;

    Ok(UploadedImage {
        data: base64::engine::general_purpose::STANDARD.encode(&bytes),
        mime_type: mime_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"not an image"), None);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("webp"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_format_from_mime_type() {
        assert_eq!(
            ImageFormat::from_mime_type("image/png"),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::from_mime_type("text/plain"), None);
    }

    #[test]
    fn test_data_url() {
        let upload = UploadedImage {
            data: "aGVsbG8=".into(),
            mime_type: "image/png".into(),
        };
        assert_eq!(upload.to_data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_read_image_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let upload = read_image(&path).await.unwrap();
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!(
            upload.data,
            base64::engine::general_purpose::STANDARD.encode(PNG_MAGIC)
        );
    }

    #[tokio::test]
    async fn test_read_image_accepts_any_declared_image_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animation.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let upload = read_image(&path).await.unwrap();
        assert_eq!(upload.mime_type, "image/gif");
    }

    #[tokio::test]
    async fn test_read_image_rejects_non_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = read_image(&path).await.unwrap_err();
        assert!(matches!(err, MogError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_read_image_rejects_missing_extension() {
        let err = read_image("/tmp/no-extension").await.unwrap_err();
        assert!(matches!(err, MogError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_read_image_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jpg");

        let err = read_image(&path).await.unwrap_err();
        assert!(matches!(err, MogError::Read(_)));
    }
}
