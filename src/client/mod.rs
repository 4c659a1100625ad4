//! Transformation client: the trait boundary and its Gemini implementation.

mod gemini;

pub use gemini::{GeminiTransformer, GeminiTransformerBuilder, MOG_PROMPT};

use crate::codec::{ImageFormat, UploadedImage};
use crate::error::Result;
use async_trait::async_trait;
use base64::Engine;
use std::io;
use std::path::Path;

/// A service that reinterprets an uploaded photo as a stylized image.
///
/// One call issues exactly one remote request; implementations perform no
/// caching, retry, or backoff. A failed call is one reported failure.
#[async_trait]
pub trait Transformer: Send + Sync {
    /// Transforms the uploaded image, returning the stylized result.
    async fn transform(&self, image: &UploadedImage) -> Result<MoggedImage>;

    /// Returns the name of this transformer for display.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// The stylized image returned by a [`Transformer`].
#[derive(Debug, Clone)]
#[must_use = "mogged image should be saved or displayed"]
pub struct MoggedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Image format, as reported by the service or detected from the bytes.
    pub format: ImageFormat,
}

impl MoggedImage {
    /// Creates a new mogged image.
    pub fn new(data: Vec<u8>, format: ImageFormat) -> Self {
        Self { data, format }
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Saves the image to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, &self.data)
    }

    /// Encodes the image data as base64.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Returns the image as a data URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            self.to_base64()
        )
    }
}
