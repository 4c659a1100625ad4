//! Gemini-backed transformer.

use crate::client::{MoggedImage, Transformer};
use crate::codec::{ImageFormat, UploadedImage};
use crate::error::{MogError, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// The fixed stylistic instruction sent with every transformation request.
pub const MOG_PROMPT: &str = "Transform the person in this image into an anthropomorphic frog, \
blending their features with those of a frog. The frog should have very large, glossy, and \
expressive eyes. Maintain the overall composition of the original image but reinterpret the \
subject in this new form. The final image should be a photorealistic, high-contrast, \
monochromatic charcoal drawing. The style should be dramatic and artistic, with deep blacks, \
strong lighting, and a texture resembling a detailed sketch on high-quality, textured paper.";

/// Builder for [`GeminiTransformer`].
#[derive(Debug, Clone, Default)]
pub struct GeminiTransformerBuilder {
    api_key: Option<String>,
    model: Option<String>,
    prompt: Option<String>,
    endpoint: Option<String>,
}

impl GeminiTransformerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to the `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Overrides the instruction text ([`MOG_PROMPT`] by default).
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Overrides the service endpoint, e.g. to point at a mock server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Builds the transformer, resolving the API key.
    pub fn build(self) -> Result<GeminiTransformer> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                MogError::Configuration("GOOGLE_API_KEY not set and no API key provided".into())
            })?;

        Ok(GeminiTransformer {
            client: reqwest::Client::new(),
            api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.into()),
            prompt: self.prompt.unwrap_or_else(|| MOG_PROMPT.into()),
            endpoint: self.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
        })
    }
}

/// Transformer backed by the Gemini image model.
///
/// One `transform` call is one `generateContent` request. Transport and
/// protocol failures are logged with their detail and surfaced uniformly as
/// [`MogError::ServiceFailed`]; the caller never sees the raw error.
pub struct GeminiTransformer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    prompt: String,
    endpoint: String,
}

impl GeminiTransformer {
    /// Creates a new `GeminiTransformerBuilder`.
    pub fn builder() -> GeminiTransformerBuilder {
        GeminiTransformerBuilder::new()
    }

    async fn transform_impl(&self, image: &UploadedImage) -> Result<MoggedImage> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model,
        );

        let body = GeminiRequest::new(image, &self.prompt);

        tracing::debug!(model = %self.model, mime_type = %image.mime_type, "dispatching transformation request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini call failed");
                MogError::ServiceFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %text, "Gemini returned an error");
            return Err(MogError::ServiceFailed);
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse Gemini response");
            MogError::ServiceFailed
        })?;

        let inline = first_image_part(parsed).ok_or(MogError::NoImageReturned)?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini image payload is not valid base64");
                MogError::ServiceFailed
            })?;

        let format = ImageFormat::from_mime_type(&inline.mime_type)
            .or_else(|| ImageFormat::from_magic_bytes(&data))
            .unwrap_or_default();

        Ok(MoggedImage::new(data, format))
    }
}

/// Returns the first image-bearing part of the first candidate, in response
/// order. This tie-break for multi-part responses is deliberate: later image
/// parts and all text parts are ignored.
fn first_image_part(response: GeminiResponse) -> Option<InlineData> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().find_map(|p| p.inline_data))
}

#[async_trait]
impl Transformer for GeminiTransformer {
    async fn transform(&self, image: &UploadedImage) -> Result<MoggedImage> {
        self.transform_impl(image).await
    }

    fn name(&self) -> &str {
        "Gemini (Google)"
    }
}

// Request/Response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiRequestPart>,
}

/// A part in a Gemini request - can be text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiRequestPart {
    Text { text: String },
    InlineData { inline_data: GeminiInlineData },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiConfig {
    response_modalities: Vec<String>,
}

impl GeminiRequest {
    fn new(image: &UploadedImage, prompt: &str) -> Self {
        let parts = vec![
            GeminiRequestPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            },
            GeminiRequestPart::Text {
                text: prompt.to_string(),
            },
        ];

        Self {
            contents: vec![GeminiContent { parts }],
            generation_config: GeminiConfig {
                // The protocol requires declaring both even though only
                // image content is consumed.
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPartResponse {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}
