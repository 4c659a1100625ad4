//! Session controller: owns the upload/transform lifecycle.
//!
//! All state lives in one [`SessionState`] mutated only here, so the
//! transition rules stay auditable and testable apart from any rendering
//! layer. Methods take `&mut self`; the file read and the remote call are
//! the only suspension points.

use crate::client::{MoggedImage, Transformer};
use crate::codec::{read_image, UploadedImage};
use std::path::Path;

/// Where the session currently is in the transformation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No image selected yet.
    #[default]
    Idle,
    /// An image is loaded and ready to submit.
    ImageLoaded,
    /// A transformation request is in flight.
    Pending,
    /// The most recent request produced a result.
    Succeeded,
    /// The most recent request failed.
    Failed,
}

/// The single-session application state.
///
/// `error` and `mogged` are mutually exclusive outcomes of the most recent
/// request; both are absent while idle or pending. `pending` is true only
/// while exactly one request is in flight.
#[derive(Debug, Default)]
pub struct SessionState {
    /// The uploaded photo, if one has been selected.
    pub original: Option<UploadedImage>,
    /// The stylized result of the most recent successful request.
    pub mogged: Option<MoggedImage>,
    /// Whether a transformation request is in flight.
    pub pending: bool,
    /// User-visible message for the most recent failure.
    pub error: Option<String>,
}

/// Orchestrates the single request lifecycle around a [`Transformer`].
///
/// At most one request is ever in flight; the submit guard enforces this,
/// not the transformer. There is no cancellation: an in-flight request runs
/// to completion and its outcome is applied to whatever state exists when it
/// resolves. Reset is blocked while pending to keep that unambiguous.
pub struct MogController<T: Transformer> {
    transformer: T,
    state: SessionState,
    phase: Phase,
}

impl<T: Transformer> MogController<T> {
    /// Creates an idle controller around the given transformer.
    pub fn new(transformer: T) -> Self {
        Self {
            transformer,
            state: SessionState::default(),
            phase: Phase::Idle,
        }
    }

    /// Returns the current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Handles the select-file intent: decodes the file and stores it.
    ///
    /// On success the upload replaces any previous one and clears stale
    /// result and error. On failure only the error message changes; the
    /// previously loaded image, if any, is kept.
    pub async fn upload(&mut self, path: impl AsRef<Path>) {
        match read_image(path).await {
            Ok(image) => {
                tracing::debug!(mime_type = %image.mime_type, "image loaded");
                self.state.original = Some(image);
                self.state.mogged = None;
                self.state.error = None;
                self.phase = Phase::ImageLoaded;
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
            }
        }
    }

    /// Handles the mogify intent: dispatches one transformation request.
    ///
    /// A no-op while a request is already pending. With no image loaded it
    /// sets an error without dispatching.
    pub async fn mogify(&mut self) {
        if self.state.pending {
            return;
        }

        let Some(original) = self.state.original.clone() else {
            self.state.error = Some("Please upload an image first.".into());
            return;
        };

        self.state.pending = true;
        self.state.error = None;
        self.state.mogged = None;
        self.phase = Phase::Pending;

        tracing::debug!(transformer = %self.transformer.name(), "transformation dispatched");

        match self.transformer.transform(&original).await {
            Ok(mogged) => {
                self.state.mogged = Some(mogged);
                self.phase = Phase::Succeeded;
            }
            Err(e) => {
                self.state.error = Some(format!("Failed to generate image: {e}"));
                self.phase = Phase::Failed;
            }
        }
        self.state.pending = false;
    }

    /// Handles the clear intent: drops all session data.
    ///
    /// Blocked while a request is in flight.
    pub fn clear(&mut self) {
        if self.state.pending {
            return;
        }
        self.state = SessionState::default();
        self.phase = Phase::Idle;
    }
}
