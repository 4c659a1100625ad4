//! Error types for the mog pipeline.

/// Errors that can occur while uploading or transforming an image.
///
/// `Display` renders the message shown to the end user; diagnostic detail
/// (HTTP status, transport errors, malformed payloads) is logged at the
/// point of failure and deliberately kept out of these strings.
#[derive(Debug, thiserror::Error)]
pub enum MogError {
    /// The selected file is not an image.
    #[error("Please upload a valid image file.")]
    InvalidInput(String),

    /// Reading the selected file from disk failed.
    #[error("Failed to read the image file.")]
    Read(#[from] std::io::Error),

    /// Service credential missing from the environment.
    #[error("API key not configured: {0}")]
    Configuration(String),

    /// The remote call failed for any transport or protocol reason.
    #[error("The AI model could not process the image. Please try a different one.")]
    ServiceFailed,

    /// The response carried no image part.
    #[error("API did not return an image. It may have refused the request.")]
    NoImageReturned,
}

/// Result type alias for mog operations.
pub type Result<T> = std::result::Result<T, MogError>;
