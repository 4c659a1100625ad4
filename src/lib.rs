#![warn(missing_docs)]
//! Mog Machine - see yourself as a frog, in stunning charcoal.
//!
//! This crate uploads a photo, sends it to the Gemini image API with a fixed
//! stylistic instruction, and returns the stylized result. The lifecycle
//! around that single request (idle → pending → success/error) is owned by
//! [`MogController`]; the remote call sits behind the [`Transformer`] trait.
//!
//! # Quick Start
//!
//! ```no_run
//! use mog_machine::{GeminiTransformer, MogController, Phase};
//!
//! #[tokio::main]
//! async fn main() -> mog_machine::Result<()> {
//!     let transformer = GeminiTransformer::builder().build()?;
//!     let mut controller = MogController::new(transformer);
//!
//!     controller.upload("photo.jpg").await;
//!     controller.mogify().await;
//!
//!     if controller.phase() == Phase::Succeeded {
//!         let mogged = controller.state().mogged.as_ref().unwrap();
//!         mogged.save("frog.png")?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Requires the `GOOGLE_API_KEY` environment variable (or an explicit key on
//! the builder).

mod client;
mod codec;
mod controller;
mod error;

pub use client::{
    GeminiTransformer, GeminiTransformerBuilder, MoggedImage, Transformer, MOG_PROMPT,
};
pub use codec::{read_image, ImageFormat, UploadedImage};
pub use controller::{MogController, Phase, SessionState};
pub use error::{MogError, Result};
