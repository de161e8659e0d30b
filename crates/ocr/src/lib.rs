//! Listing-authority extraction with a multimodal model.
//!
//! - [`api`]: streaming client for Gemini `streamGenerateContent`.
//! - [`sse`]: incremental decoder for the upstream event stream.
//! - [`prompt`]: the extraction instructions sent with the images.
//! - [`relay`]: turns the upstream stream into ordered [`OcrEvent`]s and
//!   post-processes the final buffer into a listing object.

pub mod api;
pub mod error;
pub mod prompt;
pub mod relay;
pub mod sse;

pub use api::{GeminiClient, GeminiConfig};
pub use error::OcrError;
pub use relay::{spawn_relay, ImageInput, OcrEvent};
