//! Google Gemini API client implementation.
//!
//! Two generation paths share one client:
//! - Text generation through the `gemini-rust` SDK (story and scene
//!   prompts), with per-request model selection and client pooling.
//! - Image generation through the Generative Language REST API
//!   (`generateContent` with image response modalities), decoding inline
//!   base64 image data into raw bytes.

mod client;
mod image;

pub use client::GeminiClient;

/// Result type for Gemini text generation operations.
pub type GeminiResult<T> = Result<T, storyboard_error::GenerationError>;
