//! Core type definitions for the Storyboard interface.

/// Information about model capabilities and limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    /// Provider name (e.g., "gemini")
    pub provider: &'static str,
    /// Model identifier (e.g., "gemini-2.0-flash-lite")
    pub model: String,
    /// Maximum input context tokens
    pub max_input_tokens: usize,
    /// Maximum output tokens per request
    pub max_output_tokens: usize,
    /// Supports image inputs (vision)
    pub supports_vision: bool,
    /// Supports image generation output
    pub supports_image_generation: bool,
}
