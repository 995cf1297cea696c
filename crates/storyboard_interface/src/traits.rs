//! Trait definitions for LLM backends and their capabilities.

use crate::ModelMetadata;
use async_trait::async_trait;
use storyboard_core::{GenerateRequest, GenerateResponse};
use storyboard_error::StoryboardResult;

/// Core trait that all LLM backends must implement.
///
/// This provides the minimal interface for synchronous text generation.
/// Additional capabilities are exposed through optional traits.
#[async_trait]
pub trait StoryboardDriver: Send + Sync {
    /// Generate model output given a multimodal request.
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.0-flash-lite").
    fn model_name(&self) -> &str;
}

/// Trait for backends that can generate images from a text prompt.
#[async_trait]
pub trait ImageGeneration: StoryboardDriver {
    /// Generate an image from the given prompt, returning the raw bytes.
    async fn generate_image(&self, prompt: &str) -> StoryboardResult<Vec<u8>>;

    /// Model identifier used for image generation.
    fn image_model(&self) -> &str;

    /// MIME type of the generated images.
    fn image_mime_type(&self) -> &'static str {
        "image/png"
    }
}

// Delegating impls so one client behind an Arc can back several services.

#[async_trait]
impl<T: StoryboardDriver + ?Sized> StoryboardDriver for std::sync::Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: ImageGeneration + ?Sized> ImageGeneration for std::sync::Arc<T> {
    async fn generate_image(&self, prompt: &str) -> StoryboardResult<Vec<u8>> {
        (**self).generate_image(prompt).await
    }

    fn image_model(&self) -> &str {
        (**self).image_model()
    }

    fn image_mime_type(&self) -> &'static str {
        (**self).image_mime_type()
    }
}

/// Trait for querying model metadata and capabilities.
pub trait Metadata: StoryboardDriver {
    /// Get comprehensive metadata about this model.
    fn metadata(&self) -> ModelMetadata;

    /// Maximum tokens in input context.
    fn max_input_tokens(&self) -> usize {
        self.metadata().max_input_tokens
    }

    /// Maximum tokens in output.
    fn max_output_tokens(&self) -> usize {
        self.metadata().max_output_tokens
    }
}
