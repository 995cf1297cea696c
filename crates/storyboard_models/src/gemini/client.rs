//! Google Gemini API implementation.
//!
//! This module provides a client for the Google Gemini API with support for:
//! - Per-request model selection (different requests can use different models)
//! - Client pooling with lazy initialization (one client per model)
//! - Thread-safe concurrent access
//! - Image generation through the REST `generateContent` endpoint
//!
//! # Architecture
//!
//! The [`GeminiClient`] maintains a pool of model-specific clients. When a
//! request specifies a model (via `GenerateRequest.model`), the client either
//! retrieves the existing client for that model or creates a new one
//! on-demand. This lets the story and scene stages of a storyboard use
//! different models without paying repeated client setup costs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::env;
use std::sync::{Arc, Mutex};
use tracing::instrument;

use gemini_rust::{Gemini, client::Model};

use storyboard_core::{GenerateRequest, GenerateResponse, Input, Output, Role};
use storyboard_error::{
    GenerationError, GenerationErrorKind, StoryboardResult,
};
use storyboard_interface::{ImageGeneration, Metadata, ModelMetadata, StoryboardDriver};

use super::GeminiResult;
use super::image;

/// Default model for story and scene text generation.
const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash-lite";

/// Default model for storyboard image generation.
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Client for the Google Gemini API with per-model client pooling.
///
/// Clients are created lazily on first use for each model and cached in a
/// thread-safe pool. The same instance serves text generation (via the
/// `gemini-rust` SDK) and image generation (via the REST API).
pub struct GeminiClient {
    /// Cache of model-specific SDK clients
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
    /// HTTP client for the image generation REST endpoint
    http: reqwest::Client,
    /// API key for creating new clients
    api_key: String,
    /// Default model name when req.model is None
    model_name: String,
    /// Model used for image generation
    image_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let client_count = self.clients.lock().unwrap().len();
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("image_model", &self.image_model)
            .field("cached_clients", &client_count)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client with default models.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    /// Defaults to Gemini 2.0 Flash Lite for text and the flash image
    /// preview model for images.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use storyboard_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> StoryboardResult<Self> {
        Self::new_with_models(None, None).map_err(Into::into)
    }

    /// Create a new Gemini client with explicit model selection.
    ///
    /// `text_model` overrides the default text model used when a request
    /// does not name one; `image_model` overrides the image generation
    /// model.
    #[instrument(name = "gemini_client_new_with_models")]
    pub fn with_models(
        text_model: Option<String>,
        image_model: Option<String>,
    ) -> StoryboardResult<Self> {
        Self::new_with_models(text_model, image_model).map_err(Into::into)
    }

    /// Internal constructor that returns Gemini-specific errors.
    fn new_with_models(
        text_model: Option<String>,
        image_model: Option<String>,
    ) -> GeminiResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GenerationError::new(GenerationErrorKind::MissingApiKey))?;

        Ok(Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            http: reqwest::Client::new(),
            api_key,
            model_name: text_model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: image_model.unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }

    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Maps common model name strings to their corresponding Model enum
    /// variants. Uses Model::Custom for unrecognized model names,
    /// automatically adding the "models/" prefix required by the Gemini API.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => {
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }

    /// Get or lazily create the pooled SDK client for a model.
    fn pooled_client(&self, model_name: &str) -> GeminiResult<Gemini> {
        let mut clients = self.clients.lock().unwrap();
        match clients.entry(model_name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let model_enum = Self::model_name_to_enum(model_name);
                let client = Gemini::with_model(&self.api_key, model_enum).map_err(|e| {
                    GenerationError::new(GenerationErrorKind::ClientCreation(e.to_string()))
                })?;
                entry.insert(client.clone());
                Ok(client)
            }
        }
    }

    /// Extract text content from an input
    fn extract_text(input: &Input) -> Option<String> {
        match input {
            Input::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// Check if input contains non-text media
    fn has_media(inputs: &[Input]) -> bool {
        inputs.iter().any(|i| !matches!(i, Input::Text(_)))
    }

    /// Internal generate method that returns Gemini-specific errors.
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        // Determine which model to use
        let model_name = req.model.as_deref().unwrap_or(&self.model_name);

        let client = self.pooled_client(model_name)?;

        // Start building the request
        let mut builder = client.generate_content();

        // Process messages in order
        let mut system_prompt = None;

        for msg in &req.messages {
            match msg.role {
                Role::System => {
                    // Gemini uses a separate system prompt
                    if let Some(text) = msg.content.iter().find_map(Self::extract_text) {
                        system_prompt = Some(text);
                    }
                }
                Role::User => {
                    for input in &msg.content {
                        if let Some(text) = Self::extract_text(input) {
                            builder = builder.with_user_message(&text);
                        }
                    }

                    // The simple builder API is text-only; storyboard
                    // requests never carry media inputs.
                    if Self::has_media(&msg.content) {
                        return Err(GenerationError::new(GenerationErrorKind::ApiRequest(
                            "media inputs are not supported for text generation".to_string(),
                        )));
                    }
                }
                Role::Assistant => {
                    if let Some(text) = msg.content.iter().find_map(Self::extract_text) {
                        builder = builder.with_model_message(&text);
                    }
                }
            }
        }

        // Add system prompt if present
        if let Some(prompt) = system_prompt {
            builder = builder.with_system_prompt(&prompt);
        }

        // Apply optional parameters
        if let Some(temp) = req.temperature {
            builder = builder.with_temperature(temp);
        }

        if let Some(max_tok) = req.max_tokens {
            builder = builder.with_max_output_tokens(max_tok as i32);
        }

        // Execute the request and parse errors
        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;

        let text = response.text();

        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    ///
    /// Converts generic API error strings into structured GenerationError
    /// with HTTP status codes when available.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GenerationError {
        let err_msg = err.to_string();

        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GenerationError::new(GenerationErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GenerationError::new(GenerationErrorKind::ApiRequest(err_msg))
        }
    }

    /// Extract HTTP status code from error message string.
    ///
    /// Parses strings like "bad response from server; code 503; description: ..."
    /// and extracts the numeric status code.
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        if let Some(code_start) = error_msg.find("code ") {
            let code_str = &error_msg[code_start + 5..];
            if let Some(end) = code_str.find(|c: char| !c.is_numeric()) {
                return code_str[..end].parse().ok();
            }
        }
        None
    }
}

#[async_trait]
impl StoryboardDriver for GeminiClient {
    #[instrument(skip(self, req), fields(model = ?req.model))]
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    /// Returns the default model name used when `GenerateRequest.model` is None.
    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl ImageGeneration for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.image_model, prompt_length = prompt.len()))]
    async fn generate_image(&self, prompt: &str) -> StoryboardResult<Vec<u8>> {
        image::generate_image(&self.http, &self.api_key, &self.image_model, prompt)
            .await
            .map_err(Into::into)
    }

    fn image_model(&self) -> &str {
        &self.image_model
    }
}

impl Metadata for GeminiClient {
    /// Returns metadata for the default text model.
    ///
    /// Note: This returns capabilities for the default model configured at
    /// client creation. Different Gemini models may have different
    /// capabilities and limits.
    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            provider: "gemini",
            model: self.model_name.clone(),
            max_input_tokens: 1_048_576,
            max_output_tokens: 8192,
            supports_vision: true,
            supports_image_generation: true,
        }
    }
}
