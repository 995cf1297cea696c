//! Image generation over the Generative Language REST API.
//!
//! The `gemini-rust` SDK wrapper is text-only, so image generation talks to
//! the `generateContent` endpoint directly: a text prompt goes in with
//! image response modalities enabled, and the first inline-data part of the
//! response comes back as base64-encoded image bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::json;
use storyboard_error::{RenderError, RenderErrorKind};
use tracing::debug;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Result type for Gemini image generation operations.
pub type ImageResult<T> = Result<T, RenderError>;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
    #[allow(dead_code)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[allow(dead_code)]
    mime_type: Option<String>,
    data: String,
}

/// Generate an image for `prompt` with the given model, returning raw bytes.
pub(super) async fn generate_image(
    http: &reqwest::Client,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> ImageResult<Vec<u8>> {
    let url = format!("{}/{}:generateContent", API_BASE, model);

    let body = json!({
        "contents": [{
            "parts": [{"text": prompt}]
        }],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"]
        }
    });

    let response = http
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| RenderError::new(RenderErrorKind::ApiRequest(e.to_string())))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(RenderError::new(RenderErrorKind::HttpError {
            status_code: status.as_u16(),
            message,
        }));
    }

    let parsed: GenerateContentResponse = response
        .json()
        .await
        .map_err(|e| RenderError::new(RenderErrorKind::ApiRequest(e.to_string())))?;

    let bytes = decode_inline_image(&parsed)?;

    debug!(model = %model, size = bytes.len(), "Decoded generated image");

    Ok(bytes)
}

/// Pull the first inline-data part out of a response and decode it.
fn decode_inline_image(response: &GenerateContentResponse) -> ImageResult<Vec<u8>> {
    let inline = response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .find_map(|part| part.inline_data.as_ref())
        .ok_or_else(|| RenderError::new(RenderErrorKind::MissingImageData))?;

    let bytes = STANDARD
        .decode(&inline.data)
        .map_err(|e| RenderError::new(RenderErrorKind::Base64Decode(e.to_string())))?;

    if bytes.is_empty() {
        return Err(RenderError::new(RenderErrorKind::EmptyImage));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json_str: &str) -> GenerateContentResponse {
        serde_json::from_str(json_str).expect("response should parse")
    }

    #[test]
    fn decodes_inline_image_data() {
        // "PNG!" in base64
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            {"text": "Here is your image."},
                            {"inlineData": {"mimeType": "image/png", "data": "UE5HIQ=="}}
                        ]
                    }
                }]
            }"#,
        );

        let bytes = decode_inline_image(&response).expect("should decode");
        assert_eq!(bytes, b"PNG!");
    }

    #[test]
    fn missing_inline_data_is_an_error() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [{"text": "No image today."}]
                    }
                }]
            }"#,
        );

        let err = decode_inline_image(&response).unwrap_err();
        assert!(matches!(err.kind, RenderErrorKind::MissingImageData));
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let response = parse(r#"{"candidates": []}"#);
        let err = decode_inline_image(&response).unwrap_err();
        assert!(matches!(err.kind, RenderErrorKind::MissingImageData));
    }

    #[test]
    fn invalid_base64_is_an_error() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [{"inlineData": {"mimeType": "image/png", "data": "!!!not-base64!!!"}}]
                    }
                }]
            }"#,
        );

        let err = decode_inline_image(&response).unwrap_err();
        assert!(matches!(err.kind, RenderErrorKind::Base64Decode(_)));
    }

    #[test]
    fn empty_decoded_payload_is_an_error() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [{"inlineData": {"mimeType": "image/png", "data": ""}}]
                    }
                }]
            }"#,
        );

        let err = decode_inline_image(&response).unwrap_err();
        assert!(matches!(err.kind, RenderErrorKind::EmptyImage));
    }
}
