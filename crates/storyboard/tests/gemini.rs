//! Tests for the Gemini client integration.

use storyboard::{
    GenerateRequest, GenerationError, GenerationErrorKind, Input, Message, RenderError,
    RenderErrorKind, Role,
};

//
// ─── ERROR HANDLING TESTS ───────────────────────────────────────────────────────
//

#[test]
fn test_generation_error_display() {
    let error = GenerationError::new(GenerationErrorKind::MissingApiKey);
    let display = format!("{}", error);
    assert!(display.contains("GEMINI_API_KEY environment variable not set"));
    assert!(display.contains("Generation Error:"));
    assert!(display.contains("at line"));
}

#[test]
fn test_generation_error_kind_display() {
    let cases = vec![
        (
            GenerationErrorKind::MissingApiKey,
            "GEMINI_API_KEY environment variable not set",
        ),
        (
            GenerationErrorKind::ClientCreation("test error".to_string()),
            "Failed to create generation client: test error",
        ),
        (
            GenerationErrorKind::ApiRequest("request failed".to_string()),
            "Generation API request failed: request failed",
        ),
        (
            GenerationErrorKind::EmptyResponse,
            "Generation returned an empty response",
        ),
        (
            GenerationErrorKind::MalformedScenes("bad json".to_string()),
            "Malformed scene output: bad json",
        ),
    ];

    for (kind, expected) in cases {
        let display = format!("{}", kind);
        assert_eq!(display, expected, "Error kind display mismatch");
    }
}

#[test]
fn test_generation_error_source_location_tracking() {
    let error = GenerationError::new(GenerationErrorKind::MissingApiKey);
    assert!(error.line > 0, "Error should capture line number");
    assert!(
        error.file.contains("gemini.rs"),
        "Error should capture file name"
    );
}

#[test]
fn test_render_error_http_display() {
    let error = RenderError::new(RenderErrorKind::HttpError {
        status_code: 429,
        message: "quota exceeded".to_string(),
    });
    let display = format!("{}", error);
    assert!(display.contains("HTTP 429"));
    assert!(display.contains("quota exceeded"));
}

//
// ─── REQUEST BUILDING TESTS ─────────────────────────────────────────────────────
//

#[test]
fn test_simple_text_request_structure() {
    let request = GenerateRequest {
        messages: vec![Message {
            role: Role::User,
            content: vec![Input::Text("Hello, world!".to_string())],
        }],
        max_tokens: Some(100),
        temperature: Some(0.7),
        model: Some("gemini-2.0-flash-lite".to_string()),
    };

    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.max_tokens, Some(100));
    assert_eq!(request.model.as_deref(), Some("gemini-2.0-flash-lite"));
}

#[test]
fn test_request_builder_defaults() {
    let request = GenerateRequest::builder()
        .messages(vec![Message {
            role: Role::User,
            content: vec![Input::Text("Hi".to_string())],
        }])
        .build()
        .expect("builder should succeed");

    assert_eq!(request.messages.len(), 1);
    assert!(request.max_tokens.is_none());
    assert!(request.temperature.is_none());
    assert!(request.model.is_none());
}

//
// ─── LIVE API TESTS (feature-gated) ─────────────────────────────────────────────
//

#[cfg(feature = "api")]
mod api {
    use storyboard::{
        GeminiClient, GenerateRequest, ImageGeneration, Input, Message, Role, StoryboardDriver,
    };

    #[tokio::test]
    async fn test_gemini_text_round_trip() {
        dotenvy::dotenv().ok();

        let client = GeminiClient::new().expect("client should initialize");
        let request = GenerateRequest {
            messages: vec![Message {
                role: Role::User,
                content: vec![Input::Text(
                    "Reply with the single word: hello".to_string(),
                )],
            }],
            max_tokens: Some(16),
            ..Default::default()
        };

        let response = client.generate(&request).await.expect("generation");
        assert!(!response.text().is_empty());
    }

    #[tokio::test]
    async fn test_gemini_image_round_trip() {
        dotenvy::dotenv().ok();

        let client = GeminiClient::new().expect("client should initialize");
        let bytes = client
            .generate_image("A simple red circle on a white background")
            .await
            .expect("image generation");
        assert!(!bytes.is_empty());
    }
}
