use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use storyboard::{
    GenerateRequest, GenerateResponse, ImageGeneration, ImageRenderer, Output, PanelRenderer,
    Role, SCENE_COUNT, SceneDirector, SceneExtractor, StoryComposer, StoryService,
    StoryboardDriver, StoryboardResult,
};

/// Mock LLM driver that returns a canned response.
struct MockDriver {
    response: String,
    calls: Arc<AtomicUsize>,
}

impl MockDriver {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl StoryboardDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // Every request carries a system prompt and a user prompt.
        assert!(req.messages.iter().any(|m| m.role == Role::System));
        assert!(req.messages.iter().any(|m| m.role == Role::User));

        Ok(GenerateResponse {
            outputs: vec![Output::Text(self.response.clone())],
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model-v1"
    }
}

/// Mock image-capable driver returning fixed bytes.
struct MockImageDriver {
    bytes: Vec<u8>,
}

#[async_trait]
impl StoryboardDriver for MockImageDriver {
    async fn generate(&self, _req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        Ok(GenerateResponse {
            outputs: vec![Output::Text(String::new())],
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-image-v1"
    }
}

#[async_trait]
impl ImageGeneration for MockImageDriver {
    async fn generate_image(&self, _prompt: &str) -> StoryboardResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn image_model(&self) -> &str {
        "mock-image-v1"
    }
}

fn scene_json(count: usize) -> String {
    let scenes: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"prompt": "A wide shot of moment {n}", "caption": "Caption {n}"}}"#,
                n = i + 1
            )
        })
        .collect();
    format!("[{}]", scenes.join(","))
}

#[tokio::test]
async fn test_story_composer_returns_story() {
    let driver = MockDriver::new("Once upon a time, a rover crossed a dune.");
    let calls = driver.calls.clone();
    let composer = StoryComposer::new(driver)
        .with_temperature(0.7)
        .with_max_tokens(2048);

    let story = composer
        .generate("A lonely astronaut on Mars")
        .await
        .expect("story generation should succeed");

    assert!(story.contains("rover"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_story_composer_rejects_empty_response() {
    let composer = StoryComposer::new(MockDriver::new("   "));

    let err = composer
        .generate("a topic")
        .await
        .expect_err("blank story should be rejected");
    assert!(err.to_string().contains("empty response"));
}

#[tokio::test]
async fn test_scene_director_parses_fenced_json() {
    let response = format!(
        "Here are your scenes:\n\n```json\n{}\n```\n",
        scene_json(SCENE_COUNT)
    );
    let director = SceneDirector::new(MockDriver::new(&response));

    let scenes = director
        .extract("a story")
        .await
        .expect("extraction should succeed");

    assert_eq!(scenes.len(), SCENE_COUNT);
    assert_eq!(scenes[0].caption(), "Caption 1");
    assert!(scenes[4].prompt().contains("moment 5"));
}

#[tokio::test]
async fn test_scene_director_parses_bare_json() {
    let director = SceneDirector::new(MockDriver::new(&scene_json(SCENE_COUNT)));

    let scenes = director
        .extract("a story")
        .await
        .expect("extraction should succeed");
    assert_eq!(scenes.len(), SCENE_COUNT);
}

#[tokio::test]
async fn test_scene_director_pads_short_batches() {
    let director = SceneDirector::new(MockDriver::new(&scene_json(3)));

    let scenes = director
        .extract("a story")
        .await
        .expect("extraction should succeed");

    assert_eq!(scenes.len(), SCENE_COUNT);
    assert!(scenes[2].prompt().contains("moment 3"));
    // The padding carries the failure marker so rendering skips it.
    assert!(scenes[3].prompt().to_lowercase().contains("failed"));
    assert!(scenes[4].prompt().to_lowercase().contains("failed"));
}

#[tokio::test]
async fn test_scene_director_truncates_long_batches() {
    let director = SceneDirector::new(MockDriver::new(&scene_json(8)));

    let scenes = director
        .extract("a story")
        .await
        .expect("extraction should succeed");
    assert_eq!(scenes.len(), SCENE_COUNT);
    assert!(scenes[4].prompt().contains("moment 5"));
}

#[tokio::test]
async fn test_scene_director_rejects_non_json() {
    let director = SceneDirector::new(MockDriver::new(
        "I'm sorry, I cannot produce scenes for that story.",
    ));

    assert!(director.extract("a story").await.is_err());
}

#[tokio::test]
async fn test_panel_renderer_writes_file() {
    let renderer = PanelRenderer::new(MockImageDriver {
        bytes: b"fake-png-bytes".to_vec(),
    });

    let media_dir = tempfile::tempdir().expect("tempdir");
    let destination = media_dir.path().join("generated_media").join("scene_1_test.png");

    let path = renderer
        .render("a rover at dawn", &destination)
        .await
        .expect("render should succeed");

    assert_eq!(path, destination);
    let written = std::fs::read(&path).expect("file exists");
    assert_eq!(written, b"fake-png-bytes");

    // No temp file left behind after the atomic rename.
    assert!(!destination.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_panel_renderer_rejects_empty_image() {
    let renderer = PanelRenderer::new(MockImageDriver { bytes: Vec::new() });

    let media_dir = tempfile::tempdir().expect("tempdir");
    let destination = media_dir.path().join("scene_1_test.png");

    let err = renderer
        .render("a rover at dawn", &destination)
        .await
        .expect_err("empty image should be rejected");
    assert!(err.to_string().contains("empty image"));
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_services_share_one_client_via_arc() {
    // One driver behind an Arc backs several services at once.
    let driver = Arc::new(MockDriver::new(&scene_json(SCENE_COUNT)));

    let composer = StoryComposer::new(driver.clone());
    let director = SceneDirector::new(driver.clone());

    let story = composer.generate("topic").await.expect("story");
    assert!(!story.is_empty());

    let scenes = director.extract(&story).await.expect("scenes");
    assert_eq!(scenes.len(), SCENE_COUNT);

    assert_eq!(driver.calls.load(Ordering::SeqCst), 2);
}
