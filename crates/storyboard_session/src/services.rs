//! Driver-backed implementations of the storyboard service traits.
//!
//! Each service wraps a generation driver with the prompt engineering for
//! its stage of the pipeline: composing the story, deriving the scene
//! list, and rendering a panel image to disk.

use crate::extraction::{extract_json, parse_json};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use storyboard_core::{
    GenerateRequest, Input, MessageBuilder, Role, SCENE_COUNT, Scene,
};
use storyboard_error::{
    BackendError, GenerationError, GenerationErrorKind, RenderError, RenderErrorKind,
    StoryboardResult,
};
use storyboard_interface::{
    ImageGeneration, ImageRenderer, SceneExtractor, StoryService, StoryboardDriver,
};
use tracing::{info, warn};

const STORY_SYSTEM_PROMPT: &str = "You are a skilled storyteller. You write vivid, \
    self-contained short stories with a clear narrative arc.";

const SCENE_SYSTEM_PROMPT: &str = "You are a storyboard director. You break stories \
    into key visual moments and describe each one as a detailed, self-contained \
    image-generation prompt.";

fn story_prompt(topic: &str) -> String {
    format!(
        "Write a structured short story of roughly 300 words about: {}.\n\
         Give it a clear beginning that establishes the setting, a middle that \
         builds tension, and an ending that resolves it. Write the story text \
         only, without headings or commentary.",
        topic
    )
}

fn scene_prompt(story: &str) -> String {
    format!(
        "From the story below, pick the {count} most cinematic visual moments, in \
         narrative order. Return a JSON array of exactly {count} objects. Each \
         object has a \"prompt\" field containing a detailed, self-contained \
         image-generation instruction (describe subject, setting, lighting, and \
         framing; do not reference the story or other scenes), and a \"caption\" \
         field containing a short narrative caption for display under the panel. \
         Output ONLY valid JSON.\n\nStory:\n{story}",
        count = SCENE_COUNT,
        story = story
    )
}

/// Builds a system + user message pair for a generation request.
fn build_request(
    system: &str,
    user: String,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> StoryboardResult<GenerateRequest> {
    let messages = vec![
        MessageBuilder::default()
            .role(Role::System)
            .content(vec![Input::Text(system.to_string())])
            .build()
            .map_err(|e| BackendError::new(format!("Failed to build message: {}", e)))?,
        MessageBuilder::default()
            .role(Role::User)
            .content(vec![Input::Text(user)])
            .build()
            .map_err(|e| BackendError::new(format!("Failed to build message: {}", e)))?,
    ];

    GenerateRequest::builder()
        .messages(messages)
        .model(model)
        .temperature(temperature)
        .max_tokens(max_tokens)
        .build()
        .map_err(|e| BackendError::new(format!("Failed to build request: {}", e)).into())
}

/// Story generation over a text driver.
///
/// Turns a topic into a structured short story in a single generation call.
pub struct StoryComposer<D> {
    driver: D,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl<D> StoryComposer<D> {
    /// Create a composer using the driver's default model and parameters.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Builder method to set the model override.
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builder method to set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Builder method to set the output token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[async_trait]
impl<D: StoryboardDriver> StoryService for StoryComposer<D> {
    #[tracing::instrument(skip(self, topic), fields(topic_len = topic.len()))]
    async fn generate(&self, topic: &str) -> StoryboardResult<String> {
        let request = build_request(
            STORY_SYSTEM_PROMPT,
            story_prompt(topic),
            self.model.clone(),
            self.temperature,
            self.max_tokens,
        )?;

        let response = self.driver.generate(&request).await?;
        let story = response.text();

        if story.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }

        info!(story_length = story.len(), "Story generated");
        Ok(story)
    }
}

/// Scene extraction over a text driver.
///
/// Asks the model for the storyboard's scenes as JSON and repairs the
/// count when the model miscounts: extra scenes are dropped, missing
/// scenes become failure placeholders that downstream rendering skips.
pub struct SceneDirector<D> {
    driver: D,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl<D> SceneDirector<D> {
    /// Create a director using the driver's default model and parameters.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Builder method to set the model override.
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builder method to set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Builder method to set the output token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Coerce an extracted scene list to exactly [`SCENE_COUNT`] entries.
fn normalize_scene_count(mut scenes: Vec<Scene>) -> StoryboardResult<Vec<Scene>> {
    if scenes.is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::MalformedScenes(
            "response contained an empty scene list".to_string(),
        ))
        .into());
    }

    if scenes.len() > SCENE_COUNT {
        warn!(
            extracted = scenes.len(),
            expected = SCENE_COUNT,
            "Model returned extra scenes, truncating"
        );
        scenes.truncate(SCENE_COUNT);
    }

    if scenes.len() < SCENE_COUNT {
        warn!(
            extracted = scenes.len(),
            expected = SCENE_COUNT,
            "Model returned too few scenes, padding with placeholders"
        );
        while scenes.len() < SCENE_COUNT {
            scenes.push(Scene::failed_placeholder());
        }
    }

    Ok(scenes)
}

#[async_trait]
impl<D: StoryboardDriver> SceneExtractor for SceneDirector<D> {
    #[tracing::instrument(skip(self, story), fields(story_length = story.len()))]
    async fn extract(&self, story: &str) -> StoryboardResult<Vec<Scene>> {
        let request = build_request(
            SCENE_SYSTEM_PROMPT,
            scene_prompt(story),
            self.model.clone(),
            self.temperature,
            self.max_tokens,
        )?;

        let response = self.driver.generate(&request).await?;
        let text = response.text();

        let json_str = extract_json(&text)?;
        let scenes: Vec<Scene> = parse_json(&json_str)?;
        let scenes = normalize_scene_count(scenes)?;

        info!(scene_count = scenes.len(), "Scenes extracted");
        Ok(scenes)
    }
}

/// Panel rendering over an image-capable driver.
///
/// Writes the generated image atomically (temp file + rename) so a failed
/// write never leaves a partial file at the destination.
pub struct PanelRenderer<D> {
    driver: D,
}

impl<D> PanelRenderer<D> {
    /// Create a renderer over the given image-capable driver.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }
}

#[async_trait]
impl<D: ImageGeneration> ImageRenderer for PanelRenderer<D> {
    #[tracing::instrument(skip(self, prompt), fields(destination = %destination.display(), prompt_length = prompt.len()))]
    async fn render(&self, prompt: &str, destination: &Path) -> StoryboardResult<PathBuf> {
        let bytes = self.driver.generate_image(prompt).await?;

        if bytes.is_empty() {
            return Err(RenderError::new(RenderErrorKind::EmptyImage).into());
        }

        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RenderError::new(RenderErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = destination.with_extension("tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            RenderError::new(RenderErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, destination).await.map_err(|e| {
            RenderError::new(RenderErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                destination.display(),
                e
            )))
        })?;

        info!(
            path = %destination.display(),
            size = bytes.len(),
            "Stored storyboard panel"
        );

        Ok(destination.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_passes_exact_count() {
        let scenes: Vec<Scene> = (0..SCENE_COUNT)
            .map(|i| Scene::new(format!("prompt {}", i), format!("caption {}", i)))
            .collect();
        let normalized = normalize_scene_count(scenes.clone()).unwrap();
        assert_eq!(normalized, scenes);
    }

    #[test]
    fn normalize_truncates_extras() {
        let scenes: Vec<Scene> = (0..SCENE_COUNT + 3)
            .map(|i| Scene::new(format!("prompt {}", i), format!("caption {}", i)))
            .collect();
        let normalized = normalize_scene_count(scenes).unwrap();
        assert_eq!(normalized.len(), SCENE_COUNT);
        assert_eq!(normalized[SCENE_COUNT - 1].prompt(), "prompt 4");
    }

    #[test]
    fn normalize_pads_with_placeholders() {
        let scenes = vec![Scene::new("only one", "caption")];
        let normalized = normalize_scene_count(scenes).unwrap();
        assert_eq!(normalized.len(), SCENE_COUNT);
        assert_eq!(normalized[0].prompt(), "only one");
        // Padding scenes carry the failure marker so rendering skips them.
        assert!(normalized[1].prompt().to_lowercase().contains("failed"));
    }

    #[test]
    fn normalize_rejects_empty_list() {
        assert!(normalize_scene_count(Vec::new()).is_err());
    }

    #[test]
    fn scene_prompt_requests_json() {
        let prompt = scene_prompt("A story about a rover.");
        assert!(prompt.contains("JSON"));
        assert!(prompt.contains('5'));
        assert!(prompt.contains("A story about a rover."));
    }
}
