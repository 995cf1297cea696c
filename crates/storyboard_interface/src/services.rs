//! Service seams for the storyboard pipeline.
//!
//! The session orchestrator is programmed against these traits rather than
//! concrete backends, so each stage of the pipeline can be substituted
//! independently (and mocked in tests without a UI harness).

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use storyboard_core::Scene;
use storyboard_error::StoryboardResult;

/// Produces a structured story from a topic.
#[async_trait]
pub trait StoryService: Send + Sync {
    /// Generate a story for the given topic.
    ///
    /// Fails with a generation error on backend failure; no partial story
    /// is returned.
    async fn generate(&self, topic: &str) -> StoryboardResult<String>;
}

/// Derives storyboard scenes from a story.
#[async_trait]
pub trait SceneExtractor: Send + Sync {
    /// Extract exactly [`storyboard_core::SCENE_COUNT`] scenes from the story.
    ///
    /// Implementations encode an individual scene they could not derive as
    /// a placeholder whose prompt contains "failed" or "error" rather than
    /// failing the whole batch; downstream rendering skips such scenes.
    async fn extract(&self, story: &str) -> StoryboardResult<Vec<Scene>>;
}

/// Renders a scene prompt into an image file.
#[async_trait]
pub trait ImageRenderer: Send + Sync {
    /// Render the prompt into an image written at `destination`.
    ///
    /// Returns the written path on success. The file is written on success
    /// only; a failed render leaves no file behind.
    async fn render(&self, prompt: &str, destination: &Path) -> StoryboardResult<PathBuf>;
}
