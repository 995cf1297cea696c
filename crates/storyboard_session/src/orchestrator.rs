//! Session orchestration logic.
//!
//! The orchestrator sequences story generation, scene extraction, and
//! per-scene image rendering exactly once per distinct topic, tolerating
//! re-invocation of the controlling logic without duplicating work. Image
//! generation is lazy and independent per scene: one scene's failure never
//! blocks another, and failures are not cached, so the caller's next
//! invocation retries naturally.

use crate::Session;
use std::path::PathBuf;
use storyboard_error::{SessionError, SessionErrorKind, StoryboardResult};
use storyboard_interface::{ImageRenderer, SceneExtractor, StoryService};
use tracing::{debug, info, warn};

/// Default directory for generated storyboard images.
pub const DEFAULT_MEDIA_DIR: &str = "generated_media";

/// Outcome of one `ensure_image` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The image was generated and recorded during this call.
    Rendered(PathBuf),
    /// A previously recorded path was returned; the renderer was not invoked.
    Cached(PathBuf),
    /// The scene prompt was invalid and rendering was skipped.
    ///
    /// This is a recognized policy outcome, not a failure: scene
    /// extraction signals a scene it could not derive through the prompt
    /// text, and such placeholders must never reach the image backend.
    Skipped {
        /// Human-readable explanation for display
        reason: String,
    },
}

impl RenderOutcome {
    /// The image path, when this outcome carries one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            RenderOutcome::Rendered(path) | RenderOutcome::Cached(path) => Some(path),
            RenderOutcome::Skipped { .. } => None,
        }
    }
}

/// Sequences story generation, scene extraction, and per-scene image
/// rendering against explicit [`Session`] state.
///
/// The orchestrator is generic over the three service seams so each stage
/// can be substituted independently (and mocked in tests).
pub struct SessionOrchestrator<S, E, R> {
    story_service: S,
    scene_extractor: E,
    image_renderer: R,
    media_dir: PathBuf,
}

impl<S, E, R> SessionOrchestrator<S, E, R>
where
    S: StoryService,
    E: SceneExtractor,
    R: ImageRenderer,
{
    /// Create a new orchestrator writing images under `media_dir`.
    pub fn new(
        story_service: S,
        scene_extractor: E,
        image_renderer: R,
        media_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            story_service,
            scene_extractor,
            image_renderer,
            media_dir: media_dir.into(),
        }
    }

    /// Directory the orchestrator writes generated images into.
    pub fn media_dir(&self) -> &PathBuf {
        &self.media_dir
    }

    /// Get a reference to the underlying story service.
    pub fn story_service(&self) -> &S {
        &self.story_service
    }

    /// Get a reference to the underlying scene extractor.
    pub fn scene_extractor(&self) -> &E {
        &self.scene_extractor
    }

    /// Get a reference to the underlying image renderer.
    pub fn image_renderer(&self) -> &R {
        &self.image_renderer
    }

    /// Submit a topic, generating a story and its scenes.
    ///
    /// Submitting the same topic again after a successful run is a no-op:
    /// neither the story service nor the scene extractor is re-invoked. A
    /// differing topic (or a first submission) resets the session before
    /// generating.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty topic, or when story generation or
    /// scene extraction fails. On failure the session is left cleared
    /// (topic retained, nothing renderable), so resubmitting the same
    /// topic retries the whole pipeline.
    #[tracing::instrument(skip(self, session, topic), fields(topic_len = topic.len()))]
    pub async fn submit(&self, session: &mut Session, topic: &str) -> StoryboardResult<()> {
        if topic.trim().is_empty() {
            return Err(SessionError::new(SessionErrorKind::EmptyTopic).into());
        }

        if session.topic() == topic && session.is_complete() {
            debug!("Topic unchanged and session complete, skipping generation");
            return Ok(());
        }

        session.reset(topic);

        let story = self.story_service.generate(topic).await?;
        let scenes = self.scene_extractor.extract(&story).await?;

        info!(
            story_length = story.len(),
            scene_count = scenes.len(),
            "Session populated"
        );

        session.set_story(story);
        session.set_scenes(scenes);

        Ok(())
    }

    /// Ensure scene `index` has a rendered image, rendering it if needed.
    ///
    /// Idempotent once it succeeds: repeated calls return the cached path
    /// without invoking the renderer again. A scene whose prompt carries
    /// the extractor's failure marker is skipped entirely. A failed render
    /// records nothing, so the next call retries.
    ///
    /// # Errors
    ///
    /// Returns an error when `index` is outside the populated scene list,
    /// or when the renderer fails.
    #[tracing::instrument(skip(self, session))]
    pub async fn ensure_image(
        &self,
        session: &mut Session,
        index: usize,
    ) -> StoryboardResult<RenderOutcome> {
        let len = session.scenes().len();
        let Some(scene) = session.scenes().get(index) else {
            return Err(
                SessionError::new(SessionErrorKind::SceneIndexOutOfBounds { index, len }).into(),
            );
        };

        let prompt = scene.prompt().clone();
        if !is_renderable_prompt(&prompt) {
            let reason = format!("Skipping scene {} due to an invalid prompt", index + 1);
            warn!(index, "{}", reason);
            return Ok(RenderOutcome::Skipped { reason });
        }

        if let Some(path) = session.image_path(index) {
            debug!(index, path = %path.display(), "Image already rendered, returning cached path");
            return Ok(RenderOutcome::Cached(path.to_path_buf()));
        }

        let destination = self.scene_path(session.topic(), index);
        let path = self.image_renderer.render(&prompt, &destination).await?;

        session.record_image(index, path.clone());

        Ok(RenderOutcome::Rendered(path))
    }

    /// Deterministic destination path for a scene's image.
    fn scene_path(&self, topic: &str, index: usize) -> PathBuf {
        self.media_dir
            .join(format!("scene_{}_{}.png", index + 1, sanitize_topic(topic)))
    }
}

/// Whether a scene prompt should be sent to the image backend.
///
/// The extractor signals a scene it could not derive by emitting a prompt
/// containing "failed" or "error". The check is an unanchored,
/// case-insensitive substring match for compatibility with that
/// convention, so a legitimate prompt that merely mentions "error" is
/// skipped as well.
fn is_renderable_prompt(prompt: &str) -> bool {
    if prompt.trim().is_empty() {
        return false;
    }
    let lowered = prompt.to_lowercase();
    !lowered.contains("failed") && !lowered.contains("error")
}

/// Derive a filesystem-safe fragment from a topic.
///
/// Takes the first 15 characters, keeps only alphanumerics, spaces,
/// underscores, and hyphens, and trims trailing whitespace.
pub fn sanitize_topic(topic: &str) -> String {
    topic
        .chars()
        .take(15)
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim_end()
        .to_string()
}
