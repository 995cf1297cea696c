//! Per-topic session state.

use derive_getters::Getters;
use std::path::{Path, PathBuf};
use storyboard_core::Scene;
use tracing::debug;

/// Orchestration state for one topic submission lifecycle.
///
/// A session is reset whenever a differing topic is submitted, mutated by
/// story generation (story text), scene extraction (scenes, image slots),
/// and per-scene image rendering (one slot at a time). It is never
/// explicitly destroyed; a new topic supersedes it.
///
/// Invariant: once scenes are populated, `image_paths` has the same length
/// and each index refers to the same scene across both sequences.
#[derive(Debug, Clone, Default, Getters)]
pub struct Session {
    /// The last submitted topic
    topic: String,
    /// Generated story text, absent until story generation succeeds
    story_text: Option<String>,
    /// Extracted storyboard scenes, index-aligned with `image_paths`
    scenes: Vec<Scene>,
    /// Rendered image path per scene, `None` until rendered
    image_paths: Vec<Option<PathBuf>>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the session holds a story and a populated scene list.
    ///
    /// An incomplete session has nothing to render; downstream treats it
    /// as "no scenes".
    pub fn is_complete(&self) -> bool {
        self.story_text.is_some() && !self.scenes.is_empty()
    }

    /// The rendered image path for a scene, if one has been recorded.
    pub fn image_path(&self, index: usize) -> Option<&Path> {
        self.image_paths.get(index)?.as_deref()
    }

    /// Number of scenes with a recorded image.
    pub fn rendered_count(&self) -> usize {
        self.image_paths.iter().filter(|p| p.is_some()).count()
    }

    /// Clear all generated state and store the new topic.
    pub(crate) fn reset(&mut self, topic: &str) {
        debug!(topic = %topic, "Resetting session");
        *self = Self {
            topic: topic.to_string(),
            ..Self::default()
        };
    }

    /// Record the generated story text.
    pub(crate) fn set_story(&mut self, story: String) {
        self.story_text = Some(story);
    }

    /// Record the extracted scenes, initializing all image slots to absent.
    pub(crate) fn set_scenes(&mut self, scenes: Vec<Scene>) {
        self.image_paths = vec![None; scenes.len()];
        self.scenes = scenes;
    }

    /// Record a rendered image path for one scene.
    pub(crate) fn record_image(&mut self, index: usize, path: PathBuf) {
        debug!(index, path = %path.display(), "Recording rendered image");
        self.image_paths[index] = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_generated_state() {
        let mut session = Session::new();
        session.reset("first topic");
        session.set_story("Once upon a time".to_string());
        session.set_scenes(vec![Scene::new("a prompt", "a caption")]);
        session.record_image(0, PathBuf::from("scene_1_first_topic.png"));

        session.reset("second topic");

        assert_eq!(session.topic(), "second topic");
        assert!(session.story_text().is_none());
        assert!(session.scenes().is_empty());
        assert!(session.image_paths().is_empty());
        assert!(!session.is_complete());
    }

    #[test]
    fn set_scenes_aligns_image_slots() {
        let mut session = Session::new();
        session.reset("topic");
        session.set_scenes(vec![
            Scene::new("p1", "c1"),
            Scene::new("p2", "c2"),
            Scene::new("p3", "c3"),
        ]);

        assert_eq!(session.scenes().len(), session.image_paths().len());
        assert!(session.image_paths().iter().all(|p| p.is_none()));
        assert_eq!(session.rendered_count(), 0);
    }

    #[test]
    fn image_path_lookup() {
        let mut session = Session::new();
        session.reset("topic");
        session.set_scenes(vec![Scene::new("p1", "c1"), Scene::new("p2", "c2")]);
        session.record_image(1, PathBuf::from("scene_2_topic.png"));

        assert!(session.image_path(0).is_none());
        assert_eq!(
            session.image_path(1),
            Some(Path::new("scene_2_topic.png"))
        );
        assert!(session.image_path(7).is_none());
        assert_eq!(session.rendered_count(), 1);
    }
}
