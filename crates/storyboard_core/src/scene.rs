//! Storyboard scene types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Number of panels in a storyboard.
pub const SCENE_COUNT: usize = 5;

/// One storyboard panel: an image-generation prompt and a display caption.
///
/// Scenes are created as a batch by scene extraction and are immutable
/// afterwards. An extractor that could not derive a usable scene encodes
/// the failure in the prompt text (see [`Scene::failed_placeholder`])
/// rather than failing the whole batch.
///
/// # Examples
///
/// ```
/// use storyboard_core::Scene;
///
/// let scene = Scene::new(
///     "A rover crossing a red dune at dawn, cinematic wide shot",
///     "The long drive begins",
/// );
/// assert!(scene.prompt().contains("rover"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Scene {
    /// Image-generation instruction derived from the story
    prompt: String,
    /// Short narrative label for display
    caption: String,
}

impl Scene {
    /// Create a new scene.
    pub fn new(prompt: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            caption: caption.into(),
        }
    }

    /// Placeholder for a scene the extractor could not derive.
    ///
    /// The prompt text deliberately contains the word "failed" so that
    /// downstream rendering skips it (the extractor's failure convention
    /// is a substring match on the prompt).
    pub fn failed_placeholder() -> Self {
        Self {
            prompt: "Scene generation failed".to_string(),
            caption: "...".to_string(),
        }
    }
}
