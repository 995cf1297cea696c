//! Configuration for the storyboard pipeline.
//!
//! Configuration is TOML-based with a precedence system:
//! - Bundled defaults (include_str! from storyboard.toml)
//! - User overrides (./storyboard.toml or ~/.config/storyboard/storyboard.toml)
//! - Automatic merging with user values taking precedence

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use storyboard_error::{ConfigError, StoryboardError, StoryboardResult};
use tracing::{debug, instrument};

/// Top-level Storyboard configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard::StoryboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Load configuration (bundled defaults + user overrides)
/// let config = StoryboardConfig::load()?;
/// println!("media dir: {}", config.media_dir);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoryboardConfig {
    /// Directory for generated storyboard images
    pub media_dir: String,

    /// Model used for story generation
    #[serde(default)]
    pub story_model: Option<String>,

    /// Model used for scene extraction
    #[serde(default)]
    pub scene_model: Option<String>,

    /// Model used for image generation
    #[serde(default)]
    pub image_model: Option<String>,

    /// Sampling temperature for text generation
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Output token limit for text generation
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl StoryboardConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (storyboard.toml shipped with the library)
    /// 2. User config in home directory (~/.config/storyboard/storyboard.toml)
    /// 3. User config in current directory (./storyboard.toml)
    ///
    /// User config files are optional and will be silently skipped if not found.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("storyboard").required(false));

        // Build and deserialize
        builder
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_session::DEFAULT_MEDIA_DIR;

    #[test]
    fn bundled_defaults_parse() {
        const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

        let config: StoryboardConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .expect("bundled config should build")
            .try_deserialize()
            .expect("bundled config should deserialize");

        assert_eq!(config.media_dir, DEFAULT_MEDIA_DIR);
        assert!(config.story_model.is_some());
        assert!(config.image_model.is_some());
    }
}
