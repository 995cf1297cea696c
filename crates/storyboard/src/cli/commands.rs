//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default topic shown to first-time users.
pub const DEFAULT_TOPIC: &str =
    "A lonely astronaut on Mars discovers a mysterious, pulsating alien artifact.";

/// Storyboard - AI story and five-panel storyboard generation
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Generate a story and a cinematic five-panel storyboard from a topic", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story and render its storyboard panels
    Generate {
        /// Topic, character, or scenario for the story
        #[arg(long, default_value = DEFAULT_TOPIC)]
        topic: String,

        /// Directory for generated images (overrides configuration)
        #[arg(long)]
        media_dir: Option<PathBuf>,

        /// Model for story and scene generation (overrides configuration)
        #[arg(long)]
        model: Option<String>,

        /// Model for image generation (overrides configuration)
        #[arg(long)]
        image_model: Option<String>,

        /// Generate the story and scenes only, skipping image rendering
        #[arg(long)]
        skip_images: bool,
    },
}
