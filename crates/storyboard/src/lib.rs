//! Storyboard - AI story and storyboard generation.
//!
//! Storyboard turns a short text prompt into a generated narrative and an
//! accompanying five-panel illustrated storyboard, using the Google Gemini
//! API for both text and image generation. Results are cached in session
//! state and as flat image files on disk.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storyboard::{
//!     GeminiClient, PanelRenderer, SceneDirector, Session, SessionOrchestrator, StoryComposer,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(GeminiClient::new()?);
//!
//!     let orchestrator = SessionOrchestrator::new(
//!         StoryComposer::new(client.clone()),
//!         SceneDirector::new(client.clone()),
//!         PanelRenderer::new(client),
//!         "generated_media",
//!     );
//!
//!     let mut session = Session::new();
//!     orchestrator.submit(&mut session, "A robot learns to paint").await?;
//!
//!     for index in 0..session.scenes().len() {
//!         let outcome = orchestrator.ensure_image(&mut session, index).await?;
//!         println!("scene {}: {:?}", index + 1, outcome);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Storyboard is organized as a workspace with focused crates:
//!
//! - `storyboard_core` - Core data types (Scene, GenerateRequest, etc.)
//! - `storyboard_interface` - Driver and service trait definitions
//! - `storyboard_error` - Error types
//! - `storyboard_models` - Gemini provider implementation
//! - `storyboard_session` - Session state and orchestration
//!
//! This crate (`storyboard`) re-exports everything for convenience.

// Re-export core crates
pub use storyboard_core::*;
pub use storyboard_error::*;
pub use storyboard_interface::*;
pub use storyboard_models::*;
pub use storyboard_session::*;

mod config;

pub use config::StoryboardConfig;
