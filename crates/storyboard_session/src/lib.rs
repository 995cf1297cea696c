//! Session orchestration for Storyboard.
//!
//! This crate holds the pipeline's design core: the per-topic [`Session`]
//! state, the [`SessionOrchestrator`] that sequences story generation,
//! scene extraction, and per-scene image rendering with idempotence across
//! repeated invocations, and the driver-backed implementations of the
//! storyboard service traits.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod orchestrator;
mod services;
mod session;

pub use extraction::{extract_json, parse_json};
pub use orchestrator::{DEFAULT_MEDIA_DIR, RenderOutcome, SessionOrchestrator, sanitize_topic};
pub use services::{PanelRenderer, SceneDirector, StoryComposer};
pub use session::Session;
