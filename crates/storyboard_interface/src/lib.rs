//! Trait definitions for the Storyboard generation library.
//!
//! This crate provides the core driver traits, capability traits, and the
//! storyboard service seams that define the Storyboard interface.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod services;
mod traits;
mod types;

pub use services::{ImageRenderer, SceneExtractor, StoryService};
pub use traits::{ImageGeneration, Metadata, StoryboardDriver};
pub use types::ModelMetadata;
