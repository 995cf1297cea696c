//! Core data types for the Storyboard generation library.
//!
//! This crate provides the foundation data types used across all Storyboard interfaces.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod input;
mod media;
mod message;
mod output;
mod request;
mod role;
mod scene;

pub use input::Input;
pub use media::MediaSource;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use scene::{SCENE_COUNT, Scene};
