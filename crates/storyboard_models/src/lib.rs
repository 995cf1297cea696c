//! LLM provider integrations for Storyboard.
//!
//! This crate provides the Google Gemini client used for both story/scene
//! text generation and storyboard image generation.
//!
//! # Example
//!
//! ```no_run
//! use storyboard_models::GeminiClient;
//! use storyboard_interface::StoryboardDriver;
//! use storyboard_core::{GenerateRequest, Message, Role, Input};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let request = GenerateRequest {
//!     messages: vec![Message {
//!         role: Role::User,
//!         content: vec![Input::Text("Hello".to_string())],
//!     }],
//!     ..Default::default()
//! };
//! let response = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{GeminiClient, GeminiResult};
