//! Top-level error wrapper types.

use crate::{
    BackendError, ConfigError, GenerationError, HttpError, JsonError, RenderError, SessionError,
};

/// This is the foundation error enum. Each variant wraps one of the
/// per-concern error types defined in this crate.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StoryboardError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryboardErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Image rendering error
    #[from(RenderError)]
    Render(RenderError),
    /// Session orchestration error
    #[from(SessionError)]
    Session(SessionError),
}

/// Storyboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardError, StoryboardResult, ConfigError};
///
/// fn might_fail() -> StoryboardResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {}", _0)]
pub struct StoryboardError(Box<StoryboardErrorKind>);

impl StoryboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryboardErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StoryboardErrorKind
impl<T> From<T> for StoryboardError
where
    T: Into<StoryboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyboard operations.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardResult, HttpError};
///
/// fn fetch_data() -> StoryboardResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
