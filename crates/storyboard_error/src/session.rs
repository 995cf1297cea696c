//! Session orchestration error types.

/// Specific error conditions for session operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SessionErrorKind {
    /// Submitted topic was empty or whitespace
    #[display("Topic cannot be empty")]
    EmptyTopic,
    /// Scene index outside the populated scene list
    #[display("Scene index {} out of bounds for {} scenes", index, len)]
    SceneIndexOutOfBounds {
        /// Requested scene index
        index: usize,
        /// Number of scenes in the session
        len: usize,
    },
}

/// Error type for session operations.
///
/// # Examples
///
/// ```
/// use storyboard_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::EmptyTopic);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The specific error condition
    pub kind: SessionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SessionError {
    /// Create a new SessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
