//! Image rendering error types.

/// Specific error conditions for image rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RenderErrorKind {
    /// API request failed
    #[display("Image API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// The response carried no inline image data
    #[display("Image response contained no image data")]
    MissingImageData,
    /// The decoded image was zero bytes
    #[display("Image response decoded to an empty image")]
    EmptyImage,
    /// Base64 decoding failed
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Failed to create the destination directory
    #[display("Failed to create media directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write the image file
    #[display("Failed to write image file: {}", _0)]
    FileWrite(String),
}

/// Image rendering error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{RenderError, RenderErrorKind};
///
/// let err = RenderError::new(RenderErrorKind::MissingImageData);
/// assert!(format!("{}", err).contains("no image data"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The kind of error that occurred
    pub kind: RenderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RenderError {
    /// Create a new RenderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
