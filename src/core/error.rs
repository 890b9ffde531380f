use thiserror::Error;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent error handling.
/// Uses `thiserror` for automatic error conversion and display formatting.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP transport errors while downloading a photo
    #[error("HTTP error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Photo download answered with a non-success status
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Downloaded bytes are not a decodable image
    #[error("Image decode error: {0}")]
    Decode(String),

    /// The bundled overlay asset could not be read or decoded.
    /// Fatal: the bot cannot serve any request without the overlay.
    #[error("Overlay asset error: {0}")]
    AssetLoad(String),

    /// Compositing inputs disagree on dimensions.
    /// Internal contract violation: the pipeline always resizes the overlay
    /// to the photo's own size before compositing.
    #[error("Dimension mismatch: photo is {photo_width}x{photo_height}, overlay is {overlay_width}x{overlay_height}")]
    DimensionMismatch {
        photo_width: u32,
        photo_height: u32,
        overlay_width: u32,
        overlay_height: u32,
    },

    /// PNG serialization failed
    #[error("Image encode error: {0}")]
    Encode(String),

    /// An update is missing a field the Bot API guarantees for this kind
    /// of message (sender, photo sizes, ...)
    #[error("Malformed update: {0}")]
    MalformedUpdate(&'static str),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Bot API base URL cannot carry a file path
    #[error("Invalid Bot API base URL: {0}")]
    ApiBase(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
