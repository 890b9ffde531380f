use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API base URL (e.g. a local telegram-bot-api server)
/// Read from BOT_API_URL environment variable; defaults to api.telegram.org
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Overlay asset path override
/// Read from LULA_OVERLAY_PATH environment variable
/// If unset, the PNG bundled into the binary is used
pub static OVERLAY_PATH: Lazy<Option<String>> = Lazy::new(|| env::var("LULA_OVERLAY_PATH").ok());

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for HTTP requests (in seconds)
    /// Covers getFile plus the photo download itself
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Overlay cache configuration
pub mod overlay {
    /// Maximum number of per-size resized overlays kept in memory.
    /// Telegram serves only a handful of photo resolutions, so a few dozen
    /// entries cover steady-state traffic while bounding adversarial sizes.
    pub const CACHE_CAPACITY: usize = 64;
}
