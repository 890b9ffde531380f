//! Filtro do Lula - Telegram bot that stamps the lula overlay onto user photos
//!
//! This library provides all the functionality for the bot: picking the
//! best photo variant, fetching and decoding it, the overlay resize cache,
//! alpha compositing, PNG encoding, and the Telegram handler tree.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors and logging
//! - `filter`: The image pipeline (overlay cache, compositor, encoder)
//! - `telegram`: Telegram bot integration and handlers

pub mod core;
pub mod filter;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use crate::filter::overlay;
pub use crate::telegram::{process_photo_request, select_largest};
