//! Image pipeline: overlay cache, compositor and PNG encoder
//!
//! Everything operates on one concrete bitmap type, `image::RgbaImage`.
//! Decoded photos are normalized to RGBA8 before compositing, so JPEG, PNG
//! and WebP sources all flow through the same code path.

pub mod composite;
pub mod overlay;

// Re-exports for convenience
pub use composite::{composite, decode_rgba, encode_png};
