//! Error types shared across module boundaries.
//!
//! Errors produced and consumed inside a single module live next to that
//! module instead ([`crate::settings::SettingsError`]); the types here cross
//! the host boundary.

use thiserror::Error;

/// Errors from handing an image to the system clipboard.
///
/// Every variant is caught at the copy operation and reported through the
/// notice sink; none of them ever reaches the host as a fatal error.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard is available, or the image has no readable source
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// Reading the image bytes from the resolver failed
    #[error("Failed to read image bytes: {0}")]
    Io(#[from] std::io::Error),

    /// The image bytes could not be decoded into pixels
    #[error("Failed to decode image for clipboard: {0}")]
    Decode(#[from] image::ImageError),

    /// The clipboard rejected the write
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Errors from managing the annotation surface's backing buffer.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The requested buffer dimensions could not be allocated
    #[error("Cannot allocate a {width}x{height} annotation buffer")]
    Allocation {
        /// Requested buffer width in pixels
        width: u32,
        /// Requested buffer height in pixels
        height: u32,
    },
}
