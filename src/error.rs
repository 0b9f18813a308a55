use thiserror::Error;

/// Errors returned before or around palette extraction.
///
/// An image with no usable colors is not an error; see [`crate::ExtractionStatus::Degraded`].
#[derive(Debug, Error)]
pub enum Error {
    /// The image, or the selected region of it, has no pixels.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// A raw RGBA buffer does not match its stated dimensions.
    #[error("buffer of {actual} bytes does not match a {width}x{height} RGBA image ({expected} bytes)")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A configuration value cannot produce a palette.
    #[error("invalid configuration {name}: {message}")]
    InvalidConfig { name: &'static str, message: &'static str },

    /// The session has no captured image to analyze.
    #[error("no image captured")]
    NoCapture,

    /// The session has no palette to send.
    #[error("no palette generated")]
    NoPalette,

    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// Decoding an image failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
