use thiserror::Error;

/// Errors that can occur while rendering or encoding a curve.
#[derive(Debug, Error)]
pub enum PlotError {
    /// `sizes` and `times` must pair up one-to-one.
    #[error("sizes and times differ in length: {sizes} vs {times}")]
    LengthMismatch { sizes: usize, times: usize },

    /// Width or height of zero.
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The drawing backend failed even without text.
    #[error("Drawing error: {0}")]
    Drawing(String),

    /// PNG encoding failed.
    #[error("Encoding error: {0}")]
    Encoding(#[from] image::ImageError),

    /// The raw pixel buffer does not match the canvas.
    #[error("pixel buffer does not match {width}x{height}")]
    BufferMismatch { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a usable TrueType/OpenType font.
    #[error("Invalid font: {0}")]
    InvalidFont(String),
}
