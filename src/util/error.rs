//! Error types for shapematch.

use thiserror::Error;

/// Result alias for shapematch operations.
pub type ShapeMatchResult<T> = std::result::Result<T, ShapeMatchError>;

/// Errors that can occur when building, matching, or locating shapes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShapeMatchError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest does not fit inside the image.
    #[error("roi ({x}, {y}, {width}x{height}) exceeds image {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Two masks that must share a canvas size do not.
    #[error("size mismatch: {left:?} vs {right:?}")]
    SizeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// The mask has no foreground pixels.
    #[error("mask has no foreground pixels")]
    EmptyMask,
    /// A template cannot be used for correlation.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// No candidate shapes were supplied or extracted.
    #[error("no candidate shapes")]
    NoCandidates,
    /// No query shapes were supplied or extracted.
    #[error("no query shapes")]
    NoQueries,
    /// The instruction strip could not be located.
    #[error("instruction strip not found")]
    StripNotFound,
    /// A configuration value is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    /// Image decoding failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
