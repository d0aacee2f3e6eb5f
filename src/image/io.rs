//! Loading helpers backed by the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{ShapeMatchError, ShapeMatchResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> ShapeMatchResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Converts any decoded image to an owned luma image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> ShapeMatchResult<OwnedImage> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    OwnedImage::new(gray.into_raw(), width, height)
}

/// Decodes an in-memory encoded image (PNG or JPEG) to grayscale.
pub fn decode_gray_image(bytes: &[u8]) -> ShapeMatchResult<OwnedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| ShapeMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Loads an image from disk and converts it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> ShapeMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| ShapeMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
