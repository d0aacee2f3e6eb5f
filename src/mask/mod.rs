//! Binary masks with foreground 255 and background 0.
//!
//! Masks are the common currency between segmentation and matching: blob
//! crops, query cells, normalized canvases and the dense search region are
//! all `BinaryMask`s. Construction binarizes, so any non-zero byte becomes
//! foreground.

use crate::image::{ImageView, OwnedImage};
use crate::util::ShapeMatchResult;

pub mod resample;

/// Pixel value used for foreground.
pub const FOREGROUND: u8 = 255;
/// Pixel value used for background.
pub const BACKGROUND: u8 = 0;

/// Axis-aligned rectangle in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Left column.
    pub x: usize,
    /// Top row.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl BoundingBox {
    /// Returns true if `(x, y)` lies inside the box.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// Returns the box translated by `(dx, dy)`.
    pub fn offset(&self, dx: usize, dy: usize) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Owned binary mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    img: OwnedImage,
}

impl BinaryMask {
    /// Creates a mask from a row-major buffer, mapping non-zero bytes to 255.
    pub fn new(mut data: Vec<u8>, width: usize, height: usize) -> ShapeMatchResult<Self> {
        for value in data.iter_mut() {
            if *value != BACKGROUND {
                *value = FOREGROUND;
            }
        }
        Ok(Self {
            img: OwnedImage::new(data, width, height)?,
        })
    }

    /// Creates an all-background mask.
    pub fn zeros(width: usize, height: usize) -> ShapeMatchResult<Self> {
        Ok(Self {
            img: OwnedImage::filled(width, height, BACKGROUND)?,
        })
    }

    /// Creates a mask whose foreground is where `f(x, y)` returns true.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> ShapeMatchResult<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut mask = Self::zeros(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        Ok(mask)
    }

    /// Copies a view, mapping non-zero bytes to foreground.
    pub fn from_view(view: ImageView<'_, u8>) -> ShapeMatchResult<Self> {
        let img = view.to_owned_image();
        let (width, height) = (img.width(), img.height());
        Self::new(img.into_data(), width, height)
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Returns the raw 0/255 buffer.
    pub fn data(&self) -> &[u8] {
        self.img.data()
    }

    /// Returns a borrowed view of the mask.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Returns true if `(x, y)` is foreground; out-of-bounds is background.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.img.get(x, y).is_some_and(|v| v != BACKGROUND)
    }

    /// Sets `(x, y)`; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, foreground: bool) {
        let value = if foreground { FOREGROUND } else { BACKGROUND };
        self.img.set(x, y, value);
    }

    /// Counts foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data().iter().filter(|&&v| v != BACKGROUND).count()
    }

    /// Returns true if the mask has no foreground.
    pub fn is_empty(&self) -> bool {
        self.data().iter().all(|&v| v == BACKGROUND)
    }

    /// Tight bounding box of the foreground, or `None` for an empty mask.
    pub fn foreground_bbox(&self) -> Option<BoundingBox> {
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;
        for (y, row) in self.view().rows().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == BACKGROUND {
                    continue;
                }
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        if min_x == usize::MAX {
            return None;
        }
        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Copies the rectangle `bbox` into a new mask.
    pub fn crop(&self, bbox: BoundingBox) -> ShapeMatchResult<Self> {
        let roi = self.view().roi(bbox.x, bbox.y, bbox.width, bbox.height)?;
        Ok(Self {
            img: roi.to_owned_image(),
        })
    }

    /// Crops to the foreground bounding box; `None` for an empty mask.
    pub fn crop_to_foreground(&self) -> Option<Self> {
        let bbox = self.foreground_bbox()?;
        self.crop(bbox).ok()
    }

    /// Writes `src` with its top-left at `(x, y)`, clipping at the border.
    ///
    /// Both foreground and background pixels of `src` are copied.
    pub fn paste(&mut self, src: &BinaryMask, x: usize, y: usize) {
        for sy in 0..src.height() {
            for sx in 0..src.width() {
                self.set(x + sx, y + sy, src.get(sx, sy));
            }
        }
    }

    /// Clears a band of `margin` pixels along every edge.
    pub fn clear_border(&mut self, margin: usize) {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                let inner = x >= margin
                    && y >= margin
                    && x + margin < width
                    && y + margin < height;
                if !inner {
                    self.set(x, y, false);
                }
            }
        }
    }
}
