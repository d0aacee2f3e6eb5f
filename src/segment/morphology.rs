//! Binary erosion, dilation, opening and closing with rectangular kernels.
//!
//! The kernel anchor is `(kw / 2, kh / 2)` and both erosion and dilation
//! sample the same anchored offsets, without reflecting the element. With odd
//! kernels this is the textbook definition; with even kernels an opening or
//! closing moves the foreground one pixel right and down. Erosion treats
//! pixels outside the mask as foreground and dilation treats them as
//! background, so neither operation invents or erases content at the border by
//! itself.

use crate::mask::BinaryMask;
use crate::util::{ShapeMatchError, ShapeMatchResult};

/// Rectangular structuring element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kernel {
    /// Kernel width.
    pub width: usize,
    /// Kernel height.
    pub height: usize,
}

impl Kernel {
    /// Square `size x size` kernel.
    pub fn square(size: usize) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    fn validate(&self) -> ShapeMatchResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "morphology kernel must be non-empty",
            });
        }
        Ok(())
    }

    /// Offsets `b` of the element relative to its anchor.
    fn offsets(&self) -> Vec<(isize, isize)> {
        let ax = (self.width / 2) as isize;
        let ay = (self.height / 2) as isize;
        let mut out = Vec::with_capacity(self.width * self.height);
        for j in 0..self.height as isize {
            for i in 0..self.width as isize {
                out.push((i - ax, j - ay));
            }
        }
        out
    }
}

fn sample(mask: &BinaryMask, x: isize, y: isize, outside: bool) -> bool {
    if x < 0 || y < 0 || x as usize >= mask.width() || y as usize >= mask.height() {
        return outside;
    }
    mask.get(x as usize, y as usize)
}

/// Keeps pixels where the whole translated element fits in the foreground.
pub fn erode(mask: &BinaryMask, kernel: Kernel) -> ShapeMatchResult<BinaryMask> {
    kernel.validate()?;
    let offsets = kernel.offsets();
    BinaryMask::from_fn(mask.width(), mask.height(), |x, y| {
        offsets
            .iter()
            .all(|&(dx, dy)| sample(mask, x as isize + dx, y as isize + dy, true))
    })
}

/// Sets pixels where any translated element sample is foreground.
pub fn dilate(mask: &BinaryMask, kernel: Kernel) -> ShapeMatchResult<BinaryMask> {
    kernel.validate()?;
    let offsets = kernel.offsets();
    BinaryMask::from_fn(mask.width(), mask.height(), |x, y| {
        offsets
            .iter()
            .any(|&(dx, dy)| sample(mask, x as isize + dx, y as isize + dy, false))
    })
}

/// Erosion followed by dilation; removes specks smaller than the kernel.
pub fn open(mask: &BinaryMask, kernel: Kernel) -> ShapeMatchResult<BinaryMask> {
    dilate(&erode(mask, kernel)?, kernel)
}

/// Dilation followed by erosion; fills gaps smaller than the kernel.
pub fn close(mask: &BinaryMask, kernel: Kernel) -> ShapeMatchResult<BinaryMask> {
    erode(&dilate(mask, kernel)?, kernel)
}
