//! Summed-area tables for constant-time window statistics.

use crate::image::ImageView;

/// Integral image of pixel values and squared pixel values.
///
/// Tables are `(width + 1) x (height + 1)` with a zero first row and column.
pub struct IntegralTables {
    width: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralTables {
    /// Builds both tables in a single pass.
    pub fn build(image: ImageView<'_, u8>) -> Self {
        let width = image.width();
        let height = image.height();
        let cols = width + 1;
        let mut sum = vec![0u64; cols * (height + 1)];
        let mut sum_sq = vec![0u64; cols * (height + 1)];

        for (y, row) in image.rows().enumerate() {
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            for (x, &value) in row.iter().enumerate() {
                let v = u64::from(value);
                row_sum += v;
                row_sum_sq += v * v;
                let idx = (y + 1) * cols + x + 1;
                sum[idx] = sum[idx - cols] + row_sum;
                sum_sq[idx] = sum_sq[idx - cols] + row_sum_sq;
            }
        }

        Self { width, sum, sum_sq }
    }

    /// Returns `(sum, sum of squares)` over the window at `(x, y)`.
    ///
    /// The caller guarantees the window lies inside the image.
    pub fn window(&self, x: usize, y: usize, width: usize, height: usize) -> (u64, u64) {
        let cols = self.width + 1;
        let a = y * cols + x;
        let b = y * cols + x + width;
        let c = (y + height) * cols + x;
        let d = (y + height) * cols + x + width;
        (
            self.sum[d] + self.sum[a] - self.sum[b] - self.sum[c],
            self.sum_sq[d] + self.sum_sq[a] - self.sum_sq[b] - self.sum_sq[c],
        )
    }
}
