//! 8-connected component labeling with per-component statistics.

use crate::mask::{BinaryMask, BoundingBox};
use crate::util::ShapeMatchResult;

/// Statistics of one connected component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Component {
    /// Label value in [`ComponentMap::labels`] (starting at 1).
    pub label: u32,
    /// Tight bounding box.
    pub bbox: BoundingBox,
    /// Number of pixels.
    pub area: usize,
    /// Mean pixel position `(x, y)`.
    pub centroid: (f64, f64),
}

/// Label image plus the components found in it.
pub struct ComponentMap {
    width: usize,
    labels: Vec<u32>,
    components: Vec<Component>,
}

impl ComponentMap {
    /// Returns components in raster order of their first pixel.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns the label at `(x, y)`; 0 is background.
    pub fn label_at(&self, x: usize, y: usize) -> u32 {
        self.labels[y * self.width + x]
    }

    /// Mask of `component` cropped to its bounding box.
    pub fn component_mask(&self, component: &Component) -> ShapeMatchResult<BinaryMask> {
        let bbox = component.bbox;
        BinaryMask::from_fn(bbox.width, bbox.height, |x, y| {
            self.label_at(bbox.x + x, bbox.y + y) == component.label
        })
    }
}

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Labels the 8-connected foreground regions of `mask`.
pub fn label_components(mask: &BinaryMask) -> ComponentMap {
    let (width, height) = mask.size();
    let mut labels = vec![0u32; width * height];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start_y in 0..height {
        for start_x in 0..width {
            if !mask.get(start_x, start_y) || labels[start_y * width + start_x] != 0 {
                continue;
            }
            let label = components.len() as u32 + 1;
            labels[start_y * width + start_x] = label;
            stack.push((start_x, start_y));

            let (mut min_x, mut min_y, mut max_x, mut max_y) = (start_x, start_y, start_x, start_y);
            let mut area = 0usize;
            let (mut sum_x, mut sum_y) = (0u64, 0u64);

            while let Some((x, y)) = stack.pop() {
                area += 1;
                sum_x += x as u64;
                sum_y += y as u64;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);

                for (dx, dy) in NEIGHBORS {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    let idx = ny * width + nx;
                    if labels[idx] == 0 && mask.get(nx, ny) {
                        labels[idx] = label;
                        stack.push((nx, ny));
                    }
                }
            }

            components.push(Component {
                label,
                bbox: BoundingBox {
                    x: min_x,
                    y: min_y,
                    width: max_x - min_x + 1,
                    height: max_y - min_y + 1,
                },
                area,
                centroid: (sum_x as f64 / area as f64, sum_y as f64 / area as f64),
            });
        }
    }

    ComponentMap {
        width,
        labels,
        components,
    }
}
