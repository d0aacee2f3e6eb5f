#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shapematch::{BinaryMask, BoundingBox, OwnedImage};

/// Circle outline of `thickness` pixels inside a `size` x `size` mask.
pub fn ring(size: usize, thickness: f32) -> BinaryMask {
    let c = (size as f32 - 1.0) / 2.0;
    let r_out = size as f32 / 2.0 - 1.0;
    let r_in = r_out - thickness;
    BinaryMask::from_fn(size, size, |x, y| {
        let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt();
        d <= r_out && d >= r_in
    })
    .unwrap()
}

fn inside_polygon(px: f32, py: f32, vertices: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Outline of a polygon given in unit coordinates (`[-1, 1]`), drawn as the
/// polygon minus a copy shrunk by `inner` about the center.
fn polygon_outline(size: usize, unit: &[(f32, f32)], inner: f32) -> BinaryMask {
    let c = (size as f32 - 1.0) / 2.0;
    let r = size as f32 / 2.0 - 1.0;
    let outer: Vec<(f32, f32)> = unit.iter().map(|&(x, y)| (c + x * r, c + y * r)).collect();
    let shrunk: Vec<(f32, f32)> = unit
        .iter()
        .map(|&(x, y)| (c + x * r * inner, c + y * r * inner))
        .collect();
    BinaryMask::from_fn(size, size, |x, y| {
        let (fx, fy) = (x as f32, y as f32);
        inside_polygon(fx, fy, &outer) && !inside_polygon(fx, fy, &shrunk)
    })
    .unwrap()
}

/// Upward-pointing isosceles triangle outline.
pub fn triangle(size: usize) -> BinaryMask {
    polygon_outline(size, &[(0.0, -1.0), (1.0, 1.0), (-1.0, 1.0)], 0.55)
}

/// Upward-pointing filled isosceles triangle.
pub fn filled_triangle(size: usize) -> BinaryMask {
    polygon_outline(size, &[(0.0, -1.0), (1.0, 1.0), (-1.0, 1.0)], 0.0)
}

/// Five-pointed star outline.
pub fn star(size: usize) -> BinaryMask {
    let mut unit = Vec::with_capacity(10);
    for k in 0..10 {
        let radius = if k % 2 == 0 { 1.0 } else { 0.5 };
        let a = (k as f32 * 36.0 - 90.0).to_radians();
        unit.push((radius * a.cos(), radius * a.sin()));
    }
    polygon_outline(size, &unit, 0.6)
}

/// Filled plus sign with arms `arm` pixels wide.
pub fn cross(size: usize, arm: usize) -> BinaryMask {
    let lo = (size - arm) / 2;
    let hi = lo + arm;
    BinaryMask::from_fn(size, size, |x, y| (lo..hi).contains(&x) || (lo..hi).contains(&y)).unwrap()
}

/// Filled rectangle.
pub fn bar(width: usize, height: usize) -> BinaryMask {
    BinaryMask::from_fn(width, height, |_, _| true).unwrap()
}

/// Random filled blob: a union of a few seeded discs.
pub fn random_blob(rng: &mut StdRng, size: usize) -> BinaryMask {
    let discs: Vec<(f32, f32, f32)> = (0..4)
        .map(|_| {
            let cx = rng.random_range(size as f32 * 0.3..size as f32 * 0.7);
            let cy = rng.random_range(size as f32 * 0.3..size as f32 * 0.7);
            let r = rng.random_range(size as f32 * 0.1..size as f32 * 0.3);
            (cx, cy, r)
        })
        .collect();
    BinaryMask::from_fn(size, size, |x, y| {
        discs
            .iter()
            .any(|&(cx, cy, r)| (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2) <= r * r)
    })
    .unwrap()
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Writes `value` into `img` wherever `mask` is foreground, offset by `(x, y)`.
pub fn stamp(img: &mut OwnedImage, mask: &BinaryMask, x: usize, y: usize, value: u8) -> BoundingBox {
    for my in 0..mask.height() {
        for mx in 0..mask.width() {
            if mask.get(mx, my) {
                img.set(x + mx, y + my, value);
            }
        }
    }
    BoundingBox {
        x,
        y,
        width: mask.width(),
        height: mask.height(),
    }
}

/// Fills a rectangle of `img` with `value`.
pub fn fill_rect(img: &mut OwnedImage, rect: BoundingBox, value: u8) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            img.set(x, y, value);
        }
    }
}
