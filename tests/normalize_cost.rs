mod common;

use common::{ring, star, triangle};
use shapematch::{match_cost, normalize_mask, BinaryMask, NormalizeConfig, RotationMode};

#[test]
fn normalized_shapes_fill_the_symbol_box() {
    let cfg = NormalizeConfig::default();
    for mask in [ring(21, 3.0), triangle(40), star(30), ring(64, 6.0)] {
        let shape = normalize_mask(&mask, cfg).unwrap();
        let canvas = shape.mask();
        assert_eq!(canvas.size(), (cfg.canvas_size, cfg.canvas_size));
        let bbox = canvas.foreground_bbox().unwrap();
        assert!(bbox.width.max(bbox.height) <= cfg.symbol_size);
        assert!(bbox.width.max(bbox.height) >= cfg.symbol_size - 1);
    }
}

#[test]
fn normalization_is_idempotent() {
    let cfg = NormalizeConfig::default();
    for mask in [ring(30, 4.0), triangle(25), star(30)] {
        let once = normalize_mask(&mask, cfg).unwrap();
        let twice = normalize_mask(once.mask(), cfg).unwrap();
        assert_eq!(once.mask(), twice.mask());
    }
}

#[test]
fn shape_offset_in_the_input_does_not_matter() {
    let cfg = NormalizeConfig::default();
    let tri = triangle(20);
    let mut shifted = BinaryMask::zeros(60, 45).unwrap();
    shifted.paste(&tri, 31, 17);
    let a = normalize_mask(&tri, cfg).unwrap();
    let b = normalize_mask(&shifted, cfg).unwrap();
    assert_eq!(a.mask(), b.mask());
}

#[test]
fn cost_of_identical_shapes_is_zero() {
    let cfg = NormalizeConfig::default();
    let shape = normalize_mask(&star(40), cfg).unwrap();
    let cost = match_cost(shape.mask(), shape.mask(), RotationMode::Enabled).unwrap();
    assert_eq!(cost, 0.0);
}

#[test]
fn cost_is_not_symmetric() {
    // Rotating the large square clips its corners; rotating the small one
    // does not, so the two directions search different minima.
    let big = BinaryMask::from_fn(48, 48, |_, _| true).unwrap();
    let small = BinaryMask::from_fn(48, 48, |x, y| (19..29).contains(&x) && (19..29).contains(&y)).unwrap();
    let ab = match_cost(&big, &small, RotationMode::Enabled).unwrap();
    let ba = match_cost(&small, &big, RotationMode::Enabled).unwrap();
    assert!(ba - ab > 200.0, "ab={ab} ba={ba}");
}

#[test]
fn rotation_lowers_cost_for_turned_shapes() {
    let cfg = NormalizeConfig::default();
    let tri = normalize_mask(&triangle(40), cfg).unwrap();
    let turned = shapematch::lowlevel::rotate_nearest(tri.mask(), 90.0);
    let turned = normalize_mask(&turned, cfg).unwrap();
    let fixed = match_cost(tri.mask(), turned.mask(), RotationMode::Disabled).unwrap();
    let free = match_cost(tri.mask(), turned.mask(), RotationMode::Enabled).unwrap();
    assert!(free < fixed);
}
