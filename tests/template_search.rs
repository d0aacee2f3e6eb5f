mod common;

use common::{ring, triangle};
use shapematch::lowlevel::{rotate_nearest, scale_nearest};
use shapematch::{locate_with_template, BinaryMask, TemplateSearchConfig, TemplateSearcher};

fn small_grid() -> TemplateSearchConfig {
    TemplateSearchConfig {
        scale_min: 1.5,
        scale_max: 2.5,
        scale_steps: 3,
        angle_step_deg: 45.0,
        ..TemplateSearchConfig::default()
    }
}

#[test]
fn finds_scaled_and_rotated_copy() {
    let mut query = BinaryMask::zeros(30, 30).unwrap();
    query.paste(&triangle(20), 4, 6);

    let crop = query.crop_to_foreground().unwrap();
    let target = rotate_nearest(&scale_nearest(&crop, 2.0, 8).unwrap(), 45.0)
        .crop_to_foreground()
        .unwrap();
    let (x0, y0) = (47, 38);
    let mut region = BinaryMask::zeros(130, 120).unwrap();
    region.paste(&target, x0, y0);

    let hit = locate_with_template(&query, region.view(), small_grid())
        .unwrap()
        .expect("copy should be found");
    assert!(hit.score > 0.99, "score {}", hit.score);
    assert_eq!(hit.top_left.x, x0);
    assert_eq!(hit.top_left.y, y0);
    assert_eq!(hit.size, target.size());
    assert_eq!(hit.center.x, x0 + target.width() / 2);
    assert_eq!(hit.center.y, y0 + target.height() / 2);
    assert!((hit.scale - 2.0).abs() < 1e-6);
    assert_eq!(hit.angle_deg, 45.0);
}

#[test]
fn default_grid_recovers_double_size_quarter_turn() {
    let mut query = BinaryMask::zeros(30, 30).unwrap();
    query.paste(&triangle(20), 4, 6);

    let crop = query.crop_to_foreground().unwrap();
    let target = rotate_nearest(&scale_nearest(&crop, 2.0, 8).unwrap(), 45.0)
        .crop_to_foreground()
        .unwrap();
    let (x0, y0) = (30, 28);
    let mut region = BinaryMask::zeros(110, 100).unwrap();
    region.paste(&target, x0, y0);

    let hit = locate_with_template(&query, region.view(), TemplateSearchConfig::default())
        .unwrap()
        .expect("copy should be found with the default grid");
    assert!(hit.score >= 0.6, "score {}", hit.score);
    let (cx, cy) = (x0 + target.width() / 2, y0 + target.height() / 2);
    assert!(hit.center.x.abs_diff(cx) <= 2, "center {:?}", hit.center);
    assert!(hit.center.y.abs_diff(cy) <= 2, "center {:?}", hit.center);
    // Nearest grid samples are 2.02 and 40/50 degrees.
    assert!((hit.scale - 2.0).abs() < 0.2, "scale {}", hit.scale);
    assert!((hit.angle_deg - 45.0).abs() <= 10.0, "angle {}", hit.angle_deg);
}

#[test]
fn redrawn_ring_at_double_size_is_found() {
    let query = ring(22, 3.0);
    let target = ring(44, 6.0);
    let mut region = BinaryMask::zeros(120, 100).unwrap();
    region.paste(&target, 60, 30);

    let hit = locate_with_template(&query, region.view(), small_grid())
        .unwrap()
        .expect("ring should be found");
    assert!(hit.score >= 0.6);
    let (cx, cy) = (60 + 22, 30 + 22);
    assert!(hit.center.x.abs_diff(cx) <= 3, "center {:?}", hit.center);
    assert!(hit.center.y.abs_diff(cy) <= 3, "center {:?}", hit.center);
}

#[test]
fn tiny_or_empty_queries_are_skipped() {
    let mut region = BinaryMask::zeros(80, 80).unwrap();
    region.paste(&ring(30, 4.0), 10, 10);
    let searcher = TemplateSearcher::new(region.view(), small_grid()).unwrap();

    let empty = BinaryMask::zeros(20, 20).unwrap();
    assert_eq!(searcher.locate(&empty).unwrap(), None);

    let thin = BinaryMask::from_fn(20, 20, |x, y| y == 5 && x > 2).unwrap();
    assert_eq!(searcher.locate(&thin).unwrap(), None);
}

#[test]
fn blank_region_yields_nothing() {
    let region = BinaryMask::zeros(100, 100).unwrap();
    let hit = locate_with_template(&triangle(20), region.view(), small_grid()).unwrap();
    assert!(hit.is_none());
}

#[test]
fn templates_larger_than_region_are_ignored() {
    let region = BinaryMask::from_fn(30, 30, |x, y| (x + y) % 7 == 0).unwrap();
    let cfg = TemplateSearchConfig {
        scale_min: 3.0,
        scale_max: 3.0,
        scale_steps: 1,
        ..small_grid()
    };
    let hit = locate_with_template(&triangle(20), region.view(), cfg).unwrap();
    assert!(hit.is_none());
}

#[test]
fn invalid_grid_is_rejected() {
    let region = BinaryMask::zeros(50, 50).unwrap();
    let cfg = TemplateSearchConfig {
        angle_step_deg: 0.0,
        ..TemplateSearchConfig::default()
    };
    assert!(TemplateSearcher::new(region.view(), cfg).is_err());
}
