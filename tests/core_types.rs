use serde::Deserialize;
use shapematch::{
    BinaryMask, ImageView, OwnedImage, RecognizeConfig, SceneConfig, ShapeMatchError,
};

#[test]
fn strided_roi_is_zero_copy() {
    let data: Vec<u8> = (0..48).collect();
    let view = ImageView::new(&data, 6, 4, 12).unwrap();
    let roi = view.roi(2, 1, 3, 2).unwrap();
    assert_eq!(roi.stride(), 12);
    assert_eq!(roi.row(0).unwrap(), &[14, 15, 16]);
    assert_eq!(roi.row(1).unwrap(), &[26, 27, 28]);
    assert_eq!(roi.get(2, 1), Some(&28));
    assert_eq!(roi.get(3, 0), None);

    let owned = roi.to_owned_image();
    assert_eq!(owned.data(), &[14, 15, 16, 26, 27, 28]);
}

#[test]
fn view_construction_errors() {
    let data = vec![0u8; 10];
    assert_eq!(
        ImageView::new(&data, 4, 3, 3).unwrap_err(),
        ShapeMatchError::InvalidStride { width: 4, stride: 3 }
    );
    assert_eq!(
        ImageView::from_slice(&data, 4, 3).unwrap_err(),
        ShapeMatchError::BufferTooSmall { needed: 12, got: 10 }
    );
    assert_eq!(
        ImageView::from_slice(&data, 0, 3).unwrap_err(),
        ShapeMatchError::InvalidDimensions { width: 0, height: 3 }
    );
    let view = ImageView::from_slice(&data, 5, 2).unwrap();
    assert!(matches!(
        view.roi(3, 0, 3, 1),
        Err(ShapeMatchError::RoiOutOfBounds { .. })
    ));
    assert!(OwnedImage::new(vec![0; 7], 2, 3).is_err());
}

#[test]
fn masks_binarize_and_crop() {
    let mask = BinaryMask::new(vec![0, 3, 0, 0, 0, 200, 0, 0, 0], 3, 3).unwrap();
    assert_eq!(mask.data(), &[0, 255, 0, 0, 0, 255, 0, 0, 0]);
    let crop = mask.crop_to_foreground().unwrap();
    assert_eq!(crop.size(), (2, 2));
    assert_eq!(crop.count_foreground(), 2);
    assert!(BinaryMask::zeros(4, 4).unwrap().crop_to_foreground().is_none());
}

#[derive(Deserialize)]
struct ExampleConfig {
    recognize: ExampleRecognize,
    scene: ExampleScene,
}

#[derive(Deserialize)]
struct ExampleRecognize {
    weak_cost: f32,
    strong_cost: f32,
    min_separation: f32,
    canvas_size: usize,
    symbol_size: usize,
    template: ExampleTemplate,
}

#[derive(Deserialize)]
struct ExampleTemplate {
    scale_steps: usize,
    min_score: f32,
}

#[derive(Deserialize)]
struct ExampleScene {
    symbol_threshold: u8,
    dense_threshold: u8,
    query_cells: usize,
}

#[test]
fn bundled_cli_example_matches_library_defaults() {
    let text = include_str!("../shapematch-cli/config.example.json");
    let example: ExampleConfig = serde_json::from_str(text).unwrap();
    let rec = RecognizeConfig::default();
    let scene = SceneConfig::default();

    assert_eq!(example.recognize.weak_cost, rec.weak_cost);
    assert_eq!(example.recognize.strong_cost, rec.conflict.strong_cost);
    assert_eq!(example.recognize.min_separation, rec.conflict.min_separation);
    assert_eq!(example.recognize.canvas_size, rec.normalize.canvas_size);
    assert_eq!(example.recognize.symbol_size, rec.normalize.symbol_size);
    assert_eq!(example.recognize.template.scale_steps, rec.template.scale_steps);
    assert_eq!(example.recognize.template.min_score, rec.template.min_score);
    assert_eq!(example.scene.symbol_threshold, scene.symbol_threshold);
    assert_eq!(example.scene.dense_threshold, scene.dense_threshold);
    assert_eq!(example.scene.query_cells, scene.query_cells);
}
