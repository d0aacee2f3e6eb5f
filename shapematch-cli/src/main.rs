use clap::Parser;
use shapematch::image::io::load_gray_image;
use shapematch::scene::RegionFractions;
use shapematch::{
    recognize_scene, BlobFilter, ConflictPolicy, NormalizeConfig, Point, RecognizeConfig,
    RotationMode, SceneConfig, SceneRecognition, ShapeMatchError, TemplateSearchConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ShapeMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RotationModeConfig {
    Disabled,
    Enabled,
}

impl From<RotationModeConfig> for RotationMode {
    fn from(value: RotationModeConfig) -> Self {
        match value {
            RotationModeConfig::Disabled => RotationMode::Disabled,
            RotationModeConfig::Enabled => RotationMode::Enabled,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegionJson {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
}

impl From<RegionJson> for RegionFractions {
    fn from(value: RegionJson) -> Self {
        Self {
            top: value.top,
            bottom: value.bottom,
            left: value.left,
            right: value.right,
        }
    }
}

impl From<RegionFractions> for RegionJson {
    fn from(value: RegionFractions) -> Self {
        Self {
            top: value.top,
            bottom: value.bottom,
            left: value.left,
            right: value.right,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TemplateJson {
    scale_min: f64,
    scale_max: f64,
    scale_steps: usize,
    angle_min_deg: f32,
    angle_max_deg: f32,
    angle_step_deg: f32,
    min_query_side: usize,
    min_template_side: usize,
    min_foreground: usize,
    min_score: f32,
}

impl Default for TemplateJson {
    fn default() -> Self {
        let cfg = TemplateSearchConfig::default();
        Self {
            scale_min: cfg.scale_min,
            scale_max: cfg.scale_max,
            scale_steps: cfg.scale_steps,
            angle_min_deg: cfg.angle_min_deg,
            angle_max_deg: cfg.angle_max_deg,
            angle_step_deg: cfg.angle_step_deg,
            min_query_side: cfg.min_query_side,
            min_template_side: cfg.min_template_side,
            min_foreground: cfg.min_foreground,
            min_score: cfg.min_score,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RecognizeJson {
    canvas_size: usize,
    symbol_size: usize,
    rotation: RotationModeConfig,
    weak_cost: f32,
    strong_cost: f32,
    min_separation: f32,
    parallel: bool,
    template: TemplateJson,
}

impl Default for RecognizeJson {
    fn default() -> Self {
        let cfg = RecognizeConfig::default();
        Self {
            canvas_size: cfg.normalize.canvas_size,
            symbol_size: cfg.normalize.symbol_size,
            rotation: RotationModeConfig::Enabled,
            weak_cost: cfg.weak_cost,
            strong_cost: cfg.conflict.strong_cost,
            min_separation: cfg.conflict.min_separation,
            parallel: cfg.parallel,
            template: TemplateJson::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SceneJson {
    top_region: RegionJson,
    main_region: RegionJson,
    strip_gray_low: u8,
    strip_gray_high: u8,
    strip_width: (usize, usize),
    strip_height: (usize, usize),
    query_cells: usize,
    symbol_threshold: u8,
    dense_threshold: u8,
    min_blob_area: usize,
    max_blob_area: usize,
    min_blob_side: usize,
    max_blob_aspect: f32,
}

impl Default for SceneJson {
    fn default() -> Self {
        let cfg = SceneConfig::default();
        Self {
            top_region: cfg.top_region.into(),
            main_region: cfg.main_region.into(),
            strip_gray_low: cfg.strip_gray_low,
            strip_gray_high: cfg.strip_gray_high,
            strip_width: cfg.strip_width,
            strip_height: cfg.strip_height,
            query_cells: cfg.query_cells,
            symbol_threshold: cfg.symbol_threshold,
            dense_threshold: cfg.dense_threshold,
            min_blob_area: cfg.blobs.min_area,
            max_blob_area: cfg.blobs.max_area,
            min_blob_side: cfg.blobs.min_side,
            max_blob_aspect: cfg.blobs.max_aspect,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    output_path: Option<String>,
    scene: SceneJson,
    recognize: RecognizeJson,
}

impl Config {
    fn scene_config(self) -> SceneConfig {
        let scene = self.scene;
        let rec = self.recognize;
        let tpl = rec.template;
        let defaults = SceneConfig::default();
        SceneConfig {
            top_region: scene.top_region.into(),
            main_region: scene.main_region.into(),
            strip_gray_low: scene.strip_gray_low,
            strip_gray_high: scene.strip_gray_high,
            strip_width: scene.strip_width,
            strip_height: scene.strip_height,
            query_cells: scene.query_cells,
            symbol_threshold: scene.symbol_threshold,
            dense_threshold: scene.dense_threshold,
            blobs: BlobFilter {
                min_area: scene.min_blob_area,
                max_area: scene.max_blob_area,
                min_side: scene.min_blob_side,
                max_aspect: scene.max_blob_aspect,
            },
            recognize: RecognizeConfig {
                normalize: NormalizeConfig {
                    canvas_size: rec.canvas_size,
                    symbol_size: rec.symbol_size,
                },
                rotation: rec.rotation.into(),
                weak_cost: rec.weak_cost,
                conflict: ConflictPolicy {
                    min_separation: rec.min_separation,
                    strong_cost: rec.strong_cost,
                },
                template: TemplateSearchConfig {
                    scale_min: tpl.scale_min,
                    scale_max: tpl.scale_max,
                    scale_steps: tpl.scale_steps,
                    angle_min_deg: tpl.angle_min_deg,
                    angle_max_deg: tpl.angle_max_deg,
                    angle_step_deg: tpl.angle_step_deg,
                    min_query_side: tpl.min_query_side,
                    min_template_side: tpl.min_template_side,
                    min_foreground: tpl.min_foreground,
                    min_score: tpl.min_score,
                    ..TemplateSearchConfig::default()
                },
                parallel: rec.parallel,
            },
            ..defaults
        }
    }
}

#[derive(Debug, Serialize)]
struct PointRecord {
    x: usize,
    y: usize,
}

impl From<Point> for PointRecord {
    fn from(value: Point) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    success: bool,
    points: Vec<Option<PointRecord>>,
    candidates_count: usize,
    message: String,
}

impl Output {
    fn from_result(result: Result<SceneRecognition, ShapeMatchError>) -> Self {
        match result {
            Ok(scene) => Self {
                success: true,
                points: scene
                    .recognition
                    .points()
                    .into_iter()
                    .map(|p| p.map(PointRecord::from))
                    .collect(),
                candidates_count: scene.recognition.candidates_count,
                message: "recognized".to_string(),
            },
            Err(err) => Self {
                success: false,
                points: Vec::new(),
                candidates_count: 0,
                message: err.to_string(),
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("shapematch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }

    let image = load_gray_image(&config.image_path)?;
    let output_path = config.output_path.clone();
    let scene_cfg = config.scene_config();

    let result = recognize_scene(image.view(), &scene_cfg);
    if let Err(err) = &result {
        tracing::warn!(error = %err, "recognition failed");
    }
    let output = Output::from_result(result);
    let json = serde_json::to_string_pretty(&output)?;

    match output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
