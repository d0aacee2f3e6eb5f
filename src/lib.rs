//! ShapeMatch recognizes small binary symbols among scattered candidates.
//!
//! Queries (symbols from an instruction strip) are matched one-to-one against
//! candidate blobs with a rotation-tolerant pixel cost. Queries that match
//! poorly are searched for again with a multi-scale, multi-rotation ZNCC
//! template search, and fallback points that collide with other answers are
//! rejected. The `scene` module wires a thresholding front end to this
//! pipeline for whole puzzle images.
//!
//! Optional features: `rayon` for parallel scoring, `image-io` for decoding
//! files with the `image` crate, `tracing` for structured spans and events.

pub mod assign;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod mask;
pub mod recognize;
pub mod resolve;
pub mod scene;
pub mod search;
pub mod segment;
pub mod shape;
pub mod template;
mod trace;
pub mod util;

pub use assign::{Candidate, GreedyAssigner, MatchOrigin, MatchResult, Point, QueryShape};
pub use crate::image::{ImageView, OwnedImage};
pub use mask::{BinaryMask, BoundingBox};
pub use recognize::{RecognizeConfig, Recognition, Recognizer};
pub use resolve::{resolve_fallback, ConflictPolicy, Resolution};
pub use scene::{recognize_scene, SceneConfig, SceneRecognition};
pub use search::{locate_with_template, TemplateHit, TemplateSearchConfig, TemplateSearcher};
pub use segment::BlobFilter;
pub use shape::cost::{match_cost, RotationMode};
pub use shape::{normalize_mask, NormalizeConfig, NormalizedShape};
pub use util::{ShapeMatchError, ShapeMatchResult};
